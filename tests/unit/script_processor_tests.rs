/*!
 * Tests for the per-line pipeline
 */

use anyhow::Result;
use scriptmark::{format_links, highlight, process_line, process_lines, process_stream, BuiltinSpeakers, SpeakerTable};
use crate::common;

#[test]
fn test_processLine_withSpeakerLine_shouldHighlight() {
    let table = BuiltinSpeakers::table();
    assert_eq!(
        process_line("エマ「こんにちは」", &table),
        "「《color:#ff69b4》こんに《/color》ちは」"
    );
}

#[test]
fn test_processLine_withLinkOnly_shouldFormatLink() {
    assert_eq!(
        process_line("{link1, Click Here , See page 2}", &SpeakerTable::new()),
        "《link:#link1》《red》Click Here《/red》《/link》《ref》See page 2《/ref》"
    );
}

#[test]
fn test_processLine_withPlainText_shouldReturnTrimmedInput() {
    let table = common::sample_table();
    assert_eq!(process_line("   ただの地の文。  ", &table), "ただの地の文。");
    assert_eq!(process_line("\tエマは笑った\r", &table), "エマは笑った");
}

#[test]
fn test_processLine_withBlankLine_shouldReturnEmpty() {
    let table = common::sample_table();
    assert_eq!(process_line("", &table), "");
    assert_eq!(process_line(" \t\u{3000} ", &table), "");
}

#[test]
fn test_processLine_withLeadingWhitespace_shouldMatchSpeakerAfterTrim() {
    let table = common::sample_table();
    assert_eq!(process_line("  ヒロ「やあ」", &table), "「《color:#dc143c》やあ《/color》」");
}

#[test]
fn test_processLine_withLinkAfterHighlightWindow_shouldApplyBothStages() {
    let table = common::sample_table();
    assert_eq!(
        process_line("エマ「見て、{k, 鍵 , 倉庫}だよ」", &table),
        "「《color:#ff69b4》見て、《/color》《link:#k》《red》鍵《/red》《/link》《ref》倉庫《/ref》だよ」"
    );
}

#[test]
fn test_processLine_withLinkInsideHighlightWindow_shouldDropPrefixAndFormatLink() {
    let table = common::sample_table();
    assert_eq!(
        process_line("エマ「{k,鍵,倉庫}だよ」", &table),
        "《link:#k》《red》鍵《/red》《/link》《ref》倉庫《/ref》だよ」"
    );
}

#[test]
fn test_stages_withNoMarkup_shouldBeIdentity() {
    let table = common::sample_table();
    for line in ["テスト", "{a,b}", "「引用」", "a, b, c"] {
        assert_eq!(highlight(line, &table), line);
        assert_eq!(format_links(line), line);
    }
}

#[test]
fn test_processLines_shouldPreserveOrderAndCount() {
    let table = common::sample_table();
    let input = vec!["エマ「あいうえお」", "", "{a,b,c}"];

    let output: Vec<String> = process_lines(&input, &table).collect();

    assert_eq!(output, vec![
        "「《color:#ff69b4》あいう《/color》えお」".to_string(),
        String::new(),
        "《link:#a》《red》b《/red》《/link》《ref》c《/ref》".to_string(),
    ]);
}

#[test]
fn test_processStream_withSampleScript_shouldMatchExpectedOutput() -> Result<()> {
    let table = common::sample_table();
    let mut output = Vec::new();

    let line_count = process_stream(common::SAMPLE_SCRIPT.as_bytes(), &mut output, &table)?;

    assert_eq!(line_count, 5);
    assert_eq!(String::from_utf8(output)?, common::SAMPLE_OUTPUT);

    Ok(())
}

#[test]
fn test_processStream_withInvalidUtf8_shouldFail() {
    let table = common::sample_table();
    let input: &[u8] = b"ok\n\xff\xfe\n";
    let mut output = Vec::new();

    assert!(process_stream(input, &mut output, &table).is_err());
}
