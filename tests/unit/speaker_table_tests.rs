/*!
 * Tests for the speaker table and its providers
 */

use anyhow::Result;
use scriptmark::app_config::SpeakerSource;
use scriptmark::speaker_table::provider_for;
use scriptmark::{BuiltinSpeakers, CsvSpeakerTable, SpeakerEntry, SpeakerTable, SpeakerTableError, SpeakerTableProvider};
use crate::common;

#[test]
fn test_builtinSpeakers_shouldContainSixteenEntriesInOrder() {
    let table = BuiltinSpeakers::table();

    assert_eq!(table.len(), 16);
    let names: Vec<&str> = table.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names.first(), Some(&"エマ"));
    assert_eq!(names.last(), Some(&"ゴクチョー"));
    assert!(table.iter().all(|s| s.highlight_length == 3));
    assert!(table.iter().all(|s| s.color.len() == 6 && !s.color.starts_with('#')));
    assert_eq!(table.get("ヒロ").map(|s| s.color.as_str()), Some("dc143c"));
}

#[test]
fn test_insert_withDuplicateName_shouldReplaceInPlace() {
    let mut table = SpeakerTable::new();
    table.insert(SpeakerEntry::new("A", "111111", 1));
    table.insert(SpeakerEntry::new("B", "222222", 2));
    table.insert(SpeakerEntry::new("A", "333333", 5));

    let entries: Vec<&SpeakerEntry> = table.iter().collect();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], &SpeakerEntry::new("A", "333333", 5));
    assert_eq!(entries[1].name, "B");
}

#[test]
fn test_csvLoad_withValidRows_shouldKeepFileOrder() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let csv_path = common::create_speaker_csv(temp_dir.path(), &[
        ("ノア", "87cefa", "2"),
        ("エマ", "#ff69b4", " 4 "),
    ])?;

    let table = CsvSpeakerTable::new(&csv_path).load()?;

    let entries: Vec<&SpeakerEntry> = table.iter().collect();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], &SpeakerEntry::new("ノア", "87cefa", 2));
    // Color is stored verbatim, length is trimmed before parsing
    assert_eq!(entries[1], &SpeakerEntry::new("エマ", "#ff69b4", 4));

    Ok(())
}

#[test]
fn test_csvLoad_withBadRows_shouldSkipThemAndSucceed() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let content = "name,color,length\nエマ,ff69b4,three\nヒロ,dc143c\n,000000,3\nノア,87cefa,-1\nココ,ff8c00,3\n";
    let csv_path = common::create_test_file(temp_dir.path(), "speakers.csv", content)?;

    let table = CsvSpeakerTable::new(&csv_path).load()?;

    assert_eq!(table.len(), 1);
    assert_eq!(table.get("ココ"), Some(&SpeakerEntry::new("ココ", "ff8c00", 3)));

    Ok(())
}

#[test]
fn test_csvLoad_withReorderedAndExtraColumns_shouldFindColumnsByHeader() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = "length,note,name,color\n2,main,エマ,ff69b4\n";
    let csv_path = common::create_test_file(temp_dir.path(), "speakers.csv", content)?;

    let table = CsvSpeakerTable::new(&csv_path).load()?;

    assert_eq!(table.get("エマ"), Some(&SpeakerEntry::new("エマ", "ff69b4", 2)));

    Ok(())
}

#[test]
fn test_csvLoad_withMissingFile_shouldReportNotFoundWithPath() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let csv_path = temp_dir.path().join("speakers.csv");

    let error = CsvSpeakerTable::new(&csv_path).load().unwrap_err();

    match &error {
        SpeakerTableError::NotFound { path } => assert!(path.ends_with("speakers.csv")),
        other => panic!("expected NotFound, got {:?}", other),
    }
    assert!(error.to_string().contains("speakers.csv"));

    Ok(())
}

#[test]
fn test_csvLoad_withMissingColumn_shouldFailWholeLoad() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let csv_path = common::create_test_file(temp_dir.path(), "speakers.csv", "name,colour,length\nエマ,ff69b4,3\n")?;

    let error = CsvSpeakerTable::new(&csv_path).load().unwrap_err();

    assert!(matches!(
        error,
        SpeakerTableError::MissingColumns { ref columns, .. } if columns == "color"
    ));

    Ok(())
}

#[test]
fn test_writeCsv_shouldRoundTripThroughLoader() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let csv_path = temp_dir.path().join("exported.csv");
    let table = BuiltinSpeakers::table();

    table.write_csv(std::fs::File::create(&csv_path)?)?;
    let content = std::fs::read_to_string(&csv_path)?;
    assert!(content.starts_with("name,color,length\n"));

    let reloaded = CsvSpeakerTable::new(&csv_path).load()?;
    assert_eq!(reloaded, table);

    Ok(())
}

#[test]
fn test_providerFor_shouldSelectConfiguredSource() -> Result<()> {
    let builtin = provider_for(&SpeakerSource::Builtin);
    assert_eq!(builtin.load()?, BuiltinSpeakers::table());

    let csv = provider_for(&SpeakerSource::Csv { csv_path: "missing/speakers.csv".to_string() });
    assert!(csv.describe().contains("missing/speakers.csv"));
    assert!(matches!(csv.load(), Err(SpeakerTableError::NotFound { .. })));

    Ok(())
}
