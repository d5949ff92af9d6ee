/*!
 * Speaker highlighting.
 *
 * A line such as `エマ「こんにちは」` starts with a speaker prefix (speaker name
 * followed by an opening quote bracket). The prefix is removed and the first
 * characters of the quoted text are wrapped in a color tag for that speaker:
 * `「《color:#ff69b4》こんに《/color》は」`.
 */

use log::debug;
use crate::speaker_table::{SpeakerEntry, SpeakerTable};

/// Opening brackets, in the order they are tried for each speaker
pub const OPENING_BRACKETS: [char; 2] = ['「', '『'];

/// Closing tag of a color span
pub const COLOR_CLOSE_TAG: &str = "《/color》";

/// Speaker prefix found at the start of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeakerMatch<'a> {
    /// Matched speaker
    pub speaker: &'a SpeakerEntry,
    /// Opening bracket that followed the name
    pub bracket: char,
}

impl SpeakerMatch<'_> {
    /// Byte length of `name + bracket`
    pub fn prefix_len(&self) -> usize {
        self.speaker.name.len() + self.bracket.len_utf8()
    }

    /// Closing bracket paired with the opening one
    pub fn close_bracket(&self) -> char {
        closing_bracket(self.bracket)
    }
}

/// `」` for `「`, `』` for anything else
pub fn closing_bracket(open: char) -> char {
    if open == '「' { '」' } else { '』' }
}

/// Opening color tag for a color token stored without '#'
pub fn color_open_tag(color: &str) -> String {
    format!("《color:#{}》", color)
}

/// Find the first speaker (table order) whose prefix starts the line.
/// For each speaker `「` is tried before `『`. No longest-match resolution.
pub fn find_speaker<'a>(line: &str, table: &'a SpeakerTable) -> Option<SpeakerMatch<'a>> {
    table.iter().find_map(|speaker| {
        let rest = line.strip_prefix(speaker.name.as_str())?;
        OPENING_BRACKETS
            .iter()
            .find(|bracket| rest.starts_with(**bracket))
            .map(|bracket| SpeakerMatch { speaker, bracket: *bracket })
    })
}

/// Byte offset after the first `chars` characters of `text` (or its length)
fn char_boundary(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map_or(text.len(), |(index, _)| index)
}

/// Colorize the speaker prefix of a line, or return it unchanged.
///
/// When the highlight window contains `{` or `}` the line still holds raw link
/// notation there; the prefix (including the opening bracket) is dropped and no
/// color tag is applied.
pub fn highlight(line: &str, table: &SpeakerTable) -> String {
    let Some(found) = find_speaker(line, table) else {
        return line.to_string();
    };

    let remainder = &line[found.prefix_len()..];
    let split = char_boundary(remainder, found.speaker.highlight_length);
    let (highlight_part, rest_part) = remainder.split_at(split);

    if highlight_part.contains(['{', '}']) {
        debug!("Highlight window of '{}' overlaps link notation, dropping prefix", found.speaker.name);
        return remainder.to_string();
    }

    let close = found.close_bracket();
    let mut output = String::with_capacity(line.len() + 32);
    output.push(found.bracket);
    output.push_str(&color_open_tag(&found.speaker.color));
    output.push_str(highlight_part);
    output.push_str(COLOR_CLOSE_TAG);
    output.push_str(rest_part);
    if !rest_part.ends_with(close) {
        output.push(close);
    }
    output
}
