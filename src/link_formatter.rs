/*!
 * Link notation rewriting.
 *
 * `{id, display, ref}` becomes
 * `《link:#id》《red》display《/red》《/link》《ref》ref《/ref》`.
 */

use std::borrow::Cow;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// @const: Three comma separated fields in braces; the last one may contain commas
static LINK_NOTATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([^,]+),([^,]+),([^}]+)\}").unwrap()
});

// @struct: Fields of one link notation occurrence, trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkField {
    pub link_id: String,
    pub display_text: String,
    pub ref_text: String,
}

impl LinkField {
    fn from_captures(caps: &Captures<'_>) -> Self {
        Self {
            link_id: caps[1].trim().to_string(),
            display_text: caps[2].trim().to_string(),
            ref_text: caps[3].trim().to_string(),
        }
    }

    /// Composite link/reference markup for this occurrence
    pub fn to_markup(&self) -> String {
        format!(
            "《link:#{}》《red》{}《/red》《/link》《ref》{}《/ref》",
            self.link_id, self.display_text, self.ref_text
        )
    }
}

/// All link notations of a line, left to right
pub fn extract_links(line: &str) -> Vec<LinkField> {
    LINK_NOTATION_REGEX
        .captures_iter(line)
        .map(|caps| LinkField::from_captures(&caps))
        .collect()
}

/// Replace every link notation; text outside matches is kept verbatim
pub fn format_links(line: &str) -> String {
    match LINK_NOTATION_REGEX.replace_all(line, |caps: &Captures<'_>| LinkField::from_captures(caps).to_markup()) {
        Cow::Borrowed(_) => line.to_string(),
        Cow::Owned(formatted) => formatted,
    }
}
