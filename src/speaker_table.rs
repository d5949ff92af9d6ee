use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use crate::app_config::SpeakerSource;
use crate::errors::{RowError, SpeakerTableError};

// @module: Speaker metadata lookup (name -> color, highlight length)

// @const: Built-in speakers in priority order (name, color, highlight length)
const BUILTIN_SPEAKERS: [(&str, &str, usize); 16] = [
    ("エマ", "ff69b4", 3),
    ("ヒロ", "dc143c", 3),
    ("アンアン", "6a5acd", 3),
    ("シェリー", "6495ed", 3),
    ("ハンナ", "9acd32", 3),
    ("ノア", "87cefa", 3),
    ("レイア", "ff7f50", 3),
    ("ミリア", "ffa500", 3),
    ("ココ", "ff8c00", 3),
    ("マーゴ", "8a2be2", 3),
    ("ナノカ", "696969", 3),
    ("アリサ", "800000", 3),
    ("メルル", "dda0dd", 3),
    ("シロ", "867ba9", 3),
    ("ユキ", "e6e6fa", 3),
    ("ゴクチョー", "778899", 3),
];

const REQUIRED_COLUMNS: [&str; 3] = ["name", "color", "length"];

// @struct: Metadata of a single speaker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerEntry {
    // @field: Speaker name, matched literally at the start of a line
    pub name: String,

    // @field: Color token without '#', stored verbatim
    pub color: String,

    // @field: Number of characters after the opening bracket to colorize
    #[serde(rename = "length")]
    pub highlight_length: usize,
}

impl SpeakerEntry {
    pub fn new(name: impl Into<String>, color: impl Into<String>, highlight_length: usize) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            highlight_length,
        }
    }
}

/// Ordered speaker lookup. Iteration order decides match priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeakerTable {
    entries: Vec<SpeakerEntry>,
}

impl SpeakerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. A name already present keeps its position and takes the new values.
    pub fn insert(&mut self, entry: SpeakerEntry) {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SpeakerEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpeakerEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the table as CSV with a `name,color,length` header
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for entry in &self.entries {
            csv_writer
                .serialize(entry)
                .with_context(|| format!("Failed to serialize speaker '{}'", entry.name))?;
        }
        csv_writer.flush().context("Failed to flush speaker CSV")?;
        Ok(())
    }
}

impl FromIterator<SpeakerEntry> for SpeakerTable {
    fn from_iter<I: IntoIterator<Item = SpeakerEntry>>(iter: I) -> Self {
        let mut table = SpeakerTable::new();
        for entry in iter {
            table.insert(entry);
        }
        table
    }
}

impl<'a> IntoIterator for &'a SpeakerTable {
    type Item = &'a SpeakerEntry;
    type IntoIter = std::slice::Iter<'a, SpeakerEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Source of the speaker table used for a run
pub trait SpeakerTableProvider {
    /// Load the full table, or fail for the whole run
    fn load(&self) -> Result<SpeakerTable, SpeakerTableError>;

    /// Human readable description of where the table comes from
    fn describe(&self) -> String;
}

// @struct: Fixed table compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSpeakers;

impl BuiltinSpeakers {
    pub fn table() -> SpeakerTable {
        BUILTIN_SPEAKERS
            .iter()
            .map(|(name, color, length)| SpeakerEntry::new(*name, *color, *length))
            .collect()
    }
}

impl SpeakerTableProvider for BuiltinSpeakers {
    fn load(&self) -> Result<SpeakerTable, SpeakerTableError> {
        Ok(Self::table())
    }

    fn describe(&self) -> String {
        "built-in speaker table".to_string()
    }
}

// @struct: Table read from a CSV file with name,color,length columns
#[derive(Debug, Clone)]
pub struct CsvSpeakerTable {
    path: PathBuf,
}

impl CsvSpeakerTable {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unreadable(&self, error: impl std::fmt::Display) -> SpeakerTableError {
        SpeakerTableError::Unreadable {
            path: self.path.clone(),
            message: error.to_string(),
        }
    }

    /// Parse one data row. `row` is 1-based.
    fn parse_row(record: &csv::StringRecord, columns: &[usize; 3], row: usize) -> Result<SpeakerEntry, RowError> {
        let field = |index: usize| record.get(columns[index]).ok_or(RowError::MissingField { row });
        let name = field(0)?;
        let color = field(1)?;
        let length = field(2)?;

        if name.is_empty() {
            return Err(RowError::EmptyName { row });
        }

        let highlight_length = length.trim().parse::<usize>().map_err(|_| RowError::InvalidLength {
            name: name.to_string(),
            value: length.to_string(),
        })?;

        Ok(SpeakerEntry::new(name, color, highlight_length))
    }
}

impl SpeakerTableProvider for CsvSpeakerTable {
    fn load(&self) -> Result<SpeakerTable, SpeakerTableError> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SpeakerTableError::NotFound {
                path: std::path::absolute(&self.path).unwrap_or_else(|_| self.path.clone()),
            },
            _ => self.unreadable(e),
        })?;

        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

        let headers = reader.headers().map_err(|e| self.unreadable(e))?.clone();
        let mut columns = [0usize; 3];
        let mut missing = Vec::new();
        for (slot, column) in columns.iter_mut().zip(REQUIRED_COLUMNS) {
            match headers.iter().position(|h| h == column) {
                Some(index) => *slot = index,
                None => missing.push(column),
            }
        }
        if !missing.is_empty() {
            return Err(SpeakerTableError::MissingColumns {
                path: self.path.clone(),
                columns: missing.join(", "),
            });
        }

        let mut table = SpeakerTable::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| self.unreadable(e))?;
            match Self::parse_row(&record, &columns, index + 1) {
                Ok(entry) => table.insert(entry),
                Err(e) => warn!("{:?}: {}", self.path, e),
            }
        }

        debug!("Loaded {} speaker(s) from {:?}", table.len(), self.path);
        Ok(table)
    }

    fn describe(&self) -> String {
        format!("speaker CSV {}", self.path.display())
    }
}

/// Select the provider configured for this run
pub fn provider_for(source: &SpeakerSource) -> Box<dyn SpeakerTableProvider> {
    match source {
        SpeakerSource::Builtin => Box::new(BuiltinSpeakers),
        SpeakerSource::Csv { csv_path } => Box::new(CsvSpeakerTable::new(csv_path)),
    }
}
