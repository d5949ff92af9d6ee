/*!
 * # scriptmark - dialogue script to visual-novel markup converter
 *
 * A Rust library that rewrites plain-text dialogue scripts into the markup
 * understood by a visual-novel text renderer.
 *
 * ## Features
 *
 * - Speaker highlighting: `エマ「こんにちは」` becomes
 *   `「《color:#ff69b4》こんに《/color》ちは」`, using a per-speaker color and
 *   highlight length
 * - Link notation: `{id, display, ref}` becomes
 *   `《link:#id》《red》display《/red》《/link》《ref》ref《/ref》`
 * - Speaker table from a CSV file or the built-in default set
 * - Streaming line-by-line conversion of single files or whole folders
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `speaker_table`: Speaker metadata and its providers (built-in, CSV)
 * - `highlighter`: Speaker prefix detection and colorization
 * - `link_formatter`: Link notation rewriting
 * - `script_processor`: Per-line pipeline and streaming
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod highlighter;
pub mod link_formatter;
pub mod script_processor;
pub mod speaker_table;

// Re-export main types for easier usage
pub use app_config::{Config, SpeakerSource};
pub use app_controller::{Controller, FolderSummary, ProcessSummary};
pub use errors::{AppError, RowError, SpeakerTableError};
pub use highlighter::highlight;
pub use link_formatter::{format_links, LinkField};
pub use script_processor::{process_line, process_lines, process_stream};
pub use speaker_table::{BuiltinSpeakers, CsvSpeakerTable, SpeakerEntry, SpeakerTable, SpeakerTableProvider};
