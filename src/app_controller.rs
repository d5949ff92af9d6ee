use log::{debug, error, info, warn};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};
use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::script_processor;
use crate::speaker_table::{provider_for, SpeakerTable};

// @module: Application controller for script conversion

/// Result of converting one script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSummary {
    /// Script that was read
    pub input: PathBuf,
    /// Destination file, `None` when written to a stream
    pub output: Option<PathBuf>,
    /// Number of input lines (blank ones included)
    pub line_count: usize,
}

/// Result of converting every script of a folder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: Vec<ProcessSummary>,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller. Owns the speaker table for the whole run.
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Speaker table, read-only once loaded
    table: SpeakerTable,
}

impl Controller {
    // @method: Validate the configuration and load the speaker table it points to
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config.validate().map_err(|e| AppError::Config(e.to_string()))?;

        let provider = provider_for(&config.speakers);
        debug!("Loading {}", provider.describe());
        let table = provider.load()?;
        if table.is_empty() {
            warn!("{} contains no speakers, lines will not be highlighted", provider.describe());
        } else {
            info!("Loaded {} speaker(s) from {}", table.len(), provider.describe());
        }

        Ok(Self::with_table(config, table))
    }

    /// Create a controller around an already loaded table
    pub fn with_table(config: Config, table: SpeakerTable) -> Self {
        Self { config, table }
    }

    pub fn table(&self) -> &SpeakerTable {
        &self.table
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Default destination for a script: `<stem><suffix>.<ext>` next to it
    pub fn output_path_for(&self, input_file: &Path) -> PathBuf {
        FileManager::generate_output_path(input_file, &self.config.output_suffix)
    }

    fn open_input(input_file: &Path) -> Result<BufReader<File>, AppError> {
        if !FileManager::file_exists(input_file) {
            return Err(AppError::InputFile {
                path: input_file.to_path_buf(),
                message: "file not found".to_string(),
            });
        }

        let file = File::open(input_file).map_err(|e| AppError::InputFile {
            path: input_file.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(BufReader::new(file))
    }

    /// Convert a script into `writer`, returning the number of lines processed
    pub fn run_to_writer<W: Write>(&self, input_file: &Path, writer: W) -> Result<usize, AppError> {
        let reader = Self::open_input(input_file)?;
        script_processor::process_stream(reader, writer, &self.table)
            .map_err(|e| AppError::Unknown(format!("{:#}", e)))
    }

    /// Convert a script into a file. The destination only appears once every line is written.
    pub fn run(&self, input_file: &Path, output_file: Option<&Path>) -> Result<ProcessSummary, AppError> {
        let start_time = Instant::now();
        let output_path = output_file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.output_path_for(input_file));

        if output_path == input_file {
            return Err(AppError::Output {
                path: output_path,
                message: "output would overwrite the input script".to_string(),
            });
        }

        let reader = Self::open_input(input_file)?;

        let output_error = |message: String| AppError::Output {
            path: output_path.clone(),
            message,
        };

        let mut staging = FileManager::staging_file_for(&output_path)
            .map_err(|e| output_error(format!("{:#}", e)))?;

        let line_count = script_processor::process_stream(reader, BufWriter::new(&mut staging), &self.table)
            .map_err(|e| AppError::Unknown(format!("{:#}", e)))?;

        staging
            .persist(&output_path)
            .map_err(|e| output_error(e.to_string()))?;

        info!(
            "Done! ({} lines processed in {}) saved to {}",
            line_count,
            Self::format_duration(start_time.elapsed()),
            output_path.display()
        );

        Ok(ProcessSummary {
            input: input_file.to_path_buf(),
            output: Some(output_path),
            line_count,
        })
    }

    /// Convert every script under a directory, skipping outputs of earlier runs.
    /// Per-file failures are logged; the run fails if any file failed.
    pub fn run_folder(&self, input_dir: &Path) -> Result<FolderSummary, AppError> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(AppError::InputFile {
                path: input_dir.to_path_buf(),
                message: "directory not found".to_string(),
            });
        }

        let scripts = FileManager::find_files(input_dir, &self.config.input_extension)?;
        let mut summary = FolderSummary::default();

        let candidates: Vec<PathBuf> = scripts
            .into_iter()
            .filter(|path| {
                let generated = FileManager::is_generated_output(path, &self.config.output_suffix);
                if generated {
                    debug!("Skipping generated file {:?}", path);
                    summary.skipped += 1;
                }
                !generated
            })
            .collect();

        if candidates.is_empty() {
            warn!(
                "No .{} scripts found in directory: {:?}",
                self.config.input_extension.trim_start_matches('.'),
                input_dir
            );
            return Ok(summary);
        }

        let folder_pb = ProgressBar::new(candidates.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));

        for script in &candidates {
            let file_name = script
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            match folder_pb.suspend(|| self.run(script, None)) {
                Ok(file_summary) => summary.processed.push(file_summary),
                Err(e) => {
                    folder_pb.suspend(|| error!("Error processing file {}: {}", file_name, e));
                    summary.failed += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_and_clear();

        info!(
            "Folder processing completed in {}: {} processed, {} skipped, {} errors",
            Self::format_duration(start_time.elapsed()),
            summary.processed.len(),
            summary.skipped,
            summary.failed
        );

        if summary.failed > 0 {
            return Err(AppError::Unknown(format!(
                "{} of {} script(s) in {:?} failed",
                summary.failed,
                candidates.len(),
                input_dir
            )));
        }

        Ok(summary)
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
