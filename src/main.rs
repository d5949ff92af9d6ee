// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use scriptmark::app_config::{self, Config, SpeakerSource};
use scriptmark::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a script file or every script in a directory (default command)
    #[command(alias = "convert")]
    Process(ProcessArgs),

    /// List the speaker table in match priority order, or export it as CSV
    Speakers {
        /// Write the table to this CSV file instead of listing it
        #[arg(long, value_name = "CSV")]
        export: Option<PathBuf>,
    },

    /// Generate shell completions for scriptmark
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct ProcessArgs {
    /// Input script file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output file (default: <input>_output.<ext> next to the input)
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Write the converted script to standard output
    #[arg(long)]
    stdout: bool,
}

/// Options shared by every command
#[derive(Args, Debug)]
struct GlobalArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "scriptmark.json", global = true)]
    config_path: String,

    /// Speaker CSV file (overrides the configured source)
    #[arg(long, value_name = "CSV", global = true)]
    speakers: Option<PathBuf>,

    /// Use the built-in speaker table
    #[arg(long, conflicts_with = "speakers", global = true)]
    builtin_speakers: bool,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

/// scriptmark - dialogue script to visual-novel markup converter
///
/// Highlights speaker lines and rewrites {id, display, ref} link notation.
#[derive(Parser, Debug)]
#[command(name = "scriptmark")]
#[command(version)]
#[command(about = "Convert dialogue scripts into visual-novel markup")]
#[command(long_about = "scriptmark rewrites plain-text dialogue scripts for a visual-novel text renderer.

EXAMPLES:
    scriptmark chapter1.txt                       # Writes chapter1_output.txt
    scriptmark chapter1.txt -o out/chapter1.txt   # Explicit output file
    scriptmark chapter1.txt --stdout              # Print the result
    scriptmark scripts/                           # Convert every .txt under scripts/
    scriptmark --builtin-speakers chapter1.txt    # Ignore speakers.csv
    scriptmark speakers --export speakers.csv     # Bootstrap a speaker CSV
    scriptmark completions bash > scriptmark.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in scriptmark.json by default. You can specify a
    different file with --config-path. If the file doesn't exist, a default one
    will be created automatically.

SPEAKER TABLE:
    speakers.csv needs a header row with name, color and length columns.
    Rows are tried in file order; the first speaker whose name followed by
    「 or 『 starts a line wins.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    global: GlobalArgs,

    /// Input script file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output file (default: <input>_output.<ext> next to the input)
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Write the converted script to standard output
    #[arg(long)]
    stdout: bool,
}

// @struct: Custom logger implementation, filtered by log::max_level()
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // The level is updated after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(cmd_log_level) = &cli.global.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "scriptmark", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Speakers { export }) => {
            let controller = build_controller(&cli.global)?;
            run_speakers(&controller, export.as_deref())
        }
        Some(Commands::Process(args)) => {
            let controller = build_controller(&cli.global)?;
            run_process(&controller, args)
        }
        None => {
            // Default behavior - top-level args
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let args = ProcessArgs {
                input_path,
                output: cli.output,
                stdout: cli.stdout,
            };
            let controller = build_controller(&cli.global)?;
            run_process(&controller, args)
        }
    }
}

/// Load the configuration, apply command line overrides and load the speaker table
fn build_controller(options: &GlobalArgs) -> Result<Controller> {
    let mut config = Config::load_or_create(&options.config_path)?;

    if let Some(csv_path) = &options.speakers {
        config.speakers = SpeakerSource::Csv {
            csv_path: csv_path.to_string_lossy().to_string(),
        };
    } else if options.builtin_speakers {
        config.speakers = SpeakerSource::Builtin;
    }

    match &options.log_level {
        Some(log_level) => config.log_level = log_level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    Controller::with_config(config).context("Cannot start conversion")
}

fn run_process(controller: &Controller, args: ProcessArgs) -> Result<()> {
    let input_path = &args.input_path;

    if input_path.is_dir() {
        if args.output.is_some() || args.stdout {
            return Err(anyhow!("--output and --stdout only apply to a single input file"));
        }
        controller.run_folder(input_path)?;
        return Ok(());
    }

    if args.stdout {
        let stdout = std::io::stdout();
        let line_count = controller.run_to_writer(input_path, BufWriter::new(stdout.lock()))?;
        info!("Done! ({} lines processed)", line_count);
        return Ok(());
    }

    controller.run(input_path, args.output.as_deref())?;
    Ok(())
}

fn run_speakers(controller: &Controller, export: Option<&Path>) -> Result<()> {
    let table = controller.table();

    if let Some(path) = export {
        let file = File::create(path)
            .with_context(|| format!("Failed to create speaker CSV: {}", path.display()))?;
        table.write_csv(BufWriter::new(file))?;
        info!("Exported {} speaker(s) to {}", table.len(), path.display());
        return Ok(());
    }

    for (rank, speaker) in table.iter().enumerate() {
        println!("{:>3}  {}  #{}  {}", rank + 1, speaker.name, speaker.color, speaker.highlight_length);
    }
    Ok(())
}
