// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use docedit::app_config::{self, Config, DocxFallback};
use docedit::AppError;
use docedit::capability::BackendKind;
use docedit::editor::{DocumentEditor, SaveOutcome};
use docedit::file_utils::FileManager;
use docedit::TranscodeError;

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

/// CLI Wrapper for DocxFallback to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliFallback {
    ConvertToPlainText,
    Reject,
}

impl From<CliFallback> for DocxFallback {
    fn from(cli_fallback: CliFallback) -> Self {
        match cli_fallback {
            CliFallback::ConvertToPlainText => DocxFallback::ConvertToPlainText,
            CliFallback::Reject => DocxFallback::Reject,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the editable text of a document
    Show {
        /// Document to open
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Print the full editor view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace the content of a document with edited text
    Save {
        /// Document to update
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// File holding the edited text (stdin when omitted)
        #[arg(long, value_name = "TEXT_FILE")]
        from: Option<PathBuf>,
    },

    /// List the documents in a directory and whether they can be edited
    Scan {
        /// Directory to walk
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Show the active DOCX backends
    Probe,

    /// Generate shell completions for docedit
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// docedit - edit stored text and DOCX documents as plain text
#[derive(Parser, Debug)]
#[command(name = "docedit")]
#[command(version)]
#[command(about = "Inline text and DOCX document editing")]
#[command(long_about = "docedit decodes documents into editable text and writes edited text back.

EXAMPLES:
    docedit show notes.txt                      # Print the text of a document
    docedit show --json report.docx             # Print the editor view as JSON
    docedit save report.docx --from edited.txt  # Rebuild a DOCX from edited text
    docedit --backend raw-text show report.docx # Use a specific DOCX backend
    docedit scan ./documents                    # List editable documents
    docedit completions bash > docedit.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// DOCX backends to use, in preference order (replaces the configured list)
    #[arg(short, long, global = true)]
    backend: Vec<BackendKind>,

    /// Disable every DOCX backend
    #[arg(long, global = true, conflicts_with = "backend")]
    no_docx: bool,

    /// What to do when a DOCX document cannot be rebuilt
    #[arg(long, value_enum, global = true)]
    fallback: Option<CliFallback>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Prefix and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "1;31"),
            Level::Warn => ("🚧", "1;33"),
            Level::Info => ("", "1;32"),
            Level::Debug => ("🔍", "1;36"),
            Level::Trace => ("📋", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (prefix, color) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, prefix, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "docedit", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    if let Err(e) = run(cli) {
        error!("{}", e);
        return Err(e.into());
    }
    Ok(())
}

// @runs: Selected subcommand; failures are classified for reporting
fn run(cli: CommandLineOptions) -> Result<(), AppError> {
    let config = load_config(&cli).map_err(|e| AppError::Config(format!("{:#}", e)))?;

    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let editor = DocumentEditor::with_config(&config);

    match cli.command {
        Commands::Show { path, json } => Ok(run_show(&editor, path, json)?),
        Commands::Save { path, from } => run_save(&editor, path, from),
        Commands::Scan { dir } => Ok(run_scan(dir)?),
        Commands::Probe => {
            run_probe(&editor);
            Ok(())
        }
        Commands::Completions { .. } => Ok(()),
    }
}

// @loads: Config file with command line overrides applied
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config_path)?;

    if cli.no_docx {
        config.docx.backends.clear();
    } else if !cli.backend.is_empty() {
        config.docx.backends = cli.backend.clone();
    }

    if let Some(fallback) = &cli.fallback {
        config.docx.fallback = fallback.clone().into();
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

fn run_show(editor: &DocumentEditor, path: PathBuf, json: bool) -> Result<()> {
    let document = FileManager::read_document(&path)?;
    let view = editor.open(&document);

    if !view.is_editable {
        warn!("{:?} ({}) is not a text editable document", view.name, view.mimetype);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", view.content);
        if !view.content.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}

fn run_save(editor: &DocumentEditor, path: PathBuf, from: Option<PathBuf>) -> Result<(), AppError> {
    if !FileManager::file_exists(&path) {
        return Err(AppError::File(format!("Document does not exist: {:?}", path)));
    }

    let mut document = FileManager::read_document(&path).map_err(|e| AppError::File(format!("{:#}", e)))?;
    if !document.is_text_editable() {
        return Err(AppError::Transcode(TranscodeError::UnsupportedFormat(format!(
            "{:?} ({}) cannot be edited as text",
            document.name, document.media_type
        ))));
    }

    let text = FileManager::read_text_input(from.as_deref()).map_err(|e| AppError::File(format!("{:#}", e)))?;
    let result = editor.save(&mut document, &text);
    let outcome = SaveOutcome::from_result(&result);

    match result {
        Ok(true) => match FileManager::write_document(&path, &document) {
            Ok(written) => info!("Saved {:?}", written),
            Err(e) => {
                let reason = format!("{:#}", e);
                print_outcome(&SaveOutcome::failed(&reason))?;
                return Err(AppError::File(reason));
            }
        },
        Ok(false) => warn!("No content given, {:?} left unchanged", path),
        Err(e) => {
            print_outcome(&outcome)?;
            return Err(AppError::Transcode(e));
        }
    }

    print_outcome(&outcome)
}

// @prints: Save outcome as a single JSON line on stdout
fn print_outcome(outcome: &SaveOutcome) -> Result<(), AppError> {
    let json = serde_json::to_string(outcome).map_err(|e| AppError::Unknown(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn run_scan(dir: PathBuf) -> Result<()> {
    if !FileManager::dir_exists(&dir) {
        return Err(anyhow!("Directory does not exist: {:?}", dir));
    }

    let files = FileManager::scan_documents(&dir)?;
    for file in &files {
        println!(
            "{}\t{}\t{}",
            if file.is_editable { "editable" } else { "-" },
            file.media_type,
            file.path.display()
        );
    }
    info!(
        "{} of {} files can be edited",
        files.iter().filter(|f| f.is_editable).count(),
        files.len()
    );
    Ok(())
}

fn run_probe(editor: &DocumentEditor) {
    let backends = editor.transcoder().capabilities().describe();
    if backends.is_empty() {
        println!("No DOCX backend available (fallback: {:?})", editor.transcoder().fallback());
    }
    for backend in backends {
        println!(
            "{}\textract={}\tbuild={}",
            backend.name, backend.extract, backend.build
        );
    }
}
