// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_cli::{AppError, Command, CommandLineInput, CredentialSources, Dispatcher, HttpTransport};

/// Sets up logging: stderr for the user, a debug-level file for diagnosis.
///
/// stdout carries command output only.
fn setup_logging(verbose: bool) -> Result<(), AppError> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_cli.log");

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{l}: {m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_level)))
                .build("stderr", Box::new(stderr_appender)),
        )
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(LevelFilter::Debug),
        )
        .map_err(|e| AppError::Logging(e.to_string()))?;

    log4rs::init_config(config).map_err(|e| AppError::Logging(e.to_string()))?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Validates the invocation, runs it, and prints its output.
///
/// Returns the exit status for the printed output.
async fn run(cli: CommandLineInput) -> Result<i32, AppError> {
    let command = Command::try_from(cli.verb)?;
    let transport = HttpTransport::new()?;
    let sources = CredentialSources::from_environment();

    let output = Dispatcher::new(&transport).run(&command, &sources).await?;
    print!("{}", output.text);

    for failure in &output.failures {
        eprintln!("Error: {} section failed: {}", failure.section, failure.error);
        if let Some(hint) = failure.error.hint() {
            eprintln!("Hint: {}", hint);
        }
    }
    Ok(output.exit_code())
}

#[tokio::main]
async fn main() {
    let cli = CommandLineInput::parse();

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("Warning: {}", e);
    }

    match run(cli).await {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(hint) = e.hint() {
                eprintln!("Hint: {}", hint);
            }
            std::process::exit(1);
        }
    }
}
