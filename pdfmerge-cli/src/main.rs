//! pdfmerge - Merge two PDF files into a single document.
//!
//! Runs a single merge from the command line, a dry run that only loads
//! both inputs, or an interactive session driven from stdin.

mod actions;
mod cli;
mod interactive;
mod prompt;

use clap::Parser;
use std::process;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::prompt::Prompter;
use pdfmerge::backend::LopdfBackend;
use pdfmerge::config::Config;
use pdfmerge::error::{MergeError, Result};
use pdfmerge::io::{PdfWriter, SourceReader};
use pdfmerge::output::{self, OutputFormatter};
use pdfmerge::session::{Session, SessionStatus, Slot, resolve_file_name};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let verbose = cli.verbose;
    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err.user_message());

        let technical = err.to_string();
        if verbose && technical != err.user_message() {
            eprintln!("  Cause: {technical}");
        }
        process::exit(err.exit_code());
    }
}

/// Diagnostic logging to stderr; `RUST_LOG` overrides the default filter.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "pdfmerge=debug"
    } else {
        "pdfmerge=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;
    let config = cli.to_config()?;
    let formatter = if cli.json {
        OutputFormatter::quiet()
    } else {
        OutputFormatter::from_config(&config)
    };

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdfmerge::NAME, pdfmerge::VERSION));
        formatter.blank_line();
    }

    let reader = SourceReader::new(&config.policy);
    let mut writer = PdfWriter::new(&config.output_dir, config.overwrite_mode);
    let mut session = Session::new(LopdfBackend::new(config.compression), config.policy);
    let mut prompter = Prompter::stdin();

    if !config.dry_run {
        writer.can_write().await?;
    }

    if config.interactive {
        for (slot, path) in [(Slot::First, &config.first), (Slot::Second, &config.second)] {
            if let Some(path) = path
                && let Err(err) =
                    actions::load_slot(&mut session, &reader, slot, path, &formatter).await
            {
                output::display_error(&formatter, &err);
            }
        }
        return interactive::run(&mut session, &reader, &mut writer, &formatter, &mut prompter)
            .await;
    }

    let (first_path, second_path) = config
        .sources()
        .ok_or_else(|| MergeError::invalid_config("Two input files are required"))?;

    // Both reads may run at once; loads are applied in slot order.
    let (first, second) = reader.read_pair(first_path, second_path).await?;
    for (slot, file) in [(Slot::First, first), (Slot::Second, second)] {
        output::display_loading(&formatter, slot);
        session.load(slot, file)?;
        if let Some(status) = session.status().slot(slot) {
            output::display_loaded(&formatter, status);
        }
    }

    if config.dry_run {
        print_dry_run(&config, &writer, &session.status(), cli.json, &formatter)?;
        return Ok(());
    }

    formatter.blank_line();
    actions::merge(&mut session, &formatter)?;
    actions::download(
        &session,
        &mut writer,
        &config.file_name,
        &formatter,
        &mut prompter,
    )
    .await?;

    Ok(())
}

/// Report what a merge would produce.
fn print_dry_run(
    config: &Config,
    writer: &PdfWriter,
    status: &SessionStatus,
    json: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let output_path = writer.path_for(&resolve_file_name(&config.file_name));

    if json {
        let report = serde_json::json!({
            "first": status.first,
            "second": status.second,
            "expected_pages": status.expected_pages(),
            "output": output_path,
        });
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| MergeError::Io { source: e.into() })?;
        println!("{rendered}");
        return Ok(());
    }

    formatter.blank_line();
    formatter.success("Dry run completed successfully");
    formatter.info(&format!(
        "  Output would be: {} ({} pages)",
        output_path.display(),
        status.expected_pages().unwrap_or_default()
    ));
    formatter.info("  Run without --dry-run to create the merged PDF");
    Ok(())
}
