//! CLI wrapper that supports both:
//!   cargo run -- statement.pdf > statement.json
//!   cargo run -- --input statement.txt --text --format csv --output rows.csv

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use csv::WriterBuilder;
use statement_parser::models::TransactionRow;
use statement_parser::pipeline::DEFAULT_MIN_TEXT_CHARS;
use statement_parser::{
    ParseResult, ParserConfig, PdfTextExtractor, Pipeline, PlainTextExtractor, TextExtractor,
};
use std::{
    fs::{self, File},
    io::{self, Write},
    path::PathBuf,
};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

fn cli() -> Command {
    Command::new("statement-parser")
        .arg(
            Arg::new("input")
                .long("input")
                .value_name("FILE")
                .help("Statement PDF (or text file with --text)"),
        )
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .conflicts_with("input")
                .help("Same as --input"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .value_name("FILE")
                .help("Output file (defaults to stdout)"),
        )
        .arg(
            Arg::new("text")
                .long("text")
                .action(ArgAction::SetTrue)
                .help("Input is already-extracted text, not a PDF"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_parser(["json", "csv"])
                .default_value("json")
                .help("Output format"),
        )
        .arg(
            Arg::new("min-chars")
                .long("min-chars")
                .env("STATEMENT_MIN_CHARS")
                .value_parser(value_parser!(usize))
                .help("Reject extracted text shorter than this many characters"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .help("Log skipped lines and other debug detail"),
        )
}

/// Parser settings from the command line; unset flags keep the library defaults.
fn parser_config(matches: &ArgMatches) -> ParserConfig {
    ParserConfig {
        min_text_chars: *matches
            .get_one::<usize>("min-chars")
            .unwrap_or(&DEFAULT_MIN_TEXT_CHARS),
        ..ParserConfig::default()
    }
}

fn main() -> Result<()> {
    // ---------------------------------------------------------------- flags
    let matches = cli().get_matches();

    // ---------------------------------------------------------------- logging
    // all tracing output goes to STDERR, keeping STDOUT clean for the document
    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_target(false)
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let in_path = matches
        .get_one::<String>("input")
        .or_else(|| matches.get_one::<String>("file"))
        .map(PathBuf::from);
    let out_path = matches.get_one::<String>("output").map(PathBuf::from);

    let in_path = match in_path {
        Some(p) => p,
        None => {
            eprintln!("Usage: cargo run -- statement.pdf > statement.json");
            std::process::exit(1);
        }
    };

    // ---------------------------------------------------------------- ingest
    let bytes = fs::read(&in_path).with_context(|| format!("reading {}", in_path.display()))?;
    let extractor: &dyn TextExtractor = if matches.get_flag("text") {
        &PlainTextExtractor
    } else {
        &PdfTextExtractor
    };

    let result = match Pipeline::new(parser_config(&matches)).parse_bytes(&bytes, extractor) {
        Ok(r) => r,
        Err(e) => {
            error!(file = %in_path.display(), %e, "parse failed");
            return Err(e.into());
        }
    };
    info!(
        "Finished parse: {} transactions, {} candidate lines skipped",
        result.derived_metrics.transaction_count, result.skipped_lines
    );

    // ---------------------------------------------------------------- emit
    let sink: Box<dyn Write> = match out_path {
        Some(p) => Box::new(
            File::create(&p).with_context(|| format!("creating {}", p.display()))?,
        ),
        None => Box::new(io::stdout()),
    };

    match matches.get_one::<String>("format").map(String::as_str) {
        Some("csv") => write_csv(&result, sink),
        _ => write_json(&result, sink),
    }
}

fn write_json(result: &ParseResult, mut sink: Box<dyn Write>) -> Result<()> {
    serde_json::to_writer_pretty(&mut sink, result)?;
    writeln!(sink)?;
    sink.flush()?;
    Ok(())
}

fn write_csv(result: &ParseResult, sink: Box<dyn Write>) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(sink);
    for rec in &result.transactions {
        wtr.serialize(TransactionRow::from(rec))?;
    }
    wtr.flush()?;

    let m = &result.derived_metrics;
    info!(
        total_credits = %m.total_credits,
        total_debits = %m.total_debits,
        count = m.transaction_count,
        "derived metrics"
    );
    Ok(())
}
