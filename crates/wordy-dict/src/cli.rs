#![forbid(unsafe_code)]

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use wordy_runtime::{LookupResponse, format_definition};

use crate::error::{ProviderError, Result};
use crate::extract::Extractor;
use crate::handler::MessageHandler;
#[cfg(feature = "http")]
use crate::provider::{DictionaryProvider, HttpFetcher};

#[derive(Debug, Parser)]
#[command(
    name = "wordy-dict",
    about = "English-Korean dictionary lookups for the Wordy hover tooltip",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Look up a word on the dictionary site.
    Lookup(LookupArgs),

    /// Extract an entry from a saved search results page.
    Parse(ParseArgs),

    /// Answer line-delimited lookup messages from stdin.
    Serve(ServeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct LookupArgs {
    pub word: String,

    /// Print the raw response as JSON.
    #[arg(long)]
    pub json: bool,

    /// Search URL prefix the encoded word is appended to.
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ParseArgs {
    pub file: PathBuf,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[arg(long)]
    pub base_url: Option<String>,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Lookup(args) => run_lookup(&args, &mut out),
        Commands::Parse(args) => run_parse(&args, &mut out),
        Commands::Serve(args) => run_serve(&args, std::io::stdin().lock(), &mut out),
    }
}

#[cfg(feature = "http")]
fn http_provider(base_url: Option<&str>) -> Result<DictionaryProvider<HttpFetcher>> {
    let provider = DictionaryProvider::new(HttpFetcher::new()?)?;
    Ok(match base_url {
        Some(url) => provider.with_base_url(url),
        None => provider,
    })
}

#[cfg(feature = "http")]
pub fn run_lookup(args: &LookupArgs, out: &mut impl Write) -> Result<()> {
    let provider = http_provider(args.base_url.as_deref())?;
    let response = provider.define(&args.word)?;
    print_response(&args.word, &response, args.json, out)
}

#[cfg(not(feature = "http"))]
pub fn run_lookup(_args: &LookupArgs, _out: &mut impl Write) -> Result<()> {
    Err(ProviderError::HttpDisabled)
}

pub fn run_parse(args: &ParseArgs, out: &mut impl Write) -> Result<()> {
    let html = std::fs::read_to_string(&args.file)?;
    let response = Extractor::new()?.extract(&html);
    let word = args
        .file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    print_response(&word, &response, args.json, out)
}

#[cfg(feature = "http")]
pub fn run_serve(args: &ServeArgs, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    let handler = MessageHandler::new(http_provider(args.base_url.as_deref())?);
    serve(handler, input, out)
}

#[cfg(not(feature = "http"))]
pub fn run_serve(_args: &ServeArgs, _input: impl BufRead, _out: &mut impl Write) -> Result<()> {
    Err(ProviderError::HttpDisabled)
}

/// Answer each non-blank input line with one reply line.
pub fn serve<S: wordy_runtime::LookupService>(
    mut handler: MessageHandler<S>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let mut answered = 0usize;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        writeln!(out, "{}", handler.handle(&line))?;
        out.flush()?;
        answered += 1;
    }
    info!(answered, "input closed");
    Ok(())
}

pub fn print_response(
    word: &str,
    response: &LookupResponse,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, response)?;
        writeln!(out)?;
        return Ok(());
    }
    if response.is_empty() {
        return Err(ProviderError::NotFound(word.to_string()));
    }
    writeln!(out, "{word}")?;
    let pronunciations = &response.pronunciations;
    for (label, entry) in [("US", &pronunciations.american), ("UK", &pronunciations.british)] {
        if !entry.symbol.is_empty() {
            writeln!(out, "  {label} {}", entry.symbol)?;
        }
    }
    for line in format_definition(&response.definition) {
        writeln!(out, "  {line}")?;
    }
    Ok(())
}
