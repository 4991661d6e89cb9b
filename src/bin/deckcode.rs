//! Command-line deck-code tool.
//!
//! ```text
//! deckcode encode 12:3 40:1
//! deckcode decode "$(deckcode encode 12:3 40:1)"
//! deckcode --catalog cards.json --ban-list banlist.json check '5|...'
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use deckcode::cards::{CardCatalog, CardId, CardRegistry};
use deckcode::deck::{DeckCodeApplier, DeckList};
use deckcode::rules::{BanList, LimitPolicy};

#[derive(Debug, Parser)]
#[command(name = "deckcode", version, about = "Encode, decode, and check deck codes")]
struct Cli {
    /// Card catalog: JSON array of {"id", "name", "image"?} records.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Ban list: JSON object of limit tables.
    #[arg(long, global = true)]
    ban_list: Option<PathBuf>,

    /// Raise every cap of 3 or less to 4.
    #[arg(long, global = true)]
    limit_release: bool,

    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Encode `id:count` entries as a deck code.
    Encode {
        #[arg(required = true)]
        entries: Vec<String>,
    },
    /// Print the entries of a deck code, one `id count` per line.
    Decode { code: String },
    /// Validate a deck code against the catalog and ban list.
    Check { code: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Returns `Ok(false)` when a `check` finds problems.
fn run(cli: &Cli) -> Result<bool> {
    let catalog = cli.catalog.as_deref().map(load_catalog).transpose()?;

    match &cli.command {
        Command::Encode { entries } => {
            let deck = parse_entries(entries)?;
            println!("{}", deckcode::encode(&deck));
            Ok(true)
        }
        Command::Decode { code } => {
            let deck = deckcode::decode(code).context("invalid deck code")?;
            for (id, count) in deck.iter() {
                match catalog.as_ref().and_then(|c| c.lookup(id)) {
                    Some(record) => println!("{id}\t{count}\t{}", record.name),
                    None => println!("{id}\t{count}"),
                }
            }
            Ok(true)
        }
        Command::Check { code } => {
            let deck = deckcode::decode(code).context("invalid deck code")?;
            let policy = LimitPolicy::new(load_ban_list(cli.ban_list.as_deref())?);
            let mut ok = true;

            if let Some(catalog) = &catalog {
                let preview = DeckCodeApplier::new(catalog).preview(&deck);
                for id in &preview.unknown {
                    println!("unknown card {id}");
                    ok = false;
                }
            }
            for violation in policy.violations(&deck, cli.limit_release) {
                println!(
                    "card {}: {} copies, max {} ({})",
                    violation.id, violation.count, violation.max, violation.reason
                );
                ok = false;
            }
            if ok {
                println!("ok: {} cards, {} distinct", deck.total(), deck.len());
            }
            Ok(ok)
        }
    }
}

fn parse_entries(entries: &[String]) -> Result<DeckList> {
    let mut counts = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some((id, count)) = entry.split_once(':') else {
            bail!("entry {entry:?} is not id:count");
        };
        let id: CardId = id.parse().with_context(|| format!("bad card id in {entry:?}"))?;
        let count: i64 = count.parse().with_context(|| format!("bad count in {entry:?}"))?;
        counts.push((id, count));
    }
    Ok(DeckList::from_counts(counts)?)
}

fn load_catalog(path: &Path) -> Result<CardRegistry> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    CardRegistry::from_json(&json).with_context(|| format!("failed to parse catalog {}", path.display()))
}

fn load_ban_list(path: Option<&Path>) -> Result<BanList> {
    let Some(path) = path else {
        return Ok(BanList::new());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read ban list {}", path.display()))?;
    BanList::from_json(&json).with_context(|| format!("failed to parse ban list {}", path.display()))
}
