//! `sectorgen` — generate Traveller worlds, trade codes and sector listings.
//!
//! Usage:
//!   sectorgen world -n 5 --ruleset classic
//!   sectorgen classify A867977-8 C000411-B
//!   sectorgen space data/radio_club_domain.json --seed 42
//!   sectorgen space --format json          (bundled demo domain)

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sectorgen_logic::descriptor::space_from_json;
use sectorgen_logic::dice::RandomDice;
use sectorgen_logic::trade_codes::{self, TradeCode};
use sectorgen_logic::uwp::Uwp;
use sectorgen_logic::world::{Ruleset, WorldGenerator, WorldOptions};

// ── Demo descriptor (same JSON the integration tests use) ───────────────
const DEMO_DOMAIN_JSON: &str = include_str!("../../../data/radio_club_domain.json");

/// Traveller-style world and sector generator.
#[derive(Parser, Debug)]
#[command(name = "sectorgen", version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Seed for reproducible output (default: random, logged at -v)
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Rule edition
    #[arg(short, long, global = true, default_value = "mongoose")]
    ruleset: RulesetArg,

    /// Disable the space-opera atmosphere and hydrographics rules
    #[arg(long, global = true)]
    no_space_opera: bool,

    /// Disable the hard-science population rules
    #[arg(long, global = true)]
    no_hard_science: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    /// More logging on stderr (-v info, -vv debug; RUST_LOG wins when set)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Roll standalone main worlds
    World {
        /// How many worlds
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,
    },

    /// Print the trade codes of existing UWPs
    Classify {
        /// UWP strings such as A867977-8
        #[arg(required = true)]
        uwps: Vec<String>,
    },

    /// Build and populate a region from a descriptor
    Space {
        /// Descriptor JSON (default: the bundled Radio Club domain)
        descriptor: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RulesetArg {
    /// Classic Traveller
    Classic,
    /// Mongoose Traveller
    Mongoose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Sector-file style text
    Text,
    /// Pretty-printed JSON
    Json,
}

/// One classified world, as printed by `world` and `classify`.
#[derive(Debug, Serialize)]
struct ClassifiedWorld {
    uwp: Uwp,
    trade_codes: Vec<TradeCode>,
}

impl ClassifiedWorld {
    fn new(uwp: Uwp) -> Self {
        Self {
            uwp,
            trade_codes: trade_codes::classify(&uwp),
        }
    }
}

impl Args {
    fn world_options(&self) -> WorldOptions {
        WorldOptions {
            ruleset: match self.ruleset {
                RulesetArg::Classic => Ruleset::Classic,
                RulesetArg::Mongoose => Ruleset::Mongoose,
            },
            space_opera: !self.no_space_opera,
            hard_science: !self.no_hard_science,
        }
    }

    fn dice(&self) -> RandomDice {
        let seed = self.seed.unwrap_or_else(rand::random);
        tracing::info!(seed, "dice seeded");
        RandomDice::seeded(seed)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let worlds = WorldGenerator::new(args.world_options());
    tracing::debug!(options = ?worlds.options());

    match &args.command {
        Command::World { count } => {
            let mut dice = args.dice();
            let rolled: Vec<ClassifiedWorld> = (0..*count)
                .map(|_| ClassifiedWorld::new(worlds.generate(&mut dice)))
                .collect();
            print_worlds(&rolled, args.format)
        }
        Command::Classify { uwps } => {
            let parsed = uwps
                .iter()
                .map(|text| {
                    Uwp::parse(text)
                        .map(ClassifiedWorld::new)
                        .with_context(|| format!("cannot classify '{text}'"))
                })
                .collect::<Result<Vec<_>>>()?;
            print_worlds(&parsed, args.format)
        }
        Command::Space { descriptor } => {
            let json = match descriptor {
                Some(path) => fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => DEMO_DOMAIN_JSON.to_string(),
            };
            let mut space = space_from_json(&json).context("invalid space descriptor")?;
            space.generate(&mut args.dice(), &worlds);

            match args.format {
                OutputFormat::Text => print!("{}", space.to_text()),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&space)?),
            }
            Ok(())
        }
    }
}

/// `-v` count to a default filter directive.
fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Log to stderr so stdout stays clean for listings and JSON.
fn init_logging(verbose: u8) -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(verbosity_filter(verbose)))
        .context("invalid log filter")?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .context("failed to install the log subscriber")?;
    Ok(())
}

fn print_worlds(worlds: &[ClassifiedWorld], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for world in worlds {
                let codes: Vec<&str> = world.trade_codes.iter().map(|c| c.code()).collect();
                println!("{}  {}", world.uwp, codes.join(" "));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(worlds)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_filter_levels() {
        assert_eq!(verbosity_filter(0), "warn");
        assert_eq!(verbosity_filter(1), "info");
        assert_eq!(verbosity_filter(2), "debug");
        assert_eq!(verbosity_filter(9), "debug");
        assert!(EnvFilter::try_new(verbosity_filter(1)).is_ok());
    }

    #[test]
    fn test_verbose_flag_counts() {
        let args = Args::parse_from(["sectorgen", "-vv", "world"]);
        assert_eq!(args.verbose, 2);
        let args = Args::parse_from(["sectorgen", "classify", "A867977-8"]);
        assert_eq!(args.verbose, 0);
    }
}
