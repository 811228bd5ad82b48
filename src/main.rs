use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use creator_rank::scoring::{ScoringEngine, Tier};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank creators from a scrape batch (default if no subcommand)
    Rank {
        /// Path to the scrape batch JSON (falls back to `input` in config)
        input: Option<PathBuf>,

        /// Comma-separated niche keywords (overrides `niches` in config)
        #[arg(long, value_delimiter = ',')]
        niches: Option<Vec<String>>,

        /// Only show creators at or above this tier
        #[arg(long)]
        tier: Option<Tier>,

        /// Emit the ranked list as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Pin "now" (RFC 3339) for the 30-day engagement window,
        /// e.g. when replaying an old scrape
        #[arg(long)]
        now: Option<String>,
    },
    /// Print the qualification tier cutoffs
    Thresholds,
}

#[derive(Parser, Debug)]
#[command(name = "creator-rank")]
#[command(about = "Creator outreach prioritization CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/creator-rank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Rank {
        input: None,
        niches: None,
        tier: None,
        json: false,
        now: None,
    });
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match creator_rank::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    match command {
        Commands::Thresholds => {
            for tier in [Tier::Premium, Tier::Good, Tier::Acceptable] {
                println!("{:<12} >= {:.2}", tier.to_string(), tier.threshold());
            }
        }
        Commands::Rank {
            input,
            niches,
            tier,
            json,
            now,
        } => {
            // Validate weight overrides at startup
            let weights = config.weights.unwrap_or_default();
            if let Err(errors) = creator_rank::scoring::validate_weights(&weights) {
                eprintln!("Weight config errors:");
                for error in errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(EXIT_CONFIG);
            }

            let Some(input_path) = input.or(config.input) else {
                eprintln!("No batch file given.");
                eprintln!("Pass one as an argument, or set a default in");
                eprintln!("~/.config/creator-rank/config.yaml:");
                eprintln!("  input: scrapes/latest.json");
                std::process::exit(EXIT_CONFIG);
            };

            let now = match now {
                Some(ref raw) => match raw.parse::<DateTime<Utc>>() {
                    Ok(t) => t,
                    Err(e) => {
                        eprintln!("Invalid --now timestamp '{}': {}", raw, e);
                        std::process::exit(EXIT_INPUT);
                    }
                },
                None => Utc::now(),
            };

            let batch = match creator_rank::input::load_batch(&input_path) {
                Ok(b) => b,
                Err(e) => {
                    eprintln!("Input error: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            if cli.verbose {
                eprintln!(
                    "Loaded {} creators and {} posts from {}",
                    batch.creators.len(),
                    batch.posts.len(),
                    input_path.display()
                );
            }

            let creators = creator_rank::input::dedupe_creators(batch.creators);
            let posts_by_username = creator_rank::input::group_posts_by_username(batch.posts);

            if cli.verbose {
                eprintln!("After deduplication: {} unique creators", creators.len());
            }

            let niches = niches.unwrap_or(config.niches);
            if cli.verbose && !niches.is_empty() {
                eprintln!("Target niches: {}", niches.join(", "));
            }

            let engine = ScoringEngine::new(weights);
            let mut ranked = engine.score_creators_at(&creators, &posts_by_username, &niches, now);

            // Tier filtering is consumer-side; the engine only scores
            if let Some(tier) = tier {
                ranked.retain(|scored| scored.score.overall >= tier.threshold());
                if cli.verbose {
                    eprintln!("After {} filter: {} creators", tier, ranked.len());
                }
            }

            if json {
                match serde_json::to_string_pretty(&ranked) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("Failed to serialize results: {}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                }
            } else {
                let use_colors = creator_rank::output::should_use_colors();

                if cli.verbose && !ranked.is_empty() {
                    // Verbose mode: detailed output with sub-scores
                    for scored in &ranked {
                        println!("{}", creator_rank::output::format_creator_detail(scored, use_colors));
                        println!();
                    }
                } else {
                    // Normal mode: ranked table
                    let output = creator_rank::output::format_ranked_table(&ranked, use_colors);
                    println!("{}", output);
                }
            }

            if cli.verbose {
                eprintln!();
                eprintln!("Total: {} creators in {:?}", ranked.len(), start_time.elapsed());
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
