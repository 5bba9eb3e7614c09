//! nomen — planetary feature-name disambiguation from the command line.

use std::path::Path;

use nomen_core::{EngineConfig, Polarity};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;

fn print_usage() {
    println!("nomen — planetary feature-name disambiguation");
    println!();
    println!("Usage: nomen <command> [args]");
    println!();
    println!("Commands:");
    println!("  excerpts <context.json> <documents.json>   Show selected excerpt windows");
    println!("  seed <polarity> <context.json> <docs.json>  Run a seeding job (positive|negative)");
    println!("  score <context.json> <evidence.json> <kw>   Knowledge-graph score of keywords");
    println!("  help                                        Show this help message");
}

fn usage_error(message: &str) -> ! {
    eprintln!("Usage: {}", message);
    std::process::exit(1);
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let config = EngineConfig::from_env();
    debug!("Engine config: {:?}", config);

    let output = match args[1].as_str() {
        "excerpts" => {
            if args.len() < 4 {
                usage_error("nomen excerpts <context.json> <documents.json>");
            }
            commands::excerpts(Path::new(&args[2]), Path::new(&args[3]), &config)?
        }
        "seed" => {
            if args.len() < 5 {
                usage_error("nomen seed <positive|negative> <context.json> <documents.json>");
            }
            let polarity = match args[2].as_str() {
                "positive" => Polarity::Positive,
                "negative" => Polarity::Negative,
                other => usage_error(&format!(
                    "nomen seed <positive|negative> ... (got '{}')",
                    other
                )),
            };
            commands::seed(polarity, Path::new(&args[3]), Path::new(&args[4]), &config)?
        }
        "score" => {
            if args.len() < 5 {
                usage_error("nomen score <context.json> <evidence.json> <keyword>...");
            }
            commands::score(Path::new(&args[2]), Path::new(&args[3]), &args[4..], &config)?
        }
        "--help" | "-h" | "help" => {
            print_usage();
            return Ok(());
        }
        _ => {
            eprintln!("Unknown command: {}. Use 'nomen help' for usage.", args[1]);
            std::process::exit(1);
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
