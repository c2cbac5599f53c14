use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use branchguard::checks::CheckRegistry;
use branchguard::config::Config;
use branchguard::output::OutputFormat;
use branchguard::CheckOptions;

#[derive(Parser)]
#[command(
    name = "branchguard",
    about = "Branch protection scorer for supply-chain risk assessment",
    version,
    author
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score branch protection from a repository snapshot
    Check {
        /// Path to the repository snapshot (JSON)
        #[arg(default_value = "snapshot.json")]
        snapshot: PathBuf,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Minimum score (0-10) to pass
        #[arg(long, env = "BRANCHGUARD_MIN_SCORE")]
        min_score: Option<u8>,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List all available checks and their scoring tiers
    ListChecks {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Generate a starter .branchguard.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            snapshot,
            config,
            format,
            min_score,
            output,
        } => cmd_check(snapshot, config, format, min_score, output),
        Commands::ListChecks { format } => cmd_list_checks(format),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_check(
    snapshot: PathBuf,
    config: Option<PathBuf>,
    format_str: String,
    min_score: Option<u8>,
    output_path: Option<PathBuf>,
) -> Result<i32, branchguard::error::GuardError> {
    let format = OutputFormat::from_str_lenient(&format_str).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using console", format_str);
        OutputFormat::Console
    });

    let options = CheckOptions {
        config_path: config,
        min_score_override: min_score,
    };

    let (report, config) = branchguard::check(&snapshot, &options)?;
    let rendered = branchguard::render_report(&report, format, config.output.show_debug)?;

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => print!("{}", rendered),
    }

    // Exit code: 0 = pass, 1 = below threshold or errored check
    Ok(if report.pass { 0 } else { 1 })
}

fn cmd_list_checks(format_str: String) -> Result<i32, branchguard::error::GuardError> {
    let checks = CheckRegistry::new().list_checks();

    match format_str.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&checks)?;
            println!("{}", json);
        }
        _ => {
            for check in &checks {
                println!("{} (risk: {})", check.name, check.risk);
                println!("  {}", check.description);
                println!("  {:<24} WEIGHT", "TIER");
                println!("  {}", "-".repeat(32));
                for tier in &check.tiers {
                    println!("  {:<24} {}", tier.name, tier.weight);
                }
                println!();
            }
        }
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, branchguard::error::GuardError> {
    let path = PathBuf::from(".branchguard.toml");

    if path.exists() && !force {
        eprintln!(".branchguard.toml already exists. Use --force to overwrite.");
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created .branchguard.toml");

    Ok(0)
}
