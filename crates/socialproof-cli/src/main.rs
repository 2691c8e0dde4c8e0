use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "socialproof",
    version,
    about = "Scores social media exports for ownership, quality, authenticity and uniqueness"
)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Init {
        #[arg(long)]
        path: Option<PathBuf>,
        #[arg(long)]
        force: bool,
    },
    /// Evaluate the submission in the input directory and write results.json
    Run {
        #[arg(long, env = "INPUT_DIR")]
        input: Option<PathBuf>,
        #[arg(long, env = "OUTPUT_DIR")]
        output: Option<PathBuf>,
        #[arg(long, env = "DLP_ID")]
        dlp_id: Option<u64>,
        #[arg(long, env = "USER_EMAIL")]
        email: Option<String>,
        /// Run the validators one after another
        #[arg(long)]
        sequential: bool,
    },
    Report {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },
    Config {
        #[arg(long)]
        print: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Init { path, force } => init_config(path, force),
        Commands::Run {
            input,
            output,
            dlp_id,
            email,
            sequential,
        } => commands::run::execute(commands::run::RunInputs {
            config_path: cli.config,
            input,
            output,
            dlp_id,
            email,
            sequential,
        }),
        Commands::Report { input, json } => commands::report::execute(&input, json),
        Commands::Config { print } => {
            if print {
                commands::config::print_effective(cli.config)
            } else {
                Ok(())
            }
        }
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("warn")
            .add_directive(format!("socialproof={default_level}").parse()?)
            .add_directive(format!("scoring_engine={default_level}").parse()?)
            .add_directive(format!("reporting={default_level}").parse()?),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let paths = socialproof_core::config::ConfigPaths::resolve()?;
    let config_path = path.unwrap_or(paths.config_path);
    if config_path.exists() && !force {
        return Err(anyhow::anyhow!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        ));
    }
    let config = socialproof_core::config::Config::default_config();
    config.save(&config_path)?;
    println!("Config written to {}", config_path.display());
    Ok(())
}
