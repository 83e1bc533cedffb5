use carry_match::config::{ConfigError, LoggingSettings, Settings};
use carry_match::core::Matcher;
use carry_match::error::{Error, Result};
use carry_match::ranking::{read_job, run_job};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "carry-match")]
#[command(version)]
#[command(about = "Rank travel offers against delivery requests")]
struct Cli {
    /// Ranking job JSON file; reads stdin when omitted
    input: Option<PathBuf>,

    /// Configuration file (defaults to config/default.toml and config/local.toml)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn init_logging(logging: &LoggingSettings) {
    // Logs go to stderr so stdout stays machine-readable
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&logging.level))
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true);

    if logging.is_pretty() {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn load_settings(cli: &Cli) -> std::result::Result<Settings, ConfigError> {
    match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
}

fn run(cli: Cli, settings: Settings) -> Result<()> {
    info!("Configuration loaded successfully");

    let matcher = Matcher::new(settings.scoring_policy()).with_min_score(settings.matching.min_score);

    info!("Matcher initialized with weights: {:?}", matcher.policy().weights);

    let job = match &cli.input {
        Some(path) => read_job(BufReader::new(File::open(path)?))?,
        None => read_job(io::stdin().lock())?,
    };

    let response = run_job(&matcher, &settings.matching, job)?;

    let mut stdout = io::stdout().lock();
    if cli.pretty {
        serde_json::to_writer_pretty(&mut stdout, &response)?;
    } else {
        serde_json::to_writer(&mut stdout, &response)?;
    }
    writeln!(stdout)?;

    Ok(())
}

fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let settings = load_settings(&cli);

    // Settings that failed to load still get reported through the default subscriber
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default()
        .with_env_overrides();
    init_logging(&logging);

    let result = settings
        .map_err(Error::from)
        .and_then(|settings| run(cli, settings));

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
