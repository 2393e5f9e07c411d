use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, EnvFilter};

use arena_recap_lib::api::NonapaClient;
use arena_recap_lib::config::AppConfig;
use arena_recap_lib::errors::RecapError;
use arena_recap_lib::render::OutputFormat;
use arena_recap_lib::summary::DAY_FORMAT;
use arena_recap_lib::{extract, store, summary};

#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Output format override (json or markdown)
    #[arg(short, long)]
    format: Option<String>,

    /// Reference day override, e.g. "Jun 15 2024" (defaults to the local date)
    #[arg(long)]
    today: Option<String>,

    /// Build the summary but skip copying it to the destination path
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    use clap::Parser;
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    if let Err(err) = run(args).await {
        match err.downcast_ref::<RecapError>() {
            Some(recap) => error!("{}", recap.diagnostics()),
            None => error!("{:#}", err),
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run(args: Args) -> Result<(), anyhow::Error> {
    let config = AppConfig::load(&args.config)?;
    debug!(
        user_id = config.nonapa_user_id,
        season = config.season,
        region_id = config.region_id,
        realm_id = config.realm_id,
        dest_format = %config.dest_format,
        dest_path = %config.dest_path.display(),
        policy = ?config.day_policy,
        "config loaded"
    );

    let today = match &args.today {
        Some(day) => NaiveDate::parse_from_str(day, DAY_FORMAT)
            .map_err(|e| anyhow::anyhow!("invalid --today value {:?}: {}", day, e))?,
        None => Local::now().date_naive(),
    };
    info!("today: {}", today.format(DAY_FORMAT));

    let format: OutputFormat = args
        .format
        .as_deref()
        .unwrap_or(&config.dest_format)
        .parse()?;

    let client = NonapaClient::new(config.base_url.clone());
    let page = client
        .fetch_games_page(
            config.region_id,
            config.realm_id,
            config.nonapa_user_id,
            config.season,
        )
        .await?;

    let games = extract::extract_games(&page, config.data_occurrence)?;
    info!("decoded {} games", games.len());

    let run_dir = std::env::current_dir()?;
    store::write_raw_games(&games, &run_dir)?;

    let picked = summary::games_for_day(&games, today, config.day_policy)?;
    let day = summary::aggregate(&picked, &summary::target_day(today))?;
    info!("{}: winrate {}", day.date, day.winrate);

    let artifact = store::write_summary(&day, format, &run_dir)?;

    if args.dry_run {
        info!("dry run, skipping copy to {}", config.dest_path.display());
    } else {
        store::publish(&artifact, &config.dest_path)?;
    }

    info!("done");
    Ok(())
}
