//! exo-browse - browse the exoplanet catalog and submit habitability ratings

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use exo_browse::{CatalogController, ExoApiClient, Session, SubmitOutcome};
use exo_common::config::TomlConfig;
use exo_common::SortField;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "exo-browse")]
#[command(about = "Browse the exoplanet catalog and rate planets")]
#[command(version)]
struct Cli {
    /// exo-api base URL
    #[arg(long, global = true, env = "EXO_API_URL")]
    api_url: Option<String>,

    /// TOML configuration file
    #[arg(short, long, global = true, env = "EXO_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List planets matching the filters
    List(ListArgs),
    /// Submit ratings as NAME=VALUE pairs
    Rate(RateArgs),
}

#[derive(ClapArgs, Debug)]
struct ListArgs {
    /// Case-insensitive name filter
    #[arg(short, long, default_value = "")]
    search: String,

    /// Minimum radius in Earth radii
    #[arg(long, default_value_t = 0.0)]
    min_radius: f64,

    /// Maximum radius in Earth radii
    #[arg(long, default_value_t = exo_common::query::DEFAULT_MAX_RADIUS)]
    max_radius: f64,

    /// Minimum Earth Similarity Index
    #[arg(long, default_value_t = 0.0)]
    min_score: f64,

    /// Sort by esi, radius, temperature or avg-rating
    #[arg(long, default_value = "esi")]
    sort: SortField,

    /// Number of planets to show
    #[arg(short, long, default_value_t = exo_common::query::DEFAULT_DISPLAY_COUNT)]
    limit: usize,
}

#[derive(ClapArgs, Debug)]
struct RateArgs {
    /// Signed-in identity reported by the auth provider
    #[arg(long = "as", env = "EXO_SESSION_LABEL")]
    session: Option<String>,

    /// Ratings as NAME=VALUE, VALUE in 0..=10
    #[arg(required = true, value_name = "NAME=VALUE")]
    ratings: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = TomlConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("exo_browse={0},exo_common={0}", config.logging.level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let api_url = cli.api_url.unwrap_or(config.api_url);
    debug!(api_url = %api_url, "Using exo-api");

    let client = ExoApiClient::new(&api_url).context("Failed to build API client")?;
    let mut controller = CatalogController::new(client, config.max_in_flight);

    match cli.command {
        Command::List(args) => list(&mut controller, args).await,
        Command::Rate(args) => rate(&mut controller, args).await,
    }
}

async fn list(controller: &mut CatalogController<ExoApiClient>, args: ListArgs) -> Result<()> {
    controller
        .load_catalog()
        .await
        .context("Failed to load exoplanet catalog")?;

    {
        let query = controller.query_mut();
        query.search = args.search;
        query.min_radius = args.min_radius;
        query.max_radius = args.max_radius;
        query.min_score = args.min_score;
        query.sort = args.sort;
        query.display_count = args.limit;
    }

    controller.resolve_visible_stats().await;

    let visible = controller.visible();
    for record in &visible.records {
        let rating = match controller.stat(record.name()) {
            Some(stat) => format!("{:.1} ({} ratings)", stat.average, stat.count),
            None => "pending".to_string(),
        };
        println!(
            "{:<28} radius {:>6.2}  temp {:>6.0} K  star {:>6.0} K  ESI {:.3}  rating {}",
            record.name(),
            record.radius(),
            record.equilibrium_temp(),
            record.host_star_temp(),
            record.similarity_score(),
            rating
        );
    }
    println!(
        "Showing {} of {} planets",
        visible.records.len(),
        visible.filtered_count
    );

    Ok(())
}

async fn rate(controller: &mut CatalogController<ExoApiClient>, args: RateArgs) -> Result<()> {
    for pair in &args.ratings {
        let (name, value) = parse_rating_pair(pair)?;
        controller
            .set_rating(name, value)
            .with_context(|| format!("Invalid rating '{}'", pair))?;
    }

    if let Some(label) = args.session {
        controller.sign_in(Session::new(label));
    }

    let outcome = controller.submit_ratings().await;
    println!("{}", outcome.notice());

    match outcome {
        SubmitOutcome::Completed { failed, .. } if failed > 0 => {
            bail!("{} rating(s) could not be saved", failed)
        }
        _ => Ok(()),
    }
}

/// Split `NAME=VALUE` on the last `=`
fn parse_rating_pair(pair: &str) -> Result<(&str, i64)> {
    let Some((name, value)) = pair.rsplit_once('=') else {
        bail!("Expected NAME=VALUE, got '{}'", pair);
    };
    let value = value
        .trim()
        .parse::<i64>()
        .with_context(|| format!("Rating in '{}' is not a whole number", pair))?;
    Ok((name.trim(), value))
}
