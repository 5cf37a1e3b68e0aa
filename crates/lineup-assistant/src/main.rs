// Start/sit assistant entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not the terminal)
// 2. Load config
// 3. Load weekly stat and projection records
// 4. Resolve per-player inputs for the target week
// 5. Run the lineup optimizer
// 6. Print the result as JSON on stdout

use lineup_assistant::config;
use lineup_assistant::lineup::optimizer;
use lineup_assistant::records;

use anyhow::Context;
use std::path::Path;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file so stdout stays pure JSON)
    init_tracing()?;
    info!("Start/sit assistant starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: league={}, season {} week {}",
        config.league.name, config.roster.season, config.roster.week
    );

    // 3. Load weekly records
    let stats = records::load_weekly_records(Path::new(&config.data_paths.stats))
        .context("failed to load weekly stats")?;
    let projections = records::load_weekly_records(Path::new(&config.data_paths.projections))
        .context("failed to load weekly projections")?;
    info!(
        "Loaded {} stat rows, {} projection rows",
        stats.len(),
        projections.len()
    );

    let stats_by_player = records::group_by_player(stats);
    let projections_by_player = records::group_by_player(projections);

    // 4. Resolve the roster and the target week's inputs
    let roster = config
        .roster
        .to_roster_state()
        .context("invalid roster configuration")?;
    let roster_ids: Vec<String> = roster
        .starters
        .iter()
        .map(|sa| sa.player_id.clone())
        .chain(roster.bench.iter().cloned())
        .collect();

    let week_data = optimizer::resolve_week_data(
        &roster_ids,
        &stats_by_player,
        &projections_by_player,
        &config.league.scoring_metric,
        config.roster.season,
        config.roster.week,
    );

    // 5. Optimize
    let result = optimizer::optimize(
        &roster,
        &week_data,
        &stats_by_player,
        &config.league.scoring_metric,
        &config.risk,
        config.roster.season,
        config.roster.week,
    );
    info!(
        "Optimized lineup: +{:.1} projected points, {} swap(s), {} risk",
        result.improvement,
        result.recommendations.len(),
        result.risk.level.label()
    );

    // 6. Emit JSON
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

/// Initialize tracing to log to a file, keeping stdout free for the JSON
/// result.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("startsit.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lineup_assistant=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
