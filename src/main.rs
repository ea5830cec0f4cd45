use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn, Level};

use court_schedule::config::ScheduleConfig;
use court_schedule::loader::{load_divisions, write_report};
use court_schedule::planner::Planner;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding tournament_index.json and the division files
    #[arg(short, long)]
    divisions: PathBuf,

    /// Directory the session files and schedule_index.json are written to
    #[arg(short, long)]
    out: PathBuf,

    /// JSON scheduling configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tournament name (defaults to the index's name)
    #[arg(short, long)]
    tournament: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = match &args.config {
        Some(path) => ScheduleConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ScheduleConfig::default(),
    };
    info!(
        default_threshold = config.default_threshold,
        use_seeding = config.use_seeding,
        overrides = config.divisions.len(),
        "configuration"
    );

    let (index, divisions) = load_divisions(&args.divisions)
        .with_context(|| format!("loading divisions from {}", args.divisions.display()))?;
    let tournament = args
        .tournament
        .or(index.tournament)
        .unwrap_or_else(|| "Tournament".to_string());

    let plan = Planner::new(&config)
        .with_tournament(tournament)
        .plan(&divisions)
        .context("building match graph")?;

    for id in &plan.schedule.unscheduled {
        warn!(match_id = %id, "unscheduled");
    }
    if plan.schedule.is_valid() {
        info!("no warnings, all checks passed");
    }

    let today = chrono::Local::now().date_naive().to_string();
    let report = plan.report.with_generated(today);
    write_report(&args.out, &report)
        .with_context(|| format!("writing schedules to {}", args.out.display()))?;

    for s in &report.summary.sessions {
        info!(session = %s.label, matches = s.match_count, range = %s.time_range, "session");
    }
    for (code, count) in &plan.kpi.by_division {
        info!(division = %code, scheduled = count, "division");
    }
    info!(
        total = report.published_count(),
        utilization = %format!("{:.1}%", plan.kpi.avg_utilization * 100.0),
        "done"
    );
    Ok(())
}
