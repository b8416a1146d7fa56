use clap::Args;
use workboard_core::{Leaderboard, LeaderboardPeriod};

use super::{Context, SnapshotArgs};

#[derive(Args)]
pub struct LeaderboardArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,
    /// week, month or all (defaults to the configured period)
    #[arg(long)]
    pub period: Option<String>,
    /// Show only the top N entries
    #[arg(long)]
    pub limit: Option<usize>,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(ctx: &Context, args: LeaderboardArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = ctx.load_config()?;
    let period: LeaderboardPeriod = match &args.period {
        Some(name) => name.parse()?,
        None => config.default_period()?,
    };
    let snapshot = args.snapshot.load()?;

    let board = Leaderboard::with_options(config.scoring_options());
    let mut entries = board.rank(&snapshot.users, &snapshot.tasks, period, ctx.now);
    if let Some(limit) = args.limit {
        entries.truncate(limit);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", board.render_report(period, &entries));
    }
    Ok(())
}
