use clap::Args;
use workboard_core::WorkloadAnalyzer;

use super::{Context, FilterArgs, SnapshotArgs};

#[derive(Args)]
pub struct WorkloadArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,
    #[command(flatten)]
    pub filter: FilterArgs,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(ctx: &Context, args: WorkloadArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = ctx.load_config()?;
    let filter = args.filter.resolve(&config)?;
    let snapshot = args.snapshot.load()?;

    let analyzer = WorkloadAnalyzer::with_options(config.scoring_options());
    let rows = analyzer.analyze(&snapshot.users, &snapshot.tasks, filter, ctx.now);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", analyzer.render_report(&rows));
    }
    Ok(())
}
