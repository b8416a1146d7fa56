use clap::Args;
use workboard_core::{date_range, filter_tasks_by_date, DashboardSummary, WorkloadAnalyzer};

use super::{Context, FilterArgs, SnapshotArgs};

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,
    #[command(flatten)]
    pub filter: FilterArgs,
}

pub fn run(ctx: &Context, args: SummaryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = ctx.load_config()?;
    let filter = args.filter.resolve(&config)?;
    let snapshot = args.snapshot.load()?;

    let analyzer = WorkloadAnalyzer::with_options(config.scoring_options());
    let rows = analyzer.analyze(&snapshot.users, &snapshot.tasks, filter, ctx.now);
    let range = date_range(filter, ctx.now);
    let in_view = filter_tasks_by_date(&snapshot.tasks, range.as_ref());

    let summary = DashboardSummary::build(&rows, in_view, ctx.now.date());
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
