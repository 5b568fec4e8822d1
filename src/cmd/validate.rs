use crate::reports;
use cardforge::api;
use cardforge::config::{load_json, StatsViewSettings};
use cardforge::error::CfResult;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Stats-view settings JSON file to validate.
    #[arg(short, long)]
    pub view: String,
}

pub fn run(args: ValidateArgs) -> CfResult<()> {
    let view: StatsViewSettings = load_json(&args.view)?;
    let summary = api::validate_view_settings(&view)?;

    println!("\n🔎 === VIEW SETTINGS AUDIT === 🔎");
    reports::print_slot_grid("common", &view.common_slots);
    reports::print_slot_grid("rating", &view.rating_slots);
    println!(
        "common slots: {}, rating slots: {}, longest key: {}",
        summary.common_slots, summary.rating_slots, summary.longest_key_len
    );
    Ok(())
}
