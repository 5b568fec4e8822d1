use crate::reports;
use cardforge::api;
use cardforge::config::{load_json, ImageSettings, StatsViewSettings, WidgetSettings};
use cardforge::error::CfResult;
use cardforge::render::OutputKind;
use cardforge::stats::{PlayerStats, SessionStats};
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Player aggregate JSON file.
    #[arg(short, long)]
    pub player: String,

    /// Session-diff JSON file.
    #[arg(short, long)]
    pub session: String,

    /// Image settings JSON file (defaults apply when omitted).
    #[arg(long)]
    pub image_settings: Option<String>,

    /// Widget settings JSON file (defaults apply when omitted).
    #[arg(long)]
    pub widget_settings: Option<String>,

    /// Stats-view settings JSON file (defaults apply when omitted).
    #[arg(long)]
    pub view: Option<String>,

    /// Resolve with the widget-mode profile.
    #[arg(long, default_value_t = false)]
    pub widget: bool,

    /// Output representation a host would request (bytes, surface, base64).
    /// Checked here so a bad request fails before any pipeline work.
    #[arg(long)]
    pub output: Option<String>,

    /// Dump the layout result as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: LayoutArgs) -> CfResult<()> {
    if let Some(output) = &args.output {
        let kind = OutputKind::parse_request(output)?;
        println!("Output representation: {kind}");
    }

    let player: PlayerStats = load_json(&args.player)?;
    let session: SessionStats = load_json(&args.session)?;
    let image: ImageSettings = match &args.image_settings {
        Some(path) => load_json(path)?,
        None => ImageSettings::default(),
    };
    let widget: WidgetSettings = match &args.widget_settings {
        Some(path) => load_json(path)?,
        None => WidgetSettings::default(),
    };
    let view: StatsViewSettings = match &args.view {
        Some(path) => load_json(path)?,
        None => StatsViewSettings::default(),
    };

    let result = api::compute_layout(&player, &session, &image, &widget, &view, args.widget);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("\n📐 === LAYOUT REPORT === 📐");
    reports::print_layout_report(&result);
    reports::print_coordinate_report(&result, &view);
    Ok(())
}
