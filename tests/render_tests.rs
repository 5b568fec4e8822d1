// ===== cardforge/tests/render_tests.rs =====
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;

use cardforge::config::{ImageSettings, StatsViewSettings, WidgetSettings};
use cardforge::error::{CardForgeError, CfResult};
use cardforge::layout::BackgroundMap;
use cardforge::render::{
    render, DefaultLocalizer, DrawBackend, FontRole, IconKey, OutputKind, Point, RenderOutput,
    RenderRequest, TextSpec,
};
use cardforge::stats::{
    PlayerStats, RatingStats, SessionStats, StatBlock, VehicleKind, VehicleSession,
};

const PNG_STUB: &[u8] = b"\x89PNG-stub";

#[derive(Debug, Clone)]
enum Event {
    Background,
    Text(TextSpec),
    Icon(Point, IconKey),
    Watermark,
}

/// Backend that records every draw call instead of rasterizing.
struct RecordingBackend;

impl DrawBackend for RecordingBackend {
    type Surface = Vec<Event>;

    fn create_surface(&self, _width: u32, _height: u32, _widget_mode: bool) -> Vec<Event> {
        Vec::new()
    }

    fn measure_text(&self, text: &str, _font: FontRole) -> u32 {
        text.len() as u32 * 10
    }

    fn icon_size(&self, _icon: &IconKey) -> (u32, u32) {
        (40, 40)
    }

    fn composite_background(
        &self,
        surface: &mut Vec<Event>,
        _stencil: &BackgroundMap,
        _image: &ImageSettings,
        _widget: &WidgetSettings,
        _widget_mode: bool,
    ) {
        surface.push(Event::Background);
    }

    fn draw_text(&self, surface: &mut Vec<Event>, spec: &TextSpec) {
        surface.push(Event::Text(spec.clone()));
    }

    fn draw_icon(&self, surface: &mut Vec<Event>, pos: Point, icon: &IconKey) {
        surface.push(Event::Icon(pos, icon.clone()));
    }

    fn draw_watermark(&self, surface: &mut Vec<Event>) {
        surface.push(Event::Watermark);
    }

    fn encode_png(&self, _surface: &Vec<Event>) -> CfResult<Vec<u8>> {
        Ok(PNG_STUB.to_vec())
    }
}

fn player() -> PlayerStats {
    PlayerStats {
        nickname: "Tester".to_string(),
        clan_tag: Some("TAG".to_string()),
        region: Some("eu".to_string()),
        all: StatBlock {
            battles: 5_000.0,
            winrate: 0.52,
            damage: 1_700.0,
            ..StatBlock::default()
        },
        rating: RatingStats {
            stats: StatBlock {
                battles: 80.0,
                rating: 3_100.0,
                ..StatBlock::default()
            },
            calibration_battles_left: 0,
        },
    }
}

fn vehicle(id: &str) -> VehicleSession {
    VehicleSession {
        id: id.to_string(),
        name: format!("Vehicle {id}"),
        tier: 9,
        kind: VehicleKind::Medium,
        all: StatBlock::default(),
        session: StatBlock::default(),
        delta: StatBlock::default(),
    }
}

fn session(vehicle_count: usize, rating_battles: f64) -> SessionStats {
    SessionStats {
        rating_session: StatBlock {
            battles: rating_battles,
            ..StatBlock::default()
        },
        vehicles: (0..vehicle_count).map(|i| vehicle(&format!("v{i}"))).collect(),
        ..SessionStats::default()
    }
}

fn surface_of(output: RenderOutput<Vec<Event>>) -> Vec<Event> {
    match output {
        RenderOutput::Surface(s) => s,
        _ => panic!("expected a surface"),
    }
}

fn texts_with_font(events: &[Event], font: FontRole) -> Vec<&TextSpec> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Text(spec) if spec.font == font => Some(spec),
            _ => None,
        })
        .collect()
}

fn run(
    player: &PlayerStats,
    session: &SessionStats,
    image: &ImageSettings,
    widget: &WidgetSettings,
    widget_mode: bool,
    output: OutputKind,
) -> CfResult<RenderOutput<Vec<Event>>> {
    let view = StatsViewSettings::default();
    render(
        &RecordingBackend,
        &DefaultLocalizer,
        RenderRequest {
            player,
            session,
            image,
            widget,
            view: &view,
            widget_mode,
            debug_overlay: false,
        },
        output,
    )
}

#[test]
fn pipeline_stages_run_in_order() {
    let player = player();
    let session = session(1, 25.0);
    let events = surface_of(
        run(
            &player,
            &session,
            &ImageSettings::default(),
            &WidgetSettings::default(),
            false,
            OutputKind::Surface,
        )
        .unwrap(),
    );

    assert!(
        matches!(events.first(), Some(Event::Background)),
        "background is composited before any draw"
    );
    assert!(
        matches!(events.last(), Some(Event::Watermark)),
        "watermark is the final draw"
    );
}

#[test]
fn every_resolved_block_gets_a_title() {
    let player = player();
    let session = session(1, 25.0);
    let events = surface_of(
        run(
            &player,
            &session,
            &ImageSettings::default(),
            &WidgetSettings::default(),
            false,
            OutputKind::Surface,
        )
        .unwrap(),
    );

    let titles = texts_with_font(&events, FontRole::Title);
    assert_eq!(titles.len(), 2, "main and rating block titles");
    assert_eq!(titles[0].text, "Main");
    assert_eq!(titles[1].text, "Rating");

    let vehicle_titles = texts_with_font(&events, FontRole::VehicleTitle);
    assert_eq!(vehicle_titles.len(), 1);
    assert_eq!(vehicle_titles[0].text, "MT • Vehicle v0 • IX");
}

#[test]
fn header_draws_nickname_tag_and_flag() {
    let player = player();
    let session = session(0, 0.0);
    let events = surface_of(
        run(
            &player,
            &session,
            &ImageSettings::default(),
            &WidgetSettings::default(),
            false,
            OutputKind::Surface,
        )
        .unwrap(),
    );

    let header = texts_with_font(&events, FontRole::Nickname);
    let texts: Vec<&str> = header.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["Tester", "[TAG]"]);

    assert!(
        events.iter().any(|e| matches!(
            e,
            Event::Icon((10, 10), IconKey::RegionFlag(region)) if region == "eu"
        )),
        "region flag icon at the fixed header position"
    );
}

#[test]
fn widget_mode_can_suppress_header_and_main_block() {
    let player = player();
    let session = session(1, 0.0);
    let widget = WidgetSettings {
        disable_main_stats_block: true,
        disable_nickname: true,
        ..WidgetSettings::default()
    };
    let events = surface_of(
        run(
            &player,
            &session,
            &ImageSettings::default(),
            &widget,
            true,
            OutputKind::Surface,
        )
        .unwrap(),
    );

    assert!(texts_with_font(&events, FontRole::Nickname).is_empty());
    assert!(
        texts_with_font(&events, FontRole::Title).is_empty(),
        "no main or rating title"
    );
    assert_eq!(texts_with_font(&events, FontRole::VehicleTitle).len(), 1);
}

#[test]
fn short_blocks_skip_the_delta_row() {
    let player = player();
    let session = session(5, 0.0); // 3 full slots taken by main + 2 vehicles, 2 short, 1 dropped
    let events = surface_of(
        run(
            &player,
            &session,
            &ImageSettings::default(),
            &WidgetSettings::default(),
            false,
            OutputKind::Surface,
        )
        .unwrap(),
    );

    // 4 default slots per block. Delta rows: main + 2 full vehicles.
    // Session rows additionally cover the 2 short vehicles.
    let delta_count = texts_with_font(&events, FontRole::Delta).len();
    let session_count = texts_with_font(&events, FontRole::Session).len();
    assert_eq!(session_count - delta_count, 2 * 4);
}

#[test]
fn rating_slot_gets_league_icon_and_label() {
    let player = player(); // rating 3100 => Gold
    let session = session(0, 25.0);
    let events = surface_of(
        run(
            &player,
            &session,
            &ImageSettings::default(),
            &WidgetSettings::default(),
            false,
            OutputKind::Surface,
        )
        .unwrap(),
    );

    assert!(events.iter().any(|e| matches!(
        e,
        Event::Icon(_, IconKey::League(cardforge::format::League::Gold))
    )));
    assert!(texts_with_font(&events, FontRole::Label)
        .iter()
        .any(|s| s.text == "Gold"));
}

#[test]
fn byte_output_is_the_encoded_png() {
    let player = player();
    let session = session(0, 0.0);
    let output = run(
        &player,
        &session,
        &ImageSettings::default(),
        &WidgetSettings::default(),
        false,
        OutputKind::Bytes,
    )
    .unwrap();

    match output {
        RenderOutput::Bytes(bytes) => assert_eq!(bytes, PNG_STUB),
        _ => panic!("expected bytes"),
    }
}

#[test]
fn base64_output_encodes_the_png_bytes() {
    let player = player();
    let session = session(0, 0.0);
    let output = run(
        &player,
        &session,
        &ImageSettings::default(),
        &WidgetSettings::default(),
        false,
        OutputKind::Base64,
    )
    .unwrap();

    match output {
        RenderOutput::Base64(encoded) => {
            assert_eq!(encoded, BASE64_STANDARD.encode(PNG_STUB));
        }
        _ => panic!("expected base64"),
    }
}

#[test]
fn unknown_output_request_names_the_offender() {
    assert_eq!(OutputKind::parse_request("bytes").unwrap(), OutputKind::Bytes);
    assert_eq!(OutputKind::parse_request("base64").unwrap(), OutputKind::Base64);

    let err = OutputKind::parse_request("jpeg").unwrap_err();
    match err {
        CardForgeError::InvalidOutput(req) => assert_eq!(req, "jpeg"),
        other => panic!("expected InvalidOutput, got {other:?}"),
    }
}
