use cardforge::api::LayoutResult;
use cardforge::config::{SlotConfig, SlotEntry, StatsViewSettings};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

pub fn print_slot_grid(name: &str, config: &SlotConfig) {
    println!("\nSlots: {name}");
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let ids: Vec<Cell> = config
        .slots()
        .map(|(id, _)| Cell::new(format!("slot_{id}")).set_alignment(CellAlignment::Center))
        .collect();
    let keys: Vec<Cell> = config
        .slots()
        .map(|(_, entry)| {
            let text = match entry {
                SlotEntry::Empty => "·".to_string(),
                SlotEntry::Stat(key) => key.to_string(),
            };
            Cell::new(text).set_alignment(CellAlignment::Center)
        })
        .collect();

    table.add_row(ids);
    table.add_row(keys);
    println!("{table}");
}

pub fn print_layout_report(result: &LayoutResult) {
    let layout = &result.layout;

    println!(
        "\nCanvas: {}x{}  blocks: {} full / {} short  rating: {}",
        layout.geometry.width,
        layout.geometry.height,
        layout.counts.full,
        layout.counts.short,
        if layout.include_rating { "yes" } else { "no" }
    );

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Block").add_attribute(Attribute::Bold),
        Cell::new("Kind"),
        Cell::new("Top"),
        Cell::new("Bottom"),
        Cell::new("Height"),
    ]);

    for (i, rect) in layout.background.blocks.iter().enumerate() {
        let kind = layout
            .full_kinds
            .get(i)
            .map(|k| format!("{k:?}"))
            .unwrap_or_else(|| "ShortVehicle".to_string());
        table.add_row(vec![
            Cell::new(i.to_string()),
            Cell::new(kind),
            Cell::new(rect.y0.to_string()).set_alignment(CellAlignment::Right),
            Cell::new(rect.y1.to_string()).set_alignment(CellAlignment::Right),
            Cell::new((rect.y1 - rect.y0).to_string()).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
}

pub fn print_coordinate_report(result: &LayoutResult, view: &StatsViewSettings) {
    println!("\nSlot x-coordinates (block-relative rows at offset 0):");

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("Row").add_attribute(Attribute::Bold)];
    for (id, _) in view.common_slots.slots() {
        header.push(Cell::new(format!("slot_{id}")));
    }
    table.add_row(header);

    let rows = [
        ("labels", &result.main_rows.labels),
        ("values", &result.main_rows.values),
        ("session", &result.main_rows.session),
    ];
    for (name, coords) in rows {
        let mut cells = vec![Cell::new(name)];
        for (id, _) in view.common_slots.slots() {
            let text = coords
                .get(&id)
                .map(|(x, y)| format!("({x}, {y})"))
                .unwrap_or_else(|| "-".to_string());
            cells.push(Cell::new(text).set_alignment(CellAlignment::Right));
        }
        table.add_row(cells);
    }
    if let Some(diff) = &result.main_rows.diff {
        let mut cells = vec![Cell::new("diff")];
        for (id, _) in view.common_slots.slots() {
            let text = diff
                .get(&id)
                .map(|(x, y)| format!("({x}, {y})"))
                .unwrap_or_else(|| "-".to_string());
            cells.push(Cell::new(text).set_alignment(CellAlignment::Right));
        }
        table.add_row(cells);
    }
    println!("{table}");
}
