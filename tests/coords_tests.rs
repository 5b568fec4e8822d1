// ===== cardforge/tests/coords_tests.rs =====
use cardforge::config::{SlotConfig, StatsViewSettings};
use cardforge::layout::coords::RelativeCoordinates;
use cardforge::stats::StatKey;

fn view_with_slots(common: usize) -> StatsViewSettings {
    let keys = [
        StatKey::Battles,
        StatKey::Winrate,
        StatKey::Accuracy,
        StatKey::Damage,
        StatKey::Frags,
        StatKey::Xp,
    ];
    StatsViewSettings {
        common_slots: SlotConfig::of_stats(&keys[..common]),
        rating_slots: SlotConfig::of_stats(&[StatKey::Battles]),
    }
}

#[test]
fn four_slots_divide_width_into_five_segments() {
    let coords = RelativeCoordinates::new(800, &view_with_slots(4));
    let table = coords.main_values(0);

    let xs: Vec<i32> = table.values().map(|&(x, _)| x).collect();
    assert_eq!(xs, vec![160, 320, 480, 640]);
}

#[test]
fn single_slot_lands_on_canvas_center() {
    let coords = RelativeCoordinates::new(800, &view_with_slots(1));
    let table = coords.main_values(0);
    assert_eq!(table[&1].0, 400);
}

#[test]
fn rating_row_spreads_independently() {
    // 4 common slots but a single rating slot: rating centers, common spreads.
    let coords = RelativeCoordinates::new(800, &view_with_slots(4));
    assert_eq!(coords.rating_values(0)[&1].0, 400);
    assert_eq!(coords.main_values(0)[&1].0, 160);
}

#[test]
fn row_offsets_are_stable_per_block_kind() {
    let coords = RelativeCoordinates::new(800, &view_with_slots(2));

    for offset in [80, 360, 640] {
        assert_eq!(coords.block_label(offset), (400, offset + 15));
        assert_eq!(coords.main_values(offset)[&1].1, offset + 97);
        assert_eq!(coords.main_session(offset)[&1].1, offset + 140);
        assert_eq!(coords.main_diff(offset)[&1].1, offset + 170);
        assert_eq!(coords.main_labels(offset)[&1].1, offset + 196);

        assert_eq!(coords.vehicle_values(offset)[&1].1, offset + 105);
        assert_eq!(coords.vehicle_session(offset)[&1].1, offset + 150);
        assert_eq!(coords.vehicle_diff(offset)[&1].1, offset + 185);
        assert_eq!(coords.vehicle_labels(offset)[&1].1, offset + 213);

        assert_eq!(coords.short_vehicle_values(offset)[&1].1, offset + 90);
        assert_eq!(coords.short_vehicle_session(offset)[&1].1, offset + 120);
        assert_eq!(coords.short_vehicle_labels(offset)[&1].1, offset + 150);
    }
}

#[test]
fn icon_row_shifts_left_by_half_icon_width() {
    let coords = RelativeCoordinates::new(800, &view_with_slots(4));
    let plain = coords.main_values(0);
    let icons = coords.main_icons(0, (40, 40));

    for (slot, &(x, y)) in &icons {
        assert_eq!(x, plain[slot].0 - 20, "icon x must center on the slot");
        assert_eq!(y, 40, "icon row sits at +40");
    }
}
