#[allow(dead_code)]
fn silence_unused_warning() {
    let _ = crate::model::Tile::is_end;
    let _ = crate::model::tiles_from_tile_table;

    let _ = crate::hand::calc_shanten;
    let _ = crate::hand::calc_tenpai_waits;
    let _ = crate::hand::is_chiitoitsu_win;
    let _ = crate::hand::is_kokushi_win;
}
