// 手牌の形解析(向聴数・待ち・形の分類・説明文)を行うモジュール
mod analyze;
mod classify;
mod describe;
mod eliminate;
mod shanten;
mod suits;
mod waits;

pub use self::{
    analyze::{
        analyze_hand, analyze_hand_str, Archetype, HandAnalysis, COPIES_ERROR, LENGTH_ERROR,
    },
    classify::Substate,
    shanten::{
        calc_chiitoitsu_shanten, calc_kokushi_shanten, calc_shanten, calc_standard_shanten,
    },
    waits::{calc_tenpai_waits, is_chiitoitsu_win, is_kokushi_win, is_standard_win},
};
