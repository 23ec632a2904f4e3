use std::collections::BTreeSet;

use crate::model::*;

use super::eliminate::*;
use super::suits::*;

// [向聴数計算]
// 標準形(4面子1雀頭)・七対子・国士無双の3通りを独立に計算する.
// 全体の向聴数はその最小値で,最小に並んだ形はすべて報告の対象になる.

// 読み筋1つ分の標準形向聴数
// n: まだ必要な面子の数, pairs/taatsus: 抜いた対子・搭子の数
// 雀頭を除いた有効ブロック数はn個まで. 不足分は浮き牌から2枚入れ替えで作る.
pub(crate) fn shanten_of_reading(n: usize, pairs: usize, taatsus: usize) -> usize {
    let head = if pairs > 0 { 1 } else { 0 };
    let shapes = pairs - head + taatsus;
    let needs = n - shapes.min(n);
    n + needs - head
}

// 標準形の向聴数
pub fn calc_standard_shanten(hand: &[Tile]) -> i8 {
    calc_standard_shanten_suits(&to_suits(hand))
}

pub(crate) fn calc_standard_shanten_suits(suits: &SuitTable) -> i8 {
    let groupless = eliminate_all_groups(suits);

    // スートごとに読み筋を(残り枚数, 対子数, 搭子数)の候補へ圧縮
    let mut cands: [Vec<(usize, usize, usize)>; TYPE] = Default::default();
    for ti in 0..TYPE {
        let mut set = BTreeSet::new();
        for row in &groupless[ti] {
            for p in pull_simple_shapes(row, ti) {
                set.insert((row.len(), p.pairs.len(), p.taatsus.len()));
            }
        }
        cands[ti] = set.into_iter().collect();
    }

    // 全スートの読み筋の組み合わせから最小の向聴数を探す
    let mut best = usize::MAX;
    for m in &cands[TM] {
        for p in &cands[TP] {
            for s in &cands[TS] {
                for z in &cands[TZ] {
                    let len = m.0 + p.0 + s.0 + z.0;
                    let n = (len - 1) / 3;
                    let pairs = m.1 + p.1 + s.1 + z.1;
                    let taatsus = m.2 + p.2 + s.2 + z.2;
                    best = best.min(shanten_of_reading(n, pairs, taatsus));
                }
            }
        }
    }

    best as i8
}

// 七対子の向聴数と待ち (13枚手牌のみ有効)
// 3枚以上の同種牌は1対子としてしか数えない. 6種類以下しかない場合はその分の補正が付く.
pub fn calc_chiitoitsu_shanten(tt: &TileTable) -> (i8, Vec<Tile>) {
    let mut pairs = 0;
    let mut kinds = 0;
    let mut waits = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            match tt[ti][ni] {
                0 => {}
                1 => {
                    kinds += 1;
                    waits.push(Tile(ti, ni));
                }
                _ => {
                    kinds += 1;
                    pairs += 1;
                }
            }
        }
    }

    let redunct = 7usize.saturating_sub(kinds);
    ((6 + redunct) as i8 - pairs as i8, waits)
}

// 国士無双の向聴数と待ち (13枚手牌のみ有効)
// 雀頭がある場合は欠けている么九牌が待ち, 無い場合はすべての么九牌が待ち(十三面のケースを含む)
pub fn calc_kokushi_shanten(tt: &TileTable) -> (i8, Vec<Tile>) {
    let mut kinds = 0;
    let mut has_pair = false;
    let mut missing = vec![];
    let mut check = |ti: Type, ni: Tnum| {
        if tt[ti][ni] > 0 {
            kinds += 1;
            if tt[ti][ni] >= 2 {
                has_pair = true;
            }
        } else {
            missing.push(Tile(ti, ni));
        }
    };

    for ti in 0..TZ {
        check(ti, 1);
        check(ti, 9);
    }
    for ni in 1..=ZNUM {
        check(TZ, ni);
    }

    let shanten = 13 - kinds as i8 - has_pair as i8;
    let waits = if has_pair {
        missing
    } else {
        let mut all = vec![];
        for ti in 0..TZ {
            all.push(Tile(ti, 1));
            all.push(Tile(ti, 9));
        }
        for ni in 1..=ZNUM {
            all.push(Tile(TZ, ni));
        }
        all
    };

    (shanten, waits)
}

// 全体の向聴数 (該当する形の最小値)
pub fn calc_shanten(hand: &[Tile]) -> i8 {
    let mut shanten = calc_standard_shanten(hand);
    if hand.len() == 13 {
        let tt = tiles_to_tile_table(hand);
        shanten = shanten.min(calc_chiitoitsu_shanten(&tt).0);
        shanten = shanten.min(calc_kokushi_shanten(&tt).0);
    }
    shanten
}

#[test]
fn test_standard_shanten() {
    let sh = |exp: &str| calc_standard_shanten(&tiles_from_string(exp).unwrap());
    assert_eq!(sh("234567m23456p66s"), 0); // 三面張聴牌
    assert_eq!(sh("234567m23488p67s"), 0); // 両面聴牌
    assert_eq!(sh("234567m2468p678s"), 1); // 雀頭無し一向聴
    assert_eq!(sh("445789p3455789s"), 1); // くっつき一向聴
    assert_eq!(sh("123789m23458p1s2z"), 2);
    assert_eq!(sh("123789m2267p1s23z"), 2);
    assert_eq!(sh("123788m23458p1s2z"), 3);
    assert_eq!(sh("123456789m1234s"), 0); // のべたん聴牌
    assert_eq!(sh("2345m"), 0); // 4枚手牌ののべたん
    assert_eq!(sh("234m5s"), 0); // 4枚手牌の単騎聴牌
    assert_eq!(sh("19m19p19s1234567z"), 8); // 標準形では最悪の形
}

#[test]
fn test_chiitoitsu_shanten() {
    let sh = |exp: &str| {
        let tt = tiles_to_tile_table(&tiles_from_string(exp).unwrap());
        calc_chiitoitsu_shanten(&tt)
    };
    assert_eq!(sh("1122345588899m").0, 1);
    assert_eq!(sh("1122334455667m").0, 0);
    assert_eq!(sh("1122334455667m").1, vec![Tile(TM, 7)]);
    // 3枚持ちは1対子の扱い 6種しか無いので補正が入る
    assert_eq!(sh("2223344556677s").0, 1);
}

#[test]
fn test_kokushi_shanten() {
    let sh = |exp: &str| {
        let tt = tiles_to_tile_table(&tiles_from_string(exp).unwrap());
        calc_kokushi_shanten(&tt)
    };
    // 12種+雀頭: 残り1種待ち
    let (s, w) = sh("19m19p19s112345z");
    assert_eq!(s, 0);
    assert_eq!(w, vec![Tile(TZ, 7)]);
    // 13種雀頭無し: 十三面待ち
    let (s, w) = sh("19m19p19s1234567z");
    assert_eq!(s, 0);
    assert_eq!(w.len(), 13);
    // 么九牌以外を含む場合
    let (s, _) = sh("19m19p19s123456z2m");
    assert_eq!(s, 1);
}

#[test]
fn test_overall_shanten() {
    let sh = |exp: &str| calc_shanten(&tiles_from_string(exp).unwrap());
    assert_eq!(sh("1122345588899m"), 1); // 標準形・七対子とも1
    assert_eq!(sh("19m19p19s1234567z"), 0); // 国士十三面
    assert_eq!(sh("1122334455667m"), 0); // 七対子聴牌
}
