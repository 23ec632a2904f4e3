use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::*;
use crate::util::common::try_remove_all;

use super::eliminate::*;
use super::suits::*;

// [和了判定と待ち計算]

// 数字列がすべて面子に分解できるかの判定
fn row_is_melds(row: &Row, ti: Type) -> bool {
    let mut suits = SuitTable::default();
    for i in 0..TYPE {
        suits[i].insert(if i == ti { row.clone() } else { vec![] });
    }
    eliminate_all_groups(&suits)[ti].contains(&vec![])
}

// 手牌(3n+2枚)が面子+雀頭に完全分解できるかの判定
// 雀頭候補それぞれを外し,残り全スートが面子に分解できるかを面子除去で確認する
pub fn is_standard_win(tiles: &[Tile]) -> bool {
    let mut rows: [Row; TYPE] = Default::default();
    for t in tiles {
        rows[t.0].push(t.n());
    }
    for ti in 0..TYPE {
        rows[ti].sort_unstable();
    }

    let mut prev = (TYPE, TNUM);
    for t in tiles {
        let (ti, ni) = (t.0, t.n());
        if (ti, ni) == prev {
            continue;
        }
        prev = (ti, ni);
        if rows[ti].iter().filter(|&&x| x == ni).count() < 2 {
            continue;
        }

        // 雀頭を外す
        let mut ok = true;
        for i in 0..TYPE {
            let row = if i == ti {
                let mut row = rows[i].clone();
                let p = row.iter().position(|&x| x == ni).unwrap();
                row.remove(p);
                let p = row.iter().position(|&x| x == ni).unwrap();
                row.remove(p);
                row
            } else {
                rows[i].clone()
            };
            if !row_is_melds(&row, i) {
                ok = false;
                break;
            }
        }
        if ok {
            return true;
        }
    }

    false
}

// 七対子の和了形判定 (14枚)
pub fn is_chiitoitsu_win(tt: &TileTable) -> bool {
    let mut pairs = 0;
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            match tt[ti][ni] {
                0 => {}
                2 => pairs += 1,
                _ => return false,
            }
        }
    }
    pairs == 7
}

// 国士無双の和了形判定 (14枚)
pub fn is_kokushi_win(tt: &TileTable) -> bool {
    let mut count = 0;
    for ti in 0..TZ {
        if tt[ti][1] == 0 || tt[ti][9] == 0 {
            return false;
        }
        for ni in 2..9 {
            if tt[ti][ni] != 0 {
                return false;
            }
        }
        count += tt[ti][1] + tt[ti][9];
    }
    for ni in 1..=ZNUM {
        if tt[TZ][ni] == 0 {
            return false;
        }
        count += tt[TZ][ni];
    }

    count == 14
}

// 聴牌形の和了牌(標準形)
// 34種の牌それぞれを加えて和了形になるか試す. 聴牌していなければ空集合.
// 4枚使いの牌の除外は呼び出し側(解析の最終段)で行う.
pub fn calc_tenpai_waits(hand: &[Tile]) -> BTreeSet<Tile> {
    let mut res = BTreeSet::new();
    for ti in 0..TYPE {
        let nmax = if ti == TZ { ZNUM } else { 9 };
        for ni in 1..=nmax {
            let t = Tile(ti, ni);
            let mut h: Vec<Tile> = hand.to_vec();
            h.push(t);
            if is_standard_win(&h) {
                res.insert(t);
            }
        }
    }
    res
}

// 搭子(対子を含む)1組の受け入れ牌
pub fn get_taatsu_wait(a: Tile, b: Tile) -> BTreeSet<Tile> {
    assert!(a <= b && a.0 == b.0);
    let mut res = BTreeSet::new();
    if a == b {
        // 対子は刻子化で1ブロック進む
        res.insert(a);
    } else if b.1 == a.1 + 1 {
        // 両面・辺張
        if let Some(t) = a.pred() {
            res.insert(t);
        }
        if let Some(t) = b.succ() {
            res.insert(t);
        }
    } else if b.1 == a.1 + 2 {
        // 嵌張
        res.insert(Tile(a.0, a.1 + 1));
    }
    res
}

// 4枚の形の待ち (もう1枚で1面子+1雀頭になる牌)
pub fn calc_shape_waits(shape: &[Tile]) -> BTreeSet<Tile> {
    let ti = shape[0].0;
    let mut res = BTreeSet::new();
    let nmax = if ti == TZ { ZNUM } else { 9 };
    for ni in 1..=nmax {
        let t = Tile(ti, ni);
        let mut v: Vec<Tile> = shape.to_vec();
        v.push(t);
        if is_group_pair(&v) {
            res.insert(t);
        }
    }
    res
}

// 5枚が1面子+1雀頭に分解できるかの判定
fn is_group_pair(tiles: &[Tile]) -> bool {
    assert!(tiles.len() == 5);
    let mut prev = (TYPE, TNUM);
    for t in tiles {
        let (ti, ni) = (t.0, t.n());
        if (ti, ni) == prev {
            continue;
        }
        prev = (ti, ni);
        let pair = [Tile(ti, ni), Tile(ti, ni)];
        if let Some(rest) = try_remove_all(tiles, &pair) {
            let a = rest[0].n();
            let b = rest[1].n();
            let c = rest[2].n();
            if rest[0].0 == rest[1].0 && rest[1].0 == rest[2].0 {
                if a == b && b == c {
                    return true;
                }
                if rest[0].0 != TZ && b == a + 1 && c == b + 1 {
                    return true;
                }
            }
        }
    }
    false
}

// [待ちの延長]
// 手牌中の面子の端が待ち牌に重なる・隣接すると,待ちがより広い形に化ける.
// (のべたん・三面張・亜両面・両単騎系の各形はこの延長の組み合わせで表現できる)

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Extension {
    pub waits: BTreeSet<Tile>, // 延長後の形の待ち
    pub tile: Tile,            // 延長元の待ち牌
    pub group: [Tile; 3],      // 延長に使った面子
    pub tanki: bool,           // 単騎待ちの延長かどうか
}

fn seq_at(ti: Type, lo: isize) -> Option<[Tile; 3]> {
    if ti == TZ || lo < 1 || lo + 2 > 9 {
        return None;
    }
    let lo = lo as usize;
    Some([Tile(ti, lo), Tile(ti, lo + 1), Tile(ti, lo + 2)])
}

fn triplet_at(ti: Type, n: isize) -> Option<[Tile; 3]> {
    if !(1..=9).contains(&n) {
        return None;
    }
    let n = n as usize;
    Some([Tile(ti, n), Tile(ti, n), Tile(ti, n)])
}

fn extend_one(rest: &[Tile], w: Tile, group: [Tile; 3], tanki: bool) -> Option<Extension> {
    try_remove_all(rest, &group)?;
    let mut shape = group.to_vec();
    shape.push(w);
    shape.sort();
    Some(Extension {
        waits: calc_shape_waits(&shape),
        tile: w,
        group,
        tanki,
    })
}

// 単騎待ちの延長を列挙
// 順子は重なり(-2,0)・隣接(-3,+1)・飛び(+4)の開始位置, 刻子は±1,±2の位置が対象
pub fn calc_tanki_wait_extensions(rest: &[Tile], tankis: &BTreeSet<Tile>) -> Vec<Extension> {
    let mut res = BTreeSet::new();
    for &w in tankis {
        if w.is_honor() {
            continue;
        }
        let n = w.1 as isize;
        for &s in &[-3, -2, 0, 1, 4] {
            if let Some(group) = seq_at(w.0, n + s) {
                if let Some(ext) = extend_one(rest, w, group, true) {
                    res.insert(ext);
                }
            }
        }
        for &s in &[-2, -1, 1, 2] {
            if let Some(group) = triplet_at(w.0, n + s) {
                if let Some(ext) = extend_one(rest, w, group, true) {
                    res.insert(ext);
                }
            }
        }
    }
    res.into_iter().collect()
}

// 搭子待ちの延長を列挙 (待ち牌に重なる順子のみが対象)
pub fn calc_wait_extensions(rest: &[Tile], waits: &BTreeSet<Tile>) -> Vec<Extension> {
    let mut res = BTreeSet::new();
    for &w in waits {
        if w.is_honor() {
            continue;
        }
        let n = w.1 as isize;
        for &s in &[-2, 0] {
            if let Some(group) = seq_at(w.0, n + s) {
                if let Some(ext) = extend_one(rest, w, group, false) {
                    res.insert(ext);
                }
            }
        }
    }
    res.into_iter().collect()
}

#[test]
fn test_is_standard_win() {
    let win = |exp: &str| is_standard_win(&tiles_from_string(exp).unwrap());
    assert!(win("123456789m12344s"));
    assert!(win("11122233344455m")); // 刻子4つ+雀頭
    assert!(win("123m44p"));
    assert!(!win("123m45p"));
    assert!(!win("123456789m12345s"));
}

#[test]
fn test_calc_tenpai_waits() {
    let waits = |exp: &str| {
        let hand = tiles_from_string(exp).unwrap();
        let w = calc_tenpai_waits(&hand);
        tiles_to_string(&w.into_iter().collect::<Vec<_>>())
    };
    assert_eq!(waits("234567m23456p66s"), "147p"); // 三面張
    assert_eq!(waits("234567m23488p67s"), "58s"); // 両面
    assert_eq!(waits("123456789m1234s"), "14s"); // のべたん
    assert_eq!(waits("1112345678999s"), "123456789s"); // 九蓮宝燈
    assert_eq!(waits("123456m2468p99s"), ""); // 聴牌していない
}

#[test]
fn test_get_taatsu_wait() {
    let w = |a, b| {
        get_taatsu_wait(a, b)
            .into_iter()
            .collect::<Vec<_>>()
    };
    assert_eq!(w(Tile(TP, 6), Tile(TP, 7)), vec![Tile(TP, 5), Tile(TP, 8)]);
    assert_eq!(w(Tile(TP, 1), Tile(TP, 2)), vec![Tile(TP, 3)]);
    assert_eq!(w(Tile(TS, 4), Tile(TS, 6)), vec![Tile(TS, 5)]);
    assert_eq!(w(Tile(TZ, 3), Tile(TZ, 3)), vec![Tile(TZ, 3)]);
}

#[test]
fn test_tanki_extensions() {
    // 単騎の5に345の順子が重なる → 亜両面(2,5待ち)
    let mut tankis = BTreeSet::new();
    tankis.insert(Tile(TM, 5));
    let rest = tiles_from_string("345m").unwrap();
    let exts = calc_tanki_wait_extensions(&rest, &tankis);
    assert_eq!(exts.len(), 1);
    let w: Vec<Tile> = exts[0].waits.iter().cloned().collect();
    assert_eq!(w, vec![Tile(TM, 2), Tile(TM, 5)]);
}
