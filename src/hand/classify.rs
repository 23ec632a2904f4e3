use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::*;
use crate::util::common::{cartesian_product, try_remove_all};

use super::eliminate::*;
use super::shanten::shanten_of_reading;
use super::suits::*;
use super::waits::*;

// [形の分類]
// 向聴数計算で見つかった読み筋を名前のついた形に分類する.
// 1つの手牌に複数の解釈が同時に成り立つことがあり,そのすべてが待ちに寄与する.

// 部分形タグ
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Substate {
    Kuttsuki,       // くっつき(浮き牌頼み)
    Headless,       // 雀頭無し
    BrokenHeadless, // 雀頭無しかつ搭子不足
    CompleteSimple, // 浮き牌のない完全形
    FloatingSimple, // 浮き牌形
    Chiitoitsu,     // 七対子
    Kokushi,        // 国士無双
    Kokushi13,      // 国士無双十三面
    TankiIishanten, // 単騎一向聴(待ち牌の四枚使い)
}

// くっつき形: 面子と雀頭が足りていて,浮き牌への受けで形が進む
#[derive(Debug, Default, Clone, Serialize)]
pub struct KuttsukiInfo {
    pub floats: BTreeSet<Tile>,
    pub pair_tiles: BTreeSet<Tile>,
    pub taatsus: BTreeSet<(Tile, Tile)>,
    pub tanki_waits: BTreeSet<Tile>,  // 浮き牌の0~2距離の受け
    pub taatsu_waits: BTreeSet<Tile>,
}

// 雀頭無し形: 搭子は足りているが雀頭が無い
#[derive(Debug, Default, Clone, Serialize)]
pub struct HeadlessInfo {
    pub broken: bool, // 搭子も不足している場合
    pub taatsus: BTreeSet<(Tile, Tile)>,
    pub floats: BTreeSet<Tile>,
    pub tanki_waits: BTreeSet<Tile>,
    pub taatsu_waits: BTreeSet<Tile>,
    pub extensions: Vec<Extension>,
}

// 雀頭+ブロックの読み筋 (完全形・浮き牌形)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SimpleReading {
    pub pair: Tile,
    pub simples: Vec<(Tile, Tile)>, // 対子・搭子ブロック
    pub complexes: Vec<[Tile; 3]>,  // 複合形ブロック
    pub floats: Vec<Tile>,
    pub simple_waits: BTreeSet<Tile>,
    pub complex_waits: BTreeSet<Tile>,
    pub extensions: Vec<Extension>,
}

impl SimpleReading {
    pub fn is_complete(&self) -> bool {
        self.floats.is_empty()
    }

    // この読み筋の待ち全体 (延長も含む)
    pub fn all_waits(&self) -> BTreeSet<Tile> {
        let mut res = self.simple_waits.clone();
        res.append(&mut self.complex_waits.clone());
        for e in &self.extensions {
            res.append(&mut e.waits.clone());
        }
        res
    }
}

// 向聴数1~3の標準形の分類結果
#[derive(Debug, Default, Clone, Serialize)]
pub struct ShantenType {
    pub kuttsuki: Option<KuttsukiInfo>,
    pub headless: Option<HeadlessInfo>,
    pub simples: Vec<SimpleReading>,
}

impl ShantenType {
    pub fn substates(&self) -> BTreeSet<Substate> {
        let mut res = BTreeSet::new();
        if self.kuttsuki.is_some() {
            res.insert(Substate::Kuttsuki);
        }
        if let Some(h) = &self.headless {
            res.insert(if h.broken {
                Substate::BrokenHeadless
            } else {
                Substate::Headless
            });
        }
        for s in &self.simples {
            res.insert(if s.is_complete() {
                Substate::CompleteSimple
            } else {
                Substate::FloatingSimple
            });
        }
        res
    }
}

// 浮き牌1枚のくっつき受け (同スートの0~2距離, 字牌は同種のみ)
fn kuttsuki_neighborhood(t: Tile) -> BTreeSet<Tile> {
    let mut res = BTreeSet::new();
    res.insert(t);
    if t.is_suit() {
        for d in 1..=2 {
            if t.1 > d {
                res.insert(Tile(t.0, t.1 - d));
            }
            if t.1 + d <= 9 {
                res.insert(Tile(t.0, t.1 + d));
            }
        }
    }
    res
}

// 標準形の向聴数1~3の読み筋を分類
pub fn classify_shanten_type(hand: &[Tile], shanten: i8) -> ShantenType {
    assert!((1..=3).contains(&shanten));
    let s = shanten as usize;
    let suits = to_suits(hand);
    let groupless = eliminate_all_groups(&suits);

    let rows: Vec<Vec<Row>> = groupless
        .iter()
        .map(|set| set.iter().cloned().collect())
        .collect();

    let mut kuttsuki = KuttsukiInfo::default();
    let mut has_kuttsuki = false;
    let mut headless = HeadlessInfo::default();
    let mut has_headless = false;
    let mut headless_max_taatsus = 0;
    let mut simples = BTreeSet::new();

    for combo in cartesian_product(&rows) {
        let mut residue = vec![];
        for (ti, row) in combo.iter().enumerate() {
            residue.extend(row_to_tiles(row, ti));
        }
        let n = (residue.len() - 1) / 3;
        // 読み筋から外れた部分 (取り除いた面子の牌)
        let rest = try_remove_all(hand, &residue).unwrap();

        // 対子・搭子の抜き取りによる読み筋 (くっつき・雀頭無し)
        let pulls: Vec<Vec<ShapePull>> = combo
            .iter()
            .enumerate()
            .map(|(ti, row)| pull_simple_shapes(row, ti).into_iter().collect())
            .collect();
        for pcombo in cartesian_product(&pulls) {
            let mut pairs = vec![];
            let mut taatsus = vec![];
            let mut floats = vec![];
            for (ti, p) in pcombo.iter().enumerate() {
                pairs.extend(p.pairs.iter().map(|&ni| Tile(ti, ni)));
                taatsus.extend(p.taatsus.iter().map(|&(a, b)| (Tile(ti, a), Tile(ti, b))));
                floats.extend(row_to_tiles(&p.rest, ti));
            }
            if shanten_of_reading(n, pairs.len(), taatsus.len()) != s {
                continue;
            }
            let head = !pairs.is_empty();
            let shapes = pairs.len() - head as usize + taatsus.len();
            let needs = n - shapes.min(n);

            if needs >= 1 {
                // くっつき形: 浮き牌が受けの主体
                has_kuttsuki = true;
                kuttsuki.floats.extend(floats.iter().cloned());
                kuttsuki.pair_tiles.extend(pairs.iter().cloned());
                kuttsuki.taatsus.extend(taatsus.iter().cloned());
                for &t in &floats {
                    kuttsuki.tanki_waits.append(&mut kuttsuki_neighborhood(t));
                }
                for &(a, b) in &taatsus {
                    kuttsuki.taatsu_waits.append(&mut get_taatsu_wait(a, b));
                }
            } else if !head {
                // 雀頭無し形: 浮き牌の単騎受けと搭子の受け
                has_headless = true;
                headless_max_taatsus = headless_max_taatsus.max(taatsus.len());
                headless.taatsus.extend(taatsus.iter().cloned());
                headless.floats.extend(floats.iter().cloned());
                let tankis: BTreeSet<Tile> = floats.iter().cloned().collect();
                headless.tanki_waits.extend(tankis.iter().cloned());
                for &(a, b) in &taatsus {
                    headless.taatsu_waits.append(&mut get_taatsu_wait(a, b));
                }
                for e in calc_tanki_wait_extensions(&rest, &tankis) {
                    if !headless.extensions.contains(&e) {
                        headless.extensions.push(e);
                    }
                }
            }
        }

        // 雀頭+ブロックの読み筋 (完全形・浮き牌形)
        if n == s + 1 {
            let bpulls: Vec<Vec<BlockPull>> = combo
                .iter()
                .enumerate()
                .map(|(ti, row)| pull_blocks(row, ti).into_iter().collect())
                .collect();
            for bcombo in cartesian_product(&bpulls) {
                let mut pairs = vec![];
                let mut taatsus = vec![];
                let mut complexes = vec![];
                let mut floats = vec![];
                for (ti, p) in bcombo.iter().enumerate() {
                    pairs.extend(p.pairs.iter().map(|&ni| Tile(ti, ni)));
                    taatsus.extend(p.taatsus.iter().map(|&(a, b)| (Tile(ti, a), Tile(ti, b))));
                    complexes.extend(
                        p.complexes
                            .iter()
                            .map(|c| [Tile(ti, c[0]), Tile(ti, c[1]), Tile(ti, c[2])]),
                    );
                    floats.extend(row_to_tiles(&p.rest, ti));
                }
                if pairs.is_empty() {
                    continue;
                }
                if pairs.len() - 1 + taatsus.len() + complexes.len() != n {
                    continue;
                }

                // 雀頭の選び方ごとに1つの読み筋
                let mut head_prev = None;
                for hi in 0..pairs.len() {
                    let head = pairs[hi];
                    if head_prev == Some(head) {
                        continue;
                    }
                    head_prev = Some(head);

                    let mut simple_shapes: Vec<(Tile, Tile)> = pairs
                        .iter()
                        .enumerate()
                        .filter(|&(i, _)| i != hi)
                        .map(|(_, &t)| (t, t))
                        .collect();
                    simple_shapes.extend(taatsus.iter().cloned());
                    simple_shapes.sort();

                    let mut simple_waits = BTreeSet::new();
                    for &(a, b) in &simple_shapes {
                        simple_waits.append(&mut get_taatsu_wait(a, b));
                    }
                    let mut complex_waits = BTreeSet::new();
                    for c in &complexes {
                        complex_waits.append(&mut get_taatsu_wait(c[0], c[1]));
                        complex_waits.append(&mut get_taatsu_wait(c[1], c[2]));
                    }
                    let mut all_waits: BTreeSet<Tile> = simple_waits.clone();
                    all_waits.extend(complex_waits.iter().cloned());
                    let extensions = calc_wait_extensions(&rest, &all_waits);

                    simples.insert(SimpleReading {
                        pair: head,
                        simples: simple_shapes,
                        complexes: complexes.clone(),
                        floats: floats.clone(),
                        simple_waits,
                        complex_waits,
                        extensions,
                    });
                }
            }
        }
    }

    if has_headless {
        // 同時に抜ける搭子が向聴数ちょうどの場合は搭子不足
        headless.broken = headless_max_taatsus == s;
    }

    ShantenType {
        kuttsuki: if has_kuttsuki { Some(kuttsuki) } else { None },
        headless: if has_headless { Some(headless) } else { None },
        simples: simples.into_iter().collect(),
    }
}

// [聴牌形の分類]

// 雀頭+搭子の聴牌読み筋
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct TaatsuReading {
    pub pair: Tile,
    pub taatsu: (Tile, Tile),
    pub waits: BTreeSet<Tile>,
    pub extensions: Vec<Extension>,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct TenpaiType {
    pub tankis: BTreeSet<Tile>,
    pub tanki_extensions: Vec<Extension>,
    pub taatsu_readings: Vec<TaatsuReading>,
    pub shanpons: BTreeSet<Tile>,
}

// 標準形聴牌の読み筋(単騎・雀頭+搭子・双碰)を列挙
pub fn classify_tenpai(hand: &[Tile]) -> TenpaiType {
    let suits = to_suits(hand);
    let some = eliminate_some_groups(&suits);

    let rows: Vec<Vec<Row>> = some
        .iter()
        .map(|set| set.iter().cloned().collect())
        .collect();

    let mut res = TenpaiType::default();
    let mut taatsu_readings = BTreeSet::new();

    for combo in cartesian_product(&rows) {
        let mut residue = vec![];
        for (ti, row) in combo.iter().enumerate() {
            residue.extend(row_to_tiles(row, ti));
        }

        match residue.len() {
            // 単騎待ち
            1 => {
                let t = residue[0];
                let rest = try_remove_all(hand, &residue).unwrap();
                if res.tankis.insert(t) {
                    let mut tankis = BTreeSet::new();
                    tankis.insert(t);
                    for e in calc_tanki_wait_extensions(&rest, &tankis) {
                        if !res.tanki_extensions.contains(&e) {
                            res.tanki_extensions.push(e);
                        }
                    }
                }
            }
            // 雀頭+搭子 または 双碰
            4 => {
                let tt = tiles_to_tile_table(&residue);
                let mut pairs = vec![];
                let mut rest_tiles = residue.clone();
                for t in &residue {
                    if tt[t.0][t.n()] >= 2 && !pairs.contains(t) {
                        pairs.push(*t);
                    }
                }
                if pairs.len() == 2 && tt[pairs[0].0][pairs[0].n()] == 2 {
                    // 双碰 (2対子)
                    res.shanpons.extend(pairs.iter().cloned());
                    continue;
                }
                if pairs.len() != 1 {
                    continue;
                }
                let pair = pairs[0];
                rest_tiles = try_remove_all(&rest_tiles, &[pair, pair]).unwrap();
                let (a, b) = (rest_tiles[0], rest_tiles[1]);
                if a.0 != b.0 {
                    continue;
                }
                let waits = get_taatsu_wait(a, b);
                if waits.is_empty() || a == b {
                    continue;
                }
                let rest = try_remove_all(hand, &residue).unwrap();
                let extensions = calc_wait_extensions(&rest, &waits);
                taatsu_readings.insert(TaatsuReading {
                    pair,
                    taatsu: (a, b),
                    waits,
                    extensions,
                });
            }
            _ => {}
        }
    }

    res.taatsu_readings = taatsu_readings.into_iter().collect();
    res
}

#[test]
fn test_classify_tenpai() {
    // 三面張: 2つの雀頭+搭子読みが見つかる
    let hand = tiles_from_string("234567m23456p66s").unwrap();
    let tp = classify_tenpai(&hand);
    assert!(tp.tankis.is_empty());
    assert!(tp.shanpons.is_empty());
    assert_eq!(tp.taatsu_readings.len(), 2);

    // 双碰
    let hand = tiles_from_string("123456m789p4477s").unwrap();
    let tp = classify_tenpai(&hand);
    assert_eq!(
        tp.shanpons,
        vec![Tile(TS, 4), Tile(TS, 7)].into_iter().collect()
    );

    // 単騎
    let hand = tiles_from_string("123456789m1112s").unwrap();
    let tp = classify_tenpai(&hand);
    assert!(tp.tankis.contains(&Tile(TS, 2)));
}

#[test]
fn test_classify_iishanten_kuttsuki() {
    // 3面子+雀頭+浮き牌2枚
    let hand = tiles_from_string("123456789m449p5s").unwrap();
    let st = classify_shanten_type(&hand, 1);
    let k = st.kuttsuki.expect("kuttsuki expected");
    assert!(k.floats.contains(&Tile(TP, 9)));
    assert!(k.floats.contains(&Tile(TS, 5)));
    assert!(k.tanki_waits.contains(&Tile(TP, 7)));
    assert!(k.tanki_waits.contains(&Tile(TS, 3)));
    assert!(k.pair_tiles.contains(&Tile(TP, 4)));
}

#[test]
fn test_classify_iishanten_headless() {
    // 3面子+搭子2つ雀頭無し
    let hand = tiles_from_string("234567m2468p678s").unwrap();
    let st = classify_shanten_type(&hand, 1);
    let h = st.headless.expect("headless expected");
    assert!(!h.broken);
    // 単騎受けは読み筋の全牌
    for &ni in &[2, 4, 6, 8] {
        assert!(h.tanki_waits.contains(&Tile(TP, ni)));
    }
    // 搭子の受け
    for &ni in &[3, 5, 7] {
        assert!(h.taatsu_waits.contains(&Tile(TP, ni)));
    }
}

#[test]
fn test_classify_iishanten_simple() {
    // 2面子+雀頭+搭子+複合形 (完全一向聴)
    let hand = tiles_from_string("123456m55p45788s").unwrap();
    let st = classify_shanten_type(&hand, 1);
    assert!(st
        .simples
        .iter()
        .any(|r| r.is_complete() && !r.complexes.is_empty()));
}
