use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::*;
use crate::util::misc::Res;

use super::classify::*;
use super::describe::*;
use super::eliminate::eliminate_all_groups;
use super::shanten::*;
use super::suits::{from_suits, to_suits};
use super::waits::calc_tenpai_waits;

// [手牌解析]
// 解析の入口. 手牌の検証から向聴数・待ち・形の分類・説明文の組み立てまでを束ねる.
// 呼び出しごとに完結した値を返し,呼び出し間で共有する状態は持たない.

pub const LENGTH_ERROR: &str = "The given hand must be of length 4, 7, 10, or 13.";
pub const COPIES_ERROR: &str = "The given hand must not contain more than four copies of any tile.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Archetype {
    Standard,
    Chiitoitsu,
    Kokushi,
}

#[derive(Debug, Serialize)]
pub struct HandAnalysis {
    pub hand: Vec<Tile>,            // 入力手牌 (整列済み, 赤5はそのまま)
    pub shanten: i8,                // 向聴数 (入力不正の場合は-1)
    pub archetypes: Vec<Archetype>, // 最小向聴に到達した形
    pub substates: BTreeSet<Substate>,
    pub waits: BTreeSet<Tile>,
    pub shapes: Vec<String>, // 形の名前
    pub lines: Vec<String>,  // 説明文
}

impl HandAnalysis {
    fn invalid(hand: Vec<Tile>, msg: &str) -> Self {
        Self {
            hand,
            shanten: -1,
            archetypes: vec![],
            substates: BTreeSet::new(),
            waits: BTreeSet::new(),
            shapes: vec![],
            lines: vec![msg.to_string()],
        }
    }
}

// 表記文字列の解析
pub fn analyze_hand_str(exp: &str) -> Res<HandAnalysis> {
    Ok(analyze_hand(&tiles_from_string(exp)?))
}

pub fn analyze_hand(tiles: &[Tile]) -> HandAnalysis {
    let mut hand = tiles.to_vec();
    hand.sort();

    // 長さの検査 解析せずに1行のメッセージを返す
    if !HAND_LENS.contains(&hand.len()) {
        return HandAnalysis::invalid(hand, LENGTH_ERROR);
    }

    // 赤5を正規化して解析
    let mut norm: Vec<Tile> = hand.iter().map(|t| t.to_normal()).collect();
    norm.sort();
    let tt = tiles_to_tile_table(&norm);
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if tt[ti][ni] > TILE {
                return HandAnalysis::invalid(hand, COPIES_ERROR);
            }
        }
    }

    // 3形それぞれの向聴数 全体はその最小値
    let s_std = calc_standard_shanten(&norm);
    let (s_c, c_waits) = if norm.len() == 13 {
        let (s, w) = calc_chiitoitsu_shanten(&tt);
        (Some(s), w.into_iter().collect::<BTreeSet<Tile>>())
    } else {
        (None, BTreeSet::new())
    };
    let (s_k, k_waits) = if norm.len() == 13 {
        let (s, w) = calc_kokushi_shanten(&tt);
        (Some(s), w.into_iter().collect::<BTreeSet<Tile>>())
    } else {
        (None, BTreeSet::new())
    };

    let mut shanten = s_std;
    if let Some(s) = s_c {
        shanten = shanten.min(s);
    }
    if let Some(s) = s_k {
        shanten = shanten.min(s);
    }

    let mut archetypes = vec![];
    if s_std == shanten {
        archetypes.push(Archetype::Standard);
    }
    if s_c == Some(shanten) {
        archetypes.push(Archetype::Chiitoitsu);
    }
    if s_k == Some(shanten) {
        archetypes.push(Archetype::Kokushi);
    }

    let mut lines = vec![format!("Hand: {}", tiles_to_string(&hand))];
    let suits = to_suits(&norm);
    let groupless = eliminate_all_groups(&suits);
    let mut forms: Vec<String> = from_suits(&groupless)
        .iter()
        .map(|h| tiles_to_string(h))
        .collect();
    forms.sort();
    forms.dedup();
    lines.push(format!("Hand with groups removed: {}", forms.join(" or ")));
    lines.push(String::new());

    let mut waits: BTreeSet<Tile> = BTreeSet::new();
    let mut substates: BTreeSet<Substate> = BTreeSet::new();
    let mut shapes: Vec<String> = vec![];

    if shanten == 0 {
        // 聴牌
        if s_std == 0 {
            let t_waits = calc_tenpai_waits(&norm);
            waits.extend(t_waits.iter().cloned());
            let tenpai = classify_tenpai(&norm);
            let (ls, mut ns) = describe_tenpai(&t_waits, &tenpai);
            lines.extend(ls);
            shapes.append(&mut ns);
        }
        if s_c == Some(0) {
            substates.insert(Substate::Chiitoitsu);
            shapes.push("chiitoitsu".to_string());
            if waits.is_empty() {
                lines.push(format!(
                    "This hand is tenpai for chiitoitsu, waiting on the tanki {}.",
                    ps(&c_waits)
                ));
            } else if !c_waits.iter().all(|t| waits.contains(t)) {
                let added: BTreeSet<Tile> = c_waits.difference(&waits).cloned().collect();
                lines.push(String::new());
                lines.push(format!(
                    "This hand is also tenpai for chiitoitsu, adding {} to the wait.",
                    ps(&added)
                ));
            }
            waits.extend(c_waits.iter().cloned());
        }
        if s_k == Some(0) {
            let thirteen = k_waits.len() == 13;
            substates.insert(if thirteen {
                Substate::Kokushi13
            } else {
                Substate::Kokushi
            });
            shapes.push(
                if thirteen {
                    "13-sided kokushi"
                } else {
                    "kokushi"
                }
                .to_string(),
            );
            if thirteen {
                lines.push(format!(
                    "This hand is tenpai for 13-sided kokushi musou, waiting on any terminal/honor tile {}.",
                    ps(&k_waits)
                ));
            } else {
                lines.push(format!(
                    "This hand is tenpai for kokushi musou, waiting on {}.",
                    ps(&k_waits)
                ));
            }
            waits.extend(k_waits.iter().cloned());
        }
    } else if (1..=3).contains(&shanten) {
        if s_std == shanten {
            let st = classify_shanten_type(&norm, shanten);
            substates.extend(st.substates());

            if let Some(k) = &st.kuttsuki {
                lines.extend(describe_kuttsuki(shanten, k));
                shapes.push(format!("sticky {}", shanten_string(shanten)));
                waits.extend(k.taatsu_waits.iter().cloned());
                waits.extend(k.tanki_waits.iter().cloned());
                waits.extend(k.pair_tiles.iter().cloned());
            }
            if let Some(h) = &st.headless {
                let (ls, mut ns) = describe_headless(shanten, h, &waits);
                lines.extend(ls);
                shapes.append(&mut ns);
                shapes.push(format!(
                    "{} {}",
                    if h.broken { "broken headless" } else { "headless" },
                    shanten_string(shanten)
                ));
                waits.extend(h.taatsu_waits.iter().cloned());
                waits.extend(h.tanki_waits.iter().cloned());
                for e in &h.extensions {
                    waits.extend(e.waits.iter().cloned());
                }
            }
            if !st.simples.is_empty() {
                let (ls, mut ns) = describe_simple(shanten, &st.simples, &mut waits);
                lines.extend(ls);
                shapes.append(&mut ns);
            }
        }
        if s_c == Some(shanten) {
            substates.insert(Substate::Chiitoitsu);
            shapes.push(format!("chiitoitsu {}", shanten_string(shanten)));
            lines.extend(describe_chiitoitsu(shanten, &c_waits, &waits));
            waits.extend(c_waits.iter().cloned());
        }
        if s_k == Some(shanten) {
            let thirteen = k_waits.len() == 13;
            substates.insert(if thirteen {
                Substate::Kokushi13
            } else {
                Substate::Kokushi
            });
            shapes.push(format!("kokushi {}", shanten_string(shanten)));
            lines.extend(describe_kokushi(shanten, &k_waits));
            waits.extend(k_waits.iter().cloned());
        }
    } else {
        lines.extend(describe_shanten(s_std, s_c, s_k));
    }

    // 四枚使いの牌はどこからも引けないため待ちから除外する
    if shanten < 2 {
        let mut ankan: BTreeSet<Tile> = BTreeSet::new();
        for ti in 0..TYPE {
            for ni in 1..TNUM {
                if tt[ti][ni] == TILE {
                    ankan.insert(Tile(ti, ni));
                }
            }
        }
        if !ankan.is_empty() {
            let desc = describe_ankan(&ankan, &waits);
            if !desc.is_empty() && lines.len() > 3 {
                lines.push(String::new());
            }
            lines.extend(desc.iter().cloned());
            waits = waits.difference(&ankan).cloned().collect();

            if waits.is_empty() {
                // 待ち牌を自分で使い切った単騎一向聴
                substates.insert(Substate::TankiIishanten);
                shapes.push("tanki iishanten".to_string());
                let mut tanki_waits = BTreeSet::new();
                for ti in 0..TYPE {
                    let nmax = if ti == TZ { ZNUM } else { 9 };
                    for ni in 1..=nmax {
                        if tt[ti][ni] < 3 {
                            tanki_waits.insert(Tile(ti, ni));
                        }
                    }
                }
                if !desc.is_empty() {
                    lines.push(String::new());
                }
                lines.extend(describe_tanki_iishanten(&tanki_waits));
                waits = tanki_waits;
            }
        }
    }

    if !waits.is_empty() {
        lines.insert(2, format!("Total waits: {}", ps(&waits)));
        lines.push(String::new());
        lines.push(format!("This results in an overall wait on {}.", ps(&waits)));
    }

    let mut seen = BTreeSet::new();
    shapes.retain(|s| seen.insert(s.clone()));
    HandAnalysis {
        hand,
        shanten,
        archetypes,
        substates,
        waits,
        shapes,
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::{calc_shanten, is_chiitoitsu_win, is_kokushi_win, is_standard_win};
    use rand::prelude::*;

    fn analyze(exp: &str) -> HandAnalysis {
        analyze_hand_str(exp).unwrap()
    }

    #[test]
    fn test_tenpai_waits_and_shapes() {
        // 三面張
        let res = analyze("234567m23456p66s");
        assert_eq!(res.shanten, 0);
        assert_eq!(ps(&res.waits), "147p");
        assert!(res.shapes.iter().any(|s| s == "sanmenchan"));

        // 両面
        let res = analyze("234567m23488p67s");
        assert_eq!(res.shanten, 0);
        assert_eq!(ps(&res.waits), "58s");
        assert!(res.shapes.iter().any(|s| s == "ryanmen"));

        // のべたん
        let res = analyze("123456789p1234s");
        assert_eq!(ps(&res.waits), "14s");
        assert!(res.shapes.iter().any(|s| s == "nobetan"));

        // 辺単騎
        let res = analyze("123456789p1222s");
        assert_eq!(ps(&res.waits), "13s");
        assert!(res.shapes.iter().any(|s| s == "pentan"));

        // 両単騎
        let res = analyze("123456789p2333s");
        assert_eq!(ps(&res.waits), "124s");
        assert!(res.shapes.iter().any(|s| s == "ryantan"));

        // 竜巻単騎 (4444pは四枚使いで待ちから外れる)
        let res = analyze("3334444555666p");
        assert_eq!(ps(&res.waits), "23567p");
        assert!(res.shapes.iter().any(|s| s == "tatsumaki"));

        // 間間単騎
        let res = analyze("2224444666999p");
        assert_eq!(ps(&res.waits), "35p");
        assert!(res.shapes.iter().any(|s| s == "kankantan"));

        // 三面単騎
        let res = analyze("123456p1234567s");
        assert_eq!(ps(&res.waits), "147s");
        assert!(res.shapes.iter().any(|s| s == "sanmentan"));

        // 亜両面
        let res = analyze("123456p2345677s");
        assert_eq!(ps(&res.waits), "147s");
        assert!(res.shapes.iter().any(|s| s == "aryanmen"));

        // 純正九蓮宝燈
        let res = analyze("1112345678999s");
        assert_eq!(ps(&res.waits), "123456789s");
    }

    #[test]
    fn test_tenpai_combination_shapes() {
        // 三面張+のべたんの複合形
        let res = analyze("2345666m222444p");
        assert_eq!(ps(&res.waits), "12457m");
        assert!(res.lines.iter().any(|l| l.contains("combination")));

        let res = analyze("2223456m222444p");
        assert_eq!(ps(&res.waits), "13467m");
        assert!(res.lines.iter().any(|l| l.contains("combination")));

        // ハッポウビジン
        let res = analyze("2223456777m222p");
        assert_eq!(ps(&res.waits), "12345678m");
        assert!(res.shapes.iter().any(|s| s == "happoubijin"));

        // 三面張 (雀頭+搭子読みが2通り)
        let res = analyze("12345688p34567s");
        assert_eq!(ps(&res.waits), "258s");
        assert!(res.shapes.iter().any(|s| s == "sanmenchan"));
    }

    #[test]
    fn test_iishanten_families() {
        // 雀頭無し
        let res = analyze("234567m2468p678s");
        assert_eq!(res.shanten, 1);
        assert_eq!(ps(&res.waits), "2345678p");
        assert!(res.substates.contains(&Substate::Headless));

        // くっつき+雀頭無し
        let res = analyze("445789p3455789s");
        assert_eq!(res.shanten, 1);
        assert_eq!(ps(&res.waits), "34567p234567s");
        assert!(res.substates.contains(&Substate::Kuttsuki));

        // 雀頭無し+延長
        let res = analyze("23455667m56p678s");
        assert_eq!(ps(&res.waits), "12345678m4567p");

        // 浮き牌形+延長2つ
        let res = analyze("7m45678p23456s11z");
        assert_eq!(ps(&res.waits), "369p147s");
        assert!(res.substates.contains(&Substate::FloatingSimple));

        // 雀頭無し+三暗刻くずれの延長
        let res = analyze("123456m55568p12s");
        assert_eq!(ps(&res.waits), "4678p123s");

        // 雀頭無しくずれ(搭子不足)+延長
        let res = analyze("3334555m12678p1z");
        assert_eq!(ps(&res.waits), "23456m3p1z");
        assert!(res.substates.contains(&Substate::BrokenHeadless));
        assert!(res.shapes.iter().any(|s| s == "tatsumaki"));

        // 七対子と標準形の複合
        let res = analyze("1122345588899m");
        assert_eq!(res.shanten, 1);
        assert_eq!(ps(&res.waits), "1234569m");
        assert!(res.substates.contains(&Substate::Chiitoitsu));
        assert!(res.substates.contains(&Substate::CompleteSimple));
        assert!(res
            .archetypes
            .contains(&Archetype::Chiitoitsu));
    }

    #[test]
    fn test_ryanshanten_families() {
        // くっつき両向聴
        let res = analyze("123789m2267p1s23z");
        assert_eq!(res.shanten, 2);
        assert_eq!(ps(&res.waits), "258p123s23z");
        assert!(res.substates.contains(&Substate::Kuttsuki));

        // 雀頭すら無いくっつき両向聴
        let res = analyze("123789m23458p1s2z");
        assert_eq!(res.shanten, 2);
        assert_eq!(ps(&res.waits), "123456789p123s2z");
    }

    #[test]
    fn test_kokushi_analysis() {
        // 国士無双十三面
        let res = analyze("19m19p19s1234567z");
        assert_eq!(res.shanten, 0);
        assert_eq!(res.waits.len(), 13);
        assert_eq!(res.archetypes, vec![Archetype::Kokushi]);
        assert!(res.substates.contains(&Substate::Kokushi13));

        // 国士無双の単騎待ち
        let res = analyze("19m19p19s112345z");
        assert_eq!(res.shanten, 0);
        assert_eq!(ps(&res.waits), "7z");
    }

    #[test]
    fn test_invalid_input() {
        // 長さ不正: 1行のメッセージのみを返し解析は行わない
        let res = analyze("23456m");
        assert_eq!(res.shanten, -1);
        assert!(res.waits.is_empty());
        assert_eq!(res.lines, vec![LENGTH_ERROR.to_string()]);

        // 5枚以上の同種牌
        let res = analyze_hand(&[
            Tile(TM, 1),
            Tile(TM, 1),
            Tile(TM, 1),
            Tile(TM, 1),
            Tile(TM, 1),
            Tile(TM, 2),
            Tile(TM, 3),
        ]);
        assert_eq!(res.shanten, -1);
        assert_eq!(res.lines, vec![COPIES_ERROR.to_string()]);

        // 表記の不正はResのエラー
        assert!(analyze_hand_str("123456789m123x").is_err());
    }

    #[test]
    fn test_ankan_tanki_iishanten() {
        // 四枚使いの単騎待ち: 待ちが消えて単騎一向聴になる
        let res = analyze("123m5555p456789s");
        assert_eq!(res.shanten, 0);
        assert!(!res.waits.contains(&Tile(TP, 5)));
        assert!(res.substates.contains(&Substate::TankiIishanten));
        // 5p以外の33種すべてが待ち
        assert_eq!(res.waits.len(), 33);
        assert!(res.lines.iter().any(|l| l.contains("tanki iishanten")));
    }

    #[test]
    fn test_red_five_normalization() {
        // 赤5は解析上は通常の5と同じ
        let a = analyze("234567m23456p66s");
        let b = analyze("234067m23456p66s");
        assert_eq!(a.shanten, b.shanten);
        assert_eq!(a.waits, b.waits);
        // 表示は赤5のまま
        assert!(b.lines[0].contains("234067m"));
    }

    #[test]
    fn test_determinism() {
        // 同じ手牌に対して常に同じ結果を返す
        for exp in &["234567m23456p66s", "1122345588899m", "123789m2267p1s23z"] {
            let a = analyze(exp);
            let b = analyze(exp);
            assert_eq!(a.lines, b.lines);
            assert_eq!(a.waits, b.waits);
            assert_eq!(a.shapes, b.shapes);
        }
    }

    // シャッフルした牌山から13枚の手牌を作る
    fn create_wall(seed: u64) -> Vec<Tile> {
        let mut wall = Vec::new();
        for ti in 0..TYPE {
            for ni in 1..TNUM {
                if ti == TZ && ni > ZNUM {
                    break;
                }
                for _ in 0..TILE {
                    wall.push(Tile(ti, ni));
                }
            }
        }

        let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(seed);
        wall.shuffle(&mut rng);
        wall
    }

    // 面子3つ+4枚のランダムな手牌 (聴牌か一向聴近辺の形になりやすい)
    fn create_near_ready_hand(seed: u64) -> Vec<Tile> {
        let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(seed);
        let mut pool = TileTable::default();
        for ti in 0..TYPE {
            let nmax = if ti == TZ { ZNUM } else { 9 };
            for ni in 1..=nmax {
                pool[ti][ni] = TILE;
            }
        }

        let mut hand = vec![];
        while hand.len() < 9 {
            let ti = rng.gen_range(0..TYPE);
            if ti != TZ && rng.gen_bool(0.5) {
                // 順子
                let ni = rng.gen_range(1..8);
                if (0..3).all(|d| pool[ti][ni + d] > 0) {
                    for d in 0..3 {
                        pool[ti][ni + d] -= 1;
                        hand.push(Tile(ti, ni + d));
                    }
                }
            } else {
                // 刻子
                let nmax = if ti == TZ { ZNUM } else { 9 };
                let ni = rng.gen_range(1..=nmax);
                if pool[ti][ni] >= 3 {
                    pool[ti][ni] -= 3;
                    for _ in 0..3 {
                        hand.push(Tile(ti, ni));
                    }
                }
            }
        }
        while hand.len() < 13 {
            let ti = rng.gen_range(0..TYPE);
            let nmax = if ti == TZ { ZNUM } else { 9 };
            let ni = rng.gen_range(1..=nmax);
            if pool[ti][ni] > 0 {
                pool[ti][ni] -= 1;
                hand.push(Tile(ti, ni));
            }
        }

        hand.sort();
        hand
    }

    fn check_wait_soundness(hand: &[Tile], seed: u64) {
        let res = analyze_hand(hand);

        // 四枚使いの牌は待ちに現れない
        let tt = tiles_to_tile_table(hand);
        for ti in 0..TYPE {
            for ni in 1..TNUM {
                if tt[ti][ni] == TILE {
                    assert!(!res.waits.contains(&Tile(ti, ni)));
                }
            }
        }

        if res.substates.contains(&Substate::TankiIishanten) {
            return;
        }

        match res.shanten {
            // 聴牌: 待ち牌を加えると必ずいずれかの和了形になる
            0 => {
                for &t in &res.waits {
                    let mut h = hand.to_vec();
                    h.push(t);
                    let tt2 = tiles_to_tile_table(&h);
                    let win =
                        is_standard_win(&h) || is_chiitoitsu_win(&tt2) || is_kokushi_win(&tt2);
                    assert!(win, "seed {}: wait {} does not win", seed, t);
                }
                // 待ち以外の牌では和了しない
                for ti in 0..TYPE {
                    let nmax = if ti == TZ { ZNUM } else { 9 };
                    for ni in 1..=nmax {
                        let t = Tile(ti, ni);
                        if res.waits.contains(&t) || tt[ti][ni] >= TILE {
                            continue;
                        }
                        let mut h = hand.to_vec();
                        h.push(t);
                        let tt2 = tiles_to_tile_table(&h);
                        assert!(
                            !is_standard_win(&h) && !is_chiitoitsu_win(&tt2),
                            "seed {}: non-wait {} wins",
                            seed,
                            t
                        );
                    }
                }
            }
            // 一向聴: 待ち牌を加えると何かを切って聴牌になる
            1 => {
                for &t in &res.waits {
                    let mut h = hand.to_vec();
                    h.push(t);
                    let mut ok = false;
                    let mut tried = vec![];
                    for i in 0..h.len() {
                        if tried.contains(&h[i]) {
                            continue;
                        }
                        tried.push(h[i]);
                        let mut h2 = h.clone();
                        h2.remove(i);
                        if calc_shanten(&h2) == 0 {
                            ok = true;
                            break;
                        }
                    }
                    assert!(ok, "seed {}: wait {} does not advance", seed, t);
                }
            }
            _ => {}
        }
    }

    #[test]
    fn test_random_hands_wait_soundness() {
        for seed in 0..16 {
            let hand = create_wall(seed)[0..13].to_vec();
            let mut sorted = hand.clone();
            sorted.sort();
            check_wait_soundness(&sorted, seed);
        }
        for seed in 100..140 {
            let hand = create_near_ready_hand(seed);
            check_wait_soundness(&hand, seed);
        }
    }
}
