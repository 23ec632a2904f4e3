use std::collections::{BTreeMap, BTreeSet};

use crate::model::*;

use super::classify::*;
use super::waits::Extension;

// [説明文の組み立て]
// 構造化された解析結果から英語の説明文を組み立てる. 計算は行わない純粋な整形処理.
// 同じ入力に対して常に同じ文面を返す.

pub(crate) fn shanten_string(shanten: i8) -> &'static str {
    match shanten {
        1 => "iishanten",
        2 => "ryanshanten",
        3 => "sanshanten",
        _ => panic!("no shanten string for {}", shanten),
    }
}

// 牌1枚の表示
fn pt(t: Tile) -> String {
    t.to_string()
}

// 牌の集合の表示 (整列済み)
pub(crate) fn ps(tiles: &BTreeSet<Tile>) -> String {
    let v: Vec<Tile> = tiles.iter().cloned().collect();
    tiles_to_string(&v)
}

// 牌のリストの表示 (整列して表示)
fn pl(tiles: &[Tile]) -> String {
    let mut v = tiles.to_vec();
    v.sort();
    tiles_to_string(&v)
}

// 2枚形のリストの表示
fn pshapes(shapes: &[(Tile, Tile)]) -> String {
    shapes
        .iter()
        .map(|&(a, b)| tiles_to_string(&[a, b]))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_ryanmen(a: Tile, b: Tile) -> bool {
    a.0 == b.0 && b.1 == a.1 + 1 && a.1 != 1 && a.1 != 8 && a.is_suit()
}

// 形の個数と内容をまとめた説明句
fn get_shape_str(
    max_shapes: usize,
    simple_shapes: &[(Tile, Tile)],
    complex_shapes: &[[Tile; 3]],
    pair: Option<Tile>,
    max_floating: usize,
    floating_tiles: &[Tile],
) -> String {
    let shape_num = simple_shapes.len() + complex_shapes.len();
    let simple_shape_has_pair = simple_shapes.iter().any(|&(a, b)| a == b);

    let mut shape_str = String::new();
    if shape_num > 0 && max_shapes > 0 {
        let s = if shape_num != 1 { "s" } else { "" };
        let mut shapes_disp: Vec<String> = simple_shapes
            .iter()
            .map(|&(a, b)| tiles_to_string(&[a, b]))
            .collect();
        shapes_disp.extend(complex_shapes.iter().map(|c| tiles_to_string(c)));
        let shapes_disp = shapes_disp.join(" ");

        shape_str = if complex_shapes.is_empty() {
            if simple_shape_has_pair {
                format!("pair{}/simple shape{} {}", s, s, shapes_disp)
            } else {
                format!("simple shape{} {}", s, shapes_disp)
            }
        } else if simple_shapes.is_empty() {
            format!("complex shape{} {}", s, shapes_disp)
        } else {
            format!("simple and complex shape{} {}", s, shapes_disp)
        };
        let shape_num_str = if shape_num > max_shapes {
            format!("{}+", max_shapes)
        } else if shape_num == 1 {
            "a".to_string()
        } else {
            shape_num.to_string()
        };
        shape_str = format!("{} {}", shape_num_str, shape_str);
    }

    let pair_str = if let Some(p) = pair {
        format!("a pair {}", tiles_to_string(&[p, p]))
    } else if !simple_shape_has_pair && shape_num > 0 {
        "no pairs".to_string()
    } else {
        String::new()
    };

    let floating_num = floating_tiles.len();
    let floating_num_str = if floating_num > max_floating {
        format!("{}+", max_floating)
    } else if floating_num == 1 {
        "a".to_string()
    } else {
        floating_num.to_string()
    };
    let floating_str = if floating_num > 0 {
        format!("{} floating {}", floating_num_str, pl(floating_tiles))
    } else {
        "no floating tiles".to_string()
    };

    [shape_str, pair_str, floating_str]
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" and ")
}

// [待ちの延長の説明]
// 延長の一覧から説明文と名前のついた形(のべたん・三面張など)を導出する.
// 複合形(ハッポウビジン等)を先に判定し,該当した場合は部分形の名前を出さない.
pub(crate) fn describe_extensions(
    waits: &mut BTreeSet<Tile>,
    extensions: &[Extension],
    tanki_extensions: &[Extension],
) -> (Vec<String>, Vec<String>) {
    let mut ret = vec![];
    let mut names = vec![];
    let mut used_sequence = false;
    let mut used_adj_sequence = false;
    let mut used_triplet = false;
    let mut extend_text: Vec<String> = vec![];
    // (待ち牌, 単騎か) => 待ち牌から見た面子の相対位置の一覧
    let mut catalog: BTreeMap<(Tile, bool), Vec<[isize; 3]>> = BTreeMap::new();

    let all: Vec<(&Extension, bool)> = extensions
        .iter()
        .map(|e| (e, false))
        .chain(tanki_extensions.iter().map(|e| (e, true)))
        .collect();

    for (e, is_tanki) in all {
        let w = e.tile.1 as isize;
        let rel = [
            e.group[0].1 as isize - w,
            e.group[1].1 as isize - w,
            e.group[2].1 as isize - w,
        ];
        catalog.entry((e.tile, is_tanki)).or_default().push(rel);

        // この面子の延長がすべて既知の待ちなら説明は省略
        if e.waits.iter().all(|t| waits.contains(t)) {
            continue;
        }

        let is_triplet = e.group[0] == e.group[1];
        if is_triplet {
            used_triplet = true;
        } else if !e.group.contains(&e.tile) {
            used_adj_sequence = true;
        } else {
            used_sequence = true;
        }

        extend_text.push(format!(
            "the {} {} extends the {} wait to {}",
            if is_triplet { "triplet" } else { "sequence" },
            tiles_to_string(&e.group),
            pt(e.tile),
            ps(&e.waits)
        ));
        waits.extend(e.waits.iter().cloned());
    }

    if extend_text.len() > 1 {
        let last = extend_text.len() - 1;
        extend_text[last] = format!("and {}", extend_text[last]);
    }

    // 表示用: 待ち牌からの相対位置を実際の牌の並びに変換
    let pg = |wait: Tile, offs: &[isize]| -> String {
        let tiles: Vec<Tile> = offs
            .iter()
            .filter(|&&o| (1..=9).contains(&(wait.1 as isize + o)))
            .map(|&o| Tile(wait.0, (wait.1 as isize + o) as usize))
            .collect();
        tiles_to_string(&tiles)
    };

    let mut named: Vec<String> = vec![];
    let mut ignore_nobetan = false;
    let mut ignore_ryantan_pentan = false;
    let mut ignore_sanmenchan = false;

    // 1段階目: 入れ子になった形の組み合わせ (他の名前に優先する)
    for (&(wait, is_tanki), groups) in &catalog {
        let left_triplet = groups.contains(&[-1, -1, -1]);
        let right_adj_sequence = groups.contains(&[1, 2, 3]);
        let mut is_happoubijin = false;
        let mut is_2223456 = false;
        let mut is_2345666 = false;
        if is_tanki && right_adj_sequence {
            if wait.1 + 3 <= 9 {
                let suji = (Tile(wait.0, wait.1 + 3), true);
                if let Some(sg) = catalog.get(&suji) {
                    if sg.contains(&[1, 1, 1]) {
                        if left_triplet {
                            is_happoubijin = true;
                        } else {
                            is_2345666 = true;
                        }
                    }
                }
            }
            if left_triplet {
                is_2223456 = true;
            }
        }

        if is_happoubijin || is_2223456 || is_2345666 {
            ignore_nobetan = true;
            ignore_ryantan_pentan = true;
            ignore_sanmenchan = true;
        }

        if is_happoubijin {
            names.push("happoubijin".to_string());
            named.push(format!(
                "The extended shape {} is often called **happoubijin**, waiting on {}.",
                pg(wait, &[-1, -1, -1, 0, 1, 2, 3, 4, 4, 4]),
                pg(wait, &[-2, -1, 0, 1, 2, 3, 4, 5])
            ));
        } else if is_2223456 {
            names.push("sanmenchan".to_string());
            names.push("nobetan".to_string());
            named.push(format!(
                "The extended shape {} is often seen as a combination of the **sanmenchan** {} and **nobetan** {} shapes, waiting on {}.",
                pg(wait, &[-1, -1, -1, 0, 1, 2, 3]),
                pg(wait, &[-1, 0, 1, 2, 3]),
                pg(wait, &[0, 1, 2, 3]),
                pg(wait, &[-2, 0, 1, 3, 4])
            ));
        } else if is_2345666 {
            names.push("sanmenchan".to_string());
            names.push("nobetan".to_string());
            named.push(format!(
                "The extended shape {} is often seen as a combination of the **sanmenchan** {} and **nobetan** {} shapes, waiting on {}.",
                pg(wait, &[0, 1, 2, 3, 4, 4, 4]),
                pg(wait, &[0, 1, 2, 3, 4]),
                pg(wait, &[0, 1, 2, 3]),
                pg(wait, &[-1, 0, 2, 3, 5])
            ));
        }
    }

    // 2段階目: 単体の名前 重複を避けるため左端かつ延長数の多い待ちから判定する
    let mut entries: Vec<(&(Tile, bool), &Vec<[isize; 3]>)> = catalog.iter().collect();
    entries.sort_by_key(|e| -10 * (e.1.len() as isize) + ((e.0).0).1 as isize);

    for (&(wait, is_tanki), groups) in entries {
        let left_triplet = groups.contains(&[-1, -1, -1]);
        let right_triplet = groups.contains(&[1, 1, 1]);
        let left_left_triplet = groups.contains(&[-2, -2, -2]);
        let right_right_triplet = groups.contains(&[2, 2, 2]);
        let right_sequence = groups.contains(&[0, 1, 2]);
        let left_sequence = groups.contains(&[-2, -1, 0]);
        let right_adj_sequence = groups.contains(&[1, 2, 3]);
        let right_adj_sequence2 = groups.contains(&[4, 5, 6]);

        if left_triplet && right_triplet {
            names.push("tatsumaki".to_string());
            named.push(format!(
                "The extended tanki shape {} is often called **tatsumaki**, waiting on {}.",
                pg(wait, &[-1, -1, -1, 0, 1, 1, 1]),
                pg(wait, &[-2, -1, 0, 1, 2])
            ));
        } else if left_left_triplet && right_right_triplet {
            names.push("kankantan".to_string());
            named.push(format!(
                "The extended tanki shape {} is often called **kankantan**, waiting on {}.",
                pg(wait, &[-2, -2, -2, 0, 2, 2, 2]),
                pg(wait, &[-1, 0, 1])
            ));
        } else if left_triplet && !ignore_ryantan_pentan {
            if wait.1 <= 8 && wait.1 >= 3 {
                names.push("ryantan".to_string());
                named.push(format!(
                    "The extended tanki shape {} is often called **ryantan**, waiting on {}.",
                    pg(wait, &[-1, -1, -1, 0]),
                    pg(wait, &[-2, 0, 1])
                ));
            } else if wait.1 == 9 {
                names.push("pentan".to_string());
                named.push(format!(
                    "The extended tanki shape {} is often called **pentan**, waiting on {}.",
                    pg(wait, &[-1, -1, -1, 0]),
                    pg(wait, &[-2, 0])
                ));
            } else {
                names.push("pentan".to_string());
                named.push(format!(
                    "The extended tanki shape {} is often called **pentan**, waiting on {}.",
                    pg(wait, &[-1, -1, -1, 0]),
                    pg(wait, &[0, 1])
                ));
            }
        } else if right_triplet && !ignore_ryantan_pentan {
            if wait.1 >= 2 && wait.1 <= 7 {
                names.push("ryantan".to_string());
                named.push(format!(
                    "The extended tanki shape {} is often called **ryantan**, waiting on {}.",
                    pg(wait, &[0, 1, 1, 1]),
                    pg(wait, &[-1, 0, 2])
                ));
            } else if wait.1 == 1 {
                names.push("pentan".to_string());
                named.push(format!(
                    "The extended tanki shape {} is often called **pentan**, waiting on {}.",
                    pg(wait, &[0, 1, 1, 1]),
                    pg(wait, &[0, 2])
                ));
            } else {
                names.push("pentan".to_string());
                named.push(format!(
                    "The extended tanki shape {} is often called **pentan**, waiting on {}.",
                    pg(wait, &[0, 1, 1, 1]),
                    pg(wait, &[-1, 0])
                ));
            }
        } else if left_left_triplet {
            names.push("kantan".to_string());
            named.push(format!(
                "The extended tanki shape {} is often called **kantan**, waiting on {}.",
                pg(wait, &[-2, -2, -2, 0]),
                pg(wait, &[-1, 0])
            ));
        } else if right_right_triplet {
            names.push("kantan".to_string());
            named.push(format!(
                "The extended tanki shape {} is often called **kantan**, waiting on {}.",
                pg(wait, &[0, 2, 2, 2]),
                pg(wait, &[0, 1])
            ));
        }

        if right_adj_sequence && !ignore_nobetan {
            if right_adj_sequence2 {
                names.push("sanmentan".to_string());
                named.push(format!(
                    "The extended tanki shape {} is often called **sanmentan**, waiting on {}.",
                    pg(wait, &[0, 1, 2, 3, 4, 5, 6]),
                    pg(wait, &[0, 3, 6])
                ));
                ignore_nobetan = true;
            } else {
                names.push("nobetan".to_string());
                named.push(format!(
                    "The extended tanki shape {} is often called **nobetan**, waiting on {}.",
                    pg(wait, &[0, 1, 2, 3]),
                    pg(wait, &[0, 3])
                ));
            }
        } else if left_sequence && is_tanki {
            names.push("aryanmen".to_string());
            named.push(format!(
                "The extended tanki shape {} is often called **aryanmen**, waiting on {}.",
                pg(wait, &[-2, -1, 0, 0]),
                pg(wait, &[-3, 0])
            ));
        } else if left_sequence && right_sequence && !ignore_sanmenchan {
            names.push("sanmenchan".to_string());
            named.push(format!(
                "The extended shape {} is often called **sanmenchan**, waiting on {}.",
                pg(wait, &[-2, -1, 0, 1, 2]),
                pg(wait, &[-3, 0, 3])
            ));
        } else if right_sequence && is_tanki {
            names.push("aryanmen".to_string());
            named.push(format!(
                "The extended tanki shape {} is often called **aryanmen**, waiting on {}.",
                pg(wait, &[0, 0, 1, 2]),
                pg(wait, &[0, 3])
            ));
        }
    }

    if !named.is_empty() {
        named[0] = format!("Note that t{}", &named[0][1..]);
    }
    if named.len() > 1 {
        let last = named.len() - 1;
        named[last] = format!("And t{}", &named[last][1..]);
    }

    let mut explain_text: Vec<String> = vec![];
    if used_sequence {
        explain_text
            .push("sequences in hand can extend the waits if one of their ends overlaps a wait".to_string());
    }
    if used_adj_sequence {
        if used_sequence {
            explain_text.push("or is adjacent to a tanki wait".to_string());
        } else {
            explain_text.push(
                "sequences in hand can extend a tanki wait if one of their ends is adjacent to the tanki wait"
                    .to_string(),
            );
        }
    }
    if used_triplet {
        explain_text.push("any triplet near a tanki wait extends a tanki wait".to_string());
    }
    if explain_text.len() > 1 {
        let last = explain_text.len() - 1;
        if !explain_text[last].starts_with("or ") {
            explain_text[last] = format!("and {}", explain_text[last]);
        }
    }

    if !extend_text.is_empty() {
        let mut explain = explain_text.join(", ");
        if let Some(c) = explain.get(0..1) {
            explain = format!("{}{}", c.to_uppercase(), &explain[1..]);
        }
        ret.push(String::new());
        ret.push(format!("{}.", explain));
        ret.push(format!(" In particular, {}.", extend_text.join(", ")));
    }
    if !named.is_empty() {
        ret.push(String::new());
        ret.push(named.join(" "));
    }

    (ret, names)
}

// [聴牌の説明]
pub(crate) fn describe_tenpai(
    all_waits: &BTreeSet<Tile>,
    tenpai: &TenpaiType,
) -> (Vec<String>, Vec<String>) {
    let mut ret = vec![format!("This hand is tenpai, waiting on {}.", ps(all_waits))];
    let mut names = vec![];

    let mut orig_waits: BTreeSet<Tile> = BTreeSet::new();
    let mut waits: BTreeSet<Tile> = BTreeSet::new();
    let mut extensions: Vec<Extension> = vec![];

    if !tenpai.tankis.is_empty() {
        let tanki_tiles: Vec<Tile> = tenpai.tankis.iter().cloned().collect();
        let s = if tanki_tiles.len() != 1 { "s" } else { "" };
        ret.push(String::new());
        ret.push(format!(
            "The waits for this hand include the tanki wait{} {}.",
            s,
            tiles_to_string(&tanki_tiles)
        ));
        names.push("tanki".to_string());
        waits.extend(tanki_tiles.iter().cloned());
        orig_waits.extend(tanki_tiles.iter().cloned());
        for e in &tenpai.tanki_extensions {
            waits.extend(e.waits.iter().cloned());
        }
    }

    // 雀頭+搭子の読み筋: 新しい待ちを生む順に選んでいく
    let mut taatsus_used: Vec<(Tile, Tile)> = vec![];
    let mut taatsu_waits: BTreeSet<Tile> = BTreeSet::new();
    {
        let mut cands: Vec<&TaatsuReading> = tenpai
            .taatsu_readings
            .iter()
            .filter(|r| {
                let mut all: BTreeSet<Tile> = r.waits.clone();
                for e in &r.extensions {
                    all.extend(e.waits.iter().cloned());
                }
                !all.iter().all(|t| waits.contains(t))
            })
            .collect();

        let n_waits = |r: &TaatsuReading, waits: &BTreeSet<Tile>| {
            let mut all: BTreeSet<Tile> = r.waits.clone();
            for e in &r.extensions {
                all.extend(e.waits.iter().cloned());
            }
            all.difference(waits).count()
        };

        while !cands.is_empty() {
            cands.sort_by_key(|&r| -((10 * n_waits(r, &waits) + r.waits.len()) as isize));
            let r = cands.remove(0);
            if !taatsus_used.contains(&r.taatsu) {
                taatsus_used.push(r.taatsu);
            }
            taatsu_waits.extend(r.waits.iter().cloned());
            waits.extend(r.waits.iter().cloned());
            for e in &r.extensions {
                if !extensions.contains(e) {
                    extensions.push(e.clone());
                }
            }
            cands.retain(|&r| n_waits(r, &waits) != 0);
        }
    }

    if !taatsus_used.is_empty() && !taatsu_waits.iter().all(|t| orig_waits.contains(t)) {
        taatsus_used.sort();
        let s = if taatsus_used.len() != 1 { "s" } else { "" };
        let also = if !tenpai.tankis.is_empty() { "also " } else { "" };
        let added: BTreeSet<Tile> = taatsu_waits.difference(&orig_waits).cloned().collect();
        ret.push(String::new());
        ret.push(format!(
            "This hand {}has the simple shape{} {}, adding {} to the wait.",
            also,
            s,
            pshapes(&taatsus_used),
            ps(&added)
        ));
        for &(a, b) in &taatsus_used {
            names.push(
                if a == b {
                    "shanpon"
                } else if b.1 == a.1 + 2 {
                    "kanchan"
                } else if is_ryanmen(a, b) {
                    "ryanmen"
                } else {
                    "penchan"
                }
                .to_string(),
            );
        }
        orig_waits.extend(taatsu_waits.iter().cloned());
    }

    if !tenpai.shanpons.is_empty() {
        let shanpon_waits = tenpai.shanpons.clone();
        if !shanpon_waits.iter().all(|t| waits.contains(t)) {
            let also = if !tenpai.tankis.is_empty() || !taatsus_used.is_empty() {
                "also "
            } else {
                ""
            };
            let added: BTreeSet<Tile> = shanpon_waits.difference(&waits).cloned().collect();
            let pairs_disp: Vec<String> = shanpon_waits
                .iter()
                .map(|&t| tiles_to_string(&[t, t]))
                .collect();
            ret.push(String::new());
            ret.push(format!(
                "This hand {}has the shanpon {}, adding {} to the wait.",
                also,
                pairs_disp.join(" "),
                ps(&added)
            ));
            names.push("shanpon".to_string());
            orig_waits.extend(shanpon_waits.iter().cloned());
        }
    }

    let (lines, mut ext_names) = describe_extensions(&mut orig_waits, &extensions, &tenpai.tanki_extensions);
    ret.extend(lines);
    names.append(&mut ext_names);

    (ret, names)
}

// [くっつき形の説明]
pub(crate) fn describe_kuttsuki(shanten: i8, info: &KuttsukiInfo) -> Vec<String> {
    let s = shanten as usize;
    let floats: Vec<Tile> = info.floats.iter().cloned().collect();
    let taatsus: Vec<(Tile, Tile)> = info.taatsus.iter().cloned().collect();
    let pair = info.pair_tiles.iter().next().cloned();
    let sh = shanten_string(shanten);

    let shape_str = get_shape_str(
        if shanten == 1 { 0 } else { 1 },
        &taatsus,
        &[],
        pair,
        s * 2,
        &floats,
    );
    let mut ret = vec![format!(
        "Due to having {}, this hand is best described as **sticky {}**.",
        shape_str, sh
    )];

    let ps_ = if info.pair_tiles.len() != 1 { "s" } else { "" };
    let ss = if info.taatsus.len() != 1 { "s" } else { "" };
    let pair_string = if info.pair_tiles.is_empty() {
        String::new()
    } else {
        format!("pair{} {}", ps_, ps(&info.pair_tiles))
    };
    let taatsu_string = if info.taatsus.is_empty() {
        String::new()
    } else {
        format!("simple shape{} {}", ss, ps(&info.taatsu_waits))
    };
    let mut extra_wait_str = [pair_string, taatsu_string]
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" and ");
    if !extra_wait_str.is_empty() {
        extra_wait_str = format!(", as well as the waits of its {}", extra_wait_str);
    }

    ret.push(String::new());
    ret.push(format!(
        "The waits for sticky {} are the tiles 0-2 away from each floating tile, which altogether are {}{}.",
        sh,
        ps(&info.tanki_waits),
        extra_wait_str
    ));

    ret
}

// [雀頭無し形の説明]
pub(crate) fn describe_headless(
    shanten: i8,
    info: &HeadlessInfo,
    waits: &BTreeSet<Tile>,
) -> (Vec<String>, Vec<String>) {
    let s = shanten as usize;
    let taatsus: Vec<(Tile, Tile)> = info.taatsus.iter().cloned().collect();
    let floats: Vec<Tile> = info.floats.iter().cloned().collect();
    let sh = shanten_string(shanten);
    let shape_str = get_shape_str(s + 1, &taatsus, &[], None, s + 1, &floats);
    let kind = if info.broken { "broken headless" } else { "headless" };

    let mut own_waits: BTreeSet<Tile> = info.tanki_waits.clone();
    own_waits.extend(info.taatsu_waits.iter().cloned());

    let mut ret = vec![];
    if waits.is_empty() {
        ret.push(format!(
            "Due to having {}, this hand is best described as **{} {}**.",
            shape_str, kind, sh
        ));
    } else if !own_waits.iter().all(|t| waits.contains(t)) {
        ret.push(String::new());
        ret.push(format!(
            "This hand can also be interpreted as having {}, which means this hand is also **{} {}**.",
            shape_str, kind, sh
        ));
    } else {
        return (vec![], vec![]);
    }

    let add_string = if waits.is_empty() {
        String::new()
    } else {
        let added: BTreeSet<Tile> = own_waits.difference(waits).cloned().collect();
        format!(", adding {} to the wait", ps(&added))
    };
    ret.push(String::new());
    ret.push(format!(
        "The waits for {} {} are tanki waits on {}: {} as well as the simple shape waits themselves: {}{}.",
        kind,
        sh,
        if info.broken { "the floating tiles" } else { "each tile" },
        ps(&info.tanki_waits),
        ps(&info.taatsu_waits),
        add_string
    ));

    let mut combined: BTreeSet<Tile> = waits.clone();
    combined.extend(own_waits.iter().cloned());
    let (lines, names) = describe_extensions(&mut combined, &[], &info.extensions);
    ret.extend(lines);

    (ret, names)
}

// [完全形・浮き牌形の説明]
// 新しい待ちを生む読み筋から順に説明し,待ちが既出のものは省略する
pub(crate) fn describe_simple(
    shanten: i8,
    readings: &[SimpleReading],
    waits: &mut BTreeSet<Tile>,
) -> (Vec<String>, Vec<String>) {
    let sh = shanten_string(shanten);
    let s = shanten as usize;
    let mut ret = vec![];
    let mut names = vec![];

    let n_waits = |r: &SimpleReading, waits: &BTreeSet<Tile>| {
        r.all_waits().difference(waits).count()
    };

    let mut cands: Vec<&SimpleReading> = readings.iter().collect();
    while !cands.is_empty() {
        cands.sort_by_key(|&r| -((10 * n_waits(r, waits) + r.complexes.len()) as isize));
        let r = cands.remove(0);
        add_simple_reading(shanten, sh, s, r, waits, &mut ret, &mut names);
        cands.retain(|&r| n_waits(r, waits) != 0);
    }

    (ret, names)
}

fn add_simple_reading(
    shanten: i8,
    sh: &str,
    s: usize,
    r: &SimpleReading,
    waits: &mut BTreeSet<Tile>,
    ret: &mut Vec<String>,
    names: &mut Vec<String>,
) {
    let is_complete = r.is_complete();
    let kind = if is_complete { "complete" } else { "floating tile" };

    // 両面+両面含みの複合形は「完全一向聴」と呼ばれる形
    let mut perfect_str = String::new();
    if shanten == 1 && !r.complexes.is_empty() && r.simples.len() == 1 {
        let (a, b) = r.simples[0];
        let c = &r.complexes[0];
        let is_perfect =
            is_ryanmen(a, b) && (is_ryanmen(c[0], c[1]) || is_ryanmen(c[1], c[2]));
        if is_perfect {
            perfect_str = "\n\nThis ryanmen-ryanmen form of complete iishanten is also known as **perfect iishanten**.\n".to_string();
            names.push("perfect iishanten".to_string());
        }
    }

    let shape_str = get_shape_str(s + 1, &r.simples, &r.complexes, Some(r.pair), 100, &r.floats);
    let mut own: BTreeSet<Tile> = r.simple_waits.clone();
    own.extend(r.complex_waits.iter().cloned());
    if waits.is_empty() {
        ret.push(format!(
            "Due to having {}, this hand is best described as **{} {}**.{}",
            shape_str, kind, sh, perfect_str
        ));
    } else if !own.iter().all(|t| waits.contains(t)) {
        ret.push(String::new());
        ret.push(format!(
            "This hand can also be interpreted as having {}, which means this hand is also **{} {}**.{}",
            shape_str, kind, sh, perfect_str
        ));
    } else {
        return;
    }
    names.push(format!("{} {}", kind, sh));

    let mut wait_strs = vec![];
    if !r.simples.is_empty() {
        let s_ = if r.simples.len() != 1 { "s" } else { "" };
        wait_strs.push(format!("its simple shape{} {}", s_, ps(&r.simple_waits)));
    }
    if !r.complexes.is_empty() {
        let s_ = if r.complexes.len() != 1 { "s" } else { "" };
        wait_strs.push(format!("its complex shape{} {}", s_, ps(&r.complex_waits)));
    }
    let add_string = if waits.is_empty() {
        String::new()
    } else {
        let added: BTreeSet<Tile> = own.difference(waits).cloned().collect();
        format!(", adding {} to the wait", ps(&added))
    };
    ret.push(String::new());
    ret.push(format!(
        "The waits for {} {} are completely determined by the waits of {}{}.",
        kind,
        sh,
        wait_strs.join(" and "),
        add_string
    ));

    waits.extend(own.iter().cloned());
    let (lines, mut ext_names) = describe_extensions(waits, &r.extensions, &[]);
    ret.extend(lines);
    names.append(&mut ext_names);
}

// [七対子の説明]
pub(crate) fn describe_chiitoitsu(
    shanten: i8,
    c_waits: &BTreeSet<Tile>,
    waits: &BTreeSet<Tile>,
) -> Vec<String> {
    let sh = shanten_string(shanten);
    let num_pairs = match shanten {
        1 => "five",
        2 => "four",
        _ => "three",
    };
    if waits.is_empty() {
        vec![format!(
            "Due to having {} pairs, this hand is best described as **chiitoitsu {}**.\n\nThe waits for chiitoitsu {} are tanki waits on the unpaired tiles {}.",
            num_pairs, sh, sh, ps(c_waits)
        )]
    } else if !c_waits.iter().all(|t| waits.contains(t)) {
        let added: BTreeSet<Tile> = c_waits.difference(waits).cloned().collect();
        vec![
            String::new(),
            format!(
                "Having {} pairs, this hand is also **chiitoitsu {}**.\n\nThe waits for chiitoitsu {} are tanki waits on the unpaired tiles {}, adding {} to the wait.",
                num_pairs, sh, sh, ps(c_waits), ps(&added)
            ),
        ]
    } else {
        vec![]
    }
}

// [国士無双の説明]
pub(crate) fn describe_kokushi(shanten: i8, k_waits: &BTreeSet<Tile>) -> Vec<String> {
    let sh = shanten_string(shanten);
    let num_tiles = 12 - shanten as usize;
    if k_waits.len() != 13 {
        vec![format!(
            "Due to having {} terminal/honor tiles with a terminal/honor pair, this hand is best described as **kokushi {}**.\n\nThe waits for kokushi {} are the remaining terminal/honors {}.",
            num_tiles, sh, sh, ps(k_waits)
        )]
    } else {
        vec![
            String::new(),
            format!(
                "Due to having {} terminal/honor tiles with no pair, this hand is best described as **13-sided kokushi {}**.\n\nThe waits for 13-sided kokushi {} are any terminal/honor tile {}.",
                num_tiles + 1, sh, sh, ps(k_waits)
            ),
        ]
    }
}

// [単騎一向聴の説明]
pub(crate) fn describe_tanki_iishanten(tanki_waits: &BTreeSet<Tile>) -> Vec<String> {
    vec![format!(
        "Since this hand is basically tenpai with a tanki wait, but all four tiles of that tanki wait are in your hand, this hand is best described as **tanki iishanten**.\n\nThe waits for tanki iishanten include everything but that tanki tile: {}.",
        ps(tanki_waits)
    )]
}

// [四枚使いの説明]
pub(crate) fn describe_ankan(ankan_tiles: &BTreeSet<Tile>, waits: &BTreeSet<Tile>) -> Vec<String> {
    if ankan_tiles.intersection(waits).count() > 0 {
        vec![format!(
            "Since all four tiles are in hand, we cannot consider {} as part of the wait.",
            ps(ankan_tiles)
        )]
    } else {
        vec![]
    }
}

// [4向聴以上の説明]
pub(crate) fn describe_shanten(s_std: i8, s_c: Option<i8>, s_k: Option<i8>) -> Vec<String> {
    if let Some(c) = s_c {
        if c < s_std {
            return vec![format!(
                "This hand is standard {}-shanten, but {}-shanten for chiitoitsu.",
                s_std, c
            )];
        }
    }
    if let Some(k) = s_k {
        if k < s_std {
            return vec![format!(
                "This hand is standard {}-shanten, but {}-shanten for kokushi musou.",
                s_std, k
            )];
        }
    }
    vec![format!("This hand is {}-shanten.", s_std)]
}
