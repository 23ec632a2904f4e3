use std::collections::{BTreeSet, HashMap};

use crate::model::*;

use super::suits::*;

// [面子除去]
// 1つのスートの数字列から面子(刻子・順子)を取り除く探索.
// 面子の取り除き方は一意ではないため,結果は常に「残りの数字列の集合」として扱う.
// 取り除き方を1通りに固定すると局所最適に陥り,向聴数を過大評価することがある.

// rowから取り除ける面子を1つ取り除いた結果の一覧
fn meld_removals(row: &Row, ti: Type) -> Vec<Row> {
    let mut res = vec![];
    let mut prev = TNUM;
    for &r in row.iter() {
        if r == prev {
            continue;
        }
        prev = r;

        // 刻子
        if count(row, r) >= 3 {
            res.push(removed(row, &[r, r, r]));
        }

        // 順子 (字牌は不可)
        if ti != TZ && count(row, r + 1) >= 1 && count(row, r + 2) >= 1 {
            res.push(removed(row, &[r, r + 1, r + 2]));
        }
    }
    res
}

fn count(row: &[Tnum], r: Tnum) -> usize {
    row.iter().filter(|&&x| x == r).count()
}

// rowから指定の数字を1枚ずつ取り除いた残りを返却 (取り除けることを確認しておくこと)
fn removed(row: &Row, sub: &[Tnum]) -> Row {
    let mut res = row.clone();
    for &r in sub {
        let i = res.iter().position(|&x| x == r).unwrap();
        res.remove(i);
    }
    res
}

// これ以上面子を取り除けなくなるまで取り除いた残りの集合 (すべての最大除去)
fn strip_groups_all(row: &Row, ti: Type, memo: &mut HashMap<Row, RowSet>) -> RowSet {
    if let Some(cached) = memo.get(row) {
        return cached.clone();
    }

    let mut res = RowSet::new();
    let removals = meld_removals(row, ti);
    if removals.is_empty() {
        res.insert(row.clone());
    } else {
        for r in &removals {
            res.append(&mut strip_groups_all(r, ti, memo));
        }
    }

    memo.insert(row.clone(), res.clone());
    res
}

// 面子を0個以上取り除いて到達できる残りの集合 (途中経過もすべて含む)
fn strip_groups_some(row: &Row, ti: Type, memo: &mut HashMap<Row, RowSet>) -> RowSet {
    if let Some(cached) = memo.get(row) {
        return cached.clone();
    }

    let mut res = RowSet::new();
    res.insert(row.clone());
    for r in &meld_removals(row, ti) {
        res.append(&mut strip_groups_some(r, ti, memo));
    }

    memo.insert(row.clone(), res.clone());
    res
}

// 各スートについて面子を可能な限り取り除いた残りの集合を返却
pub fn eliminate_all_groups(suits: &SuitTable) -> SuitTable {
    let mut res = SuitTable::default();
    for ti in 0..TYPE {
        let mut memo = HashMap::new();
        for row in &suits[ti] {
            res[ti].append(&mut strip_groups_all(row, ti, &mut memo));
        }
    }
    res
}

// 各スートについて面子を0個以上取り除いた残りの集合を返却
pub fn eliminate_some_groups(suits: &SuitTable) -> SuitTable {
    let mut res = SuitTable::default();
    for ti in 0..TYPE {
        let mut memo = HashMap::new();
        for row in &suits[ti] {
            res[ti].append(&mut strip_groups_some(row, ti, &mut memo));
        }
    }
    res
}

// [対子・搭子除去]
// 面子除去後の残りから対子と搭子(両面・辺張・嵌張)を抜き取る探索.
// こちらもすべての抜き取り方を列挙し,抜いた形と浮き牌をメタデータとして保持する.

// 対子・搭子の抜き取り方1通り
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ShapePull {
    pub pairs: Vec<Tnum>,          // 抜いた対子
    pub taatsus: Vec<(Tnum, Tnum)>, // 抜いた搭子
    pub rest: Row,                 // 残った浮き牌
}

fn pull_rec(row: &Row, ti: Type, memo: &mut HashMap<Row, BTreeSet<ShapePull>>) -> BTreeSet<ShapePull> {
    if let Some(cached) = memo.get(row) {
        return cached.clone();
    }

    let mut res = BTreeSet::new();
    res.insert(ShapePull {
        pairs: vec![],
        taatsus: vec![],
        rest: row.clone(),
    });

    let mut prev = TNUM;
    for &r in row.iter() {
        if r == prev {
            continue;
        }
        prev = r;

        // 対子
        if count(row, r) >= 2 {
            for p in pull_rec(&removed(row, &[r, r]), ti, memo) {
                let mut pairs = p.pairs.clone();
                pairs.push(r);
                pairs.sort_unstable();
                res.insert(ShapePull { pairs, ..p });
            }
        }

        // 搭子 (字牌は不可)
        if ti != TZ {
            for d in 1..=2 {
                if count(row, r + d) >= 1 {
                    for p in pull_rec(&removed(row, &[r, r + d]), ti, memo) {
                        let mut taatsus = p.taatsus.clone();
                        taatsus.push((r, r + d));
                        taatsus.sort_unstable();
                        res.insert(ShapePull { taatsus, ..p });
                    }
                }
            }
        }
    }

    memo.insert(row.clone(), res.clone());
    res
}

// rowから対子・搭子を抜き取るすべての方法を列挙
pub fn pull_simple_shapes(row: &Row, ti: Type) -> BTreeSet<ShapePull> {
    let mut memo = HashMap::new();
    pull_rec(row, ti, &mut memo)
}

// ブロック(対子・搭子・複合形)の抜き取り方1通り
// 複合形は対子と搭子が重なった3枚形 (XXY, XYY, XXZ, XZZ)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct BlockPull {
    pub pairs: Vec<Tnum>,
    pub taatsus: Vec<(Tnum, Tnum)>,
    pub complexes: Vec<[Tnum; 3]>,
    pub rest: Row,
}

fn pull_block_rec(
    row: &Row,
    ti: Type,
    memo: &mut HashMap<Row, BTreeSet<BlockPull>>,
) -> BTreeSet<BlockPull> {
    if let Some(cached) = memo.get(row) {
        return cached.clone();
    }

    let mut res = BTreeSet::new();
    res.insert(BlockPull {
        pairs: vec![],
        taatsus: vec![],
        complexes: vec![],
        rest: row.clone(),
    });

    let mut prev = TNUM;
    for &r in row.iter() {
        if r == prev {
            continue;
        }
        prev = r;

        if count(row, r) >= 2 {
            for p in pull_block_rec(&removed(row, &[r, r]), ti, memo) {
                let mut pairs = p.pairs.clone();
                pairs.push(r);
                pairs.sort_unstable();
                res.insert(BlockPull { pairs, ..p });
            }
        }

        if ti == TZ {
            continue;
        }

        for d in 1..=2 {
            if count(row, r + d) >= 1 {
                for p in pull_block_rec(&removed(row, &[r, r + d]), ti, memo) {
                    let mut taatsus = p.taatsus.clone();
                    taatsus.push((r, r + d));
                    taatsus.sort_unstable();
                    res.insert(BlockPull { taatsus, ..p });
                }
            }

            // 複合形 (順子そのものは面子除去の担当なので含まない)
            for shape in &[[r, r, r + d], [r, r + d, r + d]] {
                if count(row, r) >= count(shape, r) && count(row, r + d) >= count(shape, r + d) {
                    for p in pull_block_rec(&removed(row, shape), ti, memo) {
                        let mut complexes = p.complexes.clone();
                        complexes.push(*shape);
                        complexes.sort_unstable();
                        res.insert(BlockPull { complexes, ..p });
                    }
                }
            }
        }
    }

    memo.insert(row.clone(), res.clone());
    res
}

// rowからブロックを抜き取るすべての方法を列挙 (一向聴の形分類用)
pub fn pull_blocks(row: &Row, ti: Type) -> BTreeSet<BlockPull> {
    let mut memo = HashMap::new();
    pull_block_rec(row, ti, &mut memo)
}

#[test]
fn test_eliminate_all_groups() {
    use crate::model::tiles_from_string;
    use super::suits::to_suits;

    // 1112345: 111+234(残り5), 111+345(残り2), 123+(残り1145: 面子なし)
    let hand = tiles_from_string("1112345m").unwrap();
    let suits = to_suits(&hand);
    let res = eliminate_all_groups(&suits);
    assert!(res[TM].contains(&vec![5]));
    assert!(res[TM].contains(&vec![2]));
    assert!(res[TM].contains(&vec![1, 1, 4, 5]));

    // 完全に分解できる場合は空の残りが含まれる
    let hand = tiles_from_string("123444m").unwrap();
    let suits = to_suits(&hand);
    let res = eliminate_all_groups(&suits);
    assert!(res[TM].contains(&vec![]));
}

#[test]
fn test_eliminate_some_groups() {
    use crate::model::tiles_from_string;
    use super::suits::to_suits;

    // 途中経過(元の形や面子1つだけ除去した形)も含む
    let hand = tiles_from_string("123444m").unwrap();
    let suits = to_suits(&hand);
    let res = eliminate_some_groups(&suits);
    assert!(res[TM].contains(&vec![1, 2, 3, 4, 4, 4]));
    assert!(res[TM].contains(&vec![4, 4, 4]));
    assert!(res[TM].contains(&vec![1, 2, 3]));
    assert!(res[TM].contains(&vec![]));
}

#[test]
fn test_pull_simple_shapes() {
    // 2468: 24, 46, 68 の嵌張をどれか1つ抜ける (2つは枚数不足)
    let row = vec![2, 4, 6, 8];
    let pulls = pull_simple_shapes(&row, TP);
    assert!(pulls.contains(&ShapePull {
        pairs: vec![],
        taatsus: vec![(2, 4)],
        rest: vec![6, 8],
    }));
    assert!(pulls.contains(&ShapePull {
        pairs: vec![],
        taatsus: vec![(2, 4), (6, 8)],
        rest: vec![],
    }));

    // 字牌は対子のみ
    let row = vec![1, 1, 2];
    let pulls = pull_simple_shapes(&row, TZ);
    assert!(pulls.contains(&ShapePull {
        pairs: vec![1],
        taatsus: vec![],
        rest: vec![2],
    }));
    assert!(!pulls.iter().any(|p| !p.taatsus.is_empty()));
}

#[test]
fn test_pull_blocks() {
    // 455: 対子+搭子の複合形
    let row = vec![4, 5, 5];
    let pulls = pull_blocks(&row, TS);
    assert!(pulls.contains(&BlockPull {
        pairs: vec![],
        taatsus: vec![],
        complexes: vec![[4, 5, 5]],
        rest: vec![],
    }));
}
