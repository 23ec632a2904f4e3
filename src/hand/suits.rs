use std::collections::BTreeSet;

use crate::model::*;
use crate::util::common::cartesian_product;

// 1スート分の牌の数字列(昇順)
pub type Row = Vec<Tnum>;
// スートごとの読み筋(除去の結果)の集合
pub type RowSet = BTreeSet<Row>;
// 全スート分の読み筋 面子・搭子はスートをまたがないため独立に探索できる
pub type SuitTable = [RowSet; TYPE];

// 手牌をスートごとの数字列に分割 (赤5は正規化済みであること)
pub fn to_suits(hand: &[Tile]) -> SuitTable {
    let mut rows: [Row; TYPE] = Default::default();
    for t in hand {
        assert!(t.1 != 0, "red five must be normalized before analysis");
        rows[t.0].push(t.1);
    }
    let mut suits = SuitTable::default();
    for ti in 0..TYPE {
        rows[ti].sort_unstable();
        suits[ti].insert(rows[ti].clone());
    }
    suits
}

// スートごとの読み筋の集合から,全組み合わせの手牌(牌のリスト)を復元
pub fn from_suits(suits: &SuitTable) -> Vec<Vec<Tile>> {
    let rows: Vec<Vec<Row>> = suits.iter().map(|s| s.iter().cloned().collect()).collect();
    let mut res = vec![];
    for v in cartesian_product(&rows) {
        let mut hand = vec![];
        for (ti, row) in v.iter().enumerate() {
            for &ni in row.iter() {
                hand.push(Tile(ti, ni));
            }
        }
        res.push(hand);
    }
    res
}

// 数字列を牌のリストに変換
pub fn row_to_tiles(row: &Row, ti: Type) -> Vec<Tile> {
    row.iter().map(|&ni| Tile(ti, ni)).collect()
}

#[test]
fn test_to_suits() {
    let hand = tiles_from_string("234567m23456p66s").unwrap();
    let suits = to_suits(&hand);
    assert!(suits[TM].contains(&vec![2, 3, 4, 5, 6, 7]));
    assert!(suits[TP].contains(&vec![2, 3, 4, 5, 6]));
    assert!(suits[TS].contains(&vec![6, 6]));
    assert!(suits[TZ].contains(&vec![]));
    assert_eq!(from_suits(&suits), vec![hand]);
}
