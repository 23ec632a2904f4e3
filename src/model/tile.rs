use super::*;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Tile(pub Type, pub Tnum); // (type index, number index)

impl Tile {
    // number index(赤5考慮)を返却
    #[inline]
    pub fn n(&self) -> Tnum {
        if self.1 == 0 {
            5
        } else {
            self.1
        }
    }

    // 赤5の場合,通常の5を返却. それ以外の場合はコピーをそのまま返却.
    #[inline]
    pub fn to_normal(self) -> Self {
        if self.1 == 0 {
            Self(self.0, 5)
        } else {
            self
        }
    }

    // 数牌
    #[inline]
    pub fn is_suit(&self) -> bool {
        self.0 != TZ
    }

    // 字牌
    #[inline]
    pub fn is_honor(&self) -> bool {
        self.0 == TZ
    }

    // 么九牌
    #[inline]
    pub fn is_end(&self) -> bool {
        self.0 == TZ || self.1 == 1 || self.1 == 9
    }

    // 次の数字の牌 (9, 字牌の場合はNone)
    #[inline]
    pub fn succ(&self) -> Option<Tile> {
        if self.0 == TZ || self.n() >= 9 {
            None
        } else {
            Some(Tile(self.0, self.n() + 1))
        }
    }

    // 前の数字の牌 (1, 字牌の場合はNone)
    #[inline]
    pub fn pred(&self) -> Option<Tile> {
        if self.0 == TZ || self.n() <= 1 {
            None
        } else {
            Some(Tile(self.0, self.n() - 1))
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.1, ['m', 'p', 's', 'z'][self.0])
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tile {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.0 != other.0 {
            return self.0.cmp(&other.0);
        }

        // 赤5は4.5として比較 (4と5の間に表示)
        let a = if self.1 == 0 { 9 } else { self.1 * 2 };
        let b = if other.1 == 0 { 9 } else { other.1 * 2 };
        a.cmp(&b)
    }
}

// 牌種ごとの所持枚数テーブル
pub type TileRow = [usize; TNUM];
pub type TileTable = [TileRow; TYPE];

// 牌のリストを枚数テーブルに変換 (赤5は通常の5に合算)
pub fn tiles_to_tile_table(tiles: &[Tile]) -> TileTable {
    let mut tt = TileTable::default();
    for t in tiles {
        tt[t.0][t.n()] += 1;
    }
    tt
}

// 枚数テーブルを牌のリストに変換
pub fn tiles_from_tile_table(tt: &TileTable) -> Vec<Tile> {
    let mut tiles = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            for _ in 0..tt[ti][ni] {
                tiles.push(Tile(ti, ni));
            }
        }
    }
    tiles
}

#[test]
fn test_tile_order() {
    let mut tiles = vec![Tile(TP, 7), Tile(TM, 1), Tile(TP, 0), Tile(TP, 4), Tile(TP, 5)];
    tiles.sort();
    // 赤5(0)は4と5の間
    assert_eq!(
        tiles,
        vec![Tile(TM, 1), Tile(TP, 4), Tile(TP, 0), Tile(TP, 5), Tile(TP, 7)]
    );
}

#[test]
fn test_tile_succ_pred() {
    assert_eq!(Tile(TM, 8).succ(), Some(Tile(TM, 9)));
    assert_eq!(Tile(TM, 9).succ(), None);
    assert_eq!(Tile(TZ, 3).succ(), None);
    assert_eq!(Tile(TS, 0).succ(), Some(Tile(TS, 6))); // 赤5の次は6
    assert_eq!(Tile(TP, 1).pred(), None);
    assert_eq!(Tile(TP, 2).pred(), Some(Tile(TP, 1)));
}
