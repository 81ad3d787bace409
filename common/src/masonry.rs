//! メイソンリーレイアウト割付
//!
//! 高さが後から判明するアイテム列を N カラムへ貪欲に割り付ける。
//! 割付は (アイテム数, カラム数, 測定済み高さ) の純関数として
//! 毎回最初から再計算する。差分更新はしない（リストは高々数十件）。
//!
//! 高さの測定が進むと既描画アイテムのカラムが変わることがあるが、
//! これは仕様上許容される見た目の揺れであって修正対象ではない。

use std::collections::HashMap;

/// カードのカラム幅（px）
pub const COLUMN_WIDTH_PX: f64 = 240.0;

/// コンテナ幅からカラム数を求める。常に1以上
pub fn column_count(container_width_px: f64, column_width_px: f64) -> usize {
    if column_width_px <= 0.0 {
        return 1;
    }
    let count = (container_width_px / column_width_px).floor();
    if count < 1.0 {
        1
    } else {
        count as usize
    }
}

/// 測定済みアイテム高さの集合
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MasonryState {
    heights: HashMap<usize, f64>,
}

impl MasonryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 高さを記録する。値が変わった場合のみ true
    ///
    /// 高さ報告は描画から発火するため、同値の再報告で再計算すると
    /// 無限レンダリングループになる。等値チェックは必須
    pub fn report_height(&mut self, index: usize, height_px: f64) -> bool {
        match self.heights.get(&index) {
            Some(current) if *current == height_px => false,
            _ => {
                self.heights.insert(index, height_px);
                true
            }
        }
    }

    /// 測定済み高さ。未測定は 0 扱い
    pub fn height(&self, index: usize) -> f64 {
        self.heights.get(&index).copied().unwrap_or(0.0)
    }

    pub fn heights(&self) -> &HashMap<usize, f64> {
        &self.heights
    }
}

/// 貪欲割付
///
/// アイテムを入力順に走査し、その時点で累計高さが最小のカラム
/// （同値なら先頭側）へ置く。置いた後に既知の高さ（未測定は 0）を
/// そのカラムの累計へ加算する。局所最適の発見的手法であり
/// 大域最適は狙わない
pub fn assign(
    item_count: usize,
    columns: usize,
    heights: &HashMap<usize, f64>,
) -> Vec<Vec<usize>> {
    let columns = columns.max(1);
    let mut totals = vec![0.0f64; columns];
    let mut placement: Vec<Vec<usize>> = vec![Vec::new(); columns];

    for index in 0..item_count {
        let mut target = 0;
        for (col, total) in totals.iter().enumerate() {
            if *total < totals[target] {
                target = col;
            }
        }
        placement[target].push(index);
        totals[target] += heights.get(&index).copied().unwrap_or(0.0);
    }

    placement
}
