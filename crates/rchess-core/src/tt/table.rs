//! TranspositionTable本体
//!
//! - probe/store操作（`(key, depth)` 完全一致）
//! - begin_search による周期クリアと容量ガード

use std::collections::HashMap;

use shakmaty::zobrist::Zobrist64;

use super::Bound;
use crate::types::Value;

/// 置換表エントリ
#[derive(Clone, Copy, Debug)]
pub struct TtEntry {
    pub bound: Bound,
    pub value: Value,
}

/// 置換表
///
/// `(zobristキー, 深さ)` をキーとする有界マップ。深さ違いの結果は
/// 別エントリとして共存し、probe は要求深さと完全一致した場合のみヒットする。
pub struct TranspositionTable {
    table: HashMap<(u64, i8), TtEntry>,
    capacity: usize,
    clear_interval: u32,
    search_count: u32,
}

impl TranspositionTable {
    /// 新しい置換表を作成
    pub fn new(capacity: usize, clear_interval: u32) -> Self {
        Self {
            table: HashMap::with_capacity(capacity.min(4096)),
            capacity,
            clear_interval: clear_interval.max(1),
            search_count: 0,
        }
    }

    /// 新しい探索の開始を通知する
    ///
    /// 一定回数ごとに全クリア、容量超過時はハードクリア。
    /// 部分的な縮小より全クリアの方が実行時間が予測しやすい。
    pub fn begin_search(&mut self) {
        self.search_count = self.search_count.wrapping_add(1);
        if self.search_count % self.clear_interval == 0 {
            self.table.clear();
        } else if self.table.len() > self.capacity {
            self.table.clear();
        }
    }

    /// 置換表を検索（深さ完全一致）
    #[inline]
    pub fn probe(&self, key: Zobrist64, depth: i8) -> Option<TtEntry> {
        self.table.get(&(key.0, depth)).copied()
    }

    /// エントリを書き込む（容量上限内のみ）
    #[inline]
    pub fn store(&mut self, key: Zobrist64, depth: i8, bound: Bound, value: Value) {
        if self.table.len() < self.capacity {
            self.table.insert((key.0, depth), TtEntry { bound, value });
        }
    }

    /// クリア
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// 現在のエントリ数
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: Zobrist64 = Zobrist64(0x1234_5678_9ABC_DEF0);

    #[test]
    fn test_tt_probe_empty() {
        let tt = TranspositionTable::new(100, 12);
        assert!(tt.probe(KEY, 3).is_none());
    }

    #[test]
    fn test_tt_store_and_probe() {
        let mut tt = TranspositionTable::new(100, 12);
        tt.store(KEY, 3, Bound::Exact, Value::new(50));

        let hit = tt.probe(KEY, 3).expect("entry should be present");
        assert_eq!(hit.bound, Bound::Exact);
        assert_eq!(hit.value, Value::new(50));

        // 深さが違えばヒットしない
        assert!(tt.probe(KEY, 2).is_none());
        assert!(tt.probe(Zobrist64(1), 3).is_none());
    }

    #[test]
    fn test_tt_capacity_bound() {
        let mut tt = TranspositionTable::new(2, 12);
        tt.store(Zobrist64(1), 1, Bound::Exact, Value::ZERO);
        tt.store(Zobrist64(2), 1, Bound::Exact, Value::ZERO);
        // 満杯のテーブルには書き込まれない
        tt.store(Zobrist64(3), 1, Bound::Exact, Value::ZERO);
        assert_eq!(tt.len(), 2);
        assert!(tt.probe(Zobrist64(3), 1).is_none());
    }

    #[test]
    fn test_tt_periodic_clear() {
        let mut tt = TranspositionTable::new(100, 3);
        tt.store(KEY, 1, Bound::Exact, Value::ZERO);

        tt.begin_search(); // 1
        tt.begin_search(); // 2
        assert!(!tt.is_empty());
        tt.begin_search(); // 3 -> クリア
        assert!(tt.is_empty());
    }

    #[test]
    fn test_tt_clear() {
        let mut tt = TranspositionTable::new(100, 12);
        tt.store(KEY, 1, Bound::Lower, Value::new(10));
        tt.clear();
        assert!(tt.probe(KEY, 1).is_none());
    }
}
