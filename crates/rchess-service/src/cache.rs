//! 評価キャッシュ
//!
//! 構造キー（手数カウンタを除いたFEN）で引く有界LRUキャッシュ。
//! エントリはレベル支配則に従う:
//!
//! - probe: キャッシュ側レベル >= 要求レベル のときだけヒット
//! - store: 計算レベル >= 既存レベル のときだけ上書き
//!
//! つまり格納されるレベルはそのキーで完了した計算の最大値になる。
//! サービスの start/stop の両方でクリアされ、セッションを跨いで持ち越さない。

use std::collections::{HashMap, VecDeque};

use rchess_core::{Level, Value};

/// FEN から構造キーを導出する
///
/// 盤面・手番・キャスリング権・アンパッサンの4フィールドのみを残し、
/// 手数カウンタを落とす。カウンタだけが異なる局面は探索上等価なので
/// 同じキーに正規化される。
pub fn structural_key(fen: &str) -> String {
    let fields: Vec<&str> = fen.split_whitespace().take(4).collect();
    fields.join(" ")
}

#[derive(Clone, Copy, Debug)]
struct CachedEval {
    level: Level,
    white_cp: Value,
}

/// 有界LRU評価キャッシュ
pub struct EvalCache {
    capacity: usize,
    table: HashMap<String, CachedEval>,
    order: VecDeque<String>,
}

impl EvalCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            table: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    /// 支配則付きの検索。ヒット時はLRU順を更新する
    pub fn probe(&mut self, key: &str, level: Level) -> Option<Value> {
        let hit = match self.table.get(key) {
            Some(entry) if entry.level >= level => Some(entry.white_cp),
            _ => None,
        };
        if hit.is_some() {
            self.touch(key);
        }
        hit
    }

    /// 支配則付きの格納
    ///
    /// 既存エントリより低いレベルの計算結果では上書きしない。
    pub fn store(&mut self, key: String, level: Level, white_cp: Value) {
        if let Some(entry) = self.table.get_mut(&key) {
            if level >= entry.level {
                entry.level = level;
                entry.white_cp = white_cp;
            }
            self.touch(&key);
            return;
        }

        if self.table.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.table.remove(&oldest);
            }
        }
        self.order.push_back(key.clone());
        self.table.insert(key, CachedEval { level, white_cp });
    }

    pub fn clear(&mut self) {
        self.table.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    // LRU順の末尾（最近使用側）へ移動する。容量は小さいので線形走査で足りる
    fn touch(&mut self, key: &str) {
        if let Some(i) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(i) {
                self.order.push_back(k);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_A: &str = "a";
    const KEY_B: &str = "b";
    const KEY_C: &str = "c";

    #[test]
    fn test_structural_key_drops_counters() {
        let a = structural_key("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        let b = structural_key("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 7 42");
        assert_eq!(a, b);
        assert_eq!(a, "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -");

        // 盤面・手番・権利の違いはキーに残る
        let c = structural_key("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1");
        assert_ne!(a, c);
    }

    #[test]
    fn test_dominance_probe() {
        let mut cache = EvalCache::new(8);
        cache.store(KEY_A.into(), Level::new(3), Value::new(40));

        // 同レベル以下はヒット、上はミス
        assert_eq!(cache.probe(KEY_A, Level::new(2)), Some(Value::new(40)));
        assert_eq!(cache.probe(KEY_A, Level::new(3)), Some(Value::new(40)));
        assert_eq!(cache.probe(KEY_A, Level::new(4)), None);
    }

    #[test]
    fn test_dominance_store_keeps_best_level() {
        let mut cache = EvalCache::new(8);
        cache.store(KEY_A.into(), Level::new(4), Value::new(10));

        // 低レベルの計算では上書きされない
        cache.store(KEY_A.into(), Level::new(2), Value::new(999));
        assert_eq!(cache.probe(KEY_A, Level::new(4)), Some(Value::new(10)));

        // 同等以上なら上書きされ、レベルは最大値を保つ
        cache.store(KEY_A.into(), Level::new(5), Value::new(-5));
        assert_eq!(cache.probe(KEY_A, Level::new(5)), Some(Value::new(-5)));
    }

    #[test]
    fn test_lru_eviction_respects_touch() {
        let mut cache = EvalCache::new(2);
        cache.store(KEY_A.into(), Level::new(1), Value::ZERO);
        cache.store(KEY_B.into(), Level::new(1), Value::ZERO);

        // A に触れてから C を入れると B が追い出される
        assert!(cache.probe(KEY_A, Level::new(1)).is_some());
        cache.store(KEY_C.into(), Level::new(1), Value::ZERO);

        assert_eq!(cache.len(), 2);
        assert!(cache.probe(KEY_A, Level::new(1)).is_some());
        assert!(cache.probe(KEY_B, Level::new(1)).is_none());
        assert!(cache.probe(KEY_C, Level::new(1)).is_some());
    }

    #[test]
    fn test_clear() {
        let mut cache = EvalCache::new(4);
        cache.store(KEY_A.into(), Level::new(1), Value::ZERO);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.probe(KEY_A, Level::new(1)), None);
    }
}
