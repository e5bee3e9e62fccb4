//! 置換表モジュール
//!
//! 探索結果をキャッシュする置換表（Transposition Table）。
//!
//! - `TtEntry`: エントリ（バウンド種別 + 評価値）
//! - `TranspositionTable`: `(zobristキー, 深さ)` で引く本体
//! - 周期クリアと容量上限による有界メモリ管理
//!
//! 理論的な強さよりもメモリと実行時間の予測可能性を優先する。
//! 容量を超えるエントリは単に書き込まれず、テーブル全体は
//! 一定回数の探索ごとに丸ごとクリアされる。

mod table;

pub use table::{TranspositionTable, TtEntry};

/// 探索値のバウンド種別
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// 正確値
    Exact,
    /// 下界（beta カット）
    Lower,
    /// 上界（alpha 未更新）
    Upper,
}

/// エントリ数の既定上限
pub const DEFAULT_TT_CAPACITY: usize = 80_000;

/// 既定の周期クリア間隔（探索回数）
pub const DEFAULT_TT_CLEAR_INTERVAL: u32 = 12;
