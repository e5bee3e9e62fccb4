//! 探索クロック
//!
//! ノード数ゲートの協調的タイムスライス。毎ノード時刻を取らず、
//! 二つの独立した閾値で制御する。
//!
//! - 締切チェック: 1024 ノードごと（`TIME_CHECK_MASK`）
//! - 実スリープ: 4096 ノードごとに 0.5ms（`YIELD_MASK`）
//!
//! 実スリープは制約のあるホスト上で探索スレッドがプロセスを
//! 飢えさせないための純粋なスケジューリング調整で、正しさには関与しない。

use std::thread;
use std::time::{Duration, Instant};

/// 締切チェックの間隔（ノード数マスク）
const TIME_CHECK_MASK: u64 = 0x3FF;
/// 実スリープの間隔（ノード数マスク）
const YIELD_MASK: u64 = 0xFFF;
/// 実スリープの長さ
const YIELD_SLEEP: Duration = Duration::from_micros(500);

/// 探索用のノード数ゲート付きクロック
pub struct SearchClock {
    nodes: u64,
    deadline: Instant,
}

impl SearchClock {
    pub fn new() -> Self {
        Self { nodes: 0, deadline: Instant::now() }
    }

    /// 時間予算を設定して計測を開始する
    pub fn start(&mut self, budget: Duration) {
        self.nodes = 0;
        self.deadline = Instant::now() + budget;
    }

    /// ノードを1つ数え、締切を過ぎていれば true を返す
    ///
    /// 締切チェックはマスク一致時のみ行うため、戻り値が false でも
    /// 既に締切を過ぎている可能性がある。探索の巻き戻しには十分。
    #[inline]
    pub fn tick(&mut self) -> bool {
        self.nodes = self.nodes.wrapping_add(1);

        if self.nodes & YIELD_MASK == 0 {
            thread::sleep(YIELD_SLEEP);
        }

        if self.nodes & TIME_CHECK_MASK == 0 {
            return Instant::now() > self.deadline;
        }

        false
    }

    /// 締切を直接チェックする（ルートの反復間用）
    #[inline]
    pub fn expired(&self) -> bool {
        Instant::now() > self.deadline
    }

    /// 訪問ノード数
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl Default for SearchClock {
    fn default() -> Self {
        Self::new()
    }
}
