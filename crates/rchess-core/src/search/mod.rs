//! 探索エンジン
//!
//! 反復深化 Alpha-Beta による指し手選択と局面評価。
//!
//! - `choose_move`: 最善手と評価値を返す
//! - `eval_position`: 評価値のみを返す（同じ探索機構）
//!
//! どちらもレベル由来の時間予算で打ち切られ、最後に「完走した」深さの
//! 結果だけを採用する。途中で打ち切られた深さが前の深さの結果を
//! 上書きすることはない。非決定性はノイズ選択（`pick_noisy_best`）に
//! 隔離されており、noise = 0 のレベルでは完全に決定的。

mod alpha_beta;
mod clock;
mod options;
mod ordering;
pub mod types;


use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use shakmaty::{Chess, Move, Position};
use smallvec::SmallVec;

use crate::eval::evaluate;
use crate::tt::TranspositionTable;
use crate::types::{Level, Value};

use clock::SearchClock;
use ordering::ordered_moves;
use types::{RootMove, RootMoves};

pub use options::EngineOptions;
pub use ordering::OrderedMoves;

/// 時間・メモリ有界の探索エンジン
///
/// 可変状態（置換表・クロック・RNG）をすべて内部に持つ。
/// 同期機構は持たないため、単一のオーナースレッドから使うこと。
pub struct SearchEngine {
    options: EngineOptions,
    tt: TranspositionTable,
    clock: SearchClock,
    rng: Xoshiro256PlusPlus,
}

impl SearchEngine {
    /// 既定オプションで生成
    pub fn new() -> Self {
        Self::with_options(EngineOptions::default())
    }

    /// オプションを指定して生成
    pub fn with_options(options: EngineOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_os_rng(),
        };
        log::debug!(
            "search engine ready: tt_capacity={} tt_clear_interval={}",
            options.tt_capacity,
            options.tt_clear_interval
        );
        Self {
            tt: TranspositionTable::new(options.tt_capacity, options.tt_clear_interval),
            clock: SearchClock::new(),
            rng,
            options,
        }
    }

    /// 最善手と評価値（手番側視点）を返す
    ///
    /// 終局局面では `(None, 終局スコア)` を返す。時間予算内に深さ1も
    /// 完走しなかった場合は、生成順先頭の手と静的評価に落ちる。
    pub fn choose_move(&mut self, pos: &Chess, level: Level) -> (Option<Move>, Value) {
        if is_terminal(pos) {
            return (None, terminal_score(pos));
        }

        let params = level.params();
        self.begin_search(level);

        let moves = ordered_moves(pos);
        if moves.is_empty() {
            return (None, evaluate(pos));
        }

        let Some(roots) = self.search_root(pos, &moves, params.max_depth) else {
            // 深さ1すら完走しなかった。先頭の手 + 静的評価で応答する
            log::debug!("no depth completed within budget, falling back to first generated move");
            return (Some(moves[0].clone()), evaluate(pos));
        };

        let (best_mv, best_score) = best_root(&roots);
        let mut best_mv = best_mv.clone();

        // 低レベルのみ: 上位候補にノイズを加えて選び直す。
        // RNG を消費するのはこのステップだけ
        if params.noise > 0 && params.top_n > 1 {
            best_mv = self.pick_noisy_best(&roots, params.top_n, params.noise);
        }

        (Some(best_mv), best_score)
    }

    /// 評価値（手番側視点）のみを返す
    pub fn eval_position(&mut self, pos: &Chess, level: Level) -> Value {
        if is_terminal(pos) {
            return terminal_score(pos);
        }

        self.begin_search(level);

        let moves = ordered_moves(pos);
        if moves.is_empty() {
            return evaluate(pos);
        }

        match self.search_root(pos, &moves, level.params().max_depth) {
            Some(roots) => best_root(&roots).1,
            None => evaluate(pos),
        }
    }

    /// 反復深化のルートループ
    ///
    /// 完走した最後の深さのルートスコア一覧を返す。
    /// 締切で中断された深さは破棄される。
    fn search_root(&mut self, pos: &Chess, moves: &OrderedMoves, max_depth: i32) -> Option<RootMoves> {
        let mut committed: Option<RootMoves> = None;

        for depth in 1..=max_depth {
            if self.clock.expired() {
                break;
            }

            let mut alpha = -Value::INFINITE;
            let beta = Value::INFINITE;
            let mut scores = RootMoves::new();
            let mut aborted = false;

            for mv in moves.iter() {
                let mut child = pos.clone();
                child.play_unchecked(mv);
                let score = -self.alpha_beta(&child, depth - 1, 1, -beta, -alpha);

                scores.push(RootMove { mv: mv.clone(), score });
                if score > alpha {
                    alpha = score;
                }
                if self.clock.expired() {
                    aborted = true;
                    break;
                }
            }

            if aborted {
                break;
            }
            committed = Some(scores);
        }

        committed
    }

    /// 上位候補へのノイズ付き選択
    ///
    /// スコア上位 `top_n` 手だけを対象に、一様ノイズを加えた値の最大を選ぶ。
    /// 全体のソートはせず、n 回の線形走査で上位を拾う。
    fn pick_noisy_best(&mut self, roots: &RootMoves, top_n: usize, noise: i32) -> Move {
        let n = top_n.min(roots.len());
        let mut picked: SmallVec<[usize; 8]> = SmallVec::new();

        for _ in 0..n {
            let mut best_i: Option<usize> = None;
            for (i, rm) in roots.iter().enumerate() {
                if picked.contains(&i) {
                    continue;
                }
                match best_i {
                    Some(b) if roots[b].score >= rm.score => {}
                    _ => best_i = Some(i),
                }
            }
            if let Some(i) = best_i {
                picked.push(i);
            }
        }

        let mut best_mv = &roots[picked[0]].mv;
        let mut best_noisy = roots[picked[0]].score.raw() + self.rng.random_range(-noise..=noise);

        for &i in picked.iter().skip(1) {
            let noisy = roots[i].score.raw() + self.rng.random_range(-noise..=noise);
            if noisy > best_noisy {
                best_noisy = noisy;
                best_mv = &roots[i].mv;
            }
        }

        best_mv.clone()
    }

    /// 探索開始前の準備（クロック開始・置換表の周期管理）
    fn begin_search(&mut self, level: Level) {
        let budget = match self.options.time_budget_ms {
            Some(ms) => Duration::from_millis(ms),
            None => level.time_budget(),
        };
        self.clock.start(budget);
        self.tt.begin_search();
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// 探索対象として終局かどうか
fn is_terminal(pos: &Chess) -> bool {
    pos.is_checkmate() || pos.is_stalemate() || pos.is_insufficient_material()
}

/// 終局局面の手番側スコア
fn terminal_score(pos: &Chess) -> Value {
    if pos.is_checkmate() {
        // 手番側が詰まされている
        Value::mated_in(0)
    } else {
        Value::DRAW
    }
}

/// ルートスコア一覧から最善（同点は先頭優先）を返す
fn best_root(roots: &RootMoves) -> (&Move, Value) {
    let mut best = &roots[0];
    for rm in roots.iter().skip(1) {
        if rm.score > best.score {
            best = rm;
        }
    }
    (&best.mv, best.score)
}
