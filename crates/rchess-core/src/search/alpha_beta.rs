//! Alpha-Beta探索の実装
//!
//! negamax 形式の標準的な fail-soft alpha-beta。
//! - 置換表probe/store（`(キー, 深さ)` 一致、バウンド整合時のみカット）
//! - 王手延長: 残り深さ0で王手中なら1手だけ延長（非再帰・有界）
//! - 締切超過時は静的評価を返して巻き戻し、ルート側が
//!   「この深さは未完了」として扱う

use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{Chess, EnPassantMode, Position};

use super::ordering::ordered_moves;
use super::types::{value_from_tt, value_to_tt};
use super::SearchEngine;
use crate::eval::evaluate;
use crate::tt::Bound;
use crate::types::Value;

impl SearchEngine {
    /// 1ノードの negamax 探索
    ///
    /// 戻り値は手番側視点。`ply` はルートからの手数で、
    /// 詰みスコアの手数タイブレークと置換表正規化に使う。
    pub(super) fn alpha_beta(
        &mut self,
        pos: &Chess,
        depth: i32,
        ply: i32,
        mut alpha: Value,
        beta: Value,
    ) -> Value {
        // 締切超過はここで巻き戻す
        if self.clock.tick() {
            return evaluate(pos);
        }

        if pos.is_insufficient_material() {
            return Value::DRAW;
        }

        // 合法手は1回だけ生成し、終局判定にも使う
        let in_check = pos.is_check();
        let moves = ordered_moves(pos);
        if moves.is_empty() {
            return if in_check { Value::mated_in(ply) } else { Value::DRAW };
        }

        // 王手中の水平線をずらす。延長は1手のみで再帰しない
        let depth = if depth <= 0 {
            if in_check {
                1
            } else {
                return evaluate(pos);
            }
        } else {
            depth
        };

        let key: Zobrist64 = pos.zobrist_hash(EnPassantMode::Legal);
        if let Some(entry) = self.tt.probe(key, depth as i8) {
            let value = value_from_tt(entry.value, ply);
            match entry.bound {
                Bound::Exact => return value,
                Bound::Lower if value >= beta => return value,
                Bound::Upper if value <= alpha => return value,
                _ => {}
            }
        }

        let alpha_orig = alpha;
        let mut best = -Value::INFINITE;

        for mv in &moves {
            let mut child = pos.clone();
            child.play_unchecked(mv);
            let score = -self.alpha_beta(&child, depth - 1, ply + 1, -beta, -alpha);

            if score > best {
                best = score;
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                break;
            }
            if self.clock.tick() {
                break;
            }
        }

        let bound = if best >= beta {
            Bound::Lower
        } else if best <= alpha_orig {
            Bound::Upper
        } else {
            Bound::Exact
        };
        self.tt.store(key, depth as i8, bound, value_to_tt(best, ply));

        best
    }
}
