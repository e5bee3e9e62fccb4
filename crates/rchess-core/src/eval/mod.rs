//! 静的評価
//!
//! 駒割 + Piece-Square Table の古典的評価。手番側視点
//! （正 = 手番側有利）のセンチポーン値を返す。

mod pst;

use shakmaty::{Chess, Position, Role};

use crate::types::Value;

/// 駒の基本価値（センチポーン）
pub fn piece_value(role: Role) -> i32 {
    match role {
        Role::Pawn => 100,
        Role::Knight => 320,
        Role::Bishop => 330,
        Role::Rook => 500,
        Role::Queen => 900,
        Role::King => 0,
    }
}

fn pst_table(role: Role) -> &'static [i32; 64] {
    match role {
        Role::Pawn => &pst::PST_PAWN,
        Role::Knight => &pst::PST_KNIGHT,
        Role::Bishop => &pst::PST_BISHOP,
        Role::Rook => &pst::PST_ROOK,
        Role::Queen => &pst::PST_QUEEN,
        Role::King => &pst::PST_KING,
    }
}

/// 局面を手番側視点で評価する
///
/// PST は白視点・盤面図順（index 0 = a8）で持つため、
/// 白の駒は段を反転したマスで、黒の駒はそのままのマスで引く。
pub fn evaluate(pos: &Chess) -> Value {
    let turn = pos.turn();
    let board = pos.board();
    let mut score = 0i32;

    for sq in board.occupied() {
        let Some(piece) = board.piece_at(sq) else {
            continue;
        };
        let table_sq = if piece.color.is_white() { sq.flip_vertical() } else { sq };
        let v = piece_value(piece.role) + pst_table(piece.role)[usize::from(table_sq)];
        score += if piece.color == turn { v } else { -v };
    }

    Value::new(score)
}
