//! 指し手オーダリング
//!
//! ソートなしのバケット方式。プロモーション（クイーン優先）、
//! 取る手（取られる駒の価値降順ビン）、静かな手（生成順）の順に並べる。
//! プロモーションと取る手が alpha-beta の枝刈りに効くため先頭に置き、
//! 全体ソートは CPU 予算の予測可能性のために避ける。

use shakmaty::{Chess, Move, Position, Role};
use smallvec::SmallVec;

/// バケット順に並んだ指し手リスト
pub type OrderedMoves = SmallVec<[Move; 64]>;

/// 取る手のビン順（取られる駒の価値が高い順）
const VICTIM_ORDER: [Role; 5] = [Role::Queen, Role::Rook, Role::Bishop, Role::Knight, Role::Pawn];

/// 合法手をバケット順に並べて返す
pub fn ordered_moves(pos: &Chess) -> OrderedMoves {
    let legal = pos.legal_moves();
    let mut out = OrderedMoves::new();

    // クイーンプロモーションを最優先、他のプロモーションが続く
    for mv in &legal {
        if mv.promotion() == Some(Role::Queen) {
            out.push(mv.clone());
        }
    }
    for mv in &legal {
        if mv.is_promotion() && mv.promotion() != Some(Role::Queen) {
            out.push(mv.clone());
        }
    }

    // 取る手: 取られる駒の価値ビンを高い順に走査（MVV近似、ソートなし）
    for victim in VICTIM_ORDER {
        for mv in &legal {
            if !mv.is_promotion() && mv.capture() == Some(victim) {
                out.push(mv.clone());
            }
        }
    }

    // 静かな手は生成順のまま
    for mv in &legal {
        if !mv.is_promotion() && !mv.is_capture() {
            out.push(mv.clone());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::fen::Fen;
    use shakmaty::CastlingMode;

    fn position(fen: &str) -> Chess {
        fen.parse::<Fen>().unwrap().into_position(CastlingMode::Standard).unwrap()
    }

    #[test]
    fn test_promotions_first_queen_leading() {
        // a7 ポーンの昇格4種 + e2xd3 のクイーン取り + 静かな手
        let pos = position("7k/P7/8/8/8/3q4/4P3/K7 w - - 0 1");
        let moves = ordered_moves(&pos);
        assert_eq!(moves.len(), pos.legal_moves().len());

        assert_eq!(moves[0].promotion(), Some(Role::Queen));
        assert!(moves[..4].iter().all(|m| m.is_promotion()));
        assert_eq!(moves[4].capture(), Some(Role::Queen));
        assert!(moves[5..].iter().all(|m| !m.is_capture() && !m.is_promotion()));
    }

    #[test]
    fn test_captures_binned_by_victim() {
        // d5 ポーンはルークもポーンも取れる。ルーク取りが先
        let pos = position("k7/8/2r1p3/3P4/8/8/8/K7 w - - 0 1");
        let moves = ordered_moves(&pos);

        assert_eq!(moves[0].capture(), Some(Role::Rook));
        assert_eq!(moves[1].capture(), Some(Role::Pawn));
    }

    #[test]
    fn test_startpos_keeps_all_moves() {
        let pos = Chess::default();
        let moves = ordered_moves(&pos);
        assert_eq!(moves.len(), 20);
        assert!(moves.iter().all(|m| !m.is_capture()));
    }
}
