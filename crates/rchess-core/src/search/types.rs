//! 探索内部の型とヘルパー

use shakmaty::Move;
use smallvec::SmallVec;

use crate::types::Value;

/// ルート局面の1手とその探索スコア
#[derive(Clone, Debug)]
pub struct RootMove {
    pub mv: Move,
    pub score: Value,
}

/// ルート手のスコアリスト（完了した反復のもの）
pub type RootMoves = SmallVec<[RootMove; 64]>;

/// 置換表に入れる前の詰みスコア正規化
///
/// 詰みスコアは「ルートからの手数」を含むため、そのまま格納すると
/// 別の深さ位置から参照したとき手数がずれる。格納時は「このノードからの
/// 手数」に変換し、取り出し時に逆変換する。
#[inline]
pub fn value_to_tt(v: Value, ply: i32) -> Value {
    if v.is_win() {
        Value::new(v.raw() + ply)
    } else if v.is_loss() {
        Value::new(v.raw() - ply)
    } else {
        v
    }
}

/// `value_to_tt` の逆変換
#[inline]
pub fn value_from_tt(v: Value, ply: i32) -> Value {
    if v.is_win() {
        Value::new(v.raw() - ply)
    } else if v.is_loss() {
        Value::new(v.raw() + ply)
    } else {
        v
    }
}
