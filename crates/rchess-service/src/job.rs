//! ジョブとコールバックペイロード

use rchess_core::{Level, Value};
use shakmaty::Move;
use thiserror::Error;

/// 1件分の探索リクエスト
///
/// 生成後は不変。`generation` は呼び出し側が採番する不透明トークンで、
/// サービスは解釈せずに結果へそのまま添えて返す。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    /// 局面テキスト（FEN）
    pub fen: String,
    /// 難易度レベル
    pub level: Level,
    /// 呼び出し側の世代トークン
    pub generation: u64,
}

/// ワーカーが取り出したジョブの種別
#[derive(Clone, Debug)]
pub enum SearchJob {
    /// 指し手リクエスト
    Move(SearchRequest),
    /// 評価リクエスト
    Eval(SearchRequest),
}

/// 指し手リクエストの結果ペイロード（データのみ）
#[derive(Clone, Debug)]
pub struct MoveOutcome {
    pub generation: u64,
    /// リクエスト時の局面テキストをそのまま返す
    pub fen: String,
    pub best_move: Option<Move>,
    /// 白視点のセンチポーン評価
    pub white_cp: Value,
}

/// 評価リクエストの結果ペイロード（データのみ）
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalOutcome {
    pub generation: u64,
    pub fen: String,
    pub white_cp: Value,
}

/// ジョブ実行時のエラー
///
/// ワーカーはこれを捕捉してログに出し、コールバックは呼ばずに
/// 次のジョブへ進む。呼び出し側スレッドには決して伝播しない。
#[derive(Debug, Error)]
pub enum JobError {
    #[error("invalid position text: `{0}`")]
    InvalidPosition(String),
}
