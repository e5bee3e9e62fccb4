//! rchess-service
//!
//! `rchess-core` の探索エンジンを専用ワーカースレッド1本で駆動する
//! ジョブサービス。
//!
//! - リクエストは種別ごとに「最新1件のみ」に合流（coalescing）
//! - 指し手リクエストは評価リクエストより常に優先
//! - 評価結果は構造キー（手数カウンタを除くFEN）で有界LRUキャッシュ
//! - 結果はデータのみのコールバックで配送し、呼び出し側の世代トークンを
//!   そのまま返す。陳腐化した結果の破棄は呼び出し側の責務
//!
//! エンジン本体はワーカースレッド上で構築され、スレッド外に出ない。
//! 共有されるのは pending スロットとキャッシュだけで、単一のミューテックスで
//! 短い区間のみ保護する。探索中にロックを跨ぐことはない。

mod cache;
mod config;
mod job;
mod service;

pub use cache::{structural_key, EvalCache};
pub use config::ServiceConfig;
pub use job::{EvalOutcome, JobError, MoveOutcome, SearchJob, SearchRequest};
pub use service::{EngineFactory, EngineService, EvalResultSink, MoveResultSink};
