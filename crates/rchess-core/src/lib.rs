//! rchess-core
//!
//! 時間・メモリ制約下で動作する割り込み可能なチェス探索エンジン。
//!
//! - 反復深化 Alpha-Beta 探索 + 有界置換表
//! - ノード数ゲートの締切チェックと実スリープによる協調的タイムスライス
//! - レベル（1..=5）による深さ・候補幅・ノイズの切り替え
//!
//! 盤面表現・合法手生成・終局判定は `shakmaty` に委譲し、本クレートは
//! 探索と評価のみを持つ。並行性は持たない（単一スレッド前提）。
//! ワーカースレッドへの隔離は `rchess-service` 側の責務。

pub mod eval;
pub mod search;
pub mod tt;
pub mod types;

pub use search::{EngineOptions, SearchEngine};
pub use types::{Level, LevelParams, Value};
