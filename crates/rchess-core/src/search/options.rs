//! 探索エンジンのオプション

use serde::{Deserialize, Serialize};

use crate::tt::{DEFAULT_TT_CAPACITY, DEFAULT_TT_CLEAR_INTERVAL};

/// 探索エンジンの構成オプション
///
/// 組み込み側が JSON 等から読み込めるよう serde 対応。
/// 省略フィールドは既定値で埋められる。
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// 置換表のエントリ数上限
    pub tt_capacity: usize,
    /// 置換表の周期クリア間隔（探索回数）
    pub tt_clear_interval: u32,
    /// 時間予算の上書き（ms）。None ならレベル既定値
    pub time_budget_ms: Option<u64>,
    /// ノイズ選択用RNGのシード。None なら OS 乱数
    pub seed: Option<u64>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            tt_capacity: DEFAULT_TT_CAPACITY,
            tt_clear_interval: DEFAULT_TT_CLEAR_INTERVAL,
            time_budget_ms: None,
            seed: None,
        }
    }
}
