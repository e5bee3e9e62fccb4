//! サービス構成

use serde::{Deserialize, Serialize};

/// `EngineService` の構成オプション
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// ログとスレッド名に使うサービス名
    pub name: String,
    /// ジョブなしのときのワーカーのスリープ間隔（ms）
    pub idle_sleep_ms: u64,
    /// 評価キャッシュのエントリ数上限
    pub cache_capacity: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "engine-service".to_string(),
            idle_sleep_ms: 20,
            cache_capacity: 4_096,
        }
    }
}
