//! 難易度レベル
//!
//! レベルは 1..=5 の整数で、探索パラメータ（深さ・候補幅・ノイズ）と
//! 時間予算を選択する。低レベルは浅い探索に加えてノイズ選択で
//! 意図的に弱く・人間らしくする。別アルゴリズムは持たない。

use std::time::Duration;

/// 難易度レベル（1..=5、範囲外はクランプ）
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u8);

/// レベルごとの探索パラメータ
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelParams {
    /// 反復深化の最大深さ
    pub max_depth: i32,
    /// ノイズ選択の対象とするルート候補数
    pub top_n: usize,
    /// ノイズ幅（センチポーン、0 = 決定的）
    pub noise: i32,
}

impl Level {
    pub const MIN: Level = Level(1);
    pub const MAX: Level = Level(5);

    /// 値から生成（1..=5 にクランプ）
    #[inline]
    pub fn new(v: u8) -> Level {
        Level(v.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// レベル値を取得
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// (深さ, 候補幅, ノイズ) の対応表
    pub fn params(self) -> LevelParams {
        let (max_depth, top_n, noise) = match self.0 {
            1 => (1, 5, 120),
            2 => (2, 4, 70),
            3 => (3, 2, 25),
            4 => (4, 1, 0),
            _ => (5, 1, 0),
        };
        LevelParams { max_depth, top_n, noise }
    }

    /// レベルごとの時間予算
    pub fn time_budget(self) -> Duration {
        let ms = match self.0 {
            1 => 60,
            2 => 180,
            3 => 540,
            4 => 1_500,
            _ => 5_000,
        };
        Duration::from_millis(ms)
    }
}

impl Default for Level {
    fn default() -> Self {
        Level(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_clamp() {
        assert_eq!(Level::new(0), Level::MIN);
        assert_eq!(Level::new(9), Level::MAX);
        assert_eq!(Level::new(3).value(), 3);
    }

    #[test]
    fn test_level_params_table() {
        assert_eq!(Level::new(1).params(), LevelParams { max_depth: 1, top_n: 5, noise: 120 });
        assert_eq!(Level::new(4).params(), LevelParams { max_depth: 4, top_n: 1, noise: 0 });
        // 高レベルほどノイズが減り、深さが増える
        for v in 1..5u8 {
            let lo = Level::new(v).params();
            let hi = Level::new(v + 1).params();
            assert!(hi.max_depth > lo.max_depth);
            assert!(hi.noise <= lo.noise);
        }
    }

    #[test]
    fn test_time_budget_monotonic() {
        for v in 1..5u8 {
            assert!(Level::new(v + 1).time_budget() > Level::new(v).time_budget());
        }
    }
}
