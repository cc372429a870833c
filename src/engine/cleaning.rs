// ==========================================
// 染整换色排产系统 - 换色清洗模型
// ==========================================
// 清洗时长 = 基础清洗分钟 × |明度序号差|
// 同色系相邻为 0; 对称且满足三角不等式
// 基础清洗分钟限定在 [0, 1440]
// ==========================================

use crate::domain::types::ColorFamily;

/// 每一级明度差的清洗分钟上限（一天）
pub const MAX_BASE_CLEANING_MINUTES: i64 = 24 * 60;

// ==========================================
// CleaningModel - 色系距离模型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleaningModel {
    base_cleaning_minutes: i64,
}

impl CleaningModel {
    /// # 参数
    /// - base_cleaning_minutes: 每一级明度差的清洗分钟
    pub fn new(base_cleaning_minutes: i64) -> Self {
        Self {
            base_cleaning_minutes: base_cleaning_minutes.clamp(0, MAX_BASE_CLEANING_MINUTES),
        }
    }

    /// 两个相邻批次之间的清洗时长（分钟）
    pub fn cleaning_minutes(&self, from: ColorFamily, to: ColorFamily) -> i64 {
        self.base_cleaning_minutes * from.distance(to) as i64
    }

    /// 按给定顺序生产时的总清洗时长（首个批次不计）
    pub fn sequence_cleaning_minutes<I>(&self, families: I) -> i64
    where
        I: IntoIterator<Item = ColorFamily>,
    {
        let mut total = 0;
        let mut previous: Option<ColorFamily> = None;
        for family in families {
            if let Some(prev) = previous {
                total += self.cleaning_minutes(prev, family);
            }
            previous = Some(family);
        }
        total
    }
}
