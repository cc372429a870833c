// ==========================================
// 染整换色排产系统 - 排产参数快照
// ==========================================
// 每次排产运行读取一次,运行期间不变
// ==========================================

use serde::{Deserialize, Serialize};

/// 默认基础清洗时长（分钟/明度级差）
pub const DEFAULT_BASE_CLEANING_MINUTES: i64 = 30;
/// 默认产速（米/分钟）
pub const DEFAULT_PRODUCTION_RATE_M_PER_MIN: f64 = 10.0;
/// 产速下限（米/分钟）
pub const MIN_PRODUCTION_RATE_M_PER_MIN: f64 = 0.1;
/// 默认交期补救窗口（位置数）
pub const DEFAULT_RESCUE_WINDOW: usize = 10;
/// 默认每清洗分钟耗水（升）
pub const DEFAULT_WATER_LITERS_PER_CLEANING_MINUTE: f64 = 15.0;
/// 默认每清洗分钟化学废料（千克）
pub const DEFAULT_CHEMICAL_KG_PER_CLEANING_MINUTE: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub base_cleaning_minutes: i64,
    pub production_rate_m_per_min: f64,
    pub rescue_window: usize,
    pub water_liters_per_cleaning_minute: f64,
    pub chemical_kg_per_cleaning_minute: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            base_cleaning_minutes: DEFAULT_BASE_CLEANING_MINUTES,
            production_rate_m_per_min: DEFAULT_PRODUCTION_RATE_M_PER_MIN,
            rescue_window: DEFAULT_RESCUE_WINDOW,
            water_liters_per_cleaning_minute: DEFAULT_WATER_LITERS_PER_CLEANING_MINUTE,
            chemical_kg_per_cleaning_minute: DEFAULT_CHEMICAL_KG_PER_CLEANING_MINUTE,
        }
    }
}
