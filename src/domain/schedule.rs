// ==========================================
// 染整换色排产系统 - 排产结果领域模型
// ==========================================
// 红线: ScheduleResult 一经生成不可变,下一次生成直接替换(不合并)
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ColorFamily, EcoGrade};

// ==========================================
// ScheduleSlot - 单个生产时段
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub order_id: i64,                 // 订单ID
    pub color_family: ColorFamily,     // 色系（用于计算相邻换色）
    pub start_time: NaiveDateTime,     // 开始时间
    pub end_time: NaiveDateTime,       // 结束时间
    pub cleaning_before_minutes: i64,  // 本时段前的清洗时长
}

impl ScheduleSlot {
    /// 生产时长（分钟）
    pub fn production_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

// ==========================================
// ScheduleResult - 一次排产运行的结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    // ===== 排产序列 =====
    pub generated_at: Option<NaiveDateTime>, // 排产起点（空排产为 None）
    pub slots: Vec<ScheduleSlot>,

    // ===== 清洗对比 =====
    pub fifo_cleaning_time_minutes: i64,
    pub optimized_cleaning_time_minutes: i64,
    pub time_saved_minutes: i64,

    // ===== 绩效指标 =====
    pub deadline_compliance: f64,       // 交期达成率 (0-100)
    pub machine_efficiency: f64,        // 设备效率 (0-100)
    pub eco_grade: EcoGrade,            // 环保等级
    pub water_saved_liters: f64,        // 节水（升）
    pub chemical_waste_saved_kg: f64,   // 减少化学废料（千克）

    // ===== 可解释性 =====
    pub total_production_minutes: i64,
    pub late_order_count: usize,
    pub rescued_order_count: usize,
}

impl ScheduleResult {
    /// 无待排产订单时的结果: 零指标,交期达成率按 100 计
    pub fn empty() -> Self {
        Self {
            generated_at: None,
            slots: Vec::new(),
            fifo_cleaning_time_minutes: 0,
            optimized_cleaning_time_minutes: 0,
            time_saved_minutes: 0,
            deadline_compliance: 100.0,
            machine_efficiency: 0.0,
            eco_grade: EcoGrade::from_score(50.0),
            water_saved_liters: 0.0,
            chemical_waste_saved_kg: 0.0,
            total_production_minutes: 0,
            late_order_count: 0,
            rescued_order_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// 排产序列中的订单ID
    pub fn order_sequence(&self) -> Vec<i64> {
        self.slots.iter().map(|s| s.order_id).collect()
    }

    /// 清洗时长对比视图
    pub fn comparison(&self) -> CleaningComparison {
        CleaningComparison {
            fifo_cleaning_time_minutes: self.fifo_cleaning_time_minutes,
            optimized_cleaning_time_minutes: self.optimized_cleaning_time_minutes,
        }
    }
}

// ==========================================
// CleaningComparison - FIFO 与优化排产清洗对比
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningComparison {
    pub fifo_cleaning_time_minutes: i64,
    pub optimized_cleaning_time_minutes: i64,
}
