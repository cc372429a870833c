// ==========================================
// 染整换色排产系统 - 绩效与环保评级引擎
// ==========================================
// 节省时长 = max(0, FIFO - 优化)
// 交期达成率 = round(100 × 按期单数 / 总单数), 空集按 100 计
// 设备效率 = 100 × 生产 / (生产 + 清洗), 保留一位小数
// 环保等级 = f((达成率 + 效率) / 2)
// ==========================================

use serde::{Deserialize, Serialize};

use crate::config::SchedulerConfig;
use crate::domain::order::Order;
use crate::domain::schedule::ScheduleSlot;
use crate::domain::types::EcoGrade;

// ==========================================
// ScheduleMetrics - 单次运行的指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    pub time_saved_minutes: i64,
    pub deadline_compliance: f64,
    pub machine_efficiency: f64,
    pub eco_grade: EcoGrade,
    pub water_saved_liters: f64,
    pub chemical_waste_saved_kg: f64,
    pub total_production_minutes: i64,
    pub late_order_count: usize,
}

// ==========================================
// MetricsEngine - 指标计算
// ==========================================
pub struct MetricsEngine {
    water_liters_per_cleaning_minute: f64,
    chemical_kg_per_cleaning_minute: f64,
}

impl MetricsEngine {
    pub fn new(water_liters_per_cleaning_minute: f64, chemical_kg_per_cleaning_minute: f64) -> Self {
        Self {
            water_liters_per_cleaning_minute,
            chemical_kg_per_cleaning_minute,
        }
    }

    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(
            config.water_liters_per_cleaning_minute,
            config.chemical_kg_per_cleaning_minute,
        )
    }

    // ==========================================
    // 单项指标
    // ==========================================

    pub fn time_saved(fifo_minutes: i64, optimized_minutes: i64) -> i64 {
        (fifo_minutes - optimized_minutes).max(0)
    }

    pub fn deadline_compliance(on_time: usize, total: usize) -> f64 {
        if total == 0 {
            return 100.0;
        }
        (100.0 * on_time as f64 / total as f64).round()
    }

    pub fn machine_efficiency(production_minutes: i64, cleaning_minutes: i64) -> f64 {
        let busy = production_minutes + cleaning_minutes;
        if busy <= 0 {
            return 0.0;
        }
        round_to(100.0 * production_minutes as f64 / busy as f64, 1)
    }

    pub fn eco_grade(deadline_compliance: f64, machine_efficiency: f64) -> EcoGrade {
        EcoGrade::from_score((deadline_compliance + machine_efficiency) / 2.0)
    }

    pub fn water_saved_liters(&self, time_saved_minutes: i64) -> f64 {
        round_to(time_saved_minutes as f64 * self.water_liters_per_cleaning_minute, 2)
    }

    pub fn chemical_waste_saved_kg(&self, time_saved_minutes: i64) -> f64 {
        round_to(time_saved_minutes as f64 * self.chemical_kg_per_cleaning_minute, 2)
    }

    // ==========================================
    // 汇总
    // ==========================================

    /// 计算一次排产的全部指标
    ///
    /// # 参数
    /// - sequence: 最终生产序列
    /// - slots: 与序列一一对应的时段
    /// - fifo_minutes: FIFO 基线清洗时长
    /// - optimized_minutes: 优化序列清洗时长
    pub fn evaluate(
        &self,
        sequence: &[Order],
        slots: &[ScheduleSlot],
        fifo_minutes: i64,
        optimized_minutes: i64,
    ) -> ScheduleMetrics {
        let late_order_count = sequence
            .iter()
            .zip(slots)
            .filter(|(order, slot)| slot.end_time > order.deadline_at())
            .count();
        let on_time = sequence.len() - late_order_count;
        let total_production_minutes: i64 = slots.iter().map(|s| s.production_minutes()).sum();

        let time_saved_minutes = Self::time_saved(fifo_minutes, optimized_minutes);
        let deadline_compliance = Self::deadline_compliance(on_time, sequence.len());
        let machine_efficiency =
            Self::machine_efficiency(total_production_minutes, optimized_minutes);

        ScheduleMetrics {
            time_saved_minutes,
            deadline_compliance,
            machine_efficiency,
            eco_grade: Self::eco_grade(deadline_compliance, machine_efficiency),
            water_saved_liters: self.water_saved_liters(time_saved_minutes),
            chemical_waste_saved_kg: self.chemical_waste_saved_kg(time_saved_minutes),
            total_production_minutes,
            late_order_count,
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
