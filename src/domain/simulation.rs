// ==========================================
// 染整换色排产系统 - 模拟快照领域模型
// ==========================================
// 用途: 归档一次完整运行(订单 + 排产 + 指标),只读回看
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::order::Order;
use crate::domain::schedule::ScheduleResult;
use crate::domain::types::EcoGrade;

// ==========================================
// Simulation - 模拟快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub simulation_id: String,      // 快照ID (UUID)
    pub name: String,               // 名称，如 "Test Case 3"
    pub created_at: NaiveDateTime,  // 归档时间
    pub orders: Vec<Order>,         // 所用订单集
    pub result: ScheduleResult,     // 排产结果
}

impl Simulation {
    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            simulation_id: self.simulation_id.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
            order_count: self.orders.len(),
            deadline_compliance: self.result.deadline_compliance,
            machine_efficiency: self.result.machine_efficiency,
            total_cleaning_time_minutes: self.result.optimized_cleaning_time_minutes,
            time_saved_minutes: self.result.time_saved_minutes,
            eco_grade: self.result.eco_grade,
        }
    }
}

// ==========================================
// SimulationSummary - 模拟列表行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub simulation_id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub order_count: usize,
    pub deadline_compliance: f64,
    pub machine_efficiency: f64,
    pub total_cleaning_time_minutes: i64,
    pub time_saved_minutes: i64,
    pub eco_grade: EcoGrade,
}
