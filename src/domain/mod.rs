// ==========================================
// 染整换色排产系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod order;
pub mod schedule;
pub mod simulation;
pub mod types;

// 重导出核心类型
pub use order::{NewOrder, Order, CRITICAL_DEADLINE_HOURS, ORDER_CAPACITY};
pub use schedule::{CleaningComparison, ScheduleResult, ScheduleSlot};
pub use simulation::{Simulation, SimulationSummary};
pub use types::{ColorFamily, EcoGrade, OrderStatus, OrderType};
