// ==========================================
// 染整换色排产系统 - 引擎层
// ==========================================
// 职责: 实现排产规则与指标计算
// 红线: Engine 不拼 SQL, 不持有连接
// ==========================================

pub mod cleaning;
pub mod error;
pub mod fifo;
pub mod metrics;
pub mod orchestrator;
pub mod order_generator;
pub mod rescue;
pub mod sequencer;

// 重导出核心引擎
pub use cleaning::{CleaningModel, MAX_BASE_CLEANING_MINUTES};
pub use error::{EngineError, EngineResult};
pub use fifo::FifoBaseline;
pub use metrics::{MetricsEngine, ScheduleMetrics};
pub use orchestrator::ScheduleOrchestrator;
pub use order_generator::{GenerationMode, OrderGenerator, COLOR_PALETTE};
pub use rescue::{DeadlineRescuer, RescueOutcome};
pub use sequencer::{ChangeoverSequencer, SequenceKey};
