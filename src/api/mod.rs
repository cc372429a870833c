// ==========================================
// 染整换色排产系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供传输层调用
// ==========================================

pub mod error;
pub mod order_api;
pub mod schedule_api;
pub mod simulation_api;
pub mod validator;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use order_api::OrderApi;
pub use schedule_api::{ScheduleApi, ScheduleBoard};
pub use simulation_api::{SimulationApi, DEFAULT_RECENT_LIMIT};
pub use validator::{validate_status_update, OrderRequest};
