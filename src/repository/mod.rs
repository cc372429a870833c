// ==========================================
// 染整换色排产系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含排产逻辑
// 约束: 所有查询使用参数化
// ==========================================

pub mod error;
pub mod order_repo;
pub mod simulation_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use order_repo::OrderRepository;
pub use simulation_repo::SimulationRepository;
