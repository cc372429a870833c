// ==========================================
// 染整换色排产系统 - 应用层
// ==========================================
// 职责: 组装仓储与 API, 供入口程序与传输层使用
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
