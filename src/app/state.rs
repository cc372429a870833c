// ==========================================
// 染整换色排产系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 生命周期: 进程启动时创建,退出时释放; 无全局单例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{OrderApi, ScheduleApi, ScheduleBoard, SimulationApi};
use crate::config::ConfigManager;
use crate::db::{init_schema, open_sqlite_connection};
use crate::repository::{OrderRepository, SimulationRepository};

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 订单API
    pub order_api: Arc<OrderApi>,

    /// 排产API
    pub schedule_api: Arc<ScheduleApi>,

    /// 模拟API
    pub simulation_api: Arc<SimulationApi>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 当前排产看板
    pub schedule_board: Arc<ScheduleBoard>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开共享连接并建表
    /// 2. 初始化所有Repository
    /// 3. 创建所有API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!(db_path = %db_path, "初始化AppState");

        // 创建数据库连接（共享连接）
        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("无法初始化数据库结构: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let order_repo = Arc::new(OrderRepository::new(conn.clone()));
        let simulation_repo = Arc::new(SimulationRepository::new(conn.clone()));
        let config_manager = Arc::new(ConfigManager::from_connection(conn));

        // ==========================================
        // 初始化API层
        // ==========================================
        let schedule_board = Arc::new(ScheduleBoard::new());

        let order_api = Arc::new(OrderApi::new(order_repo.clone(), schedule_board.clone()));
        let schedule_api = Arc::new(ScheduleApi::new(
            order_repo,
            config_manager.clone(),
            schedule_board.clone(),
        ));
        let simulation_api = Arc::new(SimulationApi::new(simulation_repo, config_manager.clone()));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            order_api,
            schedule_api,
            simulation_api,
            config_manager,
            schedule_board,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先级:
/// 1. 环境变量 RAINBOW_SCHEDULER_DB_PATH
/// 2. 用户数据目录下的 rainbow-scheduler/rainbow_scheduler.db
/// 3. 当前目录 ./rainbow_scheduler.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("RAINBOW_SCHEDULER_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./rainbow_scheduler.db");

    if let Some(data_dir) = dirs::data_dir() {
        #[cfg(debug_assertions)]
        let dir = data_dir.join("rainbow-scheduler-dev");

        #[cfg(not(debug_assertions))]
        let dir = data_dir.join("rainbow-scheduler");

        // 目录创建失败时退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("rainbow_scheduler.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }

    #[test]
    fn test_new_with_temp_db() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("state.db").to_string_lossy().to_string();

        let state = AppState::new(db_path.clone()).unwrap();
        assert_eq!(state.db_path, db_path);
        assert_eq!(state.order_api.order_count().unwrap(), 0);
        assert!(state.schedule_api.current_schedule().unwrap().is_none());
    }
}
