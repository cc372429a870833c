// ==========================================
// 染整换色排产系统 - 主入口
// ==========================================
// 运行一次高峰模拟并输出摘要
// 环境变量: RAINBOW_SCHEDULER_DB_PATH / RUST_LOG
// ==========================================

use anyhow::{anyhow, Context, Result};

use rainbow_scheduler::app::{get_default_db_path, AppState};
use rainbow_scheduler::{logging, APP_NAME, VERSION};

fn main() -> Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", APP_NAME, VERSION);
    tracing::info!("==================================================");

    let db_path = get_default_db_path();
    tracing::info!(db_path = %db_path, "使用数据库");

    let state = AppState::new(db_path).map_err(|e| anyhow!(e))?;

    let simulation = state
        .simulation_api
        .run_simulation(None)
        .context("高峰模拟运行失败")?;
    let summary = simulation.summary();

    tracing::info!(
        simulation_id = %summary.simulation_id,
        name = %summary.name,
        order_count = summary.order_count,
        cleaning_minutes = summary.total_cleaning_time_minutes,
        time_saved_minutes = summary.time_saved_minutes,
        deadline_compliance = summary.deadline_compliance,
        machine_efficiency = summary.machine_efficiency,
        eco_grade = %summary.eco_grade,
        "模拟完成"
    );

    let recent = state
        .simulation_api
        .list_recent(None)
        .context("查询最近模拟失败")?;
    for row in &recent {
        tracing::info!(
            name = %row.name,
            created_at = %row.created_at,
            time_saved_minutes = row.time_saved_minutes,
            eco_grade = %row.eco_grade,
            "历史模拟"
        );
    }

    Ok(())
}
