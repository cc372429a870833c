// ==========================================
// 染整换色排产系统 - 演示数据初始化
// ==========================================
// 用法: seed_demo_orders [db_path] [count]
// 清空订单池 → 生成演示订单 → 执行一次排产
// ==========================================

use anyhow::{anyhow, Context, Result};

use rainbow_scheduler::app::{get_default_db_path, AppState};
use rainbow_scheduler::domain::ORDER_CAPACITY;
use rainbow_scheduler::logging;

const DEFAULT_ORDER_COUNT: usize = 30;

fn main() -> Result<()> {
    logging::init();

    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);

    let count = std::env::args()
        .nth(2)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_ORDER_COUNT)
        .clamp(1, ORDER_CAPACITY);

    let state = AppState::new(db_path.clone()).map_err(|e| anyhow!(e))?;

    let removed = state.order_api.clear_orders().context("清空订单池失败")?;
    let created = state
        .order_api
        .populate_demo(count)
        .context("生成演示订单失败")?;
    let result = state.schedule_api.generate().context("排产失败")?;

    eprintln!("Database: {}", db_path);
    eprintln!("Removed {} orders, created {}", removed, created.len());
    eprintln!(
        "Cleaning: FIFO {} min -> optimized {} min (saved {} min)",
        result.fifo_cleaning_time_minutes,
        result.optimized_cleaning_time_minutes,
        result.time_saved_minutes
    );
    eprintln!(
        "Compliance {}%, efficiency {}%, eco grade {}",
        result.deadline_compliance, result.machine_efficiency, result.eco_grade
    );

    Ok(())
}
