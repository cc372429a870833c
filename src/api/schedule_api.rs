// ==========================================
// 染整换色排产系统 - 排产 API
// ==========================================
// 职责: 生成排产、查询当前结果、FIFO 对比
// 并发: 排产全程持有看板锁; 锁顺序固定为 看板 → 连接
// ==========================================

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::schedule::{CleaningComparison, ScheduleResult};
use crate::engine::ScheduleOrchestrator;
use crate::repository::OrderRepository;

// ==========================================
// ScheduleBoard - 当前排产结果看板
// ==========================================
// 新一轮排产整体替换,清空订单池时作废
// 看板内容只在末尾整体赋值,锁中毒时内容仍完整,直接沿用
#[derive(Debug, Default)]
pub struct ScheduleBoard {
    current: Mutex<Option<ScheduleResult>>,
}

impl ScheduleBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取看板锁
    pub fn lock(&self) -> MutexGuard<'_, Option<ScheduleResult>> {
        self.current.lock().unwrap_or_else(|poisoned| {
            warn!("排产看板锁已中毒，沿用最近一次完整结果");
            PoisonError::into_inner(poisoned)
        })
    }

    /// 当前排产结果的副本
    pub fn snapshot(&self) -> Option<ScheduleResult> {
        self.lock().clone()
    }
}

// ==========================================
// ScheduleApi - 排产 API
// ==========================================
pub struct ScheduleApi {
    order_repo: Arc<OrderRepository>,
    config_manager: Arc<ConfigManager>,
    board: Arc<ScheduleBoard>,
}

impl ScheduleApi {
    pub fn new(
        order_repo: Arc<OrderRepository>,
        config_manager: Arc<ConfigManager>,
        board: Arc<ScheduleBoard>,
    ) -> Self {
        Self {
            order_repo,
            config_manager,
            board,
        }
    }

    /// 对当前订单池执行一次排产
    ///
    /// 流程:
    /// 1) 读取参数快照
    /// 2) 单条查询取得可排产订单快照
    /// 3) 编排器计算
    /// 4) 单事务回写状态与时间(跳过期间已完成的订单)
    /// 5) 替换看板结果
    ///
    /// # 返回
    /// - Ok(ScheduleResult): 无待排产订单时为零指标结果
    pub fn generate(&self) -> ApiResult<ScheduleResult> {
        let _perf = crate::perf::PerfGuard::new("schedule.generate");
        let mut board = self.board.lock();

        let config = self.config_manager.load_scheduler_config()?;
        let orders = self.order_repo.list_schedulable()?;

        if orders.is_empty() {
            warn!("没有待排产订单，返回空排产结果");
            let result = ScheduleResult::empty();
            *board = Some(result.clone());
            return Ok(result);
        }

        let result = ScheduleOrchestrator::new(config).run(&orders)?;
        let scheduled = self.order_repo.apply_schedule(&result.slots)?;

        info!(
            snapshot_orders = orders.len(),
            scheduled_orders = scheduled,
            optimized_cleaning_minutes = result.optimized_cleaning_time_minutes,
            time_saved_minutes = result.time_saved_minutes,
            "排产结果已回写"
        );

        *board = Some(result.clone());
        Ok(result)
    }

    /// 最近一次排产的清洗时长对比
    ///
    /// # 返回
    /// - Err(NotFound): 尚未排产或订单池已清空
    pub fn compare(&self) -> ApiResult<CleaningComparison> {
        self.board
            .snapshot()
            .map(|result| result.comparison())
            .ok_or_else(|| ApiError::NotFound("尚无排产结果".to_string()))
    }

    /// 最近一次排产结果
    pub fn current_schedule(&self) -> ApiResult<Option<ScheduleResult>> {
        Ok(self.board.snapshot())
    }
}
