// ==========================================
// 染整换色排产系统 - 引擎编排器
// ==========================================
// 主流程: 排序 → 交期补救 → 时间轴 → FIFO 对比 → 指标
// 纯计算: 不访问数据库,不修改入参
// 起点: 默认取参与订单中最晚的创建时间,与调用时刻无关,重复运行结果一致;
//       入池后很久才排产时,时间轴落在过去,交期达成率会偏乐观
// ==========================================

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::config::SchedulerConfig;
use crate::domain::order::Order;
use crate::domain::schedule::ScheduleResult;
use crate::engine::cleaning::CleaningModel;
use crate::engine::error::EngineResult;
use crate::engine::fifo::FifoBaseline;
use crate::engine::metrics::MetricsEngine;
use crate::engine::rescue::DeadlineRescuer;
use crate::engine::sequencer::ChangeoverSequencer;

// ==========================================
// ScheduleOrchestrator - 引擎编排器
// ==========================================
pub struct ScheduleOrchestrator {
    config: SchedulerConfig,
    sequencer: ChangeoverSequencer,
    baseline: FifoBaseline,
    metrics: MetricsEngine,
}

impl ScheduleOrchestrator {
    /// # 参数
    /// - config: 本次运行的参数快照
    pub fn new(config: SchedulerConfig) -> Self {
        let cleaning = CleaningModel::new(config.base_cleaning_minutes);
        Self {
            sequencer: ChangeoverSequencer::new(cleaning, config.production_rate_m_per_min),
            baseline: FifoBaseline::new(cleaning),
            metrics: MetricsEngine::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// 排产起点: 参与订单中最晚的创建时间
    pub fn start_instant(orders: &[Order]) -> Option<NaiveDateTime> {
        orders
            .iter()
            .filter(|o| !o.is_completed())
            .map(|o| o.created_at)
            .max()
    }

    /// 以最晚创建时间为起点执行排产
    pub fn run(&self, orders: &[Order]) -> EngineResult<ScheduleResult> {
        match Self::start_instant(orders) {
            Some(start) => self.run_from(orders, start),
            None => Ok(ScheduleResult::empty()),
        }
    }

    /// 从指定起点执行完整排产流程
    ///
    /// # 参数
    /// - orders: 订单快照（已完成订单会被忽略）
    /// - start: 排产起点
    ///
    /// # 返回
    /// - Ok: 排产结果（空集返回零指标结果）
    /// - Err(TimelineOverflow): 参数导致时间轴无法表示
    pub fn run_from(
        &self,
        orders: &[Order],
        start: NaiveDateTime,
    ) -> EngineResult<ScheduleResult> {
        let schedulable: Vec<Order> = orders
            .iter()
            .filter(|o| !o.is_completed())
            .cloned()
            .collect();

        if schedulable.is_empty() {
            return Ok(ScheduleResult::empty());
        }

        let critical_orders = schedulable.iter().filter(|o| o.is_critical()).count();
        let peak_urgency = schedulable
            .iter()
            .map(Order::urgency_score)
            .fold(0.0_f64, f64::max);

        info!(
            order_count = schedulable.len(),
            critical_orders,
            peak_urgency,
            start = %start,
            base_cleaning_minutes = self.config.base_cleaning_minutes,
            rescue_window = self.config.rescue_window,
            "开始执行排产流程"
        );

        // ==========================================
        // 步骤1: 换色最小化排序
        // ==========================================
        let initial = self.sequencer.sequence(&schedulable);

        // ==========================================
        // 步骤2: 交期补救
        // ==========================================
        let outcome =
            DeadlineRescuer::new(&self.sequencer, self.config.rescue_window).rescue(initial, start)?;
        debug!(rescued = outcome.rescued_order_ids.len(), "交期补救完成");

        // ==========================================
        // 步骤3: 时间轴
        // ==========================================
        let slots = self.sequencer.assign_times(&outcome.sequence, start)?;
        let optimized_cleaning_time_minutes: i64 =
            slots.iter().map(|s| s.cleaning_before_minutes).sum();

        // ==========================================
        // 步骤4: FIFO 对比与指标
        // ==========================================
        let fifo_cleaning_time_minutes = self.baseline.cleaning_time_minutes(&schedulable);
        let metrics = self.metrics.evaluate(
            &outcome.sequence,
            &slots,
            fifo_cleaning_time_minutes,
            optimized_cleaning_time_minutes,
        );

        info!(
            order_count = slots.len(),
            fifo_cleaning_minutes = fifo_cleaning_time_minutes,
            optimized_cleaning_minutes = optimized_cleaning_time_minutes,
            time_saved_minutes = metrics.time_saved_minutes,
            deadline_compliance = metrics.deadline_compliance,
            late_orders = metrics.late_order_count,
            eco_grade = %metrics.eco_grade,
            "排产流程完成"
        );

        Ok(ScheduleResult {
            generated_at: Some(start),
            slots,
            fifo_cleaning_time_minutes,
            optimized_cleaning_time_minutes,
            time_saved_minutes: metrics.time_saved_minutes,
            deadline_compliance: metrics.deadline_compliance,
            machine_efficiency: metrics.machine_efficiency,
            eco_grade: metrics.eco_grade,
            water_saved_liters: metrics.water_saved_liters,
            chemical_waste_saved_kg: metrics.chemical_waste_saved_kg,
            total_production_minutes: metrics.total_production_minutes,
            late_order_count: metrics.late_order_count,
            rescued_order_count: outcome.rescued_order_ids.len(),
        })
    }
}
