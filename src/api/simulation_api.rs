// ==========================================
// 染整换色排产系统 - 模拟 API
// ==========================================
// 职责: 高峰模拟运行、快照归档与回看
// 红线: 模拟批次与在线订单池完全隔离,不读写 dye_order
// 批次: 固定 100 单(与订单池容量一致)
// ==========================================

use chrono::{Local, NaiveDateTime};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::order::{Order, ORDER_CAPACITY};
use crate::domain::schedule::{ScheduleResult, ScheduleSlot};
use crate::domain::simulation::{Simulation, SimulationSummary};
use crate::domain::types::OrderStatus;
use crate::engine::{GenerationMode, OrderGenerator, ScheduleOrchestrator};
use crate::repository::{RepositoryError, SimulationRepository};

/// 仪表盘默认展示的快照数
pub const DEFAULT_RECENT_LIMIT: usize = 10;

// ==========================================
// SimulationApi - 模拟 API
// ==========================================
pub struct SimulationApi {
    simulation_repo: Arc<SimulationRepository>,
    config_manager: Arc<ConfigManager>,
}

impl SimulationApi {
    pub fn new(simulation_repo: Arc<SimulationRepository>, config_manager: Arc<ConfigManager>) -> Self {
        Self {
            simulation_repo,
            config_manager,
        }
    }

    // ==========================================
    // 归档
    // ==========================================

    /// 归档一次运行
    ///
    /// # 参数
    /// - name: 快照名称
    /// - orders: 所用订单集
    /// - result: 排产结果
    ///
    /// # 返回
    /// 新快照（新ID、当前时间）
    pub fn archive(&self, name: &str, orders: Vec<Order>, result: ScheduleResult) -> ApiResult<Simulation> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::InvalidInput("模拟名称不能为空".to_string()));
        }

        let simulation = Simulation {
            simulation_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: Local::now().naive_local(),
            orders,
            result,
        };
        self.simulation_repo.insert(&simulation)?;

        info!(
            simulation_id = %simulation.simulation_id,
            name = %simulation.name,
            order_count = simulation.orders.len(),
            "模拟快照已归档"
        );
        Ok(simulation)
    }

    // ==========================================
    // 模拟运行
    // ==========================================

    /// 生成一批高峰订单、排产并归档
    ///
    /// # 参数
    /// - name: 快照名称; 为空时使用 "Test Case {n}"
    pub fn run_simulation(&self, name: Option<&str>) -> ApiResult<Simulation> {
        let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(n) => n.to_string(),
            None => format!("Test Case {}", self.simulation_repo.count()? + 1),
        };
        self.run_named(&name)
    }

    /// 连续运行多次高峰模拟
    ///
    /// # 参数
    /// - count: 运行次数,快照名为 "Peak Test Case {i}"
    pub fn run_peak_suite(&self, count: usize) -> ApiResult<Vec<Simulation>> {
        let _perf = crate::perf::PerfGuard::new("simulation.run_peak_suite");
        (1..=count)
            .map(|i| self.run_named(&format!("Peak Test Case {}", i)))
            .collect()
    }

    fn run_named(&self, name: &str) -> ApiResult<Simulation> {
        let config = self.config_manager.load_scheduler_config()?;
        let now = Local::now().naive_local();

        let orders: Vec<Order> =
            OrderGenerator::generate(&mut rand::rng(), GenerationMode::Peak, ORDER_CAPACITY)
                .into_iter()
                .zip(1_i64..)
                .map(|(new_order, local_id)| new_order.into_order(local_id, now))
                .collect();

        let result = ScheduleOrchestrator::new(config).run_from(&orders, now)?;
        let orders = annotate_with_schedule(orders, &result.slots);

        self.archive(name, orders, result)
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 全部快照（创建顺序）
    pub fn list_simulations(&self) -> ApiResult<Vec<Simulation>> {
        Ok(self.simulation_repo.list_all()?)
    }

    /// 全部快照摘要（创建顺序）
    pub fn list_summaries(&self) -> ApiResult<Vec<SimulationSummary>> {
        Ok(self
            .list_simulations()?
            .iter()
            .map(Simulation::summary)
            .collect())
    }

    /// 最近的快照摘要（最新在前）
    ///
    /// # 参数
    /// - limit: 条数, None 时为 10
    pub fn list_recent(&self, limit: Option<usize>) -> ApiResult<Vec<SimulationSummary>> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT);
        Ok(self
            .simulation_repo
            .list_recent(limit)?
            .iter()
            .map(Simulation::summary)
            .collect())
    }

    pub fn get_simulation(&self, simulation_id: &str) -> ApiResult<Simulation> {
        self.simulation_repo
            .find_by_id(simulation_id)?
            .ok_or_else(|| simulation_not_found(simulation_id))
    }

    /// 快照归档的订单集
    pub fn simulation_orders(&self, simulation_id: &str) -> ApiResult<Vec<Order>> {
        self.simulation_repo
            .find_orders(simulation_id)?
            .ok_or_else(|| simulation_not_found(simulation_id))
    }
}

fn simulation_not_found(simulation_id: &str) -> ApiError {
    RepositoryError::NotFound {
        entity: "Simulation".to_string(),
        id: simulation_id.to_string(),
    }
    .into()
}

/// 将排产时段写回订单副本（用于归档回看）
fn annotate_with_schedule(orders: Vec<Order>, slots: &[ScheduleSlot]) -> Vec<Order> {
    let times: HashMap<i64, (NaiveDateTime, NaiveDateTime)> = slots
        .iter()
        .map(|s| (s.order_id, (s.start_time, s.end_time)))
        .collect();

    orders
        .into_iter()
        .map(|order| match times.get(&order.id) {
            Some(&(start, end)) => Order {
                status: OrderStatus::Scheduled,
                scheduled_start_time: Some(start),
                scheduled_end_time: Some(end),
                ..order
            },
            None => order,
        })
        .collect()
}
