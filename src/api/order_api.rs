// ==========================================
// 染整换色排产系统 - 订单 API
// ==========================================
// 职责: 订单录入、完工、查询、清空、演示数据
// 红线: 订单池最多 100 单, 容量校验在仓储事务内完成
// ==========================================

use chrono::Local;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::api::schedule_api::ScheduleBoard;
use crate::api::validator::{validate_status_update, OrderRequest};
use crate::domain::order::{Order, ORDER_CAPACITY};
use crate::engine::{GenerationMode, OrderGenerator};
use crate::repository::{OrderRepository, RepositoryError};

// ==========================================
// OrderApi - 订单 API
// ==========================================
pub struct OrderApi {
    order_repo: Arc<OrderRepository>,
    board: Arc<ScheduleBoard>,
}

impl OrderApi {
    /// # 参数
    /// - order_repo: 订单池仓储
    /// - board: 当前排产看板（清空订单池时作废）
    pub fn new(order_repo: Arc<OrderRepository>, board: Arc<ScheduleBoard>) -> Self {
        Self { order_repo, board }
    }

    // ==========================================
    // 录入
    // ==========================================

    /// 录入订单
    ///
    /// # 返回
    /// - Ok(Order): 分配了ID、状态为 PENDING 的订单
    /// - Err(InvalidInput): 请求字段非法
    /// - Err(CapacityExceeded): 订单池已满
    pub fn create_order(&self, request: &OrderRequest) -> ApiResult<Order> {
        let new_order = request.validate()?;

        match self
            .order_repo
            .insert_guarded(&new_order, Local::now().naive_local(), ORDER_CAPACITY)
        {
            Ok(order) => {
                info!(
                    order_id = order.id,
                    color_family = %order.color_family,
                    order_type = %order.order_type,
                    quantity_meters = order.quantity_meters,
                    deadline_hours = order.deadline_hours,
                    critical = order.is_critical(),
                    urgency_score = order.urgency_score(),
                    "订单已录入"
                );
                Ok(order)
            }
            Err(RepositoryError::CapacityExceeded { capacity }) => {
                warn!(capacity, color_name = %new_order.color_name, "订单池已满，拒绝录入");
                Err(ApiError::CapacityExceeded { capacity })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 批量生成演示订单（全部写入或全部拒绝）
    ///
    /// # 参数
    /// - count: 订单数
    pub fn populate_demo(&self, count: usize) -> ApiResult<Vec<Order>> {
        if count == 0 {
            return Err(ApiError::InvalidInput("演示订单数必须为正".to_string()));
        }

        let batch = OrderGenerator::generate(&mut rand::rng(), GenerationMode::Demo, count);
        let created = self.order_repo.insert_batch_guarded(
            &batch,
            Local::now().naive_local(),
            ORDER_CAPACITY,
        )?;

        info!(count = created.len(), "演示订单已生成");
        Ok(created)
    }

    // ==========================================
    // 状态变更
    // ==========================================

    /// 标记订单完成（已完成则原样返回）
    pub fn complete_order(&self, order_id: i64) -> ApiResult<Order> {
        let order = self.order_repo.mark_completed(order_id)?;
        info!(order_id, "订单已完成");
        Ok(order)
    }

    /// 更新订单状态（仅支持 COMPLETED）
    ///
    /// # 参数
    /// - order_id: 订单ID
    /// - status: 目标状态文本
    pub fn update_status(&self, order_id: i64, status: &str) -> ApiResult<Order> {
        validate_status_update(status)?;
        self.complete_order(order_id)
    }

    /// 清空订单池，并作废当前排产结果
    ///
    /// # 返回
    /// - Ok(usize): 删除的订单数
    pub fn clear_orders(&self) -> ApiResult<usize> {
        let mut board = self.board.lock();
        let removed = self.order_repo.delete_all()?;
        *board = None;

        info!(removed, "订单池已清空");
        Ok(removed)
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 订单池快照（按ID升序）
    pub fn list_orders(&self) -> ApiResult<Vec<Order>> {
        Ok(self.order_repo.list_all()?)
    }

    pub fn get_order(&self, order_id: i64) -> ApiResult<Order> {
        self.order_repo.find_by_id(order_id)?.ok_or_else(|| {
            RepositoryError::NotFound {
                entity: "Order".to_string(),
                id: order_id.to_string(),
            }
            .into()
        })
    }

    /// 当前订单数
    pub fn order_count(&self) -> ApiResult<usize> {
        Ok(self.order_repo.count()?)
    }
}
