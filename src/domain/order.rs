// ==========================================
// 染整换色排产系统 - 订单领域模型
// ==========================================
// 红线: 订单池同时最多 100 单, 超出直接拒绝(不排队)
// 状态单向流转: PENDING → SCHEDULED → COMPLETED
// ==========================================

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ColorFamily, OrderStatus, OrderType};

/// 订单池容量上限
pub const ORDER_CAPACITY: usize = 100;

/// 关键订单的交期阈值（小时）
pub const CRITICAL_DEADLINE_HOURS: i32 = 12;

// ==========================================
// Order - 染色订单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,                                      // 订单ID（单调递增）
    pub color_name: String,                           // 颜色名称
    pub color_family: ColorFamily,                    // 色系
    pub quantity_meters: i32,                         // 米数
    pub order_type: OrderType,                        // 订单类型
    pub deadline_hours: i32,                          // 交期（创建后小时数）
    pub status: OrderStatus,                          // 状态
    pub created_at: NaiveDateTime,                    // 创建时间（不可变）
    pub scheduled_start_time: Option<NaiveDateTime>,  // 排产开始时间
    pub scheduled_end_time: Option<NaiveDateTime>,    // 排产结束时间
}

impl Order {
    /// 交期时刻 = 创建时间 + 交期小时数
    pub fn deadline_at(&self) -> NaiveDateTime {
        self.created_at + Duration::hours(i64::from(self.deadline_hours))
    }

    /// 紧迫度 = 米数 × 价格系数 / 交期小时数
    pub fn urgency_score(&self) -> f64 {
        if self.deadline_hours <= 0 {
            return 0.0;
        }
        f64::from(self.quantity_meters) * self.order_type.price_multiplier()
            / f64::from(self.deadline_hours)
    }

    /// 是否为关键订单（加急或交期不足 12 小时）
    pub fn is_critical(&self) -> bool {
        self.deadline_hours < CRITICAL_DEADLINE_HOURS || self.order_type == OrderType::Rush
    }

    pub fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed
    }

    /// 生产时长（分钟，向上取整）
    ///
    /// # 参数
    /// - rate_m_per_min: 产速（米/分钟）
    pub fn production_minutes(&self, rate_m_per_min: f64) -> i64 {
        if rate_m_per_min <= 0.0 {
            return 0;
        }
        (f64::from(self.quantity_meters) / rate_m_per_min).ceil() as i64
    }
}

// ==========================================
// NewOrder - 已校验的入池请求
// ==========================================
// 由 api::validator 从原始请求转换而来,字段已保证合法
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub color_name: String,
    pub color_family: ColorFamily,
    pub quantity_meters: i32,
    pub order_type: OrderType,
    pub deadline_hours: i32,
}

impl NewOrder {
    /// 以给定 ID 与创建时间生成待排产订单（用于模拟批次）
    pub fn into_order(self, id: i64, created_at: NaiveDateTime) -> Order {
        Order {
            id,
            color_name: self.color_name,
            color_family: self.color_family,
            quantity_meters: self.quantity_meters,
            order_type: self.order_type,
            deadline_hours: self.deadline_hours,
            status: OrderStatus::Pending,
            created_at,
            scheduled_start_time: None,
            scheduled_end_time: None,
        }
    }
}
