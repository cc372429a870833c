// ==========================================
// 染整换色排产系统 - 订单请求校验器
// ==========================================
// 职责: 原始请求(字符串枚举) → 已校验的 NewOrder
// 规则: 颜色名称非空; 米数、交期小时数为正; 枚举文本可识别
// ==========================================

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::order::NewOrder;
use crate::domain::types::{ColorFamily, OrderStatus, OrderType};

/// 订单录入请求（传输层原始形态）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub color_name: String,
    pub color_family: String,
    pub quantity_meters: i32,
    pub order_type: String,
    pub deadline_hours: i32,
}

impl OrderRequest {
    /// 校验并转换为领域对象
    ///
    /// # 返回
    /// - Ok(NewOrder): 校验通过
    /// - Err(ApiError::InvalidInput): 任一字段非法
    pub fn validate(&self) -> ApiResult<NewOrder> {
        let color_name = self.color_name.trim();
        if color_name.is_empty() {
            return Err(ApiError::InvalidInput("颜色名称不能为空".to_string()));
        }
        if self.quantity_meters <= 0 {
            return Err(ApiError::InvalidInput(format!(
                "米数必须为正: {}",
                self.quantity_meters
            )));
        }
        if self.deadline_hours <= 0 {
            return Err(ApiError::InvalidInput(format!(
                "交期小时数必须为正: {}",
                self.deadline_hours
            )));
        }

        let color_family = self
            .color_family
            .parse::<ColorFamily>()
            .map_err(ApiError::InvalidInput)?;
        let order_type = self
            .order_type
            .parse::<OrderType>()
            .map_err(ApiError::InvalidInput)?;

        Ok(NewOrder {
            color_name: color_name.to_string(),
            color_family,
            quantity_meters: self.quantity_meters,
            order_type,
            deadline_hours: self.deadline_hours,
        })
    }
}

/// 校验状态更新请求: 外部只允许置为 COMPLETED
pub fn validate_status_update(status: &str) -> ApiResult<OrderStatus> {
    match status.parse::<OrderStatus>() {
        Ok(OrderStatus::Completed) => Ok(OrderStatus::Completed),
        Ok(other) => Err(ApiError::InvalidInput(format!(
            "仅支持将订单置为 COMPLETED, 收到: {}",
            other
        ))),
        Err(msg) => Err(ApiError::InvalidInput(msg)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> OrderRequest {
        OrderRequest {
            color_name: " Crimson Red ".to_string(),
            color_family: "dark_colors".to_string(),
            quantity_meters: 400,
            order_type: "RUSH".to_string(),
            deadline_hours: 10,
        }
    }

    #[test]
    fn test_valid_request() {
        let order = request().validate().unwrap();
        assert_eq!(order.color_name, "Crimson Red");
        assert_eq!(order.color_family, ColorFamily::DarkColors);
        assert_eq!(order.order_type, OrderType::Rush);
    }

    #[test]
    fn test_rejects_bad_fields() {
        let mut r = request();
        r.color_name = "   ".to_string();
        assert!(matches!(r.validate(), Err(ApiError::InvalidInput(_))));

        let mut r = request();
        r.quantity_meters = 0;
        assert!(matches!(r.validate(), Err(ApiError::InvalidInput(_))));

        let mut r = request();
        r.deadline_hours = -3;
        assert!(matches!(r.validate(), Err(ApiError::InvalidInput(_))));

        let mut r = request();
        r.color_family = "NEON".to_string();
        assert!(matches!(r.validate(), Err(ApiError::InvalidInput(_))));

        let mut r = request();
        r.order_type = "EXPRESS".to_string();
        assert!(matches!(r.validate(), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_status_update_only_completed() {
        assert_eq!(validate_status_update("completed").unwrap(), OrderStatus::Completed);
        assert!(validate_status_update("SCHEDULED").is_err());
        assert!(validate_status_update("DONE").is_err());
    }
}
