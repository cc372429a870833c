// ==========================================
// 染整换色排产系统 - 引擎层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// 时间轴推进超出可表示的时间范围
    #[error("排产时间轴溢出: 订单 {order_id} 的时段无法表示")]
    TimelineOverflow { order_id: i64 },
}

pub type EngineResult<T> = Result<T, EngineError>;
