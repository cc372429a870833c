// ==========================================
// 染整换色排产系统 - FIFO 基线
// ==========================================
// 按提交顺序(ID升序)生产时的清洗总时长
// 只作对比标尺,不作执行方案; 不修改订单
// ==========================================

use crate::domain::order::Order;
use crate::engine::cleaning::CleaningModel;

pub struct FifoBaseline {
    cleaning: CleaningModel,
}

impl FifoBaseline {
    pub fn new(cleaning: CleaningModel) -> Self {
        Self { cleaning }
    }

    /// 计算 FIFO 清洗总时长（分钟）
    pub fn cleaning_time_minutes(&self, orders: &[Order]) -> i64 {
        let mut by_submission: Vec<&Order> = orders.iter().collect();
        by_submission.sort_by_key(|o| o.id);
        self.cleaning
            .sequence_cleaning_minutes(by_submission.iter().map(|o| o.color_family))
    }
}
