// ==========================================
// 染整换色排产系统 - 换色最小化排序引擎
// ==========================================
// 排序键: (色系明度序号, 订单类型优先级, 交期小时, 订单ID)
// 等价于: 按色系分桶 → 桶内按类型/交期/ID → 桶按浅到深拼接
// 时间轴: 下一单开始 = 上一单结束 + 换色清洗
// 时间推进一律走 checked 运算,溢出返回 TimelineOverflow
// ==========================================

use chrono::{NaiveDateTime, TimeDelta};
use std::cmp::Ordering;

use crate::domain::order::Order;
use crate::domain::schedule::ScheduleSlot;
use crate::engine::cleaning::CleaningModel;
use crate::engine::error::{EngineError, EngineResult};

/// 排序键
pub type SequenceKey = (usize, u8, i32, i64);

// ==========================================
// ChangeoverSequencer - 换色最小化排序引擎
// ==========================================
pub struct ChangeoverSequencer {
    cleaning: CleaningModel,
    production_rate_m_per_min: f64,
}

impl ChangeoverSequencer {
    /// # 参数
    /// - cleaning: 换色清洗模型
    /// - production_rate_m_per_min: 产速（米/分钟）
    pub fn new(cleaning: CleaningModel, production_rate_m_per_min: f64) -> Self {
        Self {
            cleaning,
            production_rate_m_per_min,
        }
    }

    pub fn sequence_key(order: &Order) -> SequenceKey {
        (
            order.color_family.index(),
            order.order_type.priority_rank(),
            order.deadline_hours,
            order.id,
        )
    }

    pub fn compare(a: &Order, b: &Order) -> Ordering {
        Self::sequence_key(a).cmp(&Self::sequence_key(b))
    }

    /// 生成初始生产序列（不含交期补救）
    pub fn sequence(&self, orders: &[Order]) -> Vec<Order> {
        let mut sequence = orders.to_vec();
        sequence.sort_by(Self::compare);
        sequence
    }

    /// 计算每一单的完工时刻
    pub fn completion_times(
        &self,
        sequence: &[Order],
        start: NaiveDateTime,
    ) -> EngineResult<Vec<NaiveDateTime>> {
        Ok(self
            .assign_times(sequence, start)?
            .into_iter()
            .map(|slot| slot.end_time)
            .collect())
    }

    /// 从起点依次分配生产时段
    ///
    /// # 参数
    /// - sequence: 已确定的生产序列
    /// - start: 排产起点
    ///
    /// # 返回
    /// - Ok: 与序列一一对应的时段
    /// - Err(TimelineOverflow): 某一单的时段超出可表示范围
    pub fn assign_times(
        &self,
        sequence: &[Order],
        start: NaiveDateTime,
    ) -> EngineResult<Vec<ScheduleSlot>> {
        let mut slots: Vec<ScheduleSlot> = Vec::with_capacity(sequence.len());
        let mut cursor = start;

        for (pos, order) in sequence.iter().enumerate() {
            let cleaning_before = match pos {
                0 => 0,
                _ => self
                    .cleaning
                    .cleaning_minutes(sequence[pos - 1].color_family, order.color_family),
            };
            let overflow = || EngineError::TimelineOverflow { order_id: order.id };

            let start_time = TimeDelta::try_minutes(cleaning_before)
                .and_then(|d| cursor.checked_add_signed(d))
                .ok_or_else(overflow)?;
            let end_time =
                TimeDelta::try_minutes(order.production_minutes(self.production_rate_m_per_min))
                    .and_then(|d| start_time.checked_add_signed(d))
                    .ok_or_else(overflow)?;

            slots.push(ScheduleSlot {
                order_id: order.id,
                color_family: order.color_family,
                start_time,
                end_time,
                cleaning_before_minutes: cleaning_before,
            });
            cursor = end_time;
        }

        Ok(slots)
    }
}
