// ==========================================
// 染整换色排产系统 - 交期补救引擎
// ==========================================
// 有界局部修复(非最优求解):
// - 顺序扫描,发现预计完工晚于交期的订单
// - 在其前方 RESCUE_WINDOW 个位置内,由近到远寻找可交换对象:
//   类型优先级不高于迟交订单,色系相同或相邻
// - 交换后迟交订单须按期完工,且原本按期的 RUSH 订单不得变为迟交
// - 找不到则保持迟交(计入达成率,不丢弃)
// 复杂度: 每个位置与每个候选都重算整条时间轴, O(n²·w); 订单池上限 100 单
// ==========================================

use chrono::NaiveDateTime;
use tracing::debug;

use crate::domain::order::Order;
use crate::domain::types::OrderType;
use crate::engine::error::EngineResult;
use crate::engine::sequencer::ChangeoverSequencer;

/// 补救结果
#[derive(Debug, Clone)]
pub struct RescueOutcome {
    pub sequence: Vec<Order>,
    pub rescued_order_ids: Vec<i64>,
}

// ==========================================
// DeadlineRescuer - 交期补救引擎
// ==========================================
pub struct DeadlineRescuer<'a> {
    sequencer: &'a ChangeoverSequencer,
    window: usize,
}

impl<'a> DeadlineRescuer<'a> {
    /// # 参数
    /// - sequencer: 用于重算时间轴
    /// - window: 向前搜索的最大位置数
    pub fn new(sequencer: &'a ChangeoverSequencer, window: usize) -> Self {
        Self { sequencer, window }
    }

    /// 对初始序列执行一次前向补救
    ///
    /// # 返回
    /// - Err(TimelineOverflow): 时间轴无法表示
    pub fn rescue(
        &self,
        mut sequence: Vec<Order>,
        start: NaiveDateTime,
    ) -> EngineResult<RescueOutcome> {
        let mut rescued_order_ids = Vec::new();

        if self.window == 0 {
            return Ok(RescueOutcome {
                sequence,
                rescued_order_ids,
            });
        }

        for late_pos in 0..sequence.len() {
            let ends = self.sequencer.completion_times(&sequence, start)?;
            if ends[late_pos] <= sequence[late_pos].deadline_at() {
                continue;
            }

            if let Some(swap_pos) = self.find_swap(&sequence, &ends, late_pos, start)? {
                debug!(
                    order_id = sequence[late_pos].id,
                    from = late_pos,
                    to = swap_pos,
                    displaced_order_id = sequence[swap_pos].id,
                    "交期补救: 前移迟交订单"
                );
                rescued_order_ids.push(sequence[late_pos].id);
                sequence.swap(late_pos, swap_pos);
            }
        }

        Ok(RescueOutcome {
            sequence,
            rescued_order_ids,
        })
    }

    /// 由近到远寻找第一个可行的交换位置
    fn find_swap(
        &self,
        sequence: &[Order],
        ends: &[NaiveDateTime],
        late_pos: usize,
        start: NaiveDateTime,
    ) -> EngineResult<Option<usize>> {
        let late = &sequence[late_pos];
        let lower = late_pos.saturating_sub(self.window);

        for candidate_pos in (lower..late_pos).rev() {
            let candidate = &sequence[candidate_pos];
            if candidate.order_type.priority_rank() < late.order_type.priority_rank() {
                continue;
            }
            if !candidate.color_family.is_adjacent_or_same(late.color_family) {
                continue;
            }

            let mut trial = sequence.to_vec();
            trial.swap(late_pos, candidate_pos);
            let trial_ends = self.sequencer.completion_times(&trial, start)?;

            if trial_ends[candidate_pos] > late.deadline_at() {
                continue;
            }

            // 原本按期的 RUSH 订单不得变为迟交
            let rush_kept = (candidate_pos..sequence.len()).all(|pos| {
                let order = &sequence[pos];
                if order.order_type != OrderType::Rush || ends[pos] > order.deadline_at() {
                    return true;
                }
                let new_pos = match pos {
                    p if p == late_pos => candidate_pos,
                    p if p == candidate_pos => late_pos,
                    p => p,
                };
                trial_ends[new_pos] <= order.deadline_at()
            });
            if rush_kept {
                return Ok(Some(candidate_pos));
            }
        }

        Ok(None)
    }
}
