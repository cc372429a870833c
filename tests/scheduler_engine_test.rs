// ==========================================
// 排产引擎集成测试
// ==========================================
// 职责: 在随机(固定种子)订单集上验证排序、补救、指标的整体性质
// ==========================================


#[cfg(test)]
mod scheduler_engine_test {
    use rainbow_scheduler::config::SchedulerConfig;
    use rainbow_scheduler::domain::{ColorFamily, Order, OrderType};
    use rainbow_scheduler::engine::{
        ChangeoverSequencer, CleaningModel, DeadlineRescuer, FifoBaseline, GenerationMode,
        OrderGenerator, ScheduleOrchestrator,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    use crate::test_helpers::{base_time, make_order};

    fn seeded_orders(seed: u64, mode: GenerationMode, count: usize) -> Vec<Order> {
        OrderGenerator::generate(&mut StdRng::seed_from_u64(seed), mode, count)
            .into_iter()
            .zip(1_i64..)
            .map(|(new_order, id)| new_order.into_order(id, base_time()))
            .collect()
    }

    #[test]
    fn test_three_order_example_regardless_of_input_order() {
        let orchestrator = ScheduleOrchestrator::new(SchedulerConfig::default());
        let a = make_order(1, ColorFamily::DarkColors, OrderType::Bulk, 200, 50);
        let b = make_order(2, ColorFamily::WhitesPastels, OrderType::Rush, 200, 5);
        let c = make_order(3, ColorFamily::DarkColors, OrderType::Rush, 200, 5);

        for input in [
            vec![a.clone(), b.clone(), c.clone()],
            vec![c.clone(), b.clone(), a.clone()],
            vec![b.clone(), a.clone(), c.clone()],
        ] {
            let result = orchestrator.run(&input).unwrap();
            assert_eq!(result.order_sequence(), vec![2, 3, 1]);
            assert_eq!(result.optimized_cleaning_time_minutes, 90);
            assert_eq!(result.fifo_cleaning_time_minutes, 180);
            assert_eq!(result.time_saved_minutes, 90);
        }
    }

    #[test]
    fn test_optimized_never_worse_than_fifo_with_loose_deadlines() {
        let orchestrator = ScheduleOrchestrator::new(SchedulerConfig::default());
        for seed in 0..20 {
            let mut orders = seeded_orders(seed, GenerationMode::Demo, 100);
            for order in &mut orders {
                order.deadline_hours = 10_000;
            }
            let result = orchestrator.run(&orders).unwrap();
            assert_eq!(result.rescued_order_count, 0);
            assert_eq!(result.deadline_compliance, 100.0);
            // 已按色系聚类: 最多 4 次换色, 总计不超过一次全程跨度
            assert!(result.optimized_cleaning_time_minutes <= 4 * 30);
            assert!(result.optimized_cleaning_time_minutes <= result.fifo_cleaning_time_minutes);
        }
    }

    #[test]
    fn test_every_order_scheduled_exactly_once() {
        let orchestrator = ScheduleOrchestrator::new(SchedulerConfig::default());
        for seed in 0..10 {
            let orders = seeded_orders(seed, GenerationMode::Peak, 100);
            let result = orchestrator.run(&orders).unwrap();

            let ids: HashSet<i64> = result.order_sequence().into_iter().collect();
            assert_eq!(ids.len(), 100);
            let on_time = 100 - result.late_order_count;
            assert_eq!(result.deadline_compliance, on_time as f64);

            // 时间轴首尾相接
            for pair in result.slots.windows(2) {
                assert_eq!(
                    pair[1].start_time,
                    pair[0].end_time + chrono::Duration::minutes(pair[1].cleaning_before_minutes)
                );
            }
            let cleaning: i64 = result.slots.iter().map(|s| s.cleaning_before_minutes).sum();
            assert_eq!(cleaning, result.optimized_cleaning_time_minutes);
        }
    }

    #[test]
    fn test_rescue_never_makes_on_time_rush_late() {
        let cleaning = CleaningModel::new(30);
        let sequencer = ChangeoverSequencer::new(cleaning, 10.0);

        for seed in 0..20 {
            let orders = seeded_orders(seed, GenerationMode::Peak, 100);
            let initial = sequencer.sequence(&orders);
            let initial_ends = sequencer.completion_times(&initial, base_time()).unwrap();
            let on_time_rush: Vec<i64> = initial
                .iter()
                .zip(&initial_ends)
                .filter(|(o, end)| o.order_type == OrderType::Rush && **end <= o.deadline_at())
                .map(|(o, _)| o.id)
                .collect();

            let outcome = DeadlineRescuer::new(&sequencer, 10)
                .rescue(initial, base_time())
                .unwrap();
            let final_ends = sequencer
                .completion_times(&outcome.sequence, base_time())
                .unwrap();

            for (order, end) in outcome.sequence.iter().zip(&final_ends) {
                if on_time_rush.contains(&order.id) {
                    assert!(*end <= order.deadline_at(), "seed {} order {}", seed, order.id);
                }
            }
        }
    }

    #[test]
    fn test_no_swaps_matches_disabled_rescue() {
        let loose = ScheduleOrchestrator::new(SchedulerConfig {
            rescue_window: 0,
            ..SchedulerConfig::default()
        });
        let rescuing = ScheduleOrchestrator::new(SchedulerConfig::default());

        for seed in 0..10 {
            let orders = seeded_orders(seed, GenerationMode::Peak, 60);
            let without = loose.run(&orders).unwrap();
            let with = rescuing.run(&orders).unwrap();
            assert_eq!(without.rescued_order_count, 0);
            if with.rescued_order_count == 0 {
                assert_eq!(with, without);
            }
        }
    }

    #[test]
    fn test_fifo_baseline_matches_orchestrator() {
        let baseline = FifoBaseline::new(CleaningModel::new(30));
        let orchestrator = ScheduleOrchestrator::new(SchedulerConfig::default());
        let orders = seeded_orders(99, GenerationMode::Demo, 80);
        assert_eq!(
            baseline.cleaning_time_minutes(&orders),
            orchestrator.run(&orders).unwrap().fifo_cleaning_time_minutes
        );
    }

    #[test]
    fn test_runs_are_deterministic_for_same_input() {
        let orchestrator = ScheduleOrchestrator::new(SchedulerConfig::default());
        let orders = seeded_orders(5, GenerationMode::Peak, 100);
        assert_eq!(
            orchestrator.run(&orders).unwrap(),
            orchestrator.run(&orders).unwrap()
        );
    }
}
