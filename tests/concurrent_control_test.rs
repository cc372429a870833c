// ==========================================
// 并发控制测试
// ==========================================
// 职责: 验证容量守卫与排产看板在多线程下的一致性
// ==========================================


#[cfg(test)]
mod concurrent_control_test {
    use rainbow_scheduler::api::ApiError;
    use rainbow_scheduler::domain::{ColorFamily, OrderType, ORDER_CAPACITY};
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use crate::test_helpers::{create_test_state, order_request};

    #[test]
    fn test_concurrent_adds_never_exceed_capacity() {
        let (_tmp, state) = create_test_state();
        let state = Arc::new(state);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let state = Arc::clone(&state);
                thread::spawn(move || {
                    let mut accepted = 0usize;
                    let mut rejected = 0usize;
                    for i in 0..20 {
                        let family = ColorFamily::ALL[(t + i) % ColorFamily::ALL.len()];
                        match state
                            .order_api
                            .create_order(&order_request(family, OrderType::Standard, 150, 24))
                        {
                            Ok(_) => accepted += 1,
                            Err(ApiError::CapacityExceeded { .. }) => rejected += 1,
                            Err(e) => panic!("unexpected error: {}", e),
                        }
                    }
                    (accepted, rejected)
                })
            })
            .collect();

        let (accepted, rejected) = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .fold((0, 0), |acc, r| (acc.0 + r.0, acc.1 + r.1));

        assert_eq!(accepted, ORDER_CAPACITY);
        assert_eq!(rejected, 160 - ORDER_CAPACITY);

        let orders = state.order_api.list_orders().unwrap();
        assert_eq!(orders.len(), ORDER_CAPACITY);
        let ids: HashSet<i64> = orders.iter().map(|o| o.id).collect();
        assert_eq!(ids.len(), ORDER_CAPACITY);
    }

    #[test]
    fn test_generate_concurrent_with_intake_sees_whole_orders() {
        let (_tmp, state) = create_test_state();
        let state = Arc::new(state);
        state.order_api.populate_demo(40).unwrap();

        let writer = {
            let state = Arc::clone(&state);
            thread::spawn(move || {
                for _ in 0..30 {
                    state
                        .order_api
                        .create_order(&order_request(ColorFamily::LightColors, OrderType::Rush, 120, 12))
                        .unwrap();
                }
            })
        };

        let scheduler = {
            let state = Arc::clone(&state);
            thread::spawn(move || {
                (0..5)
                    .map(|_| state.schedule_api.generate().unwrap())
                    .collect::<Vec<_>>()
            })
        };

        writer.join().unwrap();
        let results = scheduler.join().unwrap();

        for result in &results {
            assert!(result.slots.len() >= 40 && result.slots.len() <= 70);
            let unique: HashSet<i64> = result.order_sequence().into_iter().collect();
            assert_eq!(unique.len(), result.slots.len());
        }

        // 最终一轮覆盖全部订单
        let last = state.schedule_api.generate().unwrap();
        assert_eq!(last.slots.len(), 70);
    }

    #[test]
    fn test_clear_and_generate_do_not_interleave() {
        let (_tmp, state) = create_test_state();
        let state = Arc::new(state);
        state.order_api.populate_demo(30).unwrap();

        let clearer = {
            let state = Arc::clone(&state);
            thread::spawn(move || state.order_api.clear_orders().unwrap())
        };
        let scheduler = {
            let state = Arc::clone(&state);
            thread::spawn(move || state.schedule_api.generate().unwrap())
        };

        assert_eq!(clearer.join().unwrap(), 30);
        let result = scheduler.join().unwrap();
        assert!(result.slots.is_empty() || result.slots.len() == 30);

        // 看板要么已被清空作废, 要么是清空之后生成的空结果
        match state.schedule_api.current_schedule().unwrap() {
            None => {}
            Some(current) => assert!(current.is_empty()),
        }
    }
}
