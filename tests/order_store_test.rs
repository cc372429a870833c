// ==========================================
// 订单池集成测试
// ==========================================
// 职责: 验证录入校验、容量守卫、完工、清空
// ==========================================


#[cfg(test)]
mod order_store_test {
    use rainbow_scheduler::api::{ApiError, OrderRequest};
    use rainbow_scheduler::domain::{ColorFamily, OrderStatus, OrderType, ORDER_CAPACITY};

    use crate::test_helpers::{create_test_state, order_request};

    #[test]
    fn test_create_order_assigns_increasing_ids() {
        let (_tmp, state) = create_test_state();
        let api = &state.order_api;

        let first = api
            .create_order(&order_request(ColorFamily::DarkColors, OrderType::Bulk, 500, 50))
            .unwrap();
        let second = api
            .create_order(&order_request(ColorFamily::WhitesPastels, OrderType::Rush, 200, 5))
            .unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.status, OrderStatus::Pending);
        assert!(first.scheduled_start_time.is_none());

        let listed: Vec<i64> = api.list_orders().unwrap().iter().map(|o| o.id).collect();
        assert_eq!(listed, vec![first.id, second.id]);
    }

    #[test]
    fn test_invalid_input_never_enters_store() {
        let (_tmp, state) = create_test_state();
        let api = &state.order_api;

        let bad = OrderRequest {
            color_name: "Neon".to_string(),
            color_family: "FLUORESCENT".to_string(),
            quantity_meters: 100,
            order_type: "RUSH".to_string(),
            deadline_hours: 10,
        };
        assert!(matches!(api.create_order(&bad), Err(ApiError::InvalidInput(_))));

        let zero_qty = order_request(ColorFamily::LightColors, OrderType::Standard, 0, 10);
        assert!(matches!(api.create_order(&zero_qty), Err(ApiError::InvalidInput(_))));

        assert_eq!(api.order_count().unwrap(), 0);
    }

    #[test]
    fn test_101st_order_is_rejected() {
        let (_tmp, state) = create_test_state();
        let api = &state.order_api;

        for _ in 0..ORDER_CAPACITY {
            api.create_order(&order_request(ColorFamily::MediumColors, OrderType::Standard, 100, 24))
                .unwrap();
        }

        let err = api
            .create_order(&order_request(ColorFamily::MediumColors, OrderType::Standard, 100, 24))
            .unwrap_err();
        assert!(matches!(err, ApiError::CapacityExceeded { capacity: 100 }));
        assert_eq!(api.order_count().unwrap(), ORDER_CAPACITY);
    }

    #[test]
    fn test_completed_orders_still_count_toward_capacity() {
        let (_tmp, state) = create_test_state();
        let api = &state.order_api;

        api.populate_demo(ORDER_CAPACITY).unwrap();
        let first = api.list_orders().unwrap()[0].id;
        api.complete_order(first).unwrap();

        let err = api
            .create_order(&order_request(ColorFamily::DarkColors, OrderType::Rush, 100, 8))
            .unwrap_err();
        assert!(matches!(err, ApiError::CapacityExceeded { .. }));
    }

    #[test]
    fn test_complete_unknown_and_repeat() {
        let (_tmp, state) = create_test_state();
        let api = &state.order_api;

        assert!(matches!(api.complete_order(9999), Err(ApiError::NotFound(_))));

        let order = api
            .create_order(&order_request(ColorFamily::LightColors, OrderType::Standard, 300, 30))
            .unwrap();
        let done = api.complete_order(order.id).unwrap();
        assert_eq!(done.status, OrderStatus::Completed);

        let again = api.complete_order(order.id).unwrap();
        assert_eq!(again, done);
        assert_eq!(api.get_order(order.id).unwrap(), done);
    }

    #[test]
    fn test_update_status_accepts_only_completed() {
        let (_tmp, state) = create_test_state();
        let api = &state.order_api;
        let order = api
            .create_order(&order_request(ColorFamily::LightColors, OrderType::Bulk, 300, 60))
            .unwrap();

        assert!(matches!(
            api.update_status(order.id, "SCHEDULED"),
            Err(ApiError::InvalidInput(_))
        ));
        assert_eq!(api.get_order(order.id).unwrap().status, OrderStatus::Pending);

        let done = api.update_status(order.id, "COMPLETED").unwrap();
        assert_eq!(done.status, OrderStatus::Completed);
    }

    #[test]
    fn test_populate_demo_is_all_or_nothing() {
        let (_tmp, state) = create_test_state();
        let api = &state.order_api;

        let created = api.populate_demo(60).unwrap();
        assert_eq!(created.len(), 60);
        for order in &created {
            assert!((8..72).contains(&order.deadline_hours));
            assert!((100..=1000).contains(&order.quantity_meters));
        }

        let err = api.populate_demo(41).unwrap_err();
        assert!(matches!(err, ApiError::CapacityExceeded { .. }));
        assert_eq!(api.order_count().unwrap(), 60);

        assert_eq!(api.populate_demo(40).unwrap().len(), 40);
        assert!(matches!(api.populate_demo(0), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_clear_removes_everything_and_ids_are_not_reused() {
        let (_tmp, state) = create_test_state();
        let api = &state.order_api;

        let before = api
            .create_order(&order_request(ColorFamily::DarkColors, OrderType::Rush, 100, 8))
            .unwrap();
        assert_eq!(api.clear_orders().unwrap(), 1);
        assert!(api.list_orders().unwrap().is_empty());

        let after = api
            .create_order(&order_request(ColorFamily::DarkColors, OrderType::Rush, 100, 8))
            .unwrap();
        assert!(after.id > before.id);
    }
}
