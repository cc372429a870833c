// ==========================================
// 染整换色排产系统 - 模拟订单生成器
// ==========================================
// DEMO 模式: 类型均匀分布, 交期 8-71 小时
// PEAK 模式: 30% RUSH(8-12h) / 50% STANDARD(24-48h) / 20% BULK(48-72h)
// 两种模式: 色系均匀分布, 米数 100-1000
// ==========================================

use rand::Rng;

use crate::domain::order::NewOrder;
use crate::domain::types::{ColorFamily, OrderType};

/// 颜色名称调色板
pub const COLOR_PALETTE: [&str; 10] = [
    "Royal Blue",
    "Crimson Red",
    "Forest Green",
    "Golden Yellow",
    "Deep Purple",
    "Sky Blue",
    "Terracotta",
    "Sage Green",
    "Navy Blue",
    "Pastel Pink",
];

const ORDER_TYPES: [OrderType; 3] = [OrderType::Rush, OrderType::Standard, OrderType::Bulk];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    Demo, // 演示数据
    Peak, // 高峰模拟
}

// ==========================================
// OrderGenerator - 模拟订单生成器
// ==========================================
pub struct OrderGenerator;

impl OrderGenerator {
    /// 生成一批订单请求
    ///
    /// # 参数
    /// - rng: 随机源（测试可传入固定种子）
    /// - mode: 生成模式
    /// - count: 订单数
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, mode: GenerationMode, count: usize) -> Vec<NewOrder> {
        (0..count)
            .map(|position| Self::generate_one(rng, mode, position))
            .collect()
    }

    fn generate_one<R: Rng + ?Sized>(rng: &mut R, mode: GenerationMode, position: usize) -> NewOrder {
        let (order_type, deadline_hours) = match mode {
            GenerationMode::Demo => (
                ORDER_TYPES[rng.random_range(0..ORDER_TYPES.len())],
                rng.random_range(8..72),
            ),
            GenerationMode::Peak => {
                let roll: u32 = rng.random_range(0..100);
                if roll < 30 {
                    (OrderType::Rush, rng.random_range(8..=12))
                } else if roll < 80 {
                    (OrderType::Standard, rng.random_range(24..=48))
                } else {
                    (OrderType::Bulk, rng.random_range(48..=72))
                }
            }
        };

        let color = COLOR_PALETTE[rng.random_range(0..COLOR_PALETTE.len())];

        NewOrder {
            color_name: format!("{} {}", color, position + 1),
            color_family: ColorFamily::ALL[rng.random_range(0..ColorFamily::ALL.len())],
            quantity_meters: rng.random_range(100..=1000),
            order_type,
            deadline_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = OrderGenerator::generate(&mut StdRng::seed_from_u64(7), GenerationMode::Peak, 50);
        let b = OrderGenerator::generate(&mut StdRng::seed_from_u64(7), GenerationMode::Peak, 50);
        assert_eq!(a, b);
    }

    #[test]
    fn test_peak_ranges_per_tier() {
        let batch = OrderGenerator::generate(&mut StdRng::seed_from_u64(42), GenerationMode::Peak, 500);
        assert_eq!(batch.len(), 500);
        for order in &batch {
            assert!((100..=1000).contains(&order.quantity_meters));
            let range = match order.order_type {
                OrderType::Rush => 8..=12,
                OrderType::Standard => 24..=48,
                OrderType::Bulk => 48..=72,
            };
            assert!(range.contains(&order.deadline_hours), "{:?}", order);
        }
        let rush = batch.iter().filter(|o| o.order_type == OrderType::Rush).count();
        // 30% 左右
        assert!((100..=200).contains(&rush), "rush = {}", rush);
    }

    #[test]
    fn test_demo_ranges_and_names() {
        let batch = OrderGenerator::generate(&mut StdRng::seed_from_u64(1), GenerationMode::Demo, 20);
        for (i, order) in batch.iter().enumerate() {
            assert!((8..72).contains(&order.deadline_hours));
            assert!(order.color_name.ends_with(&format!(" {}", i + 1)));
            assert!(COLOR_PALETTE.iter().any(|c| order.color_name.starts_with(c)));
        }
    }

    #[test]
    fn test_zero_count() {
        assert!(OrderGenerator::generate(&mut rand::rng(), GenerationMode::Demo, 0).is_empty());
    }
}
