// ==========================================
// 染整换色排产系统 - 领域类型定义
// ==========================================
// 色系 / 订单类型 / 订单状态 / 环保等级
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库、前端一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 色系 (Color Family)
// ==========================================
// 按明度严格排序: 浅 → 深
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorFamily {
    WhitesPastels,    // 白色/粉彩
    LightColors,      // 浅色
    MediumColors,     // 中色
    DarkColors,       // 深色
    BlacksDeepDarks,  // 黑色/极深色
}

impl ColorFamily {
    /// 全部色系（按明度升序）
    pub const ALL: [ColorFamily; 5] = [
        ColorFamily::WhitesPastels,
        ColorFamily::LightColors,
        ColorFamily::MediumColors,
        ColorFamily::DarkColors,
        ColorFamily::BlacksDeepDarks,
    ];

    /// 明度序号 (0..=4)
    pub fn index(self) -> usize {
        match self {
            ColorFamily::WhitesPastels => 0,
            ColorFamily::LightColors => 1,
            ColorFamily::MediumColors => 2,
            ColorFamily::DarkColors => 3,
            ColorFamily::BlacksDeepDarks => 4,
        }
    }

    /// 两个色系之间的明度距离
    pub fn distance(self, other: ColorFamily) -> usize {
        self.index().abs_diff(other.index())
    }

    /// 是否为同一色系或相邻色系
    pub fn is_adjacent_or_same(self, other: ColorFamily) -> bool {
        self.distance(other) <= 1
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorFamily::WhitesPastels => "WHITES_PASTELS",
            ColorFamily::LightColors => "LIGHT_COLORS",
            ColorFamily::MediumColors => "MEDIUM_COLORS",
            ColorFamily::DarkColors => "DARK_COLORS",
            ColorFamily::BlacksDeepDarks => "BLACKS_DEEP_DARKS",
        }
    }

    /// 本地化显示名称
    pub fn display_name(&self) -> String {
        crate::i18n::t(&format!("color_family.{}", self.as_str().to_lowercase()))
    }
}

impl fmt::Display for ColorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ColorFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "WHITES_PASTELS" => Ok(ColorFamily::WhitesPastels),
            "LIGHT_COLORS" => Ok(ColorFamily::LightColors),
            "MEDIUM_COLORS" => Ok(ColorFamily::MediumColors),
            "DARK_COLORS" => Ok(ColorFamily::DarkColors),
            "BLACKS_DEEP_DARKS" => Ok(ColorFamily::BlacksDeepDarks),
            other => Err(format!("未知色系: {}", other)),
        }
    }
}

// ==========================================
// 订单类型 (Order Type)
// ==========================================
// 优先级: RUSH > STANDARD > BULK
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Rush,     // 加急
    Standard, // 标准
    Bulk,     // 大货
}

impl OrderType {
    /// 优先级序号，越小越先排
    pub fn priority_rank(self) -> u8 {
        match self {
            OrderType::Rush => 0,
            OrderType::Standard => 1,
            OrderType::Bulk => 2,
        }
    }

    /// 价格系数
    pub fn price_multiplier(self) -> f64 {
        match self {
            OrderType::Rush => 1.3,
            OrderType::Standard => 1.0,
            OrderType::Bulk => 0.95,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Rush => "RUSH",
            OrderType::Standard => "STANDARD",
            OrderType::Bulk => "BULK",
        }
    }

    /// 本地化描述
    pub fn description(&self) -> String {
        crate::i18n::t(&format!("order_type.{}", self.as_str().to_lowercase()))
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RUSH" => Ok(OrderType::Rush),
            "STANDARD" => Ok(OrderType::Standard),
            "BULK" => Ok(OrderType::Bulk),
            other => Err(format!("未知订单类型: {}", other)),
        }
    }
}

// ==========================================
// 订单状态 (Order Status)
// ==========================================
// PENDING → SCHEDULED → COMPLETED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,   // 待排产
    Scheduled, // 已排产
    Completed, // 已完成
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Scheduled => "SCHEDULED",
            OrderStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Ok(OrderStatus::Pending),
            "SCHEDULED" => Ok(OrderStatus::Scheduled),
            "COMPLETED" => Ok(OrderStatus::Completed),
            other => Err(format!("未知订单状态: {}", other)),
        }
    }
}

// ==========================================
// 环保等级 (Eco Grade)
// ==========================================
// 顺序: A > B > C > D > F
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EcoGrade {
    A,
    B,
    C,
    D,
    F,
}

impl EcoGrade {
    /// 由综合得分分档: ≥90 A, ≥75 B, ≥60 C, ≥40 D, 其余 F
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            EcoGrade::A
        } else if score >= 75.0 {
            EcoGrade::B
        } else if score >= 60.0 {
            EcoGrade::C
        } else if score >= 40.0 {
            EcoGrade::D
        } else {
            EcoGrade::F
        }
    }
}

impl fmt::Display for EcoGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            EcoGrade::A => "A",
            EcoGrade::B => "B",
            EcoGrade::C => "C",
            EcoGrade::D => "D",
            EcoGrade::F => "F",
        };
        write!(f, "{}", letter)
    }
}
