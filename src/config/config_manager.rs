// ==========================================
// 染整换色排产系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value)
// ==========================================

use crate::config::scheduler_config::{
    SchedulerConfig, DEFAULT_BASE_CLEANING_MINUTES, DEFAULT_CHEMICAL_KG_PER_CLEANING_MINUTE,
    DEFAULT_PRODUCTION_RATE_M_PER_MIN, DEFAULT_RESCUE_WINDOW,
    DEFAULT_WATER_LITERS_PER_CLEANING_MINUTE, MIN_PRODUCTION_RATE_M_PER_MIN,
};
use crate::domain::order::ORDER_CAPACITY;
use crate::engine::cleaning::MAX_BASE_CLEANING_MINUTES;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入配置值（UPSERT）
    pub fn set_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        if key.trim().is_empty() {
            return Err(RepositoryError::FieldValueError {
                field: "key".to_string(),
                message: "配置键不能为空".to_string(),
            });
        }
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        tracing::info!(config_key = key, value, "配置已更新");
        Ok(())
    }

    /// 获取所有配置的快照（JSON格式, 按键排序）
    pub fn get_config_snapshot(&self) -> RepositoryResult<String> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT key, value FROM config_kv ORDER BY key")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    /// 读取并解析配置，缺失或格式错误时回退默认值
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> RepositoryResult<T>
    where
        T: FromStr + Display + Copy,
    {
        let Some(raw) = self.get_value(key)? else {
            return Ok(default);
        };
        match raw.trim().parse::<T>() {
            Ok(v) => Ok(v),
            Err(_) => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %raw,
                    default = %default,
                    "配置格式错误，使用默认值"
                );
                Ok(default)
            }
        }
    }

    /// 读取数值配置，超出 [min, max] 时回退默认值
    fn get_bounded_or_default<T>(
        &self,
        key: &str,
        default: T,
        min: T,
        max: T,
    ) -> RepositoryResult<T>
    where
        T: FromStr + Display + Copy + PartialOrd,
    {
        let value = self.get_parsed_or_default(key, default)?;
        // NaN 在两侧比较均为 false, 一并拒绝
        if value >= min && value <= max {
            return Ok(value);
        }
        tracing::warn!(
            config_key = key,
            value = %value,
            min = %min,
            max = %max,
            default = %default,
            "配置超出范围，使用默认值"
        );
        Ok(default)
    }

    /// 加载排产参数快照
    ///
    /// 越界或格式错误的取值回退默认值:
    /// - 基础清洗分钟 ∈ [0, 1440]
    /// - 产速 ∈ [0.1, 1e6] 米/分钟
    /// - 补救窗口 ≤ 订单池容量
    /// - 耗水/化学废料系数为有限非负数
    pub fn load_scheduler_config(&self) -> RepositoryResult<SchedulerConfig> {
        Ok(SchedulerConfig {
            base_cleaning_minutes: self.get_bounded_or_default(
                config_keys::BASE_CLEANING_MINUTES,
                DEFAULT_BASE_CLEANING_MINUTES,
                0,
                MAX_BASE_CLEANING_MINUTES,
            )?,
            production_rate_m_per_min: self.get_bounded_or_default(
                config_keys::PRODUCTION_RATE_M_PER_MIN,
                DEFAULT_PRODUCTION_RATE_M_PER_MIN,
                MIN_PRODUCTION_RATE_M_PER_MIN,
                1e6,
            )?,
            rescue_window: self.get_bounded_or_default(
                config_keys::RESCUE_WINDOW,
                DEFAULT_RESCUE_WINDOW,
                0,
                ORDER_CAPACITY,
            )?,
            water_liters_per_cleaning_minute: self.get_bounded_or_default(
                config_keys::WATER_LITERS_PER_CLEANING_MINUTE,
                DEFAULT_WATER_LITERS_PER_CLEANING_MINUTE,
                0.0,
                f64::MAX,
            )?,
            chemical_kg_per_cleaning_minute: self.get_bounded_or_default(
                config_keys::CHEMICAL_KG_PER_CLEANING_MINUTE,
                DEFAULT_CHEMICAL_KG_PER_CLEANING_MINUTE,
                0.0,
                f64::MAX,
            )?,
        })
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 换色清洗
    pub const BASE_CLEANING_MINUTES: &str = "base_cleaning_minutes";

    // 产能
    pub const PRODUCTION_RATE_M_PER_MIN: &str = "production_rate_m_per_min";

    // 交期补救
    pub const RESCUE_WINDOW: &str = "rescue_window";

    // 环保核算
    pub const WATER_LITERS_PER_CLEANING_MINUTE: &str = "water_liters_per_cleaning_minute";
    pub const CHEMICAL_KG_PER_CLEANING_MINUTE: &str = "chemical_kg_per_cleaning_minute";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;

    fn manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_defaults_when_empty() {
        let config = manager().load_scheduler_config().unwrap();
        assert_eq!(config, SchedulerConfig::default());
    }

    #[test]
    fn test_overrides_and_fallbacks() {
        let manager = manager();
        manager.set_value(config_keys::BASE_CLEANING_MINUTES, "45").unwrap();
        manager.set_value(config_keys::RESCUE_WINDOW, "not-a-number").unwrap();
        manager.set_value(config_keys::PRODUCTION_RATE_M_PER_MIN, "0").unwrap();

        let config = manager.load_scheduler_config().unwrap();
        assert_eq!(config.base_cleaning_minutes, 45);
        assert_eq!(config.rescue_window, DEFAULT_RESCUE_WINDOW);
        assert_eq!(config.production_rate_m_per_min, DEFAULT_PRODUCTION_RATE_M_PER_MIN);
    }

    #[test]
    fn test_out_of_range_values_fall_back() {
        let manager = manager();
        manager
            .set_value(config_keys::BASE_CLEANING_MINUTES, "100000000000000000")
            .unwrap();
        manager.set_value(config_keys::PRODUCTION_RATE_M_PER_MIN, "1e-300").unwrap();
        manager.set_value(config_keys::RESCUE_WINDOW, "5000").unwrap();
        manager
            .set_value(config_keys::WATER_LITERS_PER_CLEANING_MINUTE, "NaN")
            .unwrap();
        manager
            .set_value(config_keys::CHEMICAL_KG_PER_CLEANING_MINUTE, "-1")
            .unwrap();

        assert_eq!(manager.load_scheduler_config().unwrap(), SchedulerConfig::default());

        manager.set_value(config_keys::BASE_CLEANING_MINUTES, "1440").unwrap();
        manager.set_value(config_keys::PRODUCTION_RATE_M_PER_MIN, "0.1").unwrap();
        let config = manager.load_scheduler_config().unwrap();
        assert_eq!(config.base_cleaning_minutes, MAX_BASE_CLEANING_MINUTES);
        assert_eq!(config.production_rate_m_per_min, MIN_PRODUCTION_RATE_M_PER_MIN);
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = manager().set_value("  ", "1").unwrap_err();
        assert!(matches!(err, RepositoryError::FieldValueError { .. }));
    }

    #[test]
    fn test_snapshot_is_sorted_json() {
        let manager = manager();
        manager.set_value(config_keys::RESCUE_WINDOW, "6").unwrap();
        manager.set_value(config_keys::BASE_CLEANING_MINUTES, "20").unwrap();

        let snapshot = manager.get_config_snapshot().unwrap();
        let map: BTreeMap<String, String> = serde_json::from_str(&snapshot).unwrap();
        assert_eq!(map.get("rescue_window").map(String::as_str), Some("6"));
        assert_eq!(map.len(), 2);
        assert!(snapshot.find("base_cleaning_minutes") < snapshot.find("rescue_window"));
    }
}
