// ==========================================
// 染整换色排产系统 - 模拟快照数据仓储
// ==========================================
// 红线: 快照只增不改; 订单集与排产结果以 JSON 归档
// 排序: seq_no 自增,即创建顺序
// ==========================================

use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::order::Order;
use crate::domain::simulation::Simulation;
use crate::repository::error::{RepositoryError, RepositoryResult};

/// 快照行（JSON 尚未解析）
struct SimulationRow {
    simulation_id: String,
    name: String,
    created_at: chrono::NaiveDateTime,
    orders_json: String,
    result_json: String,
}

impl SimulationRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            simulation_id: row.get(0)?,
            name: row.get(1)?,
            created_at: row.get(2)?,
            orders_json: row.get(3)?,
            result_json: row.get(4)?,
        })
    }

    fn into_simulation(self) -> RepositoryResult<Simulation> {
        Ok(Simulation {
            simulation_id: self.simulation_id,
            name: self.name,
            created_at: self.created_at,
            orders: serde_json::from_str(&self.orders_json)?,
            result: serde_json::from_str(&self.result_json)?,
        })
    }
}

// ==========================================
// SimulationRepository - 模拟快照仓储
// ==========================================
pub struct SimulationRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SimulationRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn query_list(&self, sql: &str, limit: i64) -> RepositoryResult<Vec<Simulation>> {
        let rows = {
            let conn = self.get_conn()?;
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt
                .query_map(params![limit], SimulationRow::from_row)?
                .collect::<rusqlite::Result<Vec<SimulationRow>>>()?;
            rows
        };
        rows.into_iter().map(SimulationRow::into_simulation).collect()
    }

    /// 归档一个快照
    pub fn insert(&self, simulation: &Simulation) -> RepositoryResult<()> {
        let orders_json = serde_json::to_string(&simulation.orders)?;
        let result_json = serde_json::to_string(&simulation.result)?;

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO simulation_run (
                simulation_id, name, created_at, order_count, orders_json, result_json
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                simulation.simulation_id,
                simulation.name,
                simulation.created_at,
                simulation.orders.len() as i64,
                orders_json,
                result_json,
            ],
        )?;
        Ok(())
    }

    /// 全部快照（创建顺序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Simulation>> {
        self.query_list(
            r#"
            SELECT simulation_id, name, created_at, orders_json, result_json
            FROM simulation_run
            ORDER BY seq_no ASC
            LIMIT ?1
            "#,
            -1,
        )
    }

    /// 最近的快照（最新在前）
    pub fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<Simulation>> {
        self.query_list(
            r#"
            SELECT simulation_id, name, created_at, orders_json, result_json
            FROM simulation_run
            ORDER BY seq_no DESC
            LIMIT ?1
            "#,
            limit as i64,
        )
    }

    /// 按ID查询快照
    pub fn find_by_id(&self, simulation_id: &str) -> RepositoryResult<Option<Simulation>> {
        let row = {
            let conn = self.get_conn()?;
            conn.query_row(
                r#"
                SELECT simulation_id, name, created_at, orders_json, result_json
                FROM simulation_run
                WHERE simulation_id = ?1
                "#,
                params![simulation_id],
                SimulationRow::from_row,
            )
            .optional()?
        };
        row.map(SimulationRow::into_simulation).transpose()
    }

    /// 查询快照归档的订单集
    pub fn find_orders(&self, simulation_id: &str) -> RepositoryResult<Option<Vec<Order>>> {
        let raw: Option<String> = {
            let conn = self.get_conn()?;
            conn.query_row(
                "SELECT orders_json FROM simulation_run WHERE simulation_id = ?1",
                params![simulation_id],
                |row| row.get(0),
            )
            .optional()?
        };
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// 快照总数
    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM simulation_run", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}
