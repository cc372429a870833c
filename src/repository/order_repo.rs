// ==========================================
// 染整换色排产系统 - 订单池数据仓储
// ==========================================
// 红线: 容量校验与写入在同一事务、同一把锁内完成,
//       任何并发都不能放入第 101 单
// ==========================================

use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::order::{NewOrder, Order};
use crate::domain::schedule::ScheduleSlot;
use crate::domain::types::OrderStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};

const ORDER_COLUMNS: &str = r#"
    order_id, color_name, color_family, quantity_meters, order_type,
    deadline_hours, status, created_at, scheduled_start_time, scheduled_end_time
"#;

// ==========================================
// OrderRepository - 订单池仓储
// ==========================================

/// 订单池仓储
/// 职责: 管理 dye_order 表的读写
pub struct OrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OrderRepository {
    /// 从共享连接创建仓储实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 解析 TEXT 列为枚举
    fn parse_text_column<T>(idx: usize, raw: String) -> rusqlite::Result<T>
    where
        T: FromStr<Err = String>,
    {
        raw.parse::<T>().map_err(|msg| {
            rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, msg.into())
        })
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Order> {
        Ok(Order {
            id: row.get(0)?,
            color_name: row.get(1)?,
            color_family: Self::parse_text_column(2, row.get(2)?)?,
            quantity_meters: row.get(3)?,
            order_type: Self::parse_text_column(4, row.get(4)?)?,
            deadline_hours: row.get(5)?,
            status: Self::parse_text_column(6, row.get(6)?)?,
            created_at: row.get(7)?,
            scheduled_start_time: row.get(8)?,
            scheduled_end_time: row.get(9)?,
        })
    }

    fn find_by_id_in(conn: &Connection, order_id: i64) -> rusqlite::Result<Option<Order>> {
        conn.query_row(
            &format!("SELECT {} FROM dye_order WHERE order_id = ?1", ORDER_COLUMNS),
            params![order_id],
            Self::map_row,
        )
        .optional()
    }

    // ==========================================
    // 写入（带容量守卫）
    // ==========================================

    /// 写入单个订单
    ///
    /// # 返回
    /// - Ok(Order): 分配了ID的订单
    /// - Err(CapacityExceeded): 订单池已满
    pub fn insert_guarded(
        &self,
        new_order: &NewOrder,
        created_at: NaiveDateTime,
        capacity: usize,
    ) -> RepositoryResult<Order> {
        let mut created =
            self.insert_batch_guarded(std::slice::from_ref(new_order), created_at, capacity)?;
        created.pop().ok_or_else(|| {
            RepositoryError::DatabaseTransactionError("订单写入后未返回记录".to_string())
        })
    }

    /// 批量写入订单（全部成功或全部拒绝）
    ///
    /// # 参数
    /// - new_orders: 已校验的订单
    /// - created_at: 创建时间
    /// - capacity: 订单池容量上限
    pub fn insert_batch_guarded(
        &self,
        new_orders: &[NewOrder],
        created_at: NaiveDateTime,
        capacity: usize,
    ) -> RepositoryResult<Vec<Order>> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current: i64 = tx.query_row("SELECT COUNT(*) FROM dye_order", [], |row| row.get(0))?;
        let current = current as usize;
        if current + new_orders.len() > capacity {
            return Err(RepositoryError::CapacityExceeded { capacity });
        }

        let mut created = Vec::with_capacity(new_orders.len());
        for new_order in new_orders {
            tx.execute(
                r#"
                INSERT INTO dye_order (
                    color_name, color_family, quantity_meters, order_type,
                    deadline_hours, status, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
                params![
                    new_order.color_name,
                    new_order.color_family.as_str(),
                    new_order.quantity_meters,
                    new_order.order_type.as_str(),
                    new_order.deadline_hours,
                    OrderStatus::Pending.as_str(),
                    created_at,
                ],
            )?;
            created.push(new_order.clone().into_order(tx.last_insert_rowid(), created_at));
        }

        tx.commit()?;
        Ok(created)
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 按ID查询订单
    pub fn find_by_id(&self, order_id: i64) -> RepositoryResult<Option<Order>> {
        let conn = self.get_conn()?;
        Ok(Self::find_by_id_in(&conn, order_id)?)
    }

    /// 查询全部订单（按ID升序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Order>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM dye_order ORDER BY order_id",
            ORDER_COLUMNS
        ))?;
        let orders = stmt
            .query_map([], Self::map_row)?
            .collect::<rusqlite::Result<Vec<Order>>>()?;
        Ok(orders)
    }

    /// 查询可排产订单（非 COMPLETED，按ID升序）
    ///
    /// 单条查询,返回的是一致快照
    pub fn list_schedulable(&self) -> RepositoryResult<Vec<Order>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM dye_order WHERE status != ?1 ORDER BY order_id",
            ORDER_COLUMNS
        ))?;
        let orders = stmt
            .query_map(params![OrderStatus::Completed.as_str()], Self::map_row)?
            .collect::<rusqlite::Result<Vec<Order>>>()?;
        Ok(orders)
    }

    /// 当前订单数
    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM dye_order", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    // ==========================================
    // 状态变更
    // ==========================================

    /// 标记订单完成
    ///
    /// # 返回
    /// - Ok(Order): 完成后的订单（已完成则原样返回）
    /// - Err(NotFound): 订单不存在
    pub fn mark_completed(&self, order_id: i64) -> RepositoryResult<Order> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let order = Self::find_by_id_in(&tx, order_id)?.ok_or_else(|| RepositoryError::NotFound {
            entity: "Order".to_string(),
            id: order_id.to_string(),
        })?;

        if order.is_completed() {
            return Ok(order);
        }

        tx.execute(
            "UPDATE dye_order SET status = ?1 WHERE order_id = ?2",
            params![OrderStatus::Completed.as_str(), order_id],
        )?;
        tx.commit()?;

        Ok(Order {
            status: OrderStatus::Completed,
            ..order
        })
    }

    /// 回写排产结果
    ///
    /// 1) 上一轮 SCHEDULED 重置为 PENDING 并清空排产时间
    /// 2) 本轮时段对应订单置为 SCHEDULED 并写入时间
    ///    已完成的订单不回写（状态单向）
    ///
    /// # 返回
    /// - Ok(usize): 本轮实际置为 SCHEDULED 的订单数
    pub fn apply_schedule(&self, slots: &[ScheduleSlot]) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            r#"
            UPDATE dye_order
            SET status = ?1, scheduled_start_time = NULL, scheduled_end_time = NULL
            WHERE status = ?2
            "#,
            params![OrderStatus::Pending.as_str(), OrderStatus::Scheduled.as_str()],
        )?;

        let mut updated = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                UPDATE dye_order
                SET status = ?1, scheduled_start_time = ?2, scheduled_end_time = ?3
                WHERE order_id = ?4 AND status != ?5
                "#,
            )?;
            for slot in slots {
                updated += stmt.execute(params![
                    OrderStatus::Scheduled.as_str(),
                    slot.start_time,
                    slot.end_time,
                    slot.order_id,
                    OrderStatus::Completed.as_str(),
                ])?;
            }
        }

        tx.commit()?;
        Ok(updated)
    }

    /// 清空订单池
    ///
    /// # 返回
    /// - Ok(usize): 删除的订单数
    pub fn delete_all(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        Ok(conn.execute("DELETE FROM dye_order", [])?)
    }
}
