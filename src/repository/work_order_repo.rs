// ==========================================
// 制造数据平台 - 工单数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑（入参校验在 API 层）
// ==========================================

use crate::domain::types::WorkOrderStatus;
use crate::domain::{NewWorkOrder, WorkOrder};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

/// 默认工厂 id（单工厂部署; 多工厂时由上层传入）
pub const DEFAULT_PLANT_ID: i64 = 1;

/// 工单仓储
/// 职责: work_orders 表的 CRUD 操作
pub struct WorkOrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl WorkOrderRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 插入新工单（状态固定为 planned）
    ///
    /// # 参数
    /// - new_order: 工单创建入参（已在 API 层完成校验）
    ///
    /// # 返回
    /// - Ok(i64): 新工单 id（AUTOINCREMENT）
    /// - Err: 数据库错误
    pub fn insert(&self, new_order: &NewWorkOrder) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO work_orders
                (product_id, plant_id, planned_qty, status, planned_start, planned_end, machine_id)
            VALUES (?1, ?2, ?3, 'planned', ?4, ?5, ?6)
            "#,
            params![
                new_order.product_id,
                DEFAULT_PLANT_ID,
                new_order.planned_qty,
                new_order.planned_start,
                new_order.planned_end,
                new_order.machine_id,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// 按 id 查询工单
    pub fn find_by_id(&self, work_order_id: i64) -> RepositoryResult<Option<WorkOrder>> {
        let conn = self.get_conn()?;

        let order = conn
            .query_row(
                r#"
                SELECT id, product_id, plant_id, machine_id, planned_qty,
                       status, planned_start, planned_end, created_at
                FROM work_orders
                WHERE id = ?1
                "#,
                params![work_order_id],
                |row| {
                    Ok(WorkOrder {
                        id: row.get(0)?,
                        product_id: row.get(1)?,
                        plant_id: row.get(2)?,
                        machine_id: row.get(3)?,
                        planned_qty: row.get(4)?,
                        status: WorkOrderStatus::from_db_str(&row.get::<_, String>(5)?),
                        planned_start: row.get(6)?,
                        planned_end: row.get(7)?,
                        created_at: row.get(8)?,
                    })
                },
            )
            .optional()?;

        Ok(order)
    }

    /// 更新工单状态（不强制状态机, 任意合法状态可写入）
    ///
    /// # 返回
    /// - Ok(usize): 受影响行数（0 表示工单不存在）
    /// - Err: 数据库错误
    pub fn update_status(
        &self,
        work_order_id: i64,
        status: WorkOrderStatus,
    ) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            "UPDATE work_orders SET status = ?1 WHERE id = ?2",
            params![status.to_db_str(), work_order_id],
        )?;

        Ok(affected)
    }
}
