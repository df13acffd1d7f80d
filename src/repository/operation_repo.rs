// ==========================================
// 制造数据平台 - 生产操作记录仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约定: 范围查询按"完全落入区间"口径 (op_start >= start AND op_end <= end)
// ==========================================

use crate::domain::{NewOperation, Operation};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

/// 生产操作记录仓储
/// 职责: operations 表的写入与聚合查询
pub struct OperationRepository {
    conn: Arc<Mutex<Connection>>,
}

fn map_operation(row: &Row<'_>) -> SqliteResult<Operation> {
    Ok(Operation {
        id: row.get(0)?,
        work_order_id: row.get(1)?,
        machine_id: row.get(2)?,
        op_start: row.get(3)?,
        op_end: row.get(4)?,
        good_qty: row.get(5)?,
        scrap_qty: row.get(6)?,
        defect_code: row.get(7)?,
    })
}

impl OperationRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 插入一条报工记录
    ///
    /// # 返回
    /// - Ok(i64): 新记录 id（AUTOINCREMENT）
    /// - Err: 数据库错误
    pub fn insert(&self, new_op: &NewOperation) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO operations
                (work_order_id, machine_id, op_start, op_end, good_qty, scrap_qty, defect_code)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                new_op.work_order_id,
                new_op.machine_id,
                new_op.op_start,
                new_op.op_end,
                new_op.good_qty,
                new_op.scrap_qty,
                new_op.defect_code,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// 查询某工单的全部操作记录（按开始时间排序）
    pub fn list_by_work_order(&self, work_order_id: i64) -> RepositoryResult<Vec<Operation>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, work_order_id, machine_id, op_start, op_end,
                   good_qty, scrap_qty, defect_code
            FROM operations
            WHERE work_order_id = ?1
            ORDER BY op_start
            "#,
        )?;

        let ops = stmt
            .query_map(params![work_order_id], map_operation)?
            .collect::<SqliteResult<Vec<Operation>>>()?;

        Ok(ops)
    }

    /// 查询某机台在时间区间内的操作记录（完全落入区间）
    ///
    /// # 参数
    /// - machine_id: 机台 id
    /// - start_ts / end_ts: 区间端点 'YYYY-MM-DDTHH:MM:SSZ'
    pub fn list_for_machine_in_range(
        &self,
        machine_id: i64,
        start_ts: &str,
        end_ts: &str,
    ) -> RepositoryResult<Vec<Operation>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, work_order_id, machine_id, op_start, op_end,
                   good_qty, scrap_qty, defect_code
            FROM operations
            WHERE machine_id = ?1
              AND op_start >= ?2
              AND op_end   <= ?3
            ORDER BY op_start
            "#,
        )?;

        let ops = stmt
            .query_map(params![machine_id, start_ts, end_ts], map_operation)?
            .collect::<SqliteResult<Vec<Operation>>>()?;

        Ok(ops)
    }

    /// 汇总某产品在时间区间内的良品/废品总数
    ///
    /// # 返回
    /// - Ok((good_qty, scrap_qty)): 区间内无记录时为 (0, 0)
    pub fn totals_for_product_in_range(
        &self,
        product_id: i64,
        start_ts: &str,
        end_ts: &str,
    ) -> RepositoryResult<(i64, i64)> {
        let conn = self.get_conn()?;

        let totals = conn.query_row(
            r#"
            SELECT
              COALESCE(SUM(o.good_qty), 0)  AS good_qty,
              COALESCE(SUM(o.scrap_qty), 0) AS scrap_qty
            FROM operations o
            JOIN work_orders w ON w.id = o.work_order_id
            WHERE w.product_id = ?1
              AND o.op_start >= ?2
              AND o.op_end   <= ?3
            "#,
            params![product_id, start_ts, end_ts],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(totals)
    }

    /// 统计某产品在时间区间内有报工的工单数（去重）
    pub fn count_orders_for_product_in_range(
        &self,
        product_id: i64,
        start_ts: &str,
        end_ts: &str,
    ) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;

        let count = conn.query_row(
            r#"
            SELECT COUNT(DISTINCT w.id) AS cnt
            FROM work_orders w
            JOIN operations o ON o.work_order_id = w.id
            WHERE w.product_id = ?1
              AND o.op_start >= ?2
              AND o.op_end   <= ?3
            "#,
            params![product_id, start_ts, end_ts],
            |row| row.get(0),
        )?;

        Ok(count)
    }
}
