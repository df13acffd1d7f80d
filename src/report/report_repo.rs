// ==========================================
// 制造数据平台 - 报表查询仓储
// ==========================================
// 职责: 固定口径的报表 SQL（参数化, 只读）
// 红线: 不做舍入/换算, 原始聚合值交由 API 层处理
// ==========================================

use crate::domain::types::WorkOrderStatus;
use crate::report::models::{
    MachineRuntimeRow, MonthlyProductOutput, PendingWorkOrder, ScrapByMachine, ScrapByProduct,
    WipOrder,
};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

/// 报表查询仓储
pub struct ReportRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ReportRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 月度产品产出: 按产品聚合指定月份的良品/废品与涉及工单数
    ///
    /// # 参数
    /// - month_prefix: 月份前缀 'YYYY-MM'（按 op_start 前缀匹配）
    ///
    /// # 返回
    /// - Ok(Vec<MonthlyProductOutput>): 按产品名排序; 当月无报工的产品不出现
    pub fn monthly_product_output(
        &self,
        month_prefix: &str,
    ) -> RepositoryResult<Vec<MonthlyProductOutput>> {
        let conn = self.get_conn()?;
        let like = format!("{}%", month_prefix);

        let mut stmt = conn.prepare(
            r#"
            SELECT p.name AS product_name,
                   COALESCE(SUM(o.good_qty), 0)  AS good_qty,
                   COALESCE(SUM(o.scrap_qty), 0) AS scrap_qty,
                   COUNT(DISTINCT o.work_order_id) AS num_orders
            FROM products p
            LEFT JOIN work_orders w ON w.product_id = p.id
            LEFT JOIN operations o   ON o.work_order_id = w.id
            WHERE o.op_start LIKE ?1
            GROUP BY p.name
            ORDER BY p.name
            "#,
        )?;

        let rows = stmt
            .query_map(params![like], |row| {
                Ok(MonthlyProductOutput {
                    product_name: row.get(0)?,
                    good_qty: row.get(1)?,
                    scrap_qty: row.get(2)?,
                    num_orders: row.get(3)?,
                })
            })?
            .collect::<SqliteResult<Vec<MonthlyProductOutput>>>()?;

        Ok(rows)
    }

    /// 在制工单: status='in_progress' 或 时点落在计划窗口内且状态未终结
    ///
    /// # 参数
    /// - now_ts: 参考时点 'YYYY-MM-DDTHH:MM:SSZ'
    pub fn wip_orders(&self, now_ts: &str) -> RepositoryResult<Vec<WipOrder>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT w.id,
                   p.name AS product,
                   w.planned_qty,
                   w.status,
                   w.planned_start,
                   w.planned_end,
                   w.machine_id
            FROM work_orders w
            JOIN products p ON p.id = w.product_id
            WHERE w.status = 'in_progress'
               OR ( ?1 >= w.planned_start AND ?1 <= w.planned_end
                    AND w.status NOT IN ('completed','cancelled') )
            ORDER BY w.planned_start
            "#,
        )?;

        let rows = stmt
            .query_map(params![now_ts], |row| {
                Ok(WipOrder {
                    id: row.get(0)?,
                    product: row.get(1)?,
                    planned_qty: row.get(2)?,
                    status: WorkOrderStatus::from_db_str(&row.get::<_, String>(3)?),
                    planned_start: row.get(4)?,
                    planned_end: row.get(5)?,
                    machine_id: row.get(6)?,
                })
            })?
            .collect::<SqliteResult<Vec<WipOrder>>>()?;

        Ok(rows)
    }

    /// 机台区间运行时长: 完全落入区间的操作时长合计（小时, 未舍入）
    ///
    /// 全部机台都会出现; 区间内无操作的机台 runtime_hours = 0
    pub fn machine_runtime_hours(
        &self,
        start_ts: &str,
        end_ts: &str,
    ) -> RepositoryResult<Vec<MachineRuntimeRow>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT
              m.id   AS machine_id,
              m.name AS machine_name,
              COALESCE(SUM((strftime('%s', o.op_end) - strftime('%s', o.op_start)) / 3600.0), 0.0)
                AS runtime_hours
            FROM machines m
            LEFT JOIN operations o
              ON o.machine_id = m.id
             AND o.op_start >= ?1
             AND o.op_end   <= ?2
            GROUP BY m.id, m.name
            ORDER BY m.id
            "#,
        )?;

        let rows = stmt
            .query_map(params![start_ts, end_ts], |row| {
                Ok(MachineRuntimeRow {
                    machine_id: row.get(0)?,
                    machine_name: row.get(1)?,
                    runtime_hours: row.get(2)?,
                })
            })?
            .collect::<SqliteResult<Vec<MachineRuntimeRow>>>()?;

        Ok(rows)
    }

    /// 无产出工单: 状态为 released/planned/delayed/in_progress 且无任何报工
    pub fn work_orders_no_production(&self) -> RepositoryResult<Vec<PendingWorkOrder>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT w.id,
                   p.name AS product,
                   w.status,
                   w.planned_start,
                   w.planned_end,
                   w.planned_qty
            FROM work_orders w
            JOIN products p ON p.id = w.product_id
            LEFT JOIN operations o ON o.work_order_id = w.id
            WHERE w.status IN ('released','planned','delayed','in_progress')
              AND o.id IS NULL
            ORDER BY w.planned_start
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(PendingWorkOrder {
                    id: row.get(0)?,
                    product: row.get(1)?,
                    status: WorkOrderStatus::from_db_str(&row.get::<_, String>(2)?),
                    planned_start: row.get(3)?,
                    planned_end: row.get(4)?,
                    planned_qty: row.get(5)?,
                })
            })?
            .collect::<SqliteResult<Vec<PendingWorkOrder>>>()?;

        Ok(rows)
    }

    /// 废品驱动（按产品）: 区间内废品量/总量/废品率, 废品量降序
    pub fn top_scrap_by_product(
        &self,
        start_ts: &str,
        end_ts: &str,
    ) -> RepositoryResult<Vec<ScrapByProduct>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT p.name AS product_name,
                   COALESCE(SUM(o.scrap_qty), 0) AS scrap_qty,
                   COALESCE(SUM(o.good_qty + o.scrap_qty), 0) AS total_qty,
                   CASE
                     WHEN COALESCE(SUM(o.good_qty + o.scrap_qty), 0) = 0 THEN 0.0
                     ELSE CAST(SUM(o.scrap_qty) AS REAL) / SUM(o.good_qty + o.scrap_qty)
                   END AS scrap_rate
            FROM products p
            JOIN work_orders w ON w.product_id = p.id
            JOIN operations o  ON o.work_order_id = w.id
            WHERE o.op_start >= ?1
              AND o.op_end   <= ?2
            GROUP BY p.name
            ORDER BY scrap_qty DESC, scrap_rate DESC
            "#,
        )?;

        let rows = stmt
            .query_map(params![start_ts, end_ts], |row| {
                Ok(ScrapByProduct {
                    product_name: row.get(0)?,
                    scrap_qty: row.get(1)?,
                    total_qty: row.get(2)?,
                    scrap_rate: row.get(3)?,
                })
            })?
            .collect::<SqliteResult<Vec<ScrapByProduct>>>()?;

        Ok(rows)
    }

    /// 废品驱动（按机台）: 区间内废品量/总量/废品率, 废品量降序
    pub fn top_scrap_by_machine(
        &self,
        start_ts: &str,
        end_ts: &str,
    ) -> RepositoryResult<Vec<ScrapByMachine>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT m.name AS machine_name,
                   COALESCE(SUM(o.scrap_qty), 0) AS scrap_qty,
                   COALESCE(SUM(o.good_qty + o.scrap_qty), 0) AS total_qty,
                   CASE
                     WHEN COALESCE(SUM(o.good_qty + o.scrap_qty), 0) = 0 THEN 0.0
                     ELSE CAST(SUM(o.scrap_qty) AS REAL) / SUM(o.good_qty + o.scrap_qty)
                   END AS scrap_rate
            FROM machines m
            JOIN operations o ON o.machine_id = m.id
            WHERE o.op_start >= ?1
              AND o.op_end   <= ?2
            GROUP BY m.name
            ORDER BY scrap_qty DESC, scrap_rate DESC
            "#,
        )?;

        let rows = stmt
            .query_map(params![start_ts, end_ts], |row| {
                Ok(ScrapByMachine {
                    machine_name: row.get(0)?,
                    scrap_qty: row.get(1)?,
                    total_qty: row.get(2)?,
                    scrap_rate: row.get(3)?,
                })
            })?
            .collect::<SqliteResult<Vec<ScrapByMachine>>>()?;

        Ok(rows)
    }
}
