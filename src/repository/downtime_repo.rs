// ==========================================
// 制造数据平台 - 停机事件仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约定: 范围查询按"完全落入区间"口径 (dt_start >= start AND dt_end <= end)
// ==========================================

use crate::domain::DowntimeEvent;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

/// 停机事件仓储
/// 职责: downtime_events 表的查询
pub struct DowntimeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DowntimeRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询某机台在时间区间内的停机事件（完全落入区间）
    ///
    /// 用途: 调整口径稼动率的 available_hours 扣减
    pub fn list_for_machine_in_range(
        &self,
        machine_id: i64,
        start_ts: &str,
        end_ts: &str,
    ) -> RepositoryResult<Vec<DowntimeEvent>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, machine_id, dt_start, dt_end, reason
            FROM downtime_events
            WHERE machine_id = ?1
              AND dt_start >= ?2
              AND dt_end   <= ?3
            ORDER BY dt_start
            "#,
        )?;

        let events = stmt
            .query_map(params![machine_id, start_ts, end_ts], |row| {
                Ok(DowntimeEvent {
                    id: row.get(0)?,
                    machine_id: row.get(1)?,
                    dt_start: row.get(2)?,
                    dt_end: row.get(3)?,
                    reason: row.get(4)?,
                })
            })?
            .collect::<SqliteResult<Vec<DowntimeEvent>>>()?;

        Ok(events)
    }
}
