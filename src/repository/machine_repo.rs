// ==========================================
// 制造数据平台 - 机台数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::Machine;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::sync::{Arc, Mutex};

/// 机台仓储
/// 职责: machines 表的只读访问
pub struct MachineRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MachineRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按 id 查询机台
    pub fn find_by_id(&self, machine_id: i64) -> RepositoryResult<Option<Machine>> {
        let conn = self.get_conn()?;

        let machine = conn
            .query_row(
                "SELECT id, plant_id, name FROM machines WHERE id = ?1",
                params![machine_id],
                |row| {
                    Ok(Machine {
                        id: row.get(0)?,
                        plant_id: row.get(1)?,
                        name: row.get(2)?,
                    })
                },
            )
            .optional()?;

        Ok(machine)
    }

    /// 查询全部机台（按 id 排序, 稼动率报表逐台计算）
    pub fn list_all(&self) -> RepositoryResult<Vec<Machine>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare("SELECT id, plant_id, name FROM machines ORDER BY id")?;

        let machines = stmt
            .query_map([], |row| {
                Ok(Machine {
                    id: row.get(0)?,
                    plant_id: row.get(1)?,
                    name: row.get(2)?,
                })
            })?
            .collect::<SqliteResult<Vec<Machine>>>()?;

        Ok(machines)
    }
}
