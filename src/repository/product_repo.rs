// ==========================================
// 制造数据平台 - 产品数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::Product;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

/// 产品仓储
/// 职责: products 表的只读访问
pub struct ProductRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProductRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按 id 查询产品
    pub fn find_by_id(&self, product_id: i64) -> RepositoryResult<Option<Product>> {
        let conn = self.get_conn()?;

        let product = conn
            .query_row(
                "SELECT id, name FROM products WHERE id = ?1",
                params![product_id],
                |row| {
                    Ok(Product {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;

        Ok(product)
    }

    /// 按名称查询产品（name 唯一）
    ///
    /// # 返回
    /// - Ok(Some(Product)): 找到产品
    /// - Ok(None): 未找到
    /// - Err: 数据库错误
    pub fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Product>> {
        let conn = self.get_conn()?;

        let product = conn
            .query_row(
                "SELECT id, name FROM products WHERE name = ?1",
                params![name],
                |row| {
                    Ok(Product {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;

        Ok(product)
    }
}
