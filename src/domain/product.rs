// ==========================================
// 制造数据平台 - 产品领域模型
// ==========================================
// 对齐: scripts/dev_db/schema.sql products 表
// ==========================================

use serde::{Deserialize, Serialize};

/// 产品主数据（name 全局唯一, 报表按名称解析产品）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
}
