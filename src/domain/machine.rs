// ==========================================
// 制造数据平台 - 机台领域模型
// ==========================================
// 对齐: scripts/dev_db/schema.sql machines 表
// ==========================================

use serde::{Deserialize, Serialize};

/// 机台主数据（隶属单一工厂）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Machine {
    pub id: i64,
    pub plant_id: i64, // 所属工厂（FK plants.id）
    pub name: String,
}
