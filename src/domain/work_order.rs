// ==========================================
// 制造数据平台 - 工单领域模型
// ==========================================
// 对齐: scripts/dev_db/schema.sql work_orders 表
// ==========================================

use crate::domain::types::WorkOrderStatus;
use serde::{Deserialize, Serialize};

// ==========================================
// WorkOrder - 工单
// ==========================================
// 用途: 计划层写入, 报表层只读
// 约定: 时间戳保持数据库原始字符串, 解析在引擎/校验层进行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: i64,
    pub product_id: i64,            // 产品（FK products.id）
    pub plant_id: i64,              // 工厂（FK plants.id）
    pub machine_id: Option<i64>,    // 预排机台, 可为空（FK machines.id）
    pub planned_qty: i64,           // 计划数量（> 0）
    pub status: WorkOrderStatus,    // 工单状态
    pub planned_start: String,      // 计划开始 'YYYY-MM-DDTHH:MM:SSZ'
    pub planned_end: String,        // 计划结束 'YYYY-MM-DDTHH:MM:SSZ'
    pub created_at: String,         // 记录创建时间
}

// ==========================================
// NewWorkOrder - 工单创建入参
// ==========================================
// 生命周期: 仅在创建流程内, 状态固定为 planned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkOrder {
    pub product_id: i64,
    pub machine_id: Option<i64>,
    pub planned_qty: i64,
    pub planned_start: String,
    pub planned_end: String,
}
