// ==========================================
// 制造数据平台 - 报表读模型
// ==========================================
// 职责: 定义报表查询的行结构（直接面向序列化输出）
// 约定: 小时字段保留 2 位小数, 比率字段保留 4 位小数（舍入在 API 层完成）
// ==========================================

use crate::domain::types::WorkOrderStatus;
use serde::{Deserialize, Serialize};

/// 月度产品产出行（按产品聚合当月所有报工）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyProductOutput {
    pub product_name: String,
    pub good_qty: i64,
    pub scrap_qty: i64,
    /// 当月有报工的工单数（去重）
    pub num_orders: i64,
}

/// 在制工单行
///
/// 口径: status='in_progress' 或 时点落在计划窗口内且状态未终结
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WipOrder {
    pub id: i64,
    pub product: String,
    pub planned_qty: i64,
    pub status: WorkOrderStatus,
    pub planned_start: String,
    pub planned_end: String,
    pub machine_id: Option<i64>,
}

/// 机台运行时长原始行（SQL 聚合结果, 未经舍入）
#[derive(Debug, Clone)]
pub struct MachineRuntimeRow {
    pub machine_id: i64,
    pub machine_name: String,
    pub runtime_hours: f64,
}

/// 简单口径稼动率行: utilization = runtime / total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleMachineUtilization {
    pub machine_id: i64,
    pub machine_name: String,
    pub runtime_hours: f64,
    pub total_hours: f64,
    pub utilization: f64,
}

/// 调整口径稼动率行: utilization = runtime / (total - downtime)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineUtilization {
    pub machine_id: i64,
    pub machine_name: String,
    pub runtime_hours: f64,
    pub available_hours: f64,
    pub downtime_hours: f64,
    pub utilization: f64,
}

/// 无产出工单行（已下发/已计划/延期/生产中, 但尚无任何报工）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingWorkOrder {
    pub id: i64,
    pub product: String,
    pub status: WorkOrderStatus,
    pub planned_start: String,
    pub planned_end: String,
    pub planned_qty: i64,
}

/// 按产品聚合的废品驱动行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapByProduct {
    pub product_name: String,
    pub scrap_qty: i64,
    pub total_qty: i64,
    /// scrap / (good + scrap), 总量为 0 时按 0 计
    pub scrap_rate: f64,
}

/// 按机台聚合的废品驱动行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapByMachine {
    pub machine_name: String,
    pub scrap_qty: i64,
    pub total_qty: i64,
    pub scrap_rate: f64,
}

/// 产品区间汇总（get_product_summary 输出）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub product_id: i64,
    pub product_name: String,
    pub good_qty: i64,
    pub scrap_qty: i64,
    pub num_orders: i64,
}
