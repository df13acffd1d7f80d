// ==========================================
// 制造数据平台 - 生产操作记录领域模型
// ==========================================
// 对齐: scripts/dev_db/schema.sql operations 表
// ==========================================

use crate::domain::types::{hours_between, parse_utc_ts};
use serde::{Deserialize, Serialize};

// ==========================================
// Operation - 生产操作记录
// ==========================================
// 一条记录 = 某机台在某时间段内对某工单的一次生产
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    pub id: i64,
    pub work_order_id: i64,          // 工单（FK work_orders.id）
    pub machine_id: i64,             // 机台（FK machines.id）
    pub op_start: String,            // 操作开始 'YYYY-MM-DDTHH:MM:SSZ'
    pub op_end: String,              // 操作结束 'YYYY-MM-DDTHH:MM:SSZ'
    pub good_qty: i64,               // 良品数（>= 0）
    pub scrap_qty: i64,              // 废品数（>= 0）
    pub defect_code: Option<String>, // 缺陷代码, 可为空
}

impl Operation {
    /// 总产量 = 良品 + 废品
    pub fn total_qty(&self) -> i64 {
        self.good_qty + self.scrap_qty
    }

    /// 废品率 = scrap / (good + scrap)，总量为 0 时按 0 计
    ///
    /// 值域保证: [0.0, 1.0]
    pub fn scrap_rate(&self) -> f64 {
        let total = self.total_qty();
        if total == 0 {
            return 0.0;
        }
        self.scrap_qty as f64 / total as f64
    }

    /// 操作时长（小时）。时间戳不可解析或区间倒置时按 0 计
    pub fn duration_hours(&self) -> f64 {
        match (parse_utc_ts(&self.op_start), parse_utc_ts(&self.op_end)) {
            (Some(start), Some(end)) => hours_between(&start, &end),
            _ => 0.0,
        }
    }
}

// ==========================================
// NewOperation - 报工入参
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOperation {
    pub work_order_id: i64,
    pub machine_id: i64,
    pub op_start: String,
    pub op_end: String,
    pub good_qty: i64,
    pub scrap_qty: i64,
    pub defect_code: Option<String>,
}
