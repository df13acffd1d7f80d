// ==========================================
// 制造数据平台 - 停机事件领域模型
// ==========================================
// 对齐: scripts/dev_db/schema.sql downtime_events 表
// ==========================================

use crate::domain::types::{hours_between, parse_utc_ts};
use serde::{Deserialize, Serialize};

/// 机台停机事件（维护、故障、缺料等）
///
/// 用于调整口径的稼动率: available = total - downtime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DowntimeEvent {
    pub id: i64,
    pub machine_id: i64,        // 机台（FK machines.id）
    pub dt_start: String,       // 停机开始 'YYYY-MM-DDTHH:MM:SSZ'
    pub dt_end: String,         // 停机结束 'YYYY-MM-DDTHH:MM:SSZ'
    pub reason: Option<String>, // 停机原因, 可为空
}

impl DowntimeEvent {
    /// 停机时长（小时）。时间戳不可解析或区间倒置时按 0 计
    pub fn duration_hours(&self) -> f64 {
        match (parse_utc_ts(&self.dt_start), parse_utc_ts(&self.dt_end)) {
            (Some(start), Some(end)) => hours_between(&start, &end),
            _ => 0.0,
        }
    }
}
