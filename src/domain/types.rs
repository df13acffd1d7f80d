// ==========================================
// 制造数据平台 - 领域类型定义
// ==========================================
// 约定: 时间戳为 ISO-8601 UTC 字符串 'YYYY-MM-DDTHH:MM:SSZ'
// 约定: 状态以小写 snake_case 字符串入库 (与 CHECK 约束一致)
// ==========================================

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 工单状态 (Work Order Status)
// ==========================================
// 固定集合, 不强制状态机: 任意值可随时写入
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    Planned,    // 已计划
    Released,   // 已下发
    InProgress, // 生产中
    Completed,  // 已完成
    Cancelled,  // 已取消
    Delayed,    // 已延期
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl WorkOrderStatus {
    /// 从字符串解析状态（严格, 用于外部输入校验）
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "planned" => Some(WorkOrderStatus::Planned),
            "released" => Some(WorkOrderStatus::Released),
            "in_progress" => Some(WorkOrderStatus::InProgress),
            "completed" => Some(WorkOrderStatus::Completed),
            "cancelled" => Some(WorkOrderStatus::Cancelled),
            "delayed" => Some(WorkOrderStatus::Delayed),
            _ => None,
        }
    }

    /// 从数据库字符串解析（CHECK 约束保证合法, 异常值回退为 planned）
    pub fn from_db_str(s: &str) -> Self {
        Self::parse(s).unwrap_or(WorkOrderStatus::Planned)
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            WorkOrderStatus::Planned => "planned",
            WorkOrderStatus::Released => "released",
            WorkOrderStatus::InProgress => "in_progress",
            WorkOrderStatus::Completed => "completed",
            WorkOrderStatus::Cancelled => "cancelled",
            WorkOrderStatus::Delayed => "delayed",
        }
    }
}

// ==========================================
// 时间戳辅助函数
// ==========================================

/// 时间戳统一格式: ISO-8601 UTC
pub const UTC_TS_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// 解析 ISO-8601 UTC 时间戳字符串
///
/// # 返回
/// - Some(DateTime<Utc>): 解析成功
/// - None: 格式不符（严格匹配 'YYYY-MM-DDTHH:MM:SSZ'）
pub fn parse_utc_ts(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, UTC_TS_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// 格式化为 ISO-8601 UTC 时间戳字符串
pub fn format_utc_ts(ts: &DateTime<Utc>) -> String {
    ts.format(UTC_TS_FORMAT).to_string()
}

/// 计算两个时刻之间的小时数（end 早于 start 时按 0 计）
pub fn hours_between(start: &DateTime<Utc>, end: &DateTime<Utc>) -> f64 {
    let seconds = (*end - *start).num_seconds();
    if seconds <= 0 {
        return 0.0;
    }
    seconds as f64 / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_roundtrip() {
        for s in [
            "planned",
            "released",
            "in_progress",
            "completed",
            "cancelled",
            "delayed",
        ] {
            let status = WorkOrderStatus::parse(s).expect("合法状态应可解析");
            assert_eq!(status.to_db_str(), s);
            assert_eq!(status.to_string(), s);
        }
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        assert!(WorkOrderStatus::parse("IN_PROGRESS").is_none());
        assert!(WorkOrderStatus::parse("done").is_none());
        assert!(WorkOrderStatus::parse("").is_none());
        // 数据库回退路径
        assert_eq!(WorkOrderStatus::from_db_str("???"), WorkOrderStatus::Planned);
    }

    #[test]
    fn test_parse_utc_ts() {
        let ts = parse_utc_ts("2025-12-07T08:00:00Z").expect("应解析成功");
        assert_eq!(format_utc_ts(&ts), "2025-12-07T08:00:00Z");

        // 非严格格式一律拒绝
        assert!(parse_utc_ts("2025-12-07 08:00:00").is_none());
        assert!(parse_utc_ts("2025-12-07T08:00:00").is_none());
        assert!(parse_utc_ts("not-a-timestamp").is_none());
    }

    #[test]
    fn test_hours_between_clamps_negative() {
        let start = parse_utc_ts("2025-12-07T00:00:00Z").unwrap();
        let end = parse_utc_ts("2025-12-07T06:00:00Z").unwrap();
        assert!((hours_between(&start, &end) - 6.0).abs() < 1e-9);
        assert_eq!(hours_between(&end, &start), 0.0);
        assert_eq!(hours_between(&start, &start), 0.0);
    }
}
