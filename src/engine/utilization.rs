// ==========================================
// 制造数据平台 - 稼动率计算引擎
// ==========================================
// 口径:
// - runtime_hours   = 区间内操作时长合计（逐条计算, 倒置区间按 0 计）
// - available_hours = 简单口径: 区间总时长
//                     调整口径: max(0, 区间总时长 - 停机时长)
// - utilization     = runtime / available, available <= 0 时按 0 计
// 红线: 先除后舍入; 小时保留 2 位, 比率保留 4 位
// ==========================================

use crate::domain::types::hours_between;
use crate::domain::{DowntimeEvent, Operation};
use chrono::{DateTime, Utc};

/// 保留 2 位小数（小时字段）
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// 保留 4 位小数（比率字段）
pub fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

// ==========================================
// UtilizationEngine - 稼动率引擎
// ==========================================
pub struct UtilizationEngine {
    // 无状态引擎，不需要注入依赖
}

impl UtilizationEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 区间总时长（小时）。end 早于 start 时按 0 计
    pub fn total_hours_in_range(&self, start: &DateTime<Utc>, end: &DateTime<Utc>) -> f64 {
        hours_between(start, end)
    }

    /// 操作运行时长合计（小时）
    pub fn runtime_hours(&self, ops: &[Operation]) -> f64 {
        ops.iter().map(|op| op.duration_hours()).sum()
    }

    /// 停机时长合计（小时）
    pub fn downtime_hours(&self, events: &[DowntimeEvent]) -> f64 {
        events.iter().map(|ev| ev.duration_hours()).sum()
    }

    /// 可用时长 = max(0, 总时长 - 停机时长)
    pub fn available_hours(&self, total_hours: f64, downtime_hours: f64) -> f64 {
        (total_hours - downtime_hours).max(0.0)
    }

    /// 稼动率 = runtime / available; available <= 0 时按 0 计
    pub fn utilization(&self, runtime_hours: f64, available_hours: f64) -> f64 {
        if available_hours > 0.0 {
            runtime_hours / available_hours
        } else {
            0.0
        }
    }
}

impl Default for UtilizationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::parse_utc_ts;

    fn engine() -> UtilizationEngine {
        UtilizationEngine::new()
    }

    #[test]
    fn test_utilization_zero_when_available_zero() {
        assert_eq!(engine().utilization(5.0, 0.0), 0.0);
        assert_eq!(engine().utilization(5.0, -1.0), 0.0);
        assert_eq!(engine().utilization(0.0, 10.0), 0.0);
    }

    #[test]
    fn test_available_hours_clamped_at_zero() {
        let eng = engine();
        assert!((eng.available_hours(72.0, 4.0) - 68.0).abs() < 1e-9);
        // 停机超过总时长
        assert_eq!(eng.available_hours(8.0, 10.0), 0.0);
        assert_eq!(eng.available_hours(8.0, 8.0), 0.0);
    }

    #[test]
    fn test_total_hours_clamps_inverted_range() {
        let eng = engine();
        let start = parse_utc_ts("2025-12-07T00:00:00Z").unwrap();
        let end = parse_utc_ts("2025-12-09T23:59:59Z").unwrap();
        let total = eng.total_hours_in_range(&start, &end);
        assert!((total - 71.999_722_222).abs() < 1e-6);
        assert_eq!(eng.total_hours_in_range(&end, &start), 0.0);
    }

    #[test]
    fn test_runtime_hours_sums_operations() {
        let eng = engine();
        let mk = |start: &str, end: &str| Operation {
            id: 0,
            work_order_id: 1,
            machine_id: 1,
            op_start: start.to_string(),
            op_end: end.to_string(),
            good_qty: 0,
            scrap_qty: 0,
            defect_code: None,
        };
        let ops = vec![
            mk("2025-12-07T08:00:00Z", "2025-12-07T12:00:00Z"), // 4h
            mk("2025-12-07T12:30:00Z", "2025-12-07T16:00:00Z"), // 3.5h
            mk("2025-12-07T18:00:00Z", "2025-12-07T17:00:00Z"), // 倒置, 按 0 计
        ];
        assert!((eng.runtime_hours(&ops) - 7.5).abs() < 1e-9);
        assert_eq!(eng.runtime_hours(&[]), 0.0);
    }

    #[test]
    fn test_rounding_helpers() {
        assert_eq!(round2(71.999_722_222), 72.0);
        assert_eq!(round2(11.5), 11.5);
        assert_eq!(round4(0.159_722_6), 0.1597);
        assert_eq!(round4(34.0 / 514.0), 0.0661);
    }
}
