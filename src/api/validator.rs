// ==========================================
// 制造数据平台 - API 入参校验辅助
// ==========================================
// 职责: 时间戳与月份入参的格式校验
// 约定: 校验失败一律返回 InvalidInput, 错误信息包含字段名与实际值
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::parse_utc_ts;
use chrono::{DateTime, NaiveDate, Utc};

/// 校验并解析 ISO-8601 UTC 时间戳入参
///
/// # 参数
/// - field: 字段名（用于错误信息）
/// - value: 待校验的时间戳字符串
pub fn validate_ts(field: &str, value: &str) -> ApiResult<DateTime<Utc>> {
    parse_utc_ts(value).ok_or_else(|| {
        ApiError::InvalidInput(format!(
            "{} 格式应为 YYYY-MM-DDTHH:MM:SSZ, 实际: '{}'",
            field, value
        ))
    })
}

/// 校验月份入参 'YYYY-MM'
///
/// 长度必须为 7, 防止 '2025-1' 这类前缀误匹配多个月份
pub fn validate_month(value: &str) -> ApiResult<()> {
    let parseable =
        NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d").is_ok();
    if value.len() == 7 && parseable {
        Ok(())
    } else {
        Err(ApiError::InvalidInput(format!(
            "月份格式应为 YYYY-MM, 实际: '{}'",
            value
        )))
    }
}
