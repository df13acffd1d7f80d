// ==========================================
// 制造数据平台 - API 层
// ==========================================
// 职责: 提供业务 API 接口（报表查询与工单管理）
// ==========================================

pub mod error;
pub mod report_api;
pub mod validator;
pub mod work_order_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use report_api::ReportApi;
pub use work_order_api::WorkOrderApi;
