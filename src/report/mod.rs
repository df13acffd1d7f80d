// ==========================================
// 制造数据平台 - 报表层
// ==========================================
// 职责: 固定口径报表的读模型与查询仓储
// ==========================================

pub mod models;
pub mod report_repo;

// 重导出核心类型
pub use models::{
    MachineRuntimeRow, MachineUtilization, MonthlyProductOutput, PendingWorkOrder, ProductSummary,
    ScrapByMachine, ScrapByProduct, SimpleMachineUtilization, WipOrder,
};
pub use report_repo::ReportRepository;
