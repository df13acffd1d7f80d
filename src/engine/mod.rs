// ==========================================
// 制造数据平台 - 计算引擎层
// ==========================================
// 职责: 纯计算逻辑（时长、可用时长、比率）
// 红线: 引擎不访问数据库, 输入输出均为内存数据
// ==========================================

pub mod utilization;

// 重导出核心类型
pub use utilization::{round2, round4, UtilizationEngine};
