// ==========================================
// 制造数据平台 - 应用层
// ==========================================
// 职责: 应用状态组装与默认路径解析
// ==========================================

pub mod state;

// 重导出核心类型
pub use state::{get_default_db_path, AppState};
