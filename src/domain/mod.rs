// ==========================================
// 制造数据平台 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、基础校验辅助
// 红线: 不含数据访问逻辑,不含报表逻辑
// ==========================================

pub mod downtime;
pub mod machine;
pub mod operation;
pub mod product;
pub mod types;
pub mod work_order;

// 重导出核心类型
pub use downtime::DowntimeEvent;
pub use machine::Machine;
pub use operation::{NewOperation, Operation};
pub use product::Product;
pub use types::WorkOrderStatus;
pub use work_order::{NewWorkOrder, WorkOrder};
