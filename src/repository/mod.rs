// ==========================================
// 制造数据平台 - 数据仓储层
// ==========================================
// 职责: 封装 SQLite 访问, 提供类型化的查询/写入接口
// 红线: Repository 不含业务逻辑, 校验与换算在 API/引擎层
// ==========================================

pub mod downtime_repo;
pub mod error;
pub mod machine_repo;
pub mod operation_repo;
pub mod product_repo;
pub mod work_order_repo;

// 重导出核心类型
pub use downtime_repo::DowntimeRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use machine_repo::MachineRepository;
pub use operation_repo::OperationRepository;
pub use product_repo::ProductRepository;
pub use work_order_repo::{WorkOrderRepository, DEFAULT_PLANT_ID};
