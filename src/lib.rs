// ==========================================
// 制造数据平台 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 生产报表查询与数据访问层（单工厂）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 报表层 - 读模型与固定口径查询
pub mod report;

// 引擎层 - 稼动率计算
pub mod engine;

// 数据库基础设施（连接初始化/PRAGMA 统一/种子数据）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::WorkOrderStatus;

// 领域实体
pub use domain::{DowntimeEvent, Machine, NewOperation, NewWorkOrder, Operation, Product, WorkOrder};

// 引擎
pub use engine::UtilizationEngine;

// API
pub use api::{ApiError, ApiResult, ReportApi, WorkOrderApi};

// 报表读模型
pub use report::{
    MachineUtilization, MonthlyProductOutput, PendingWorkOrder, ProductSummary, ScrapByMachine,
    ScrapByProduct, SimpleMachineUtilization, WipOrder,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "制造数据平台";

// ==========================================
// 预编译检查
// ==========================================
