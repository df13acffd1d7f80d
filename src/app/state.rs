// ==========================================
// 制造数据平台 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::api::{ReportApi, WorkOrderApi};
use crate::db::{init_schema, open_sqlite_connection, read_schema_version, CURRENT_SCHEMA_VERSION};
use crate::report::ReportRepository;
use crate::repository::{
    DowntimeRepository, MachineRepository, OperationRepository, ProductRepository,
    WorkOrderRepository,
};

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 生产报表API
    pub report_api: Arc<ReportApi>,

    /// 工单管理API
    pub work_order_api: Arc<WorkOrderApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开共享连接并应用统一 PRAGMA
    /// 2. 空库自动建表; 旧库仅告警不自动迁移
    /// 3. 初始化所有Repository与API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        // 创建数据库连接（共享连接）
        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;

        // 空库自动建表; 版本不匹配仅告警（不做自动迁移）
        match read_schema_version(&conn) {
            Ok(None) => {
                tracing::info!("检测到空库, 执行建表: {}", db_path);
                init_schema(&conn).map_err(|e| format!("建表失败: {}", e))?;
            }
            Ok(Some(v)) if v != CURRENT_SCHEMA_VERSION => {
                tracing::warn!(
                    "schema_version 不匹配: 库中为 {}, 代码期望 {}（继续启动, 请检查迁移）",
                    v,
                    CURRENT_SCHEMA_VERSION
                );
            }
            Ok(Some(_)) => {}
            Err(e) => {
                tracing::warn!("读取 schema_version 失败(将继续启动): {}", e);
            }
        }

        // Best-effort: keep DB optimizations from blocking app startup.
        if let Err(e) = ensure_report_indexes(&conn) {
            tracing::warn!("报表索引初始化失败(将继续启动): {}", e);
        }

        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let product_repo = Arc::new(ProductRepository::new(conn.clone()));
        let machine_repo = Arc::new(MachineRepository::new(conn.clone()));
        let work_order_repo = Arc::new(WorkOrderRepository::new(conn.clone()));
        let operation_repo = Arc::new(OperationRepository::new(conn.clone()));
        let downtime_repo = Arc::new(DowntimeRepository::new(conn.clone()));
        let report_repo = Arc::new(ReportRepository::new(conn.clone()));

        // ==========================================
        // 初始化API层
        // ==========================================
        let report_api = Arc::new(ReportApi::new(
            report_repo,
            product_repo.clone(),
            operation_repo.clone(),
            downtime_repo,
            machine_repo.clone(),
        ));

        let work_order_api = Arc::new(WorkOrderApi::new(
            work_order_repo,
            product_repo,
            machine_repo,
            operation_repo,
        ));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            report_api,
            work_order_api,
        })
    }

    /// 获取数据库路径
    pub fn get_db_path(&self) -> &str {
        &self.db_path
    }
}

fn ensure_report_indexes(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        r#"
        -- operations is the hot table for every report; keep range scans fast on older DBs too.
        CREATE INDEX IF NOT EXISTS idx_operations_work_order ON operations(work_order_id);
        CREATE INDEX IF NOT EXISTS idx_operations_machine_start ON operations(machine_id, op_start);
        CREATE INDEX IF NOT EXISTS idx_operations_start ON operations(op_start);
        CREATE INDEX IF NOT EXISTS idx_work_orders_status ON work_orders(status);
        CREATE INDEX IF NOT EXISTS idx_downtime_machine_start ON downtime_events(machine_id, dt_start);
        "#,
    )?;
    Ok(())
}

// ==========================================
// 默认数据库路径辅助函数
// ==========================================

/// 获取默认数据库路径
///
/// # 返回
/// - 开发环境: 用户数据目录/mfg-data-platform-dev/manufacturing.db
/// - 生产环境: 用户数据目录/mfg-data-platform/manufacturing.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("MFG_DATA_PLATFORM_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    // 先给一个默认回退值，后续如果能拿到 data_dir 再覆盖。
    let mut path = PathBuf::from("./manufacturing.db");

    // 尝试获取用户数据目录
    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("mfg-data-platform-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("mfg-data-platform");
        }

        // 确保目录存在
        std::fs::create_dir_all(&path).ok();
        path = path.join("manufacturing.db");

        // 开发环境：如果目标 DB 不存在，但项目根目录有初始 DB，则复制一份作为种子数据
        #[cfg(debug_assertions)]
        {
            if !path.exists() {
                let seed = PathBuf::from("./manufacturing.db");
                if seed.exists() {
                    // best-effort: 复制失败不应阻塞启动（后续会自动创建空库并建表）
                    let _ = std::fs::copy(seed, &path);
                }
            }
        }
    }

    path.to_string_lossy().to_string()
}
