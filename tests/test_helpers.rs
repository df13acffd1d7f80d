// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化与 API 测试环境
// ==========================================

use std::error::Error;
use std::sync::Arc;

use tempfile::NamedTempFile;

use mfg_data_platform::api::{ReportApi, WorkOrderApi};
use mfg_data_platform::app::AppState;
use mfg_data_platform::db::{init_schema, open_sqlite_connection, seed_demo_data};
use mfg_data_platform::logging;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 包含全部 API 实例和临时数据库
pub struct ApiTestEnv {
    pub db_path: String,
    pub report_api: Arc<ReportApi>,
    pub work_order_api: Arc<WorkOrderApi>,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建空库测试环境（仅 schema，无数据）
    pub fn new() -> Result<Self, String> {
        Self::build(false)
    }

    /// 创建带演示数据的测试环境
    ///
    /// 演示数据集固定，报表测试可以断言精确数值
    pub fn new_seeded() -> Result<Self, String> {
        Self::build(true)
    }

    fn build(seeded: bool) -> Result<Self, String> {
        logging::init_test();

        let (temp_file, db_path) =
            create_test_db().map_err(|e| format!("创建测试数据库失败: {}", e))?;

        if seeded {
            let conn = open_sqlite_connection(&db_path)
                .map_err(|e| format!("无法打开数据库: {}", e))?;
            seed_demo_data(&conn).map_err(|e| format!("写入演示数据失败: {}", e))?;
        }

        let state = AppState::new(db_path.clone())?;

        Ok(Self {
            db_path,
            report_api: state.report_api.clone(),
            work_order_api: state.work_order_api.clone(),
            _temp_file: temp_file,
        })
    }
}
