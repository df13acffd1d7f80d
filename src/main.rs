// ==========================================
// 制造数据平台 - 演示主入口
// ==========================================
// 技术栈: Rust + SQLite
// 用途: 在演示数据库上跑一遍全部报表与工单操作
// ==========================================

use std::error::Error;
use std::path::Path;

use serde::Serialize;

use mfg_data_platform::app::{get_default_db_path, AppState};
use mfg_data_platform::db::{init_schema, open_sqlite_connection, seed_demo_data};
use mfg_data_platform::domain::{NewOperation, NewWorkOrder};
use mfg_data_platform::logging;

fn print_header(text: &str) {
    println!("\n{}", "=".repeat(80));
    println!("{}", text);
    println!("{}", "=".repeat(80));
}

fn print_rows<T: Serialize>(rows: &[T]) -> Result<(), Box<dyn Error>> {
    if rows.is_empty() {
        println!("(无结果)");
        return Ok(());
    }
    for row in rows {
        println!("{}", serde_json::to_string(row)?);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 生产报表演示", mfg_data_platform::APP_NAME);
    tracing::info!("系统版本: {}", mfg_data_platform::VERSION);
    tracing::info!("==================================================");

    // 获取数据库路径; 首次运行时建库并写入演示数据
    let db_path = get_default_db_path();
    if !Path::new(&db_path).exists() {
        tracing::info!("首次运行, 建库并写入演示数据: {}", db_path);
        let conn = open_sqlite_connection(&db_path)?;
        init_schema(&conn)?;
        seed_demo_data(&conn)?;
    }

    let state = AppState::new(db_path)?;
    tracing::info!("使用数据库: {}", state.get_db_path());

    let report_api = &state.report_api;
    let work_order_api = &state.work_order_api;

    // ---------------------------
    // 报表查询
    // ---------------------------

    print_header("月度产品产出 (2025-12)");
    print_rows(&report_api.product_output_by_month("2025-12")?)?;

    print_header("在制工单 @ 2025-12-09T12:00:00Z");
    print_rows(&report_api.wip_orders("2025-12-09T12:00:00Z")?)?;

    print_header("机台稼动率·简单口径 [2025-12-07 .. 2025-12-09]");
    print_rows(&report_api.machine_utilization_simple(
        "2025-12-07T00:00:00Z",
        "2025-12-09T23:59:59Z",
    )?)?;

    print_header("机台稼动率·停机调整口径 [2025-12-07 .. 2025-12-09]");
    print_rows(&report_api.machine_utilization(
        "2025-12-07T00:00:00Z",
        "2025-12-09T23:59:59Z",
        true,
    )?)?;

    print_header("无产出工单");
    print_rows(&report_api.work_orders_no_production()?)?;

    print_header("废品驱动·按产品 [2025-12-07 .. 2025-12-09]");
    print_rows(&report_api.top_scrap_by_product(
        "2025-12-07T00:00:00Z",
        "2025-12-09T23:59:59Z",
    )?)?;

    print_header("废品驱动·按机台 [2025-12-07 .. 2025-12-09]");
    print_rows(&report_api.top_scrap_by_machine(
        "2025-12-07T00:00:00Z",
        "2025-12-09T23:59:59Z",
    )?)?;

    print_header("产品区间汇总 Widget A [2025-12-07 .. 2025-12-10]");
    let summary = report_api.product_summary(
        "Widget A",
        "2025-12-07T00:00:00Z",
        "2025-12-10T23:59:59Z",
    )?;
    println!("{}", serde_json::to_string(&summary)?);

    // ---------------------------
    // 工单操作流程: 创建 -> 下发 -> 报工 -> 完成
    // ---------------------------

    print_header("创建工单并走完整报工流程");
    let new_order = NewWorkOrder {
        product_id: 1, // Widget A
        machine_id: Some(1),
        planned_qty: 220,
        planned_start: "2025-12-12T08:00:00Z".to_string(),
        planned_end: "2025-12-12T16:00:00Z".to_string(),
    };

    match work_order_api.create_work_order(&new_order) {
        Ok(order_id) => {
            println!("已创建工单 id={}", order_id);

            work_order_api.update_status(order_id, "released")?;
            work_order_api.add_production_record(&NewOperation {
                work_order_id: order_id,
                machine_id: 1,
                op_start: "2025-12-12T08:00:00Z".to_string(),
                op_end: "2025-12-12T12:00:00Z".to_string(),
                good_qty: 100,
                scrap_qty: 4,
                defect_code: Some("SCR-01".to_string()),
            })?;
            work_order_api.update_status(order_id, "completed")?;

            let order = work_order_api.get_work_order(order_id)?;
            println!("{}", serde_json::to_string(&order)?);

            println!("工单 {} 的报工记录:", order_id);
            print_rows(&work_order_api.list_operations(order_id)?)?;
        }
        Err(e) => println!("创建工单失败: {}", e),
    }

    Ok(())
}
