// ==========================================
// 制造数据平台 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为，避免“部分模块外键开启/部分不开启”
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 提供建库与演示数据种子入口（开发/演示环境）
// ==========================================

use rusqlite::{params, Connection};
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version（与 `scripts/dev_db/schema.sql` 对齐）
///
/// 说明：
/// - 版本号用于**提示/告警**（不做自动迁移），避免静默在旧库上运行导致隐性错误。
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

/// 建库：执行 schema.sql 并登记版本号
///
/// 幂等：所有 DDL 均为 IF NOT EXISTS，可在已有库上安全重复执行
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    let schema_sql = include_str!("../scripts/dev_db/schema.sql");
    conn.execute_batch(schema_sql)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        params![CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// 写入演示数据集（单工厂、3 产品、3 机台、9 工单、7 条操作记录、3 次停机）
///
/// 数据特征（报表演示与测试共用）：
/// - 2025-12 月 Widget A 合计 good=480 / scrap=34，涉及 3 张工单
/// - WO5/WO6/WO9 无任何操作记录（"无产出工单" 报表命中）
/// - 机台 1/2 在 2025-12-07 ~ 2025-12-09 窗口内各有一次停机
///
/// 注意：显式指定主键 id，保证多次演示环境的数据完全一致
pub fn seed_demo_data(conn: &Connection) -> rusqlite::Result<()> {
    let tx = conn.unchecked_transaction()?;

    // ===== 工厂 =====
    tx.execute(
        "INSERT INTO plants (id, name, location) VALUES (1, 'Springfield Works', 'Springfield')",
        [],
    )?;

    // ===== 产品 =====
    tx.execute("INSERT INTO products (id, name) VALUES (1, 'Widget A')", [])?;
    tx.execute("INSERT INTO products (id, name) VALUES (2, 'Widget B')", [])?;
    tx.execute("INSERT INTO products (id, name) VALUES (3, 'Gizmo C')", [])?;

    // ===== 机台 =====
    tx.execute(
        "INSERT INTO machines (id, plant_id, name) VALUES (1, 1, 'Stamping Press 1')",
        [],
    )?;
    tx.execute(
        "INSERT INTO machines (id, plant_id, name) VALUES (2, 1, 'Stamping Press 2')",
        [],
    )?;
    tx.execute(
        "INSERT INTO machines (id, plant_id, name) VALUES (3, 1, 'CNC Mill 1')",
        [],
    )?;

    // ===== 工单 =====
    // (id, product_id, machine_id, planned_qty, status, planned_start, planned_end), plant_id 固定为 1
    let work_orders: &[(i64, i64, Option<i64>, i64, &str, &str, &str)] = &[
        (1, 1, Some(1), 200, "completed", "2025-12-07T06:00:00Z", "2025-12-07T18:00:00Z"),
        (2, 1, Some(2), 150, "completed", "2025-12-08T06:00:00Z", "2025-12-08T18:00:00Z"),
        (3, 1, Some(1), 160, "in_progress", "2025-12-09T06:00:00Z", "2025-12-10T18:00:00Z"),
        (4, 2, Some(2), 300, "in_progress", "2025-12-08T12:00:00Z", "2025-12-10T00:00:00Z"),
        (5, 2, None, 120, "released", "2025-12-09T00:00:00Z", "2025-12-11T00:00:00Z"),
        (6, 3, None, 80, "planned", "2025-12-15T00:00:00Z", "2025-12-16T00:00:00Z"),
        (7, 3, None, 60, "cancelled", "2025-12-09T00:00:00Z", "2025-12-10T00:00:00Z"),
        (8, 3, Some(3), 80, "completed", "2025-11-28T06:00:00Z", "2025-11-28T18:00:00Z"),
        (9, 1, None, 100, "delayed", "2025-12-20T00:00:00Z", "2025-12-22T00:00:00Z"),
    ];
    for (id, product_id, machine_id, qty, status, start, end) in work_orders {
        tx.execute(
            "INSERT INTO work_orders
                 (id, product_id, plant_id, machine_id, planned_qty, status, planned_start, planned_end)
             VALUES (?1, ?2, 1, ?3, ?4, ?5, ?6, ?7)",
            params![id, product_id, machine_id, qty, status, start, end],
        )?;
    }

    // ===== 操作记录 =====
    // (id, work_order_id, machine_id, op_start, op_end, good_qty, scrap_qty, defect_code)
    let operations: &[(i64, i64, i64, &str, &str, i64, i64, Option<&str>)] = &[
        (1, 1, 1, "2025-12-07T08:00:00Z", "2025-12-07T12:00:00Z", 110, 6, Some("SCR-01")),
        (2, 1, 1, "2025-12-07T12:30:00Z", "2025-12-07T16:00:00Z", 88, 6, None),
        (3, 2, 2, "2025-12-08T08:00:00Z", "2025-12-08T15:00:00Z", 142, 8, Some("SCR-02")),
        (4, 3, 1, "2025-12-09T08:00:00Z", "2025-12-09T12:00:00Z", 140, 14, Some("SCR-01")),
        (5, 4, 2, "2025-12-08T16:00:00Z", "2025-12-08T22:00:00Z", 120, 3, None),
        (6, 4, 3, "2025-12-09T13:00:00Z", "2025-12-09T21:00:00Z", 150, 9, Some("SCR-03")),
        (7, 8, 3, "2025-11-28T08:00:00Z", "2025-11-28T16:00:00Z", 75, 5, None),
    ];
    for (id, wo_id, machine_id, start, end, good, scrap, defect) in operations {
        tx.execute(
            "INSERT INTO operations
                 (id, work_order_id, machine_id, op_start, op_end, good_qty, scrap_qty, defect_code)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![id, wo_id, machine_id, start, end, good, scrap, defect],
        )?;
    }

    // ===== 停机事件 =====
    let downtime: &[(i64, i64, &str, &str, &str)] = &[
        (1, 1, "2025-12-08T06:00:00Z", "2025-12-08T10:00:00Z", "scheduled maintenance"),
        (2, 2, "2025-12-09T18:00:00Z", "2025-12-09T21:00:00Z", "unplanned breakdown"),
        (3, 3, "2025-12-01T00:00:00Z", "2025-12-01T08:00:00Z", "material shortage"),
    ];
    for (id, machine_id, start, end, reason) in downtime {
        tx.execute(
            "INSERT INTO downtime_events (id, machine_id, dt_start, dt_end, reason)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, machine_id, start, end, reason],
        )?;
    }

    tx.commit()?;
    Ok(())
}
