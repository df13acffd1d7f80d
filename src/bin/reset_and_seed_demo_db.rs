use chrono::Local;
use rusqlite::Connection;
use std::error::Error;
use std::fs;
use std::path::Path;

use mfg_data_platform::app::get_default_db_path;
use mfg_data_platform::db::{init_schema, open_sqlite_connection, seed_demo_data};

fn main() -> Result<(), Box<dyn Error>> {
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(get_default_db_path);

    backup_and_reset_db(&db_path)?;

    let conn = open_sqlite_connection(&db_path)?;

    // Create schema and stamp schema_version
    init_schema(&conn)?;

    // Seed demo data
    seed_demo_data(&conn)?;

    eprintln!("Seeded demo database at {}", db_path);
    print_quick_counts(&conn)?;

    Ok(())
}

fn backup_and_reset_db(db_path: &str) -> Result<(), Box<dyn Error>> {
    let path = Path::new(db_path);
    if !path.exists() {
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = format!("{}.bak.{}", db_path, ts);
    fs::copy(path, &backup_path)?;
    fs::remove_file(path)?;

    eprintln!("Backed up {} -> {}", db_path, backup_path);
    Ok(())
}

fn print_quick_counts(conn: &Connection) -> Result<(), Box<dyn Error>> {
    let tables = [
        "plants",
        "products",
        "machines",
        "work_orders",
        "operations",
        "downtime_events",
    ];

    eprintln!("Row counts:");
    for t in tables {
        let sql = format!("SELECT COUNT(*) FROM {}", t);
        let c: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        eprintln!("  {:<16} {}", t, c);
    }
    Ok(())
}
