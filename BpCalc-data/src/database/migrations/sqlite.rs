use rusqlite::Connection;
use tracing::info;

/// Run SQLite migrations
pub fn run_migrations(conn: &Connection) -> Result<(), rusqlite::Error> {
    info!("Running SQLite migrations");

    create_readings_table(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

/// Create the blood pressure readings table
fn create_readings_table(conn: &Connection) -> Result<(), rusqlite::Error> {
    info!("Creating bp_readings table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS bp_readings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            systolic INTEGER NOT NULL,
            diastolic INTEGER NOT NULL,
            category TEXT NOT NULL,
            readingtime TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}
