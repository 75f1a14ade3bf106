use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::DataBloqueada;

/// Mark a date as unavailable. Idempotent: blocking an already-blocked
/// date keeps the single existing record (and its original reason).
pub fn bloquear_data(
    conn: &Connection,
    data: NaiveDate,
    motivo: Option<&str>,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT OR IGNORE INTO datas_bloqueadas (data, motivo) VALUES (?1, ?2)",
        params![data, motivo],
    )?;
    Ok(())
}

/// Remove a block. A no-op success when the date was never blocked.
pub fn desbloquear_data(conn: &Connection, data: NaiveDate) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM datas_bloqueadas WHERE data = ?1", params![data])?;
    Ok(())
}

pub fn data_bloqueada(conn: &Connection, data: NaiveDate) -> Result<bool, DatabaseError> {
    let found = conn
        .query_row(
            "SELECT 1 FROM datas_bloqueadas WHERE data = ?1",
            params![data],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

pub fn list_datas_bloqueadas(conn: &Connection) -> Result<Vec<DataBloqueada>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT data, motivo FROM datas_bloqueadas ORDER BY data")?;
    let rows = stmt.query_map([], |row| {
        Ok(DataBloqueada { data: row.get(0)?, motivo: row.get(1)? })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}
