use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::{AppointmentStatus, LogAgendamento, LogAgendamentoDetalhado};

/// Append one status-transition entry. Pure insert: existing entries are
/// never updated or merged. `status_anterior` is None for the genesis
/// entry written when the appointment is created.
pub fn insert_log(
    conn: &Connection,
    agendamento_id: i64,
    status_anterior: Option<AppointmentStatus>,
    status_novo: AppointmentStatus,
    alterado_por: &str,
) -> Result<LogAgendamento, DatabaseError> {
    conn.execute(
        "INSERT INTO logs_agendamentos (agendamento_id, status_anterior, status_novo, alterado_por)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            agendamento_id,
            status_anterior.map(|s| s.as_str()),
            status_novo.as_str(),
            alterado_por,
        ],
    )?;
    let id = conn.last_insert_rowid();
    conn.query_row(
        "SELECT id, agendamento_id, status_anterior, status_novo, alterado_por, criado_em
         FROM logs_agendamentos WHERE id = ?1",
        params![id],
        log_from_row,
    )
    .map_err(DatabaseError::from)
}

/// Full status history of one appointment, oldest first — replaying it
/// reconstructs every transition.
pub fn list_logs_agendamento(
    conn: &Connection,
    agendamento_id: i64,
) -> Result<Vec<LogAgendamento>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, agendamento_id, status_anterior, status_novo, alterado_por, criado_em
         FROM logs_agendamentos WHERE agendamento_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![agendamento_id], log_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Admin panel listing, newest first, with appointment/client context.
/// LEFT JOIN keeps entries whose appointment was removed by an external
/// retention process.
pub fn list_logs_detalhados(
    conn: &Connection,
) -> Result<Vec<LogAgendamentoDetalhado>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT l.id, l.agendamento_id, l.status_anterior, l.status_novo, l.alterado_por,
                l.criado_em, a.data_agendada, a.hora_agendada, c.nome
         FROM logs_agendamentos l
         LEFT JOIN agendamentos a ON a.id = l.agendamento_id
         LEFT JOIN clientes c ON c.id = a.cliente_id
         ORDER BY l.id DESC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(LogAgendamentoDetalhado {
            log: log_from_row(row)?,
            data_agendada: row.get(6)?,
            hora_agendada: row.get(7)?,
            cliente_nome: row.get(8)?,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

fn log_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<LogAgendamento> {
    Ok(LogAgendamento {
        id: row.get(0)?,
        agendamento_id: row.get(1)?,
        status_anterior: row.get(2)?,
        status_novo: row.get(3)?,
        alterado_por: row.get(4)?,
        criado_em: row.get(5)?,
    })
}
