use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{Agendamento, AgendamentoDetalhado, AppointmentStatus};

/// Wire/storage format for appointment times.
pub const HORA_FORMAT: &str = "%H:%M";

pub fn format_hora(t: NaiveTime) -> String {
    t.format(HORA_FORMAT).to_string()
}

const SELECT_AGENDAMENTO: &str =
    "SELECT id, cliente_id, servico_id, data_agendada, hora_agendada, observacoes, status, criado_em
     FROM agendamentos";

pub fn get_agendamento(conn: &Connection, id: i64) -> Result<Option<Agendamento>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("{SELECT_AGENDAMENTO} WHERE id = ?1"),
            params![id],
            agendamento_row,
        )
        .optional()?;
    row.map(agendamento_from_raw).transpose()
}

/// All appointments for a date, cancelled included, chronological.
pub fn list_agendamentos_data(
    conn: &Connection,
    data: NaiveDate,
) -> Result<Vec<Agendamento>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_AGENDAMENTO} WHERE data_agendada = ?1 ORDER BY hora_agendada"
    ))?;
    let rows = stmt.query_map(params![data], agendamento_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(agendamento_from_raw(row?)?);
    }
    Ok(out)
}

/// Times of day holding a non-cancelled appointment on `data`.
pub fn horarios_ocupados(
    conn: &Connection,
    data: NaiveDate,
) -> Result<Vec<NaiveTime>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT hora_agendada FROM agendamentos
         WHERE data_agendada = ?1 AND status != 'cancelado'
         ORDER BY hora_agendada",
    )?;
    let rows = stmt.query_map(params![data], |row| row.get::<_, String>(0))?;
    let mut out = Vec::new();
    for row in rows {
        let raw = row?;
        let t = NaiveTime::parse_from_str(&raw, HORA_FORMAT).map_err(|_| {
            DatabaseError::InvalidEnum { field: "hora_agendada".into(), value: raw }
        })?;
        out.push(t);
    }
    Ok(out)
}

/// Admin listing with client and service context, newest date first.
pub fn list_agendamentos_detalhados(
    conn: &Connection,
) -> Result<Vec<AgendamentoDetalhado>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.cliente_id, a.servico_id, a.data_agendada, a.hora_agendada,
                a.observacoes, a.status, a.criado_em,
                c.nome, c.email, c.telefone, s.nome, s.preco
         FROM agendamentos a
         JOIN clientes c ON c.id = a.cliente_id
         JOIN servicos s ON s.id = a.servico_id
         ORDER BY a.data_agendada DESC, a.hora_agendada DESC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            agendamento_row(row)?,
            row.get::<_, String>(8)?,
            row.get::<_, String>(9)?,
            row.get::<_, String>(10)?,
            row.get::<_, String>(11)?,
            row.get::<_, f64>(12)?,
        ))
    })?;

    let mut out = Vec::new();
    for row in rows {
        let (raw, cliente_nome, cliente_email, cliente_telefone, servico_nome, servico_preco) =
            row?;
        out.push(AgendamentoDetalhado {
            agendamento: agendamento_from_raw(raw)?,
            cliente_nome,
            cliente_email,
            cliente_telefone,
            servico_nome,
            servico_preco,
        });
    }
    Ok(out)
}

type RawAgendamento = (i64, i64, i64, NaiveDate, String, String, String, chrono::NaiveDateTime);

fn agendamento_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawAgendamento> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
    ))
}

fn agendamento_from_raw(raw: RawAgendamento) -> Result<Agendamento, DatabaseError> {
    let (id, cliente_id, servico_id, data_agendada, hora, observacoes, status, criado_em) = raw;
    let hora_agendada = NaiveTime::parse_from_str(&hora, HORA_FORMAT).map_err(|_| {
        DatabaseError::InvalidEnum { field: "hora_agendada".into(), value: hora }
    })?;
    Ok(Agendamento {
        id,
        cliente_id,
        servico_id,
        data_agendada,
        hora_agendada,
        observacoes,
        status: AppointmentStatus::from_str(&status)?,
        criado_em,
    })
}
