//! Booking Writer — the transactional write side of the booking core.
//!
//! The availability re-check and the insert run inside a single
//! `BEGIN IMMEDIATE` transaction, so two racing requests for the same
//! slot cannot both commit. The partial unique index on
//! (data_agendada, hora_agendada) is the storage-level backstop: a
//! constraint violation is surfaced as `SlotUnavailable`, identical to
//! losing the in-transaction check.

use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, Connection, TransactionBehavior};
use thiserror::Error;

use crate::availability::is_slot_available;
use crate::config::BusinessHours;
use crate::db::{self, DatabaseError, HORA_FORMAT};
use crate::models::{Agendamento, AppointmentStatus, NovoAgendamento};

/// Actor recorded on the genesis log entry of a new booking.
pub const ACTOR_SISTEMA: &str = "sistema";

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Invalid date or time: {0}")]
    InvalidDate(String),

    #[error("Slot {data} {hora} is unavailable")]
    SlotUnavailable { data: String, hora: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Store unavailable, retry later")]
    StoreUnavailable,

    #[error(transparent)]
    Database(DatabaseError),
}

impl From<DatabaseError> for BookingError {
    fn from(err: DatabaseError) -> Self {
        if err.is_busy() {
            BookingError::StoreUnavailable
        } else {
            BookingError::Database(err)
        }
    }
}

pub fn parse_data(s: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| BookingError::InvalidDate(s.to_string()))
}

/// Accepts `HH:MM` (the wire format) and `HH:MM:SS` (legacy clients).
pub fn parse_hora(s: &str) -> Result<NaiveTime, BookingError> {
    NaiveTime::parse_from_str(s, HORA_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| BookingError::InvalidDate(s.to_string()))
}

/// Create an appointment, guaranteeing at most one active booking per
/// (date, time) slot at the moment of commit. On success the appointment
/// is `pendente` and its genesis log entry is written in the same
/// transaction; on conflict nothing is written.
pub fn create_appointment(
    conn: &mut Connection,
    hours: &BusinessHours,
    novo: &NovoAgendamento,
) -> Result<Agendamento, BookingError> {
    let data = parse_data(&novo.data_agendada)?;
    let hora = parse_hora(&novo.hora_agendada)?;

    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| BookingError::from(DatabaseError::from(e)))?;

    if db::get_cliente(&tx, novo.cliente_id)?.is_none() {
        return Err(BookingError::NotFound { entity: "cliente", id: novo.cliente_id });
    }
    if db::get_servico(&tx, novo.servico_id)?.is_none() {
        return Err(BookingError::NotFound { entity: "servico", id: novo.servico_id });
    }

    if !is_slot_available(&*tx, hours, data, hora)? {
        return Err(slot_unavailable(data, hora));
    }

    let inserted = tx.execute(
        "INSERT INTO agendamentos (cliente_id, servico_id, data_agendada, hora_agendada, observacoes, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            novo.cliente_id,
            novo.servico_id,
            data,
            db::format_hora(hora),
            novo.observacoes,
            AppointmentStatus::Pending.as_str(),
        ],
    );
    if let Err(e) = inserted {
        let err = DatabaseError::from(e);
        if err.is_unique_violation() {
            return Err(slot_unavailable(data, hora));
        }
        return Err(err.into());
    }
    let id = tx.last_insert_rowid();

    // Genesis entry: no prior status.
    db::insert_log(&tx, id, None, AppointmentStatus::Pending, ACTOR_SISTEMA)?;

    let agendamento = db::get_agendamento(&tx, id)?
        .ok_or(BookingError::NotFound { entity: "agendamento", id })?;

    tx.commit().map_err(|e| BookingError::from(DatabaseError::from(e)))?;

    tracing::info!(
        id,
        cliente_id = novo.cliente_id,
        data = %data,
        hora = %db::format_hora(hora),
        "Appointment created"
    );
    Ok(agendamento)
}

/// Transition an appointment's status, appending the audit entry in the
/// same transaction. Cancellation frees the slot via the partial unique
/// index; appointments are never deleted here.
pub fn update_status(
    conn: &mut Connection,
    id: i64,
    novo_status: AppointmentStatus,
    alterado_por: &str,
) -> Result<Agendamento, BookingError> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| BookingError::from(DatabaseError::from(e)))?;

    let atual = db::get_agendamento(&tx, id)?
        .ok_or(BookingError::NotFound { entity: "agendamento", id })?;

    // Re-activating a cancelled appointment can collide with a booking
    // made in the meantime; the partial unique index catches it.
    if let Err(e) = tx.execute(
        "UPDATE agendamentos SET status = ?2 WHERE id = ?1",
        params![id, novo_status.as_str()],
    ) {
        let err = DatabaseError::from(e);
        if err.is_unique_violation() {
            return Err(slot_unavailable(atual.data_agendada, atual.hora_agendada));
        }
        return Err(err.into());
    }

    db::insert_log(&tx, id, Some(atual.status), novo_status, alterado_por)?;

    let atualizado = db::get_agendamento(&tx, id)?
        .ok_or(BookingError::NotFound { entity: "agendamento", id })?;

    tx.commit().map_err(|e| BookingError::from(DatabaseError::from(e)))?;

    tracing::info!(
        id,
        de = atual.status.as_str(),
        para = novo_status.as_str(),
        por = alterado_por,
        "Appointment status changed"
    );
    Ok(atualizado)
}

fn slot_unavailable(data: NaiveDate, hora: NaiveTime) -> BookingError {
    BookingError::SlotUnavailable {
        data: data.to_string(),
        hora: db::format_hora(hora),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::models::{NovoCliente, NovoServico};

    fn setup() -> (Connection, i64, i64) {
        let conn = open_memory_database().unwrap();
        let cliente = db::insert_cliente(
            &conn,
            &NovoCliente {
                nome: "Pedro".into(),
                email: "pedro@example.com".into(),
                telefone: "(11) 98888-0000".into(),
            },
        )
        .unwrap();
        let servico = db::insert_servico(
            &conn,
            &NovoServico { nome: "Barba".into(), descricao: "".into(), preco: 30.0 },
        )
        .unwrap();
        (conn, cliente.id, servico.id)
    }

    fn novo(cliente_id: i64, servico_id: i64, data: &str, hora: &str) -> NovoAgendamento {
        NovoAgendamento {
            cliente_id,
            servico_id,
            data_agendada: data.into(),
            hora_agendada: hora.into(),
            observacoes: String::new(),
        }
    }

    #[test]
    fn booking_succeeds_pending_with_genesis_log() {
        let (mut conn, c, s) = setup();
        let hours = BusinessHours::default();

        let ag =
            create_appointment(&mut conn, &hours, &novo(c, s, "2025-03-10", "14:00")).unwrap();
        assert_eq!(ag.status, AppointmentStatus::Pending);
        assert_eq!(ag.data_agendada.to_string(), "2025-03-10");

        let history = db::list_logs_agendamento(&conn, ag.id).unwrap();
        assert_eq!(history.len(), 1);
        assert!(history[0].status_anterior.is_none());
        assert_eq!(history[0].status_novo, "pendente");
        assert_eq!(history[0].alterado_por, ACTOR_SISTEMA);
    }

    #[test]
    fn second_booking_same_slot_is_rejected() {
        let (mut conn, c, s) = setup();
        let hours = BusinessHours::default();

        create_appointment(&mut conn, &hours, &novo(c, s, "2025-03-10", "14:00")).unwrap();
        let result = create_appointment(&mut conn, &hours, &novo(c, s, "2025-03-10", "14:00"));
        assert!(matches!(result, Err(BookingError::SlotUnavailable { .. })));

        // Nothing partially written: one appointment, one log entry
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM agendamentos", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
        let logs: i64 = conn
            .query_row("SELECT COUNT(*) FROM logs_agendamentos", [], |r| r.get(0))
            .unwrap();
        assert_eq!(logs, 1);
    }

    #[test]
    fn accepts_seconds_suffix_in_time() {
        let (mut conn, c, s) = setup();
        let hours = BusinessHours::default();
        let ag =
            create_appointment(&mut conn, &hours, &novo(c, s, "2025-03-10", "14:00:00")).unwrap();
        assert_eq!(db::format_hora(ag.hora_agendada), "14:00");
    }

    #[test]
    fn cancelled_appointment_frees_its_slot() {
        let (mut conn, c, s) = setup();
        let hours = BusinessHours::default();

        let ag =
            create_appointment(&mut conn, &hours, &novo(c, s, "2025-03-10", "14:00")).unwrap();
        update_status(&mut conn, ag.id, AppointmentStatus::Cancelled, "admin").unwrap();

        let rebooked =
            create_appointment(&mut conn, &hours, &novo(c, s, "2025-03-10", "14:00")).unwrap();
        assert_ne!(rebooked.id, ag.id);
    }

    #[test]
    fn blocked_date_refuses_new_booking_keeps_existing() {
        let (mut conn, c, s) = setup();
        let hours = BusinessHours::default();

        let existing =
            create_appointment(&mut conn, &hours, &novo(c, s, "2025-03-10", "10:00")).unwrap();

        db::bloquear_data(&conn, parse_data("2025-03-10").unwrap(), Some("Feriado")).unwrap();

        let result = create_appointment(&mut conn, &hours, &novo(c, s, "2025-03-10", "14:00"));
        assert!(matches!(result, Err(BookingError::SlotUnavailable { .. })));

        // Blocking never cascades onto existing appointments
        let kept = db::get_agendamento(&conn, existing.id).unwrap().unwrap();
        assert_eq!(kept.status, AppointmentStatus::Pending);
    }

    #[test]
    fn unknown_cliente_or_servico_is_not_found() {
        let (mut conn, c, s) = setup();
        let hours = BusinessHours::default();

        let r1 = create_appointment(&mut conn, &hours, &novo(999, s, "2025-03-10", "14:00"));
        assert!(matches!(r1, Err(BookingError::NotFound { entity: "cliente", .. })));

        let r2 = create_appointment(&mut conn, &hours, &novo(c, 999, "2025-03-10", "14:00"));
        assert!(matches!(r2, Err(BookingError::NotFound { entity: "servico", .. })));
    }

    #[test]
    fn malformed_date_or_time_is_invalid() {
        let (mut conn, c, s) = setup();
        let hours = BusinessHours::default();

        let r1 = create_appointment(&mut conn, &hours, &novo(c, s, "10/03/2025", "14:00"));
        assert!(matches!(r1, Err(BookingError::InvalidDate(_))));

        let r2 = create_appointment(&mut conn, &hours, &novo(c, s, "2025-03-10", "2pm"));
        assert!(matches!(r2, Err(BookingError::InvalidDate(_))));
    }

    #[test]
    fn off_grid_time_is_rejected_as_unavailable() {
        let (mut conn, c, s) = setup();
        let hours = BusinessHours::default();
        let result = create_appointment(&mut conn, &hours, &novo(c, s, "2025-03-10", "14:10"));
        assert!(matches!(result, Err(BookingError::SlotUnavailable { .. })));
    }

    #[test]
    fn update_status_appends_transition_log() {
        let (mut conn, c, s) = setup();
        let hours = BusinessHours::default();

        let ag =
            create_appointment(&mut conn, &hours, &novo(c, s, "2025-03-10", "14:00")).unwrap();
        let updated =
            update_status(&mut conn, ag.id, AppointmentStatus::Confirmed, "admin").unwrap();
        assert_eq!(updated.status, AppointmentStatus::Confirmed);

        let history = db::list_logs_agendamento(&conn, ag.id).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].status_anterior.as_deref(), Some("pendente"));
        assert_eq!(history[1].status_novo, "confirmado");
        assert_eq!(history[1].alterado_por, "admin");
    }

    #[test]
    fn reactivating_cancelled_into_taken_slot_is_rejected() {
        let (mut conn, c, s) = setup();
        let hours = BusinessHours::default();

        let first =
            create_appointment(&mut conn, &hours, &novo(c, s, "2025-03-10", "14:00")).unwrap();
        update_status(&mut conn, first.id, AppointmentStatus::Cancelled, "admin").unwrap();
        create_appointment(&mut conn, &hours, &novo(c, s, "2025-03-10", "14:00")).unwrap();

        let result = update_status(&mut conn, first.id, AppointmentStatus::Confirmed, "admin");
        assert!(matches!(result, Err(BookingError::SlotUnavailable { .. })));
    }

    #[test]
    fn update_status_unknown_id_is_not_found() {
        let (mut conn, _, _) = setup();
        let result = update_status(&mut conn, 424242, AppointmentStatus::Confirmed, "admin");
        assert!(matches!(result, Err(BookingError::NotFound { entity: "agendamento", .. })));
    }

    /// Two writers racing for the same slot on separate connections:
    /// exactly one commits.
    #[test]
    fn concurrent_bookings_same_slot_exactly_one_wins() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().to_path_buf();

        {
            let conn = crate::db::open_database(&path).unwrap();
            db::insert_cliente(
                &conn,
                &NovoCliente {
                    nome: "Racer".into(),
                    email: "race@example.com".into(),
                    telefone: "(11) 90000-0000".into(),
                },
            )
            .unwrap();
            db::insert_servico(
                &conn,
                &NovoServico { nome: "Corte".into(), descricao: "".into(), preco: 40.0 },
            )
            .unwrap();
        }

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let mut conn = crate::db::open_database(&path).unwrap();
                    create_appointment(
                        &mut conn,
                        &BusinessHours::default(),
                        &novo(1, 1, "2025-03-10", "14:00"),
                    )
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let wins = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(BookingError::SlotUnavailable { .. })))
            .count();
        assert_eq!(wins, 1, "exactly one booking must win");
        assert_eq!(conflicts, 1, "the loser must see SlotUnavailable");

        // And the store never holds two active appointments in the slot
        let conn = crate::db::open_database(&path).unwrap();
        let active: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM agendamentos
                 WHERE data_agendada = '2025-03-10' AND hora_agendada = '14:00'
                   AND status != 'cancelado'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(active, 1);
    }
}
