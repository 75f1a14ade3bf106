//! Availability Checker — pure read/query side of the booking core.
//!
//! Works against the `SlotView` trait rather than the database directly,
//! so the conflict rules are unit-testable with a fake store. The Booking
//! Writer (`booking.rs`) re-runs the same checks inside its transaction.

use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;

use crate::config::BusinessHours;
use crate::db::{self, DatabaseError};
use crate::models::Disponibilidade;

/// Read-only projection of the store needed for availability decisions.
pub trait SlotView {
    fn data_bloqueada(&self, data: NaiveDate) -> Result<bool, DatabaseError>;
    fn horarios_ocupados(&self, data: NaiveDate) -> Result<Vec<NaiveTime>, DatabaseError>;
}

impl SlotView for Connection {
    fn data_bloqueada(&self, data: NaiveDate) -> Result<bool, DatabaseError> {
        db::data_bloqueada(self, data)
    }

    fn horarios_ocupados(&self, data: NaiveDate) -> Result<Vec<NaiveTime>, DatabaseError> {
        db::horarios_ocupados(self, data)
    }
}

/// Compute the availability grid for a date, chronological by time of day.
///
/// A blocked date makes every slot unavailable. Otherwise a slot is
/// unavailable iff a non-cancelled appointment occupies that exact time.
/// Deterministic for identical store state.
pub fn compute_availability<V: SlotView>(
    view: &V,
    hours: &BusinessHours,
    data: NaiveDate,
) -> Result<Vec<Disponibilidade>, DatabaseError> {
    let slots = hours.slots();

    if view.data_bloqueada(data)? {
        return Ok(slots
            .into_iter()
            .map(|t| Disponibilidade { horario: db::format_hora(t), disponivel: false })
            .collect());
    }

    let ocupados = view.horarios_ocupados(data)?;
    Ok(slots
        .into_iter()
        .map(|t| Disponibilidade {
            horario: db::format_hora(t),
            disponivel: !ocupados.contains(&t),
        })
        .collect())
}

/// Single-slot projection of `compute_availability`, used as the fast
/// path at booking time. Times outside the configured slot grid are
/// never available.
pub fn is_slot_available<V: SlotView>(
    view: &V,
    hours: &BusinessHours,
    data: NaiveDate,
    hora: NaiveTime,
) -> Result<bool, DatabaseError> {
    if !hours.is_valid_slot(hora) {
        return Ok(false);
    }
    if view.data_bloqueada(data)? {
        return Ok(false);
    }
    Ok(!view.horarios_ocupados(data)?.contains(&hora))
}
