use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::booking;
use crate::db;
use crate::models::{Agendamento, AgendamentoDetalhado, AppointmentStatus, NovoAgendamento};

/// `POST /agendamentos` — public booking endpoint. Conflicts surface as
/// 409 SLOT_UNAVAILABLE; nothing is written on rejection.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(novo): Json<NovoAgendamento>,
) -> Result<Json<Agendamento>, ApiError> {
    let mut conn = ctx.conn()?;
    let agendamento = booking::create_appointment(&mut conn, &ctx.hours, &novo)?;
    Ok(Json(agendamento))
}

/// `GET /agendamentos` — admin listing with client/service context.
pub async fn list(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<AgendamentoDetalhado>>, ApiError> {
    let conn = ctx.conn()?;
    Ok(Json(db::list_agendamentos_detalhados(&conn)?))
}

#[derive(Deserialize)]
pub struct DataQuery {
    pub data: String,
}

/// `GET /agendamentos-data?data=YYYY-MM-DD` — appointments for one date.
pub async fn list_por_data(
    State(ctx): State<ApiContext>,
    Query(q): Query<DataQuery>,
) -> Result<Json<Vec<Agendamento>>, ApiError> {
    let data = booking::parse_data(&q.data)?;
    let conn = ctx.conn()?;
    Ok(Json(db::list_agendamentos_data(&conn, data)?))
}

#[derive(Deserialize)]
pub struct StatusUpdate {
    pub status: String,
    pub alterado_por: Option<String>,
}

/// `PATCH /agendamentos/:id` — status transition; appends a log entry.
pub async fn update_status(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    Json(body): Json<StatusUpdate>,
) -> Result<Json<Agendamento>, ApiError> {
    let status = AppointmentStatus::from_str(&body.status)
        .map_err(|_| ApiError::BadRequest(format!("unknown status: {}", body.status)))?;
    let alterado_por = body.alterado_por.as_deref().unwrap_or("admin");

    let mut conn = ctx.conn()?;
    let agendamento = booking::update_status(&mut conn, id, status, alterado_por)?;
    Ok(Json(agendamento))
}
