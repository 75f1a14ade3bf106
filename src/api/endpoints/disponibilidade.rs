use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::availability;
use crate::booking;
use crate::models::Disponibilidade;

#[derive(Deserialize)]
pub struct DataQuery {
    pub data: String,
}

/// `GET /disponibilidade?data=YYYY-MM-DD` — the full slot grid for a
/// date, chronological.
pub async fn grade(
    State(ctx): State<ApiContext>,
    Query(q): Query<DataQuery>,
) -> Result<Json<Vec<Disponibilidade>>, ApiError> {
    let data = booking::parse_data(&q.data)?;
    let conn = ctx.conn()?;
    let grid = availability::compute_availability(&*conn, &ctx.hours, data)?;
    Ok(Json(grid))
}

#[derive(Deserialize)]
pub struct HorarioQuery {
    pub data: String,
    pub hora: String,
}

#[derive(Serialize)]
pub struct HorarioResponse {
    pub disponivel: bool,
}

/// `GET /verificar-horario?data=...&hora=...` — single-slot projection.
pub async fn verificar_horario(
    State(ctx): State<ApiContext>,
    Query(q): Query<HorarioQuery>,
) -> Result<Json<HorarioResponse>, ApiError> {
    let data = booking::parse_data(&q.data)?;
    let hora = booking::parse_hora(&q.hora)?;
    let conn = ctx.conn()?;
    let disponivel = availability::is_slot_available(&*conn, &ctx.hours, data, hora)?;
    Ok(Json(HorarioResponse { disponivel }))
}
