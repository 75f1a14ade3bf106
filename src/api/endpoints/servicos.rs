use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::models::Servico;

/// `GET /servicos` — public service catalog.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Servico>>, ApiError> {
    let conn = ctx.conn()?;
    let servicos = db::list_servicos(&conn)?;
    Ok(Json(servicos))
}
