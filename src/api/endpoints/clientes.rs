use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::models::{Cliente, DuplicataCliente, NovoCliente};

/// `GET /clientes` — list clients (used by the booking form lookup).
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Cliente>>, ApiError> {
    let conn = ctx.conn()?;
    Ok(Json(db::list_clientes(&conn)?))
}

/// `POST /clientes` — create a client. Callers are expected to run the
/// duplicate check first; creation itself does not reject duplicates.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(novo): Json<NovoCliente>,
) -> Result<Json<Cliente>, ApiError> {
    if novo.nome.trim().is_empty() {
        return Err(ApiError::BadRequest("nome must not be empty".into()));
    }
    let conn = ctx.conn()?;
    let cliente = db::insert_cliente(&conn, &novo)?;
    Ok(Json(cliente))
}

/// `POST /clientes/verificar-duplicata` — which fields collide.
pub async fn verificar_duplicata(
    State(ctx): State<ApiContext>,
    Json(novo): Json<NovoCliente>,
) -> Result<Json<DuplicataCliente>, ApiError> {
    let conn = ctx.conn()?;
    Ok(Json(db::verificar_duplicata(&conn, &novo)?))
}

#[derive(Serialize)]
pub struct ExisteResponse {
    pub existe: bool,
}

#[derive(Deserialize)]
pub struct NomeQuery {
    pub nome: String,
}

/// `GET /clientes/verificar-nome?nome=...`
pub async fn verificar_nome(
    State(ctx): State<ApiContext>,
    Query(q): Query<NomeQuery>,
) -> Result<Json<ExisteResponse>, ApiError> {
    let conn = ctx.conn()?;
    let existe = db::cliente_nome_existe(&conn, &q.nome)?;
    Ok(Json(ExisteResponse { existe }))
}

#[derive(Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// `GET /clientes/verificar-email?email=...`
pub async fn verificar_email(
    State(ctx): State<ApiContext>,
    Query(q): Query<EmailQuery>,
) -> Result<Json<ExisteResponse>, ApiError> {
    let conn = ctx.conn()?;
    let existe = db::cliente_email_existe(&conn, &q.email)?;
    Ok(Json(ExisteResponse { existe }))
}

#[derive(Deserialize)]
pub struct TelefoneQuery {
    pub telefone: String,
}

/// `GET /clientes/verificar-telefone?telefone=...`
pub async fn verificar_telefone(
    State(ctx): State<ApiContext>,
    Query(q): Query<TelefoneQuery>,
) -> Result<Json<ExisteResponse>, ApiError> {
    let conn = ctx.conn()?;
    let existe = db::cliente_telefone_existe(&conn, &q.telefone)?;
    Ok(Json(ExisteResponse { existe }))
}
