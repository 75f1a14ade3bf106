use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{Cliente, DuplicataCliente, NovoCliente};

pub fn insert_cliente(conn: &Connection, novo: &NovoCliente) -> Result<Cliente, DatabaseError> {
    conn.execute(
        "INSERT INTO clientes (nome, email, telefone) VALUES (?1, ?2, ?3)",
        params![novo.nome, novo.email, novo.telefone],
    )?;
    let id = conn.last_insert_rowid();
    Ok(Cliente {
        id,
        nome: novo.nome.clone(),
        email: novo.email.clone(),
        telefone: novo.telefone.clone(),
    })
}

pub fn get_cliente(conn: &Connection, id: i64) -> Result<Option<Cliente>, DatabaseError> {
    let cliente = conn
        .query_row(
            "SELECT id, nome, email, telefone FROM clientes WHERE id = ?1",
            params![id],
            cliente_from_row,
        )
        .optional()?;
    Ok(cliente)
}

pub fn list_clientes(conn: &Connection) -> Result<Vec<Cliente>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT id, nome, email, telefone FROM clientes ORDER BY nome")?;
    let rows = stmt.query_map([], cliente_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn cliente_nome_existe(conn: &Connection, nome: &str) -> Result<bool, DatabaseError> {
    exists(conn, "SELECT 1 FROM clientes WHERE LOWER(nome) = LOWER(?1)", nome)
}

pub fn cliente_email_existe(conn: &Connection, email: &str) -> Result<bool, DatabaseError> {
    exists(conn, "SELECT 1 FROM clientes WHERE LOWER(email) = LOWER(?1)", email)
}

pub fn cliente_telefone_existe(conn: &Connection, telefone: &str) -> Result<bool, DatabaseError> {
    // Compare digits only: the form sends formatted numbers
    let digits: String = telefone.chars().filter(|c| c.is_ascii_digit()).collect();
    exists(
        conn,
        "SELECT 1 FROM clientes
         WHERE REPLACE(REPLACE(REPLACE(REPLACE(telefone, '(', ''), ')', ''), '-', ''), ' ', '') = ?1",
        &digits,
    )
}

/// Field-by-field duplicate check used before client creation.
pub fn verificar_duplicata(
    conn: &Connection,
    novo: &NovoCliente,
) -> Result<DuplicataCliente, DatabaseError> {
    Ok(DuplicataCliente {
        nome: cliente_nome_existe(conn, &novo.nome)?,
        email: cliente_email_existe(conn, &novo.email)?,
        telefone: cliente_telefone_existe(conn, &novo.telefone)?,
    })
}

fn exists(conn: &Connection, sql: &str, value: &str) -> Result<bool, DatabaseError> {
    let found = conn
        .query_row(sql, params![value], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

fn cliente_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Cliente> {
    Ok(Cliente {
        id: row.get(0)?,
        nome: row.get(1)?,
        email: row.get(2)?,
        telefone: row.get(3)?,
    })
}
