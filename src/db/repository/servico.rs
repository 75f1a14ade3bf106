use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{NovoServico, Servico};

pub fn insert_servico(conn: &Connection, novo: &NovoServico) -> Result<Servico, DatabaseError> {
    conn.execute(
        "INSERT INTO servicos (nome, descricao, preco) VALUES (?1, ?2, ?3)",
        params![novo.nome, novo.descricao, novo.preco],
    )?;
    Ok(Servico {
        id: conn.last_insert_rowid(),
        nome: novo.nome.clone(),
        descricao: novo.descricao.clone(),
        preco: novo.preco,
    })
}

pub fn get_servico(conn: &Connection, id: i64) -> Result<Option<Servico>, DatabaseError> {
    let servico = conn
        .query_row(
            "SELECT id, nome, descricao, preco FROM servicos WHERE id = ?1",
            params![id],
            servico_from_row,
        )
        .optional()?;
    Ok(servico)
}

pub fn list_servicos(conn: &Connection) -> Result<Vec<Servico>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT id, nome, descricao, preco FROM servicos ORDER BY id")?;
    let rows = stmt.query_map([], servico_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn update_servico(conn: &Connection, servico: &Servico) -> Result<(), DatabaseError> {
    let updated = conn.execute(
        "UPDATE servicos SET nome = ?2, descricao = ?3, preco = ?4 WHERE id = ?1",
        params![servico.id, servico.nome, servico.descricao, servico.preco],
    )?;
    if updated == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "servico".into(),
            id: servico.id.to_string(),
        });
    }
    Ok(())
}

fn servico_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Servico> {
    Ok(Servico {
        id: row.get(0)?,
        nome: row.get(1)?,
        descricao: row.get(2)?,
        preco: row.get(3)?,
    })
}
