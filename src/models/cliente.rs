use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cliente {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub telefone: String,
}

/// Payload for creating a client (id assigned by the store).
#[derive(Debug, Clone, Deserialize)]
pub struct NovoCliente {
    pub nome: String,
    pub email: String,
    pub telefone: String,
}

/// Which identity fields of a prospective client collide with an
/// existing record. All false means no duplicate.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DuplicataCliente {
    pub nome: bool,
    pub email: bool,
    pub telefone: bool,
}

impl DuplicataCliente {
    pub fn any(&self) -> bool {
        self.nome || self.email || self.telefone
    }
}
