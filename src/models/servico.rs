use serde::{Deserialize, Serialize};

/// Catalog entry. Reference data, created and edited by admin only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Servico {
    pub id: i64,
    pub nome: String,
    pub descricao: String,
    pub preco: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NovoServico {
    pub nome: String,
    #[serde(default)]
    pub descricao: String,
    pub preco: f64,
}
