//! In-memory stand-in for the PDV backend. Every payload is snake_case JSON,
//! the way the real backend speaks it.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Produto {
    pub id: Uuid,
    pub nome: String,
    pub preco_venda: f64,
    pub categoria_id: Option<u32>,
    pub estoque_atual: i64,
}

#[derive(Deserialize)]
pub struct NovoProduto {
    pub nome: String,
    pub preco_venda: f64,
    #[serde(default)]
    pub categoria_id: Option<u32>,
    #[serde(default)]
    pub estoque_atual: i64,
}

#[derive(Deserialize)]
pub struct AtualizaProduto {
    pub nome: Option<String>,
    pub preco_venda: Option<f64>,
    pub categoria_id: Option<u32>,
    pub estoque_atual: Option<i64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemVenda {
    pub produto_id: Uuid,
    pub quantidade_total: u32,
    pub preco_unitario: f64,
}

#[derive(Deserialize)]
pub struct NovaVenda {
    pub forma_pagamento: String,
    pub itens: Vec<ItemVenda>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Venda {
    pub id: Uuid,
    pub forma_pagamento: String,
    pub itens: Vec<ItemVenda>,
    pub valor_total: f64,
}

#[derive(Default)]
pub struct Store {
    produtos: RwLock<HashMap<Uuid, Produto>>,
    vendas: RwLock<HashMap<Uuid, Venda>>,
}

pub type Db = Arc<Store>;

pub fn app() -> Router {
    let db: Db = Arc::new(Store::default());
    Router::new()
        .route("/produtos", get(list_produtos).post(create_produto))
        .route(
            "/produtos/{id}",
            get(get_produto).put(update_produto).delete(delete_produto),
        )
        .route("/vendas", post(create_venda))
        .route("/vendas/{id}", get(get_venda))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_produtos(State(db): State<Db>) -> Json<Vec<Produto>> {
    let produtos = db.produtos.read().await;
    Json(produtos.values().cloned().collect())
}

async fn create_produto(
    State(db): State<Db>,
    Json(input): Json<NovoProduto>,
) -> (StatusCode, Json<Produto>) {
    let produto = Produto {
        id: Uuid::new_v4(),
        nome: input.nome,
        preco_venda: input.preco_venda,
        categoria_id: input.categoria_id,
        estoque_atual: input.estoque_atual,
    };
    tracing::debug!(id = %produto.id, "produto created");
    db.produtos.write().await.insert(produto.id, produto.clone());
    (StatusCode::CREATED, Json(produto))
}

async fn get_produto(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Produto>, StatusCode> {
    let produtos = db.produtos.read().await;
    produtos.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_produto(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<AtualizaProduto>,
) -> Result<Json<Produto>, StatusCode> {
    let mut produtos = db.produtos.write().await;
    let produto = produtos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(nome) = input.nome {
        produto.nome = nome;
    }
    if let Some(preco_venda) = input.preco_venda {
        produto.preco_venda = preco_venda;
    }
    if let Some(categoria_id) = input.categoria_id {
        produto.categoria_id = Some(categoria_id);
    }
    if let Some(estoque_atual) = input.estoque_atual {
        produto.estoque_atual = estoque_atual;
    }
    Ok(Json(produto.clone()))
}

async fn delete_produto(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut produtos = db.produtos.write().await;
    produtos.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}

async fn create_venda(
    State(db): State<Db>,
    Json(input): Json<NovaVenda>,
) -> Result<(StatusCode, Json<Venda>), StatusCode> {
    if input.itens.is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let venda = Venda {
        id: Uuid::new_v4(),
        valor_total: valor_total(&input.itens),
        forma_pagamento: input.forma_pagamento,
        itens: input.itens,
    };
    tracing::debug!(id = %venda.id, valor_total = venda.valor_total, "venda registered");
    db.vendas.write().await.insert(venda.id, venda.clone());
    Ok((StatusCode::CREATED, Json(venda)))
}

async fn get_venda(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Venda>, StatusCode> {
    let vendas = db.vendas.read().await;
    vendas.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

fn valor_total(itens: &[ItemVenda]) -> f64 {
    itens
        .iter()
        .map(|item| f64::from(item.quantidade_total) * item.preco_unitario)
        .sum()
}
