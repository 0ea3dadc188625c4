//! End-to-end check of the snake/camel contract against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `ApiClient` over real
//! HTTP using ureq. The server only understands snake_case and the DTOs here
//! only speak camelCase, so every successful step proves both directions of
//! the transcoding boundary.

use pdv_core::{ApiClient, ApiError, HttpMethod, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Produto {
    id: Uuid,
    nome: String,
    preco_venda: f64,
    categoria_id: Option<u32>,
    estoque_atual: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NovoProduto {
    nome: String,
    preco_venda: f64,
    categoria_id: Option<u32>,
    estoque_atual: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AtualizaProduto {
    #[serde(skip_serializing_if = "Option::is_none")]
    preco_venda: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    estoque_atual: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct ItemVenda {
    produto_id: Uuid,
    quantidade_total: u32,
    preco_unitario: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Venda {
    id: Uuid,
    forma_pagamento: String,
    itens: Vec<ItemVenda>,
    valor_total: f64,
}

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            agent.put(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
        (HttpMethod::Patch, Some(body)) => {
            agent.patch(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn start_server() -> ApiClient {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    ApiClient::new(&format!("http://{addr}"))
}

#[test]
fn produto_lifecycle() {
    let client = start_server();

    // Step 1: list, should be empty.
    let produtos: Vec<Produto> = client.parse_json(execute(client.build_get("/produtos"))).unwrap();
    assert!(produtos.is_empty(), "expected empty list");

    // Step 2: create. The server rejects camelCase, so success proves the
    // outbound body was snake_cased.
    let input = NovoProduto {
        nome: "Coxinha".to_string(),
        preco_venda: 6.5,
        categoria_id: Some(2),
        estoque_atual: 10,
    };
    let req = client.build_post("/produtos", &input).unwrap();
    let created: Produto = client.parse_json(execute(req)).unwrap();
    assert_eq!(created.nome, "Coxinha");
    assert_eq!(created.preco_venda, 6.5);
    assert_eq!(created.categoria_id, Some(2));
    assert_eq!(created.estoque_atual, 10);
    let id = created.id;

    // Step 3: get, compared against the created value.
    let fetched: Produto = client
        .parse_json(execute(client.build_get(&format!("/produtos/{id}"))))
        .unwrap();
    assert_eq!(fetched, created);

    // Step 4: partial update.
    let update = AtualizaProduto {
        preco_venda: Some(7.0),
        estoque_atual: None,
    };
    let req = client.build_put(&format!("/produtos/{id}"), &update).unwrap();
    let updated: Produto = client.parse_json(execute(req)).unwrap();
    assert_eq!(updated.preco_venda, 7.0);
    assert_eq!(updated.estoque_atual, 10);

    // Step 5: raw value view is camelCase.
    let raw = client
        .parse_value(execute(client.build_get(&format!("/produtos/{id}"))))
        .unwrap();
    assert_eq!(raw["precoVenda"], 7.0);
    assert!(raw.get("preco_venda").is_none());

    // Step 6: delete, then NotFound on both get and delete.
    client.parse_empty(execute(client.build_delete(&format!("/produtos/{id}")))).unwrap();
    let err = client
        .parse_json::<Produto>(execute(client.build_get(&format!("/produtos/{id}"))))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
    let err = client
        .parse_empty(execute(client.build_delete(&format!("/produtos/{id}"))))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
}

#[test]
fn venda_with_nested_itens() {
    let client = start_server();
    let produto_id = Uuid::new_v4();

    let body = json!({
        "formaPagamento": "cartaoDebito",
        "itens": [
            {"produtoId": produto_id, "quantidadeTotal": 3, "precoUnitario": 2.5},
        ],
    });
    let req = client.build_request(HttpMethod::Post, "/vendas", Some(&body)).unwrap();
    let venda: Venda = client.parse_json(execute(req)).unwrap();
    assert_eq!(venda.forma_pagamento, "cartaoDebito");
    assert_eq!(venda.valor_total, 7.5);
    assert_eq!(
        venda.itens,
        vec![ItemVenda {
            produto_id,
            quantidade_total: 3,
            preco_unitario: 2.5,
        }]
    );

    let fetched = client
        .parse_value(execute(client.build_get(&format!("/vendas/{}", venda.id))))
        .unwrap();
    assert_eq!(fetched["itens"][0]["quantidadeTotal"], 3);
    assert_eq!(fetched["valorTotal"], 7.5);
}

#[test]
fn camel_case_body_sent_untranscoded_is_rejected() {
    let client = start_server();
    let req = HttpRequest {
        method: HttpMethod::Post,
        path: format!("{}/produtos", client.base_url()),
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(r#"{"nome":"Suco","precoVenda":5.0}"#.to_string()),
    };

    let err = client.parse_value(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 422, .. }));
}
