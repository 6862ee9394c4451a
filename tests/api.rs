// Testes de ponta a ponta: sobe um backend falso e o painel em portas efêmeras.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use painel_pelucia::{
    config::{AppState, Config},
    routes,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::{net::TcpListener, sync::Notify};

const SECRET: &str = "segredo-de-teste";

#[derive(Default)]
struct Fake {
    inconsistencies: Vec<Value>,
    restocks: Vec<Value>,
    deleted: Vec<(i64, Value)>,
    cash_payloads: Vec<Value>,
    tokens: Vec<String>,
    fail_restocks: bool,
    fail_delete: bool,
    // (chegou, liberar): segura o DELETE até o teste mandar seguir
    hold_delete: Option<(Arc<Notify>, Arc<Notify>)>,
}

type Shared = Arc<Mutex<Fake>>;

fn remember_token(fake: &Shared, headers: &HeaderMap) {
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        fake.lock().unwrap().tokens.push(auth.to_string());
    }
}

async fn inconsistencies(State(fake): State<Shared>, headers: HeaderMap) -> Json<Value> {
    remember_token(&fake, &headers);
    Json(json!({ "alertas": fake.lock().unwrap().inconsistencies.clone() }))
}

async fn restocks(State(fake): State<Shared>) -> impl IntoResponse {
    let fake = fake.lock().unwrap();
    if fake.fail_restocks {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "falha no job" })));
    }
    (StatusCode::OK, Json(json!({ "alertas": fake.restocks.clone() })))
}

async fn delete_inconsistency(
    State(fake): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> StatusCode {
    let (fail, hold) = {
        let fake = fake.lock().unwrap();
        (fake.fail_delete, fake.hold_delete.clone())
    };
    if let Some((arrived, release)) = hold {
        arrived.notify_one();
        release.notified().await;
    }
    if fail {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    let mut fake = fake.lock().unwrap();
    fake.inconsistencies.retain(|a| a["id"] != id);
    fake.deleted.push((id, body));
    StatusCode::NO_CONTENT
}

async fn machine(Path(id): Path<i64>) -> impl IntoResponse {
    match id {
        4 => (StatusCode::OK, Json(json!({ "id": 4, "nome": "Garra 04 TAKEBALL", "lojaId": 2, "alertaId": 17 }))),
        5 => (StatusCode::OK, Json(json!({ "id": 5, "nome": "Poltrona 01", "lojaId": 2, "alertaId": null }))),
        _ => (StatusCode::NOT_FOUND, Json(json!({ "error": "Máquina não encontrada" }))),
    }
}

async fn machines_by_store() -> Json<Value> {
    Json(json!([
        { "id": 4, "nome": "Garra 04 TAKEBALL" },
        { "id": 5, "nome": "Poltrona 01" },
        { "id": 6, "nome": "Garra Gigante" }
    ]))
}

async fn movements(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    assert!(params.contains_key("maquinaId"));
    Json(json!([
        { "id": 2, "dataColeta": "2024-03-07T15:00:00Z", "totalPos": 42, "abastecidas": "10" },
        { "id": 1, "dataColeta": "2024-03-01T15:00:00Z", "total_pos": 50 }
    ]))
}

async fn store(Path(id): Path<i64>) -> Json<Value> {
    let nome = if id == 1 { "Aeroporto Guarulhos" } else { "Shopping Centro" };
    Json(json!({ "id": id, "nome": nome }))
}

async fn cash(State(fake): State<Shared>, Json(body): Json<Value>) -> impl IntoResponse {
    fake.lock().unwrap().cash_payloads.push(body);
    (StatusCode::CREATED, Json(json!({ "id": 99 })))
}

async fn print_report(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    if params.get("lojaId").map(String::as_str) == Some("404") {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "sem dados" })));
    }
    if params.get("lojaId").map(String::as_str) == Some("500") {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "boom" })));
    }
    (
        StatusCode::OK,
        Json(json!({
            "periodo": { "inicio": "2024-03-01", "fim": "2024-03-31" },
            "totais": { "lucroBrutoTotal": "12345.6", "lucroLiquidoTotal": 8000, "custoTotal": null },
            "lojas": [],
            "destaques": {},
            "graficos": {
                "rankingLucroBruto": [
                    { "nome": "Aeroporto", "valor": 1000 },
                    { "nome": "Centro", "valor": 10 }
                ],
                "rankingCusto": [
                    { "nome": "Aeroporto", "valor": 0 },
                    { "nome": "Centro", "valor": 0 }
                ]
            }
        })),
    )
}

fn fake_backend(fake: Shared) -> Router {
    Router::new()
        .route("/relatorios/alertas-movimentacao-inconsistente", get(inconsistencies))
        .route("/relatorios/alertas-movimentacao-inconsistente/{id}", delete(delete_inconsistency))
        .route("/relatorios/alertas-abastecimento-incompleto", get(restocks))
        .route("/relatorios/impressao", get(print_report))
        .route("/maquinas", get(machines_by_store))
        .route("/maquinas/{id}", get(machine))
        .route("/movimentacoes", get(movements))
        .route("/lojas/{id}", get(store))
        .route("/registros-dinheiro", post(cash))
        .with_state(fake)
}

struct TestApp {
    base: String,
    fake: Shared,
    http: reqwest::Client,
}

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn spawn_app() -> TestApp {
    let fake: Shared = Arc::new(Mutex::new(Fake {
        inconsistencies: vec![
            json!({ "id": 17, "maquinaId": 4, "maquinaNome": "Garra 04 TAKEBALL", "contador_out": 120, "contador_in": 300, "fichas": 290, "sairam": 118 }),
        ],
        restocks: vec![
            json!({ "id": 5, "maquinaId": 9, "maquinaNome": "Poltrona 02", "tipo": "abastecimento_incompleto", "capacidadePadrao": 100, "totalAntes": 20, "abastecido": 50, "totalDepois": 70 }),
        ],
        ..Default::default()
    }));
    let backend_url = serve(fake_backend(fake.clone())).await;

    let config = Config {
        backend_url,
        jwt_secret: SECRET.to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        backend_timeout: Duration::from_secs(5),
        fonts_dir: PathBuf::from("./fonts"),
    };
    let app_state = AppState::new(&config).unwrap();
    let base = serve(routes::router(app_state)).await;

    TestApp { base, fake, http: reqwest::Client::new() }
}

fn token(role: &str) -> String {
    let claims = json!({ "sub": "7", "nome": "Ana", "role": role, "exp": Utc::now().timestamp() + 3600 });
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_ref())).unwrap()
}

impl TestApp {
    fn get(&self, path: &str, role: &str) -> reqwest::RequestBuilder {
        self.http.get(format!("{}{}", self.base, path)).bearer_auth(token(role))
    }
}

#[tokio::test]
async fn health_answers_with_request_id() {
    let app = spawn_app().await;
    let res = app.http.get(format!("{}/api/health", app.base)).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn requests_without_token_are_rejected() {
    let app = spawn_app().await;
    let res = app.http.get(format!("{}/api/alertas", app.base)).send().await.unwrap();
    assert_eq!(res.status(), 401);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Token de autenticação inválido ou ausente.");
}

#[tokio::test]
async fn feed_lists_inconsistencies_before_restocks_and_forwards_token() {
    let app = spawn_app().await;
    let res = app.get("/api/alertas", "funcionario").send().await.unwrap();
    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["total"], 2);
    assert_eq!(body["alertas"][0]["tipo"], "movimentacao_inconsistente");
    assert_eq!(body["alertas"][0]["id"], 17);
    assert_eq!(body["alertas"][1]["tipo"], "abastecimento_incompleto");
    assert_eq!(body["alertas"][1]["id"], 5);

    let tokens = app.fake.lock().unwrap().tokens.clone();
    assert!(tokens.iter().all(|t| t.starts_with("Bearer ")));
    assert!(!tokens.is_empty());
}

#[tokio::test]
async fn correcting_an_alert_returns_the_refetched_feed() {
    let app = spawn_app().await;
    let res = app
        .http
        .delete(format!("{}/api/alertas/17?maquinaId=4", app.base))
        .bearer_auth(token("admin"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["total"], 1);
    assert_eq!(body["alertas"][0]["id"], 5);

    let deleted = app.fake.lock().unwrap().deleted.clone();
    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0].0, 17);
    assert_eq!(deleted[0].1["maquinaId"], 4);
}

#[tokio::test]
async fn one_failing_source_fails_the_whole_feed() {
    let app = spawn_app().await;
    app.fake.lock().unwrap().fail_restocks = true;

    let res = app.get("/api/alertas", "funcionario").send().await.unwrap();
    assert_eq!(res.status(), 502);
    let body: Value = res.json().await.unwrap();
    assert!(body.get("alertas").is_none());
    assert_eq!(body["error"], "Não foi possível carregar os dados. Tente novamente.");
}

#[tokio::test]
async fn failed_delete_leaves_the_feed_untouched() {
    let app = spawn_app().await;
    app.fake.lock().unwrap().fail_delete = true;

    let res = app
        .http
        .delete(format!("{}/api/alertas/17?maquinaId=4", app.base))
        .bearer_auth(token("admin"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 502);
    let body: Value = res.json().await.unwrap();
    assert!(body.get("alertas").is_none());
    assert!(app.fake.lock().unwrap().deleted.is_empty());

    let feed: Value = app.get("/api/alertas", "admin").send().await.unwrap().json().await.unwrap();
    assert_eq!(feed["total"], 2);
    assert_eq!(feed["alertas"][0]["id"], 17);
}

#[tokio::test]
async fn refetch_failure_after_delete_still_reports_error() {
    let app = spawn_app().await;
    app.fake.lock().unwrap().fail_restocks = true;

    let res = app
        .http
        .delete(format!("{}/api/alertas/17?maquinaId=4", app.base))
        .bearer_auth(token("admin"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 502);

    let fake = app.fake.lock().unwrap();
    assert_eq!(fake.deleted.len(), 1);
    assert!(fake.inconsistencies.is_empty());
}

#[tokio::test]
async fn second_delete_from_same_session_waits_its_turn() {
    let app = spawn_app().await;
    let arrived = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    app.fake.lock().unwrap().hold_delete = Some((arrived.clone(), release.clone()));

    let url = format!("{}/api/alertas/17?maquinaId=4", app.base);
    let first = tokio::spawn(app.http.delete(&url).bearer_auth(token("admin")).send());
    arrived.notified().await;

    let second = app.http.delete(&url).bearer_auth(token("admin")).send().await.unwrap();
    assert_eq!(second.status(), 409);
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["error"], "Aguarde: já existe uma operação em andamento.");

    release.notify_one();
    let first = first.await.unwrap().unwrap();
    assert_eq!(first.status(), 200);
    let feed: Value = first.json().await.unwrap();
    assert_eq!(feed["total"], 1);
    assert_eq!(app.fake.lock().unwrap().deleted.len(), 1);
}

#[tokio::test]
async fn employees_cannot_delete() {
    let app = spawn_app().await;
    let res = app
        .http
        .delete(format!("{}/api/alertas/17?maquinaId=4", app.base))
        .bearer_auth(token("funcionario"))
        .header("accept-language", "en-US")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 403);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "This action requires the 'admin' role.");
    assert!(app.fake.lock().unwrap().deleted.is_empty());
}

#[tokio::test]
async fn reconciliation_reads_stock_from_newest_movement() {
    let app = spawn_app().await;
    let res = app.get("/api/maquinas/4/reconciliacao", "funcionario").send().await.unwrap();
    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["estoqueAtual"], 42);
    assert_eq!(body["maquina"]["nome"], "Garra 04 TAKEBALL");
    assert_eq!(body["alertaMovimentacao"]["id"], 17);
    assert_eq!(body["movimentacoes"].as_array().unwrap().len(), 2);
    assert_eq!(body["movimentacoes"][1]["totalPos"], "50");
}

#[tokio::test]
async fn unknown_machine_is_not_found() {
    let app = spawn_app().await;
    let res = app.get("/api/maquinas/999/reconciliacao", "funcionario").send().await.unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn marking_corrected_needs_an_alert_id() {
    let app = spawn_app().await;
    let url = |id: i64| format!("{}/api/maquinas/{}/corrigido", app.base, id);

    let res = app.http.post(url(5)).bearer_auth(token("admin")).send().await.unwrap();
    assert_eq!(res.status(), 422);

    let res = app.http.post(url(4)).bearer_auth(token("admin")).send().await.unwrap();
    assert_eq!(res.status(), 204);
    assert_eq!(app.fake.lock().unwrap().deleted[0].0, 17);
}

#[tokio::test]
async fn airport_store_sees_every_machine() {
    let app = spawn_app().await;

    let body: Value = app
        .get("/api/caixa/maquinas-elegiveis?lojaId=1", "funcionario")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["regra"], "todas_as_maquinas");
    assert_eq!(body["maquinas"].as_array().unwrap().len(), 3);

    let body: Value = app
        .get("/api/caixa/maquinas-elegiveis?lojaId=2", "funcionario")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["regra"], "takeball_ou_poltrona");
    let names: Vec<&str> = body["maquinas"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["nome"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Garra 04 TAKEBALL", "Poltrona 01"]);
}

#[tokio::test]
async fn cash_registration_sends_blank_numbers_as_null() {
    let app = spawn_app().await;
    let res = app
        .http
        .post(format!("{}/api/caixa", app.base))
        .bearer_auth(token("funcionario"))
        .json(&json!({
            "lojaId": "2",
            "maquinaId": "",
            "inicio": "2024-03-07T08:00",
            "fim": "2024-03-07T22:00",
            "valorDinheiro": "",
            "valorCartaoPix": "0"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);

    let payloads = app.fake.lock().unwrap().cash_payloads.clone();
    assert_eq!(payloads.len(), 1);
    let sent = &payloads[0];
    assert_eq!(sent["lojaId"], 2);
    assert!(sent["maquinaId"].is_null());
    assert!(sent["valorDinheiro"].is_null());
    assert_eq!(sent["valorCartaoPix"], 0.0);
}

#[tokio::test]
async fn cash_registration_without_store_is_rejected_locally() {
    let app = spawn_app().await;
    let res = app
        .http
        .post(format!("{}/api/caixa", app.base))
        .bearer_auth(token("funcionario"))
        .json(&json!({ "inicio": "2024-03-07T08:00", "fim": "2024-03-07T22:00" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 422);
    assert!(app.fake.lock().unwrap().cash_payloads.is_empty());
}

#[tokio::test]
async fn report_is_formatted_with_bar_floor() {
    let app = spawn_app().await;
    let res = app
        .get("/api/relatorios/impressao?dataInicio=2024-03-01&dataFim=2024-03-31", "admin")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["totais"]["lucroBrutoTotal"]["exibicao"], "R$ 12.345,60");
    assert_eq!(body["periodo"]["inicio"], "01/03/2024");

    let ranking = &body["graficos"][0];
    assert_eq!(ranking["chave"], "rankingLucroBruto");
    assert_eq!(ranking["linhas"][0]["larguraPercentual"], 100.0);
    assert_eq!(ranking["linhas"][1]["larguraPercentual"], 4.0);

    let costs = &body["graficos"][2];
    assert_eq!(costs["chave"], "rankingCusto");
    assert_eq!(costs["linhas"][0]["larguraPercentual"], 4.0);
    assert_eq!(costs["linhas"][1]["larguraPercentual"], 4.0);
}

#[tokio::test]
async fn report_failures_use_canned_messages() {
    let app = spawn_app().await;

    let res = app
        .get("/api/relatorios/impressao?lojaId=404&dataInicio=2024-03-01&dataFim=2024-03-31", "admin")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Nenhum dado encontrado para o período selecionado.");

    let res = app
        .get("/api/relatorios/impressao?lojaId=500&dataInicio=2024-03-01&dataFim=2024-03-31", "admin")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 502);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Erro interno ao gerar o relatório.");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = spawn_app().await;
    let res = app.http.get(format!("{}/api-docs/openapi.json", app.base)).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let doc: Value = res.json().await.unwrap();
    assert!(doc["paths"].get("/api/alertas").is_some());
}
