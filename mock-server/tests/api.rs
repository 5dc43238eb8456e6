use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::{json, Value};
use tower::{Service, ServiceExt};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- find ---

#[tokio::test]
async fn find_unknown_route_is_empty() {
    let resp = app().oneshot(empty_request("GET", "/people")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!([]));
}

// --- create ---

#[tokio::test]
async fn create_returns_201_with_generated_id() {
    let resp = app()
        .oneshot(json_request("POST", "/people", r#"{"name":"Ada","id":"mine"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let record = body_json(resp).await;
    assert_eq!(record["name"], "Ada");
    assert_ne!(record["id"], "mine");
    assert!(record["id"].as_str().is_some());
}

#[tokio::test]
async fn create_non_object_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/people", r#"[1,2]"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- find_one / update / delete on missing ids ---

#[tokio::test]
async fn find_one_not_found() {
    let resp = app()
        .oneshot(empty_request("GET", "/people/nobody"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_not_found() {
    let resp = app()
        .oneshot(json_request("PATCH", "/people/nobody", r#"{"name":"Nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/people/nobody"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}

// --- full lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    let mut app = app().into_service();

    async fn call(
        app: &mut axum::routing::RouterIntoService<String>,
        req: Request<String>,
    ) -> axum::response::Response {
        ServiceExt::ready(app).await.unwrap().call(req).await.unwrap()
    }

    // create two records
    let resp = call(&mut app, json_request("POST", "/people", r#"{"name":"Ada","role":"admin"}"#)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let ada = body_json(resp).await;
    let id = ada["id"].as_str().unwrap().to_string();

    let resp = call(&mut app, json_request("POST", "/people", r#"{"name":"Grace","role":"user"}"#)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // other routes are separate collections
    let resp = call(&mut app, empty_request("GET", "/posts")).await;
    assert_eq!(body_json(resp).await, json!([]));

    // find with bracket filters
    let resp = call(&mut app, empty_request("GET", "/people?role%5B%5D=admin&role%5B%5D=owner")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let found = body_json(resp).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["name"], "Ada");

    // find everything, insertion order kept
    let resp = call(&mut app, empty_request("GET", "/people")).await;
    let all = body_json(resp).await;
    assert_eq!(all[0]["name"], "Ada");
    assert_eq!(all[1]["name"], "Grace");

    // find_one
    let resp = call(&mut app, empty_request("GET", &format!("/people/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, ada);

    // update merges and keeps id
    let resp = call(
        &mut app,
        json_request("PATCH", &format!("/people/{id}"), r#"{"role":"owner","id":"hijack"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["name"], "Ada");
    assert_eq!(updated["role"], "owner");
    assert_eq!(updated["id"], id.as_str());

    // delete returns the removed record
    let resp = call(&mut app, empty_request("DELETE", &format!("/people/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["role"], "owner");

    // gone afterwards
    let resp = call(&mut app, empty_request("GET", &format!("/people/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = call(&mut app, empty_request("GET", "/people")).await;
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 1);
}
