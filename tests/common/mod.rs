use axum::{
    Router,
    body::{Body, Bytes},
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

pub async fn run_health_contract(app: Router) {
    let (status, body) = request_json(app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("status").and_then(Value::as_str), Some("ok"));
}

pub async fn run_empty_store_contract(app: Router) {
    let (status, body) = request_json(app, get("/students")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

pub async fn run_create_student_contract(app: Router) {
    let (status, created) = request_json(
        app.clone(),
        post_json(
            "/students",
            json!({
                "name": "Jonathan",
                "age": 22,
                "document": "4354354333",
                "address": "Rua teste 2242"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(created.get("id").and_then(Value::as_i64).is_some());
    assert_eq!(created["name"], "Jonathan");
    assert_eq!(created["age"], 22);
    assert_eq!(created["document"], "4354354333");
    assert_eq!(created["address"], "Rua teste 2242");

    let (status, problem) = request_json(
        app.clone(),
        post_json("/students", json!({ "name": null, "age": 22 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_problem(&problem, 400, "Validation failed");

    let (status, problem) = request_json(
        app.clone(),
        post_json("/students", json!({ "document": "123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_problem(&problem, 400, "Validation failed");

    let (status, listed) = request_json(app, get("/students")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

pub async fn run_student_lifecycle_contract(app: Router) {
    let (_, created) = request_json(
        app.clone(),
        post_json(
            "/students",
            json!({ "name": "Ana", "age": 30, "document": "d1", "address": "Rua A" }),
        ),
    )
    .await;
    let id = created["id"].as_i64().expect("created student should carry an id");
    let path = format!("/students/{id}");

    let (status, fetched) = request_json(app.clone(), get(&path)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, renamed) = request_json(app.clone(), patch(&format!("{path}/Maria"))).await;
    assert_eq!(status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(renamed["id"], id);
    assert_eq!(renamed["name"], "Maria");
    assert_eq!(renamed["age"], created["age"]);
    assert_eq!(renamed["document"], created["document"]);
    assert_eq!(renamed["address"], created["address"]);

    let (status, fetched) = request_json(app.clone(), get(&path)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, renamed);

    let (status, _) = request(app.clone(), delete(&path)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, problem) = request_json(app.clone(), get(&path)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_problem(&problem, 404, "Not found");

    let (status, problem) = request_json(app.clone(), delete(&path)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_problem(&problem, 404, "Not found");

    let (status, problem) = request_json(app.clone(), patch(&format!("{path}/Bia"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_problem(&problem, 404, "Not found");

    let (status, problem) = request_json(app, get("/students/not-a-number")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_problem(&problem, 400, "Validation failed");
}

pub async fn run_lookup_contract(app: Router) {
    for (name, age, document) in [("A", 20, "d1"), ("A", 30, "d2"), ("B", 20, "d3")] {
        let (status, _) = request_json(
            app.clone(),
            post_json(
                "/students",
                json!({ "name": name, "age": age, "document": document }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    assert_documents(&app, "/students/names?name=A", &["d1", "d2"]).await;
    assert_documents(&app, "/students/names?name=C", &[]).await;
    assert_documents(&app, "/students/ages?age=20", &["d1", "d3"]).await;
    assert_documents(&app, "/students/ages?age=99", &[]).await;

    assert_documents(&app, "/students/filters?name=A", &["d1", "d2"]).await;
    assert_documents(&app, "/students/filters?age=20", &["d1", "d3"]).await;
    assert_documents(&app, "/students/filters?name=A&age=20&document=d1", &["d1"]).await;
    assert_documents(&app, "/students/filters?name=A&age=20&document=d2", &[]).await;
    assert_documents(&app, "/students/filters?name=B&age=20", &["d3"]).await;
    assert_documents(&app, "/students/filters?document=d2", &["d2"]).await;
    assert_documents(&app, "/students/filters", &[]).await;

    let (status, problem) = request_json(app.clone(), get("/students/ages?age=old")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_problem(&problem, 400, "Validation failed");

    let (status, problem) = request_json(app.clone(), get("/students/ages")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_problem(&problem, 400, "Validation failed");

    let (status, problem) = request_json(app, get("/students/names")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_problem(&problem, 400, "Validation failed");
}

async fn assert_documents(app: &Router, uri: &str, expected: &[&str]) {
    let (status, body) = request_json(app.clone(), get(uri)).await;
    assert_eq!(status, StatusCode::OK, "unexpected status for {uri}");

    let documents: Vec<&str> = body
        .as_array()
        .expect("lookup should return an array")
        .iter()
        .filter_map(|student| student.get("document").and_then(Value::as_str))
        .collect();
    assert_eq!(documents, expected, "unexpected students for {uri}");
}

fn assert_problem(problem: &Value, expected_status: u16, expected_title: &str) {
    assert_eq!(
        problem.get("status").and_then(Value::as_u64),
        Some(u64::from(expected_status))
    );
    assert_eq!(
        problem.get("title").and_then(Value::as_str),
        Some(expected_title)
    );
    assert!(problem.get("detail").and_then(Value::as_str).is_some());
    assert!(
        problem
            .get("correlation_id")
            .and_then(Value::as_str)
            .is_some()
    );
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("valid GET request")
}

fn patch(uri: &str) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .body(Body::empty())
        .expect("valid PATCH request")
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .expect("valid DELETE request")
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid POST request")
}

async fn request(app: Router, request: Request<Body>) -> (StatusCode, Bytes) {
    let response = app
        .oneshot(request)
        .await
        .expect("router should serve request");

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();

    (status, body)
}

async fn request_json(app: Router, request_to_send: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = request(app, request_to_send).await;

    if body.is_empty() {
        return (status, Value::Null);
    }

    let value = serde_json::from_slice(&body).expect("body should be valid json");
    (status, value)
}
