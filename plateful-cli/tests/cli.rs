use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use serde_json::Value;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::process::Command;

const FOOD: &str = r#"{
    "id": 1,
    "name": "Ao molho",
    "description": "Macarrão ao molho branco, fughi e cheiro verde das montanhas",
    "price": 19.9,
    "category": 1,
    "image_url": "https://example.test/ao_molho.png",
    "thumbnail_url": "https://example.test/food1.png",
    "extras": [
        { "id": 1, "name": "Bacon", "value": 1.5 },
        { "id": 2, "name": "Frango", "value": 2 }
    ]
}"#;

type Received = Arc<Mutex<Vec<(String, Value)>>>;

/// Food whose orders the kitchen refuses.
const CLOSED_FOOD_ID: u64 = 2;

/// Minimal API: serves foods 1 and 2 and records every accepted POST body
/// by path. Orders for food 2 are answered with a 500.
async fn handle(req: Request<Body>, received: Received) -> Result<Response<Body>, Infallible> {
    let path = req.uri().path().to_string();
    let response = match (req.method(), path.as_str()) {
        (&Method::GET, "/foods/1") => Response::new(Body::from(FOOD)),
        (&Method::GET, "/foods/2") => {
            Response::new(Body::from(FOOD.replacen("\"id\": 1", "\"id\": 2", 1)))
        }
        (&Method::POST, "/orders" | "/favorites") => {
            let bytes = hyper::body::to_bytes(req.into_body())
                .await
                .unwrap_or_default();
            let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            if path == "/orders" && body["food_id"] == CLOSED_FOOD_ID {
                let mut response = Response::new(Body::from("kitchen closed"));
                *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                return Ok(response);
            }
            received.lock().unwrap().push((path, body));
            let mut response = Response::new(Body::from(bytes));
            *response.status_mut() = StatusCode::CREATED;
            response
        }
        _ => {
            let mut response = Response::new(Body::from("Not Found"));
            *response.status_mut() = StatusCode::NOT_FOUND;
            response
        }
    };
    Ok(response)
}

fn spawn_api() -> (SocketAddr, Received) {
    let received = Received::default();
    let shared = Arc::clone(&received);
    let make = make_service_fn(move |_| {
        let shared = Arc::clone(&shared);
        async move {
            Ok::<_, Infallible>(service_fn(move |req| handle(req, Arc::clone(&shared))))
        }
    });
    let server = Server::bind(&([127, 0, 0, 1], 0).into()).serve(make);
    let addr = server.local_addr();
    tokio::spawn(server);
    (addr, received)
}

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "plateful-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn plateful(addr: SocketAddr) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_plateful"));
    cmd.arg("--api-url")
        .arg(format!("http://{addr}"))
        .env_remove("RUST_LOG");
    cmd
}

fn read_json(path: &std::path::Path) -> Value {
    let content = std::fs::read_to_string(path).expect("read output");
    serde_json::from_str(&content).expect("parse report")
}

#[tokio::test]
async fn cli_show_writes_json_report() {
    let (addr, received) = spawn_api();
    let output_path = temp_path("show");
    let status = plateful(addr)
        .args(["show", "1", "--report", "json", "--output"])
        .arg(&output_path)
        .status()
        .await
        .expect("run cli");
    assert!(status.success());

    let report = read_json(&output_path);
    assert_eq!(report["command"], "show");
    assert_eq!(report["food"]["name"], "Ao molho");
    assert_eq!(report["food"]["formattedPrice"], "R$ 19,90");
    assert_eq!(report["quantity"], 1);
    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn cli_order_posts_composed_payload() {
    let (addr, received) = spawn_api();
    let output_path = temp_path("order");
    let status = plateful(addr)
        .args([
            "order", "1", "--extra", "1=2", "--quantity", "2", "--report", "json", "--output",
        ])
        .arg(&output_path)
        .status()
        .await
        .expect("run cli");
    assert!(status.success());

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    let (path, body) = &received[0];
    assert_eq!(path, "/orders");
    assert_eq!(body["food_id"], 1);
    assert_eq!(body["quantity"], 2);
    assert_eq!(body["extras"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["extras"][0]["quantity"], 2);
    assert_eq!(body["extras"][1]["quantity"], 0);
    let total = body["total"].as_f64().unwrap_or_default();
    assert!((total - 45.8).abs() < 1e-9);

    let report = read_json(&output_path);
    assert_eq!(report["submitted"], true);
    assert_eq!(report["formatted_total"], "R$ 45,80");
}

#[tokio::test]
async fn cli_dry_run_does_not_post() {
    let (addr, received) = spawn_api();
    let output_path = temp_path("dry-run");
    let status = plateful(addr)
        .args(["order", "1", "--extra", "2=1", "--dry-run", "--output"])
        .arg(&output_path)
        .status()
        .await
        .expect("run cli");
    assert!(status.success());
    assert!(received.lock().unwrap().is_empty());

    let content = std::fs::read_to_string(&output_path).expect("read output");
    assert!(content.contains("dry run"));
    assert!(content.contains("R$ 21,90"));
}

#[tokio::test]
async fn cli_favorite_posts_record() {
    let (addr, received) = spawn_api();
    let output = plateful(addr)
        .args(["favorite", "1", "--report", "json"])
        .output()
        .await
        .expect("run cli");
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).expect("parse report");
    assert_eq!(report["favorite"], true);
    assert_eq!(report["favorite_status"], "confirmed");

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].0, "/favorites");
    assert_eq!(received[0].1["name"], "Ao molho");
}

#[tokio::test]
async fn cli_reads_api_url_from_env() {
    let (addr, _) = spawn_api();
    let output = Command::new(env!("CARGO_BIN_EXE_plateful"))
        .args(["show", "1", "--report", "json"])
        .env("PLATEFUL_API_URL", format!("http://{addr}"))
        .output()
        .await
        .expect("run cli");
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).expect("parse report");
    assert_eq!(report["api_url"], format!("http://{addr}"));
}

#[tokio::test]
async fn cli_fails_for_unknown_food() {
    let (addr, received) = spawn_api();
    let output = plateful(addr)
        .args(["order", "404"])
        .output()
        .await
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("could not open food 404"));
    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn cli_fails_when_order_is_rejected() {
    let (addr, received) = spawn_api();
    let output_path = temp_path("rejected");
    let output = plateful(addr)
        .args(["order", "2", "--extra", "1=1", "--report", "json", "--output"])
        .arg(&output_path)
        .output()
        .await
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("order not placed"));
    assert!(stderr.contains("API error (500): kitchen closed"));
    assert!(received.lock().unwrap().is_empty());
    // No report means the screen was never left.
    assert!(!output_path.exists());
}

#[tokio::test]
async fn cli_rejects_invalid_config() {
    let (addr, _) = spawn_api();
    let config_path = temp_path("config");
    std::fs::write(&config_path, r#"{"max_food_quantity": 0}"#).expect("write config");
    let output = plateful(addr)
        .args(["show", "1", "--config"])
        .arg(&config_path)
        .output()
        .await
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load config"));
}
