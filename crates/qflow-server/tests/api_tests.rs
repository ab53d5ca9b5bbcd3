//! Integration tests for the QuantumFlow API.

use std::sync::Arc;

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use qflow_hal::BackendRegistry;
use qflow_server::{AllowedOrigins, AppState, ServiceConfig, create_router};
use serde_json::{Value, json};

// ============================================================================
// Test helpers
// ============================================================================

fn test_server_with(state: AppState) -> TestServer {
    let router = create_router(Arc::new(state));
    TestServer::new(router).expect("test server")
}

fn test_server() -> TestServer {
    test_server_with(AppState::new(ServiceConfig::default()))
}

fn bell_gates() -> Value {
    json!([
        {"type": "h", "qubit": 0, "position": 0},
        {"type": "cnot", "qubit": 0, "targets": [1], "position": 1}
    ])
}

// ============================================================================
// Health endpoint
// ============================================================================

#[tokio::test]
async fn test_health_returns_ok() {
    let server = test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["qiskit"], true);
    assert_eq!(body["backend_env"], "aer_simulator");
    assert!(body["version"].as_str().is_some());
}

#[tokio::test]
async fn test_health_without_engine() {
    let state = AppState::with_registry(ServiceConfig::default(), BackendRegistry::new());
    let server = test_server_with(state);

    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["qiskit"], false);
}

// ============================================================================
// Execute endpoint
// ============================================================================

#[tokio::test]
async fn test_execute_bell_circuit() {
    let server = test_server();
    let response = server
        .post("/api/v1/execute")
        .json(&json!({"num_qubits": 2, "gates": bell_gates(), "shots": 500}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["backend"], "aer_simulator");
    assert_eq!(body["shots"], 500);
    assert!(body["memory"].is_null());

    let counts = body["counts"].as_object().unwrap();
    assert!(counts.keys().all(|k| k == "00" || k == "11"));
    let total: u64 = counts.values().map(|v| v.as_u64().unwrap()).sum();
    assert_eq!(total, 500);

    let probabilities = body["probabilities"].as_object().unwrap();
    for (key, p) in probabilities {
        let expected = counts[key].as_u64().unwrap() as f64 / 500.0;
        assert!((p.as_f64().unwrap() - expected).abs() < 1e-12);
    }
}

#[tokio::test]
async fn test_execute_bitstring_order() {
    let server = test_server();
    let response = server
        .post("/api/v1/execute")
        .json(&json!({"num_qubits": 2, "gates": [{"type": "x", "qubit": 0}], "shots": 16}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["counts"], json!({"01": 16}));
    assert_eq!(body["probabilities"], json!({"01": 1.0}));
}

#[tokio::test]
async fn test_execute_with_memory_and_seed() {
    let server = test_server();
    let payload = json!({
        "num_qubits": 3,
        "gates": [
            {"type": "h", "qubit": 0},
            {"type": "h", "qubit": 1},
            {"type": "ry", "qubit": 2, "params": {"theta": 45}}
        ],
        "shots": 64,
        "memory": true,
        "seed": 1234
    });

    let first: Value = server.post("/api/v1/execute").json(&payload).await.json();
    let second: Value = server.post("/api/v1/execute").json(&payload).await.json();

    let memory = first["memory"].as_array().unwrap();
    assert_eq!(memory.len(), 64);
    assert!(memory.iter().all(|m| m.as_str().unwrap().len() == 3));
    assert_eq!(first["counts"], second["counts"]);
    assert_eq!(first["memory"], second["memory"]);
}

#[tokio::test]
async fn test_execute_backend_override_and_fallback() {
    let server = test_server();

    let response = server
        .post("/api/v1/execute")
        .json(&json!({"num_qubits": 1, "gates": [], "backend": "qasm_simulator", "shots": 10}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["backend"], "qasm_simulator");
    assert_eq!(body["counts"], json!({"0": 10}));

    // unknown names fall back to the legacy simulator and are echoed back
    let response = server
        .post("/api/v1/execute")
        .json(&json!({"num_qubits": 1, "gates": [], "backend": "fake_manila", "shots": 10}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["backend"], "fake_manila");
}

#[tokio::test]
async fn test_execute_backend_unavailable() {
    let state = AppState::with_registry(ServiceConfig::default(), BackendRegistry::new());
    let server = test_server_with(state);

    let response = server
        .post("/api/v1/execute")
        .json(&json!({"num_qubits": 1, "gates": []}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"], "backend_unavailable");
    assert!(body["detail"].as_str().unwrap().contains("aer_simulator"));
}

#[tokio::test]
async fn test_execute_invalid_gate_returns_400() {
    let server = test_server();
    let response = server
        .post("/api/v1/execute")
        .json(&json!({"num_qubits": 2, "gates": [{"type": "cnot", "qubit": 0}]}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"], "invalid_gate_spec");
    assert!(body["detail"].as_str().unwrap().contains("cnot"));
}

#[tokio::test]
async fn test_execute_invalid_angle_returns_400() {
    let server = test_server();
    let response = server
        .post("/api/v1/execute")
        .json(&json!({
            "num_qubits": 1,
            "gates": [{"type": "rx", "qubit": 0, "params": {"theta": "not-a-number"}}]
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"], "invalid_angle");
    assert_eq!(body["detail"], "Invalid angle value: not-a-number");
}

#[tokio::test]
async fn test_execute_too_many_qubits_returns_400() {
    let server = test_server();
    let response = server
        .post("/api/v1/execute")
        .json(&json!({"num_qubits": 30, "gates": []}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"], "execution_failed");
}

#[tokio::test]
async fn test_execute_huge_register_rejected_quickly() {
    let server = test_server();

    for num_qubits in [1_000_000_u64, u64::from(u32::MAX)] {
        let started = std::time::Instant::now();
        let response = server
            .post("/api/v1/execute")
            .json(&json!({
                "num_qubits": num_qubits,
                "gates": [{"type": "h", "qubit": 0}],
                "shots": 1
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["error"], "execution_failed");
        assert!(body["detail"].as_str().unwrap().contains("at most 20"));
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }
}

#[tokio::test]
async fn test_request_validation_returns_422() {
    let server = test_server();

    for payload in [
        json!({"num_qubits": 0, "gates": []}),
        json!({"num_qubits": -1, "gates": []}),
        json!({"num_qubits": 1, "gates": [], "shots": 0}),
        json!({"num_qubits": 1, "gates": [], "shots": 1_000_001}),
        json!({"num_qubits": 1}),
        json!({"num_qubits": 1, "gates": [{"qubit": 0}]}),
    ] {
        let response = server.post("/api/v1/execute").json(&payload).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["error"], "validation_error", "{payload}");
    }
}

// ============================================================================
// Evolution endpoint
// ============================================================================

#[tokio::test]
async fn test_evolution_single_hadamard() {
    let server = test_server();
    let response = server
        .post("/api/v1/execute-evolution")
        .json(&json!({"num_qubits": 1, "gates": [{"type": "h", "qubit": 0, "position": 0}]}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(
        body["intermediateStates"],
        json!([
            ["1.00000+0.00000j", "0.00000+0.00000j"],
            ["0.70711+0.00000j", "0.70711+0.00000j"]
        ])
    );
}

#[tokio::test]
async fn test_evolution_bell_columns() {
    let server = test_server();
    let response = server
        .post("/api/v1/execute-evolution")
        .json(&json!({"num_qubits": 2, "gates": bell_gates()}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let states = body["intermediateStates"].as_array().unwrap();
    assert_eq!(states.len(), 3);
    assert_eq!(
        states[2],
        json!([
            "0.70711+0.00000j",
            "0.00000+0.00000j",
            "0.00000+0.00000j",
            "0.70711+0.00000j"
        ])
    );
}

#[tokio::test]
async fn test_evolution_skips_bad_gates() {
    let server = test_server();
    let response = server
        .post("/api/v1/execute-evolution")
        .json(&json!({
            "num_qubits": 1,
            "gates": [
                {"type": "x", "qubit": 0},
                {"type": "toffoli", "controls": [0]},
                {"type": "teleport", "qubit": 0}
            ]
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(
        body["intermediateStates"][1],
        json!(["0.00000+0.00000j", "1.00000+0.00000j"])
    );
}

#[tokio::test]
async fn test_evolution_is_deterministic() {
    let server = test_server();
    let payload = json!({
        "num_qubits": 2,
        "gates": [
            {"type": "rx", "qubit": 0, "params": {"theta": 0.4}, "position": 0},
            {"type": "cz", "controls": [0], "targets": [1], "position": 3},
            {"type": "p", "qubit": 1, "params": {"lambda": "270"}, "position": 9}
        ]
    });

    let first: Value = server.post("/api/v1/execute-evolution").json(&payload).await.json();
    let second: Value = server.post("/api/v1/execute-evolution").json(&payload).await.json();
    assert_eq!(first, second);
    assert_eq!(first["intermediateStates"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_evolution_too_many_qubits_returns_400() {
    let server = test_server();
    let response = server
        .post("/api/v1/execute-evolution")
        .json(&json!({"num_qubits": 40, "gates": []}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"], "snapshot_failed");
}

// ============================================================================
// Backends endpoint
// ============================================================================

#[tokio::test]
async fn test_list_backends() {
    let server = test_server();
    let response = server.get("/api/v1/backends").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let backends = body.as_array().unwrap();
    let names: Vec<_> = backends.iter().map(|b| b["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec!["aer_simulator", "qasm_simulator", "statevector_simulator"]
    );
    assert_eq!(backends[0]["preferred"], true);
    assert_eq!(backends[0]["is_simulator"], true);
    assert_eq!(backends[0]["num_qubits"], 20);
    assert_eq!(backends[1]["preferred"], false);
}

// ============================================================================
// CORS
// ============================================================================

#[tokio::test]
async fn test_cors_any_origin() {
    let server = test_server();
    let response = server
        .get("/health")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://example.com"))
        .await;
    response.assert_status_ok();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&HeaderValue::from_static("*"))
    );
}

#[tokio::test]
async fn test_cors_origin_list() {
    let config = ServiceConfig {
        allowed_origins: AllowedOrigins::List(vec!["http://localhost:3000".into()]),
        ..ServiceConfig::default()
    };
    let server = test_server_with(AppState::new(config));

    let allowed = server
        .get("/health")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:3000"))
        .await;
    assert_eq!(
        allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&HeaderValue::from_static("http://localhost:3000"))
    );
    assert_eq!(
        allowed.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
        Some(&HeaderValue::from_static("true"))
    );

    let denied = server
        .get("/health")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://evil.test"))
        .await;
    assert!(
        denied
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
