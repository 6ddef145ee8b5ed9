//! Shared test utilities for accreditor-server integration tests

use std::net::SocketAddr;
use std::sync::Arc;

use accreditor_core::CriteriaTemplate;
use accreditor_server::{AccreditorServer, AppState, ServerConfig, create_router};
use axum_test::TestServer;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Template with one "must" and one "should" criterion
pub const TEMPLATE_JSON: &str = r#"[
    {
        "title": "Criterion 1. Students",
        "type": "must",
        "subCriteria": [
            {"text": "Admission", "questions": ["Q1", "Q2", "Q3", "Q4"]},
            {"text": "Advising", "questions": ["Q1", "Q2"]}
        ]
    },
    {
        "title": "Criterion 4. Continuous Improvement",
        "type": "should",
        "subCriteria": [
            {"text": "Assessment", "questions": ["Q1", "Q2", "Q3", "Q4"]}
        ]
    }
]"#;

pub fn template() -> CriteriaTemplate {
    CriteriaTemplate::from_json(TEMPLATE_JSON).unwrap()
}

/// In-process test server over an in-memory database
#[allow(dead_code)]
pub fn test_server() -> (Arc<AppState>, TestServer) {
    let state = Arc::new(AppState::in_memory(template()).unwrap());
    let server = TestServer::new(create_router(Arc::clone(&state))).unwrap();
    (state, server)
}

/// A server bound to a real socket, stopped through `shutdown`
#[allow(dead_code)]
pub struct RunningServer {
    pub addr: SocketAddr,
    pub shutdown: oneshot::Sender<()>,
    pub handle: JoinHandle<Result<(), accreditor_server::ServerError>>,
}

/// Spawns server in background task on an ephemeral port
#[allow(dead_code)]
pub async fn spawn_server(state: AppState) -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown, rx) = oneshot::channel::<()>();

    let server = AccreditorServer::new(ServerConfig::new("127.0.0.1", addr.port()), state);
    let handle = tokio::spawn(async move {
        server
            .run_until(listener, async {
                let _ = rx.await;
            })
            .await
    });

    RunningServer {
        addr,
        shutdown,
        handle,
    }
}
