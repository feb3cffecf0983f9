pub mod mock;
pub mod server;
pub mod store;
pub mod telemetry;

use actix_web::web;
use payloads::{
    APIClient, ClientConfig, ClientError, Sex, StatusCode, StudentId,
    StudentPayload,
};

pub use server::{AppState, RecordedRequest, ServerConfig};

pub struct TestApp {
    pub ip: String,
    pub port: u16,
    pub client: APIClient,
    pub state: web::Data<AppState>,
}

impl TestApp {
    pub fn address(&self) -> String {
        format!("http://{}:{}", self.ip, self.port)
    }

    /// Every request the server has received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn clear_requests(&self) {
        if let Ok(mut requests) = self.state.requests.lock() {
            requests.clear();
        }
    }

    /// Insert a student directly through the API and return its id.
    pub async fn seed_student(
        &self,
        details: &StudentPayload,
    ) -> anyhow::Result<StudentId> {
        Ok(self.client.create_student(details).await?.uuid)
    }
}

/// Start the in-memory API on `config` without touching logging setup.
pub async fn spawn_app_with(mut config: ServerConfig) -> TestApp {
    let state = web::Data::new(AppState::default());
    let server = server::build(&mut config, state.clone()).unwrap();
    tokio::spawn(server);

    let address = format!("http://{}:{}", config.ip, config.port);
    TestApp {
        ip: config.ip,
        port: config.port,
        client: APIClient::new(&ClientConfig::new(Some(&address))),
        state,
    }
}

pub async fn spawn_app_on_port(port: u16) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    telemetry::try_init_subscriber(subscriber);
    spawn_app_with(ServerConfig {
        ip: "127.0.0.1".into(),
        port,
    })
    .await
}

/// Use OS-assigned port for parallel testing.
pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0).await
}

pub fn assert_status_code<T: std::fmt::Debug>(
    result: Result<T, ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(ClientError::Http { status, .. }) => assert_eq!(status, expected),
        other => panic!("Expected an HTTP error, got {other:?}"),
    };
}

pub fn alice_payload() -> StudentPayload {
    StudentPayload {
        class: 7,
        name: "Alice".into(),
        sex: Sex::M,
        age: 13,
        siblings: 2,
        gpa: 3.75,
    }
}

pub fn bob_payload() -> StudentPayload {
    StudentPayload {
        class: 9,
        name: "Bob".into(),
        sex: Sex::M,
        age: 15,
        siblings: 0,
        gpa: 2.9,
    }
}
