use actix_cors::Cors;
use actix_web::{
    App, HttpRequest, HttpResponse, HttpServer, ResponseError,
    body::BoxBody, delete, dev::Server, get, post, put, web,
};
use payloads::{StudentId, StudentPayload, responses};
use serde_json::Value;
use std::{net::TcpListener, sync::Mutex};

use crate::store::{StoreError, StudentStore};

pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

/// A request as the server saw it, kept so tests can assert on what the
/// client actually put on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Default)]
pub struct AppState {
    pub store: Mutex<StudentStore>,
    pub requests: Mutex<Vec<RecordedRequest>>,
}

impl AppState {
    fn record(&self, req: &HttpRequest, body: &web::Bytes) {
        let headers = req
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = if body.is_empty() {
            None
        } else {
            Some(serde_json::from_slice(body).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(body).into_owned())
            }))
        };
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                method: req.method().to_string(),
                path: req.path().to_string(),
                headers,
                body,
            });
        }
    }

    fn store(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, StudentStore>, APIError> {
        self.store.lock().map_err(|_| APIError::Poisoned)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum APIError {
    #[error("Invalid student id")]
    InvalidId,
    #[error("Invalid request body: {0}")]
    BadRequest(#[from] serde_json::Error),
    #[error(transparent)]
    Conflict(#[from] StoreError),
    #[error("Something went wrong")]
    Poisoned,
}

impl ResponseError for APIError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::InvalidId | Self::BadRequest(_) => {
                HttpResponse::BadRequest().body(self.to_string())
            }
            Self::Conflict(_) => {
                HttpResponse::Conflict().body(self.to_string())
            }
            Self::Poisoned => {
                HttpResponse::InternalServerError().body(self.to_string())
            }
        }
    }
}

fn parse_id(raw: &str) -> Result<StudentId, APIError> {
    raw.parse().map(StudentId).map_err(|_| APIError::InvalidId)
}

fn parse_payload(body: &web::Bytes) -> Result<StudentPayload, APIError> {
    Ok(serde_json::from_slice(body)?)
}

#[get("/health_check")]
pub async fn health_check(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> HttpResponse {
    state.record(&req, &body);
    HttpResponse::Ok().content_type("text/plain").body("healthy")
}

#[tracing::instrument(skip_all)]
#[get("/students")]
pub async fn list_students(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, APIError> {
    state.record(&req, &body);
    let students = state.store()?.list();
    Ok(HttpResponse::Ok().json(students))
}

/// Unknown ids answer with an empty object rather than a 404, which is what
/// the lookup page is built to interpret.
#[tracing::instrument(skip(req, body, state))]
#[get("/student/{uuid}")]
pub async fn get_student(
    req: HttpRequest,
    body: web::Bytes,
    uuid: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, APIError> {
    state.record(&req, &body);
    let uuid = parse_id(&uuid)?;
    let store = state.store()?;
    Ok(match store.get(uuid) {
        Some(student) => HttpResponse::Ok().json(student),
        None => HttpResponse::Ok().json(serde_json::json!({})),
    })
}

#[tracing::instrument(skip_all)]
#[post("/student")]
pub async fn create_student(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, APIError> {
    state.record(&req, &body);
    let payload = parse_payload(&body)?;
    let uuid = state.store()?.create(payload)?;
    tracing::info!(%uuid, "created student");
    Ok(HttpResponse::Ok().json(responses::Created { uuid }))
}

#[tracing::instrument(skip(req, body, state))]
#[put("/student/{uuid}")]
pub async fn update_student(
    req: HttpRequest,
    body: web::Bytes,
    uuid: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, APIError> {
    state.record(&req, &body);
    let uuid = parse_id(&uuid)?;
    let payload = parse_payload(&body)?;
    let success = state.store()?.update(uuid, payload)?;
    Ok(HttpResponse::Ok().json(responses::Success { success }))
}

#[tracing::instrument(skip(req, body, state))]
#[delete("/student/{uuid}")]
pub async fn delete_student(
    req: HttpRequest,
    body: web::Bytes,
    uuid: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, APIError> {
    state.record(&req, &body);
    let uuid = parse_id(&uuid)?;
    let success = state.store()?.delete(uuid);
    Ok(HttpResponse::Ok().json(responses::Success { success }))
}

/// Bind the listener and build the server. The chosen port is written back
/// into `config`, so port 0 can be used to let the OS pick one.
pub fn build(
    config: &mut ServerConfig,
    state: web::Data<AppState>,
) -> std::io::Result<Server> {
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();
        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(health_check)
            .service(list_students)
            .service(get_student)
            .service(create_student)
            .service(update_student)
            .service(delete_student)
    })
    .listen(listener)?
    .run();
    Ok(server)
}
