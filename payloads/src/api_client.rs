use crate::{ClientConfig, Student, StudentId, StudentPayload, responses};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

const JSON_MIME: &str = "application/json";

/// An API client for interfacing with the backend.
#[derive(Debug, Clone)]
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display)]
pub enum Method {
    #[default]
    #[display("GET")]
    Get,
    #[display("POST")]
    Post,
    #[display("PUT")]
    Put,
    #[display("DELETE")]
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Everything needed to issue one call against the backend.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Request {
    pub path: String,
    pub method: Method,
    pub body: Option<serde_json::Value>,
    /// Extra headers, applied over the defaults.
    pub headers: Vec<(String, String)>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn json(mut self, body: &impl Serialize) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A parsed successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseBody {
    /// Decode into the desired type. A text body decodes as a JSON string.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ClientError> {
        let value = match self {
            Self::Json(value) => value,
            Self::Text(text) => serde_json::Value::String(text),
        };
        Ok(serde_json::from_value(value)?)
    }
}

/// Helper methods for http actions
impl APIClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            address: config.base_url.clone(),
            inner_client: reqwest::Client::new(),
        }
    }

    fn format_url(&self, path: &str) -> String {
        let address = self.address.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{address}{path}")
        } else {
            format!("{address}/{path}")
        }
    }

    /// Perform one call and classify the response.
    ///
    /// Non-2xx statuses become [`ClientError::Http`]; the body is parsed as
    /// JSON only when the response says it is JSON.
    pub async fn execute(
        &self,
        request: &Request,
    ) -> Result<ResponseBody, ClientError> {
        let headers = merge_headers(request.body.is_some(), &request.headers)?;
        let mut builder = self
            .inner_client
            .request(request.method.into(), self.format_url(&request.path))
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_string(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                status,
                status_text: status_text(&response),
                body: response.text().await.unwrap_or_default(),
            });
        }

        if is_json(response.headers()) {
            let bytes = response.bytes().await?;
            Ok(ResponseBody::Json(serde_json::from_slice(&bytes)?))
        } else {
            Ok(ResponseBody::Text(response.text().await?))
        }
    }

    async fn execute_as<T: DeserializeOwned>(
        &self,
        request: &Request,
    ) -> Result<T, ClientError> {
        self.execute(request).await?.decode()
    }
}

/// Methods on the backend API
impl APIClient {
    pub async fn health_check(&self) -> Result<String, ClientError> {
        self.execute_as(&Request::get("/health_check")).await
    }

    pub async fn list_students(&self) -> Result<Vec<Student>, ClientError> {
        self.execute_as(&Request::get("/students")).await
    }

    /// Look up one student by the identifier as typed by the user.
    ///
    /// Returns `Ok(None)` when the backend answers with an empty payload.
    pub async fn get_student(
        &self,
        uuid: &str,
    ) -> Result<Option<Student>, ClientError> {
        let value: serde_json::Value =
            self.execute_as(&Request::get(format!("/student/{uuid}"))).await?;
        Ok(responses::student_from_lookup(value)?)
    }

    pub async fn create_student(
        &self,
        details: &StudentPayload,
    ) -> Result<responses::Created, ClientError> {
        let request = Request::post("/student").json(details)?;
        self.execute_as(&request).await
    }

    pub async fn update_student(
        &self,
        uuid: StudentId,
        details: &StudentPayload,
    ) -> Result<responses::Success, ClientError> {
        let request = Request::put(format!("/student/{uuid}")).json(details)?;
        self.execute_as(&request).await
    }

    pub async fn delete_student(
        &self,
        uuid: StudentId,
    ) -> Result<responses::Success, ClientError> {
        self.execute_as(&Request::delete(format!("/student/{uuid}")))
            .await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A non-2xx response, with whatever body text could be read.
    #[error(
        "Request failed: {}{}{}",
        .status.as_u16(),
        suffix(" ", .status_text),
        suffix(" - ", .body)
    )]
    Http {
        status: StatusCode,
        status_text: String,
        body: String,
    },
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(e) => e.status(),
            _ => None,
        }
    }
}

fn suffix(separator: &str, text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!("{separator}{text}")
    }
}

/// The reason phrase the server sent, falling back to the canonical one.
/// Browsers do not expose it to reqwest, so wasm builds always fall back.
fn status_text(response: &reqwest::Response) -> String {
    #[cfg(not(target_arch = "wasm32"))]
    let sent = response
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned());
    #[cfg(target_arch = "wasm32")]
    let sent: Option<String> = None;

    sent.unwrap_or_else(|| {
        response.status().canonical_reason().unwrap_or_default().to_string()
    })
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains(JSON_MIME))
}

/// Build the outgoing header set: `Accept` always, `Content-Type` only with a
/// body, then caller headers replacing any default of the same name.
pub fn merge_headers(
    has_body: bool,
    extra: &[(String, String)],
) -> Result<HeaderMap, ClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(JSON_MIME));
    if has_body {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MIME));
    }
    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ClientError::InvalidHeader(name.clone()))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| ClientError::InvalidHeader(name.to_string()))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(address: &str) -> APIClient {
        APIClient {
            address: address.into(),
            inner_client: reqwest::Client::new(),
        }
    }

    #[test]
    fn accept_is_always_set() {
        let headers = merge_headers(false, &[]).unwrap();
        assert_eq!(headers[ACCEPT], JSON_MIME);
        assert!(headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn content_type_only_with_body() {
        let headers = merge_headers(true, &[]).unwrap();
        assert_eq!(headers[CONTENT_TYPE], JSON_MIME);
    }

    #[test]
    fn caller_headers_win() {
        let extra = vec![
            ("accept".to_string(), "text/plain".to_string()),
            ("X-Trace".to_string(), "abc".to_string()),
        ];
        let headers = merge_headers(true, &extra).unwrap();
        assert_eq!(headers.get_all(ACCEPT).iter().count(), 1);
        assert_eq!(headers[ACCEPT], "text/plain");
        assert_eq!(headers["x-trace"], "abc");
        assert_eq!(headers[CONTENT_TYPE], JSON_MIME);
    }

    #[test]
    fn bad_header_name_is_rejected() {
        let extra = vec![("bad header".to_string(), "x".to_string())];
        assert!(matches!(
            merge_headers(false, &extra),
            Err(ClientError::InvalidHeader(name)) if name == "bad header"
        ));
    }

    #[test]
    fn urls_are_joined_with_one_slash() {
        let api = client("http://localhost:5001/");
        assert_eq!(api.format_url("/students"), "http://localhost:5001/students");
        assert_eq!(api.format_url("students"), "http://localhost:5001/students");
    }

    #[test]
    fn http_error_message_includes_body_when_present() {
        let err = ClientError::Http {
            status: StatusCode::NOT_FOUND,
            status_text: "Not Found".into(),
            body: String::new(),
        };
        assert_eq!(err.to_string(), "Request failed: 404 Not Found");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));

        let err = ClientError::Http {
            status: StatusCode::CONFLICT,
            status_text: "Conflict".into(),
            body: "name taken".into(),
        };
        assert_eq!(err.to_string(), "Request failed: 409 Conflict - name taken");
    }

    #[test]
    fn http_error_message_without_reason_phrase() {
        let err = ClientError::Http {
            status: StatusCode::from_u16(499).unwrap(),
            status_text: String::new(),
            body: "gone".into(),
        };
        assert_eq!(err.to_string(), "Request failed: 499 - gone");
    }

    #[test]
    fn text_bodies_decode_as_strings() {
        let body = ResponseBody::Text("healthy".into());
        assert_eq!(body.decode::<String>().unwrap(), "healthy");

        let body = ResponseBody::Text("healthy".into());
        assert!(matches!(
            body.decode::<Vec<Student>>(),
            Err(ClientError::Json(_))
        ));
    }

    #[test]
    fn request_builder_serializes_body() {
        let request = Request::put("/student/1")
            .json(&responses::Success { success: true })
            .unwrap()
            .header("X-Trace", "1");
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.body, Some(serde_json::json!({ "success": true })));
        assert_eq!(request.headers.len(), 1);
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }
}
