use payloads::{ClientError, Student};
use serde::{Deserialize, Serialize};
use yewdux::{prelude::*, storage};

pub const NOT_FOUND_MESSAGE: &str = "Student not found";

/// The most recent single-student lookup.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentLookup {
    pub recent: Option<Student>,
    /// Never persisted, so a reload cannot resurrect a lookup that will not
    /// finish.
    #[serde(skip)]
    pub loading: bool,
    pub error: Option<String>,
}

impl StudentLookup {
    pub fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn succeed(&mut self, student: Student) {
        self.recent = Some(student);
        self.loading = false;
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.recent = None;
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Apply the outcome of `APIClient::get_student`. An empty payload
    /// counts as a miss.
    pub fn resolve(&mut self, result: Result<Option<Student>, ClientError>) {
        match result {
            Ok(Some(student)) => self.succeed(student),
            Ok(None) => self.fail(NOT_FOUND_MESSAGE),
            Err(e) => self.fail(e.to_string()),
        }
    }
}

/// Application state shared across pages, kept in local storage.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub lookup: StudentLookup,
}

impl Store for State {
    fn new(cx: &yewdux::Context) -> Self {
        init_listener(
            || storage::StorageListener::<Self>::new(storage::Area::Local),
            cx,
        );
        match storage::load(storage::Area::Local) {
            Ok(state) => state.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = ?e, "discarding stored state");
                Self::default()
            }
        }
    }

    fn should_notify(&self, old: &Self) -> bool {
        self != old
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::{Sex, StatusCode, StudentId};

    fn alice() -> Student {
        Student {
            uuid: StudentId(1),
            name: "Alice".into(),
            class: 7,
            sex: Sex::M,
            age: 13,
            siblings: 2,
            gpa: 3.75,
        }
    }

    #[test]
    fn start_keeps_recent_and_clears_error() {
        let mut lookup = StudentLookup {
            recent: Some(alice()),
            loading: false,
            error: Some("old".into()),
        };
        lookup.start();
        assert!(lookup.loading);
        assert_eq!(lookup.error, None);
        assert_eq!(lookup.recent, Some(alice()));
    }

    #[test]
    fn empty_payload_is_not_found_and_clears_recent() {
        let mut lookup = StudentLookup {
            recent: Some(alice()),
            ..Default::default()
        };
        lookup.start();
        lookup.resolve(Ok(None));
        assert_eq!(lookup.recent, None);
        assert!(!lookup.loading);
        assert_eq!(lookup.error.as_deref(), Some("Student not found"));
    }

    #[test]
    fn transport_error_uses_its_message() {
        let mut lookup = StudentLookup::default();
        lookup.start();
        lookup.resolve(Err(ClientError::Http {
            status: StatusCode::BAD_REQUEST,
            status_text: "Bad Request".into(),
            body: "Invalid student id".into(),
        }));
        assert_eq!(
            lookup.error.as_deref(),
            Some("Request failed: 400 Bad Request - Invalid student id")
        );
    }

    #[test]
    fn success_then_clear() {
        let mut lookup = StudentLookup::default();
        lookup.start();
        lookup.resolve(Ok(Some(alice())));
        assert_eq!(lookup.recent, Some(alice()));
        assert_eq!(lookup.error, None);

        lookup.clear();
        assert_eq!(lookup, StudentLookup::default());
    }

    #[test]
    fn loading_is_not_persisted() -> Result<(), serde_json::Error> {
        let mut state = State::default();
        state.lookup.start();
        let restored: State =
            serde_json::from_str(&serde_json::to_string(&state)?)?;
        assert!(!restored.lookup.loading);
        Ok(())
    }
}
