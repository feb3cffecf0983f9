use serde::{Deserialize, Serialize};

use crate::{Student, StudentId};

/// Body returned by `POST /student`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    pub uuid: StudentId,
}

/// Body returned by `PUT` and `DELETE` on `/student/{uuid}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Success {
    pub success: bool,
}

/// Interpret the body of a single-student lookup.
///
/// The backend answers a lookup for a missing record with a successful
/// response whose body is `null` or `{}`. Both are reported as `None`; the
/// caller decides how to present a missing record.
pub fn student_from_lookup(
    value: serde_json::Value,
) -> Result<Option<Student>, serde_json::Error> {
    match &value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Object(map) if map.is_empty() => Ok(None),
        _ => serde_json::from_value(value).map(Some),
    }
}
