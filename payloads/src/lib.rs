pub mod api_client;
pub mod config;
pub mod requests;
pub mod responses;

use derive_more::Display;
use serde::{Deserialize, Serialize};

pub use api_client::{APIClient, ClientError, Method, Request, ResponseBody};
pub use config::ClientConfig;
pub use reqwest::StatusCode;

/// Identifier assigned to a student by the backend.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct StudentId(pub i64);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize,
)]
pub enum Sex {
    #[default]
    M,
    F,
}

impl std::str::FromStr for Sex {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Self::M),
            "F" => Ok(Self::F),
            _ => Err(()),
        }
    }
}

/// The writable fields of a student record, as sent on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentPayload {
    pub class: i64,
    pub name: String,
    pub sex: Sex,
    pub age: i64,
    pub siblings: i64,
    pub gpa: f64,
}

/// A stored student record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub uuid: StudentId,
    pub name: String,
    pub class: i64,
    pub sex: Sex,
    pub age: i64,
    pub siblings: i64,
    pub gpa: f64,
}

impl Student {
    pub fn from_payload(uuid: StudentId, payload: StudentPayload) -> Self {
        let StudentPayload {
            class,
            name,
            sex,
            age,
            siblings,
            gpa,
        } = payload;
        Self {
            uuid,
            name,
            class,
            sex,
            age,
            siblings,
            gpa,
        }
    }

    pub fn payload(&self) -> StudentPayload {
        StudentPayload {
            class: self.class,
            name: self.name.clone(),
            sex: self.sex,
            age: self.age,
            siblings: self.siblings,
            gpa: self.gpa,
        }
    }
}
