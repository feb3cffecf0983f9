//! Mock student roster for development and tests.
//!
//! The dev-server loads this roster so the browser app has something to show,
//! and integration tests use it when they need a populated table.

use crate::{TestApp, alice_payload, bob_payload};
use anyhow::Result;
use payloads::{Sex, Student, StudentPayload};

pub struct DevDataset {
    pub students: Vec<Student>,
}

fn roster() -> Vec<StudentPayload> {
    let mut roster = vec![alice_payload(), bob_payload()];
    roster.extend(
        [
            ("Charlie", 5, Sex::M, 11, 1, 3.2),
            ("Dana", 10, Sex::F, 16, 3, 3.9),
            ("Erin", 1, Sex::F, 7, 0, 4.0),
        ]
        .into_iter()
        .map(|(name, class, sex, age, siblings, gpa)| StudentPayload {
            class,
            name: name.into(),
            sex,
            age,
            siblings,
            gpa,
        }),
    );
    roster
}

impl DevDataset {
    /// Create every student in the roster through the API.
    pub async fn create(app: &TestApp) -> Result<Self> {
        tracing::info!("👩‍🎓 Creating student roster");
        let mut students = Vec::new();
        for details in roster() {
            let uuid = app.seed_student(&details).await?;
            students.push(Student::from_payload(uuid, details));
        }
        Ok(Self { students })
    }

    pub fn print_summary(&self) {
        tracing::info!("📋 Available test data:");
        for student in &self.students {
            tracing::info!(
                "   {} ({}): class {}, gpa {}",
                student.name,
                student.uuid,
                student.class,
                student.gpa
            );
        }
    }
}
