use payloads::{Student, StudentId, StudentPayload};
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Student name already exists")]
    DuplicateName,
}

/// In-memory student table. Names are unique and identifiers are assigned
/// in increasing order starting at 1, never reused.
#[derive(Debug, Default)]
pub struct StudentStore {
    students: BTreeMap<StudentId, Student>,
    last_id: i64,
}

impl StudentStore {
    pub fn list(&self) -> Vec<Student> {
        self.students.values().cloned().collect()
    }

    pub fn get(&self, uuid: StudentId) -> Option<&Student> {
        self.students.get(&uuid)
    }

    pub fn create(
        &mut self,
        payload: StudentPayload,
    ) -> Result<StudentId, StoreError> {
        self.check_name(&payload.name, None)?;
        self.last_id += 1;
        let uuid = StudentId(self.last_id);
        self.students
            .insert(uuid, Student::from_payload(uuid, payload));
        Ok(uuid)
    }

    /// Returns whether a record was updated.
    pub fn update(
        &mut self,
        uuid: StudentId,
        payload: StudentPayload,
    ) -> Result<bool, StoreError> {
        if !self.students.contains_key(&uuid) {
            return Ok(false);
        }
        self.check_name(&payload.name, Some(uuid))?;
        self.students
            .insert(uuid, Student::from_payload(uuid, payload));
        Ok(true)
    }

    /// Returns whether a record was deleted.
    pub fn delete(&mut self, uuid: StudentId) -> bool {
        self.students.remove(&uuid).is_some()
    }

    fn check_name(
        &self,
        name: &str,
        except: Option<StudentId>,
    ) -> Result<(), StoreError> {
        let taken = self
            .students
            .values()
            .any(|s| s.name == name && Some(s.uuid) != except);
        if taken {
            Err(StoreError::DuplicateName)
        } else {
            Ok(())
        }
    }
}
