pub mod find_student;
pub mod not_found;
pub mod students;

pub use find_student::FindStudentPage;
pub use not_found::NotFoundPage;
pub use students::StudentsPage;
