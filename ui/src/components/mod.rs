pub mod confirmation_modal;
pub mod layout;
pub mod loader;
pub mod modal;
pub mod student_form;
pub mod table;
pub mod toast;

pub use confirmation_modal::ConfirmationModal;
pub use loader::Loader;
pub use modal::Modal;
pub use student_form::{FormMode, StudentForm};
pub use table::{Align, Column, Table};
