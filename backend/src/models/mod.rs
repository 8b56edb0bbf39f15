pub mod course;
pub mod enrollment;
pub mod grade;
pub mod macros;
pub mod student;
pub mod validation;

pub use course::*;
pub use enrollment::*;
pub use grade::*;
pub use student::*;
pub use validation::{non_blank, InvalidFields};
