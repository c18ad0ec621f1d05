pub mod session;
pub mod status;

pub use session::{SavedAgenda, Session};
pub use status::StatusDisplay;
