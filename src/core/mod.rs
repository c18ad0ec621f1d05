pub mod advice;
pub mod request;

pub use crate::domain::model::{AdviceAnswer, AgendaEntry, Settings, StageInfo, StageMode};
pub use crate::domain::ports::{Clock, KeyValueStore, LlmProvider};
pub use crate::utils::error::Result;
