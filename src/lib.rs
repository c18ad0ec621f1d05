pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FileStore, GeminiProvider, MemoryStore};
pub use app::{Session, StatusDisplay};
pub use config::AppConfig;
pub use crate::core::advice::{AdviceService, Outcome, RequestState};
pub use domain::model::{
    AdviceAnswer, AgendaEntry, ChecklistItem, ModelId, Profile, Settings, StageInfo, StageMode,
    ThemeId,
};
pub use domain::stage::compute_stage;
pub use utils::error::{BabyGidsError, Result};
