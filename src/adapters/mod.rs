// Adapters layer: concrete implementations for external systems (LLM over HTTP, storage).

pub mod gemini;
pub mod storage;

pub use gemini::GeminiProvider;
pub use storage::{FileStore, MemoryStore};
