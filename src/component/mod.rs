//! 功能元件模組

pub mod thumbnail_extractor;

pub use thumbnail_extractor::BatchOrchestrator;
