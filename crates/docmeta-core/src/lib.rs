//! DocMeta Core — error type, configuration, tool capabilities, metadata record.

pub mod capabilities;
pub mod config;
pub mod error;
pub mod metadata;

pub use capabilities::ToolCapabilities;
pub use config::{DocMetaConfig, HeuristicParams, OcrSettings, SummarizerSettings};
pub use error::{Error, Result};
pub use metadata::{FileType, MetadataRecord};
