//! Heuristic metadata stages.
//!
//! Each stage takes the extracted text and produces one field of the
//! metadata record. Stages are independent of each other and never fail:
//! a missing model capability or a failed call degrades to a local
//! fallback value.

pub mod entities;
pub mod keywords;
pub mod language;
pub mod stopwords;
pub mod summary;
pub mod title;

pub use entities::extract_entities;
pub use keywords::extract_keywords;
pub use language::detect_language;
pub use summary::{fallback_summary, summarize};
pub use title::extract_title;
