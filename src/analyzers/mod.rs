//! Report section analyzers.
//!
//! Every analyzer reads a [`Page`](crate::Page) and reduces one aspect of it
//! to a serializable section. Analyzers never fail and never depend on each
//! other's output; absent page features map to the section's `Default`.

pub mod content;
pub mod general;
pub mod headings;
pub mod hreflang;
pub mod images;
pub mod keywords;
pub mod links;
pub mod performance;
pub mod schema;

pub use content::{ContentReport, VisualContent};
pub use general::{GeneralReport, UrlStructure};
pub use headings::{HeadingEntry, HeadingReport, PhraseCount, WordRelevance};
pub use hreflang::{HreflangEntry, HreflangReport};
pub use images::{ImageEntry, ImageReport, LoadState};
pub use keywords::{KeywordEntry, KeywordReport};
pub use links::{LinkEntry, LinkReport, LinkStatus};
pub use performance::{PerformanceReport, PerformanceTimings, SlowResource};
pub use schema::SchemaReport;
