//! Application use cases (business logic orchestration).

mod download_report;
mod edit_catalog;
mod load_analytics;
mod load_catalog;
mod sections;

pub use download_report::*;
pub use edit_catalog::*;
pub use load_analytics::*;
pub use load_catalog::*;
pub use sections::SectionFailure;
