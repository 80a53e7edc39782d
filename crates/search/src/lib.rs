pub mod batch;
pub mod builder;
pub mod catalog;
pub mod jurisdiction;
pub mod session;

pub use batch::{parse_batch_line, read_batch, BatchLineError};
pub use builder::{build_category, build_contact_search, contact_dork, substitute, TemplateFields};
pub use catalog::{Category, PlatformTemplate};
pub use jurisdiction::Jurisdiction;
pub use session::SessionResults;

/// Session key for the Google contact-page dork.
pub const CONTACT_SEARCH_KEY: &str = "contact_search";
/// Session key for a medical board lookup.
pub const MEDICAL_BOARD_KEY: &str = "medical_board_lookup";
