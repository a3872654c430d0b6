//! # trial-ingest
//!
//! Turns an uploaded JSON document into a stored, normalized trial record.
//!
//! - [`upload::check_upload`]: size and extension checks before reading
//! - [`IngestionPipeline`]: validate, parse, duplicate-check, normalize,
//!   persist, publish
//! - [`normalize::normalize`]: date and duration business rules
//! - [`TrialStore`]: the persistence gateway, implemented for
//!   `trial_db::UnitOfWork`
//! - [`EventSink`]: `TrialCreated` delivery ([`TracingSink`], [`JsonlSink`])

pub mod error;
pub mod normalize;
pub mod outcome;
pub mod pipeline;
pub mod sink;
pub mod store;
pub mod upload;

pub use error::{IngestError, SinkError, UploadError};
pub use outcome::Outcome;
pub use pipeline::IngestionPipeline;
pub use sink::{EventSink, JsonlSink, TracingSink};
pub use store::TrialStore;
