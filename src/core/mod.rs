pub mod importer;
pub mod supabase;
pub mod transform;

pub use crate::domain::model::{ImportReport, Practitioner, RowOutcome, SkipReason, SourceRow};
pub use crate::domain::ports::{ConfigProvider, RecordSink, Storage};
pub use crate::utils::error::Result;
