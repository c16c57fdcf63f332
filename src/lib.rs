pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, columns::ColumnMap, CliConfig};
pub use core::{importer::Importer, supabase::SupabaseSink};
pub use domain::model::{ImportReport, Practitioner};
pub use utils::error::{ImportError, Result};
