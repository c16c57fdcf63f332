use serde::{Deserialize, Serialize};

/// Row status stamped on every imported record.
pub const STATUS_APPROVED: &str = "approved";
/// Audit marker for records created by this tool.
pub const APPROVED_BY: &str = "CSV Import";
/// Server-side time marker; the datastore evaluates it on insert.
pub const APPROVED_AT_SERVER_TIME: &str = "now()";

/// How many error lines the final summary surfaces.
pub const MAX_SURFACED_ERRORS: usize = 10;

/// One row of the directory export. A cell that is absent from the header,
/// absent from the row, or empty after trimming is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRow {
    pub email: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub categories: Option<String>,
    pub description_2: Option<String>,
}

impl SourceRow {
    /// Name used for this row in error messages.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown")
    }
}

/// The normalized record submitted to the datastore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Practitioner {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub clinic_name: String,
    pub website: Option<String>,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub certifications: Vec<String>,
    pub bio: Option<String>,
    pub status: String,
    pub approved_at: String,
    pub approved_by: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingEmail,
}

/// Per-row transform result. Guarded skips carry no error message; transform
/// failures are reported through `Err` and recorded by the importer.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Record(Practitioner),
    Skipped(SkipReason),
}

/// Counters and error messages accumulated over one import pass.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

impl ImportReport {
    pub fn record_imported(&mut self) {
        self.imported += 1;
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    /// A failed row counts as skipped and keeps its error message.
    pub fn record_failure(&mut self, title: &str, message: impl std::fmt::Display) -> String {
        self.skipped += 1;
        let error_msg = format!("Error importing {}: {}", title, message);
        self.errors.push(error_msg.clone());
        error_msg
    }

    /// All errors are retained; only the first few are printed.
    pub fn surfaced_errors(&self) -> &[String] {
        let cutoff = self.errors.len().min(MAX_SURFACED_ERRORS);
        &self.errors[..cutoff]
    }
}
