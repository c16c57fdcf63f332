use crate::config::columns::ColumnMap;
use crate::core::transform::transform_row;
use crate::core::{ConfigProvider, ImportReport, RecordSink, RowOutcome, SourceRow, Storage};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use csv::StringRecord;

/// Positions of the configured source columns within one export's header,
/// resolved once per run.
#[derive(Debug, Clone, Default)]
pub struct ColumnIndex {
    email: Option<usize>,
    title: Option<usize>,
    phone: Option<usize>,
    description: Option<usize>,
    website: Option<usize>,
    street: Option<usize>,
    city: Option<usize>,
    state: Option<usize>,
    postal_code: Option<usize>,
    country: Option<usize>,
    lat: Option<usize>,
    lng: Option<usize>,
    categories: Option<usize>,
    description_2: Option<usize>,
}

impl ColumnIndex {
    pub fn resolve(headers: &StringRecord, columns: &ColumnMap) -> Self {
        let find = |name: &str| headers.iter().position(|header| header == name);

        Self {
            email: find(&columns.email),
            title: find(&columns.title),
            phone: find(&columns.phone),
            description: find(&columns.description),
            website: find(&columns.website),
            street: find(&columns.street),
            city: find(&columns.city),
            state: find(&columns.state),
            postal_code: find(&columns.postal_code),
            country: find(&columns.country),
            lat: find(&columns.lat),
            lng: find(&columns.lng),
            categories: find(&columns.categories),
            description_2: find(&columns.description_2),
        }
    }

    // Ragged rows are tolerated: a cell beyond the row's length reads as
    // absent, like a blank one.
    fn cell(record: &StringRecord, idx: Option<usize>) -> Option<String> {
        let raw = record.get(idx?)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    pub fn source_row(&self, record: &StringRecord) -> SourceRow {
        SourceRow {
            email: Self::cell(record, self.email),
            title: Self::cell(record, self.title),
            phone: Self::cell(record, self.phone),
            description: Self::cell(record, self.description),
            website: Self::cell(record, self.website),
            street: Self::cell(record, self.street),
            city: Self::cell(record, self.city),
            state: Self::cell(record, self.state),
            postal_code: Self::cell(record, self.postal_code),
            country: Self::cell(record, self.country),
            lat: Self::cell(record, self.lat),
            lng: Self::cell(record, self.lng),
            categories: Self::cell(record, self.categories),
            description_2: Self::cell(record, self.description_2),
        }
    }
}

pub struct Importer<S: Storage, C: ConfigProvider, K: RecordSink> {
    storage: S,
    config: C,
    sink: K,
    columns: ColumnMap,
    monitor: SystemMonitor,
}

impl<S: Storage, C: ConfigProvider, K: RecordSink> Importer<S, C, K> {
    pub fn new(storage: S, config: C, sink: K, columns: ColumnMap) -> Self {
        Self {
            storage,
            config,
            sink,
            columns,
            monitor: SystemMonitor::default(),
        }
    }

    pub fn new_with_monitoring(
        storage: S,
        config: C,
        sink: K,
        columns: ColumnMap,
        monitor_enabled: bool,
    ) -> Self {
        Self {
            storage,
            config,
            sink,
            columns,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<ImportReport> {
        println!("Starting practitioner import from CSV...");
        println!("{}", "=".repeat(60));
        tracing::info!(
            "🚀 Import run started at {}",
            chrono::Utc::now().to_rfc3339()
        );

        let raw = self.storage.read_file(self.config.input_file()).await?;
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(raw.as_slice());

        let headers = reader.headers()?.clone();
        let index = ColumnIndex::resolve(&headers, &self.columns);
        tracing::debug!("Resolved {} header columns", headers.len());

        if self.monitor.is_enabled() {
            self.monitor.log_stats("Extract");
        }

        let mut report = ImportReport::default();

        // 逐行處理：一行完整處理（轉換並送出）後才讀下一行
        for record in reader.records() {
            let record = record?;
            let row = index.source_row(&record);

            match transform_row(&row) {
                Ok(RowOutcome::Record(practitioner)) => {
                    match self.sink.insert(&practitioner).await {
                        Ok(()) => {
                            report.record_imported();
                            println!(
                                "✓ Imported: {} {} ({})",
                                practitioner.first_name, practitioner.last_name, practitioner.city
                            );
                        }
                        Err(e) => {
                            let error_msg = report.record_failure(row.display_title(), &e);
                            println!("✗ {}", error_msg);
                        }
                    }
                }
                Ok(RowOutcome::Skipped(reason)) => {
                    tracing::debug!("Skipping {}: {:?}", row.display_title(), reason);
                    report.record_skip();
                }
                Err(e) => {
                    let error_msg = report.record_failure(row.display_title(), &e);
                    println!("✗ {}", error_msg);
                }
            }
        }

        self.print_summary(&report);
        self.monitor.log_final_stats();

        Ok(report)
    }

    fn print_summary(&self, report: &ImportReport) {
        println!("\n{}", "=".repeat(60));
        println!("Import Complete!");
        println!("Successfully imported: {}", report.imported);
        println!("Skipped: {}", report.skipped);
        println!("{}", "=".repeat(60));

        if !report.errors.is_empty() {
            println!("\nErrors encountered:");
            for error in report.surfaced_errors() {
                println!("  - {}", error);
            }
        }

        tracing::info!(
            "✅ Imported {} records into {} ({} skipped)",
            report.imported,
            self.config.table_name(),
            report.skipped
        );
    }
}
