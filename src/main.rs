use clap::Parser;
use practitioner_import::utils::{logger, validation::Validate};
use practitioner_import::{CliConfig, ColumnMap, Importer, LocalStorage, SupabaseSink};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting practitioner-import CLI");
    if config.verbose {
        tracing::debug!("Input: {}, target table: {}", config.input, config.table);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 載入欄位對應（未指定時使用匯出檔的預設欄位名）
    let columns = match &config.columns {
        Some(path) => match ColumnMap::from_file(path) {
            Ok(columns) => columns,
            Err(e) => {
                tracing::error!("❌ Column mapping load failed: {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        },
        None => ColumnMap::default(),
    };

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // validate() 已確認憑證存在，這裡只是把 Option 拆開
    let (supabase_url, service_role_key) = match config.credentials() {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // 建立存儲、資料匯入端與匯入引擎
    let storage = LocalStorage::new(".".to_string());
    let sink = SupabaseSink::new(&supabase_url, service_role_key, &config.table);
    let importer = Importer::new_with_monitoring(storage, config, sink, columns, monitor_enabled);

    match importer.run().await {
        Ok(report) => {
            tracing::info!("✅ Import process completed!");
            if !report.errors.is_empty() {
                tracing::warn!("⚠️ {} rows failed during the run", report.errors.len());
            }
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Import process failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                practitioner_import::utils::error::ErrorSeverity::Low => 0,
                practitioner_import::utils::error::ErrorSeverity::Medium => 2,
                practitioner_import::utils::error::ErrorSeverity::High => 1,
                practitioner_import::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
