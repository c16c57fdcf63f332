use anyhow::Result;
use httpmock::prelude::*;
use practitioner_import::utils::validation::Validate;
use practitioner_import::{CliConfig, ColumnMap, Importer, LocalStorage, SupabaseSink};
use std::path::Path;
use tempfile::TempDir;

const FULL_HEADER: &str =
    "email,title,phone,description,website,street,city,state,postal_code,country,lat,lng,categories,description_2";

fn write_csv(dir: &TempDir, contents: &str) -> Result<String> {
    let path = dir.path().join("export.csv");
    std::fs::write(&path, contents)?;
    Ok(path.to_str().expect("utf-8 temp path").to_string())
}

fn config_for(input: String, server: &MockServer) -> CliConfig {
    CliConfig {
        input,
        supabase_url: Some(server.base_url()),
        service_role_key: Some("service-key".to_string()),
        table: "practitioners".to_string(),
        columns: None,
        verbose: false,
        monitor: false,
    }
}

fn importer_for(
    config: CliConfig,
    columns: ColumnMap,
) -> Result<Importer<LocalStorage, CliConfig, SupabaseSink>> {
    config.validate()?;
    let (supabase_url, service_role_key) = config.credentials()?;

    let storage = LocalStorage::new(".".to_string());
    let sink = SupabaseSink::new(&supabase_url, service_role_key, &config.table);
    Ok(Importer::new(storage, config, sink, columns))
}

#[tokio::test]
async fn test_end_to_end_import_with_mixed_rows() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let csv_path = write_csv(
        &temp_dir,
        &format!(
            "{}\n{}\n{}\n{}\n",
            FULL_HEADER,
            "a@x.com,Jane Doe,,,,,Reno,,,,39.5,-119.8,,",
            ",No Email Guy,,,,,,,,,,,,",
            "b@y.com,Solo,,,,,,,,,notanumber,,,"
        ),
    )?;

    let server = MockServer::start();
    let insert_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/rest/v1/practitioners")
            .header("apikey", "service-key")
            .header("authorization", "Bearer service-key")
            .json_body(serde_json::json!({
                "first_name": "Jane",
                "last_name": "Doe",
                "email": "a@x.com",
                "phone": null,
                "clinic_name": "Jane Doe Practice",
                "website": null,
                "street_address": "Not provided",
                "city": "Reno",
                "state": "",
                "zip_code": "",
                "country": "Unknown",
                "latitude": 39.5,
                "longitude": -119.8,
                "certifications": ["Certified"],
                "bio": null,
                "status": "approved",
                "approved_at": "now()",
                "approved_by": "CSV Import"
            }));
        then.status(201);
    });

    let importer = importer_for(config_for(csv_path, &server), ColumnMap::default())?;
    let report = importer.run().await?;

    // Only the Jane Doe row reaches the datastore: the email-less row is a
    // guarded skip and the bad latitude fails before submission.
    insert_mock.assert();
    assert_eq!(report.imported, 1);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("Solo"));
    assert!(report.errors[0].contains("notanumber"));

    Ok(())
}

#[tokio::test]
async fn test_remote_rejections_do_not_abort_the_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let csv_path = write_csv(
        &temp_dir,
        &format!(
            "{}\n{}\n{}\n",
            FULL_HEADER,
            "a@x.com,Jane Doe,,,,,Reno,,,,,,,",
            "b@y.com,John Roe,,,,,Sparks,,,,,,,"
        ),
    )?;

    let server = MockServer::start();
    let insert_mock = server.mock(|when, then| {
        when.method(POST).path("/rest/v1/practitioners");
        then.status(500).body("internal error");
    });

    let importer = importer_for(config_for(csv_path, &server), ColumnMap::default())?;
    let report = importer.run().await?;

    // Every row was attempted; partial failure is a normal run outcome.
    insert_mock.assert_hits(2);
    assert_eq!(report.imported, 0);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.errors.len(), 2);
    assert!(report.errors[0].contains("Jane Doe"));
    assert!(report.errors[1].contains("John Roe"));

    Ok(())
}

#[tokio::test]
async fn test_rerun_submits_duplicates() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let csv_path = write_csv(
        &temp_dir,
        &format!("{}\n{}\n", FULL_HEADER, "a@x.com,Jane Doe,,,,,Reno,,,,,,,"),
    )?;

    let server = MockServer::start();
    let insert_mock = server.mock(|when, then| {
        when.method(POST).path("/rest/v1/practitioners");
        then.status(201);
    });

    let importer = importer_for(config_for(csv_path, &server), ColumnMap::default())?;
    importer.run().await?;
    importer.run().await?;

    // No dedup key is checked; re-running the import inserts again.
    insert_mock.assert_hits(2);

    Ok(())
}

#[tokio::test]
async fn test_custom_column_mapping_from_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let csv_path = write_csv(
        &temp_dir,
        "contact_email,full_name,town\na@x.com,Jane Doe,Reno\n",
    )?;

    let mapping_path = temp_dir.path().join("columns.toml");
    std::fs::write(
        &mapping_path,
        r#"
[columns]
email = "contact_email"
title = "full_name"
city = "town"
"#,
    )?;
    let columns = ColumnMap::from_file(&mapping_path)?;

    let server = MockServer::start();
    let insert_mock = server.mock(|when, then| {
        when.method(POST).path("/rest/v1/practitioners").json_body_partial(
            r#"{"first_name": "Jane", "last_name": "Doe", "city": "Reno"}"#,
        );
        then.status(201);
    });

    let importer = importer_for(config_for(csv_path, &server), columns)?;
    let report = importer.run().await?;

    insert_mock.assert();
    assert_eq!(report.imported, 1);

    Ok(())
}

#[tokio::test]
async fn test_missing_input_file_is_fatal() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let missing = temp_dir.path().join("nope.csv");
    assert!(!Path::new(&missing).exists());

    let server = MockServer::start();
    let insert_mock = server.mock(|when, then| {
        when.method(POST).path("/rest/v1/practitioners");
        then.status(201);
    });

    let config = config_for(missing.to_str().expect("utf-8 temp path").to_string(), &server);
    let importer = importer_for(config, ColumnMap::default())?;

    let result = importer.run().await;

    // Fatal tier: no rows were processed and no partial report is produced.
    assert!(result.is_err());
    insert_mock.assert_hits(0);

    Ok(())
}
