pub mod cli;
pub mod columns;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "practitioner-import")]
#[command(about = "Import practitioner listings from a directory CSV export into Supabase")]
pub struct CliConfig {
    #[arg(long, default_value = "stores-data-export.csv")]
    pub input: String,

    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: Option<String>,

    #[arg(long, env = "SUPABASE_SERVICE_ROLE_KEY", hide_env_values = true)]
    pub service_role_key: Option<String>,

    #[arg(long, default_value = "practitioners")]
    pub table: String,

    #[arg(long, help = "TOML file overriding source column names")]
    pub columns: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

impl CliConfig {
    /// Datastore credentials, from the flags or the SUPABASE_URL /
    /// SUPABASE_SERVICE_ROLE_KEY environment variables.
    pub fn credentials(&self) -> Result<(String, String)> {
        let supabase_url =
            validation::validate_required_field("supabase_url", &self.supabase_url)?;
        let service_role_key =
            validation::validate_required_field("service_role_key", &self.service_role_key)?;
        Ok((supabase_url.clone(), service_role_key.clone()))
    }
}

impl ConfigProvider for CliConfig {
    fn input_file(&self) -> &str {
        &self.input
    }

    fn table_name(&self) -> &str {
        &self.table
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let (supabase_url, service_role_key) = self.credentials()?;
        validation::validate_url("supabase_url", &supabase_url)?;
        validation::validate_non_empty_string("service_role_key", &service_role_key)?;

        validation::validate_path("input", &self.input)?;
        validation::validate_file_extension("input", &self.input, "csv")?;

        validation::validate_non_empty_string("table", &self.table)?;

        if let Some(columns) = &self.columns {
            validation::validate_path("columns", columns)?;
            validation::validate_file_extension("columns", columns, "toml")?;
        }

        Ok(())
    }
}
