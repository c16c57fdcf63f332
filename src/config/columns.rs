use crate::utils::error::{ImportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Source column names for the directory export. The upstream export schema
/// has shifted before (it carries two loosely-named description columns), so
/// the names are configuration with the current export as the default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub email: String,
    pub title: String,
    pub phone: String,
    pub description: String,
    pub website: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub lat: String,
    pub lng: String,
    pub categories: String,
    pub description_2: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            email: "email".to_string(),
            title: "title".to_string(),
            phone: "phone".to_string(),
            description: "description".to_string(),
            website: "website".to_string(),
            street: "street".to_string(),
            city: "city".to_string(),
            state: "state".to_string(),
            postal_code: "postal_code".to_string(),
            country: "country".to_string(),
            lat: "lat".to_string(),
            lng: "lng".to_string(),
            categories: "categories".to_string(),
            description_2: "description_2".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MappingFile {
    #[serde(default)]
    columns: HashMap<String, String>,
}

impl ColumnMap {
    /// 從 TOML 檔案載入欄位對應
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ImportError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析欄位對應
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        let file: MappingFile =
            toml::from_str(&processed_content).map_err(|e| ImportError::MappingError {
                message: format!("TOML parsing error: {}", e),
            })?;

        let mut map = Self::default();
        for (key, value) in file.columns {
            map.set(&key, value)?;
        }
        Ok(map)
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ImportError::MappingError {
                message: format!("column {} cannot map to an empty name", key),
            });
        }

        let slot = match key {
            "email" => &mut self.email,
            "title" => &mut self.title,
            "phone" => &mut self.phone,
            "description" => &mut self.description,
            "website" => &mut self.website,
            "street" => &mut self.street,
            "city" => &mut self.city,
            "state" => &mut self.state,
            "postal_code" => &mut self.postal_code,
            "country" => &mut self.country,
            "lat" => &mut self.lat,
            "lng" => &mut self.lng,
            "categories" => &mut self.categories,
            "description_2" => &mut self.description_2,
            unknown => {
                return Err(ImportError::MappingError {
                    message: format!("unknown column key: {}", unknown),
                })
            }
        };
        *slot = value;
        Ok(())
    }

    /// 替換環境變數 (例如 ${EMAIL_COLUMN})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}
