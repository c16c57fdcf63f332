use crate::domain::model::Practitioner;
use crate::domain::ports::RecordSink;
use crate::utils::error::{ImportError, Result};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;

/// PostgREST insert client for one Supabase table. Requests carry the service
/// role key, which bypasses row level security on the target table.
pub struct SupabaseSink {
    client: Client,
    endpoint: String,
    service_role_key: String,
}

impl SupabaseSink {
    pub fn new(base_url: &str, service_role_key: String, table: &str) -> Self {
        let endpoint = format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table);

        Self {
            client: Client::new(),
            endpoint,
            service_role_key,
        }
    }

    // PostgREST wraps rejections in a JSON document; surface its message field
    // when present, otherwise the raw body.
    fn rejection_body(body: String) -> String {
        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value) => value
                .get("message")
                .and_then(|message| message.as_str())
                .map(|message| message.to_string())
                .unwrap_or(body),
            Err(_) => body,
        }
    }
}

#[async_trait]
impl RecordSink for SupabaseSink {
    async fn insert(&self, practitioner: &Practitioner) -> Result<()> {
        tracing::debug!("POST {} ({})", self.endpoint, practitioner.email);

        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.service_role_key)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.service_role_key),
            )
            .header("Prefer", "return=minimal")
            .json(practitioner)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImportError::InsertRejectedError {
                status,
                body: Self::rejection_body(body),
            });
        }

        Ok(())
    }
}
