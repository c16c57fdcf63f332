use crate::domain::model::Practitioner;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_file(&self) -> &str;
    fn table_name(&self) -> &str;
}

/// Insert-one-record port of the remote datastore. The importer takes the sink
/// explicitly so tests can substitute a fake client.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn insert(&self, practitioner: &Practitioner) -> Result<()>;
}
