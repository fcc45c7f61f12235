use crate::domain::model::RunBounds;
use crate::domain::table::ColumnSchema;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
    fn remove_file(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Text-in, text-out access to the external classification service.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str, temperature: f64) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn model(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn request_timeout_secs(&self) -> u64;
    fn run_bounds(&self) -> RunBounds;
    fn call_delay(&self) -> Duration;
    fn show_progress(&self) -> bool;
    fn columns(&self) -> ColumnSchema;
    fn monitoring_enabled(&self) -> bool;
}
