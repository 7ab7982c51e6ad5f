use crate::utils::error::Result;

/// Read-only access to a blob store.
pub trait Storage: Send + Sync {
    fn read_blob(
        &self,
        container: &str,
        blob: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}
