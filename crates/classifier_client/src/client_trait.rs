use async_trait::async_trait;
use portal_core::ClassificationOutcome;

/// Maps a query onto a ministry.
///
/// Implementations never fail: transport problems are reported as
/// `ClassificationOutcome::Failed` so the conversation can keep going.
#[async_trait]
pub trait ClassifierClient: Send + Sync {
    async fn classify(&self, query: &str) -> ClassificationOutcome;
}
