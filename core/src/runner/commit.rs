use async_trait::async_trait;

/// The host's "commit staged changes" action.
#[async_trait]
pub trait CommitAction: Send + Sync {
    async fn commit(&self) -> anyhow::Result<()>;
}
