use crate::core::client::XrpcClient;
use crate::domain::model::{ListRef, MergeReport};
use crate::domain::ports::Transport;
use crate::utils::error::{MergeError, Result};

/// What to do when the source list has no members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptySourcePolicy {
    /// Finish without writing anything.
    #[default]
    Allow,
    /// Fail with [`MergeError::EmptySource`].
    Reject,
}

/// Runs the read phase, then the write phase, against an authenticated client.
pub struct ListMerger<'a, T: Transport> {
    client: &'a XrpcClient<T>,
    empty_source: EmptySourcePolicy,
}

impl<'a, T: Transport> ListMerger<'a, T> {
    pub fn new(client: &'a XrpcClient<T>) -> Self {
        Self {
            client,
            empty_source: EmptySourcePolicy::default(),
        }
    }

    pub fn with_empty_source(mut self, policy: EmptySourcePolicy) -> Self {
        self.empty_source = policy;
        self
    }

    pub async fn merge(&self, source: &ListRef, target: &ListRef) -> Result<MergeReport> {
        tracing::info!("🚀 Merging {} into {}", source, target);

        let items = self.client.get_list_items(source).await?;
        if items.is_empty() {
            match self.empty_source {
                EmptySourcePolicy::Reject => return Err(MergeError::EmptySource),
                EmptySourcePolicy::Allow => tracing::warn!("Source list {} is empty", source),
            }
        }

        let appended = self.client.add_to_target_list(target, &items).await?;

        Ok(MergeReport {
            source: source.clone(),
            target: target.clone(),
            fetched: items.len(),
            appended,
        })
    }
}
