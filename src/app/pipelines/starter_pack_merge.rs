use crate::config::credentials::Credentials;
use crate::core::address::ResourceAddress;
use crate::core::client::XrpcClient;
use crate::core::merge::{EmptySourcePolicy, ListMerger};
use crate::domain::model::MergeReport;
use crate::domain::ports::Transport;
use crate::utils::error::{MergeError, Result};

/// Add every member of the source starter pack's list to the target pack's list.
///
/// Both packs are looked up before either absence is reported. An empty source is
/// an error here, unlike the list import.
pub async fn merge_starter_packs<T: Transport>(
    transport: T,
    credentials: &Credentials,
    target_pack_url: &str,
    source_pack_url: &str,
) -> Result<MergeReport> {
    let target = ResourceAddress::from_starter_pack_url(target_pack_url)?;
    let source = ResourceAddress::from_starter_pack_url(source_pack_url)?;

    let mut client = XrpcClient::new(transport);
    client
        .login(&credentials.handle, &credentials.app_password)
        .await?;

    let target_list = client
        .resolve_starter_pack_list(&target.handle, &target.id)
        .await?
        .found();
    let source_list = client
        .resolve_starter_pack_list(&source.handle, &source.id)
        .await?
        .found();

    let (target_list, source_list) = match (target_list, source_list) {
        (Some(target_list), Some(source_list)) => (target_list, source_list),
        (None, _) => return Err(not_found(&target)),
        (_, None) => return Err(not_found(&source)),
    };

    ListMerger::new(&client)
        .with_empty_source(EmptySourcePolicy::Reject)
        .merge(&source_list, &target_list)
        .await
}

fn not_found(address: &ResourceAddress) -> MergeError {
    MergeError::StarterPackNotFound {
        pack_id: address.id.clone(),
        handle: address.handle.clone(),
    }
}
