use crate::adapters::http::HttpTransport;
use crate::config::credentials::Credentials;
use crate::config::RunSettings;
use crate::core::address::ResourceAddress;
use crate::core::client::XrpcClient;
use crate::core::merge::{EmptySourcePolicy, ListMerger};
use crate::domain::model::MergeReport;
use crate::domain::ports::Transport;
use crate::utils::error::{MergeError, Result};

/// Import every member of the list at `source_url` into the list at `target_url`.
///
/// Either list missing is fatal. An empty source finishes without writing.
pub async fn import_list_to_target<T: Transport>(
    transport: T,
    credentials: &Credentials,
    source_url: &str,
    target_url: &str,
) -> Result<MergeReport> {
    let source = ResourceAddress::from_list_url(source_url)?;
    let target = ResourceAddress::from_list_url(target_url)?;

    let mut client = XrpcClient::new(transport);
    client
        .login(&credentials.handle, &credentials.app_password)
        .await?;

    let source_list = client
        .resolve_list_uri(&source.handle, &source.id)
        .await?
        .require(|| MergeError::ListNotFound {
            list_id: source.id.clone(),
            handle: source.handle.clone(),
        })?;
    let target_list = client
        .resolve_list_uri(&target.handle, &target.id)
        .await?
        .require(|| MergeError::ListNotFound {
            list_id: target.id.clone(),
            handle: target.handle.clone(),
        })?;

    ListMerger::new(&client)
        .with_empty_source(EmptySourcePolicy::Allow)
        .merge(&source_list, &target_list)
        .await
}

/// [`import_list_to_target`] against the configured service.
pub async fn run_import(
    settings: &RunSettings,
    source_url: &str,
    target_url: &str,
) -> Result<MergeReport> {
    let transport = HttpTransport::new(&settings.service)?;
    import_list_to_target(transport, &settings.credentials, source_url, target_url).await
}
