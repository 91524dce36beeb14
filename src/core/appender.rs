use crate::core::client::XrpcClient;
use crate::domain::model::{
    CreateRecordRequest, CreateRecordResponse, ListItemRecord, ListItemView, ListRef,
    LIST_ITEM_COLLECTION,
};
use crate::domain::ports::{Transport, XrpcRequest};
use crate::utils::error::Result;
use chrono::{SecondsFormat, Utc};

pub const CREATE_RECORD: &str = "com.atproto.repo.createRecord";

impl<T: Transport> XrpcClient<T> {
    /// Add each subject in `items` to `target`, one `createRecord` call per item.
    ///
    /// Calls are sequential and the first failure aborts the rest. Subjects already
    /// in `target` are added again.
    pub async fn add_to_target_list(
        &self,
        target: &ListRef,
        items: &[ListItemView],
    ) -> Result<usize> {
        let repo = self.account_did()?.to_string();

        for (index, item) in items.iter().enumerate() {
            let request = CreateRecordRequest {
                collection: LIST_ITEM_COLLECTION,
                repo: repo.clone(),
                record: ListItemRecord {
                    record_type: LIST_ITEM_COLLECTION,
                    created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
                    subject: item.subject.did.clone(),
                    list: target.clone(),
                },
            };

            let body = serde_json::to_value(&request)?;
            let created: CreateRecordResponse =
                self.request(XrpcRequest::post(CREATE_RECORD, body)).await?;
            tracing::debug!(
                "[{}/{}] added {} as {}",
                index + 1,
                items.len(),
                item.subject.did,
                created.uri.as_deref().unwrap_or("<no uri>")
            );
        }

        tracing::info!("📤 Added {} items to {}", items.len(), target);
        Ok(items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::testing::{logged_in, RecordingTransport};
    use crate::domain::model::ProfileView;
    use crate::utils::error::MergeError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn items(dids: &[&str]) -> Vec<ListItemView> {
        dids.iter()
            .map(|did| ListItemView {
                uri: None,
                subject: ProfileView {
                    did: did.to_string(),
                    handle: None,
                },
            })
            .collect()
    }

    #[tokio::test]
    async fn test_one_create_record_per_item() {
        let transport = RecordingTransport::new(|_| Ok(json!({ "uri": "at://r", "cid": "c" })));
        let client = logged_in(&transport);
        let target = ListRef::new("at://did:plc:bob/app.bsky.graph.list/xyz789");
        let source = items(&["did:plc:111", "did:plc:222", "did:plc:111"]);

        let added = client.add_to_target_list(&target, &source).await.unwrap();

        assert_eq!(added, 3);
        let calls = transport.calls_to(CREATE_RECORD);
        assert_eq!(calls.len(), 3);
        for (call, item) in calls.iter().zip(&source) {
            let body = call.body.as_ref().unwrap();
            assert_eq!(body["collection"], "app.bsky.graph.listitem");
            assert_eq!(body["repo"], "did:plc:me");
            assert_eq!(body["record"]["$type"], "app.bsky.graph.listitem");
            assert_eq!(body["record"]["subject"], item.subject.did.as_str());
            assert_eq!(body["record"]["list"], target.as_str());
            assert!(body["record"]["createdAt"].as_str().unwrap().ends_with('Z'));
        }
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let transport = RecordingTransport::new(move |_| {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            if n == 2 {
                Err(MergeError::Http {
                    endpoint: CREATE_RECORD.to_string(),
                    status: 500,
                    body: "boom".to_string(),
                })
            } else {
                Ok(json!({}))
            }
        });
        let client = logged_in(&transport);
        let target = ListRef::new("at://did:plc:bob/app.bsky.graph.list/xyz789");

        let err = client
            .add_to_target_list(&target, &items(&["did:plc:1", "did:plc:2", "did:plc:3", "did:plc:4"]))
            .await
            .unwrap_err();

        assert!(matches!(err, MergeError::Http { status: 500, .. }));
        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].body.as_ref().unwrap()["record"]["subject"], "did:plc:2");
    }

    #[tokio::test]
    async fn test_empty_items_makes_no_calls() {
        let transport = RecordingTransport::new(|_| Ok(json!({})));
        let client = logged_in(&transport);

        let added = client
            .add_to_target_list(&ListRef::new("at://x/app.bsky.graph.list/y"), &[])
            .await
            .unwrap();

        assert_eq!(added, 0);
        assert!(transport.calls().is_empty());
    }
}
