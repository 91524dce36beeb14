use crate::core::client::XrpcClient;
use crate::domain::model::{
    record_key, GetActorStarterPacksResponse, GetListsResponse, GetStarterPackResponse, ListRef,
    Resolution,
};
use crate::domain::ports::{Transport, XrpcRequest};
use crate::utils::error::Result;

pub const GET_LISTS: &str = "app.bsky.graph.getLists";
pub const GET_ACTOR_STARTER_PACKS: &str = "app.bsky.graph.getActorStarterPacks";
pub const GET_STARTER_PACK: &str = "app.bsky.graph.getStarterPack";

/// Lists are looked up on the first page only.
pub const LIST_LOOKUP_LIMIT: u32 = 100;

impl<T: Transport> XrpcClient<T> {
    /// Find the AT-URI of `handle`'s list whose record key is `list_id`.
    pub async fn resolve_list_uri(&self, handle: &str, list_id: &str) -> Result<Resolution> {
        let request = XrpcRequest::get(GET_LISTS)
            .query("actor", handle)
            .query("limit", LIST_LOOKUP_LIMIT);
        let response: GetListsResponse = self.request(request).await?;

        let found = response
            .lists
            .into_iter()
            .find(|list| record_key(&list.uri) == list_id);

        Ok(match found {
            Some(list) => {
                tracing::debug!("Resolved list {} of {} to {}", list_id, handle, list.uri);
                Resolution::Found(ListRef::new(list.uri))
            }
            None => {
                tracing::warn!("List {} not found for {}", list_id, handle);
                Resolution::NotFound
            }
        })
    }

    /// Find the list embedded in `handle`'s starter pack `pack_id`.
    ///
    /// A missing pack, or a pack without a list, is `NotFound` rather than an error.
    pub async fn resolve_starter_pack_list(
        &self,
        handle: &str,
        pack_id: &str,
    ) -> Result<Resolution> {
        let request = XrpcRequest::get(GET_ACTOR_STARTER_PACKS).query("actor", handle);
        let response: GetActorStarterPacksResponse = self.request(request).await?;

        let Some(pack) = response
            .starter_packs
            .into_iter()
            .find(|pack| record_key(&pack.uri) == pack_id)
        else {
            tracing::warn!("Starter pack {} not found for {}", pack_id, handle);
            return Ok(Resolution::NotFound);
        };

        let request = XrpcRequest::get(GET_STARTER_PACK).query("starterPack", &pack.uri);
        let details: GetStarterPackResponse = self.request(request).await?;

        Ok(match details.starter_pack.list {
            Some(list) => {
                tracing::debug!("Starter pack {} carries list {}", pack.uri, list.uri);
                Resolution::Found(ListRef::new(list.uri))
            }
            None => {
                tracing::warn!("Starter pack {} has no list", pack.uri);
                Resolution::NotFound
            }
        })
    }
}
