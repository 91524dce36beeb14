use crate::core::client::XrpcClient;
use crate::domain::model::{GetListResponse, ListItemView, ListRef};
use crate::domain::ports::{Transport, XrpcRequest};
use crate::utils::error::Result;

pub const GET_LIST: &str = "app.bsky.graph.getList";
pub const PAGE_LIMIT: u32 = 100;

impl<T: Transport> XrpcClient<T> {
    /// Fetch every member of `list`, following the cursor until the server stops
    /// returning one. Items keep server order.
    ///
    /// The first call carries no cursor; an absent or empty cursor ends the loop.
    /// There is no page cap, so a server that always returns a cursor never ends.
    pub async fn get_list_items(&self, list: &ListRef) -> Result<Vec<ListItemView>> {
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let mut request = XrpcRequest::get(GET_LIST)
                .query("list", list)
                .query("limit", PAGE_LIMIT);
            if let Some(cursor) = &cursor {
                request = request.query("cursor", cursor);
            }

            let page: GetListResponse = self.request(request).await?;
            pages += 1;
            tracing::debug!("Page {} of {}: {} items", pages, list, page.items.len());

            cursor = page.next_cursor().map(str::to_owned);
            items.extend(page.items);

            if cursor.is_none() {
                break;
            }
        }

        tracing::info!("📥 Fetched {} items from {} in {} pages", items.len(), list, pages);
        Ok(items)
    }
}
