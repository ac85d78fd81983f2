//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::HangarClient;
use crate::error::Result;
use crate::pagination::{ListOptions, Page};

/// Page size used by [`List::list_all`].
pub const LIST_ALL_PAGE_SIZE: u32 = 25;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// List/filter entities with limit/offset pagination.
///
/// Implement this trait for entity types that can be listed with
/// optional filtering and pagination.
///
/// # Example
///
/// ```ignore
/// use hangarapi::{HangarClient, ListOptions, Project, List};
///
/// let client = HangarClient::new(Default::default())?;
///
/// // Fetch a single page
/// let page = Project::list_page(&client, &Default::default(), ListOptions::new(10, 0)).await?;
///
/// // Fetch all pages
/// let all_projects = Project::list_all(&client, &Default::default()).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Query parameters for filtering.
    type Query: Default + Send + Sync;

    /// List entities matching the query (single page).
    ///
    /// # Arguments
    ///
    /// * `client` - The Hangar API client
    /// * `query` - Query parameters for filtering
    /// * `opts` - Limit and offset; a zero limit uses the API default of 25
    ///
    /// # Errors
    ///
    /// Returns an error if the query is invalid or the request fails.
    async fn list_page(
        client: &HangarClient,
        query: &Self::Query,
        opts: ListOptions,
    ) -> Result<Page<Self>>;

    /// List all entities matching the query (fetches all pages).
    ///
    /// Walks the offset forward until the server's total count is reached
    /// or an empty page comes back.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(client: &HangarClient, query: &Self::Query) -> Result<Vec<Self>> {
        let mut all_items = Vec::new();
        let mut offset = 0u64;
        let mut pages = 0u32;

        loop {
            let opts = ListOptions::new(LIST_ALL_PAGE_SIZE, offset);
            let page = Self::list_page(client, query, opts).await?;
            let more = page.has_more();
            offset += page.result.len() as u64;
            all_items.extend(page.result);

            if !more {
                break;
            }
            pages += 1;

            // Safety limit to prevent infinite loops
            if pages >= MAX_PAGES {
                tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }
        }

        Ok(all_items)
    }
}
