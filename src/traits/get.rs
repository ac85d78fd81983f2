//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::HangarClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types that can be fetched individually
/// by a unique identifier (a slug, a username, or a numeric ID).
///
/// # Example
///
/// ```ignore
/// use hangarapi::{HangarClient, Project, Get};
///
/// let client = HangarClient::new(Default::default())?;
/// let project = Project::get(&client, "fancyglow".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity (e.g., String slug).
    type Id: Send;

    /// Fetch the entity by ID.
    ///
    /// # Arguments
    ///
    /// * `client` - The Hangar API client
    /// * `id` - The entity identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is invalid, the entity is not found
    /// or the request fails.
    async fn get(client: &HangarClient, id: Self::Id) -> Result<Self>;
}
