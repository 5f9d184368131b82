use crate::domain::model::{GroupResource, MemberPage};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only view of the identity provider. The export pipeline talks to
/// Okta through this trait so tests can stand in a mock server or fake.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// Fetch a single group by its canonical ID.
    async fn get_group(&self, group_id: &str) -> Result<GroupResource>;

    /// Free-text group search, capped at `limit` results.
    async fn search_groups(&self, query: &str, limit: usize) -> Result<Vec<GroupResource>>;

    /// URL of the first member page for a group.
    fn members_url(&self, group_id: &str, limit: usize) -> String;

    /// Fetch one page of members from an absolute URL, returning the page
    /// contents and the next-page cursor (if the provider sent one).
    async fn fetch_members_page(&self, url: &str) -> Result<MemberPage>;
}
