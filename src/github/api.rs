use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::github::urls::ApiUrls;

#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// GET a single resource. 404, 403 and other non-2xx statuses are
    /// mapped to `NotFound`, `RateLimited` and `Upstream` respectively.
    async fn fetch_resource(&self, url: &str) -> Result<Value>;

    /// GET one page of a list resource. A non-2xx status yields `Ok(None)`
    /// instead of an error so that sweeps can stop quietly.
    async fn fetch_page(
        &self,
        url: &str,
        params: &[(String, String)],
        page: u32,
        per_page: u32,
    ) -> Result<Option<Vec<Value>>>;

    fn urls(&self) -> &ApiUrls;

    fn has_credential(&self) -> bool;
}
