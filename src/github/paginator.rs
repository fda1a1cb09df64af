use serde_json::Value;

use crate::error::Result;
use crate::github::api::GitHubApi;

pub const PAGE_SIZE: u32 = 100;

pub struct Paginator<'a> {
    api: &'a dyn GitHubApi,
}

impl<'a> Paginator<'a> {
    pub fn new(api: &'a dyn GitHubApi) -> Self {
        Self { api }
    }

    /// Sweeps every page of `base_url`. A non-2xx page ends the sweep and
    /// returns what was collected so far; transport errors still propagate.
    pub async fn fetch_all(
        &self,
        base_url: &str,
        params: &[(String, String)],
    ) -> Result<Vec<Value>> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            tracing::debug!("Fetching page {} of {}", page, base_url);
            let items = match self.api.fetch_page(base_url, params, page, PAGE_SIZE).await? {
                Some(items) => items,
                None => {
                    tracing::debug!("Stopping sweep of {} at page {}", base_url, page);
                    break;
                }
            };

            let items_count = items.len();
            all_items.extend(items);

            if items_count < PAGE_SIZE as usize {
                break;
            }

            page += 1;
        }

        Ok(all_items)
    }
}
