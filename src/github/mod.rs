pub mod api;
pub mod client;
pub mod paginator;
pub mod urls;

#[cfg(test)]
pub mod testing;

pub use api::GitHubApi;
pub use client::GitHubClient;
pub use paginator::Paginator;
pub use urls::ApiUrls;
