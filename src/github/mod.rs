pub mod auth;
pub mod client;
pub mod types;

pub use auth::discover_token;
pub use client::GithubClient;
