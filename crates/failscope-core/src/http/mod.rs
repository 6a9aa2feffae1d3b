//! HTTP client for GitHub API

pub mod client;
pub mod workflows;

pub use client::GitHubApiClient;
