//! HTTP client for the Jira REST API

pub mod client;

pub use client::{browse_url, ClientConfig, JiraClient};
