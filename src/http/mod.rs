//! HTTP transport module
//!
//! Provides the reqwest-backed transport used by the API client.
//!
//! # Features
//!
//! - **Base URL joining**: resource paths are relative to the configured endpoint
//! - **Default headers**: the API key header rides on every request
//! - **Raw responses**: status and body are surfaced for every response

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RawResponse};

#[cfg(test)]
mod tests;
