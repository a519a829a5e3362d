//! HTTP inbound adapter exposing page views and the JSON API.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod opportunities;
pub mod pages;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;
pub mod views;

pub use error::ApiResult;
