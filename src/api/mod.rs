pub mod admin;
pub mod auth;
pub mod client;
pub mod courier;
pub mod notifications;
pub mod orders;

pub use client::ApiClient;
