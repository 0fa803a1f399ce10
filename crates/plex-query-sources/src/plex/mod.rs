pub mod api;
pub mod auth;
pub mod client;
pub mod web;

pub use client::PlexServer;
