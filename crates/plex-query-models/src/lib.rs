pub mod client;
pub mod library;
pub mod media;
pub mod server;

pub use client::ClientDevice;
pub use library::LibrarySectionInfo;
pub use media::{MediaItem, MediaKind};
pub use server::ServerIdentity;
