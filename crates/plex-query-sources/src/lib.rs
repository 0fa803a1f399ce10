pub mod error;
pub mod plex;
pub mod traits;

pub use error::PlexError;
pub use plex::PlexServer;
pub use traits::{ItemFilter, MediaServer};
