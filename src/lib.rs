//! A local-first photo gallery engine.
//!
//! Users pick a nickname, publish images, vote on them ("good" or "can
//! improve") and browse a filtered, sorted feed. All state lives in two
//! JSON records in a key-value store; [`Gallery`] rewrites the relevant
//! record after every intent.
//!
//! ```no_run
//! use photo_gallery::{Filter, Gallery, GalleryConfig, SortKey, Vote};
//!
//! # fn main() -> photo_gallery::Result<()> {
//! let config = GalleryConfig::load("gallery.toml")?;
//! let mut gallery = Gallery::open_default(&config)?;
//! gallery.set_nickname("FotoMaster")?;
//! gallery.rate(1, Vote::Good)?;
//! for image in gallery.feed(&Filter::TopRated, &SortKey::MostLiked) {
//!     println!("{} by {}", image.title, image.author);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod feed;
pub mod gallery;
pub mod rating;
pub mod state;
pub mod upload;

pub use config::GalleryConfig;
pub use error::{GalleryError, Result};
pub use feed::{project, Filter, SortKey};
pub use gallery::Gallery;
pub use rating::{rate, view, ANONYMOUS_VOTER};
pub use state::data::{Image, ImageId, Ratings, User, Vote};
pub use state::library::SqliteStore;
pub use state::snapshot::Snapshots;
pub use state::store::{KeyValueStore, MemoryStore};
pub use upload::{load_pending_image, publish, PendingImage, UploadDraft};
