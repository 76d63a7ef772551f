//! Typed snapshots over a key-value store
//!
//! Every mutation rewrites a whole record. A record that fails to parse
//! is logged and treated as absent so one bad write can't lock the user
//! out of the gallery.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use super::data::{Image, Ratings, User};
use super::store::KeyValueStore;
use crate::error::{GalleryError, Result};

/// Record holding the current user profile
pub const USER_KEY: &str = "imageGalleryUser";
/// Record holding the image collection
pub const IMAGES_KEY: &str = "imageGalleryImages";

/// Reads and writes the user and image collection records
#[derive(Debug)]
pub struct Snapshots<S> {
    store: S,
}

impl<S: KeyValueStore> Snapshots<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Parse a record, distinguishing "absent" from "malformed"
    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| GalleryError::MalformedStorage {
                key: key.to_string(),
                source,
            })
    }

    /// Load the current user, or `None` when there is none (or it is unreadable)
    pub fn load_user(&self) -> Result<Option<User>> {
        match self.read(USER_KEY) {
            Err(GalleryError::MalformedStorage { key, source }) => {
                warn!(%key, error = %source, "ignoring malformed user profile");
                Ok(None)
            }
            other => other,
        }
    }

    pub fn save_user(&mut self, user: &User) -> Result<()> {
        let json = serde_json::to_string(user)?;
        self.store.set(USER_KEY, &json)
    }

    /// Load the image collection.
    ///
    /// On first run (no record at all) the collection is seeded with
    /// [`example_images`] when `seed` is set, and the seed is persisted.
    /// A malformed record degrades to an empty collection.
    pub fn load_images(&mut self, seed: bool) -> Result<Vec<Image>> {
        match self.read::<Vec<Image>>(IMAGES_KEY) {
            Ok(Some(images)) => Ok(images),
            Ok(None) if seed => {
                let images = example_images();
                info!(count = images.len(), "seeding gallery with example images");
                self.save_images(&images)?;
                Ok(images)
            }
            Ok(None) => Ok(Vec::new()),
            Err(GalleryError::MalformedStorage { key, source }) => {
                warn!(%key, error = %source, "ignoring malformed image collection");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    pub fn save_images(&mut self, images: &[Image]) -> Result<()> {
        let json = serde_json::to_string(images)?;
        self.store.set(IMAGES_KEY, &json)
    }
}

fn seed_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// The two images a brand-new gallery starts with
pub fn example_images() -> Vec<Image> {
    vec![
        Image {
            id: 1,
            title: "Atardecer en la playa".to_string(),
            description: Some("Una hermosa puesta de sol".to_string()),
            author: "FotoLover".to_string(),
            image_url: "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=500&h=300&fit=crop"
                .to_string(),
            upload_date: seed_date(2024, 1, 15),
            ratings: Ratings::new(15, 3),
            user_ratings: BTreeMap::new(),
            views: 89,
            comments: Vec::new(),
        },
        Image {
            id: 2,
            title: "Montañas nevadas".to_string(),
            description: Some("Paisaje invernal espectacular".to_string()),
            author: "NatureFan".to_string(),
            image_url: "https://images.unsplash.com/photo-1464822759844-d150baec0494?w=500&h=300&fit=crop"
                .to_string(),
            upload_date: seed_date(2024, 1, 10),
            ratings: Ratings::new(22, 1),
            user_ratings: BTreeMap::new(),
            views: 156,
            comments: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::store::MemoryStore;

    #[test]
    fn test_first_run_seeds_and_persists() {
        let mut snapshots = Snapshots::new(MemoryStore::new());

        let images = snapshots.load_images(true).unwrap();

        assert_eq!(images.len(), 2);
        assert_eq!(images[0].title, "Atardecer en la playa");
        assert!(snapshots.store().get(IMAGES_KEY).unwrap().is_some());
    }

    #[test]
    fn test_no_seed_means_empty() {
        let mut snapshots = Snapshots::new(MemoryStore::new());
        assert!(snapshots.load_images(false).unwrap().is_empty());
        assert!(snapshots.store().is_empty());
    }

    #[test]
    fn test_empty_record_is_not_reseeded() {
        let mut store = MemoryStore::new();
        store.set(IMAGES_KEY, "[]").unwrap();
        let mut snapshots = Snapshots::new(store);

        assert!(snapshots.load_images(true).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_records_degrade() {
        let mut store = MemoryStore::new();
        store.set(IMAGES_KEY, "{not json").unwrap();
        store.set(USER_KEY, "[1, 2, 3]").unwrap();
        let mut snapshots = Snapshots::new(store);

        assert!(snapshots.load_images(true).unwrap().is_empty());
        assert_eq!(snapshots.load_user().unwrap(), None);
    }

    #[test]
    fn test_user_round_trip() {
        let mut snapshots = Snapshots::new(MemoryStore::new());
        assert_eq!(snapshots.load_user().unwrap(), None);

        let mut user = User::new("alice", seed_date(2024, 2, 1));
        user.uploads_count = 4;
        snapshots.save_user(&user).unwrap();

        assert_eq!(snapshots.load_user().unwrap(), Some(user));
    }
}
