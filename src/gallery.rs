//! Gallery session
//!
//! Owns the current-user slot and the in-memory collection, dispatches
//! user intents to the engine, and writes the full snapshot back after
//! every mutation so a reopen sees the last completed intent.

use chrono::Utc;
use tracing::{debug, info};

use crate::config::GalleryConfig;
use crate::error::{GalleryError, Result};
use crate::feed::{self, Filter, SortKey};
use crate::rating;
use crate::state::data::{Image, ImageId, User, Vote};
use crate::state::library::SqliteStore;
use crate::state::snapshot::Snapshots;
use crate::state::store::KeyValueStore;
use crate::upload::{self, PendingImage, UploadDraft};

pub struct Gallery<S> {
    snapshots: Snapshots<S>,
    user: Option<User>,
    images: Vec<Image>,
}

impl Gallery<SqliteStore> {
    /// Open the gallery backed by the SQLite store the config points at
    pub fn open_default(config: &GalleryConfig) -> Result<Self> {
        let store = SqliteStore::open(config.database_path()?)?;
        Self::open(store, config)
    }
}

impl<S: KeyValueStore> Gallery<S> {
    /// Load the user and collection from `store`
    pub fn open(store: S, config: &GalleryConfig) -> Result<Self> {
        let mut snapshots = Snapshots::new(store);
        let user = snapshots.load_user()?;
        let images = snapshots.load_images(config.seed_examples)?;

        info!(
            images = images.len(),
            user = user.as_ref().map(|u| u.nickname.as_str()),
            "gallery loaded"
        );

        Ok(Self {
            snapshots,
            user,
            images,
        })
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The collection in stored order (newest uploads first)
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn store(&self) -> &S {
        self.snapshots.store()
    }

    /// Look up a single image
    pub fn image(&self, image_id: ImageId) -> Result<&Image> {
        self.images
            .iter()
            .find(|image| image.id == image_id)
            .ok_or(GalleryError::NotFound(image_id))
    }

    /// Start a session as `nickname`, replacing any previous user
    pub fn set_nickname(&mut self, nickname: &str) -> Result<&User> {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(GalleryError::validation("nickname must not be empty"));
        }

        let user = User::new(nickname, Utc::now());
        self.snapshots.save_user(&user)?;
        info!(nickname, "user joined");

        Ok(self.user.insert(user))
    }

    /// The current user's vote on an image, for highlighting
    pub fn current_vote(&self, image_id: ImageId) -> Option<Vote> {
        let voter = rating::voter_key(self.user.as_ref());
        self.image(image_id).ok()?.vote_of(voter)
    }

    /// Rate an image as the current user (or anonymously)
    pub fn rate(&mut self, image_id: ImageId, vote: Vote) -> Result<()> {
        let voter = rating::voter_key(self.user.as_ref()).to_string();
        let images = std::mem::take(&mut self.images);
        self.images = rating::rate(images, image_id, &voter, vote);
        self.snapshots.save_images(&self.images)
    }

    /// Count a view of an image
    pub fn view(&mut self, image_id: ImageId) -> Result<()> {
        let images = std::mem::take(&mut self.images);
        self.images = rating::view(images, image_id);
        self.snapshots.save_images(&self.images)
    }

    /// Publish an image as the current user and return its id
    pub fn publish(
        &mut self,
        pending: Option<&PendingImage>,
        title: &str,
        description: &str,
    ) -> Result<ImageId> {
        let user = self
            .user
            .as_ref()
            .ok_or_else(|| GalleryError::validation("pick a nickname before uploading"))?;

        let (images, user) =
            upload::publish(&self.images, user, pending, title, description, Utc::now())?;
        let image_id = images[0].id;
        info!(image_id, author = %user.nickname, uploads = user.uploads_count, "image published");

        // Memory must match whatever reached the store, even if a write fails
        self.images = images;
        let user = self.user.insert(user);

        self.snapshots.save_images(&self.images)?;
        self.snapshots.save_user(user)?;

        Ok(image_id)
    }

    /// Publish the draft and clear it. A draft that fails validation is kept.
    pub fn publish_draft(&mut self, draft: &mut UploadDraft) -> Result<ImageId> {
        let image_id = self.publish(draft.pending.as_ref(), &draft.title, &draft.description)?;
        draft.clear();
        Ok(image_id)
    }

    /// The feed as the presentation layer should show it
    pub fn feed(&self, filter: &Filter, sort: &SortKey) -> Vec<&Image> {
        let feed = feed::project(&self.images, filter, sort, self.user.as_ref());
        debug!(%filter, %sort, shown = feed.len(), "feed projected");
        feed
    }
}

impl<S> std::fmt::Debug for Gallery<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gallery")
            .field("user", &self.user)
            .field("images", &self.images.len())
            .finish()
    }
}
