//! Publishing pending images into the collection
//!
//! Validation happens before anything is built, so a rejected publish
//! leaves the caller's collection and user exactly as they were.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::preview::PendingImage;
use crate::error::{GalleryError, Result};
use crate::state::data::{Image, ImageId, Ratings, User};

/// The upload form while it is being filled in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadDraft {
    pub pending: Option<PendingImage>,
    pub title: String,
    pub description: String,
}

impl UploadDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once an image is picked and the title isn't blank
    pub fn can_publish(&self) -> bool {
        self.pending.is_some() && !self.title.trim().is_empty()
    }

    /// Reset the form after publishing or cancelling
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Time-derived id that is guaranteed not to collide with `images`.
///
/// Two publishes inside the same millisecond still get distinct ids.
/// Fails only when a stored id already sits at `ImageId::MAX`.
pub fn next_image_id(images: &[Image], now: DateTime<Utc>) -> Result<ImageId> {
    let stamp = now.timestamp_millis();
    match images.iter().map(|image| image.id).max() {
        Some(max) if max >= stamp => max
            .checked_add(1)
            .ok_or_else(|| GalleryError::validation("no image ids left after the largest stored id")),
        _ => Ok(stamp),
    }
}

/// Publish a pending image on behalf of `user`.
///
/// Returns the new collection (with the image first) and the user with
/// one more upload counted. Nothing changes when validation fails.
pub fn publish(
    images: &[Image],
    user: &User,
    pending: Option<&PendingImage>,
    title: &str,
    description: &str,
    now: DateTime<Utc>,
) -> Result<(Vec<Image>, User)> {
    let pending = pending.ok_or_else(|| GalleryError::validation("no image selected"))?;

    let title = title.trim();
    if title.is_empty() {
        return Err(GalleryError::validation("title must not be empty"));
    }

    let description = description.trim();
    let id = next_image_id(images, now)?;

    let image = Image {
        id,
        title: title.to_string(),
        description: (!description.is_empty()).then(|| description.to_string()),
        author: user.nickname.clone(),
        image_url: pending.preview.clone(),
        upload_date: now,
        ratings: Ratings::default(),
        user_ratings: BTreeMap::new(),
        views: 0,
        comments: Vec::new(),
    };

    let mut updated = Vec::with_capacity(images.len() + 1);
    updated.push(image);
    updated.extend_from_slice(images);

    let mut user = user.clone();
    user.uploads_count += 1;

    Ok((updated, user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
    }

    fn pending() -> PendingImage {
        PendingImage::from_url("data:image/png;base64,AAAA").unwrap()
    }

    #[test]
    fn test_publish_prepends_and_counts() {
        let user = User::new("alice", now() - Duration::days(3));
        let (images, user) =
            publish(&[], &user, Some(&pending()), "  Sunrise ", "  first light ", now()).unwrap();

        let (images, user) =
            publish(&images, &user, Some(&pending()), "Dusk", "   ", now() + Duration::hours(8)).unwrap();

        assert_eq!(user.uploads_count, 2);
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].title, "Dusk");
        assert_eq!(images[0].description, None);
        assert_eq!(images[1].title, "Sunrise");
        assert_eq!(images[1].description.as_deref(), Some("first light"));
        assert_eq!(images[1].author, "alice");
        assert_eq!(images[1].image_url, "data:image/png;base64,AAAA");
        assert_eq!(images[1].views, 0);
        assert_eq!(images[1].total_votes(), 0);
        assert!(images[1].user_ratings.is_empty());
        assert!(images[1].comments.is_empty());
    }

    #[test]
    fn test_rejects_blank_title() {
        let user = User::new("alice", now());
        let err = publish(&[], &user, Some(&pending()), " \t ", "desc", now()).unwrap_err();
        assert!(matches!(err, GalleryError::ValidationFailed(_)));
    }

    #[test]
    fn test_rejects_missing_image() {
        let user = User::new("alice", now());
        let err = publish(&[], &user, None, "Title", "", now()).unwrap_err();
        assert!(matches!(err, GalleryError::ValidationFailed(_)));
    }

    #[test]
    fn test_ids_never_collide() {
        let user = User::new("alice", now());
        let mut images = Vec::new();
        let mut user = user;
        for i in 0..5 {
            let (next, next_user) =
                publish(&images, &user, Some(&pending()), &format!("shot {i}"), "", now()).unwrap();
            images = next;
            user = next_user;
        }

        let mut ids: Vec<ImageId> = images.iter().map(|image| image.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
        assert_eq!(images[4].id, now().timestamp_millis());
    }

    #[test]
    fn test_id_space_exhausted() {
        let user = User::new("alice", now());
        let (mut images, user) = publish(&[], &user, Some(&pending()), "Edited", "", now()).unwrap();
        images[0].id = ImageId::MAX;

        assert!(matches!(
            next_image_id(&images, now()),
            Err(GalleryError::ValidationFailed(_))
        ));
        let err = publish(&images, &user, Some(&pending()), "One more", "", now()).unwrap_err();
        assert!(matches!(err, GalleryError::ValidationFailed(_)));
    }

    #[test]
    fn test_draft_gate() {
        let mut draft = UploadDraft::new();
        assert!(!draft.can_publish());

        draft.pending = Some(pending());
        draft.title = "  ".to_string();
        assert!(!draft.can_publish());

        draft.title = "Harbour".to_string();
        assert!(draft.can_publish());

        draft.clear();
        assert_eq!(draft, UploadDraft::default());
    }
}
