//! Rating engine
//!
//! Keeps every image's tallies in step with its per-user vote map:
//! `good + can_improve` always equals the number of voters.

use tracing::debug;

use crate::state::data::{Image, ImageId, User, Vote};

/// Voter key used when nobody has picked a nickname yet
pub const ANONYMOUS_VOTER: &str = "anonymous";

/// Key under which `user` (or the anonymous visitor) records votes
pub fn voter_key(user: Option<&User>) -> &str {
    user.map_or(ANONYMOUS_VOTER, |u| u.nickname.as_str())
}

/// Record `voter`'s vote on a single image.
///
/// A previous vote by the same voter is withdrawn first, so re-voting
/// moves a count between buckets instead of adding one.
pub fn record_vote(image: &mut Image, voter: &str, vote: Vote) {
    if let Some(previous) = image.vote_of(voter) {
        image.ratings.decrement(previous);
    }
    image.ratings.increment(vote);
    image.user_ratings.insert(voter.to_string(), vote);
}

/// Apply a vote to the image with `image_id` and return the new collection.
///
/// An unknown id leaves the collection unchanged.
pub fn rate(mut images: Vec<Image>, image_id: ImageId, voter: &str, vote: Vote) -> Vec<Image> {
    match images.iter_mut().find(|image| image.id == image_id) {
        Some(image) => {
            record_vote(image, voter, vote);
            debug!(image_id, voter, %vote, good = image.ratings.good, can_improve = image.ratings.can_improve, "vote recorded");
        }
        None => debug!(image_id, voter, "vote for unknown image ignored"),
    }
    images
}

/// Count one more view of `image_id`. Every open counts, the uploader's too.
pub fn view(mut images: Vec<Image>, image_id: ImageId) -> Vec<Image> {
    match images.iter_mut().find(|image| image.id == image_id) {
        Some(image) => image.views += 1,
        None => debug!(image_id, "view of unknown image ignored"),
    }
    images
}
