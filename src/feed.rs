//! Feed projection: filter, then stable sort
//!
//! Filter and sort keys parse from their kebab-case names. Names the
//! gallery doesn't know parse to an `Unknown` variant that passes the
//! collection through untouched.

use strum::{AsRefStr, Display, EnumString};

use crate::state::data::{Image, User};

/// Which images make it into the feed
#[derive(Debug, Clone, Default, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Filter {
    #[default]
    All,
    /// Only images uploaded by the current user
    MyImages,
    /// Only images with more "good" than "can improve" votes
    TopRated,
    #[strum(default)]
    Unknown(String),
}

/// Feed ordering
#[derive(Debug, Clone, Default, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    MostLiked,
    MostViewed,
    #[strum(default)]
    Unknown(String),
}

impl Filter {
    fn keeps(&self, image: &Image, current_user: Option<&User>) -> bool {
        match self {
            Filter::All | Filter::Unknown(_) => true,
            Filter::MyImages => current_user.is_some_and(|user| image.author == user.nickname),
            Filter::TopRated => image.is_top_rated(),
        }
    }
}

/// Derive the feed from a collection.
///
/// Ties keep their collection order.
pub fn project<'a>(
    images: &'a [Image],
    filter: &Filter,
    sort: &SortKey,
    current_user: Option<&User>,
) -> Vec<&'a Image> {
    let mut feed: Vec<&Image> = images
        .iter()
        .filter(|image| filter.keeps(image, current_user))
        .collect();

    // sort_by is stable
    match sort {
        SortKey::Newest => feed.sort_by(|a, b| b.upload_date.cmp(&a.upload_date)),
        SortKey::Oldest => feed.sort_by(|a, b| a.upload_date.cmp(&b.upload_date)),
        SortKey::MostLiked => feed.sort_by(|a, b| b.ratings.good.cmp(&a.ratings.good)),
        SortKey::MostViewed => feed.sort_by(|a, b| b.views.cmp(&a.views)),
        SortKey::Unknown(_) => {}
    }

    feed
}
