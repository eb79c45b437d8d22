use std::{collections::HashMap, fmt};

use tokio::sync::RwLock;

/// Identifies the person issuing commands. Only ever used as a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub u64);

/// A star rating, always within [`Stars::MIN`]..=[`Stars::MAX`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Stars(u8);

impl Stars {
    /// The lowest accepted rating
    pub const MIN: u8 = 1;
    /// The highest accepted rating
    pub const MAX: u8 = 5;

    /// Validate a rating, returning `None` if it is out of range
    pub fn new(value: i64) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|stars| (Self::MIN..=Self::MAX).contains(stars))
            .map(Self)
    }

    /// The number of stars
    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Stars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single rating a user gave a movie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingEntry {
    /// The movie title, exactly as the user wrote it
    pub title: String,
    /// The rating
    pub stars: Stars,
}

/// In-memory ratings for every user, kept for the lifetime of the process.
///
/// Each user's ratings are kept in the order titles were first rated; re-rating a title updates
/// it in place.
#[derive(Debug, Default)]
pub struct RatingStore {
    users: RwLock<HashMap<UserId, Vec<RatingEntry>>>,
}

impl RatingStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rating, replacing any earlier rating the user gave the same title
    pub async fn record(&self, user: UserId, title: impl Into<String>, stars: Stars) {
        let title = title.into();
        let mut users = self.users.write().await;
        let ratings = users.entry(user).or_default();
        match ratings.iter_mut().find(|entry| entry.title == title) {
            Some(entry) => entry.stars = stars,
            None => ratings.push(RatingEntry { title, stars }),
        }
    }

    /// The user's highest rated title. Ties go to whichever title was rated first.
    pub async fn top_rated_for(&self, user: UserId) -> Option<String> {
        let users = self.users.read().await;
        let mut best: Option<&RatingEntry> = None;
        for entry in users.get(&user)? {
            if best.map_or(true, |best| entry.stars > best.stars) {
                best = Some(entry);
            }
        }
        best.map(|entry| entry.title.clone())
    }

    /// All of the user's ratings in the order the titles were first rated
    pub async fn ratings_for(&self, user: UserId) -> Vec<RatingEntry> {
        self.users
            .read()
            .await
            .get(&user)
            .cloned()
            .unwrap_or_default()
    }
}
