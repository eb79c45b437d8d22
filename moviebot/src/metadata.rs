use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use tracing::debug;

use crate::{
    config::ServiceConfig,
    error::ClientError,
    genre::Genre,
    http::{endpoint, get_json},
};

/// The crew department that marks a directing credit
pub const DIRECTING_DEPARTMENT: &str = "Directing";

/// A TMDB movie id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

/// A TMDB person id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u64);

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The minimal shape of a movie returned by discovery
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MovieSummary {
    /// The movie's id, used to fetch its details
    pub id: MovieId,
    /// The movie's title
    #[serde(default)]
    pub title: String,
}

/// A single crew credit for a person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewCredit {
    /// The movie title
    pub title: String,
    /// The department the person worked in, e.g. "Directing"
    pub department: String,
}

/// The movie credits attached to a person
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonCredits {
    /// Titles the person acted in, in the order TMDB lists them
    pub cast: Vec<String>,
    /// Titles the person worked on behind the camera
    pub crew: Vec<CrewCredit>,
}

impl PersonCredits {
    /// Titles from the cast list
    pub fn acted_in(&self) -> Vec<String> {
        self.cast.clone()
    }

    /// Titles from crew entries in the directing department
    pub fn directed(&self) -> Vec<String> {
        self.crew
            .iter()
            .filter(|credit| credit.department == DIRECTING_DEPARTMENT)
            .map(|credit| credit.title.clone())
            .collect()
    }
}

/// Display fields for a single movie. TMDB leaves any of these out now and then.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieDetails {
    /// Plot overview
    pub overview: Option<String>,
    /// Release date as TMDB formats it (YYYY-MM-DD)
    pub release_date: Option<String>,
    /// Runtime in minutes
    pub runtime_minutes: Option<u32>,
    /// Genre names in TMDB's order
    pub genre_names: Vec<String>,
}

impl MovieDetails {
    /// Genre names joined for display
    pub fn genres(&self) -> String {
        self.genre_names.join(", ")
    }
}

/// Lookups against a movie metadata service
#[async_trait]
pub trait MetadataApi: Send + Sync {
    /// Discover movies, optionally filtered to a genre
    async fn discover_by_genre(&self, genre: Option<&Genre>)
        -> Result<Vec<MovieSummary>, ClientError>;

    /// Find the first person matching a name
    async fn search_person(&self, name: &str) -> Result<Option<PersonId>, ClientError>;

    /// Fetch the movie credits for a person
    async fn credits_for_person(&self, person: PersonId) -> Result<PersonCredits, ClientError>;

    /// Fetch the details of a movie
    async fn movie_details(&self, movie: MovieId) -> Result<MovieDetails, ClientError>;
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct PersonResult {
    id: PersonId,
}

#[derive(Debug, Deserialize)]
struct CreditsResponse {
    #[serde(default)]
    cast: Vec<CastEntry>,
    #[serde(default)]
    crew: Vec<CrewEntry>,
}

#[derive(Debug, Deserialize)]
struct CastEntry {
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CrewEntry {
    title: Option<String>,
    department: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    overview: Option<String>,
    release_date: Option<String>,
    runtime: Option<u32>,
    #[serde(default)]
    genres: Vec<GenreEntry>,
}

#[derive(Debug, Deserialize)]
struct GenreEntry {
    name: String,
}

impl From<CreditsResponse> for PersonCredits {
    fn from(response: CreditsResponse) -> Self {
        Self {
            cast: response
                .cast
                .into_iter()
                .filter_map(|entry| entry.title)
                .collect(),
            crew: response
                .crew
                .into_iter()
                .filter_map(|entry| {
                    Some(CrewCredit {
                        title: entry.title?,
                        department: entry.department.unwrap_or_default(),
                    })
                })
                .collect(),
        }
    }
}

impl From<DetailsResponse> for MovieDetails {
    fn from(response: DetailsResponse) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            overview: non_empty(response.overview),
            release_date: non_empty(response.release_date),
            runtime_minutes: response.runtime.filter(|minutes| *minutes > 0),
            genre_names: response.genres.into_iter().map(|genre| genre.name).collect(),
        }
    }
}

/// A [`MetadataApi`] backed by the TMDB v3 REST API
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Create a client for the given base URL and API key
    pub fn new(http: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Create a client from the loaded service configuration
    pub fn from_config(http: Client, config: &ServiceConfig) -> Self {
        Self::new(http, &config.tmdb_base_url, &config.tmdb_api_key)
    }

    async fn get<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = endpoint(&self.base_url, path);
        debug!(%url, ?query, "querying TMDB");
        get_json(
            self.http
                .get(url)
                .query(&[("api_key", self.api_key.as_str())])
                .query(query),
        )
        .await
    }
}

#[async_trait]
impl MetadataApi for TmdbClient {
    async fn discover_by_genre(
        &self,
        genre: Option<&Genre>,
    ) -> Result<Vec<MovieSummary>, ClientError> {
        let query: Vec<(&str, &str)> = genre
            .map(|genre| ("with_genres", genre.tmdb_filter()))
            .into_iter()
            .collect();
        let page: Page<MovieSummary> = self.get("discover/movie", &query).await?;
        Ok(page.results)
    }

    async fn search_person(&self, name: &str) -> Result<Option<PersonId>, ClientError> {
        let page: Page<PersonResult> = self.get("search/person", &[("query", name)]).await?;
        Ok(page.results.first().map(|person| person.id))
    }

    async fn credits_for_person(&self, person: PersonId) -> Result<PersonCredits, ClientError> {
        let credits: CreditsResponse = self
            .get(&format!("person/{}/movie_credits", person), &[])
            .await?;
        Ok(credits.into())
    }

    async fn movie_details(&self, movie: MovieId) -> Result<MovieDetails, ClientError> {
        let details: DetailsResponse = self.get(&format!("movie/{}", movie), &[]).await?;
        Ok(details.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credits_split_cast_and_directing_crew() {
        let response: CreditsResponse = serde_json::from_str(
            r#"{
                "id": 1,
                "cast": [{"title": "Heat", "character": "Neil"}, {"character": "Uncredited"}, {"title": "Ronin"}],
                "crew": [
                    {"title": "Heat", "department": "Production"},
                    {"title": "Thief", "department": "Directing", "job": "Director"},
                    {"title": "Collateral", "department": "Directing"}
                ]
            }"#,
        )
        .unwrap();
        let credits = PersonCredits::from(response);
        assert_eq!(credits.acted_in(), vec!["Heat", "Ronin"]);
        assert_eq!(credits.directed(), vec!["Thief", "Collateral"]);
    }

    #[test]
    fn details_keep_genre_order_and_drop_blanks() {
        let response: DetailsResponse = serde_json::from_str(
            r#"{
                "overview": "",
                "release_date": "1995-12-15",
                "runtime": 170,
                "genres": [{"id": 80, "name": "Crime"}, {"id": 18, "name": "Drama"}]
            }"#,
        )
        .unwrap();
        let details = MovieDetails::from(response);
        assert_eq!(details.overview, None);
        assert_eq!(details.release_date.as_deref(), Some("1995-12-15"));
        assert_eq!(details.runtime_minutes, Some(170));
        assert_eq!(details.genres(), "Crime, Drama");
    }

    #[test]
    fn discovery_page_tolerates_missing_results() {
        let page: Page<MovieSummary> = serde_json::from_str(r#"{"page": 1}"#).unwrap();
        assert!(page.results.is_empty());

        let page: Page<MovieSummary> =
            serde_json::from_str(r#"{"results": [{"id": 949, "title": "Heat", "popularity": 1.5}]}"#)
                .unwrap();
        assert_eq!(
            page.results,
            vec![MovieSummary {
                id: MovieId(949),
                title: "Heat".to_owned()
            }]
        );
    }
}
