use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::ServiceConfig,
    error::ClientError,
    http::{endpoint, get_json},
};

/// Build the watch URL for a YouTube video id
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// The search query used to look up a trailer
pub fn trailer_query(title: &str) -> String {
    format!("{} trailer", title)
}

/// Lookups against a video search service
#[async_trait]
pub trait VideoApi: Send + Sync {
    /// Find a trailer for a movie, returning its watch URL
    async fn find_trailer(&self, title: &str) -> Result<Option<String>, ClientError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: ItemId,
}

#[derive(Debug, Default, Deserialize)]
struct ItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

/// A [`VideoApi`] backed by the YouTube Data v3 search endpoint
#[derive(Debug, Clone)]
pub struct YoutubeClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl YoutubeClient {
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
        Self::new(http, &config.youtube_base_url, &config.youtube_api_key)
    }
}

#[async_trait]
impl VideoApi for YoutubeClient {
    async fn find_trailer(&self, title: &str) -> Result<Option<String>, ClientError> {
        let query = trailer_query(title);
        debug!(%query, "searching YouTube");
        let response: SearchResponse = get_json(self.http.get(endpoint(&self.base_url, "search")).query(&[
            ("part", "snippet"),
            ("q", query.as_str()),
            ("key", self.api_key.as_str()),
        ]))
        .await?;
        // Only the first item counts, even if it turns out to be a channel or playlist.
        Ok(response
            .items
            .into_iter()
            .next()
            .and_then(|item| item.id.video_id)
            .map(|video_id| watch_url(&video_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_item_without_video_id_yields_nothing() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"items": [{"id": {"kind": "youtube#channel", "channelId": "abc"}}, {"id": {"videoId": "xyz"}}]}"#,
        )
        .unwrap();
        assert_eq!(
            response.items.into_iter().next().and_then(|item| item.id.video_id),
            None
        );
    }

    #[test]
    fn watch_url_format() {
        assert_eq!(watch_url("2GfZl4kuVNI"), "https://www.youtube.com/watch?v=2GfZl4kuVNI");
        assert_eq!(trailer_query("Heat"), "Heat trailer");
    }
}
