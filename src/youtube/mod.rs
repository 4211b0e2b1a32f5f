//! Minimal YouTube Data API v3 client: resolves a channel reference to its public stats.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum YoutubeError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("youtube request failed: status={status} body={body}")]
    BadStatus { status: StatusCode, body: String },
    #[error("channel not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    pub id: String,
    pub title: String,
    pub description: String,
    pub subscriber_count: Option<u64>,
    pub video_count: Option<u64>,
    pub view_count: Option<u64>,
}

/// How a free-form channel reference should be looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRef {
    Id(String),
    Handle(String),
    Search(String),
}

impl ChannelRef {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let input = input
            .rsplit_once("youtube.com/")
            .map(|(_, path)| path.trim_start_matches("channel/"))
            .unwrap_or(input)
            .trim_end_matches('/');

        if input.starts_with('@') {
            ChannelRef::Handle(input.to_string())
        } else if input.len() == 24 && input.starts_with("UC") {
            ChannelRef::Id(input.to_string())
        } else {
            ChannelRef::Search(input.to_string())
        }
    }
}

#[derive(Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Deserialize)]
struct ChannelItem {
    id: String,
    snippet: ChannelSnippet,
    #[serde(default)]
    statistics: Option<ChannelStatistics>,
}

#[derive(Deserialize)]
struct ChannelSnippet {
    title: String,
    #[serde(default)]
    description: String,
}

// The API returns counts as strings.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelStatistics {
    subscriber_count: Option<String>,
    video_count: Option<String>,
    view_count: Option<String>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: SearchId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchId {
    channel_id: Option<String>,
}

impl From<ChannelItem> for ChannelStats {
    fn from(item: ChannelItem) -> Self {
        let stats = item.statistics.unwrap_or_default();
        ChannelStats {
            id: item.id,
            title: item.snippet.title,
            description: item.snippet.description.chars().take(500).collect(),
            subscriber_count: parse_count(stats.subscriber_count),
            video_count: parse_count(stats.video_count),
            view_count: parse_count(stats.view_count),
        }
    }
}

fn parse_count(raw: Option<String>) -> Option<u64> {
    raw.and_then(|v| v.parse().ok())
}

pub struct YoutubeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YoutubeClient {
    /// `None` when no API key is configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>, YoutubeError> {
        let Some(api_key) = config.youtube_api_key.clone() else {
            return Ok(None);
        };
        let http = reqwest::Client::builder()
            .timeout(config.llm_timeout())
            .build()?;
        Ok(Some(Self {
            http,
            base_url: config.youtube_api_url.trim_end_matches('/').to_string(),
            api_key,
        }))
    }

    pub async fn channel_stats(&self, reference: &str) -> Result<ChannelStats, YoutubeError> {
        let channel_id = match ChannelRef::parse(reference) {
            ChannelRef::Id(id) => id,
            ChannelRef::Handle(handle) => {
                let found = self.fetch_channel(&[("forHandle", handle.as_str())]).await?;
                return found.ok_or(YoutubeError::NotFound(handle));
            }
            ChannelRef::Search(query) => self.search_channel(&query).await?,
        };

        let found = self.fetch_channel(&[("id", channel_id.as_str())]).await?;
        found.ok_or(YoutubeError::NotFound(channel_id))
    }

    async fn fetch_channel(
        &self,
        filter: &[(&str, &str)],
    ) -> Result<Option<ChannelStats>, YoutubeError> {
        let url = format!("{}/channels", self.base_url);
        let resp: ListResponse<ChannelItem> = self
            .get(&url, filter, &[("part", "snippet,statistics")])
            .await?;
        Ok(resp.items.into_iter().next().map(ChannelStats::from))
    }

    async fn search_channel(&self, query: &str) -> Result<String, YoutubeError> {
        let url = format!("{}/search", self.base_url);
        let resp: ListResponse<SearchItem> = self
            .get(
                &url,
                &[("q", query)],
                &[("part", "snippet"), ("type", "channel"), ("maxResults", "1")],
            )
            .await?;
        resp.items
            .into_iter()
            .find_map(|item| item.id.channel_id)
            .ok_or_else(|| YoutubeError::NotFound(query.to_string()))
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        filter: &[(&str, &str)],
        params: &[(&str, &str)],
    ) -> Result<T, YoutubeError> {
        let resp = self
            .http
            .get(url)
            .query(filter)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(YoutubeError::BadStatus { status, body });
        }
        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};

    const CHANNEL_ID: &str = "UCBJycsmduvYEL83R_U4JriQ";

    const CHANNEL_BODY: &str = r#"{
        "items": [{
            "id": "UCBJycsmduvYEL83R_U4JriQ",
            "snippet": {"title": "MKBHD", "description": "Quality tech videos"},
            "statistics": {"subscriberCount": "19000000", "videoCount": "1700", "viewCount": "4200000000"}
        }]
    }"#;

    fn youtube_for(server: &ServerGuard) -> YoutubeClient {
        let config = Config {
            youtube_api_key: Some("yt-key".into()),
            youtube_api_url: format!("{}/", server.url()),
            ..Config::default()
        };
        YoutubeClient::from_config(&config).unwrap().unwrap()
    }

    fn query(pairs: &[(&str, &str)]) -> Matcher {
        Matcher::AllOf(
            pairs
                .iter()
                .map(|(k, v)| Matcher::UrlEncoded(k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[tokio::test]
    async fn handle_is_resolved_in_one_call() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/channels")
            .match_query(query(&[
                ("forHandle", "@mkbhd"),
                ("part", "snippet,statistics"),
                ("key", "yt-key"),
            ]))
            .with_status(200)
            .with_body(CHANNEL_BODY)
            .create_async()
            .await;

        let stats = youtube_for(&server).channel_stats("@mkbhd").await.unwrap();

        assert_eq!(stats.id, CHANNEL_ID);
        assert_eq!(stats.subscriber_count, Some(19_000_000));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn free_text_is_searched_then_fetched_by_id() {
        let mut server = Server::new_async().await;
        let search = server
            .mock("GET", "/search")
            .match_query(query(&[
                ("q", "Marques Brownlee"),
                ("type", "channel"),
                ("maxResults", "1"),
                ("key", "yt-key"),
            ]))
            .with_status(200)
            .with_body(format!(
                r#"{{"items":[{{"id":{{"kind":"youtube#channel","channelId":"{CHANNEL_ID}"}}}}]}}"#
            ))
            .create_async()
            .await;
        let channels = server
            .mock("GET", "/channels")
            .match_query(query(&[("id", CHANNEL_ID)]))
            .with_status(200)
            .with_body(CHANNEL_BODY)
            .create_async()
            .await;

        let stats = youtube_for(&server)
            .channel_stats("Marques Brownlee")
            .await
            .unwrap();

        assert_eq!(stats.title, "MKBHD");
        assert_eq!(stats.video_count, Some(1700));
        search.assert_async().await;
        channels.assert_async().await;
    }

    #[tokio::test]
    async fn empty_result_is_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/channels")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"kind":"youtube#channelListResponse"}"#)
            .create_async()
            .await;

        let err = youtube_for(&server)
            .channel_stats("@nobody")
            .await
            .unwrap_err();
        assert!(matches!(err, YoutubeError::NotFound(handle) if handle == "@nobody"));
    }

    #[tokio::test]
    async fn error_status_keeps_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/channels")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(r#"{"error":{"message":"quotaExceeded"}}"#)
            .create_async()
            .await;

        let err = youtube_for(&server)
            .channel_stats(CHANNEL_ID)
            .await
            .unwrap_err();
        match err {
            YoutubeError::BadStatus { status, body } => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert!(body.contains("quotaExceeded"));
            }
            other => panic!("expected bad status, got {other:?}"),
        }
    }

    #[test]
    fn channel_references_are_classified() {
        assert_eq!(
            ChannelRef::parse("@mkbhd"),
            ChannelRef::Handle("@mkbhd".into())
        );
        assert_eq!(
            ChannelRef::parse("https://www.youtube.com/@veritasium/"),
            ChannelRef::Handle("@veritasium".into())
        );
        assert_eq!(
            ChannelRef::parse("https://youtube.com/channel/UCBJycsmduvYEL83R_U4JriQ"),
            ChannelRef::Id("UCBJycsmduvYEL83R_U4JriQ".into())
        );
        assert_eq!(
            ChannelRef::parse("Marques Brownlee"),
            ChannelRef::Search("Marques Brownlee".into())
        );
    }

    #[test]
    fn string_counts_are_parsed() {
        let item: ChannelItem = serde_json::from_str(
            r#"{
                "id": "UC123",
                "snippet": {"title": "Chan", "description": "About"},
                "statistics": {"subscriberCount": "1200", "videoCount": "34", "viewCount": "not-a-number"}
            }"#,
        )
        .unwrap();
        let stats = ChannelStats::from(item);
        assert_eq!(stats.subscriber_count, Some(1200));
        assert_eq!(stats.video_count, Some(34));
        assert_eq!(stats.view_count, None);
    }

    #[test]
    fn hidden_statistics_are_tolerated() {
        let item: ChannelItem =
            serde_json::from_str(r#"{"id": "UC1", "snippet": {"title": "T"}}"#).unwrap();
        let stats = ChannelStats::from(item);
        assert_eq!(stats.subscriber_count, None);
        assert_eq!(stats.description, "");
    }

    #[test]
    fn no_key_means_no_client() {
        assert!(YoutubeClient::from_config(&Config::default()).unwrap().is_none());
    }
}
