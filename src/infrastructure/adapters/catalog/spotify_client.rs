//! Spotify Client - 曲目搜索
//!
//! 先用结构化查询 `track:<title> artist:<artist>`，无结果时退化为普通关键词查询。

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use super::token_manager::SpotifyTokenManager;
use crate::application::ports::{CatalogError, TrackResolverPort};
use crate::domain::Track;

/// Spotify Client 配置
#[derive(Debug, Clone)]
pub struct SpotifyClientConfig {
    /// Web API 地址
    pub api_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for SpotifyClientConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.spotify.com/v1".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: Option<TrackPage>,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<TrackItem>,
}

#[derive(Debug, Deserialize)]
struct TrackItem {
    uri: String,
    name: String,
    #[serde(default)]
    artists: Vec<ArtistItem>,
    album: Option<AlbumItem>,
    preview_url: Option<String>,
    duration_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ArtistItem {
    name: String,
}

#[derive(Debug, Deserialize)]
struct AlbumItem {
    #[serde(default)]
    images: Vec<ImageItem>,
}

#[derive(Debug, Deserialize)]
struct ImageItem {
    url: String,
}

impl From<TrackItem> for Track {
    fn from(item: TrackItem) -> Self {
        Track {
            uri: item.uri,
            display_name: item.name,
            artist_name: item
                .artists
                .into_iter()
                .next()
                .map(|a| a.name)
                .unwrap_or_default(),
            album_art_url: item
                .album
                .and_then(|album| album.images.into_iter().next())
                .map(|image| image.url),
            preview_locator: item.preview_url,
            duration_ms: item.duration_ms,
        }
    }
}

/// Spotify 搜索客户端
pub struct SpotifyClient {
    client: Client,
    config: SpotifyClientConfig,
    tokens: Arc<SpotifyTokenManager>,
}

impl SpotifyClient {
    pub fn new(
        config: SpotifyClientConfig,
        tokens: Arc<SpotifyTokenManager>,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CatalogError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            config,
            tokens,
        })
    }

    /// 搜索并返回第一条结果
    pub async fn search_first(&self, query: &str) -> Result<Option<Track>, CatalogError> {
        let token = self.tokens.access_token().await?;
        let url = format!("{}/search", self.config.api_url.trim_end_matches('/'));

        tracing::debug!(query = %query, "Searching Spotify");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("q", query), ("type", "track"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CatalogError::Timeout
                } else {
                    CatalogError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(CatalogError::AuthError("access token rejected".to_string()));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;

        Ok(body
            .tracks
            .and_then(|page| page.items.into_iter().next())
            .map(Track::from))
    }
}

#[async_trait]
impl TrackResolverPort for SpotifyClient {
    async fn resolve(&self, title: &str, artist: &str) -> Result<Option<Track>, CatalogError> {
        let structured = format!("track:{} artist:{}", title, artist);
        if let Some(track) = self.search_first(&structured).await? {
            return Ok(Some(track));
        }

        tracing::debug!(title = %title, artist = %artist, "No structured match, broadening search");
        let broad = format!("{} {}", title, artist);
        self.search_first(&broad).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::catalog::SpotifyTokenManagerConfig;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> SpotifyClient {
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "test-token",
                "expires_in": 3600
            })))
            .mount(server)
            .await;

        let tokens = SpotifyTokenManager::new(SpotifyTokenManagerConfig {
            auth_url: format!("{}/api/token", server.uri()),
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            timeout_secs: 5,
            ..Default::default()
        })
        .unwrap();

        SpotifyClient::new(
            SpotifyClientConfig {
                api_url: server.uri(),
                timeout_secs: 5,
            },
            Arc::new(tokens),
        )
        .unwrap()
    }

    fn track_page(uri: &str, name: &str, artist: &str) -> serde_json::Value {
        json!({
            "tracks": {
                "items": [{
                    "uri": uri,
                    "name": name,
                    "artists": [{ "name": artist }, { "name": "Someone Else" }],
                    "album": { "images": [{ "url": "https://img/large.jpg" }, { "url": "https://img/small.jpg" }] },
                    "preview_url": "https://preview/1.mp3",
                    "duration_ms": 354000
                }]
            }
        })
    }

    fn empty_page() -> serde_json::Value {
        json!({ "tracks": { "items": [] } })
    }

    #[tokio::test]
    async fn test_structured_query_hit() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "track:Bohemian Rhapsody artist:Queen"))
            .and(query_param("type", "track"))
            .and(query_param("limit", "1"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(track_page(
                "spotify:track:abc",
                "Bohemian Rhapsody",
                "Queen",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let track = client
            .resolve("Bohemian Rhapsody", "Queen")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(track.uri, "spotify:track:abc");
        assert_eq!(track.display_name, "Bohemian Rhapsody");
        assert_eq!(track.artist_name, "Queen");
        assert_eq!(track.album_art_url.as_deref(), Some("https://img/large.jpg"));
        assert_eq!(track.preview_locator.as_deref(), Some("https://preview/1.mp3"));
        assert_eq!(track.duration_ms, Some(354000));
    }

    #[tokio::test]
    async fn test_broadened_query_fallback() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "track:Hotel California artist:The Eagles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Hotel California The Eagles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(track_page(
                "spotify:track:hc",
                "Hotel California - 2013 Remaster",
                "Eagles",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let track = client
            .resolve("Hotel California", "The Eagles")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(track.uri, "spotify:track:hc");
        assert_eq!(track.artist_name, "Eagles");
    }

    #[tokio::test]
    async fn test_no_match() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
            .expect(2)
            .mount(&server)
            .await;

        assert!(client.resolve("Nope", "Nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sparse_item() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tracks": { "items": [{ "uri": "spotify:track:x", "name": "X", "artists": [] }] }
            })))
            .mount(&server)
            .await;

        let track = client.resolve("X", "Y").await.unwrap().unwrap();
        assert_eq!(track.artist_name, "");
        assert!(track.album_art_url.is_none());
        assert!(track.preview_locator.is_none());
        assert!(track.duration_ms.is_none());
    }

    #[tokio::test]
    async fn test_service_error() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(matches!(
            client.resolve("A", "B").await,
            Err(CatalogError::ServiceError(_))
        ));
    }
}
