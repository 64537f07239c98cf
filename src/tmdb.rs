use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::env;
use std::time::Duration;

const TMDB_BASE: &str = "https://api.themoviedb.org/3";
pub const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// Lightweight listing record, as returned by the listing endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Full record for one title. TMDB sends the same listing fields plus
/// runtime, genres and the original language code.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieDetail {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub original_language: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoviePage {
    pub page: u32,
    pub results: Vec<MovieSummary>,
    pub total_pages: u32,
    pub total_results: u32,
}

#[async_trait]
pub trait TmdbApi: Send + Sync {
    async fn fetch_now_playing(&self) -> Result<MoviePage>;
    async fn fetch_popular(&self) -> Result<MoviePage>;
    async fn fetch_top_rated(&self) -> Result<MoviePage>;
    async fn fetch_movie(&self, id: u64) -> Result<MovieDetail>;
}

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
}

impl TmdbClient {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("TMDB_API_KEY").context("TMDB_API_KEY not set")?;
        Self::new(api_key)
    }

    pub fn new(api_key: String) -> Result<Self> {
        let user_agent = format!("cineshelf/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()
            .context("Failed to build TMDB HTTP client")?;
        Ok(Self { client, api_key })
    }

    async fn fetch_listing(&self, path: &str) -> Result<MoviePage> {
        let url = format!(
            "{TMDB_BASE}/movie/{path}?language=en-US&page=1&api_key={}",
            self.api_key
        );
        self.get_json(&url).await
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .context("request failed")?;
        let status = res.status();
        let text = res.text().await.context("reading body failed")?;
        if !status.is_success() {
            return Err(anyhow!("TMDB returned {}: {}", status, text));
        }
        let parsed: T = serde_json::from_str(&text).context("JSON parse failed")?;
        Ok(parsed)
    }
}

#[async_trait]
impl TmdbApi for TmdbClient {
    async fn fetch_now_playing(&self) -> Result<MoviePage> {
        self.fetch_listing("now_playing").await
    }

    async fn fetch_popular(&self) -> Result<MoviePage> {
        self.fetch_listing("popular").await
    }

    async fn fetch_top_rated(&self) -> Result<MoviePage> {
        self.fetch_listing("top_rated").await
    }

    async fn fetch_movie(&self, id: u64) -> Result<MovieDetail> {
        let url = format!(
            "{TMDB_BASE}/movie/{id}?language=en-US&api_key={}",
            self.api_key
        );
        self.get_json(&url).await
    }
}

pub fn parse_movie_id(input: &str) -> Option<u64> {
    if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
        return input.parse().ok();
    }
    None
}
