//! HTTP client for the Reddit OAuth API.
//!
//! Authenticates with the password grant and then pages subreddit listings
//! with the `after` cursor until the requested number of posts has been
//! gathered or the listing runs dry. The bearer token is renewed shortly
//! before it expires and whenever a listing request comes back 401.

use std::time::{Duration, Instant};

use reqwest::{header, Client, Response, StatusCode, Url};
use tokio::sync::RwLock;

use leadscout_core::{AppConfig, Credentials, Item, Ranking};

use crate::error::RedditError;
use crate::retry::retry_with_backoff;
use crate::types::{child_to_item, Listing, TokenResponse};

/// Hard stop on pages per listing query. Guards against cycling cursors.
pub const MAX_PAGES: usize = 50;

/// Assumed token lifetime when the token response omits `expires_in`.
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// Tokens are renewed this long before their reported expiry.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Connection settings for [`RedditClient`].
#[derive(Debug, Clone)]
pub struct RedditSettings {
    pub user_agent: String,
    pub timeout_secs: u64,
    pub auth_url: String,
    pub api_url: String,
    /// Posts requested per listing page (Reddit serves at most 100).
    pub page_size: usize,
    pub inter_request_delay_ms: u64,
    /// Retries per listing page on 429, 5xx, or network timeouts.
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl RedditSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            timeout_secs: config.request_timeout_secs,
            auth_url: config.reddit_auth_url.clone(),
            api_url: config.reddit_api_url.clone(),
            page_size: config.page_size,
            inter_request_delay_ms: config.inter_request_delay_ms,
            max_retries: config.reddit_max_retries,
            backoff_base_ms: config.reddit_backoff_base_ms,
        }
    }
}

struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + TOKEN_REFRESH_MARGIN < self.expires_at
    }
}

/// Reddit API client holding a bearer token.
pub struct RedditClient {
    client: Client,
    auth_url: Url,
    credentials: Credentials,
    token: RwLock<AccessToken>,
    api_url: Url,
    page_size: usize,
    inter_request_delay_ms: u64,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl RedditClient {
    /// Build the HTTP client and exchange the account credentials for a token.
    ///
    /// # Errors
    ///
    /// - [`RedditError::InvalidBaseUrl`] if either configured URL does not parse.
    /// - [`RedditError::Auth`] if Reddit refuses the credentials.
    /// - [`RedditError::Http`] on network failure.
    pub async fn connect(
        settings: &RedditSettings,
        credentials: &Credentials,
    ) -> Result<Self, RedditError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(settings.user_agent.as_str())
            .build()?;

        let auth_url = normalise_base_url(&settings.auth_url)?;
        let api_url = normalise_base_url(&settings.api_url)?;

        let token = Self::fetch_token(&client, &auth_url, credentials).await?;
        tracing::debug!(username = %credentials.reddit_username, "obtained Reddit access token");

        Ok(Self {
            client,
            auth_url,
            credentials: credentials.clone(),
            token: RwLock::new(token),
            api_url,
            page_size: settings.page_size.clamp(1, 100),
            inter_request_delay_ms: settings.inter_request_delay_ms,
            max_retries: settings.max_retries,
            backoff_base_ms: settings.backoff_base_ms,
        })
    }

    async fn fetch_token(
        client: &Client,
        auth_url: &Url,
        credentials: &Credentials,
    ) -> Result<AccessToken, RedditError> {
        let url = auth_url
            .join("api/v1/access_token")
            .map_err(|e| RedditError::InvalidBaseUrl(format!("{auth_url}: {e}")))?;

        let response = client
            .post(url.clone())
            .basic_auth(
                &credentials.reddit_client_id,
                Some(&credentials.reddit_client_secret),
            )
            .form(&[
                ("grant_type", "password"),
                ("username", credentials.reddit_username.as_str()),
                ("password", credentials.reddit_password.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RedditError::Auth(format!(
                "token exchange failed with status {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| RedditError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        let ttl_secs = token
            .expires_in
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS)
            .min(DEFAULT_TOKEN_TTL_SECS * 24);
        let ttl = Duration::from_secs(ttl_secs);
        match (token.access_token, token.error) {
            (Some(access_token), None) if !access_token.is_empty() => Ok(AccessToken {
                value: access_token,
                expires_at: Instant::now() + ttl,
            }),
            (_, Some(error)) => Err(RedditError::Auth(error)),
            _ => Err(RedditError::Auth("no access token in response".to_string())),
        }
    }

    /// Current bearer token, renewed first if it is about to expire.
    async fn bearer(&self) -> Result<String, RedditError> {
        let stale = {
            let token = self.token.read().await;
            if token.is_fresh() {
                return Ok(token.value.clone());
            }
            token.value.clone()
        };
        self.refresh_token(&stale).await
    }

    /// Replace `stale` with a new token. A concurrent caller that already
    /// swapped it out wins and its token is reused.
    async fn refresh_token(&self, stale: &str) -> Result<String, RedditError> {
        let mut token = self.token.write().await;
        if token.value != stale && token.is_fresh() {
            return Ok(token.value.clone());
        }
        *token = Self::fetch_token(&self.client, &self.auth_url, &self.credentials).await?;
        tracing::debug!(
            username = %self.credentials.reddit_username,
            "refreshed Reddit access token"
        );
        Ok(token.value.clone())
    }

    /// Fetch up to `limit` posts from one ranking of a subreddit, in the
    /// API's native order.
    ///
    /// Children that fail to convert are skipped and never count toward
    /// `limit`.
    ///
    /// # Errors
    ///
    /// Returns the first page error that survives retries; posts from
    /// earlier pages are discarded so a failed ranking contributes nothing.
    pub async fn fetch_listing(
        &self,
        source: &str,
        ranking: Ranking,
        limit: usize,
    ) -> Result<Vec<Item>, RedditError> {
        let mut items: Vec<Item> = Vec::new();
        let mut after: Option<String> = None;
        let mut skipped = 0usize;
        let mut page_count = 0usize;

        while items.len() < limit {
            page_count += 1;
            if page_count > MAX_PAGES {
                tracing::warn!(
                    source,
                    %ranking,
                    max_pages = MAX_PAGES,
                    "listing page limit reached"
                );
                break;
            }

            if page_count > 1 && self.inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.inter_request_delay_ms)).await;
            }

            let page_limit = self.page_size.min(limit - items.len());
            let listing = self
                .fetch_page(source, ranking, page_limit, after.as_deref())
                .await?;

            let child_count = listing.data.children.len();
            for child in listing.data.children {
                match child_to_item(child, source) {
                    Some(item) => items.push(item),
                    None => skipped += 1,
                }
                if items.len() >= limit {
                    break;
                }
            }

            tracing::debug!(
                source,
                %ranking,
                page = page_count,
                children = child_count,
                total = items.len(),
                "fetched listing page"
            );

            after = listing.data.after;
            if after.is_none() || child_count == 0 {
                break;
            }
        }

        if skipped > 0 {
            tracing::debug!(source, %ranking, skipped, "skipped malformed posts");
        }

        Ok(items)
    }

    async fn fetch_page(
        &self,
        source: &str,
        ranking: Ranking,
        limit: usize,
        after: Option<&str>,
    ) -> Result<Listing, RedditError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, move || {
            self.fetch_page_once(source, ranking, limit, after)
        })
        .await
    }

    async fn fetch_page_once(
        &self,
        source: &str,
        ranking: Ranking,
        limit: usize,
        after: Option<&str>,
    ) -> Result<Listing, RedditError> {
        let url = self.listing_url(source, ranking)?;

        let mut params: Vec<(&str, String)> = vec![
            ("limit", limit.to_string()),
            ("raw_json", "1".to_string()),
        ];
        if ranking == Ranking::TopAllTime {
            params.push(("t", "all".to_string()));
        }
        if let Some(cursor) = after {
            params.push(("after", cursor.to_string()));
        }

        let token = self.bearer().await?;
        let mut response = self.send_page(&url, &params, &token).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::info!(source, %ranking, "Reddit rejected the access token, re-authenticating");
            let token = self.refresh_token(&token).await?;
            response = self.send_page(&url, &params, &token).await?;
        }

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            return Err(RedditError::RateLimited {
                url: url.to_string(),
                retry_after_secs,
            });
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(RedditError::Auth(format!(
                "listing request to {url} unauthorized after token refresh"
            )));
        }
        if !status.is_success() {
            return Err(RedditError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| RedditError::Deserialize {
            context: format!("r/{source}/{}", ranking.listing_path()),
            source: e,
        })
    }

    async fn send_page(
        &self,
        url: &Url,
        params: &[(&str, String)],
        token: &str,
    ) -> Result<Response, RedditError> {
        Ok(self
            .client
            .get(url.clone())
            .bearer_auth(token)
            .query(params)
            .send()
            .await?)
    }

    /// `{api}/r/{source}/{new|top|hot}`
    fn listing_url(&self, source: &str, ranking: Ranking) -> Result<Url, RedditError> {
        self.api_url
            .join(&format!("r/{source}/{}", ranking.listing_path()))
            .map_err(|e| RedditError::InvalidBaseUrl(format!("{}: {e}", self.api_url)))
    }
}

impl crate::collector::ContentSource for RedditClient {
    async fn fetch_ranked(
        &self,
        source: &str,
        ranking: Ranking,
        limit: usize,
    ) -> Result<Vec<Item>, RedditError> {
        self.fetch_listing(source, ranking, limit).await
    }
}

/// Ensure the base URL ends with exactly one slash so `Url::join` appends
/// rather than replacing the last path segment.
fn normalise_base_url(base_url: &str) -> Result<Url, RedditError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| RedditError::InvalidBaseUrl(format!("{base_url}: {e}")))
}
