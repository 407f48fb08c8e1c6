use crate::config::Config;
use crate::error::StatsError;
use crate::stats::{Contributor, PullRequest};
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, warn};

const USER_AGENT_VALUE: &str = "hacktoberfest-stats";

/// Items per page the REST API returns when `per_page` is not given.
pub const DEFAULT_PAGE_SIZE: usize = 30;

/// A full default page means the API probably cut the list off.
pub fn is_full_page(len: usize) -> bool {
    len == DEFAULT_PAGE_SIZE
}

#[derive(Clone)]
pub struct GithubClient {
    token: Option<Arc<String>>,
    api_base: Arc<String>,
    http: Arc<Client>,
}

impl GithubClient {
    /// Create a REST client from the run configuration. No token is fine:
    /// requests then go out unauthenticated with the lower rate limit.
    pub fn new(config: &Config) -> Self {
        Self {
            token: config.token.clone().map(Arc::new),
            api_base: Arc::new(config.api_base.clone()),
            http: Arc::new(Client::new()),
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Single GET returning a decoded JSON array.
    ///
    /// Only the first page is read; anything beyond it is silently dropped
    /// by the API. The status must be exactly 200 before the body is touched.
    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, StatsError> {
        let url = format!("{}{}", self.api_base, path);

        let mut req = self
            .http
            .get(&url)
            .query(query)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(ACCEPT, "application/vnd.github+json");

        if let Some(token) = &self.token {
            req = req.header(AUTHORIZATION, format!("token {}", token));
        }

        debug!("GET {url}");
        let resp = req.send().await.map_err(|source| StatsError::Request {
            url: url.clone(),
            source,
        })?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(StatsError::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(|source| StatsError::Request {
            url: url.clone(),
            source,
        })?;

        let items: Vec<T> =
            serde_json::from_str(&body).map_err(|source| StatsError::Decode {
                url: url.clone(),
                source,
            })?;

        if is_full_page(items.len()) {
            warn!(
                "{url} returned a full page of {DEFAULT_PAGE_SIZE} items; later pages are not fetched"
            );
        }

        Ok(items)
    }

    /// Contributors in API order (descending contribution count).
    pub async fn fetch_contributors(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<Contributor>, StatsError> {
        let contributors: Vec<Contributor> = self
            .get_list(&format!("/repos/{owner}/{repo}/contributors"), &[])
            .await?;
        info!("Fetched {} contributors for {owner}/{repo}", contributors.len());
        Ok(contributors)
    }

    /// Open and closed pull requests (`state=all`) in API order.
    pub async fn fetch_pull_requests(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<PullRequest>, StatsError> {
        let prs: Vec<PullRequest> = self
            .get_list(&format!("/repos/{owner}/{repo}/pulls"), &[("state", "all")])
            .await?;
        info!("Fetched {} pull requests for {owner}/{repo}", prs.len());
        Ok(prs)
    }
}
