use crate::domain::model::{GroupResource, Member, MemberPage};
use crate::domain::ports::DirectoryApi;
use crate::utils::error::{ExportError, Result};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

/// Error body shape returned by the Okta API.
#[derive(Debug, Deserialize)]
struct OktaErrorBody {
    #[serde(rename = "errorCode", default)]
    error_code: Option<String>,
    #[serde(rename = "errorSummary", default)]
    error_summary: Option<String>,
}

/// HTTP client for the Okta REST API. One blocking-style request at a time;
/// no retries, the provider's answer is final.
#[derive(Debug, Clone)]
pub struct OktaClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl OktaClient {
    pub fn new(org_url: &str, token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: org_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET with the SSWS token header, mapping non-success statuses onto the
    /// error taxonomy. A 401/403 is reported as an auth failure distinct
    /// from other API errors.
    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        tracing::debug!("📡 GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("SSWS {}", self.token))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("📡 response status: {}", status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ExportError::AuthError {
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OktaErrorBody>(&body)
                .ok()
                .and_then(|e| match (e.error_code, e.error_summary) {
                    (Some(code), Some(summary)) => Some(format!("{}: {}", code, summary)),
                    (_, Some(summary)) => Some(summary),
                    _ => None,
                })
                .unwrap_or(body);

            return Err(ExportError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

/// Extract the `rel="next"` URL from `Link` response headers. Okta sends one
/// Link header per relation, but combined comma-separated values are handled
/// too.
pub fn parse_next_link(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all("link") {
        let Ok(value) = value.to_str() else {
            continue;
        };
        for part in value.split(", <") {
            if !part.contains("rel=\"next\"") {
                continue;
            }
            let start = part.find('<').map(|i| i + 1).unwrap_or(0);
            let end = part[start..].find('>')? + start;
            return Some(part[start..end].to_string());
        }
    }
    None
}

#[async_trait]
impl DirectoryApi for OktaClient {
    async fn get_group(&self, group_id: &str) -> Result<GroupResource> {
        let url = format!("{}/api/v1/groups/{}", self.base_url, group_id);
        let response = self.get(&url).await?;
        Ok(response.json().await?)
    }

    async fn search_groups(&self, query: &str, limit: usize) -> Result<Vec<GroupResource>> {
        let url = format!("{}/api/v1/groups", self.base_url);
        let limit = limit.to_string();
        let request = self
            .client
            .get(&url)
            .query(&[("q", query), ("limit", limit.as_str())])
            .header("Authorization", format!("SSWS {}", self.token))
            .header("Accept", "application/json");

        tracing::debug!("📡 GET {} q={:?} limit={}", url, query, limit);
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ExportError::AuthError {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExportError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    fn members_url(&self, group_id: &str, limit: usize) -> String {
        format!(
            "{}/api/v1/groups/{}/users?limit={}",
            self.base_url, group_id, limit
        )
    }

    async fn fetch_members_page(&self, url: &str) -> Result<MemberPage> {
        let response = self.get(url).await?;
        let next_page = parse_next_link(response.headers());
        let members: Vec<Member> = response.json().await?;

        Ok(MemberPage { members, next_page })
    }
}
