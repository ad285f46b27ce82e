//! HTTP adapter for the posting backend.
//!
//! Wraps the two endpoints the calendar consumes: the weekly window fetch
//! and the per-platform scheduled-post cancellation. Transient failures
//! (network errors, 429, 5xx) are retried with bounded exponential backoff;
//! everything else is surfaced to the caller as a typed error, never a
//! panic.

use chrono::NaiveDate;
use reqwest::Client;

use crate::calendar::grid::date_key;
use crate::config::{Config, FetchRetryConfig};
use crate::error::{AppError, AppResult};
use crate::models::{CancelPostRequest, CancelPostResponse, ScheduledItem, WeeklyPostsResponse};

#[derive(Debug, Clone)]
pub struct PostingApiService {
    client: Client,
    base_url: String,
    retry: FetchRetryConfig,
}

impl PostingApiService {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(
                config.backend.request_timeout_seconds,
            ))
            .build()
            .map_err(|e| AppError::Internal(e.into()))?;

        Ok(Self {
            client,
            base_url: config.backend.base_url.trim_end_matches('/').to_string(),
            retry: config.fetch_retry.clone(),
        })
    }

    /// Fetch the scheduled/posted items for the window starting at `anchor`
    /// (the Monday of the desired week, or the first of the month for month
    /// view).
    pub async fn fetch_weekly(
        &self,
        user_id: &str,
        anchor: NaiveDate,
    ) -> AppResult<Vec<ScheduledItem>> {
        if user_id.is_empty() {
            return Err(AppError::Validation("user id must not be empty".to_string()));
        }

        let url = self.weekly_url(user_id, anchor);
        let response = self
            .send_with_backoff(|| self.client.get(&url))
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::PostingApi(format!(
                "Failed to fetch weekly posts: {}",
                error_text
            )));
        }

        let weekly: WeeklyPostsResponse = response
            .json()
            .await
            .map_err(|e| AppError::PostingApi(format!("Failed to parse weekly response: {}", e)))?;

        Ok(weekly.data)
    }

    /// Request cancellation of a scheduled post. The backend routes deletes
    /// per platform, but callers see a single cancel operation.
    pub async fn cancel_scheduled(&self, user_id: &str, item: &ScheduledItem) -> AppResult<()> {
        if user_id.is_empty() {
            return Err(AppError::Validation("user id must not be empty".to_string()));
        }

        let url = self.cancel_url(item.platform.as_str());
        let request = CancelPostRequest {
            post_id: &item.id,
            user_id,
        };

        let response = self
            .send_with_backoff(|| self.client.delete(&url).json(&request))
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::PostingApi(format!(
                "Failed to cancel post {}: {}",
                item.id, error_text
            )));
        }

        let result: CancelPostResponse = response
            .json()
            .await
            .map_err(|e| AppError::PostingApi(format!("Failed to parse cancel response: {}", e)))?;

        if !result.success {
            return Err(AppError::PostingApi(
                result
                    .error
                    .unwrap_or_else(|| format!("Backend refused to cancel post {}", item.id)),
            ));
        }

        Ok(())
    }

    fn weekly_url(&self, user_id: &str, anchor: NaiveDate) -> String {
        format!(
            "{}/automation/weekly/{}?date={}",
            self.base_url,
            urlencoding::encode(user_id),
            date_key(anchor)
        )
    }

    fn cancel_url(&self, platform: &str) -> String {
        format!("{}/api/{}/post/delete", self.base_url, platform)
    }

    /// Send a request, retrying on transient failures (network errors, 429
    /// and 5xx) with exponential backoff. Respects a numeric Retry-After
    /// header when present. Non-transient statuses are returned to the
    /// caller to interpret.
    async fn send_with_backoff<F>(&self, make_request: F) -> AppResult<reqwest::Response>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut backoff_secs = self.retry.initial_backoff_seconds.max(1);

        for attempt in 0..max_attempts {
            match (make_request)().send().await {
                Ok(resp) => {
                    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS
                        || resp.status().is_server_error()
                    {
                        let mut wait_secs = backoff_secs;
                        if let Some(h) = resp.headers().get("retry-after") {
                            if let Ok(s) = h.to_str() {
                                if let Ok(parsed) = s.parse::<u64>() {
                                    wait_secs = parsed;
                                }
                            }
                        }

                        tracing::warn!(
                            "Transient backend error (status: {}). Retrying in {}s (attempt {}/{})",
                            resp.status(),
                            wait_secs,
                            attempt + 1,
                            max_attempts
                        );

                        if attempt + 1 >= max_attempts {
                            let err_text = resp.text().await.unwrap_or_default();
                            return Err(AppError::PostingApi(format!(
                                "Failed after {} attempts: {}",
                                attempt + 1,
                                err_text
                            )));
                        }

                        tokio::time::sleep(std::time::Duration::from_secs(wait_secs)).await;
                        backoff_secs =
                            std::cmp::min(backoff_secs * 2, self.retry.max_backoff_seconds);
                        continue;
                    }

                    return Ok(resp);
                }
                Err(e) => {
                    if attempt + 1 >= max_attempts {
                        return Err(e.into());
                    }
                    tracing::warn!(
                        "HTTP request failed: {}. Retrying in {}s (attempt {}/{})",
                        e,
                        backoff_secs,
                        attempt + 1,
                        max_attempts
                    );
                    tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                    backoff_secs = std::cmp::min(backoff_secs * 2, self.retry.max_backoff_seconds);
                    continue;
                }
            }
        }

        Err(AppError::PostingApi(
            "Exceeded backend retry attempts".to_string(),
        ))
    }
}
