use std::time::Duration;

use archivist_core::{
    AggregationBucket, BulkFilter, QueuePage, QueueQuery, QueueStatus, StatusScope,
};
use archivist_logging::archivist_debug;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::Serialize;

use crate::wire::{parse_buckets, parse_queue_page, StatusBody, SubmitBody, SubmitEntry};
use crate::{ApiError, FailureKind};

const QUEUE_PATH: &str = "api/download/";
const AGGS_PATH: &str = "api/download/aggs/";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    /// Sent as `Authorization: Token <token>` when present.
    pub api_token: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_token: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The queue endpoints of the archive server.
#[async_trait::async_trait]
pub trait QueueApi: Send + Sync {
    async fn load_queue(&self, query: &QueueQuery) -> Result<QueuePage, ApiError>;

    async fn load_aggregates(&self, scope: StatusScope)
        -> Result<Vec<AggregationBucket>, ApiError>;

    async fn submit_url(&self, text: &str, auto_start: bool, priority: bool)
        -> Result<(), ApiError>;

    async fn update_by_filter(
        &self,
        filter: &BulkFilter,
        status: &QueueStatus,
    ) -> Result<(), ApiError>;

    async fn delete_by_filter(&self, filter: &BulkFilter) -> Result<(), ApiError>;

    async fn update_item(&self, youtube_id: &str, status: &QueueStatus) -> Result<(), ApiError>;

    async fn delete_item(&self, youtube_id: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestQueueApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestQueueApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}/{}", self.settings.base_url.trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    fn item_endpoint(&self, youtube_id: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint(QUEUE_PATH)?;
        url.path_segments_mut()
            .map_err(|_| ApiError::new(FailureKind::InvalidUrl, "base url cannot hold a path"))?
            .pop_if_empty()
            .push(youtube_id)
            .push("");
        Ok(url)
    }

    fn filtered_endpoint(&self, filter: &BulkFilter) -> Result<Url, ApiError> {
        let mut url = self.endpoint(QUEUE_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("filter", filter.scope.as_str());
            if let Some(channel_id) = &filter.channel_id {
                pairs.append_pair("channel", channel_id);
            }
            if let Some(vid_type) = &filter.vid_type {
                pairs.append_pair("vid_type", vid_type);
            }
            if let Some(error) = filter.error {
                pairs.append_pair("error", if error { "true" } else { "false" });
            }
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, ApiError> {
        archivist_debug!("{} {}", method, url);
        let mut request = self.client.request(method, url);
        if let Some(token) = &self.settings.api_token {
            request = request.header(AUTHORIZATION, format!("Token {token}"));
        }
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(bytes.to_vec())
    }

    async fn send_json(
        &self,
        method: Method,
        url: Url,
        body: &impl Serialize,
    ) -> Result<Vec<u8>, ApiError> {
        let body = serde_json::to_vec(body)
            .map_err(|err| ApiError::new(FailureKind::InvalidRequest, err.to_string()))?;
        self.send(method, url, Some(body)).await
    }
}

#[async_trait::async_trait]
impl QueueApi for ReqwestQueueApi {
    async fn load_queue(&self, query: &QueueQuery) -> Result<QueuePage, ApiError> {
        let mut url = self.endpoint(QUEUE_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &query.page.to_string());
            pairs.append_pair("filter", query.scope().as_str());
            if let Some(channel_id) = &query.channel_id {
                pairs.append_pair("channel", channel_id);
            }
            if let Some(vid_type) = &query.vid_type {
                pairs.append_pair("vid_type", vid_type);
            }
            if let Some(error) = query.error {
                pairs.append_pair("error", if error { "true" } else { "false" });
            }
            if !query.search.is_empty() {
                pairs.append_pair("q", &query.search);
            }
        }
        let body = self.send(Method::GET, url, None).await?;
        parse_queue_page(&body)
    }

    async fn load_aggregates(
        &self,
        scope: StatusScope,
    ) -> Result<Vec<AggregationBucket>, ApiError> {
        let mut url = self.endpoint(AGGS_PATH)?;
        url.query_pairs_mut().append_pair("filter", scope.as_str());
        let body = self.send(Method::GET, url, None).await?;
        parse_buckets(&body)
    }

    async fn submit_url(
        &self,
        text: &str,
        auto_start: bool,
        priority: bool,
    ) -> Result<(), ApiError> {
        let mut url = self.endpoint(QUEUE_PATH)?;
        if auto_start {
            url.query_pairs_mut().append_pair("autostart", "true");
        }
        let status = if priority {
            QueueStatus::Priority
        } else {
            QueueStatus::Pending
        };
        let body = SubmitBody {
            data: vec![SubmitEntry {
                youtube_id: text,
                status: status.as_str(),
            }],
        };
        self.send_json(Method::POST, url, &body).await?;
        Ok(())
    }

    async fn update_by_filter(
        &self,
        filter: &BulkFilter,
        status: &QueueStatus,
    ) -> Result<(), ApiError> {
        let url = self.filtered_endpoint(filter)?;
        let body = StatusBody {
            status: status.as_str(),
        };
        self.send_json(Method::PATCH, url, &body).await?;
        Ok(())
    }

    async fn delete_by_filter(&self, filter: &BulkFilter) -> Result<(), ApiError> {
        let url = self.filtered_endpoint(filter)?;
        self.send(Method::DELETE, url, None).await?;
        Ok(())
    }

    async fn update_item(&self, youtube_id: &str, status: &QueueStatus) -> Result<(), ApiError> {
        let url = self.item_endpoint(youtube_id)?;
        let body = StatusBody {
            status: status.as_str(),
        };
        self.send_json(Method::POST, url, &body).await?;
        Ok(())
    }

    async fn delete_item(&self, youtube_id: &str) -> Result<(), ApiError> {
        let url = self.item_endpoint(youtube_id)?;
        self.send(Method::DELETE, url, None).await?;
        Ok(())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return ApiError::new(FailureKind::InvalidUrl, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::MalformedResponse, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
