//! JSON shapes of the queue API and their conversion into core types.

use archivist_core::{AggregationBucket, Pagination, QueueItem, QueuePage, QueueStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ApiError, FailureKind};

#[derive(Debug, Deserialize)]
struct QueueResponse {
    #[serde(default)]
    data: Vec<WireItem>,
    paginate: WirePagination,
}

#[derive(Debug, Deserialize)]
struct WireItem {
    channel_id: String,
    #[serde(default)]
    channel_name: String,
    #[serde(default)]
    channel_indexed: bool,
    youtube_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    duration: String,
    published: Option<String>,
    timestamp: Option<i64>,
    status: String,
    #[serde(default)]
    vid_type: String,
    #[serde(default)]
    auto_start: bool,
    message: Option<String>,
    #[serde(default)]
    vid_thumb_url: String,
    #[serde(rename = "_index", default)]
    index: String,
    #[serde(rename = "_score", default)]
    score: f64,
}

#[derive(Debug, Deserialize)]
struct WirePagination {
    page_size: u32,
    total_hits: u64,
    // The server sends `false` when there is no further page.
    #[serde(default)]
    last_page: Value,
}

#[derive(Debug, Deserialize)]
struct AggregatesResponse {
    buckets: Vec<WireBucket>,
}

#[derive(Debug, Deserialize)]
struct WireBucket {
    key: Vec<String>,
    #[serde(default)]
    key_as_string: String,
    doc_count: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmitBody<'a> {
    pub data: Vec<SubmitEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmitEntry<'a> {
    pub youtube_id: &'a str,
    pub status: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatusBody<'a> {
    pub status: &'a str,
}

fn malformed(err: impl std::fmt::Display) -> ApiError {
    ApiError::new(FailureKind::MalformedResponse, err.to_string())
}

pub(crate) fn parse_queue_page(body: &[u8]) -> Result<QueuePage, ApiError> {
    let response: QueueResponse = serde_json::from_slice(body).map_err(malformed)?;
    let items = response.data.into_iter().map(QueueItem::from).collect();
    let pagination = Pagination {
        page_size: response.paginate.page_size,
        total_hits: response.paginate.total_hits,
        last_page: response
            .paginate
            .last_page
            .as_u64()
            .and_then(|page| u32::try_from(page).ok()),
    };
    Ok(QueuePage { items, pagination })
}

pub(crate) fn parse_buckets(body: &[u8]) -> Result<Vec<AggregationBucket>, ApiError> {
    let response: AggregatesResponse = serde_json::from_slice(body).map_err(malformed)?;
    response
        .buckets
        .into_iter()
        .map(|bucket| {
            let mut key = bucket.key.into_iter();
            let channel_id = key
                .next()
                .ok_or_else(|| malformed("aggregation bucket without key"))?;
            let channel_name = key.next().unwrap_or(bucket.key_as_string);
            Ok(AggregationBucket {
                channel_id,
                channel_name,
                count: bucket.doc_count,
            })
        })
        .collect()
}

impl From<WireItem> for QueueItem {
    fn from(item: WireItem) -> Self {
        QueueItem {
            channel_id: item.channel_id,
            channel_name: item.channel_name,
            channel_indexed: item.channel_indexed,
            youtube_id: item.youtube_id,
            title: item.title,
            duration: item.duration,
            published: item.published,
            timestamp: item.timestamp,
            status: QueueStatus::parse(&item.status),
            vid_type: item.vid_type,
            auto_start: item.auto_start,
            message: item.message,
            thumbnail_url: item.vid_thumb_url,
            index: item.index,
            score: item.score,
        }
    }
}
