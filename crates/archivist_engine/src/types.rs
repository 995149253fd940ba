use std::fmt;

use archivist_core::{
    AggregationBucket, BulkFilter, Effect, FetchTicket, Msg, MutationKind, QueuePage, QueueQuery,
    QueueStatus, RequestFailure, StatusScope,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    /// The request body could not be encoded.
    InvalidRequest,
    HttpStatus(u16),
    Timeout,
    Network,
    /// The body did not have the expected shape.
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

impl From<ApiError> for RequestFailure {
    fn from(err: ApiError) -> Self {
        RequestFailure::new(err.to_string())
    }
}

/// Work the engine performs against the queue API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    LoadQueue {
        ticket: FetchTicket,
        query: QueueQuery,
    },
    LoadAggregates {
        scope: StatusScope,
    },
    SubmitUrl {
        text: String,
        auto_start: bool,
        priority: bool,
    },
    UpdateByFilter {
        filter: BulkFilter,
        status: QueueStatus,
    },
    DeleteByFilter {
        filter: BulkFilter,
    },
    UpdateItem {
        youtube_id: String,
        status: QueueStatus,
    },
    DeleteItem {
        youtube_id: String,
    },
}

impl ApiRequest {
    /// The request an effect stands for; `None` for effects handled locally.
    pub fn from_effect(effect: Effect) -> Option<Self> {
        let request = match effect {
            Effect::LoadQueue { ticket, query } => ApiRequest::LoadQueue { ticket, query },
            Effect::LoadAggregates { scope } => ApiRequest::LoadAggregates { scope },
            Effect::SubmitUrl {
                text,
                auto_start,
                priority,
            } => ApiRequest::SubmitUrl {
                text,
                auto_start,
                priority,
            },
            Effect::UpdateQueueByFilter { filter, status } => {
                ApiRequest::UpdateByFilter { filter, status }
            }
            Effect::DeleteQueueByFilter { filter } => ApiRequest::DeleteByFilter { filter },
            Effect::UpdateItem { youtube_id, status } => {
                ApiRequest::UpdateItem { youtube_id, status }
            }
            Effect::DeleteItem { youtube_id } => ApiRequest::DeleteItem { youtube_id },
            Effect::StorePreference { .. } | Effect::Notify(_) => return None,
        };
        Some(request)
    }
}

/// Completion of one [`ApiRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEvent {
    QueueLoaded {
        ticket: FetchTicket,
        result: Result<QueuePage, ApiError>,
    },
    AggregatesLoaded {
        scope: StatusScope,
        result: Result<Vec<AggregationBucket>, ApiError>,
    },
    UrlSubmitted {
        text: String,
        result: Result<(), ApiError>,
    },
    MutationFinished {
        kind: MutationKind,
        result: Result<(), ApiError>,
    },
}

impl From<ApiEvent> for Msg {
    fn from(event: ApiEvent) -> Self {
        match event {
            ApiEvent::QueueLoaded { ticket, result } => Msg::QueueLoaded {
                ticket,
                result: result.map_err(RequestFailure::from),
            },
            ApiEvent::AggregatesLoaded { scope, result } => Msg::AggregatesLoaded {
                scope,
                result: result.map_err(RequestFailure::from),
            },
            ApiEvent::UrlSubmitted { text, result } => Msg::UrlSubmitted {
                text,
                result: result.map_err(RequestFailure::from),
            },
            ApiEvent::MutationFinished { kind, result } => Msg::MutationFinished {
                kind,
                result: result.map_err(RequestFailure::from),
            },
        }
    }
}
