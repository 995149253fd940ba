//! Archivist engine: queue API client, request execution and preference
//! persistence.
mod api;
mod engine;
mod prefs_store;
mod types;
mod wire;

pub use api::{ApiSettings, QueueApi, ReqwestQueueApi};
pub use engine::{ChannelEventSink, EngineHandle, EventSink, SHUTDOWN_GRACE};
pub use prefs_store::{FilePreferenceStore, PersistError};
pub use types::{ApiError, ApiEvent, ApiRequest, FailureKind};
