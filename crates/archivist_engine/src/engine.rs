use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use archivist_core::MutationKind;
use archivist_logging::{archivist_debug, archivist_warn};
use tokio::runtime::Runtime;
use tokio::task::JoinSet;

use crate::{ApiEvent, ApiRequest, QueueApi};

/// Receives engine completions, on the engine's worker threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ApiEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<ApiEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<ApiEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ApiEvent) {
        let _ = self.tx.send(event);
    }
}

/// How long shutdown waits for requests that are still running.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Runs [`ApiRequest`]s concurrently on a private tokio runtime and reports
/// each completion to the sink. Requests are never cancelled: shutting down
/// (or dropping the handle) waits up to [`SHUTDOWN_GRACE`] for the ones in
/// flight.
pub struct EngineHandle {
    cmd_tx: Option<mpsc::Sender<ApiRequest>>,
    dispatcher: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    pub fn start(api: Arc<dyn QueueApi>, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        Self::start_with_grace(api, sink, SHUTDOWN_GRACE)
    }

    pub fn start_with_grace(
        api: Arc<dyn QueueApi>,
        sink: Arc<dyn EventSink>,
        grace: Duration,
    ) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("archivist-engine")
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel::<ApiRequest>();

        let dispatcher = thread::Builder::new()
            .name("archivist-engine-dispatch".to_string())
            .spawn(move || {
                let mut tasks = JoinSet::new();
                while let Ok(request) = cmd_rx.recv() {
                    while tasks.try_join_next().is_some() {}
                    let api = api.clone();
                    let sink = sink.clone();
                    tasks.spawn_on(
                        async move {
                            let event = execute(api.as_ref(), request).await;
                            sink.emit(event);
                        },
                        runtime.handle(),
                    );
                }
                archivist_debug!(
                    "Engine command channel closed, {} requests running",
                    tasks.len()
                );
                drain(&runtime, tasks, grace);
                runtime.shutdown_timeout(grace);
            })?;

        Ok(Self {
            cmd_tx: Some(cmd_tx),
            dispatcher: Some(dispatcher),
        })
    }

    pub fn submit(&self, request: ApiRequest) {
        let sent = match &self.cmd_tx {
            Some(tx) => tx.send(request).is_ok(),
            None => false,
        };
        if !sent {
            archivist_warn!("Engine stopped; request dropped");
        }
    }

    /// Stops accepting requests and blocks until the running ones finished
    /// or the grace period ran out.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.cmd_tx.take();
        if let Some(dispatcher) = self.dispatcher.take() {
            if dispatcher.join().is_err() {
                archivist_warn!("Engine dispatch thread panicked");
            }
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

fn drain(runtime: &Runtime, mut tasks: JoinSet<()>, grace: Duration) {
    if tasks.is_empty() {
        return;
    }
    let finished = runtime.block_on(async {
        tokio::time::timeout(grace, async {
            while tasks.join_next().await.is_some() {}
        })
        .await
    });
    if finished.is_err() {
        archivist_warn!("Abandoning {} requests after {:?}", tasks.len(), grace);
    }
}

async fn execute(api: &dyn QueueApi, request: ApiRequest) -> ApiEvent {
    match request {
        ApiRequest::LoadQueue { ticket, query } => ApiEvent::QueueLoaded {
            ticket,
            result: api.load_queue(&query).await,
        },
        ApiRequest::LoadAggregates { scope } => ApiEvent::AggregatesLoaded {
            scope,
            result: api.load_aggregates(scope).await,
        },
        ApiRequest::SubmitUrl {
            text,
            auto_start,
            priority,
        } => {
            let result = api.submit_url(&text, auto_start, priority).await;
            ApiEvent::UrlSubmitted { text, result }
        }
        ApiRequest::UpdateByFilter { filter, status } => ApiEvent::MutationFinished {
            kind: MutationKind::BulkUpdate,
            result: api.update_by_filter(&filter, &status).await,
        },
        ApiRequest::DeleteByFilter { filter } => ApiEvent::MutationFinished {
            kind: MutationKind::BulkDelete,
            result: api.delete_by_filter(&filter).await,
        },
        ApiRequest::UpdateItem { youtube_id, status } => ApiEvent::MutationFinished {
            kind: MutationKind::ItemUpdate,
            result: api.update_item(&youtube_id, &status).await,
        },
        ApiRequest::DeleteItem { youtube_id } => ApiEvent::MutationFinished {
            kind: MutationKind::ItemDelete,
            result: api.delete_item(&youtube_id).await,
        },
    }
}
