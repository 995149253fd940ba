use std::sync::mpsc;

use archivist_core::{Effect, Msg, PreferenceStore, Severity, UserPreferences};
use archivist_engine::{ApiEvent, ApiRequest, EngineHandle, EventSink};
use archivist_logging::{archivist_error, archivist_info, archivist_warn};

use crate::app::AppEvent;

/// Forwards engine completions into the app loop as core messages.
pub struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl MsgSink {
    pub fn new(tx: mpsc::Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for MsgSink {
    fn emit(&self, event: ApiEvent) {
        let _ = self.tx.send(AppEvent::Core(Msg::from(event)));
    }
}

/// Carries out the effects returned by the core: network work goes to the
/// engine, preference writes are applied here and answered with a fresh
/// snapshot.
pub struct EffectRunner<S: PreferenceStore> {
    engine: EngineHandle,
    prefs: S,
    msg_tx: mpsc::Sender<AppEvent>,
}

impl<S: PreferenceStore> EffectRunner<S> {
    pub fn new(engine: EngineHandle, prefs: S, msg_tx: mpsc::Sender<AppEvent>) -> Self {
        Self {
            engine,
            prefs,
            msg_tx,
        }
    }

    /// Waits for the engine to finish the requests it was given.
    pub fn shutdown(self) {
        self.engine.shutdown();
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StorePreference { key, value } => match self.prefs.set(key, value) {
                    Ok(()) => {
                        archivist_info!("Stored preference {}", key);
                        let snapshot = UserPreferences::from_store(&self.prefs);
                        let _ = self
                            .msg_tx
                            .send(AppEvent::Core(Msg::PreferencesChanged(snapshot)));
                    }
                    Err(err) => {
                        archivist_error!("Could not store preference {}: {}", key, err);
                        let _ = self
                            .msg_tx
                            .send(AppEvent::Warning(format!("Preference not saved: {err}")));
                    }
                },
                Effect::Notify(notification) => match notification.severity {
                    Severity::Error => archivist_warn!("Notify: {}", notification.message),
                    Severity::Info => archivist_info!("Notify: {}", notification.message),
                },
                other => {
                    if let Some(request) = ApiRequest::from_effect(other) {
                        self.engine.submit(request);
                    }
                }
            }
        }
    }
}
