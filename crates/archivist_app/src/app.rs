use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use archivist_core::{update_batch, LocationQuery, Msg, UserPreferences, ViewState};
use archivist_engine::{EngineHandle, FilePreferenceStore, ReqwestQueueApi};
use archivist_logging::{archivist_debug, archivist_info, set_sync_cycle};

use crate::commands::{parse_command, Command, HELP};
use crate::config::AppConfig;
use crate::effects::{EffectRunner, MsgSink};
use crate::render::render;

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Core(Msg),
    /// Printed as-is; not part of the view state.
    Warning(String),
    Help,
    Quit,
}

pub fn run(config: AppConfig, location: LocationQuery) -> anyhow::Result<()> {
    let prefs = FilePreferenceStore::open(&config.preferences_path).with_context(|| {
        format!(
            "opening preference file {}",
            config.preferences_path.display()
        )
    })?;
    let initial_prefs = UserPreferences::from_store(&prefs);

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let api = ReqwestQueueApi::new(config.api_settings()).context("building HTTP client")?;
    let engine = EngineHandle::start(Arc::new(api), Arc::new(MsgSink::new(event_tx.clone())))
        .context("starting request engine")?;
    let mut runner = EffectRunner::new(engine, prefs, event_tx.clone());

    spawn_stdin_reader(event_tx.clone())?;
    archivist_info!("Watching download queue at {}", config.server.base_url);

    // Mount.
    let _ = event_tx.send(AppEvent::Core(Msg::Tick));

    let mut state = ViewState::new(location, initial_prefs);
    let mut cycle = 0u64;
    while let Ok(first) = event_rx.recv() {
        let mut batch = Vec::new();
        let mut quit = false;
        for event in std::iter::once(first).chain(event_rx.try_iter()) {
            match event {
                AppEvent::Core(msg) => batch.push(msg),
                AppEvent::Warning(text) => eprintln!("{text}"),
                AppEvent::Help => println!("{HELP}"),
                AppEvent::Quit => quit = true,
            }
        }

        if !batch.is_empty() {
            cycle += 1;
            set_sync_cycle(cycle);
            archivist_debug!("Applying {} messages", batch.len());
            let (next, effects) = update_batch(state, batch);
            state = next;
            runner.run(effects);
            if state.consume_dirty() {
                print!("{}", render(&state.view()));
                let _ = io::stdout().flush();
            }
        }
        if quit {
            break;
        }
    }
    archivist_info!("Shutting down after {} cycles", cycle);
    // Requests already handed to the engine still reach the server.
    runner.shutdown();
    Ok(())
}

fn spawn_stdin_reader(tx: mpsc::Sender<AppEvent>) -> anyhow::Result<()> {
    thread::Builder::new()
        .name("archivist-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                let event = match parse_command(&line) {
                    Ok(None) => continue,
                    Ok(Some(Command::Core(msgs))) => {
                        for msg in msgs {
                            if tx.send(AppEvent::Core(msg)).is_err() {
                                return;
                            }
                        }
                        continue;
                    }
                    Ok(Some(Command::Help)) => AppEvent::Help,
                    Ok(Some(Command::Quit)) => AppEvent::Quit,
                    Err(err) => AppEvent::Warning(format!("{err:#}")),
                };
                if tx.send(event).is_err() {
                    return;
                }
            }
            let _ = tx.send(AppEvent::Quit);
        })
        .context("starting stdin reader")?;
    Ok(())
}
