//! Headless terminal driver (default binary).
//!
//! Reads keys with crossterm, turns them into intents for the engine and
//! writes every engine event to stdout as one JSON object per line. Drawing
//! the grid is left to whatever consumes that stream. Logs go to stderr.
//!
//! Configuration comes from `TETRECS_*` environment variables (see
//! `GameConfig::from_env`) and `RUST_LOG`.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use serde::Serialize;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::UnboundedReceiver;

use tetrecs::core::{Game, GameConfig, GameEvent, GameSnapshot};
use tetrecs::engine::{event_channel, Engine};
use tetrecs::input::{handle_key_event, should_quit};

const POLL_MS: u64 = 50;

/// Out-of-band line written after every key intent
#[derive(Serialize)]
#[serde(tag = "type", rename = "snapshot")]
struct SnapshotLine<'a> {
    intent: &'a str,
    #[serde(flatten)]
    snapshot: &'a GameSnapshot,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::from_env();
    log::info!("TetrECS starting with {:?}", config);

    let rt = Runtime::new()?;
    let _guard = rt.enter();

    let mut game = Game::new(config);
    let mut events = event_channel(&mut game);
    let engine = Engine::spawn(game);

    terminal::enable_raw_mode()?;
    let result = run(&rt, &engine, &mut events);

    // Always try to restore terminal state.
    let _ = terminal::disable_raw_mode();
    result
}

fn run(rt: &Runtime, engine: &Engine, events: &mut UnboundedReceiver<GameEvent>) -> Result<()> {
    let mut out = io::stdout().lock();
    rt.block_on(engine.start())?;

    loop {
        while let Ok(event) = events.try_recv() {
            write_line(&mut out, &event)?;
            if let GameEvent::GameOver { final_score } = event {
                log::info!("Final score: {}", final_score);
                return Ok(());
            }
        }

        if !event::poll(Duration::from_millis(POLL_MS))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if should_quit(key) {
            rt.block_on(engine.stop())?;
            return Ok(());
        }

        if let Some(intent) = handle_key_event(key) {
            engine.send(intent)?;
            let snapshot = rt.block_on(engine.snapshot())?;
            write_line(
                &mut out,
                &SnapshotLine {
                    intent: intent.as_str(),
                    snapshot: &snapshot,
                },
            )?;
        }
    }
}

fn write_line<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    // Raw mode: no implicit carriage return
    out.write_all(b"\r\n")?;
    out.flush()?;
    Ok(())
}
