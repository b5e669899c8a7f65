use std::io;

use anyhow::{bail, Context, Result};
use common::{InputEvent, Scene, SceneSignal, StandardObjects};
use crossterm::{
    cursor::{Hide, Show},
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::{Stream, StreamExt};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::input::translate;
use crate::render::{PixelScale, TerminalDrawer, TextureAtlas};

const EVENT_BUFFER: usize = 64;

/// Raw mode and the alternate screen, restored when dropped.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let guard = TerminalGuard { _private: () };
        execute!(io::stdout(), EnterAlternateScreen, Hide)
            .context("failed to enter the alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

pub async fn run(settings: Settings) -> Result<()> {
    let scale = PixelScale::default();
    let size = crossterm::terminal::size().context("failed to read the terminal size")?;
    let (columns, rows) = settings.frame_size(size, scale)?;

    let _guard = TerminalGuard::enter()?;
    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
        .context("failed to open the terminal")?;
    let drawer = TerminalDrawer::new(terminal, columns, rows, scale, TextureAtlas::standard());
    let scene = Scene::with_factory(
        drawer,
        StandardObjects::new(settings.seed, settings.score_align),
    );
    info!(columns, rows, tick = ?settings.tick_interval, "game started");

    let (events, event_rx) = mpsc::channel(EVENT_BUFFER);
    let signals = scene.run(event_rx, settings.tick_interval);
    forward(EventStream::new(), events, signals).await
}

/// Pump terminal input into the scene until it signals.
///
/// Returns `Ok` on `Terminate` or when the input stream ends, and the frame
/// error on `Fatal`.
pub async fn forward<S>(
    mut input: S,
    events: mpsc::Sender<InputEvent>,
    mut signals: mpsc::Receiver<SceneSignal>,
) -> Result<()>
where
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    loop {
        tokio::select! {
            signal = signals.recv() => match signal {
                Some(SceneSignal::Terminate) => {
                    info!("scene terminated");
                    return Ok(());
                }
                Some(SceneSignal::Fatal(e)) => return Err(e),
                None => bail!("scene loop stopped unexpectedly"),
            },

            event = input.next() => match event {
                Some(Ok(event)) => {
                    let Some(event) = translate(&event) else {
                        continue;
                    };
                    if let Err(mpsc::error::SendError(event)) = events.send(event).await {
                        warn!(?event, "scene is no longer receiving input");
                    }
                }
                Some(Err(e)) => return Err(e).context("failed to read terminal input"),
                None => {
                    debug!("input stream ended");
                    return Ok(());
                }
            },
        }
    }
}
