use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use common::{Align, DEFAULT_TICK_INTERVAL_MS, UNIT};

use crate::render::PixelScale;

/// Smallest playfield, in grid cells per side.
pub const MIN_GRID_CELLS: u16 = 5;

#[derive(Parser, Debug, Clone)]
#[command(name = "snakery-terminal", about = "Play snake in the terminal")]
pub struct Args {
    /// Milliseconds between game ticks
    #[arg(long, env = "SNAKERY_TICK_MS", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    pub tick_ms: u64,

    /// Playfield width in grid cells (default: fit the terminal)
    #[arg(long, env = "SNAKERY_COLUMNS")]
    pub columns: Option<u16>,

    /// Playfield height in grid cells (default: fit the terminal)
    #[arg(long, env = "SNAKERY_ROWS")]
    pub rows: Option<u16>,

    /// Seed for apple placement, for a reproducible game
    #[arg(long, env = "SNAKERY_SEED")]
    pub seed: Option<u64>,

    /// Where the score is drawn: left | right
    #[arg(long, env = "SNAKERY_SCORE_ALIGN", default_value = "right")]
    pub score_align: String,

    /// File the log is written to
    #[arg(long, env = "SNAKERY_LOG_FILE", default_value = "snakery.log")]
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub tick_interval: Duration,
    pub columns: Option<u16>,
    pub rows: Option<u16>,
    pub seed: Option<u64>,
    pub score_align: Align,
    pub log_file: PathBuf,
}

impl Settings {
    pub fn from_args(args: Args) -> Result<Self> {
        if args.tick_ms == 0 {
            bail!("tick interval must be at least 1ms");
        }
        for (name, cells) in [("columns", args.columns), ("rows", args.rows)] {
            if matches!(cells, Some(n) if n < MIN_GRID_CELLS) {
                bail!("{} must be at least {}", name, MIN_GRID_CELLS);
            }
        }

        Ok(Settings {
            tick_interval: Duration::from_millis(args.tick_ms),
            columns: args.columns,
            rows: args.rows,
            seed: args.seed,
            score_align: parse_align(&args.score_align)?,
            log_file: args.log_file,
        })
    }

    /// Character cells to draw on, given the terminal size in columns and rows.
    pub fn frame_size(&self, terminal: (u16, u16), scale: PixelScale) -> Result<(u16, u16)> {
        let per_column = (UNIT / scale.horizontal).max(1) as u16;
        let per_row = (UNIT / scale.vertical).max(1) as u16;

        let fit = |cells: Option<u16>, available: u16, per_cell: u16| -> Result<u16> {
            let fitting = available / per_cell;
            let wanted = cells.unwrap_or(fitting);
            if wanted > fitting {
                bail!("terminal too small for {} grid cells (room for {})", wanted, fitting);
            }
            if wanted < MIN_GRID_CELLS {
                bail!("terminal too small, need room for {} grid cells", MIN_GRID_CELLS);
            }
            Ok(wanted * per_cell)
        };

        Ok((
            fit(self.columns, terminal.0, per_column)?,
            fit(self.rows, terminal.1, per_row)?,
        ))
    }
}

fn parse_align(value: &str) -> Result<Align> {
    match value.to_ascii_lowercase().as_str() {
        "left" => Ok(Align::Left),
        "right" => Ok(Align::Right),
        other => Err(anyhow!("unknown score alignment '{}', expected left or right", other)),
    }
}
