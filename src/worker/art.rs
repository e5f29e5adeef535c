//! Looping ASCII banner for the `art` worker mode.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::output::OutputHelper;
use crate::domain::{UnitResult, cancellable_sleep, ensure_not_cancelled};

/// Pause between printed lines, and between passes.
pub const LINE_DELAY: Duration = Duration::from_millis(120);

const BANNER: &[&str] = &[
    "..............................................................",
    "..................:@@@%...@@@:................................",
    ".................@@@@@@*.@@@@@@...............................",
    ".................*@@@@@%.@@@@@*...............................",
    ".............*@@@*..:::....::..*@@@%..........................",
    ".............@@@@@@....@@@*...%@@@@@..........................",
    "..............*@@%...@@@@@@@@...%@@*..........................",
    "...................@@@@@@@@@@@@...............................",
    "...................*@@@@@@@@@@*...............................",
    ".....................:*@@@@*:.................................",
    "..............................................................",
    "....d.e.m.o.k.i.t.............................................",
    "..............................................................",
];

pub fn banner() -> &'static [&'static str] {
    BANNER
}

/// Draw the banner line by line, forever, until `cancel` fires.
pub async fn draw(output: &OutputHelper, cancel: &CancellationToken) -> UnitResult {
    let width = terminal_width();
    loop {
        for line in BANNER {
            ensure_not_cancelled(cancel)?;
            output.write_line(&fit_to_width(line, width));
            cancellable_sleep(LINE_DELAY, cancel).await?;
        }
        cancellable_sleep(LINE_DELAY, cancel).await?;
    }
}

fn terminal_width() -> Option<usize> {
    crossterm::terminal::size().ok().map(|(cols, _)| cols as usize)
}

/// Keep the middle of `line` when the terminal is narrower than it.
fn fit_to_width(line: &str, width: Option<usize>) -> String {
    match width {
        Some(width) if width < line.len() => {
            let start = (line.len() - width) / 2;
            line[start..start + width].to_string()
        }
        _ => line.to_string(),
    }
}
