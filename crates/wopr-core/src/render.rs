//! Teletype renderer.
//!
//! Turns script beats into a sequence of [`Transport::send`] calls: typed
//! text goes out one character at a time with a pause after each, line
//! bumps go out as separate `"\n"` writes and advance the cursor row.
//! Control sequences are opaque strings; the renderer never interprets what
//! the destination does with them.

use std::time::Duration;

use crate::{Beat, DialogueStep, Environment, Pace, Transport, ansi};

/// Animation timings and terminal geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Pause after each conversational character.
    pub typing_delay: Duration,
    /// Pause after each identification sweep frame.
    pub identify_delay: Duration,
    /// Pause after each character of the ASCII maps.
    pub art_delay: Duration,
    /// Columns swept by the identification animation.
    pub terminal_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            typing_delay: Duration::from_millis(20),
            identify_delay: Duration::from_millis(15),
            art_delay: Duration::from_millis(5),
            terminal_width: 80,
        }
    }
}

impl RenderConfig {
    /// Configuration with every pause removed.
    pub fn instant() -> Self {
        Self {
            typing_delay: Duration::ZERO,
            identify_delay: Duration::ZERO,
            art_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    fn delay(&self, pace: Pace) -> Duration {
        match pace {
            Pace::Typing => self.typing_delay,
            Pace::Art => self.art_delay,
        }
    }
}

/// Renders beats through a transport.
///
/// One renderer per session: the cursor row it tracks belongs to that
/// session's terminal.
#[derive(Debug, Clone)]
pub struct Renderer<E> {
    env: E,
    config: RenderConfig,
    row: usize,
}

impl<E: Environment> Renderer<E> {
    /// Create a renderer at row zero.
    pub fn new(env: E, config: RenderConfig) -> Self {
        Self { env, config, row: 0 }
    }

    /// Rows bumped since the last screen clear.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Active configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render every beat of `step`.
    pub async fn render_step<T: Transport>(&mut self, transport: &mut T, step: &DialogueStep) {
        self.render_beats(transport, &step.beats).await;
    }

    /// Render a sequence of beats in order.
    pub async fn render_beats<T: Transport>(&mut self, transport: &mut T, beats: &[Beat]) {
        for beat in beats {
            match beat {
                Beat::Type { text, pace } => {
                    self.animate(transport, text, self.config.delay(*pace)).await;
                },
                Beat::Bump(n) => self.bump(transport, *n).await,
                Beat::ClearScreen => self.clear_screen(transport).await,
            }
        }
    }

    /// Emit `text` one character at a time, pausing `delay` after each.
    pub async fn animate<T: Transport>(&mut self, transport: &mut T, text: &str, delay: Duration) {
        let mut buf = [0u8; 4];
        for c in text.chars() {
            transport.send(c.encode_utf8(&mut buf)).await;
            self.pause(delay).await;
        }
    }

    /// Emit `n` newline writes.
    pub async fn bump<T: Transport>(&mut self, transport: &mut T, n: usize) {
        for _ in 0..n {
            transport.send("\n").await;
            self.row += 1;
        }
    }

    /// Clear the screen and move the cursor home.
    pub async fn clear_screen<T: Transport>(&mut self, transport: &mut T) {
        transport.send(ansi::CLEAR).await;
        transport.send(&ansi::cursor_to(0, 0)).await;
        self.row = 0;
    }

    /// Identification animation.
    ///
    /// Two sweeps of a full block growing across the terminal width, one
    /// line apart. Each frame returns to the start of the line; each sweep
    /// ends by restoring the cursor and clearing the line.
    pub async fn identify<T: Transport>(&mut self, transport: &mut T) {
        self.clear_screen(transport).await;
        self.sweep(transport).await;
        self.bump(transport, 1).await;
        self.sweep(transport).await;
    }

    async fn sweep<T: Transport>(&mut self, transport: &mut T) {
        for width in 0..self.config.terminal_width {
            let frame = format!("\r{:>width$}", ansi::FULL_BLOCK);
            transport.send(&frame).await;
            self.pause(self.config.identify_delay).await;
        }
        transport.send(ansi::CLEAR_AND_RESTORE).await;
    }

    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            self.env.sleep(delay).await;
        }
    }
}
