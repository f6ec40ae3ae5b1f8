//! Session engine.
//!
//! Drives one transport through the script. The engine itself holds no
//! screen: callers pass the current screen with every input and get the next
//! one back. Network drivers read the screen from the registry; the console
//! loop keeps it in a local.
//!
//! # Lifecycle
//!
//! 1. [`Session::start`]: text color, identification sweep, logon prompt
//! 2. [`Session::handle_input`] once per received line, until
//!    [`Flow::Closed`]
//!
//! Transports with synchronous input can hand the whole loop to
//! [`Session::run_synchronous`].

use crate::{
    Action, Environment, Passage, RenderConfig, Renderer, Screen, SessionError, Transport, ansi,
    normalize, step, transition,
};

/// Whether a session continues after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Session is now at this screen and waits for the next input.
    Continue(Screen),
    /// Transport was disconnected; the session is over.
    Closed,
}

/// One transport plus the renderer that animates the script on it.
pub struct Session<T, E> {
    transport: T,
    renderer: Renderer<E>,
}

impl<T: Transport, E: Environment> Session<T, E> {
    /// Create a session over `transport`.
    pub fn new(transport: T, env: E, config: RenderConfig) -> Self {
        Self { transport, renderer: Renderer::new(env, config) }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// The session's renderer.
    pub fn renderer(&self) -> &Renderer<E> {
        &self.renderer
    }

    /// Consume the session, returning its transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Open the session: set the text color, run the identification
    /// animation, and show the logon prompt.
    ///
    /// Network clients get the color reset right after the prompt; the
    /// console stays colored until its input ends.
    ///
    /// Returns the screen the session is now waiting at.
    pub async fn start(&mut self) -> Result<Screen, SessionError> {
        self.transport.send(ansi::FOREGROUND_CYAN).await;
        self.renderer.identify(&mut self.transport).await;
        self.enter(Screen::Logon).await?;
        if !self.transport.supports_synchronous_input() {
            self.transport.send(ansi::RESET).await;
        }
        Ok(Screen::Logon)
    }

    /// Consume one raw input received while at `screen`.
    ///
    /// The input is normalized, the transition decided, and its effects
    /// rendered. A rejected input disconnects the transport; if the
    /// transport survives (the console has nothing to disconnect) the
    /// session returns to logon.
    pub async fn handle_input(&mut self, screen: Screen, raw: &str) -> Result<Flow, SessionError> {
        let token = normalize(raw);
        let action = transition(screen, &token);

        if !self.transport.supports_synchronous_input() {
            tracing::info!(
                transport = %self.transport.id(),
                %screen,
                input = %token,
                next = %action.destination(),
                "input received"
            );
        }

        self.apply(action).await
    }

    /// Carry out the side effects of `action`.
    pub async fn apply(&mut self, action: Action) -> Result<Flow, SessionError> {
        match action {
            Action::Advance(next) => {
                self.enter(next).await?;
                Ok(Flow::Continue(next))
            },
            Action::Interlude { passage, then } => {
                self.renderer.render_beats(&mut self.transport, passage.beats()).await;
                self.enter(then).await?;
                Ok(Flow::Continue(then))
            },
            Action::Reject => {
                self.renderer.render_beats(&mut self.transport, Passage::NotRecognized.beats()).await;
                tracing::info!(transport = %self.transport.id(), "identification rejected");
                self.transport.disconnect().await;

                if !self.transport.is_open() {
                    return Ok(Flow::Closed);
                }

                self.enter(Screen::Logon).await?;
                Ok(Flow::Continue(Screen::Logon))
            },
        }
    }

    /// Run the whole conversation on a transport that can block for input.
    ///
    /// Returns the screen the session was waiting at when input ended, or
    /// `Logon` if the transport closed. The color is reset once input
    /// ends. Transports without synchronous input return right after the
    /// logon prompt.
    pub async fn run_synchronous(&mut self) -> Result<Screen, SessionError> {
        let mut screen = self.start().await?;

        if !self.transport.supports_synchronous_input() {
            return Ok(screen);
        }

        while let Some(line) = self.transport.read_line().await? {
            match self.handle_input(screen, &line).await? {
                Flow::Continue(next) => screen = next,
                Flow::Closed => return Ok(Screen::Logon),
            }
        }

        self.transport.send(ansi::RESET).await;
        Ok(screen)
    }

    /// Persist `screen`, then render its step.
    async fn enter(&mut self, screen: Screen) -> Result<(), SessionError> {
        self.transport.set_screen(screen).await?;
        self.renderer.render_step(&mut self.transport, step(screen)).await;
        Ok(())
    }
}
