use std::time::Duration;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::time::{Instant, sleep};

use crate::error::GameError;
use crate::geometry::Cell;
use super::board::BoardGeometry;
use super::host::{RenderSurface, TaskHost};
use super::session::{GameSession, StepReport};
use super::settings::GameSettings;
use super::types::{GameReport, InputEvent, SessionState};

/// Upper bound on how long a wait goes without looking at the host's
/// cancel flag.
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct Layers<S: RenderSurface, F: RenderSurface> {
    pub snake: S,
    pub food: F,
}

impl<S: RenderSurface, F: RenderSurface> Layers<S, F> {
    pub fn new(snake: S, food: F) -> Self {
        Self { snake, food }
    }

    fn redraw_all(&mut self) {
        self.snake.request_redraw();
        self.food.request_redraw();
    }
}

enum Wait {
    Elapsed,
    Cancelled,
    Input(InputEvent),
}

pub struct GameLoop<B, S, F, H>
where
    B: BoardGeometry,
    S: RenderSurface,
    F: RenderSurface,
    H: TaskHost,
{
    session: GameSession<B>,
    layers: Layers<S, F>,
    host: H,
    commands: mpsc::UnboundedReceiver<InputEvent>,
    input_open: bool,
    refresh_interval: Duration,
    pause_interval: Duration,
    start_delay: Duration,
}

impl<B, S, F, H> GameLoop<B, S, F, H>
where
    B: BoardGeometry,
    S: RenderSurface,
    F: RenderSurface,
    H: TaskHost,
{
    pub fn new(
        session: GameSession<B>,
        settings: &GameSettings,
        layers: Layers<S, F>,
        host: H,
        commands: mpsc::UnboundedReceiver<InputEvent>,
    ) -> Self {
        Self {
            session,
            layers,
            host,
            commands,
            input_open: true,
            refresh_interval: settings.refresh_interval(),
            pause_interval: settings.pause_wait(),
            start_delay: settings.start_wait(),
        }
    }

    pub fn session(&self) -> &GameSession<B> {
        &self.session
    }

    /// Runs the session to a terminal state. Only invariant violations
    /// come back as `Err`; losing, timing out and cancellation are outcomes.
    pub async fn run(mut self) -> Result<GameReport, GameError> {
        self.start()?;

        if !self.session.state().is_finished() {
            self.wait(self.start_delay, false).await;
        }

        let outcome = loop {
            if let SessionState::Finished(outcome) = self.session.state() {
                break outcome;
            }

            if self.host.is_cancelled() {
                self.session.cancel();
                continue;
            }

            self.drain_input();

            if self.session.is_paused() {
                if let Wait::Input(event) = self.wait(self.pause_interval, true).await {
                    self.session.apply_input(event);
                }
                continue;
            }

            if let Wait::Cancelled = self.wait(self.refresh_interval, false).await {
                continue;
            }

            self.drain_input();

            let Some(report) = self.session.step()? else {
                continue;
            };
            self.render_step(&report);

            if let Some(progress) = report.progress {
                self.host.report_progress(progress);
            }
        };

        self.layers.redraw_all();
        Ok(self.session.report(outcome))
    }

    fn start(&mut self) -> Result<(), GameError> {
        let food = self.session.start()?;

        self.layers.snake.clear();
        self.layers.food.clear();

        let cells: Vec<Cell> = self.session.body().cells().collect();
        self.layers.snake.add(&cells);
        if let Some(food) = food {
            self.layers.food.add(&[food]);
        }

        self.layers.redraw_all();
        Ok(())
    }

    fn render_step(&mut self, report: &StepReport) {
        if let Some(tail) = report.removed_tail {
            self.layers.snake.remove(&[tail]);
        }
        self.layers.snake.add(&[report.new_head]);

        if let Some(change) = report.food {
            if let Some(eaten) = change.eaten {
                self.layers.food.remove(&[eaten]);
            }
            if let Some(placed) = change.placed {
                self.layers.food.add(&[placed]);
            }
            self.layers.food.request_redraw();
        }

        // terminal steps get the final redraw of every layer instead
        if report.outcome.is_none() {
            self.layers.snake.request_redraw();
        }
    }

    fn drain_input(&mut self) {
        while self.input_open {
            match self.commands.try_recv() {
                Ok(event) => self.session.apply_input(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => self.input_open = false,
            }
        }
    }

    /// Sleeps for `duration`, checking the cancel flag at least every
    /// [`CANCEL_POLL_INTERVAL`]. With `wake_on_input`, an arriving event
    /// ends the wait early and is handed back.
    async fn wait(&mut self, duration: Duration, wake_on_input: bool) -> Wait {
        // a deadline past the end of time never elapses
        let deadline = Instant::now().checked_add(duration);
        loop {
            if self.host.is_cancelled() {
                return Wait::Cancelled;
            }
            let remaining = match deadline {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => CANCEL_POLL_INTERVAL,
            };
            if remaining.is_zero() {
                // give other tasks a turn even when the wait is empty
                tokio::task::yield_now().await;
                return Wait::Elapsed;
            }
            let slice = remaining.min(CANCEL_POLL_INTERVAL);

            tokio::select! {
                event = self.commands.recv(), if wake_on_input && self.input_open => {
                    match event {
                        Some(event) => return Wait::Input(event),
                        None => self.input_open = false,
                    }
                }
                _ = sleep(slice) => {}
            }
        }
    }
}
