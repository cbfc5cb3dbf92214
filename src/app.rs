//! Application orchestration layer.
//!
//! A single task owns the [`Session`]. It wakes on either an input action or the search
//! debounce deadline, applies the change, rebuilds the frame snapshot and redraws.

mod runtime;
pub mod session;

pub use runtime::{spawn_input_thread, InputThread};
pub use session::Session;

use crate::error::Result;
use crate::input::InputAction;
use crate::render::ui::{UIRenderer, ViewState};
use crate::render::RenderLoopState;
use chrono::Utc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct Application {
    session: Session,
    ui_renderer: Box<dyn UIRenderer>,
    render_loop: RenderLoopState,
}

impl Application {
    pub fn new(session: Session, ui_renderer: Box<dyn UIRenderer>) -> Self {
        let render_loop = RenderLoopState::new(session.windower().row_height());
        Self {
            session,
            ui_renderer,
            render_loop,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run against the real terminal until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;

        let (tx, rx) = mpsc::unbounded_channel();
        let initial_search = self.session.query().search_input().to_string();
        let mut input = InputThread::spawn(tx, INPUT_POLL_INTERVAL, initial_search);

        let result = self.event_loop(rx).await;
        input.stop();
        self.ui_renderer.cleanup()?;
        result
    }

    /// Run with actions from an existing channel instead of the terminal.
    pub async fn run_with_input(&mut self, rx: UnboundedReceiver<InputAction>) -> Result<()> {
        self.ui_renderer.initialize()?;
        let result = self.event_loop(rx).await;
        self.ui_renderer.cleanup()?;
        result
    }

    async fn event_loop(&mut self, mut rx: UnboundedReceiver<InputAction>) -> Result<()> {
        let (width, height) = self.ui_renderer.get_terminal_size()?;
        let mut view_state = ViewState::new(width, height);
        self.render_loop
            .resize(&mut self.session, &mut view_state, width, height);

        loop {
            self.render_loop
                .sync(&self.session, &mut view_state, Utc::now());
            self.ui_renderer.render(&view_state)?;

            let deadline = self.session.search_deadline();
            let search_timer = time::sleep_until(
                deadline
                    .map(time::Instant::from_std)
                    .unwrap_or_else(time::Instant::now),
            );

            tokio::select! {
                action = rx.recv() => {
                    let Some(action) = action else {
                        log::debug!("Input channel closed");
                        break;
                    };
                    if !self.apply(action, &mut view_state) {
                        break;
                    }
                    // Drain the burst so one frame covers it
                    while let Ok(action) = rx.try_recv() {
                        if !self.apply(action, &mut view_state) {
                            return Ok(());
                        }
                    }
                }
                () = search_timer, if deadline.is_some() => {
                    self.session.poll_search(Instant::now());
                }
            }
        }
        Ok(())
    }

    fn apply(&mut self, action: InputAction, view_state: &mut ViewState) -> bool {
        self.render_loop
            .process_action(action, &mut self.session, view_state, Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;
    use crate::input::ScrollDirection;
    use crate::render::ui::MockUIRenderer;
    use crate::store::{RecordId, RecordStore};

    fn application(records: u32) -> Application {
        let config = ViewerConfig::default();
        let store = RecordStore::generate(records, 3, Utc::now());
        Application::new(
            Session::new(store, &config),
            Box::new(MockUIRenderer::new()),
        )
    }

    #[tokio::test]
    async fn test_actions_drive_session() {
        let mut app = application(200);
        let (tx, rx) = mpsc::unbounded_channel();
        for action in [
            InputAction::MoveCursor {
                direction: ScrollDirection::Down,
                rows: 3,
            },
            InputAction::ToggleSelection,
            InputAction::Quit,
            InputAction::GoToEnd,
        ] {
            tx.send(action).unwrap();
        }

        app.run_with_input(rx).await.unwrap();
        assert_eq!(app.session().cursor(), 3);
        assert!(app.session().is_selected(RecordId::new(4)));
    }

    #[tokio::test]
    async fn test_search_applies_after_debounce() {
        let mut app = application(500);
        let (tx, rx) = mpsc::unbounded_channel();

        tx.send(InputAction::StartSearch).unwrap();
        for text in ["j", "ja", "jan"] {
            tx.send(InputAction::UpdateSearch { text: text.into() })
                .unwrap();
        }
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(400)).await;
            let _ = tx.send(InputAction::Quit);
        });

        app.run_with_input(rx).await.unwrap();
        assert_eq!(app.session().query().applied_search(), "jan");
        assert_eq!(app.session().passes(), 2);
    }

    #[tokio::test]
    async fn test_closed_channel_ends_loop() {
        let mut app = application(10);
        let (tx, rx) = mpsc::unbounded_channel::<InputAction>();
        drop(tx);
        assert!(app.run_with_input(rx).await.is_ok());
    }
}
