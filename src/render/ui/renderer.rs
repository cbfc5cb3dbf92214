//! Renderer trait.
//!
//! The event loop talks to the terminal only through [`UIRenderer`], so a mock can stand
//! in for it in tests.

use crate::error::Result;
use crate::render::ui::state::ViewState;

pub trait UIRenderer {
    /// Draw one frame from the snapshot.
    fn render(&mut self, view_state: &ViewState) -> Result<()>;

    /// Enter raw mode and the alternate screen.
    fn initialize(&mut self) -> Result<()>;

    /// Restore the terminal. Must be safe to call more than once.
    fn cleanup(&mut self) -> Result<()>;

    /// (width, height) in cells
    fn get_terminal_size(&self) -> Result<(u16, u16)>;
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Records frames instead of drawing them.
    #[derive(Debug)]
    pub struct MockUIRenderer {
        pub render_count: usize,
        pub terminal_size: (u16, u16),
        pub is_initialized: bool,
        /// Counts line of the latest frame
        pub last_counts: Option<String>,
        /// Names of the rows in the latest frame
        pub last_rows: Vec<String>,
    }

    impl Default for MockUIRenderer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockUIRenderer {
        pub fn new() -> Self {
            Self {
                render_count: 0,
                terminal_size: (80, 24),
                is_initialized: false,
                last_counts: None,
                last_rows: Vec::new(),
            }
        }

        pub fn set_terminal_size(&mut self, width: u16, height: u16) {
            self.terminal_size = (width, height);
        }
    }

    impl UIRenderer for MockUIRenderer {
        fn render(&mut self, view_state: &ViewState) -> Result<()> {
            self.render_count += 1;
            self.last_counts = Some(view_state.counts_line());
            self.last_rows = view_state.rows.iter().map(|row| row.name.clone()).collect();
            Ok(())
        }

        fn initialize(&mut self) -> Result<()> {
            self.is_initialized = true;
            Ok(())
        }

        fn cleanup(&mut self) -> Result<()> {
            self.is_initialized = false;
            Ok(())
        }

        fn get_terminal_size(&self) -> Result<(u16, u16)> {
            Ok(self.terminal_size)
        }
    }

    #[test]
    fn test_mock_renderer_lifecycle() {
        let mut renderer = MockUIRenderer::new();
        let mut view_state = ViewState::new(80, 24);
        view_state.total_count = 10;
        view_state.filtered_count = 4;

        renderer.initialize().unwrap();
        assert!(renderer.is_initialized);

        renderer.render(&view_state).unwrap();
        assert_eq!(renderer.render_count, 1);
        assert_eq!(renderer.last_counts.as_deref(), Some("4 of 10 customers"));

        renderer.set_terminal_size(120, 30);
        assert_eq!(renderer.get_terminal_size().unwrap(), (120, 30));

        renderer.cleanup().unwrap();
        assert!(!renderer.is_initialized);
    }
}
