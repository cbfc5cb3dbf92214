//! Terminal UI backed by ratatui and crossterm.

use crate::error::Result;
use crate::query::SortField;
use crate::render::ui::format::fit;
use crate::render::ui::renderer::UIRenderer;
use crate::render::ui::state::{RowView, ViewState};
use crate::render::ui::theme::ColorTheme;
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

const CHECKBOX_WIDTH: usize = 4;
const AVATAR_WIDTH: usize = 5;
/// Sortable columns in display order with their widths; "Added By" takes the rest.
const COLUMNS: [(SortField, usize); 5] = [
    (SortField::Name, 22),
    (SortField::Email, 32),
    (SortField::Phone, 19),
    (SortField::Score, 9),
    (SortField::LastActivity, 17),
];
const ADDED_BY_LABEL: &str = "Added By";

pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    pub fn new() -> Result<Self> {
        Self::with_theme(ColorTheme::default())
    }

    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }

    fn draw_frame(frame: &mut Frame, view_state: &ViewState, theme: &ColorTheme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.size());

        Self::render_title(frame, chunks[0], view_state, theme);
        Self::render_query_bar(frame, chunks[1], view_state, theme);
        Self::render_header(frame, chunks[2], view_state, theme);
        Self::render_rows(frame, chunks[3], view_state, theme);
        Self::render_status(frame, chunks[4], view_state, theme);
    }

    fn render_title(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let line = Line::from(vec![
            Span::styled("Customers  ", theme.title),
            Span::raw(view_state.counts_line()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_query_bar(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let mut spans = vec![Span::raw(format!("Search: {}", view_state.search_text))];
        if view_state.search_pending {
            spans.push(Span::raw(" …"));
        }
        for label in &view_state.filter_labels {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!(" {label} "), theme.filter_pill));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_header(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let checkbox = if view_state.all_visible_selected {
            "[x]"
        } else {
            "[ ]"
        };
        let mut text = fit(checkbox, CHECKBOX_WIDTH);
        text.push_str(&" ".repeat(AVATAR_WIDTH));
        for (number, (field, width)) in COLUMNS.iter().enumerate() {
            let label = format!("{} {}", number + 1, view_state.header_label(*field));
            text.push_str(&fit(&label, *width));
        }
        text.push_str(ADDED_BY_LABEL);
        let width = usize::from(area.width);
        frame.render_widget(Paragraph::new(fit(&text, width)).style(theme.header), area);
    }

    fn render_rows(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let lines: Vec<Line> = view_state
            .rows
            .iter()
            .take(usize::from(area.height))
            .map(|row| Self::row_line(row, row.index == view_state.cursor, theme))
            .collect();

        if lines.is_empty() {
            frame.render_widget(Paragraph::new("No customers match"), area);
        } else {
            frame.render_widget(Paragraph::new(lines), area);
        }
    }

    fn row_line(row: &RowView, is_cursor: bool, theme: &ColorTheme) -> Line<'static> {
        let base = theme.row_style(is_cursor, row.selected);
        let checkbox = if row.selected { "[x]" } else { "[ ]" };
        let [name_w, email_w, phone_w, score_w, activity_w] = COLUMNS.map(|(_, width)| width);

        Line::from(vec![
            Span::styled(fit(checkbox, CHECKBOX_WIDTH), base),
            Span::styled(
                format!("{:^3}", row.initials),
                base.patch(theme.avatar_style(row.avatar)),
            ),
            Span::styled(" ".repeat(AVATAR_WIDTH - 3), base),
            Span::styled(fit(&row.name, name_w), base),
            Span::styled(fit(&row.email, email_w), base),
            Span::styled(fit(&row.phone, phone_w), base),
            Span::styled(
                fit(&row.score.to_string(), score_w),
                base.patch(Style::default().fg(theme.score_color(row.score))),
            ),
            Span::styled(fit(&row.activity, activity_w), base),
            Span::styled(row.added_by.to_string(), base),
        ])
    }

    fn render_status(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let status = Paragraph::new(view_state.format_status_line()).style(theme.status_style());
        frame.render_widget(status, area);
    }
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view_state: &ViewState) -> Result<()> {
        if let Some(terminal) = self.terminal.as_mut() {
            let theme = &self.theme;
            terminal.draw(|frame| Self::draw_frame(frame, view_state, theme))?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        self.terminal = Some(Terminal::new(CrosstermBackend::new(stdout))?);
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.take().is_some() {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        if let Err(err) = self.cleanup() {
            log::error!("Failed to restore terminal: {err}");
        }
    }
}
