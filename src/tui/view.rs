use std::{
    fs::File,
    io::Write,
    sync::{Arc, Mutex, MutexGuard},
};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::error::{Result, TuiError};

#[derive(Debug, PartialEq)]
enum ActivePane {
    StatePane,
    LogPane,
}

pub(super) struct DashboardViewState {
    log_file: Option<File>,
    active_pane: ActivePane,

    log_entries: Vec<String>,
    log_max_line_width: usize,
    log_rect: Rect,
    log_v_scroll: usize,
    log_h_scroll: usize,

    state_lines: Vec<String>,
    state_max_line_width: usize,
    state_rect: Rect,
    state_v_scroll: usize,
    state_h_scroll: usize,
}

pub(super) struct DashboardView {
    max_tui_log_len: usize,
    state: Mutex<DashboardViewState>,
}

impl DashboardView {
    pub fn new(max_tui_log_len: usize, log_file: Option<File>) -> Arc<Self> {
        Arc::new(Self {
            max_tui_log_len,
            state: Mutex::new(DashboardViewState {
                log_file,
                active_pane: ActivePane::StatePane,

                log_entries: Vec::new(),
                log_max_line_width: 0,
                log_rect: Rect::default(),
                log_v_scroll: 0,
                log_h_scroll: 0,

                state_lines: vec!["Initializing...".to_string()],
                state_max_line_width: 0,
                state_rect: Rect::default(),
                state_v_scroll: 0,
                state_h_scroll: 0,
            }),
        })
    }

    fn get_state(&self) -> MutexGuard<'_, DashboardViewState> {
        self.state
            .lock()
            .expect("`DashboardView` mutex can't be poisoned")
    }

    fn max_scroll_down(rect: &Rect, line_count: usize) -> usize {
        let visible = rect.height.saturating_sub(2) as usize;
        line_count.saturating_sub(visible)
    }

    fn max_scroll_right(rect: &Rect, max_line_width: usize) -> usize {
        let visible = rect.width.saturating_sub(2) as usize;
        max_line_width.saturating_sub(visible)
    }

    fn get_list<'a>(
        title: &'a str,
        lines: &'a [String],
        v_scroll: usize,
        h_scroll: usize,
        active: bool,
    ) -> List<'a> {
        let items: Vec<ListItem> = lines
            .iter()
            .skip(v_scroll)
            .map(|line| ListItem::new(line.chars().skip(h_scroll).collect::<String>()))
            .collect();

        let border_style = if active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };

        List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        )
    }

    /// Replaces the state pane content with a fresh cycle summary.
    pub fn update_ingest_state(&self, state: String) {
        let mut state_guard = self.get_state();

        let mut new_lines = Vec::new();

        for line in state.lines() {
            state_guard.state_max_line_width = state_guard.state_max_line_width.max(line.len());
            new_lines.push(line.to_string());
        }

        new_lines.push("".to_string());

        if state_guard.state_v_scroll >= new_lines.len() && !new_lines.is_empty() {
            state_guard.state_v_scroll = new_lines.len().saturating_sub(1);
        }

        state_guard.state_lines = new_lines;
    }

    /// Prepends a timestamped entry to the log pane, mirroring it to the log file if one
    /// is configured.
    pub fn add_log_entry(&self, entry: String) -> Result<()> {
        let mut state_guard = self.get_state();

        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();

        let lines: Vec<&str> = entry.lines().collect();

        if lines.is_empty() {
            return Ok(());
        }

        let mut log_entry = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            let log_entry_line = if i == 0 {
                format!("[{}] {}", timestamp, line)
            } else {
                format!("           {}", line)
            };

            if let Some(log_file) = state_guard.log_file.as_mut() {
                writeln!(log_file, "{}", log_entry_line).map_err(|e| {
                    TuiError::Generic(format!("couldn't write to log file {}", e))
                })?;
                log_file
                    .flush()
                    .map_err(|e| TuiError::Generic(format!("couldn't flush log file {}", e)))?;
            }

            log_entry.push(log_entry_line)
        }

        // Add entry at the beginning of the TUI log

        for entry_line in log_entry.into_iter().rev() {
            state_guard.log_max_line_width = state_guard.log_max_line_width.max(entry_line.len());
            state_guard.log_entries.insert(0, entry_line);
        }

        // Adjust scroll position to maintain the user's view
        if state_guard.log_v_scroll != 0 {
            state_guard.log_v_scroll = state_guard.log_v_scroll.saturating_add(lines.len());
        }

        if state_guard.log_entries.len() > self.max_tui_log_len {
            state_guard.log_entries.truncate(self.max_tui_log_len);

            let max_scroll =
                Self::max_scroll_down(&state_guard.log_rect, state_guard.log_entries.len());
            state_guard.log_v_scroll = state_guard.log_v_scroll.min(max_scroll);
        }

        Ok(())
    }

    pub fn render(&self, f: &mut Frame) {
        let frame_rect = f.area();

        let main_area = Rect {
            x: frame_rect.x,
            y: frame_rect.y,
            width: frame_rect.width,
            height: frame_rect.height.saturating_sub(1), // Leave 1 row for help text
        };

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(40), Constraint::Min(0)])
            .split(main_area);

        let mut state_guard = self.get_state();

        state_guard.state_rect = main_chunks[0];
        state_guard.log_rect = main_chunks[1];

        let state_list = Self::get_list(
            "Ingest State",
            &state_guard.state_lines,
            state_guard.state_v_scroll,
            state_guard.state_h_scroll,
            state_guard.active_pane == ActivePane::StatePane,
        );
        f.render_widget(state_list, state_guard.state_rect);

        let log_list = Self::get_list(
            "Log",
            &state_guard.log_entries,
            state_guard.log_v_scroll,
            state_guard.log_h_scroll,
            state_guard.active_pane == ActivePane::LogPane,
        );
        f.render_widget(log_list, state_guard.log_rect);

        let help_text =
            " Press 'q' to quit, Tab to switch panes, scroll with ↑/↓, ←/→, 'b' to bottom and 't' to top";
        let help_paragraph = Paragraph::new(help_text).style(Style::default().fg(Color::Gray));
        let help_area = Rect {
            x: frame_rect.x,
            y: frame_rect.y + frame_rect.height.saturating_sub(1), // Last row
            width: frame_rect.width,
            height: 1,
        };
        f.render_widget(help_paragraph, help_area);
    }

    pub fn scroll_up(&self) {
        let mut state_guard = self.get_state();

        match state_guard.active_pane {
            ActivePane::StatePane => {
                state_guard.state_v_scroll = state_guard.state_v_scroll.saturating_sub(1)
            }
            ActivePane::LogPane => {
                state_guard.log_v_scroll = state_guard.log_v_scroll.saturating_sub(1)
            }
        }
    }

    pub fn scroll_down(&self) {
        let mut state_guard = self.get_state();

        match state_guard.active_pane {
            ActivePane::StatePane => {
                let max =
                    Self::max_scroll_down(&state_guard.state_rect, state_guard.state_lines.len());
                if state_guard.state_v_scroll < max {
                    state_guard.state_v_scroll += 1;
                }
            }
            ActivePane::LogPane => {
                let max =
                    Self::max_scroll_down(&state_guard.log_rect, state_guard.log_entries.len());
                if state_guard.log_v_scroll < max {
                    state_guard.log_v_scroll += 1;
                }
            }
        }
    }

    pub fn scroll_left(&self) {
        let mut state_guard = self.get_state();

        match state_guard.active_pane {
            ActivePane::StatePane => {
                state_guard.state_h_scroll = state_guard.state_h_scroll.saturating_sub(1);
            }
            ActivePane::LogPane => {
                state_guard.log_h_scroll = state_guard.log_h_scroll.saturating_sub(1);
            }
        }
    }

    pub fn scroll_right(&self) {
        let mut state_guard = self.get_state();

        match state_guard.active_pane {
            ActivePane::StatePane => {
                let max = Self::max_scroll_right(
                    &state_guard.state_rect,
                    state_guard.state_max_line_width,
                );
                if state_guard.state_h_scroll < max {
                    state_guard.state_h_scroll += 1;
                }
            }
            ActivePane::LogPane => {
                let max =
                    Self::max_scroll_right(&state_guard.log_rect, state_guard.log_max_line_width);
                if state_guard.log_h_scroll < max {
                    state_guard.log_h_scroll += 1;
                }
            }
        }
    }

    pub fn reset_scroll(&self) {
        let mut state_guard = self.get_state();

        match state_guard.active_pane {
            ActivePane::StatePane => {
                state_guard.state_v_scroll = 0;
                state_guard.state_h_scroll = 0;
            }
            ActivePane::LogPane => {
                state_guard.log_v_scroll = 0;
                state_guard.log_h_scroll = 0;
            }
        }
    }

    pub fn scroll_to_bottom(&self) {
        let mut state_guard = self.get_state();

        match state_guard.active_pane {
            ActivePane::StatePane => {
                state_guard.state_v_scroll =
                    Self::max_scroll_down(&state_guard.state_rect, state_guard.state_lines.len());
                state_guard.state_h_scroll = 0;
            }
            ActivePane::LogPane => {
                state_guard.log_v_scroll =
                    Self::max_scroll_down(&state_guard.log_rect, state_guard.log_entries.len());
                state_guard.log_h_scroll = 0;
            }
        }
    }

    pub fn switch_pane(&self) {
        let mut state_guard = self.get_state();

        state_guard.active_pane = match state_guard.active_pane {
            ActivePane::StatePane => ActivePane::LogPane,
            ActivePane::LogPane => ActivePane::StatePane,
        };
    }
}
