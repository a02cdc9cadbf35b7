pub mod data;

use std::io::{self, stdout, Write};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use railmatch_results::table::Align;
use railmatch_results::GridView;

use crate::util;
use data::ViewData;

/// Keyboard mode: plain navigation, or editing one column's filter.
enum Mode {
    Normal,
    Filter { col: usize, buf: String },
}

struct TuiApp {
    view: GridView,
    /// Display snapshot of the current page; rebuilt on any view change
    data: ViewData,
    cursor_row: usize,
    cursor_col: usize,
    scroll_row: usize,
    scroll_col: usize,
    should_quit: bool,
    show_help: bool,
    mode: Mode,
    /// Cell pinned to the status bar with Enter
    pinned: Option<(String, Option<String>)>,
    /// Width of the row-number gutter, computed from the filtered count
    row_num_width: usize,
}

impl TuiApp {
    fn new(view: GridView) -> Self {
        let data = data::layout(view.grid(), &view.page_rows(), first_row_number(&view));
        let row_num_width = Self::compute_row_num_width(&view);
        Self {
            view,
            data,
            cursor_row: 0,
            cursor_col: 0,
            scroll_row: 0,
            scroll_col: 0,
            should_quit: false,
            show_help: false,
            mode: Mode::Normal,
            pinned: None,
            row_num_width,
        }
    }

    fn compute_row_num_width(view: &GridView) -> usize {
        let max_row = view.selected_count();
        let digits = if max_row == 0 {
            1
        } else {
            (max_row as f64).log10().floor() as usize + 1
        };
        digits.max(3) + 1
    }

    /// Rebuild the display snapshot after a filter, sort or page change.
    /// The cursor returns to the top; the column sticks.
    fn refresh(&mut self) {
        self.data = data::layout(
            self.view.grid(),
            &self.view.page_rows(),
            first_row_number(&self.view),
        );
        self.row_num_width = Self::compute_row_num_width(&self.view);
        self.cursor_row = 0;
        self.scroll_row = 0;
        if self.data.num_cols > 0 && self.cursor_col >= self.data.num_cols {
            self.cursor_col = self.data.num_cols - 1;
        }
        self.pinned = None;
    }

    fn current_cell(&self) -> Option<(String, Option<String>)> {
        let text = self.data.rows.get(self.cursor_row)?.get(self.cursor_col)?.clone();
        let link = self
            .data
            .links
            .get(self.cursor_row)
            .and_then(|row| row.get(self.cursor_col))
            .cloned()
            .flatten();
        Some((text, link))
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            // Any key dismisses help
            self.show_help = false;
            return;
        }

        if let Mode::Filter { col, buf } = &mut self.mode {
            match key.code {
                KeyCode::Esc => self.mode = Mode::Normal,
                KeyCode::Enter => {
                    let (col, text) = (*col, buf.clone());
                    self.mode = Mode::Normal;
                    self.view.set_filter(col, &text);
                    self.refresh();
                }
                KeyCode::Backspace => {
                    buf.pop();
                }
                KeyCode::Char(c) => buf.push(c),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::Home | KeyCode::Char('g') => self.cursor_row = 0,
            KeyCode::End | KeyCode::Char('G') => {
                if self.data.num_rows > 0 {
                    self.cursor_row = self.data.num_rows - 1;
                }
            }
            KeyCode::Char('0') => self.cursor_col = 0,
            KeyCode::Char('$') => {
                if self.data.num_cols > 0 {
                    self.cursor_col = self.data.num_cols - 1;
                }
            }
            KeyCode::Char('n') => {
                self.view.next_page();
                self.refresh();
            }
            KeyCode::Char('p') => {
                self.view.prev_page();
                self.refresh();
            }
            KeyCode::Char('/') => {
                let col = self.cursor_col;
                let filterable = self
                    .view
                    .grid()
                    .columns
                    .get(col)
                    .map(|c| c.filter.is_filterable())
                    .unwrap_or(false);
                if filterable {
                    self.mode = Mode::Filter {
                        col,
                        buf: self.view.filter_text(col).to_string(),
                    };
                }
            }
            KeyCode::Char('x') => {
                self.view.clear_filter(self.cursor_col);
                self.refresh();
            }
            KeyCode::Char('s') => {
                let on = !self.view.suspicious_only();
                if self.view.set_suspicious_only(on) {
                    self.refresh();
                }
            }
            KeyCode::Char('o') => {
                self.view.toggle_sort(self.cursor_col);
                self.refresh();
            }
            KeyCode::Enter => {
                self.pinned = self.current_cell();
            }
            KeyCode::Tab => self.move_cursor(0, 1),
            KeyCode::BackTab => self.move_cursor(0, -1),
            _ => {}
        }
    }

    fn move_cursor(&mut self, drow: i32, dcol: i32) {
        if self.data.num_rows == 0 || self.data.num_cols == 0 {
            return;
        }
        let new_row = (self.cursor_row as i32 + drow)
            .max(0)
            .min(self.data.num_rows as i32 - 1) as usize;
        let new_col = (self.cursor_col as i32 + dcol)
            .max(0)
            .min(self.data.num_cols as i32 - 1) as usize;
        self.cursor_row = new_row;
        self.cursor_col = new_col;
    }

    fn page_up(&mut self) {
        let jump = 20;
        self.cursor_row = self.cursor_row.saturating_sub(jump);
    }

    fn page_down(&mut self) {
        let jump = 20;
        if self.data.num_rows > 0 {
            self.cursor_row = (self.cursor_row + jump).min(self.data.num_rows - 1);
        }
    }

    fn ensure_visible(&mut self, visible_rows: usize, area_width: u16) {
        if self.cursor_row < self.scroll_row {
            self.scroll_row = self.cursor_row;
        }
        if visible_rows > 0 && self.cursor_row >= self.scroll_row + visible_rows {
            self.scroll_row = self.cursor_row - visible_rows + 1;
        }

        let available = (area_width as usize).saturating_sub(self.row_num_width + 1);
        let vis_cols = self.visible_columns(self.scroll_col, available);

        if self.cursor_col < self.scroll_col {
            self.scroll_col = self.cursor_col;
        }
        if !vis_cols.is_empty() {
            let last_vis = vis_cols[vis_cols.len() - 1];
            if self.cursor_col > last_vis {
                let mut sc = self.scroll_col;
                loop {
                    let cols = self.visible_columns(sc, available);
                    if cols.is_empty() || *cols.last().unwrap() >= self.cursor_col {
                        break;
                    }
                    sc += 1;
                    if sc >= self.data.num_cols {
                        break;
                    }
                }
                self.scroll_col = sc;
            }
        }
    }

    fn visible_columns(&self, start_col: usize, available: usize) -> Vec<usize> {
        let mut cols = Vec::new();
        let mut used = 0usize;
        for c in start_col..self.data.num_cols {
            let w = self.data.col_widths.get(c).copied().unwrap_or(3) + 1;
            if used + w > available && !cols.is_empty() {
                break;
            }
            used += w;
            cols.push(c);
        }
        cols
    }

    fn pad_cell(&self, text: &str, col: usize) -> String {
        let w = self.data.col_widths.get(col).copied().unwrap_or(3);
        match self.data.aligns.get(col) {
            Some(Align::Right) => util::pad_left(&util::truncate_display(text, w), w),
            _ => util::pad_right(&util::truncate_display(text, w), w),
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

        self.draw_title(frame, chunks[0]);
        self.draw_grid(frame, chunks[1]);
        self.draw_status(frame, chunks[2]);

        if self.show_help {
            self.draw_help(frame, area);
        }
    }

    fn draw_title(&self, frame: &mut Frame, area: Rect) {
        let page_info = if self.view.page_count() > 1 {
            format!(" | page {}/{}", self.view.page() + 1, self.view.page_count())
        } else {
            String::new()
        };

        let title = format!(
            " railmatch: {} | {} rows x {} cols{} ",
            self.view.name(),
            self.view.selected_count(),
            self.data.num_cols,
            page_info
        );
        let para = Paragraph::new(Line::from(vec![Span::styled(
            title,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]))
        .style(Style::default().bg(Color::Cyan));
        frame.render_widget(para, area);
    }

    fn draw_grid(&self, frame: &mut Frame, area: Rect) {
        if self.data.num_rows == 0 || self.data.num_cols == 0 {
            let msg = Paragraph::new("(no rows)").style(Style::default().fg(Color::DarkGray));
            frame.render_widget(msg, area);
            return;
        }

        let grid_available = (area.width as usize).saturating_sub(self.row_num_width + 1);
        let vis_cols = self.visible_columns(self.scroll_col, grid_available);

        let header_height: u16 = 1;
        let data_height = area.height.saturating_sub(header_height);

        // Header line
        let gutter_blank = " ".repeat(self.row_num_width);
        let mut header_spans = vec![Span::styled(
            format!("{} ", gutter_blank),
            Style::default().fg(Color::DarkGray),
        )];
        for &c in &vis_cols {
            let name = self.data.col_names.get(c).map(|s| s.as_str()).unwrap_or("?");
            let mut display = self.pad_cell(name, c);
            if !self.view.filter_text(c).is_empty() {
                // Mark actively filtered columns in the header
                display = self.pad_cell(&format!("{}*", name), c);
            }
            let style = if c == self.cursor_col {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            };
            header_spans.push(Span::styled(format!("{} ", display), style));
        }

        // Data lines
        let visible_rows = data_height as usize;
        let end_row = (self.scroll_row + visible_rows).min(self.data.num_rows);

        let mut lines: Vec<Line> = Vec::with_capacity(visible_rows + 1);
        lines.push(Line::from(header_spans));

        for r in self.scroll_row..end_row {
            let row_data = &self.data.rows[r];
            let is_cursor_row = r == self.cursor_row;
            let flagged = self.data.flagged.get(r).copied().unwrap_or(false);

            let row_num_style = if is_cursor_row {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if flagged {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let mut spans = vec![Span::styled(
                format!(
                    "{:>width$}{}",
                    self.data.row_number(r),
                    if flagged { "!" } else { " " },
                    width = self.row_num_width
                ),
                row_num_style,
            )];

            for &c in &vis_cols {
                let value = row_data.get(c).map(|s| s.as_str()).unwrap_or("");
                let display = self.pad_cell(value, c);
                let has_link = self
                    .data
                    .links
                    .get(r)
                    .and_then(|row| row.get(c))
                    .map(|l| l.is_some())
                    .unwrap_or(false);

                let style = if is_cursor_row && c == self.cursor_col {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else if is_cursor_row {
                    Style::default().fg(Color::White)
                } else if flagged {
                    Style::default().fg(Color::Red)
                } else if has_link {
                    Style::default()
                        .fg(Color::Gray)
                        .add_modifier(Modifier::UNDERLINED)
                } else {
                    Style::default().fg(Color::Gray)
                };

                spans.push(Span::styled(format!("{} ", display), style));
            }

            lines.push(Line::from(spans));
        }

        let para = Paragraph::new(lines);
        frame.render_widget(para, area);
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let left = match &self.mode {
            Mode::Filter { col, buf } => {
                let name = self.data.col_names.get(*col).map(|s| s.as_str()).unwrap_or("?");
                format!(" filter {} = {}_", name, buf)
            }
            Mode::Normal => {
                let (value, link) = match &self.pinned {
                    Some((text, link)) => (text.clone(), link.clone()),
                    None => self.current_cell().unwrap_or_default(),
                };
                let col_name = self
                    .data
                    .col_names
                    .get(self.cursor_col)
                    .map(|s| s.as_str())
                    .unwrap_or("?");
                match link {
                    Some(link) => format!(" {} = {:?} -> {}", col_name, value, link),
                    None => format!(" {} = {:?}", col_name, value),
                }
            }
        };

        let status_info = if self.view.grid().status {
            format!("{}  ", self.view.status_line())
        } else {
            String::new()
        };
        let right = format!(
            "{}Row {}/{}  ?: help ",
            status_info,
            self.data.row_number(self.cursor_row.min(self.data.num_rows.saturating_sub(1))),
            self.view.selected_count()
        );

        let padding = (area.width as usize)
            .saturating_sub(left.chars().count() + right.chars().count());
        let status = format!("{}{:pad$}{}", left, "", right, pad = padding);

        let para = Paragraph::new(Line::from(vec![Span::styled(
            status,
            Style::default().fg(Color::Black).bg(Color::DarkGray),
        )]))
        .style(Style::default().bg(Color::DarkGray));
        frame.render_widget(para, area);
    }

    fn draw_help(&self, frame: &mut Frame, area: Rect) {
        let help_lines = vec![
            "",
            "  Navigation",
            "  ----------",
            "  arrows / hjkl     Move cursor",
            "  PgUp / PgDn       Jump 20 rows",
            "  Home / g          First row",
            "  End  / G          Last row",
            "  0 / $             First/last column",
            "  Tab / Shift+Tab   Next/prev column",
            "  n / p             Next/previous data page",
            "",
            "  View",
            "  ----",
            "  /                 Edit filter for current column",
            "  x                 Clear filter on current column",
            "  s                 Toggle suspicious rows only",
            "  o                 Toggle sort on current column",
            "  Enter             Pin cell text and link below",
            "",
            "  General",
            "  -------",
            "  q / Esc           Quit",
            "  ?                 Toggle this help",
            "",
        ];
        let help_width: u16 = 46;
        let help_height: u16 = help_lines.len() as u16;

        let x = area.width.saturating_sub(help_width) / 2;
        let y = area.height.saturating_sub(help_height) / 2;
        let popup = Rect::new(
            area.x + x,
            area.y + y,
            help_width.min(area.width),
            help_height.min(area.height),
        );

        let lines: Vec<Line> = help_lines
            .iter()
            .map(|s| Line::from(Span::styled(*s, Style::default().fg(Color::White))))
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Keybindings ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .style(Style::default().bg(Color::Black));

        frame.render_widget(Clear, popup);
        let para = Paragraph::new(lines).block(block);
        frame.render_widget(para, popup);
    }
}

fn first_row_number(view: &GridView) -> usize {
    view.page() * view.page_size().unwrap_or(0) + 1
}

/// Run the interactive viewer over a loaded table view.
pub fn run(view: GridView) -> Result<(), String> {
    let app = TuiApp::new(view);
    run_app(app)
}

fn run_app(mut app: TuiApp) -> Result<(), String> {
    terminal::enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {}", e))?;
    stdout()
        .execute(EnterAlternateScreen)
        .map_err(|e| format!("failed to enter alternate screen: {}", e))?;

    struct Cleanup;
    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = stdout().execute(LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        }
    }
    let _cleanup = Cleanup;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create terminal: {}", e))?;

    loop {
        let term_size = terminal
            .size()
            .map(|s| Rect::new(0, 0, s.width, s.height))
            .unwrap_or_default();
        let visible_rows = term_size.height.saturating_sub(3) as usize;
        app.ensure_visible(visible_rows, term_size.width);

        terminal
            .draw(|frame| app.draw(frame))
            .map_err(|e| format!("draw error: {}", e))?;

        if event::poll(Duration::from_millis(100))
            .map_err(|e| format!("event poll error: {}", e))?
        {
            if let Event::Key(key) =
                event::read().map_err(|e| format!("event read error: {}", e))?
            {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Print view rows as a plain text table to stdout (no TUI, no raw mode).
pub fn print_plain(data: &ViewData, max_rows: usize, status: Option<&str>) -> Result<(), String> {
    let out = io::stdout();
    let mut w = out.lock();
    let row_num_width = 6;
    let limit = if max_rows == 0 {
        data.num_rows
    } else {
        max_rows.min(data.num_rows)
    };

    let pad = |text: &str, c: usize| -> String {
        let cw = data.col_widths.get(c).copied().unwrap_or(3);
        match data.aligns.get(c) {
            Some(Align::Right) => util::pad_left(&util::truncate_display(text, cw), cw),
            _ => util::pad_right(&util::truncate_display(text, cw), cw),
        }
    };

    // Header
    write!(w, "{:>width$} ", "", width = row_num_width).map_err(|e| e.to_string())?;
    for c in 0..data.num_cols {
        let name = data.col_names.get(c).map(|s| s.as_str()).unwrap_or("?");
        write!(w, "{} ", pad(name, c)).map_err(|e| e.to_string())?;
    }
    writeln!(w).map_err(|e| e.to_string())?;

    // Separator
    write!(w, "{:->width$}-", "", width = row_num_width).map_err(|e| e.to_string())?;
    for c in 0..data.num_cols {
        let cw = data.col_widths.get(c).copied().unwrap_or(3);
        write!(w, "{}-", "-".repeat(cw)).map_err(|e| e.to_string())?;
    }
    writeln!(w).map_err(|e| e.to_string())?;

    // Rows
    for r in 0..limit {
        let row_data = &data.rows[r];
        let flag = if data.flagged.get(r).copied().unwrap_or(false) {
            '!'
        } else {
            ' '
        };
        write!(
            w,
            "{:>width$}{}",
            data.row_number(r),
            flag,
            width = row_num_width
        )
        .map_err(|e| e.to_string())?;
        for c in 0..data.num_cols {
            let value = row_data.get(c).map(|s| s.as_str()).unwrap_or("");
            write!(w, "{} ", pad(value, c)).map_err(|e| e.to_string())?;
        }
        writeln!(w).map_err(|e| e.to_string())?;
    }

    if limit < data.num_rows {
        writeln!(w, "... ({} more rows)", data.num_rows - limit).map_err(|e| e.to_string())?;
    }

    if let Some(status) = status {
        writeln!(w, "{}", status).map_err(|e| e.to_string())?;
    }

    Ok(())
}
