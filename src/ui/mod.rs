use std::io::Stdout;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Terminal;

mod helpers;
mod types;

use helpers::{
    continuation_prefix, fill_area, format_comment_date, format_relative_time, restore_terminal,
    sanitize_text, setup_terminal, thread_prefix, truncate_or_pad, wrap_text,
};
use types::{next_field, ComposeState, LoadingState, Screen};

use crate::cache::{self, CommentCache};
use crate::config::Config;
use crate::thread::{build_thread_tree, flatten_thread, ThreadItem};
use crate::types::{Comment, Draft, DraftField, PageContext};
use crate::{api, avatar};

const BG_COLOR: Color = Color::Rgb(22, 22, 22);
const POPUP_BG: Color = Color::Rgb(40, 40, 50);
const CURSOR_BG: Color = Color::Rgb(45, 45, 65); // Highlight for the selected comment

/// Application state
pub struct App {
    config: Config,
    screen: Screen,
    loading: LoadingState,

    // Page list state
    selected_page: usize,
    page_scroll: usize,
    cache: CommentCache,

    // Thread view state
    current_page: Option<PageContext>,
    items: Vec<ThreadItem>,
    selected_item: usize,
    thread_scroll: usize,
    thread_error: Option<String>,
    thread_loaded: bool, // distinguishes "still loading" from "zero comments"
    came_from_list: bool,

    // Composer
    compose: ComposeState,
    should_quit: bool,

    // Async receivers for non-blocking operations
    fetch_receiver: Option<mpsc::Receiver<Result<Vec<Comment>, String>>>,
    submit_receiver: Option<mpsc::Receiver<Result<(), String>>>,
}

impl App {
    /// Create app in page list mode
    pub fn new_with_pages(config: Config) -> Self {
        Self {
            cache: cache::load_cache(),
            config,
            screen: Screen::PageList,
            loading: LoadingState::Idle,

            selected_page: 0,
            page_scroll: 0,

            current_page: None,
            items: Vec::new(),
            selected_item: 0,
            thread_scroll: 0,
            thread_error: None,
            thread_loaded: false,
            came_from_list: true,

            compose: ComposeState::Closed,
            should_quit: false,

            fetch_receiver: None,
            submit_receiver: None,
        }
    }

    /// Create app directly in a page's thread view (for `kaiwa <page-id>`)
    pub fn new_with_thread(config: Config, page: PageContext, comments: Vec<Comment>) -> Self {
        let mut app = Self::new_with_pages(config);
        app.screen = Screen::Thread;
        app.came_from_list = false;
        app.current_page = Some(page);
        app.apply_comments(comments);
        app
    }

    fn accent(&self) -> Color {
        let c = self.config.display.accent;
        Color::Rgb(c.r, c.g, c.b)
    }

    /// Thread the fetched collection, resolve avatars, flatten for display
    /// and refresh the page cache. The avatar map is rebuilt on every fetch.
    fn apply_comments(&mut self, comments: Vec<Comment>) {
        let avatars = avatar::build_avatar_map(
            &comments,
            &self.config.avatar_host,
            self.config.avatar_size,
        );
        let tree = build_thread_tree(comments);
        self.items = flatten_thread(&tree, &avatars);
        self.selected_item = 0;
        self.thread_scroll = 0;
        self.thread_error = None;
        self.thread_loaded = true;

        if let Some(ref page) = self.current_page {
            self.cache.record(&page.page_id, self.items.len());
            cache::save_cache(&self.cache);
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            // Check for async comment fetch completion
            if let Some(ref receiver) = self.fetch_receiver {
                if let Ok(result) = receiver.try_recv() {
                    match result {
                        Ok(comments) => self.apply_comments(comments),
                        Err(e) => {
                            // The list region shows the failure in place;
                            // no automatic retry
                            self.thread_error = Some(e);
                            self.thread_loaded = true;
                        }
                    }
                    self.loading = LoadingState::Idle;
                    self.fetch_receiver = None;
                }
            }

            // Check for async submit completion. A result arriving after
            // the composer was closed is dropped; the request itself was
            // never cancelled.
            if let Some(ref receiver) = self.submit_receiver {
                if let Ok(result) = receiver.try_recv() {
                    if let ComposeState::Submitting { draft } = self.compose.clone() {
                        self.compose = match result {
                            Ok(()) => ComposeState::Success {
                                since: Instant::now(),
                            },
                            // Re-arm the form for retry with the typed
                            // content preserved
                            Err(e) => ComposeState::Open {
                                draft,
                                focus: DraftField::Content,
                                error: Some(format!("Failed to submit: {}", e)),
                            },
                        };
                    }
                    self.submit_receiver = None;
                }
            }

            // The success acknowledgment closes itself after a fixed delay
            if self.compose.success_expired(Instant::now()) {
                self.compose = ComposeState::Closed;
            }

            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Key handling
    // ========================================================================

    fn handle_key(&mut self, key: KeyEvent) {
        // Composer input takes precedence over everything else
        if !self.compose.is_closed() {
            self.handle_key_compose(key);
            return;
        }

        // If loading, only allow quit
        if matches!(self.loading, LoadingState::Loading(_)) {
            if key.code == KeyCode::Char('q') || key.code == KeyCode::Esc {
                self.should_quit = true;
            }
            return;
        }

        match self.screen {
            Screen::PageList => self.handle_key_page_list(key),
            Screen::Thread => self.handle_key_thread(key),
        }
    }

    fn handle_key_compose(&mut self, key: KeyEvent) {
        // Closing discards the draft. An in-flight POST is not cancelled;
        // its late result is dropped by the event loop.
        if key.code == KeyCode::Esc {
            self.compose = ComposeState::Closed;
            return;
        }

        let is_submit = match key.code {
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::CONTROL) => true,
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
            _ => false,
        };

        if is_submit {
            // The submit action is disabled while a POST is in flight or
            // the acknowledgment is showing
            if matches!(self.compose, ComposeState::Open { .. }) {
                self.try_submit();
            }
            return;
        }

        if let ComposeState::Open {
            ref mut draft,
            ref mut focus,
            ref mut error,
        } = self.compose
        {
            match key.code {
                KeyCode::Tab => *focus = next_field(*focus),
                KeyCode::BackTab => *focus = next_field(next_field(*focus)),
                KeyCode::Enter => {
                    if *focus == DraftField::Content {
                        draft.content.push('\n');
                    } else {
                        *focus = next_field(*focus);
                    }
                }
                KeyCode::Backspace => {
                    draft.field_mut(*focus).pop();
                    *error = None;
                }
                KeyCode::Char(c) => {
                    draft.field_mut(*focus).push(c);
                    *error = None;
                }
                _ => {}
            }
        }
    }

    fn handle_key_page_list(&mut self, key: KeyEvent) {
        let page_count = self.config.pages.len();

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => {
                if page_count > 0 {
                    self.selected_page = (self.selected_page + 1) % page_count;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if page_count > 0 {
                    self.selected_page = self
                        .selected_page
                        .checked_sub(1)
                        .unwrap_or(page_count - 1);
                }
            }
            KeyCode::Enter => self.open_selected_page(),
            _ => {}
        }
    }

    fn handle_key_thread(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                // Back to the page list when we came from it, otherwise quit
                if self.came_from_list && !self.config.pages.is_empty() {
                    self.screen = Screen::PageList;
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if !self.items.is_empty() && self.selected_item + 1 < self.items.len() {
                    self.selected_item += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected_item = self.selected_item.saturating_sub(1);
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let jump = self.config.display.scroll_lines;
                self.selected_item =
                    (self.selected_item + jump).min(self.items.len().saturating_sub(1));
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let jump = self.config.display.scroll_lines;
                self.selected_item = self.selected_item.saturating_sub(jump);
            }
            KeyCode::Char('g') => self.selected_item = 0,
            KeyCode::Char('G') => {
                self.selected_item = self.items.len().saturating_sub(1);
            }
            KeyCode::Char('n') => self.compose = ComposeState::open_new(),
            KeyCode::Char('r') => {
                if let Some(item) = self.items.get(self.selected_item) {
                    self.compose = ComposeState::open_reply(item.id.clone(), item.author.clone());
                }
            }
            KeyCode::Char('R') => self.start_fetch(),
            _ => {}
        }
    }

    // ========================================================================
    // Background operations
    // ========================================================================

    fn open_selected_page(&mut self) {
        let Some(entry) = self.config.pages.get(self.selected_page) else {
            return;
        };
        let Some(page) = self.config.page_context(&entry.id) else {
            return;
        };

        // Rebind the composer target: one composer instance exists and it
        // always targets the page being viewed
        self.current_page = Some(page);
        self.screen = Screen::Thread;
        self.items.clear();
        self.selected_item = 0;
        self.thread_scroll = 0;
        self.thread_error = None;
        self.thread_loaded = false;
        self.came_from_list = true;
        self.start_fetch();
    }

    /// Fetch all comment pages for the current page context in the
    /// background - results are processed in event_loop
    fn start_fetch(&mut self) {
        let Some(page) = self.current_page.clone() else {
            return;
        };

        self.loading = LoadingState::Loading(format!(
            "Loading comments for {} ...",
            page.page_title
        ));
        self.thread_error = None;

        let (tx, rx) = mpsc::channel();
        self.fetch_receiver = Some(rx);

        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let result = rt.block_on(async {
                let client = api::client()?;
                api::fetch_all_comments(&client, &page).await
            });

            let _ = tx.send(result.map_err(|e| e.to_string()));
        });
    }

    /// Validate the draft and, if it passes, POST it in the background.
    /// Validation failures focus the offending field and never reach the
    /// network.
    fn try_submit(&mut self) {
        let ComposeState::Open { draft, .. } = self.compose.clone() else {
            return;
        };

        if let Err(field) = draft.validate() {
            let message = match field {
                DraftField::Name => "Name is required",
                DraftField::Content => "Comment text is required",
                DraftField::Email => "Invalid email",
            };
            self.compose = ComposeState::Open {
                draft,
                focus: field,
                error: Some(message.to_string()),
            };
            return;
        }

        let Some(page) = self.current_page.clone() else {
            return;
        };

        let (tx, rx) = mpsc::channel();
        self.submit_receiver = Some(rx);
        self.compose = ComposeState::Submitting {
            draft: draft.clone(),
        };

        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let result = rt.block_on(async {
                let client = api::client()?;
                api::submit_comment(&client, &page, &draft).await
            });

            let _ = tx.send(result.map_err(|e| e.to_string()));
        });
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    fn render(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        fill_area(frame.buffer_mut(), area, BG_COLOR);

        match self.screen {
            Screen::PageList => self.render_page_list(frame),
            Screen::Thread => self.render_thread(frame),
        }

        self.render_compose_overlay(frame);
    }

    fn render_page_list(&mut self, frame: &mut ratatui::Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let header = Paragraph::new(Line::from(vec![
            Span::styled(" kaiwa ", Style::default().fg(self.accent()).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("— {}", self.config.host),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL).title(" Pages "));
        frame.render_widget(header, chunks[0]);

        let list_area = chunks[1];
        let visible = list_area.height as usize;

        // Keep the selection in view
        if self.selected_page < self.page_scroll {
            self.page_scroll = self.selected_page;
        }
        if visible > 0 && self.selected_page >= self.page_scroll + visible {
            self.page_scroll = self.selected_page + 1 - visible;
        }

        let mut lines: Vec<Line> = Vec::new();
        for (i, page) in self
            .config
            .pages
            .iter()
            .enumerate()
            .skip(self.page_scroll)
            .take(visible)
        {
            let selected = i == self.selected_page;
            let marker = if selected { "> " } else { "  " };
            let title_style = if selected {
                Style::default()
                    .fg(Color::White)
                    .bg(CURSOR_BG)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let mut spans = vec![
                Span::styled(marker, Style::default().fg(self.accent())),
                Span::styled(truncate_or_pad(&page.title, 28), title_style),
                Span::styled(format!("  {}", page.id), Style::default().fg(Color::DarkGray)),
            ];

            if let Some(entry) = self.cache.entry(&page.id) {
                spans.push(Span::styled(
                    format!(
                        "  · {} comment(s) · fetched {}",
                        entry.count,
                        format_relative_time(&entry.fetched_at)
                    ),
                    Style::default().fg(Color::DarkGray),
                ));
            }

            lines.push(Line::from(spans));
        }

        if self.config.pages.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No pages configured — add [[pages]] entries to config.toml",
                Style::default().fg(Color::DarkGray),
            )));
        }

        frame.render_widget(Paragraph::new(lines), list_area);

        self.render_footer(
            frame,
            chunks[2],
            " j/k: navigate  Enter: open  q: quit",
        );
    }

    fn render_thread(&mut self, frame: &mut ratatui::Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let (title, url) = match self.current_page {
            Some(ref page) => (page.page_title.clone(), page.page_url.clone()),
            None => (String::new(), String::new()),
        };

        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {} ", title),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(url, Style::default().fg(Color::DarkGray)),
        ]))
        .block(Block::default().borders(Borders::ALL).title(" Comments "));
        frame.render_widget(header, chunks[0]);

        let body = chunks[1];

        if let Some(ref err) = self.thread_error {
            // Fetch failure replaces the list region; nothing else on the
            // screen is affected
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  Failed to load comments.",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("  {}", err),
                    Style::default().fg(Color::Red),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "  Press R to reload, Esc to go back.",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            frame.render_widget(Paragraph::new(lines), body);
        } else if self.thread_loaded && self.items.is_empty() {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  No comments yet — press n to leave one.",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            frame.render_widget(Paragraph::new(lines), body);
        } else if self.thread_loaded {
            let width = body.width.saturating_sub(2) as usize;
            let (lines, ranges) = self.build_thread_lines(width);

            // Keep the selected comment fully in view
            let visible = body.height as usize;
            if let Some(&(start, len)) = ranges.get(self.selected_item) {
                if start < self.thread_scroll {
                    self.thread_scroll = start;
                }
                let end = start + len;
                if visible > 0 && end > self.thread_scroll + visible {
                    self.thread_scroll = end.saturating_sub(visible);
                }
            }

            let para = Paragraph::new(lines).scroll((self.thread_scroll as u16, 0));
            frame.render_widget(para, body);
        }

        self.render_footer(
            frame,
            chunks[2],
            " j/k: select  n: new comment  r: reply  R: reload  Esc: back  q: quit",
        );
    }

    /// Build the display lines for the whole thread plus each item's
    /// (first line, line count) range for scroll bookkeeping
    fn build_thread_lines(&self, width: usize) -> (Vec<Line<'static>>, Vec<(usize, usize)>) {
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut ranges: Vec<(usize, usize)> = Vec::new();

        for (idx, item) in self.items.iter().enumerate() {
            let start = lines.len();
            let selected = idx == self.selected_item;

            let prefix = thread_prefix(item.depth, item.is_last, &item.ancestors_last);
            let cont = continuation_prefix(item.depth, item.is_last, &item.ancestors_last);

            let author_style = if selected {
                Style::default()
                    .fg(Color::White)
                    .bg(CURSOR_BG)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            };

            let mut header_spans = vec![Span::styled(
                prefix,
                Style::default().fg(Color::DarkGray),
            )];
            if item.has_avatar {
                header_spans.push(Span::styled("◉ ", Style::default().fg(self.accent())));
            }
            header_spans.push(Span::styled(item.author.clone(), author_style));
            header_spans.push(Span::styled(
                format!(" · {}", format_comment_date(&item.created_at)),
                Style::default().fg(Color::DarkGray),
            ));
            lines.push(Line::from(header_spans));

            // Comment text is sanitized before it reaches the terminal
            let text_width = width.saturating_sub(cont.chars().count()).max(10);
            for text_line in wrap_text(&sanitize_text(&item.content), text_width) {
                lines.push(Line::from(vec![
                    Span::styled(cont.clone(), Style::default().fg(Color::DarkGray)),
                    Span::styled(text_line, Style::default().fg(Color::Gray)),
                ]));
            }

            // Separator keeps sibling bars connected between items
            lines.push(Line::from(Span::styled(
                cont,
                Style::default().fg(Color::DarkGray),
            )));

            ranges.push((start, lines.len() - start));
        }

        (lines, ranges)
    }

    fn render_footer(&self, frame: &mut ratatui::Frame, area: Rect, hints: &str) {
        let line = match self.loading {
            LoadingState::Loading(ref msg) => Line::from(Span::styled(
                format!(" ⟳ {}", msg),
                Style::default().fg(Color::Yellow),
            )),
            LoadingState::Idle => {
                Line::from(Span::styled(hints.to_string(), Style::default().fg(Color::DarkGray)))
            }
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    // ========================================================================
    // Composer overlay
    // ========================================================================

    fn render_compose_overlay(&self, frame: &mut ratatui::Frame) {
        match &self.compose {
            ComposeState::Closed => {}
            ComposeState::Open { draft, focus, error } => {
                self.render_composer(frame, draft, Some(*focus), error.as_deref(), false);
            }
            ComposeState::Submitting { draft } => {
                self.render_composer(frame, draft, None, None, true);
            }
            ComposeState::Success { .. } => self.render_success(frame),
        }
    }

    fn centered_popup(&self, frame: &ratatui::Frame, width: u16, height: u16) -> Rect {
        let area = frame.area();
        let popup_width = width.min(area.width.saturating_sub(4));
        let popup_height = height.min(area.height.saturating_sub(2));
        Rect {
            x: area.x + (area.width.saturating_sub(popup_width)) / 2,
            y: area.y + (area.height.saturating_sub(popup_height)) / 2,
            width: popup_width,
            height: popup_height,
        }
    }

    fn render_composer(
        &self,
        frame: &mut ratatui::Frame,
        draft: &Draft,
        focus: Option<DraftField>,
        error: Option<&str>,
        submitting: bool,
    ) {
        let popup_area = self.centered_popup(frame, 70, 16);

        let title = if submitting {
            format!(" {} — submitting... ", draft.title())
        } else {
            format!(" {} (Ctrl+S submit, Tab next field, Esc cancel) ", draft.title())
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.accent()));
        let inner = block.inner(popup_area);

        fill_area(frame.buffer_mut(), popup_area, POPUP_BG);
        frame.render_widget(block, popup_area);

        let buf = frame.buffer_mut();
        let mut y = inner.y;
        let max_y = inner.y + inner.height;

        // Reply context line distinguishes the two modes
        if let Some(context) = draft.context_line() {
            if y < max_y {
                buf.set_string(
                    inner.x,
                    y,
                    truncate_or_pad(&context, inner.width as usize),
                    Style::default().fg(Color::DarkGray).bg(POPUP_BG).add_modifier(Modifier::ITALIC),
                );
                y += 1;
                if y < max_y {
                    y += 1; // blank spacer under the context line
                }
            }
        }

        let field_width = inner.width.saturating_sub(9) as usize;
        let single_fields = [
            (DraftField::Name, "Name   ", draft.author_name.as_str()),
            (DraftField::Email, "Email  ", draft.author_email.as_str()),
        ];

        for (field, label, value) in single_fields {
            if y >= max_y {
                break;
            }
            let focused = focus == Some(field);
            let label_style = if focused {
                Style::default().fg(self.accent()).bg(POPUP_BG).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray).bg(POPUP_BG)
            };
            buf.set_string(inner.x, y, label, label_style);

            let mut shown = value.to_string();
            if focused {
                shown.push('_');
            } else if shown.is_empty() && field == DraftField::Email {
                shown = "(optional)".to_string();
            }
            let value_style = if focused {
                Style::default().fg(Color::White).bg(POPUP_BG)
            } else {
                Style::default().fg(Color::Gray).bg(POPUP_BG)
            };
            buf.set_string(
                inner.x + 9,
                y,
                truncate_or_pad(&shown, field_width),
                value_style,
            );
            y += 1;
        }

        // Comment body: label line, then the wrapped text
        if y < max_y {
            let focused = focus == Some(DraftField::Content);
            let label_style = if focused {
                Style::default().fg(self.accent()).bg(POPUP_BG).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray).bg(POPUP_BG)
            };
            buf.set_string(inner.x, y, "Comment", label_style);
            y += 1;

            let wrap_width = inner.width.saturating_sub(1) as usize;
            let mut body_lines = wrap_text(&draft.content, wrap_width);
            if focused {
                if let Some(last) = body_lines.last_mut() {
                    last.push('_');
                }
            }

            // Reserve the bottom line for the error/status message
            let body_bottom = max_y.saturating_sub(1);
            for text_line in body_lines {
                if y >= body_bottom {
                    break;
                }
                buf.set_string(
                    inner.x,
                    y,
                    truncate_or_pad(&text_line, wrap_width),
                    Style::default().fg(Color::White).bg(POPUP_BG),
                );
                y += 1;
            }
        }

        let status_y = max_y.saturating_sub(1);
        if submitting {
            buf.set_string(
                inner.x,
                status_y,
                "Submitting...",
                Style::default().fg(Color::Yellow).bg(POPUP_BG),
            );
        } else if let Some(message) = error {
            buf.set_string(
                inner.x,
                status_y,
                truncate_or_pad(message, inner.width as usize),
                Style::default().fg(Color::Red).bg(POPUP_BG),
            );
        }
    }

    fn render_success(&self, frame: &mut ratatui::Frame) {
        let popup_area = self.centered_popup(frame, 50, 6);

        let block = Block::default()
            .title(" Thank you ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));
        let inner = block.inner(popup_area);

        fill_area(frame.buffer_mut(), popup_area, POPUP_BG);
        frame.render_widget(block, popup_area);

        let buf = frame.buffer_mut();
        buf.set_string(
            inner.x + 1,
            inner.y + 1,
            "✓ Comment submitted",
            Style::default()
                .fg(Color::Green)
                .bg(POPUP_BG)
                .add_modifier(Modifier::BOLD),
        );
        buf.set_string(
            inner.x + 1,
            inner.y + 2,
            "It will appear once it has been approved.",
            Style::default().fg(Color::Gray).bg(POPUP_BG),
        );
    }
}
