//! Main application state and logic.
//!
//! `App` is the coordinator: it owns the selected topic and hands copies of it
//! to the study session and the card editor. All backend traffic goes through
//! the [`Worker`]; finished requests are drained once per tick in
//! [`App::pump`].

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use tracing::{info, warn};
use unicode_width::UnicodeWidthStr;

use super::theme::{icons, Theme};
use super::widgets::{AnswerButtons, FlashcardWidget, KeyHints, Logo, Notice, ProgressBar};
use crate::api::StudyBackend;
use crate::config::Config;
use crate::editor::CardEditor;
use crate::models::Topic;
use crate::session::{SessionState, StudySession};
use crate::topics::TopicList;
use crate::worker::{Outcome, Request, Worker};

// ══════════════════════════════════════════════════════════════════════════
// Application State
// ══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Topics,
    Study,
    Cards,
}

impl Screen {
    fn next(&self) -> Self {
        match self {
            Screen::Topics => Screen::Study,
            Screen::Study => Screen::Cards,
            Screen::Cards => Screen::Topics,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Screen::Topics => "Topics",
            Screen::Study => "Study",
            Screen::Cards => "Cards",
        }
    }
}

pub struct App<B> {
    pub screen: Screen,
    pub running: bool,

    // Config and theme
    pub config: Config,
    pub theme: Theme,

    worker: Worker<B>,

    /// The one selected topic. Session and editor only ever get copies.
    pub selected: Option<Topic>,

    // Topics screen
    pub topics: TopicList,
    pub topic_list_state: ListState,
    pub creating_topic: bool,
    pub topic_form_focus: usize, // 0 = name, 1 = description

    // Study screen
    pub session: StudySession,

    // Cards screen
    pub editor: CardEditor,
    pub card_list_state: ListState,
    pub creating_card: bool,
    pub card_form_focus: usize, // 0 = question, 1 = answer, 2 = difficulty
}

impl<B: StudyBackend + 'static> App<B> {
    pub fn new(worker: Worker<B>, config: Config) -> Self {
        let theme = Theme::from_name(&config.theme);

        let mut app = Self {
            screen: Screen::Topics,
            running: true,
            config,
            theme,
            worker,
            selected: None,
            topics: TopicList::new(),
            topic_list_state: ListState::default(),
            creating_topic: false,
            topic_form_focus: 0,
            session: StudySession::new(),
            editor: CardEditor::new(),
            card_list_state: ListState::default(),
            creating_card: false,
            card_form_focus: 0,
        };
        let load = app.topics.load();
        app.worker.dispatch(load);
        app
    }

    fn dispatch(&self, request: Option<Request>) {
        if let Some(request) = request {
            self.worker.dispatch(request);
        }
    }

    /// Apply every outcome the worker has finished since the last tick.
    pub fn pump(&mut self) {
        while let Some(outcome) = self.worker.try_recv() {
            self.apply(outcome);
        }
    }

    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::TopicsLoaded { generation, result } => {
                self.topics.apply_loaded(generation, result);
                self.clamp_topic_selection();
            }
            Outcome::TopicCreated { generation, result } => {
                let reload = self.topics.apply_created(generation, result);
                self.dispatch(reload);
                self.clamp_topic_selection();
            }
            Outcome::CardsLoaded { generation, result } => {
                self.editor.apply_loaded(generation, result);
                self.clamp_card_selection();
            }
            Outcome::CardCreated { generation, result } => {
                let reload = self.editor.apply_created(generation, result);
                self.dispatch(reload);
                self.clamp_card_selection();
            }
            Outcome::SessionLoaded {
                generation,
                advance_from,
                result,
            } => {
                self.session.apply_loaded(generation, advance_from, result);
            }
        }
    }

    fn clamp_topic_selection(&mut self) {
        clamp(&mut self.topic_list_state, self.topics.topics.len());
    }

    fn clamp_card_selection(&mut self) {
        clamp(&mut self.card_list_state, self.editor.cards.len());
    }

    /// Make the highlighted topic the selected one and fan it out.
    pub fn select_highlighted_topic(&mut self) -> bool {
        let Some(topic) = self
            .topic_list_state
            .selected()
            .and_then(|i| self.topics.get(i))
            .cloned()
        else {
            return false;
        };

        if self.selected.as_ref().map(|t| t.id.as_str()) == Some(topic.id.as_str()) {
            return true;
        }

        info!(topic_id = %topic.id, name = %topic.name, "topic selected");
        self.selected = Some(topic);
        let session_load = self.session.select_topic(self.selected.clone());
        let cards_load = self.editor.set_topic(self.selected.clone());
        self.dispatch(session_load);
        self.dispatch(cards_load);
        self.card_list_state = ListState::default();
        true
    }

    pub fn toggle_theme(&mut self) {
        let new_theme_name = self.theme.name.toggle();
        self.theme = Theme::new(new_theme_name);
        self.config.theme = new_theme_name.as_str().to_string();
        if let Err(e) = self.config.save() {
            warn!(error = %e, "could not persist theme");
        }
    }

    pub fn submit_topic(&mut self) {
        if let Some(request) = self.topics.create() {
            self.worker.dispatch(request);
            self.creating_topic = false;
            self.topic_form_focus = 0;
        }
    }

    pub fn submit_card(&mut self) {
        if let Some(request) = self.editor.create() {
            self.worker.dispatch(request);
            self.card_form_focus = 0;
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Event Handling
    // ══════════════════════════════════════════════════════════════════════

    pub fn handle_events(&mut self) -> anyhow::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        match self.screen {
            Screen::Topics if self.creating_topic => self.handle_topic_form_keys(key),
            Screen::Topics => self.handle_topic_keys(key),
            Screen::Study => self.handle_study_keys(key),
            Screen::Cards if self.creating_card => self.handle_card_form_keys(key),
            Screen::Cards => self.handle_card_keys(key),
        }
    }

    fn handle_topic_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Tab => self.screen = self.screen.next(),
            KeyCode::Up | KeyCode::Char('k') => step(&mut self.topic_list_state, self.topics.topics.len(), false),
            KeyCode::Down | KeyCode::Char('j') => step(&mut self.topic_list_state, self.topics.topics.len(), true),
            KeyCode::Enter => {
                if self.select_highlighted_topic() {
                    self.screen = Screen::Study;
                }
            }
            KeyCode::Char('c') => {
                if self.select_highlighted_topic() {
                    self.screen = Screen::Cards;
                }
            }
            KeyCode::Char('n') => {
                self.creating_topic = true;
                self.topic_form_focus = 0;
            }
            KeyCode::Char('r') => {
                let load = self.topics.load();
                self.worker.dispatch(load);
            }
            _ => {}
        }
    }

    fn handle_topic_form_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.creating_topic = false,
            KeyCode::Tab => self.topic_form_focus = (self.topic_form_focus + 1) % 2,
            KeyCode::Enter => {
                if self.topic_form_focus == 0 {
                    self.topic_form_focus = 1;
                } else {
                    self.submit_topic();
                }
            }
            KeyCode::Char(c) => {
                if self.topic_form_focus == 0 {
                    self.topics.name.push(c);
                } else {
                    self.topics.description.push(c);
                }
            }
            KeyCode::Backspace => {
                if self.topic_form_focus == 0 {
                    self.topics.name.pop();
                } else {
                    self.topics.description.pop();
                }
            }
            _ => {}
        }
    }

    fn handle_study_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => self.screen = Screen::Topics,
            KeyCode::Tab => self.screen = self.screen.next(),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char(' ') => self.session.reveal(),
            KeyCode::Char('1') | KeyCode::Char('n') | KeyCode::Left => {
                let request = self.session.submit_answer(false);
                self.dispatch(request);
            }
            KeyCode::Char('2') | KeyCode::Char('y') | KeyCode::Right => {
                let request = self.session.submit_answer(true);
                self.dispatch(request);
            }
            KeyCode::Char('r') => {
                let request = self.session.retry();
                self.dispatch(request);
            }
            KeyCode::Char('c') => self.screen = Screen::Cards,
            _ => {}
        }
    }

    fn handle_card_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => self.screen = Screen::Topics,
            KeyCode::Tab => self.screen = self.screen.next(),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Up | KeyCode::Char('k') => step(&mut self.card_list_state, self.editor.cards.len(), false),
            KeyCode::Down | KeyCode::Char('j') => step(&mut self.card_list_state, self.editor.cards.len(), true),
            KeyCode::Char('a') => {
                if self.editor.topic().is_some() {
                    self.creating_card = true;
                    self.card_form_focus = 0;
                }
            }
            KeyCode::Char('r') => {
                let request = self.editor.load();
                self.dispatch(request);
            }
            KeyCode::Char('s') => self.screen = Screen::Study,
            _ => {}
        }
    }

    fn handle_card_form_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.creating_card = false,
            KeyCode::Tab => self.card_form_focus = (self.card_form_focus + 1) % 3,
            KeyCode::BackTab => self.card_form_focus = (self.card_form_focus + 2) % 3,
            KeyCode::Enter => {
                if self.card_form_focus < 2 {
                    self.card_form_focus += 1;
                } else {
                    self.submit_card();
                }
            }
            KeyCode::Left if self.card_form_focus == 2 => {
                self.editor.difficulty = self.editor.difficulty.prev();
            }
            KeyCode::Right | KeyCode::Char(' ') if self.card_form_focus == 2 => {
                self.editor.difficulty = self.editor.difficulty.next();
            }
            KeyCode::Char(c) => match self.card_form_focus {
                0 => self.editor.question.push(c),
                1 => self.editor.answer.push(c),
                _ => {}
            },
            KeyCode::Backspace => match self.card_form_focus {
                0 => {
                    self.editor.question.pop();
                }
                1 => {
                    self.editor.answer.pop();
                }
                _ => {}
            },
            _ => {}
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Rendering
    // ══════════════════════════════════════════════════════════════════════

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Clear with background
        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.colors.bg)),
            area,
        );

        let chunks = Layout::vertical([
            Constraint::Length(1), // Tabs
            Constraint::Min(5),    // Screen
        ])
        .split(area);

        self.render_tabs(frame, chunks[0]);

        match self.screen {
            Screen::Topics => self.render_topics(frame, chunks[1]),
            Screen::Study => self.render_study(frame, chunks[1]),
            Screen::Cards => self.render_cards(frame, chunks[1]),
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for screen in [Screen::Topics, Screen::Study, Screen::Cards] {
            let style = if screen == self.screen {
                self.theme.highlight().add_modifier(Modifier::UNDERLINED)
            } else {
                self.theme.subtitle()
            };
            spans.push(Span::styled(format!(" {} ", screen.title()), style));
        }
        if let Some(ref topic) = self.selected {
            spans.push(Span::styled(
                format!("   {} {}", icons::BOOK, topic.name),
                Style::default().fg(self.theme.colors.accent),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_topics(&mut self, frame: &mut Frame, area: Rect) {
        let form_height = if self.creating_topic { 6 } else { 0 };
        let chunks = Layout::vertical([
            Constraint::Length(6),           // Logo
            Constraint::Length(1),           // Subtitle
            Constraint::Length(form_height), // Create form
            Constraint::Min(3),              // Topic list
            Constraint::Length(1),           // Error
            Constraint::Length(2),           // Hints
        ])
        .split(area);

        Logo::render_to(&self.theme, chunks[0], frame.buffer_mut());
        frame.render_widget(
            Paragraph::new("Create and pick a topic to study")
                .alignment(Alignment::Center)
                .style(self.theme.subtitle()),
            chunks[1],
        );

        if self.creating_topic {
            let form = Layout::vertical([Constraint::Length(3), Constraint::Length(3)])
                .split(centered_rect(60, 100, chunks[2]));
            let fields = [
                (" Topic name ", self.topics.name.as_str(), form[0]),
                (" Description (optional) ", self.topics.description.as_str(), form[1]),
            ];
            for (i, (title, value, field_area)) in fields.into_iter().enumerate() {
                let focused = self.topic_form_focus == i;
                frame.render_widget(self.input_box(title, value, focused), field_area);
                if focused {
                    place_cursor(frame, field_area, value);
                }
            }
        }

        let list_area = centered_rect(60, 100, chunks[3]);
        if self.topics.loading {
            frame.render_widget(
                Notice::new("Loading...", Style::default().fg(self.theme.colors.warning)),
                list_area,
            );
        } else if self.topics.topics.is_empty() {
            frame.render_widget(
                Notice::new("No topics yet. Press n to create one.", self.theme.subtitle()),
                list_area,
            );
        } else {
            let selected_id = self.selected.as_ref().map(|t| t.id.as_str());
            let items: Vec<ListItem> = self
                .topics
                .topics
                .iter()
                .map(|topic| {
                    let marker = if Some(topic.id.as_str()) == selected_id {
                        Span::styled("● ", Style::default().fg(self.theme.colors.accent))
                    } else {
                        Span::raw("  ")
                    };
                    let mut lines = vec![Line::from(vec![
                        marker,
                        Span::styled(&topic.name, Style::default().add_modifier(Modifier::BOLD)),
                    ])];
                    if let Some(ref description) = topic.description {
                        lines.push(Line::from(Span::styled(
                            format!("  {}", description),
                            Style::default().fg(self.theme.colors.text_muted),
                        )));
                    }
                    ListItem::new(lines)
                })
                .collect();

            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(self.theme.colors.primary))
                        .title(" Topics ")
                        .title_style(self.theme.highlight()),
                )
                .highlight_style(self.theme.selected())
                .highlight_symbol("> ");

            frame.render_stateful_widget(list, list_area, &mut self.topic_list_state);
        }

        self.render_error(frame, chunks[4], self.topics.error.as_deref());

        let theme_hint = format!("[{}]", self.theme.name.display_name());
        let hints_data: Vec<(&str, &str)> = if self.creating_topic {
            vec![("Tab", "switch field"), ("Enter", "add"), ("Esc", "cancel")]
        } else {
            vec![
                ("j/k", "nav"),
                ("Enter", "study"),
                ("c", "cards"),
                ("n", "new"),
                ("r", "reload"),
                ("t", theme_hint.as_str()),
                ("q", "quit"),
            ]
        };
        frame.render_widget(KeyHints::new(&hints_data, &self.theme), chunks[5]);
    }

    fn render_study(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(2),  // Header
            Constraint::Length(1),  // Progress
            Constraint::Length(1),  // Separator
            Constraint::Min(8),     // Card
            Constraint::Length(1),  // Separator
            Constraint::Length(3),  // Buttons
            Constraint::Length(2),  // Hints
        ])
        .split(area);

        let state = self.session.state();
        let body = chunks[3];

        let message = match state {
            SessionState::NoTopic => Some((
                "Select a topic to start studying.".to_string(),
                self.theme.subtitle(),
            )),
            SessionState::Loading => Some((
                "Loading...".to_string(),
                Style::default().fg(self.theme.colors.warning),
            )),
            SessionState::NoCards => Some((
                "No cards yet for this topic. Add some cards first.".to_string(),
                self.theme.subtitle(),
            )),
            SessionState::Failed(ref error) => Some((
                format!("{error}\nPress r to retry."),
                self.theme.error(),
            )),
            SessionState::Question | SessionState::Answer => None,
        };

        if let Some(topic) = self.session.topic() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(&topic.name, self.theme.title())))
                    .alignment(Alignment::Center),
                chunks[0],
            );
        }

        match message {
            Some((text, style)) => {
                frame.render_widget(Notice::new(&text, style), body);
                let hints = if matches!(state, SessionState::Failed(_) | SessionState::NoCards) {
                    KeyHints::new(&[("r", "reload"), ("c", "cards"), ("Esc", "topics")], &self.theme)
                } else {
                    KeyHints::new(&[("c", "cards"), ("Esc", "topics")], &self.theme)
                };
                frame.render_widget(hints, chunks[6]);
            }
            None => {
                frame.render_widget(
                    ProgressBar::new(self.session.card_count(), self.session.stats(), &self.theme),
                    chunks[1],
                );

                if let Some(card) = self.session.current_card() {
                    let answer = self
                        .session
                        .is_answer_shown()
                        .then_some(card.answer.as_str());
                    frame.render_widget(
                        FlashcardWidget::new(&card.question, answer, card.difficulty, &self.theme),
                        centered_rect(80, 100, body),
                    );
                }

                frame.render_widget(
                    AnswerButtons::new(self.session.is_answer_shown(), &self.theme),
                    centered_rect(90, 100, chunks[5]),
                );

                let position = format!("card {}/{}", self.session.index() + 1, self.session.card_count());
                let hints_data = [
                    ("Space", "show/hide"),
                    ("1", "wrong"),
                    ("2", "right"),
                    ("Esc", "topics"),
                    ("", position.as_str()),
                ];
                frame.render_widget(KeyHints::new(&hints_data, &self.theme), chunks[6]);
            }
        }
    }

    fn render_cards(&mut self, frame: &mut Frame, area: Rect) {
        let form_height = if self.creating_card { 9 } else { 0 };
        let chunks = Layout::vertical([
            Constraint::Length(2),           // Title
            Constraint::Length(form_height), // Create form
            Constraint::Min(3),              // Card list
            Constraint::Length(1),           // Error
            Constraint::Length(2),           // Hints
        ])
        .split(centered_rect(70, 100, area));

        let topic_name = self.editor.topic().map(|t| t.name.as_str()).unwrap_or("—");
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Cards for: ", self.theme.title()),
                Span::styled(topic_name, self.theme.highlight()),
            ]))
            .alignment(Alignment::Center),
            chunks[0],
        );

        if self.creating_card {
            let form = Layout::vertical([Constraint::Length(3); 3]).split(chunks[1]);
            let fields = [
                (" Question ", self.editor.question.as_str(), form[0]),
                (" Answer ", self.editor.answer.as_str(), form[1]),
            ];
            for (i, (title, value, field_area)) in fields.into_iter().enumerate() {
                let focused = self.card_form_focus == i;
                frame.render_widget(self.input_box(title, value, focused), field_area);
                if focused {
                    place_cursor(frame, field_area, value);
                }
            }

            let difficulty = self.editor.difficulty;
            let picker = Line::from(vec![
                Span::raw("◀ "),
                Span::styled(
                    difficulty.name(),
                    Style::default()
                        .fg(difficulty.color_for_theme(&self.theme))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" ▶"),
            ]);
            frame.render_widget(
                Paragraph::new(picker)
                    .alignment(Alignment::Center)
                    .block(self.input_block(" Difficulty ", self.card_form_focus == 2)),
                form[2],
            );
        }

        let list_area = chunks[2];
        if self.editor.topic().is_none() {
            frame.render_widget(
                Notice::new("Select a topic to add cards.", self.theme.subtitle()),
                list_area,
            );
        } else if self.editor.cards.is_empty() {
            frame.render_widget(
                Notice::new("No cards yet. Press a to add one.", self.theme.subtitle()),
                list_area,
            );
        } else {
            let width = list_area.width.saturating_sub(6).max(10) as usize;
            let items: Vec<ListItem> = self
                .editor
                .cards
                .iter()
                .map(|card| {
                    let mut lines = vec![Line::from(Span::styled(
                        card.difficulty.name().to_uppercase(),
                        Style::default().fg(card.difficulty.color_for_theme(&self.theme)),
                    ))];
                    for line in textwrap::wrap(&format!("Q: {}", card.question), width) {
                        lines.push(Line::from(Span::styled(
                            line.into_owned(),
                            Style::default().fg(self.theme.colors.text).add_modifier(Modifier::BOLD),
                        )));
                    }
                    for line in textwrap::wrap(&format!("A: {}", card.answer), width) {
                        lines.push(Line::from(Span::styled(
                            line.into_owned(),
                            Style::default().fg(self.theme.colors.secondary),
                        )));
                    }
                    lines.push(Line::from(""));
                    ListItem::new(lines)
                })
                .collect();

            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(self.theme.colors.primary))
                        .title(format!(" {} cards ", self.editor.cards.len()))
                        .title_style(self.theme.highlight()),
                )
                .highlight_style(self.theme.selected())
                .highlight_symbol("> ");
            frame.render_stateful_widget(list, list_area, &mut self.card_list_state);
        }

        self.render_error(frame, chunks[3], self.editor.error.as_deref());

        let hints = if self.creating_card {
            KeyHints::new(
                &[("Tab", "next field"), ("←/→", "difficulty"), ("Enter", "add card"), ("Esc", "done")],
                &self.theme,
            )
        } else {
            KeyHints::new(
                &[("j/k", "scroll"), ("a", "add"), ("s", "study"), ("r", "reload"), ("Esc", "topics")],
                &self.theme,
            )
        };
        frame.render_widget(hints, chunks[4]);
    }

    fn render_error(&self, frame: &mut Frame, area: Rect, error: Option<&str>) {
        if let Some(error) = error {
            frame.render_widget(
                Paragraph::new(error)
                    .alignment(Alignment::Center)
                    .style(self.theme.error()),
                area,
            );
        }
    }

    fn input_block<'a>(&self, title: &'a str, focused: bool) -> Block<'a> {
        let style = self.theme.input(focused);
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style)
            .title(title)
            .title_style(style)
    }

    fn input_box<'a>(&self, title: &'a str, value: &'a str, focused: bool) -> Paragraph<'a> {
        Paragraph::new(value)
            .style(Style::default().fg(self.theme.colors.text))
            .block(self.input_block(title, focused))
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Helper Functions
// ══════════════════════════════════════════════════════════════════════════

/// Create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Put the terminal cursor at the end of a bordered single-line input.
fn place_cursor(frame: &mut Frame, field: Rect, value: &str) {
    let max_x = field.x + field.width.saturating_sub(2);
    let x = (field.x + 1).saturating_add(value.width() as u16).min(max_x);
    frame.set_cursor_position(Position::new(x, field.y + 1));
}

/// Move a list selection one step, wrapping at both ends.
fn step(state: &mut ListState, len: usize, forward: bool) {
    if len == 0 {
        state.select(None);
        return;
    }
    let i = state.selected().unwrap_or(0);
    let next = if forward {
        (i + 1) % len
    } else if i == 0 {
        len - 1
    } else {
        i - 1
    };
    state.select(Some(next));
}

/// Keep a selection inside a list that just changed length.
fn clamp(state: &mut ListState, len: usize) {
    match state.selected() {
        _ if len == 0 => state.select(None),
        None => state.select(Some(0)),
        Some(i) if i >= len => state.select(Some(len - 1)),
        Some(_) => {}
    }
}
