//! Custom widgets for the study TUI.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Paragraph, Widget, Wrap},
};

use super::theme::{icons, Theme};
use crate::models::{Difficulty, ProgressStats};

// ══════════════════════════════════════════════════════════════════════════
// Logo Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct Logo;

impl Logo {
    const ART: &'static str = r#"
 ____  _             _
/ ___|| |_ _   _  __| |_   _
\___ \| __| | | |/ _` | | | |
 ___) | |_| |_| | (_| | |_| |
|____/ \__|\__,_|\__,_|\__, |
                       |___/ "#;

    pub fn render_to(theme: &Theme, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = Self::ART
            .lines()
            .skip(1)
            .map(|line| Line::from(Span::styled(line, Style::default().fg(theme.colors.primary))))
            .collect();

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Progress Bar Widget
// ══════════════════════════════════════════════════════════════════════════

/// Rotation size plus the topic's answer stats.
pub struct ProgressBar<'a> {
    cards_in_rotation: usize,
    stats: &'a ProgressStats,
    theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(cards_in_rotation: usize, stats: &'a ProgressStats, theme: &'a Theme) -> Self {
        Self {
            cards_in_rotation,
            stats,
            theme,
        }
    }

    fn cell(&self, label: &'a str, value: String, value_style: Style) -> Line<'a> {
        Line::from(vec![
            Span::styled(label, Style::default().fg(self.theme.colors.text_muted)),
            Span::styled(value, value_style),
        ])
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::horizontal([Constraint::Percentage(25); 4]).split(area);
        let strong = Style::default()
            .fg(self.theme.colors.primary)
            .add_modifier(Modifier::BOLD);

        let cells = [
            self.cell("In rotation: ", self.cards_in_rotation.to_string(), strong),
            self.cell("Answers: ", self.stats.total.to_string(), strong),
            self.cell(
                "Correct: ",
                self.stats.correct.to_string(),
                Style::default().fg(self.theme.colors.success).add_modifier(Modifier::BOLD),
            ),
            self.cell("Accuracy: ", self.stats.accuracy_label(), strong),
        ];

        for (cell, chunk) in cells.into_iter().zip(chunks.iter()) {
            Paragraph::new(cell)
                .alignment(Alignment::Center)
                .render(*chunk, buf);
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Flashcard Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct FlashcardWidget<'a> {
    question: &'a str,
    answer: Option<&'a str>,
    difficulty: Difficulty,
    theme: &'a Theme,
}

impl<'a> FlashcardWidget<'a> {
    pub fn new(
        question: &'a str,
        answer: Option<&'a str>,
        difficulty: Difficulty,
        theme: &'a Theme,
    ) -> Self {
        Self {
            question,
            answer,
            difficulty,
            theme,
        }
    }
}

impl Widget for FlashcardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.answer.is_some() {
            Style::default().fg(self.theme.colors.success)
        } else {
            Style::default().fg(self.theme.colors.accent)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .style(Style::default().bg(self.theme.colors.bg_card))
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled("QUESTION", self.theme.card_front()),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center)
            .title_bottom(
                Line::from(Span::styled(
                    format!(" {} ", self.difficulty.name()),
                    Style::default().fg(self.difficulty.color_for_theme(self.theme)),
                ))
                .right_aligned(),
            );

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::from(Span::styled(
            self.question,
            Style::default().fg(self.theme.colors.text).add_modifier(Modifier::BOLD),
        ))];
        if let Some(answer) = self.answer {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("ANSWER", self.theme.card_back())));
            lines.extend(answer.lines().map(|line| {
                Line::from(Span::styled(line, Style::default().fg(self.theme.colors.secondary)))
            }));
        }

        // Center vertically
        let content_height = lines.len() as u16;
        let vertical_padding = inner.height.saturating_sub(content_height) / 2;

        let content_area = Rect {
            x: inner.x + 2,
            y: inner.y + vertical_padding,
            width: inner.width.saturating_sub(4),
            height: inner.height.saturating_sub(vertical_padding),
        };

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(content_area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Answer Buttons Widget
// ══════════════════════════════════════════════════════════════════════════

/// The reveal / wrong / right controls under the card.
pub struct AnswerButtons<'a> {
    showing_answer: bool,
    theme: &'a Theme,
}

impl<'a> AnswerButtons<'a> {
    pub fn new(showing_answer: bool, theme: &'a Theme) -> Self {
        Self {
            showing_answer,
            theme,
        }
    }
}

impl Widget for AnswerButtons<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);

        let reveal = if self.showing_answer {
            "Hide answer"
        } else {
            "Show answer"
        };
        let buttons = [
            ("Space", reveal.to_string(), self.theme.colors.text_muted),
            ("1", format!("{} I was wrong", icons::CROSS), self.theme.colors.error),
            ("2", format!("{} I was right", icons::CHECK), self.theme.colors.success),
        ];

        for ((key, label, color), chunk) in buttons.into_iter().zip(chunks.iter()) {
            let button = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color));

            let inner = button.inner(*chunk);
            button.render(*chunk, buf);

            Paragraph::new(Line::from(vec![
                Span::styled(key, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(label, Style::default().fg(color)),
            ]))
            .alignment(Alignment::Center)
            .render(inner, buf);
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Key Hints Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct KeyHints<'a> {
    hints: &'a [(&'a str, &'a str)],
    theme: &'a Theme,
}

impl<'a> KeyHints<'a> {
    pub fn new(hints: &'a [(&'a str, &'a str)], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }
}

impl Widget for KeyHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans: Vec<Span> = self
            .hints
            .iter()
            .flat_map(|(key, desc)| {
                vec![
                    Span::styled(*key, self.theme.key_highlight()),
                    Span::styled(format!(" {} ", desc), self.theme.key_hint()),
                    Span::styled("│ ", Style::default().fg(self.theme.colors.text_dim)),
                ]
            })
            .collect();

        let line = Line::from(spans);
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Notice Widget
// ══════════════════════════════════════════════════════════════════════════

/// A centered one-off message ("Loading...", "No cards yet", errors).
pub struct Notice<'a> {
    message: &'a str,
    style: Style,
}

impl<'a> Notice<'a> {
    pub fn new(message: &'a str, style: Style) -> Self {
        Self { message, style }
    }
}

impl Widget for Notice<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let padding = area.height.saturating_sub(1) / 2;
        let area = Rect {
            y: area.y + padding,
            height: area.height.saturating_sub(padding),
            ..area
        };
        Paragraph::new(self.message)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(self.style)
            .render(area, buf);
    }
}
