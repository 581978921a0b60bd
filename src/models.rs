//! Data models for topics, cards and study progress as the backend serves them.

use serde::{Deserialize, Serialize};

/// How hard a card is, as tagged by its author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Easy => Self::Hard,
            Self::Medium => Self::Easy,
            Self::Hard => Self::Medium,
        }
    }

    pub fn color_for_theme(&self, theme: &crate::ui::theme::Theme) -> ratatui::style::Color {
        match self {
            Self::Easy => theme.colors.difficulty_easy,
            Self::Medium => theme.colors.difficulty_medium,
            Self::Hard => theme.colors.difficulty_hard,
        }
    }
}

/// A named subject with its own set of cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `POST /api/topics`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTopic {
    pub name: String,
    pub description: String,
}

/// A question/answer pair belonging to exactly one topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub topic_id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub difficulty: Difficulty,
}

/// Body of `POST /api/cards`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCard {
    pub topic_id: String,
    pub question: String,
    pub answer: String,
    pub difficulty: Difficulty,
}

/// Body of `POST /api/answer`. The server stamps the time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerEvent {
    pub card_id: String,
    pub topic_id: String,
    pub correct: bool,
}

/// Aggregate answer counts for a topic, derived server-side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub correct: u64,
    /// Ratio reported by the server. Display goes through [`ProgressStats::accuracy`].
    #[serde(default)]
    pub accuracy: f64,
}

impl ProgressStats {
    /// `correct / total`, or 0 when nothing has been answered yet.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }

    /// Accuracy as a whole percentage, e.g. `"67%"`.
    pub fn accuracy_label(&self) -> String {
        format!("{:.0}%", self.accuracy() * 100.0)
    }
}

/// Cards and stats for one topic, fetched together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub cards: Vec<Card>,
    pub stats: ProgressStats,
}
