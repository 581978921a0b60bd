//! The study loop: one card at a time, record right/wrong, advance.
//!
//! The session never talks to the network itself. Operations return the
//! [`Request`] to dispatch, and results come back through
//! [`StudySession::apply_loaded`]. Each topic selection bumps a generation
//! number so that a late response for an earlier topic is dropped instead of
//! overwriting the current one.

use tracing::{debug, warn};

use crate::api::ApiError;
use crate::models::{AnswerEvent, Card, ProgressStats, SessionSnapshot, Topic};
use crate::worker::Request;

/// What the study screen should show.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    NoTopic,
    Loading,
    NoCards,
    Question,
    Answer,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct StudySession {
    topic: Option<Topic>,
    generation: u64,
    cards: Vec<Card>,
    stats: ProgressStats,
    index: usize,
    showing_answer: bool,
    loading: bool,
    error: Option<String>,
}

impl StudySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the session at a new topic (or none). Resets position and hides the answer.
    pub fn select_topic(&mut self, topic: Option<Topic>) -> Option<Request> {
        self.generation += 1;
        self.topic = topic;
        self.cards.clear();
        self.stats = ProgressStats::default();
        self.index = 0;
        self.showing_answer = false;
        self.error = None;
        self.load()
    }

    /// Reload the current topic, e.g. after a failure.
    pub fn retry(&mut self) -> Option<Request> {
        self.generation += 1;
        self.error = None;
        self.load()
    }

    fn load(&mut self) -> Option<Request> {
        let topic = self.topic.as_ref()?;
        self.loading = true;
        Some(Request::LoadSession {
            generation: self.generation,
            topic_id: topic.id.clone(),
        })
    }

    pub fn state(&self) -> SessionState {
        if self.topic.is_none() {
            SessionState::NoTopic
        } else if self.loading {
            SessionState::Loading
        } else if let Some(ref message) = self.error {
            SessionState::Failed(message.clone())
        } else if self.cards.is_empty() {
            SessionState::NoCards
        } else if self.showing_answer {
            SessionState::Answer
        } else {
            SessionState::Question
        }
    }

    /// Toggle answer visibility. Only meaningful while a card is on screen.
    pub fn reveal(&mut self) {
        if matches!(self.state(), SessionState::Question | SessionState::Answer) {
            self.showing_answer = !self.showing_answer;
        }
    }

    /// Record an answer for the current card. The reload that follows decides
    /// where the session lands.
    pub fn submit_answer(&mut self, correct: bool) -> Option<Request> {
        if !matches!(self.state(), SessionState::Question | SessionState::Answer) {
            return None;
        }
        let topic = self.topic.as_ref()?;
        let card = self.cards.get(self.index)?;

        let request = Request::SubmitAnswer {
            generation: self.generation,
            answer: AnswerEvent {
                card_id: card.id.clone(),
                topic_id: topic.id.clone(),
                correct,
            },
            advance_from: self.index,
        };
        self.loading = true;
        Some(request)
    }

    /// Apply fetched cards and stats. Returns `false` when the response was stale.
    pub fn apply_loaded(
        &mut self,
        generation: u64,
        advance_from: Option<usize>,
        result: Result<SessionSnapshot, ApiError>,
    ) -> bool {
        if generation != self.generation {
            debug!(generation, current = self.generation, "dropping stale session response");
            return false;
        }

        self.loading = false;
        match result {
            Ok(snapshot) => {
                self.cards = snapshot.cards;
                self.stats = snapshot.stats;
                self.index = match advance_from {
                    Some(prev) if !self.cards.is_empty() => (prev + 1) % self.cards.len(),
                    _ => 0,
                };
                self.showing_answer = false;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "study session request failed");
                self.error = Some(e.to_string());
            }
        }
        true
    }

    pub fn topic(&self) -> Option<&Topic> {
        self.topic.as_ref()
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.cards.get(self.index)
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn stats(&self) -> &ProgressStats {
        &self.stats
    }

    pub fn is_answer_shown(&self) -> bool {
        self.showing_answer
    }
}
