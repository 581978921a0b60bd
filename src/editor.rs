//! Card editor: the selected topic's cards plus a create form.

use tracing::warn;

use crate::api::ApiError;
use crate::models::{Card, Difficulty, NewCard, Topic};
use crate::worker::Request;

#[derive(Debug, Default)]
pub struct CardEditor {
    topic: Option<Topic>,
    pub cards: Vec<Card>,
    pub error: Option<String>,

    // Create form
    pub question: String,
    pub answer: String,
    pub difficulty: Difficulty,
    /// A create is in flight; further submits are ignored until it lands.
    pub creating: bool,

    generation: u64,
}

impl CardEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow the coordinator's selection. Loads the topic's cards.
    pub fn set_topic(&mut self, topic: Option<Topic>) -> Option<Request> {
        self.generation += 1;
        self.topic = topic;
        self.cards.clear();
        self.error = None;
        self.load()
    }

    pub fn load(&mut self) -> Option<Request> {
        let topic = self.topic.as_ref()?;
        self.generation += 1;
        Some(Request::ListCards {
            generation: self.generation,
            topic_id: topic.id.clone(),
        })
    }

    /// Submit the form. Needs a topic and a non-blank question and answer.
    pub fn create(&mut self) -> Option<Request> {
        let topic = self.topic.as_ref()?;
        if self.creating || self.question.trim().is_empty() || self.answer.trim().is_empty() {
            return None;
        }
        self.creating = true;
        self.generation += 1;
        Some(Request::CreateCard {
            generation: self.generation,
            card: NewCard {
                topic_id: topic.id.clone(),
                question: self.question.clone(),
                answer: self.answer.clone(),
                difficulty: self.difficulty,
            },
        })
    }

    pub fn apply_loaded(&mut self, generation: u64, result: Result<Vec<Card>, ApiError>) {
        if generation != self.generation {
            return;
        }
        match result {
            Ok(cards) => self.cards = cards,
            Err(e) => self.fail(e),
        }
    }

    /// Apply a create-then-reload result. On failure the list may be stale, so
    /// a fresh load is returned for dispatch.
    pub fn apply_created(
        &mut self,
        generation: u64,
        result: Result<Vec<Card>, ApiError>,
    ) -> Option<Request> {
        // Only one create is ever in flight.
        self.creating = false;
        if generation != self.generation {
            return None;
        }
        match result {
            Ok(cards) => {
                self.question.clear();
                self.answer.clear();
                self.difficulty = Difficulty::Medium;
                self.cards = cards;
                self.error = None;
                None
            }
            Err(e) => {
                self.fail(e);
                self.load()
            }
        }
    }

    fn fail(&mut self, e: ApiError) {
        warn!(error = %e, "card request failed");
        self.error = Some(e.to_string());
    }

    pub fn topic(&self) -> Option<&Topic> {
        self.topic.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic() -> Topic {
        Topic {
            id: "t1".into(),
            name: "Rust".into(),
            description: Some("systems".into()),
        }
    }

    fn card(id: &str) -> Card {
        Card {
            id: id.into(),
            topic_id: "t1".into(),
            question: "q".into(),
            answer: "a".into(),
            difficulty: Difficulty::Hard,
        }
    }

    #[test]
    fn no_topic_no_requests() {
        let mut editor = CardEditor::new();
        assert_eq!(editor.set_topic(None), None);
        editor.question = "q".into();
        editor.answer = "a".into();
        assert_eq!(editor.create(), None);
    }

    #[test]
    fn blank_question_or_answer_sends_nothing() {
        let mut editor = CardEditor::new();
        editor.set_topic(Some(topic()));

        editor.question = "What is Send?".into();
        editor.answer = "  ".into();
        assert_eq!(editor.create(), None);

        editor.question = String::new();
        editor.answer = "A marker trait".into();
        assert_eq!(editor.create(), None);
    }

    #[test]
    fn successful_create_resets_form() {
        let mut editor = CardEditor::new();
        let load = editor.set_topic(Some(topic())).unwrap();
        assert!(matches!(load, Request::ListCards { ref topic_id, .. } if topic_id == "t1"));

        editor.question = "What is Sync?".into();
        editor.answer = "&T is Send".into();
        editor.difficulty = Difficulty::Hard;
        let request = editor.create().unwrap();
        let generation = match &request {
            Request::CreateCard { generation, card } => {
                assert_eq!(card.topic_id, "t1");
                assert_eq!(card.difficulty, Difficulty::Hard);
                *generation
            }
            other => panic!("unexpected request {other:?}"),
        };

        editor.apply_created(generation, Ok(vec![card("c1")]));
        assert!(editor.question.is_empty());
        assert!(editor.answer.is_empty());
        assert_eq!(editor.difficulty, Difficulty::Medium);
        assert_eq!(editor.cards.len(), 1);
    }

    #[test]
    fn late_initial_load_does_not_hide_new_card() {
        let mut editor = CardEditor::new();
        let initial = editor.set_topic(Some(topic())).unwrap();
        let initial_generation = match initial {
            Request::ListCards { generation, .. } => generation,
            other => panic!("unexpected request {other:?}"),
        };

        editor.question = "What is Pin?".into();
        editor.answer = "A pointer that cannot move its pointee".into();
        let generation = match editor.create().unwrap() {
            Request::CreateCard { generation, .. } => generation,
            other => panic!("unexpected request {other:?}"),
        };

        assert_eq!(editor.apply_created(generation, Ok(vec![card("c1")])), None);
        editor.apply_loaded(initial_generation, Ok(Vec::new()));
        assert_eq!(editor.cards.len(), 1);
    }

    #[test]
    fn second_submit_waits_for_first() {
        let mut editor = CardEditor::new();
        editor.set_topic(Some(topic()));
        editor.question = "q".into();
        editor.answer = "a".into();

        let request = editor.create().unwrap();
        assert_eq!(editor.create(), None);

        let generation = match request {
            Request::CreateCard { generation, .. } => generation,
            other => panic!("unexpected request {other:?}"),
        };
        let err = ApiError::Status {
            action: "create card",
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        };
        let reload = editor.apply_created(generation, Err(err));
        assert!(matches!(reload, Some(Request::ListCards { .. })));
        assert!(editor.error.is_some());
        assert!(!editor.creating);
        assert!(editor.create().is_some());
    }

    #[test]
    fn cards_for_previous_topic_are_ignored() {
        let mut editor = CardEditor::new();
        let old = editor.set_topic(Some(topic())).unwrap();
        let old_generation = match old {
            Request::ListCards { generation, .. } => generation,
            other => panic!("unexpected request {other:?}"),
        };
        editor.set_topic(Some(Topic {
            id: "t2".into(),
            name: "Go".into(),
            description: None,
        }));

        editor.apply_loaded(old_generation, Ok(vec![card("c1")]));
        assert!(editor.cards.is_empty());
        assert_eq!(editor.topic().unwrap().id, "t2");
    }
}
