//! Topic list: load, create-then-reload, inline errors.

use tracing::warn;

use crate::api::ApiError;
use crate::models::{NewTopic, Topic};
use crate::worker::Request;

#[derive(Debug, Default)]
pub struct TopicList {
    pub topics: Vec<Topic>,
    pub loading: bool,
    pub error: Option<String>,

    // Create form
    pub name: String,
    pub description: String,
    /// A create is in flight; further submits are ignored until it lands.
    pub creating: bool,

    generation: u64,
}

impl TopicList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self) -> Request {
        self.error = None;
        self.reload()
    }

    fn reload(&mut self) -> Request {
        self.generation += 1;
        self.loading = true;
        Request::ListTopics {
            generation: self.generation,
        }
    }

    /// Submit the form. A blank name sends nothing.
    pub fn create(&mut self) -> Option<Request> {
        let name = self.name.trim();
        if self.creating || name.is_empty() {
            return None;
        }
        self.creating = true;
        self.generation += 1;
        Some(Request::CreateTopic {
            generation: self.generation,
            topic: NewTopic {
                name: name.to_string(),
                description: self.description.trim().to_string(),
            },
        })
    }

    pub fn apply_loaded(&mut self, generation: u64, result: Result<Vec<Topic>, ApiError>) {
        if generation != self.generation {
            return;
        }
        self.loading = false;
        match result {
            Ok(topics) => self.topics = topics,
            Err(e) => self.fail(e),
        }
    }

    /// Apply a create-then-reload result. A failed create may have superseded
    /// a load, so the list is fetched again and the error stays visible.
    pub fn apply_created(
        &mut self,
        generation: u64,
        result: Result<Vec<Topic>, ApiError>,
    ) -> Option<Request> {
        self.creating = false;
        if generation != self.generation {
            return None;
        }
        self.loading = false;
        match result {
            Ok(topics) => {
                self.name.clear();
                self.description.clear();
                self.topics = topics;
                self.error = None;
                None
            }
            Err(e) => {
                self.fail(e);
                Some(self.reload())
            }
        }
    }

    fn fail(&mut self, e: ApiError) {
        warn!(error = %e, "topic request failed");
        self.error = Some(e.to_string());
    }

    pub fn get(&self, index: usize) -> Option<&Topic> {
        self.topics.get(index)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    fn topic(id: &str) -> Topic {
        Topic {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: None,
        }
    }

    fn generation_of(request: &Request) -> u64 {
        match request {
            Request::ListTopics { generation } | Request::CreateTopic { generation, .. } => {
                *generation
            }
            other => panic!("unexpected request {other:?}"),
        }
    }

    #[test]
    fn blank_name_sends_nothing() {
        let mut list = TopicList::new();
        list.topics = vec![topic("t1")];
        list.name = "   ".into();
        list.description = "ignored".into();

        assert_eq!(list.create(), None);
        assert_eq!(list.topics, vec![topic("t1")]);
        assert_eq!(list.description, "ignored");
    }

    #[test]
    fn create_trims_and_clears_on_success() {
        let mut list = TopicList::new();
        list.name = "  Ownership ".into();
        list.description = " borrowck ".into();

        let request = list.create().unwrap();
        match &request {
            Request::CreateTopic { topic, .. } => {
                assert_eq!(topic.name, "Ownership");
                assert_eq!(topic.description, "borrowck");
            }
            other => panic!("unexpected request {other:?}"),
        }

        list.apply_created(generation_of(&request), Ok(vec![topic("t9")]));
        assert!(list.name.is_empty());
        assert!(list.description.is_empty());
        assert_eq!(list.topics.len(), 1);
    }

    #[test]
    fn create_failure_keeps_form_and_shows_error() {
        let mut list = TopicList::new();
        list.name = "Lifetimes".into();
        let request = list.create().unwrap();

        let reload = list.apply_created(
            generation_of(&request),
            Err(ApiError::Status {
                action: "create topic",
                status: StatusCode::BAD_GATEWAY,
            }),
        );
        assert_eq!(list.name, "Lifetimes");
        assert!(list.error.as_deref().unwrap().contains("failed to create topic"));
        assert!(matches!(reload, Some(Request::ListTopics { .. })));
    }

    #[test]
    fn failed_create_reloads_list_it_superseded() {
        let mut list = TopicList::new();
        let initial = list.load();
        list.name = "Traits".into();
        let create = list.create().unwrap();

        // The initial load lands after the create superseded it.
        list.apply_loaded(generation_of(&initial), Ok(vec![topic("t1")]));
        assert!(list.topics.is_empty());

        let reload = list
            .apply_created(
                generation_of(&create),
                Err(ApiError::Status {
                    action: "create topic",
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                }),
            )
            .unwrap();
        assert!(list.loading);

        list.apply_loaded(generation_of(&reload), Ok(vec![topic("t1")]));
        assert_eq!(list.topics, vec![topic("t1")]);
        assert!(list.error.is_some());
    }

    #[test]
    fn second_submit_waits_for_first() {
        let mut list = TopicList::new();
        list.name = "Macros".into();
        let request = list.create().unwrap();
        assert_eq!(list.create(), None);

        list.apply_created(generation_of(&request), Ok(vec![topic("t1")]));
        list.name = "Generics".into();
        assert!(list.create().is_some());
    }

    #[test]
    fn load_clears_previous_error() {
        let mut list = TopicList::new();
        list.error = Some("boom".into());
        let request = list.load();
        assert!(list.loading);
        assert!(list.error.is_none());

        list.apply_loaded(generation_of(&request), Ok(vec![topic("a"), topic("b")]));
        assert!(!list.loading);
        assert_eq!(list.get(1).map(|t| t.id.as_str()), Some("b"));
    }

    #[test]
    fn superseded_load_is_ignored() {
        let mut list = TopicList::new();
        let first = list.load();
        let second = list.load();
        list.apply_loaded(generation_of(&first), Ok(vec![topic("old")]));
        assert!(list.topics.is_empty());
        assert!(list.loading);
        list.apply_loaded(generation_of(&second), Ok(vec![topic("new")]));
        assert_eq!(list.get(0).unwrap().id, "new");
    }
}
