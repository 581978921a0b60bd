//! Client for the study REST backend.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{AnswerEvent, Card, NewCard, NewTopic, ProgressStats, Topic};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to {action}: server returned {status}")]
    Status {
        action: &'static str,
        status: StatusCode,
    },
    #[error("unexpected response to {action}: {source}")]
    Decode {
        action: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid backend URL: {0}")]
    InvalidUrl(String),
}

/// The six calls the client makes against the backend.
pub trait StudyBackend: Send + Sync {
    fn list_topics(&self) -> impl Future<Output = Result<Vec<Topic>, ApiError>> + Send;

    fn create_topic(&self, topic: &NewTopic) -> impl Future<Output = Result<Topic, ApiError>> + Send;

    fn list_cards(&self, topic_id: &str) -> impl Future<Output = Result<Vec<Card>, ApiError>> + Send;

    fn create_card(&self, card: &NewCard) -> impl Future<Output = Result<Card, ApiError>> + Send;

    fn progress(&self, topic_id: &str) -> impl Future<Output = Result<ProgressStats, ApiError>> + Send;

    fn submit_answer(&self, answer: &AnswerEvent) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// `StudyBackend` over HTTP with reqwest.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        info!(%base_url, "backend client ready");
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Strip trailing slashes and require an http(s) scheme.
pub fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ApiError::InvalidUrl(format!(
            "{raw:?} must start with http:// or https://"
        )));
    }
    Ok(trimmed.to_string())
}

async fn read_json<T: DeserializeOwned>(
    response: Response,
    action: &'static str,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status { action, status });
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|source| ApiError::Decode { action, source })
}

impl StudyBackend for HttpBackend {
    async fn list_topics(&self) -> Result<Vec<Topic>, ApiError> {
        debug!("GET /api/topics");
        let response = self.client.get(self.url("/api/topics")).send().await?;
        read_json(response, "list topics").await
    }

    async fn create_topic(&self, topic: &NewTopic) -> Result<Topic, ApiError> {
        debug!(name = %topic.name, "POST /api/topics");
        let response = self
            .client
            .post(self.url("/api/topics"))
            .json(topic)
            .send()
            .await?;
        read_json(response, "create topic").await
    }

    async fn list_cards(&self, topic_id: &str) -> Result<Vec<Card>, ApiError> {
        debug!(topic_id, "GET /api/cards");
        let response = self
            .client
            .get(self.url("/api/cards"))
            .query(&[("topic_id", topic_id)])
            .send()
            .await?;
        read_json(response, "list cards").await
    }

    async fn create_card(&self, card: &NewCard) -> Result<Card, ApiError> {
        debug!(topic_id = %card.topic_id, "POST /api/cards");
        let response = self
            .client
            .post(self.url("/api/cards"))
            .json(card)
            .send()
            .await?;
        read_json(response, "create card").await
    }

    async fn progress(&self, topic_id: &str) -> Result<ProgressStats, ApiError> {
        debug!(topic_id, "GET /api/progress");
        let response = self
            .client
            .get(self.url("/api/progress"))
            .query(&[("topic_id", topic_id)])
            .send()
            .await?;
        read_json(response, "load progress").await
    }

    async fn submit_answer(&self, answer: &AnswerEvent) -> Result<(), ApiError> {
        debug!(card_id = %answer.card_id, correct = answer.correct, "POST /api/answer");
        let response = self
            .client
            .post(self.url("/api/answer"))
            .json(answer)
            .send()
            .await?;
        // The ack body is not used.
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                action: "record answer",
                status,
            });
        }
        Ok(())
    }
}

/// In-memory backend used by the worker and app tests.
#[cfg(test)]
pub mod memory {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;
    use crate::models::Difficulty;

    #[derive(Default)]
    struct State {
        topics: Vec<Topic>,
        cards: Vec<Card>,
        answers: Vec<AnswerEvent>,
        calls: Vec<String>,
        fail_creates: bool,
        fail_loads: bool,
        slow_topic: Option<(String, Duration)>,
        next_id: u32,
    }

    #[derive(Clone, Default)]
    pub struct MemoryBackend {
        state: Arc<Mutex<State>>,
    }

    impl MemoryBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_topic(self, id: &str, name: &str) -> Self {
            self.state.lock().unwrap().topics.push(Topic {
                id: id.to_string(),
                name: name.to_string(),
                description: None,
            });
            self
        }

        pub fn with_card(self, topic_id: &str, question: &str, answer: &str) -> Self {
            {
                let mut state = self.state.lock().unwrap();
                state.next_id += 1;
                let id = format!("c{}", state.next_id);
                state.cards.push(Card {
                    id,
                    topic_id: topic_id.to_string(),
                    question: question.to_string(),
                    answer: answer.to_string(),
                    difficulty: Difficulty::Medium,
                });
            }
            self
        }

        /// Delay card listing for one topic, to provoke out-of-order responses.
        pub fn with_slow_topic(self, topic_id: &str, delay: Duration) -> Self {
            self.state.lock().unwrap().slow_topic = Some((topic_id.to_string(), delay));
            self
        }

        pub fn fail_creates(&self) {
            self.state.lock().unwrap().fail_creates = true;
        }

        pub fn fail_loads(&self) {
            self.state.lock().unwrap().fail_loads = true;
        }

        pub fn calls(&self) -> Vec<String> {
            self.state.lock().unwrap().calls.clone()
        }

        pub fn answers(&self) -> Vec<AnswerEvent> {
            self.state.lock().unwrap().answers.clone()
        }

        fn record(&self, call: &str) -> bool {
            let mut state = self.state.lock().unwrap();
            state.calls.push(call.to_string());
            state.fail_loads
        }

        fn unavailable(action: &'static str) -> ApiError {
            ApiError::Status {
                action,
                status: StatusCode::SERVICE_UNAVAILABLE,
            }
        }
    }

    impl StudyBackend for MemoryBackend {
        async fn list_topics(&self) -> Result<Vec<Topic>, ApiError> {
            if self.record("list_topics") {
                return Err(Self::unavailable("list topics"));
            }
            Ok(self.state.lock().unwrap().topics.clone())
        }

        async fn create_topic(&self, topic: &NewTopic) -> Result<Topic, ApiError> {
            self.record("create_topic");
            let mut state = self.state.lock().unwrap();
            if state.fail_creates {
                return Err(Self::unavailable("create topic"));
            }
            state.next_id += 1;
            let created = Topic {
                id: format!("t{}", state.next_id),
                name: topic.name.clone(),
                description: Some(topic.description.clone()).filter(|d| !d.is_empty()),
            };
            state.topics.push(created.clone());
            Ok(created)
        }

        async fn list_cards(&self, topic_id: &str) -> Result<Vec<Card>, ApiError> {
            if self.record("list_cards") {
                return Err(Self::unavailable("list cards"));
            }
            let delay = self
                .state
                .lock()
                .unwrap()
                .slow_topic
                .as_ref()
                .filter(|(id, _)| id == topic_id)
                .map(|(_, delay)| *delay);
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let state = self.state.lock().unwrap();
            Ok(state
                .cards
                .iter()
                .filter(|c| c.topic_id == topic_id)
                .cloned()
                .collect())
        }

        async fn create_card(&self, card: &NewCard) -> Result<Card, ApiError> {
            self.record("create_card");
            let mut state = self.state.lock().unwrap();
            if state.fail_creates {
                return Err(Self::unavailable("create card"));
            }
            state.next_id += 1;
            let created = Card {
                id: format!("c{}", state.next_id),
                topic_id: card.topic_id.clone(),
                question: card.question.clone(),
                answer: card.answer.clone(),
                difficulty: card.difficulty,
            };
            state.cards.push(created.clone());
            Ok(created)
        }

        async fn progress(&self, topic_id: &str) -> Result<ProgressStats, ApiError> {
            if self.record("progress") {
                return Err(Self::unavailable("load progress"));
            }
            let state = self.state.lock().unwrap();
            let answers: Vec<_> = state
                .answers
                .iter()
                .filter(|a| a.topic_id == topic_id)
                .collect();
            let total = answers.len() as u64;
            let correct = answers.iter().filter(|a| a.correct).count() as u64;
            let accuracy = if total == 0 {
                0.0
            } else {
                correct as f64 / total as f64
            };
            Ok(ProgressStats {
                total,
                correct,
                accuracy,
            })
        }

        async fn submit_answer(&self, answer: &AnswerEvent) -> Result<(), ApiError> {
            if self.record("submit_answer") {
                return Err(Self::unavailable("record answer"));
            }
            self.state.lock().unwrap().answers.push(answer.clone());
            Ok(())
        }
    }
}
