//! Runs backend requests off the UI thread and hands results back over a channel.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::runtime::{Builder, Runtime};
use tracing::warn;

use crate::api::{ApiError, StudyBackend};
use crate::models::{AnswerEvent, Card, NewCard, NewTopic, SessionSnapshot, Topic};

/// Work the UI asks for. `generation` is echoed back in the matching [`Outcome`].
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    ListTopics {
        generation: u64,
    },
    CreateTopic {
        generation: u64,
        topic: NewTopic,
    },
    ListCards {
        generation: u64,
        topic_id: String,
    },
    CreateCard {
        generation: u64,
        card: NewCard,
    },
    LoadSession {
        generation: u64,
        topic_id: String,
    },
    /// Record an answer, then reload cards and stats for the topic.
    SubmitAnswer {
        generation: u64,
        answer: AnswerEvent,
        advance_from: usize,
    },
}

#[derive(Debug)]
pub enum Outcome {
    TopicsLoaded {
        generation: u64,
        result: Result<Vec<Topic>, ApiError>,
    },
    TopicCreated {
        generation: u64,
        result: Result<Vec<Topic>, ApiError>,
    },
    CardsLoaded {
        generation: u64,
        result: Result<Vec<Card>, ApiError>,
    },
    CardCreated {
        generation: u64,
        result: Result<Vec<Card>, ApiError>,
    },
    SessionLoaded {
        generation: u64,
        advance_from: Option<usize>,
        result: Result<SessionSnapshot, ApiError>,
    },
}

/// Perform one request against the backend.
pub async fn execute<B: StudyBackend>(backend: &B, request: Request) -> Outcome {
    match request {
        Request::ListTopics { generation } => Outcome::TopicsLoaded {
            generation,
            result: backend.list_topics().await,
        },
        Request::CreateTopic { generation, topic } => {
            let result = match backend.create_topic(&topic).await {
                Ok(_) => backend.list_topics().await,
                Err(e) => Err(e),
            };
            Outcome::TopicCreated { generation, result }
        }
        Request::ListCards {
            generation,
            topic_id,
        } => Outcome::CardsLoaded {
            generation,
            result: backend.list_cards(&topic_id).await,
        },
        Request::CreateCard { generation, card } => {
            let result = match backend.create_card(&card).await {
                Ok(_) => backend.list_cards(&card.topic_id).await,
                Err(e) => Err(e),
            };
            Outcome::CardCreated { generation, result }
        }
        Request::LoadSession {
            generation,
            topic_id,
        } => Outcome::SessionLoaded {
            generation,
            advance_from: None,
            result: load_session(backend, &topic_id).await,
        },
        Request::SubmitAnswer {
            generation,
            answer,
            advance_from,
        } => {
            let result = match backend.submit_answer(&answer).await {
                Ok(()) => load_session(backend, &answer.topic_id).await,
                Err(e) => Err(e),
            };
            Outcome::SessionLoaded {
                generation,
                advance_from: Some(advance_from),
                result,
            }
        }
    }
}

/// Fetch cards and stats concurrently.
async fn load_session<B: StudyBackend>(
    backend: &B,
    topic_id: &str,
) -> Result<SessionSnapshot, ApiError> {
    let (cards, stats) = tokio::try_join!(backend.list_cards(topic_id), backend.progress(topic_id))?;
    Ok(SessionSnapshot { cards, stats })
}

/// Owns the async runtime that talks to the backend.
pub struct Worker<B> {
    runtime: Runtime,
    backend: Arc<B>,
    tx: Sender<Outcome>,
    rx: Receiver<Outcome>,
}

impl<B: StudyBackend + 'static> Worker<B> {
    pub fn new(backend: B) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("study-net")
            .enable_all()
            .build()
            .context("Failed to start network runtime")?;
        let (tx, rx) = mpsc::channel();

        Ok(Self {
            runtime,
            backend: Arc::new(backend),
            tx,
            rx,
        })
    }

    /// Queue a request. Its outcome shows up in [`Worker::try_recv`].
    pub fn dispatch(&self, request: Request) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = execute(backend.as_ref(), request).await;
            if tx.send(outcome).is_err() {
                warn!("outcome dropped, UI is gone");
            }
        });
    }

    /// Next finished outcome, if any. Never blocks.
    pub fn try_recv(&self) -> Option<Outcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            // We hold a sender ourselves, so this cannot happen.
            Err(TryRecvError::Disconnected) => None,
        }
    }

    #[cfg(test)]
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<Outcome> {
        self.rx.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::api::memory::MemoryBackend;

    const WAIT: Duration = Duration::from_secs(2);

    #[test]
    fn load_session_fetches_cards_and_progress() {
        let backend = MemoryBackend::new()
            .with_topic("t1", "Rust")
            .with_card("t1", "What is a borrow?", "A reference");
        let worker = Worker::new(backend.clone()).unwrap();

        worker.dispatch(Request::LoadSession {
            generation: 3,
            topic_id: "t1".into(),
        });

        match worker.recv_timeout(WAIT) {
            Some(Outcome::SessionLoaded {
                generation,
                advance_from,
                result,
            }) => {
                assert_eq!(generation, 3);
                assert_eq!(advance_from, None);
                let snapshot = result.unwrap();
                assert_eq!(snapshot.cards.len(), 1);
                assert_eq!(snapshot.stats.total, 0);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        let calls = backend.calls();
        assert!(calls.contains(&"list_cards".to_string()));
        assert!(calls.contains(&"progress".to_string()));
    }

    #[test]
    fn submit_answer_records_then_reloads() {
        let backend = MemoryBackend::new()
            .with_topic("t1", "Rust")
            .with_card("t1", "q1", "a1")
            .with_card("t1", "q2", "a2");
        let worker = Worker::new(backend.clone()).unwrap();

        worker.dispatch(Request::SubmitAnswer {
            generation: 1,
            answer: AnswerEvent {
                card_id: "c1".into(),
                topic_id: "t1".into(),
                correct: true,
            },
            advance_from: 0,
        });

        match worker.recv_timeout(WAIT) {
            Some(Outcome::SessionLoaded {
                advance_from,
                result,
                ..
            }) => {
                assert_eq!(advance_from, Some(0));
                let snapshot = result.unwrap();
                assert_eq!(snapshot.stats.total, 1);
                assert_eq!(snapshot.stats.correct, 1);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(backend.calls()[0], "submit_answer");
        assert_eq!(backend.answers().len(), 1);
    }

    #[test]
    fn failed_create_skips_reload() {
        let backend = MemoryBackend::new();
        backend.fail_creates();
        let worker = Worker::new(backend.clone()).unwrap();

        worker.dispatch(Request::CreateTopic {
            generation: 1,
            topic: NewTopic {
                name: "Rust".into(),
                description: String::new(),
            },
        });

        match worker.recv_timeout(WAIT) {
            Some(Outcome::TopicCreated { result, .. }) => assert!(result.is_err()),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(backend.calls(), vec!["create_topic".to_string()]);
    }

    #[test]
    fn try_recv_is_empty_before_any_dispatch() {
        let worker = Worker::new(MemoryBackend::new()).unwrap();
        assert!(worker.try_recv().is_none());
    }
}
