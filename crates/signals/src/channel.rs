//! In-process signal bus
//!
//! One entry per topic, holding whether it has fired and the handlers still
//! waiting for it. Handlers are taken out under the topic's lock and run
//! after it is released, so a handler may itself publish or subscribe.

use crate::topics::Topics;
use dashmap::DashMap;
use herald_ports::{SignalBus, SignalError, SignalHandler, SignalResult};
use log::{debug, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::oneshot;

/// Per-topic state
#[derive(Default)]
struct TopicState {
    /// Number of times the topic has been published
    publish_count: u64,
    /// Handlers waiting for the next publish
    waiting: Vec<SignalHandler>,
}

/// Channel-style bus for single-process operation
pub struct ChannelSignalBus {
    topics: DashMap<String, TopicState>,
    closed: AtomicBool,
}

impl ChannelSignalBus {
    pub fn new() -> Self {
        Self {
            topics: DashMap::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Subscribe once and receive the signal on a oneshot channel
    ///
    /// The receiver errors if the bus is closed before the topic fires.
    pub fn listen(&self, topic: &str, replay_if_fired: bool) -> SignalResult<oneshot::Receiver<()>> {
        let (tx, rx) = oneshot::channel();
        self.subscribe_once(
            topic,
            Box::new(move || {
                let _ = tx.send(());
            }),
            replay_if_fired,
        )?;
        Ok(rx)
    }

    /// Number of times a topic has been published
    pub fn publish_count(&self, topic: &str) -> u64 {
        self.topics
            .get(topic)
            .map(|state| state.publish_count)
            .unwrap_or(0)
    }

    /// Number of handlers still waiting on a topic
    pub fn waiting(&self, topic: &str) -> usize {
        self.topics
            .get(topic)
            .map(|state| state.waiting.len())
            .unwrap_or(0)
    }

    /// Close the bus: pending handlers are dropped, further calls fail
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            let dropped: usize = self.topics.iter().map(|t| t.waiting.len()).sum();
            self.topics.clear();
            debug!("Signal bus closed, dropped {} pending handlers", dropped);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn check(&self, topic: &str) -> SignalResult<()> {
        if self.is_closed() {
            return Err(SignalError::Closed);
        }
        if !Topics::is_valid(topic) {
            return Err(SignalError::InvalidTopic(topic.to_string()));
        }
        Ok(())
    }
}

impl Default for ChannelSignalBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalBus for ChannelSignalBus {
    fn subscribe_once(
        &self,
        topic: &str,
        handler: SignalHandler,
        replay_if_fired: bool,
    ) -> SignalResult<()> {
        self.check(topic)?;

        let mut state = self.topics.entry(topic.to_string()).or_default();
        if replay_if_fired && state.publish_count > 0 {
            drop(state);
            debug!("Replaying already-fired topic {}", topic);
            handler();
            return Ok(());
        }
        state.waiting.push(handler);
        Ok(())
    }

    fn publish(&self, topic: &str) -> SignalResult<()> {
        self.check(topic)?;

        let handlers = {
            let mut state = self.topics.entry(topic.to_string()).or_default();
            state.publish_count += 1;
            if state.publish_count > 1 {
                warn!(
                    "Topic {} published {} times",
                    topic, state.publish_count
                );
            }
            std::mem::take(&mut state.waiting)
        };

        debug!("Publishing {} to {} handlers", topic, handlers.len());
        for handler in handlers {
            handler();
        }
        Ok(())
    }

    fn has_fired(&self, topic: &str) -> bool {
        self.publish_count(topic) > 0
    }
}
