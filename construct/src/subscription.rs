use crate::error::{Error, Result};
use crate::node::ConstructPath;
use crate::sns::Topic;
use crate::sqs::Queue;
use serde::Serialize;

/// Delivery protocol of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Sqs,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Protocol::Sqs => write!(f, "sqs"),
        }
    }
}

/// A binding between a topic (publisher) and a subscriber
///
/// Only records identities, the subscriber is still owned by its stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscription {
    topic: ConstructPath,
    protocol: Protocol,
    endpoint: ConstructPath,
    raw_message_delivery: bool,
}

impl Subscription {
    pub fn topic(&self) -> &ConstructPath {
        &self.topic
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Path of the subscriber
    pub fn endpoint(&self) -> &ConstructPath {
        &self.endpoint
    }

    pub fn raw_message_delivery(&self) -> bool {
        self.raw_message_delivery
    }
}

/// Anything which can be subscribed to a topic
pub trait TopicSubscription {
    /// Produce the subscription record for the given topic
    fn bind(&self, topic: &Topic) -> Result<Subscription>;
}

/// Deliver topic messages to a queue
#[derive(Debug, Clone)]
pub struct SqsSubscription {
    queue: ConstructPath,
    queue_fifo: bool,
    raw_message_delivery: bool,
}

impl SqsSubscription {
    pub fn new(queue: &Queue) -> Self {
        Self {
            queue: queue.path().clone(),
            queue_fifo: queue.is_fifo(),
            raw_message_delivery: false,
        }
    }

    /// Deliver message bodies as is, without the notification envelope
    pub fn raw_message_delivery(mut self, enabled: bool) -> Self {
        self.raw_message_delivery = enabled;
        self
    }
}

impl TopicSubscription for SqsSubscription {
    fn bind(&self, topic: &Topic) -> Result<Subscription> {
        if topic.is_fifo() != self.queue_fifo {
            return Err(Error::InvalidProperty {
                construct: topic.path().clone(),
                message: if topic.is_fifo() {
                    format!("FIFO topics can only deliver to FIFO queues, {} is not", self.queue)
                } else {
                    format!("FIFO queue {} can only subscribe to FIFO topics", self.queue)
                },
            });
        }

        Ok(Subscription {
            topic: topic.path().clone(),
            protocol: Protocol::Sqs,
            endpoint: self.queue.clone(),
            raw_message_delivery: self.raw_message_delivery,
        })
    }
}
