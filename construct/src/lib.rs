//! Declarative constructs: an app holding stacks, which own queues and topics.
//!
//! Only the declared phase is modeled. Every declaration is validated
//! synchronously and the resulting descriptors can be inspected right away.

pub mod app;
pub mod duration;
pub mod error;
pub mod node;
pub mod sns;
pub mod sqs;
pub mod stack;
pub mod subscription;

pub use app::App;
pub use duration::Duration;
pub use error::{Error, Result};
pub use node::ConstructPath;
pub use sns::{Topic, TopicProps, TopicRef};
pub use sqs::{Queue, QueueProps, QueueRef};
pub use stack::{Environment, Resource, Stack, StackProps};
pub use subscription::{Protocol, SqsSubscription, Subscription, TopicSubscription};
