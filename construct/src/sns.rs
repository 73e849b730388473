use crate::error::{Error, Result};
use crate::node::ConstructPath;
use crate::subscription::{Subscription, TopicSubscription};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

const FIFO_SUFFIX: &str = ".fifo";

static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,256}$").expect("Failed to init regexp"));

/// Properties of a topic, by default nothing is set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopicProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fifo: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_based_deduplication: Option<bool>,
}

/// Handle to a topic declared in a stack
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicRef(pub(crate) ConstructPath);

impl TopicRef {
    pub fn path(&self) -> &ConstructPath {
        &self.0
    }
}

/// Declared topic with the subscriptions bound to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    path: ConstructPath,
    logical_id: String,
    fifo: bool,
    properties: TopicProps,
    subscriptions: Vec<Subscription>,
}

impl Topic {
    pub(crate) fn new(path: ConstructPath, properties: TopicProps) -> Result<Self> {
        let fifo = Self::validate(&path, &properties)?;

        Ok(Self {
            logical_id: path.logical_id(),
            path,
            fifo,
            properties,
            subscriptions: vec![],
        })
    }

    pub fn path(&self) -> &ConstructPath {
        &self.path
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    pub fn properties(&self) -> &TopicProps {
        &self.properties
    }

    pub fn is_fifo(&self) -> bool {
        self.fifo
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// Bind a subscriber to the topic
    ///
    /// Every endpoint can be subscribed only once.
    pub fn add_subscription(
        &mut self,
        subscription: impl TopicSubscription,
    ) -> Result<&Subscription> {
        let subscription = subscription.bind(self)?;

        if self
            .subscriptions
            .iter()
            .any(|s| s.endpoint() == subscription.endpoint())
        {
            return Err(Error::DuplicateSubscription {
                topic: self.path.clone(),
                endpoint: subscription.endpoint().clone(),
            });
        }

        log::debug!(
            "Subscribed {} to {} over {}",
            subscription.endpoint(),
            self.path,
            subscription.protocol()
        );

        self.subscriptions.push(subscription);
        Ok(&self.subscriptions[self.subscriptions.len() - 1])
    }

    /// Returns whether the topic is FIFO
    fn validate(path: &ConstructPath, props: &TopicProps) -> Result<bool> {
        let invalid = |message: &str| Error::InvalidProperty {
            construct: path.clone(),
            message: message.to_string(),
        };

        if let Some(display_name) = &props.display_name {
            if display_name.chars().count() > 100 {
                return Err(invalid("display name must be at most 100 characters"));
            }
        }

        let named_fifo = match props.topic_name.as_deref() {
            Some(name) => {
                let base = name.strip_suffix(FIFO_SUFFIX).unwrap_or(name);

                if !NAME_REGEX.is_match(base) || name.len() > 256 {
                    return Err(invalid(
                        "topic name must be 1 to 256 alphanumerics, hyphens or underscores",
                    ));
                }

                name.ends_with(FIFO_SUFFIX)
            }

            None => false,
        };

        let fifo = match props.fifo {
            Some(false) if named_fifo => {
                return Err(invalid("a topic named with .fifo suffix must be FIFO"))
            }

            Some(fifo) => fifo,
            None => named_fifo,
        };

        if props.content_based_deduplication == Some(true) && !fifo {
            return Err(invalid(
                "content-based deduplication can only be enabled for FIFO topics",
            ));
        }

        Ok(fifo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> ConstructPath {
        ConstructPath::root().child("Stack").child("Topic")
    }

    #[test]
    fn defaults_set_nothing() {
        let topic = Topic::new(path(), TopicProps::default()).unwrap();

        assert_eq!(topic.properties(), &TopicProps::default());
        assert!(!topic.is_fifo());
        assert!(topic.subscriptions().is_empty());
    }

    #[test]
    fn display_name_length() {
        let props = TopicProps {
            display_name: Some("x".repeat(101)),
            ..Default::default()
        };

        assert!(matches!(
            Topic::new(path(), props),
            Err(Error::InvalidProperty { .. })
        ));
    }

    #[test]
    fn fifo_topic_name() {
        let props = TopicProps {
            topic_name: Some("events.fifo".into()),
            content_based_deduplication: Some(true),
            ..Default::default()
        };

        assert!(Topic::new(path(), props).unwrap().is_fifo());
    }

    #[test]
    fn deduplication_requires_fifo() {
        let props = TopicProps {
            content_based_deduplication: Some(true),
            ..Default::default()
        };

        assert!(Topic::new(path(), props).is_err());
    }
}
