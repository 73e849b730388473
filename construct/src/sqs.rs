use crate::duration::Duration;
use crate::error::{Error, Result};
use crate::node::ConstructPath;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

const FIFO_SUFFIX: &str = ".fifo";

static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,80}$").expect("Failed to init regexp"));

/// Properties of a queue, anything left out falls back to provider defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueueProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_name: Option<String>,

    /// How long a received message stays hidden from other consumers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility_timeout: Option<Duration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_period: Option<Duration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_delay: Option<Duration>,

    /// Long polling wait for receive calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receive_message_wait_time: Option<Duration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_message_size_bytes: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fifo: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_based_deduplication: Option<bool>,
}

/// Handle to a queue declared in a stack
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueueRef(pub(crate) ConstructPath);

impl QueueRef {
    pub fn path(&self) -> &ConstructPath {
        &self.0
    }
}

/// Declared queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Queue {
    path: ConstructPath,
    logical_id: String,
    fifo: bool,
    properties: QueueProps,
}

impl Queue {
    pub(crate) fn new(path: ConstructPath, properties: QueueProps) -> Result<Self> {
        let fifo = Self::validate(&path, &properties)?;

        Ok(Self {
            logical_id: path.logical_id(),
            path,
            fifo,
            properties,
        })
    }

    pub fn path(&self) -> &ConstructPath {
        &self.path
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    pub fn properties(&self) -> &QueueProps {
        &self.properties
    }

    pub fn visibility_timeout(&self) -> Option<Duration> {
        self.properties.visibility_timeout
    }

    /// Either set explicitly or implied by the queue name
    pub fn is_fifo(&self) -> bool {
        self.fifo
    }

    /// Returns whether the queue is FIFO
    fn validate(path: &ConstructPath, props: &QueueProps) -> Result<bool> {
        let durations = [
            ("visibility timeout", props.visibility_timeout, 0, 43_200),
            ("retention period", props.retention_period, 60, 1_209_600),
            ("delivery delay", props.delivery_delay, 0, 900),
            ("receive message wait time", props.receive_message_wait_time, 0, 20),
        ];

        for (property, value, min, max) in durations {
            if let Some(value) = value {
                check_range(path, property, value.to_seconds(), min, max)?;
            }
        }

        if let Some(size) = props.max_message_size_bytes {
            check_range(path, "max message size", size, 1_024, 262_144)?;
        }

        let invalid = |message: &str| Error::InvalidProperty {
            construct: path.clone(),
            message: message.to_string(),
        };

        let named_fifo = match props.queue_name.as_deref() {
            Some(name) => {
                let base = name.strip_suffix(FIFO_SUFFIX).unwrap_or(name);

                if !NAME_REGEX.is_match(base) || name.len() > 80 {
                    return Err(invalid(
                        "queue name must be 1 to 80 alphanumerics, hyphens or underscores",
                    ));
                }

                name.ends_with(FIFO_SUFFIX)
            }

            None => false,
        };

        let fifo = match props.fifo {
            Some(false) if named_fifo => {
                return Err(invalid("a queue named with .fifo suffix must be FIFO"))
            }

            Some(true) if props.queue_name.is_some() && !named_fifo => {
                return Err(invalid("FIFO queue names must end in .fifo"))
            }

            Some(fifo) => fifo,
            None => named_fifo,
        };

        if props.content_based_deduplication == Some(true) && !fifo {
            return Err(invalid(
                "content-based deduplication can only be enabled for FIFO queues",
            ));
        }

        Ok(fifo)
    }
}

fn check_range(
    construct: &ConstructPath,
    property: &'static str,
    actual: u64,
    min: u64,
    max: u64,
) -> Result<()> {
    if (min..=max).contains(&actual) {
        return Ok(());
    }

    Err(Error::OutOfRange {
        construct: construct.clone(),
        property,
        min,
        max,
        actual,
    })
}
