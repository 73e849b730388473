use crate::error::{Error, Result};
use crate::node::{ConstructPath, Node};
use crate::sns::{Topic, TopicProps, TopicRef};
use crate::sqs::{Queue, QueueProps, QueueRef};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

static STACK_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").expect("Failed to init regexp"));

/// Target account and region of a stack
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Environment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Optional configuration of a stack
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StackProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<Environment>,

    /// Deployed name, the id is used when not set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_name: Option<String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,

    pub termination_protection: bool,
}

/// Any resource a stack can own
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Resource {
    Queue(Queue),
    Topic(Topic),
}

impl Resource {
    pub fn path(&self) -> &ConstructPath {
        match self {
            Resource::Queue(queue) => queue.path(),
            Resource::Topic(topic) => topic.path(),
        }
    }

    pub fn logical_id(&self) -> &str {
        match self {
            Resource::Queue(queue) => queue.logical_id(),
            Resource::Topic(topic) => topic.logical_id(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Resource::Queue(_) => "Queue",
            Resource::Topic(_) => "Topic",
        }
    }
}

/// A named deployable unit
///
/// Owns all the resources declared in it, in declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct Stack {
    #[serde(skip)]
    node: Node,
    path: ConstructPath,
    stack_name: String,
    properties: StackProps,
    resources: Vec<Resource>,
}

impl Stack {
    pub(crate) fn new(path: ConstructPath, properties: StackProps) -> Result<Self> {
        let stack_name = properties
            .stack_name
            .clone()
            .or_else(|| path.id().map(str::to_string))
            .unwrap_or_default();

        Self::validate(&path, &stack_name, &properties)?;

        Ok(Self {
            node: Node::new(path.clone()),
            path,
            stack_name,
            properties,
            resources: vec![],
        })
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn path(&self) -> &ConstructPath {
        &self.path
    }

    pub fn id(&self) -> &str {
        self.path.id().unwrap_or_default()
    }

    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }

    pub fn properties(&self) -> &StackProps {
        &self.properties
    }

    pub fn add_queue(&mut self, id: &str, props: QueueProps) -> Result<QueueRef> {
        let path = self.node.path().child(id);
        let queue = Queue::new(path, props)?;

        // Reserve the id only after the props are known to be valid
        self.node.add_child(id)?;
        self.resources.push(Resource::Queue(queue));
        Ok(QueueRef(self.node.path().child(id)))
    }

    pub fn add_topic(&mut self, id: &str, props: TopicProps) -> Result<TopicRef> {
        let path = self.node.path().child(id);
        let topic = Topic::new(path, props)?;

        self.node.add_child(id)?;
        self.resources.push(Resource::Topic(topic));
        Ok(TopicRef(self.node.path().child(id)))
    }

    pub fn queue(&self, handle: &QueueRef) -> Result<&Queue> {
        self.queues()
            .find(|q| q.path() == handle.path())
            .ok_or_else(|| Error::UnknownConstruct(handle.path().clone()))
    }

    pub fn topic(&self, handle: &TopicRef) -> Result<&Topic> {
        self.topics()
            .find(|t| t.path() == handle.path())
            .ok_or_else(|| Error::UnknownConstruct(handle.path().clone()))
    }

    pub fn topic_mut(&mut self, handle: &TopicRef) -> Result<&mut Topic> {
        self.resources
            .iter_mut()
            .find_map(|r| match r {
                Resource::Topic(topic) if topic.path() == handle.path() => Some(topic),
                _ => None,
            })
            .ok_or_else(|| Error::UnknownConstruct(handle.path().clone()))
    }

    pub fn queues(&self) -> impl Iterator<Item = &Queue> {
        self.resources.iter().filter_map(|r| match r {
            Resource::Queue(queue) => Some(queue),
            _ => None,
        })
    }

    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.resources.iter().filter_map(|r| match r {
            Resource::Topic(topic) => Some(topic),
            _ => None,
        })
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Everything declared in the stack as a JSON document
    pub fn manifest(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            log::error!("Failed to serialize stack {}: {e:?}", self.path);
            serde_json::Value::Null
        })
    }

    fn validate(path: &ConstructPath, stack_name: &str, props: &StackProps) -> Result<()> {
        if !STACK_NAME_REGEX.is_match(stack_name) || stack_name.len() > 128 {
            return Err(Error::InvalidProperty {
                construct: path.clone(),
                message: format!(
                    "stack name {stack_name:?} must start with a letter, contain only \
                    alphanumerics and hyphens, and be at most 128 characters"
                ),
            });
        }

        if let Some(description) = &props.description {
            if description.len() > 1024 {
                return Err(Error::InvalidProperty {
                    construct: path.clone(),
                    message: "stack description must be at most 1024 bytes".into(),
                });
            }
        }

        Ok(())
    }
}
