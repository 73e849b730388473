use fanout_construct::{
    App, ConstructPath, Duration, QueueProps, QueueRef, Result, SqsSubscription, Stack,
    StackProps, TopicProps, TopicRef,
};

pub const STACK_ID: &str = "AppCdkTypescriptStack";
pub const QUEUE_ID: &str = "AppCdkTypescriptQueue";
pub const TOPIC_ID: &str = "AppCdkTypescriptTopic";

pub const DEFAULT_VISIBILITY_TIMEOUT: Duration = Duration::from_secs(60);

/// Options of the queue-to-topic stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueTopicStackProps {
    pub stack: StackProps,
    pub visibility_timeout: Duration,
}

impl Default for QueueTopicStackProps {
    fn default() -> Self {
        Self {
            stack: StackProps::default(),
            visibility_timeout: DEFAULT_VISIBILITY_TIMEOUT,
        }
    }
}

/// A queue subscribed to a notification topic
///
/// Holds handles only, the descriptors are owned by the stack inside the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueTopicStack {
    path: ConstructPath,
    pub queue: QueueRef,
    pub topic: TopicRef,
}

impl QueueTopicStack {
    pub fn new(scope: &mut App, id: &str, props: Option<QueueTopicStackProps>) -> Result<Self> {
        let props = props.unwrap_or_default();

        scope.declare_stack(id, props.stack, |stack| {
            let queue = stack.add_queue(
                QUEUE_ID,
                QueueProps {
                    visibility_timeout: Some(props.visibility_timeout),
                    ..Default::default()
                },
            )?;

            let topic = stack.add_topic(TOPIC_ID, TopicProps::default())?;

            let subscription = SqsSubscription::new(stack.queue(&queue)?);
            stack.topic_mut(&topic)?.add_subscription(subscription)?;

            Ok(Self {
                path: stack.path().clone(),
                queue,
                topic,
            })
        })
    }

    pub fn path(&self) -> &ConstructPath {
        &self.path
    }

    /// Resolve the declared stack in the app it was created in
    pub fn stack<'a>(&self, app: &'a App) -> Result<&'a Stack> {
        app.stack_of(&self.path)
    }
}
