use fanout::stack::{
    QueueTopicStack, QueueTopicStackProps, DEFAULT_VISIBILITY_TIMEOUT, QUEUE_ID, STACK_ID,
    TOPIC_ID,
};
use fanout_construct::{App, ConstructPath, Duration, Error, Protocol, TopicProps};

#[test]
fn declares_one_queue_and_one_topic() {
    let mut app = App::new();
    let declared = QueueTopicStack::new(&mut app, STACK_ID, None).unwrap();
    let stack = declared.stack(&app).unwrap();

    let queues = stack.queues().collect::<Vec<_>>();
    let topics = stack.topics().collect::<Vec<_>>();

    assert_eq!(queues.len(), 1);
    assert_eq!(topics.len(), 1);

    let stack_path = ConstructPath::root().child(STACK_ID);
    assert_eq!(queues[0].path(), &stack_path.child(QUEUE_ID));
    assert_eq!(topics[0].path(), &stack_path.child(TOPIC_ID));
}

#[test]
fn queue_visibility_timeout_is_sixty_seconds() {
    let mut app = App::new();
    let declared = QueueTopicStack::new(&mut app, STACK_ID, None).unwrap();
    let queue = declared.stack(&app).unwrap().queue(&declared.queue).unwrap();

    assert_eq!(DEFAULT_VISIBILITY_TIMEOUT.to_seconds(), 60);
    assert_eq!(queue.visibility_timeout(), Some(Duration::from_secs(60)));
}

#[test]
fn configured_visibility_timeout_is_reflected() {
    for secs in [0, 1, 120, 43_200] {
        let mut app = App::new();

        let props = QueueTopicStackProps {
            visibility_timeout: Duration::seconds(secs).unwrap(),
            ..Default::default()
        };

        let declared = QueueTopicStack::new(&mut app, STACK_ID, Some(props)).unwrap();
        let queue = declared.stack(&app).unwrap().queue(&declared.queue).unwrap();

        assert_eq!(
            queue.visibility_timeout().map(|t| t.to_seconds()),
            Some(secs as u64)
        );
    }
}

#[test]
fn topic_has_one_subscription_to_the_queue() {
    let mut app = App::new();
    let declared = QueueTopicStack::new(&mut app, STACK_ID, None).unwrap();
    let stack = declared.stack(&app).unwrap();

    let topic = stack.topic(&declared.topic).unwrap();
    let subscriptions = topic.subscriptions();

    assert_eq!(subscriptions.len(), 1);
    assert_eq!(subscriptions[0].protocol(), Protocol::Sqs);
    assert_eq!(subscriptions[0].topic(), topic.path());

    // The endpoint resolves to the queue declared in the same construction
    let queue = stack.queue(&declared.queue).unwrap();
    assert_eq!(subscriptions[0].endpoint(), queue.path());
    let targets = stack
        .queues()
        .filter(|q| q.path() == subscriptions[0].endpoint())
        .count();

    assert_eq!(targets, 1);
}

#[test]
fn topic_keeps_default_properties() {
    let mut app = App::new();
    let declared = QueueTopicStack::new(&mut app, STACK_ID, None).unwrap();
    let topic = declared.stack(&app).unwrap().topic(&declared.topic).unwrap();

    assert_eq!(topic.properties(), &TopicProps::default());
    assert!(!topic.is_fifo());
}

#[test]
fn same_id_in_one_app_fails() {
    let mut app = App::new();
    QueueTopicStack::new(&mut app, STACK_ID, None).unwrap();

    assert_eq!(
        QueueTopicStack::new(&mut app, STACK_ID, None),
        Err(Error::DuplicateId {
            scope: ConstructPath::root(),
            id: STACK_ID.into(),
        })
    );

    assert_eq!(app.stacks().count(), 1);
}

#[test]
fn same_id_in_two_apps_succeeds() {
    let mut first = App::new();
    let mut second = App::new();

    let a = QueueTopicStack::new(&mut first, STACK_ID, None).unwrap();
    let b = QueueTopicStack::new(&mut second, STACK_ID, None).unwrap();

    assert_eq!(a.stack(&first).unwrap().resources().len(), 2);
    assert_eq!(b.stack(&second).unwrap().resources().len(), 2);
}

#[test]
fn negative_visibility_timeout_fails_and_zero_succeeds() {
    assert!(matches!(
        Duration::seconds(-1),
        Err(Error::InvalidDuration(_))
    ));

    let mut app = App::new();
    let props = QueueTopicStackProps {
        visibility_timeout: Duration::seconds(0).unwrap(),
        ..Default::default()
    };

    assert!(QueueTopicStack::new(&mut app, STACK_ID, Some(props)).is_ok());
}

#[test]
fn out_of_range_visibility_timeout_fails() {
    let mut app = App::new();
    let props = QueueTopicStackProps {
        visibility_timeout: Duration::hours(13).unwrap(),
        ..Default::default()
    };

    assert!(matches!(
        QueueTopicStack::new(&mut app, STACK_ID, Some(props)),
        Err(Error::OutOfRange { .. })
    ));

    // Nothing of the failed declaration is kept, the id can be reused
    assert_eq!(app.stacks().count(), 0);

    let declared = QueueTopicStack::new(&mut app, STACK_ID, None).unwrap();
    assert_eq!(declared.stack(&app).unwrap().resources().len(), 2);
}
