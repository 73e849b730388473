use crate::config::ConfigFile;
use crate::stack::{QueueTopicStack, QueueTopicStackProps, STACK_ID};
use eyre::WrapErr;
use fanout_construct::App;

/// Declare the whole app
///
/// One app with exactly one queue-to-topic stack. Any declaration error is returned as is,
/// nothing is provisioned at this point.
pub fn build(config: &ConfigFile) -> eyre::Result<App> {
    let mut app = config
        .context()
        .iter()
        .fold(App::new(), |app, (key, value)| app.with_context(key, value));

    let mut props = QueueTopicStackProps {
        stack: config.stack_props(),
        ..Default::default()
    };

    if let Some(visibility_timeout) = config
        .visibility_timeout()
        .wrap_err("Invalid queue visibility timeout")?
    {
        props.visibility_timeout = visibility_timeout;
    }

    QueueTopicStack::new(&mut app, STACK_ID, Some(props))
        .wrap_err_with(|| format!("Failed to declare stack {STACK_ID}"))?;

    log::info!("Declared {} stack(s)", app.stacks().count());
    Ok(app)
}
