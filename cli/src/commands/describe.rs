use crate::error::Error;
use crate::runner::{Runnable, Runner};
use crate::writer::Writer;
use fanout_construct::{App, Resource, Stack};
use serde_json::Value;
use tabled::settings::style::Style;
use tabled::{Table, Tabled};

#[derive(Tabled, Clone)]
struct ResourceRow {
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Logical ID")]
    logical_id: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Properties")]
    properties: String,
}

impl From<&Resource> for ResourceRow {
    fn from(resource: &Resource) -> Self {
        let properties = match resource {
            Resource::Queue(queue) => serde_json::to_value(queue.properties()),
            Resource::Topic(topic) => serde_json::to_value(topic.properties()),
        }
        .map(properties_summary)
        .unwrap_or_default();

        ResourceRow {
            path: resource.path().to_string(),
            logical_id: resource.logical_id().to_string(),
            kind: resource.kind().to_string(),
            properties,
        }
    }
}

/// Render a flat JSON object as "key=value" pairs
fn properties_summary(properties: Value) -> String {
    let Value::Object(properties) = properties else {
        return String::new();
    };

    if properties.is_empty() {
        return "(defaults)".into();
    }

    properties
        .iter()
        .map(|(key, value)| match value {
            Value::String(value) => format!("{key}={value}"),
            value => format!("{key}={value}"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(clap::Args, Clone)]
pub struct DescribeCommand {
    /// Id of the stack to describe (if not specified, all stacks are described)
    #[arg(short, long)]
    stack: Option<String>,
}

impl Runnable for DescribeCommand {
    fn runner<'a>(&self, writer: &'a Writer, app: &'a App) -> impl Runner + 'a {
        DescribeRunner {
            command: self.clone(),
            writer,
            app,
        }
    }
}

struct DescribeRunner<'a> {
    command: DescribeCommand,
    writer: &'a Writer,
    app: &'a App,
}

impl DescribeRunner<'_> {
    fn stacks(&self) -> Result<Vec<&Stack>, Error> {
        let Some(id) = &self.command.stack else {
            return Ok(self.app.stacks().collect());
        };

        let stack = self.app.stack(id).ok_or_else(|| {
            let known = self.app.stacks().map(Stack::id).collect::<Vec<_>>();

            self.error(
                Some(&format!("Stack {id:?} not found")),
                Some(&format!("Declared stacks: {}", known.join(", "))),
                None,
            )
        })?;

        Ok(vec![stack])
    }

    fn text(&self, stack: &Stack) -> String {
        let mut output = format!(
            "{} ({})\n",
            console::style(stack.id()).bold(),
            console::style(stack.stack_name()).dim()
        );

        if let Some(description) = &stack.properties().description {
            output.push_str(&format!("{description}\n"));
        }

        let mut table = Table::new(stack.resources().iter().map(ResourceRow::from));
        table.with(Style::modern());
        output.push_str(&format!("{table}\n"));

        for topic in stack.topics() {
            for subscription in topic.subscriptions() {
                output.push_str(&format!(
                    "{} -> {} ({})\n",
                    subscription.topic(),
                    subscription.endpoint(),
                    subscription.protocol()
                ));
            }
        }

        output
    }
}

impl Runner for DescribeRunner<'_> {
    /// Prints out declared resources of the stack(s)
    fn run(&mut self) -> Result<(), Error> {
        let stacks = self.stacks()?;

        if self.writer.is_structured() {
            return self
                .writer
                .json(Value::Array(stacks.iter().map(|s| s.manifest()).collect()));
        }

        let output = stacks
            .iter()
            .map(|stack| self.text(stack))
            .collect::<Vec<_>>()
            .join("\n");

        self.writer.text(&output)
    }
}
