use crate::error::Error;
use crate::runner::{Runnable, Runner};
use crate::writer::Writer;
use fanout_construct::{App, Stack};
use serde_json::json;
use tabled::settings::style::Style;
use tabled::{Table, Tabled};

#[derive(Tabled, Clone)]
struct StackRow {
    #[tabled(rename = "Stack")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Resources")]
    resources: usize,
}

impl From<&Stack> for StackRow {
    fn from(stack: &Stack) -> Self {
        let env = stack.properties().env.clone().unwrap_or_default();

        StackRow {
            id: stack.id().to_string(),
            name: stack.stack_name().to_string(),
            account: env.account.unwrap_or("-".into()),
            region: env.region.unwrap_or("-".into()),
            resources: stack.resources().len(),
        }
    }
}

#[derive(clap::Args, Clone)]
pub struct ListCommand;

impl Runnable for ListCommand {
    fn runner<'a>(&self, writer: &'a Writer, app: &'a App) -> impl Runner + 'a {
        ListRunner { writer, app }
    }
}

struct ListRunner<'a> {
    writer: &'a Writer,
    app: &'a App,
}

impl ListRunner<'_> {
    fn json(&self) -> serde_json::Value {
        let stacks = self
            .app
            .stacks()
            .map(|stack| {
                json!({
                    "id": stack.id(),
                    "stack_name": stack.stack_name(),
                    "env": stack.properties().env,
                    "resources": stack.resources().len(),
                })
            })
            .collect::<Vec<_>>();

        json!(stacks)
    }

    fn text(&self) -> String {
        let rows = self.app.stacks().map(StackRow::from).collect::<Vec<_>>();

        if rows.is_empty() {
            return format!("{}\n", console::style("No stacks declared").yellow());
        }

        let mut table = Table::new(rows);
        table.with(Style::modern());
        format!("{table}\n")
    }
}

impl Runner for ListRunner<'_> {
    /// Prints out all the stacks of the app
    fn run(&mut self) -> Result<(), Error> {
        if self.writer.is_structured() {
            return self.writer.json(self.json());
        }

        self.writer.text(&self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::build;
    use crate::config::ConfigFile;
    use crate::stack::STACK_ID;

    #[test]
    fn lists_the_declared_stack() {
        let app = build(&ConfigFile::default()).unwrap();
        let writer = Writer::new(true);
        let runner = ListRunner {
            writer: &writer,
            app: &app,
        };

        let stacks = runner.json();
        assert_eq!(stacks.as_array().map(Vec::len), Some(1));
        assert_eq!(stacks[0]["id"], STACK_ID);
        assert_eq!(stacks[0]["stack_name"], STACK_ID);
        assert_eq!(stacks[0]["resources"], 2);

        let table = runner.text();
        assert!(table.contains(STACK_ID));
        assert!(table.contains("Resources"));
    }

    #[test]
    fn empty_app_has_a_message() {
        let app = App::new();
        let writer = Writer::new(false);
        let runner = ListRunner {
            writer: &writer,
            app: &app,
        };

        assert!(runner.text().contains("No stacks declared"));
        assert_eq!(runner.json(), json!([]));
    }

    #[test]
    fn runs_in_both_modes() {
        let app = build(&ConfigFile::default()).unwrap();

        for structured in [false, true] {
            let writer = Writer::new(structured);
            assert!(ListCommand.runner(&writer, &app).run().is_ok());
        }
    }
}
