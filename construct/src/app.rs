use crate::error::{Error, Result};
use crate::node::{validate_id, ConstructPath, Node};
use crate::stack::{Stack, StackProps};
use std::collections::BTreeMap;

/// The root of the construct tree
///
/// Created once by the entry point and passed down explicitly as the scope of every stack.
#[derive(Debug, Clone, Default)]
pub struct App {
    node: Node,
    context: BTreeMap<String, String>,
    stacks: Vec<Stack>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a context value readable by every construct in the app
    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn context(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Declare a new, empty stack in the app
    ///
    /// Fails when the id is taken by another stack of the same app.
    pub fn add_stack(&mut self, id: &str, props: StackProps) -> Result<&mut Stack> {
        self.declare_stack(id, props, |_| Ok(()))?;

        let index = self.stacks.len() - 1;
        Ok(&mut self.stacks[index])
    }

    /// Declare a stack together with its resources
    ///
    /// The stack is registered only when `declare` succeeds, a failed declaration leaves
    /// the app as it was.
    pub fn declare_stack<T>(
        &mut self,
        id: &str,
        props: StackProps,
        declare: impl FnOnce(&mut Stack) -> Result<T>,
    ) -> Result<T> {
        validate_id(id)?;

        if self.node.has_child(id) {
            return Err(Error::DuplicateId {
                scope: self.node.path().clone(),
                id: id.to_string(),
            });
        }

        let mut stack = Stack::new(ConstructPath::root().child(id), props)?;
        let declared = declare(&mut stack)?;
        self.node.add_child(id)?;

        log::debug!("Added stack {id} named {}", stack.stack_name());
        self.stacks.push(stack);
        Ok(declared)
    }

    pub fn stack(&self, id: &str) -> Option<&Stack> {
        self.stacks.iter().find(|s| s.id() == id)
    }

    pub fn stack_mut(&mut self, id: &str) -> Option<&mut Stack> {
        self.stacks.iter_mut().find(|s| s.id() == id)
    }

    /// Same as [`App::stack`] but for the path of a construct inside the stack
    pub fn stack_of(&self, path: &ConstructPath) -> Result<&Stack> {
        self.stacks
            .iter()
            .find(|s| s.path().contains(path))
            .ok_or_else(|| Error::UnknownConstruct(path.clone()))
    }

    pub fn stacks(&self) -> impl Iterator<Item = &Stack> {
        self.stacks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqs::QueueProps;

    #[test]
    fn duplicate_stack_ids_fail_in_one_app() {
        let mut app = App::new();
        app.add_stack("Stack", StackProps::default()).unwrap();

        assert_eq!(
            app.add_stack("Stack", StackProps::default()).unwrap_err(),
            Error::DuplicateId {
                scope: ConstructPath::root(),
                id: "Stack".into(),
            }
        );

        assert_eq!(app.stacks().count(), 1);
    }

    #[test]
    fn bad_stack_ids_fail_as_ids() {
        let mut app = App::new();

        for id in ["", "a/b"] {
            assert!(matches!(
                app.add_stack(id, StackProps::default()),
                Err(Error::InvalidId { .. })
            ));
        }
    }

    #[test]
    fn failed_declaration_leaves_no_stack() {
        let mut app = App::new();

        let result = app.declare_stack("Stack", StackProps::default(), |stack| {
            stack.add_queue("Queue", QueueProps::default())?;
            stack.add_queue("Queue", QueueProps::default())
        });

        assert!(matches!(result, Err(Error::DuplicateId { .. })));
        assert_eq!(app.stacks().count(), 0);
        assert_eq!(app.node().children().count(), 0);

        // The id is still free
        let queue = app
            .declare_stack("Stack", StackProps::default(), |stack| {
                stack.add_queue("Queue", QueueProps::default())
            })
            .unwrap();

        assert_eq!(app.stack_of(queue.path()).unwrap().resources().len(), 1);
    }

    #[test]
    fn apps_are_independent() {
        let mut first = App::new();
        let mut second = App::new();

        assert!(first.add_stack("Stack", StackProps::default()).is_ok());
        assert!(second.add_stack("Stack", StackProps::default()).is_ok());
    }

    #[test]
    fn context_values() {
        let app = App::new().with_context("stage", "prod");

        assert_eq!(app.context("stage"), Some("prod"));
        assert_eq!(app.context("missing"), None);
    }

    #[test]
    fn finds_stack_by_resource_path() {
        let mut app = App::new();
        let queue = app
            .add_stack("Stack", StackProps::default())
            .unwrap()
            .add_queue("Queue", QueueProps::default())
            .unwrap();

        app.add_stack("Other", StackProps::default()).unwrap();

        assert_eq!(app.stack_of(queue.path()).unwrap().id(), "Stack");
        assert!(app.stack_mut("Other").is_some());
        assert!(app
            .stack_of(&ConstructPath::root().child("Missing").child("Queue"))
            .is_err());
    }
}
