use crate::error::Error;
use crate::writer::Writer;
use fanout_construct::App;
use std::error::Error as StdError;

pub(crate) trait Runner {
    /// Run the command
    ///
    /// Returns an error shown to the user in case of failure
    fn run(&mut self) -> Result<(), Error>;

    /// Construct an error shown to the user
    fn error(
        &self,
        title: Option<&str>,
        description: Option<&str>,
        origin: Option<Box<dyn StdError>>,
    ) -> Error {
        if let Some(origin) = origin {
            log::error!("{origin:?}");
        }

        if let Some(title) = title {
            Error::new(title, description)
        } else {
            Error::new(
                "Failed to run the command",
                Some("Run again with RUST_LOG=debug for details"),
            )
        }
    }
}

/// Return a runner for a command
///
/// Every command works on the app declared by the entry point.
pub(crate) trait Runnable {
    fn runner<'a>(&self, writer: &'a Writer, app: &'a App) -> impl Runner + 'a;
}
