/// Display global error message in unified format
#[derive(Debug)]
pub struct Error(String, Option<String>);

impl Error {
    pub fn new(message: &str, details: Option<&str>) -> Self {
        Error(message.to_string(), details.map(|d| d.to_string()))
    }

    pub fn message(&self) -> &str {
        &self.0
    }

    pub fn details(&self) -> Option<&str> {
        self.1.as_deref()
    }
}

/// Display the message and details, as sort of a hint
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}\n\n{}",
            self.0,
            console::style(self.1.clone().unwrap_or("".into())).dim()
        )
    }
}

impl std::error::Error for Error {}

/// Convert eyre error reports, the chain of causes becomes the hint
impl From<eyre::ErrReport> for Error {
    fn from(error: eyre::ErrReport) -> Self {
        let error = match error.downcast::<Error>() {
            Ok(error) => return error,
            Err(error) => error,
        };

        let causes = error
            .chain()
            .skip(1)
            .map(|cause| cause.to_string())
            .collect::<Vec<String>>();

        log::error!("{error:?}");

        if causes.is_empty() {
            Error::new(&error.to_string(), None)
        } else {
            Error::new(&error.to_string(), Some(&causes.join("\n")))
        }
    }
}
