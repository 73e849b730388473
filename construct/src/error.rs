use crate::node::ConstructPath;

/// Construction-time failures
///
/// Every declaration is validated synchronously, so these are raised before
/// anything leaves the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The id is empty or contains a path separator
    InvalidId { id: String, reason: String },

    /// A sibling with the same id is already declared in the scope
    DuplicateId { scope: ConstructPath, id: String },

    /// Negative or unparsable duration
    InvalidDuration(String),

    /// A numeric property outside of the range accepted by the provider
    OutOfRange {
        construct: ConstructPath,
        property: &'static str,
        min: u64,
        max: u64,
        actual: u64,
    },

    /// Any other invalid combination of properties
    InvalidProperty {
        construct: ConstructPath,
        message: String,
    },

    /// A handle that does not belong to the scope it was resolved against
    UnknownConstruct(ConstructPath),

    /// The same endpoint is subscribed to a topic twice
    DuplicateSubscription {
        topic: ConstructPath,
        endpoint: ConstructPath,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::InvalidId { id, reason } => write!(f, "Invalid construct id {id:?}: {reason}"),

            Error::DuplicateId { scope, id } => write!(
                f,
                "There is already a construct with id {id:?} in {}",
                scope.display_or("the app")
            ),

            Error::InvalidDuration(message) => write!(f, "Invalid duration: {message}"),

            Error::OutOfRange {
                construct,
                property,
                min,
                max,
                actual,
            } => write!(
                f,
                "{construct}: {property} must be between {min} and {max}, got {actual}"
            ),

            Error::InvalidProperty { construct, message } => write!(f, "{construct}: {message}"),

            Error::UnknownConstruct(path) => write!(f, "Construct {path} is not declared here"),

            Error::DuplicateSubscription { topic, endpoint } => {
                write!(f, "{endpoint} is already subscribed to {topic}")
            }
        }
    }
}

impl std::error::Error for Error {}
