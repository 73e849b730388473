use eyre::WrapErr;
use fanout_construct::{Duration, Environment, StackProps};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "fanout.toml";

/// Fallbacks for the stack environment when the config does not set one
pub const ACCOUNT_ENV: &str = "FANOUT_DEFAULT_ACCOUNT";
pub const REGION_ENV: &str = "FANOUT_DEFAULT_REGION";

/// ConfigFile is the structure of fanout.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// [stack]
    /// description = "Orders fan-out"
    #[serde(default)]
    stack: StackSection,

    /// [queue]
    /// visibility_timeout = "2m"
    #[serde(default)]
    queue: QueueSection,

    /// [context]
    /// stage = "prod"
    #[serde(default)]
    context: BTreeMap<String, String>,

    #[serde(skip)]
    path: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StackSection {
    description: Option<String>,
    stack_name: Option<String>,
    account: Option<String>,
    region: Option<String>,

    #[serde(default)]
    termination_protection: bool,

    #[serde(default)]
    tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct QueueSection {
    visibility_timeout: Option<DurationSetting>,
}

/// Either a number of seconds or a human readable span
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum DurationSetting {
    Seconds(i64),
    Text(String),
}

impl DurationSetting {
    fn to_duration(&self) -> fanout_construct::Result<Duration> {
        match self {
            DurationSetting::Seconds(secs) => Duration::seconds(*secs),
            DurationSetting::Text(text) => text.parse(),
        }
    }
}

impl ConfigFile {
    /// Reads a `ConfigFile` from a given directory path
    ///
    /// Looks for fanout.toml in the directory. Only a missing file results in the default
    /// configuration. A missing directory, an unreadable or a malformed file is an error.
    pub fn from_path(path: PathBuf) -> eyre::Result<Self> {
        let is_dir = fs::metadata(&path)
            .wrap_err_with(|| format!("Failed to access config directory {path:?}"))?
            .is_dir();

        if !is_dir {
            eyre::bail!("{path:?} is not a directory");
        }

        let config_toml_path = path.join(CONFIG_FILE_NAME);

        let toml_string = match fs::read_to_string(&config_toml_path) {
            Ok(toml_string) => toml_string,

            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No {config_toml_path:?} found, using defaults");

                return Ok(Self {
                    path,
                    ..Default::default()
                });
            }

            Err(e) => {
                return Err(e).wrap_err_with(|| format!("Failed to read {config_toml_path:?}"))
            }
        };

        let mut config = Self::from_toml(&toml_string)
            .wrap_err_with(|| format!("Failed to parse {config_toml_path:?}"))?;

        config.path = path;
        log::info!("Loaded config from {config_toml_path:?}");
        Ok(config)
    }

    pub fn from_toml(toml_string: &str) -> eyre::Result<Self> {
        toml::from_str(toml_string).wrap_err("Invalid config format")
    }

    /// Directory the config was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn context(&self) -> &BTreeMap<String, String> {
        &self.context
    }

    /// Stack properties, with the environment falling back to env vars
    pub fn stack_props(&self) -> StackProps {
        self.stack_props_with(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigFile::stack_props`] with a custom env lookup
    pub fn stack_props_with(&self, lookup: impl Fn(&str) -> Option<String>) -> StackProps {
        let account = self.stack.account.clone().or_else(|| lookup(ACCOUNT_ENV));
        let region = self.stack.region.clone().or_else(|| lookup(REGION_ENV));

        let env = if account.is_some() || region.is_some() {
            Some(Environment { account, region })
        } else {
            None
        };

        StackProps {
            description: self.stack.description.clone(),
            env,
            stack_name: self.stack.stack_name.clone(),
            tags: self.stack.tags.clone(),
            termination_protection: self.stack.termination_protection,
        }
    }

    /// Queue visibility timeout override, if any
    pub fn visibility_timeout(&self) -> fanout_construct::Result<Option<Duration>> {
        self.queue
            .visibility_timeout
            .as_ref()
            .map(DurationSetting::to_duration)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
        [stack]
        description = "Orders fan-out"
        stack_name = "orders"
        account = "123456789012"
        termination_protection = true

        [stack.tags]
        team = "payments"

        [queue]
        visibility_timeout = "2m"

        [context]
        stage = "prod"
    "#;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn empty_config_sets_nothing() {
        let config = ConfigFile::from_toml("").unwrap();

        assert_eq!(config.stack_props_with(no_env), StackProps::default());
        assert_eq!(config.visibility_timeout().unwrap(), None);
        assert!(config.context().is_empty());
    }

    #[test]
    fn full_config() {
        let config = ConfigFile::from_toml(FULL).unwrap();
        let props = config.stack_props_with(no_env);

        assert_eq!(props.description.as_deref(), Some("Orders fan-out"));
        assert_eq!(props.stack_name.as_deref(), Some("orders"));
        assert!(props.termination_protection);
        assert_eq!(props.tags.get("team").map(String::as_str), Some("payments"));

        assert_eq!(
            props.env,
            Some(Environment {
                account: Some("123456789012".into()),
                region: None,
            })
        );

        assert_eq!(
            config.visibility_timeout().unwrap(),
            Some(Duration::from_secs(120))
        );

        assert_eq!(config.context().get("stage").map(String::as_str), Some("prod"));
    }

    #[test]
    fn env_vars_fill_missing_environment() {
        let config = ConfigFile::from_toml("[stack]\nregion = \"eu-west-1\"").unwrap();

        let props = config.stack_props_with(|key| match key {
            ACCOUNT_ENV => Some("000000000000".into()),
            REGION_ENV => Some("us-east-1".into()),
            _ => None,
        });

        // Explicit config wins over env vars
        assert_eq!(
            props.env,
            Some(Environment {
                account: Some("000000000000".into()),
                region: Some("eu-west-1".into()),
            })
        );
    }

    #[test]
    fn visibility_timeout_in_seconds() {
        let config = ConfigFile::from_toml("[queue]\nvisibility_timeout = 0").unwrap();
        assert_eq!(
            config.visibility_timeout().unwrap(),
            Some(Duration::from_secs(0))
        );

        let config = ConfigFile::from_toml("[queue]\nvisibility_timeout = -1").unwrap();
        assert!(matches!(
            config.visibility_timeout(),
            Err(fanout_construct::Error::InvalidDuration(_))
        ));
    }

    #[test]
    fn malformed_config_fails() {
        assert!(ConfigFile::from_toml("[stack\n").is_err());
        assert!(ConfigFile::from_toml("[queue]\nvisibility_timeout = true").is_err());
    }
}
