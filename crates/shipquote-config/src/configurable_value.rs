//! Values that resolve from the environment or from plain config text
//!
//! Courier credentials are usually referenced as environment variables in
//! the config file (`{ type = "env", value = "DELHIVERY_API_KEY" }`) but can
//! be inlined as plain text for local development.

use serde::{Deserialize, Serialize};
use shipquote_types::SecretString;
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ConfigurableValue {
	#[serde(rename = "type")]
	pub value_type: ValueType,
	/// Environment variable name for `env`, the literal value for `plain`
	pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
	Env,
	Plain,
}

impl ConfigurableValue {
	pub fn from_env(env_var_name: &str) -> Self {
		Self {
			value_type: ValueType::Env,
			value: env_var_name.to_string(),
		}
	}

	pub fn from_plain(plain_value: &str) -> Self {
		Self {
			value_type: ValueType::Plain,
			value: plain_value.to_string(),
		}
	}

	/// Resolve to the actual value, reading the environment for `env` types
	pub fn resolve(&self) -> Result<String, ConfigurableValueError> {
		match self.value_type {
			ValueType::Env => std::env::var(&self.value).map_err(|_| {
				ConfigurableValueError::EnvironmentVariableNotFound(self.value.clone())
			}),
			ValueType::Plain => Ok(self.value.clone()),
		}
	}

	/// Resolve straight into a redacting wrapper for credential use
	pub fn resolve_secret(&self) -> Result<SecretString, ConfigurableValueError> {
		Ok(SecretString::new(self.resolve()?))
	}
}

/// Shorthand in config strings: "env:NAME" reads the environment, anything
/// else is taken as a plain value
impl From<&str> for ConfigurableValue {
	fn from(value: &str) -> Self {
		if let Some(env_var) = value.strip_prefix("env:") {
			Self::from_env(env_var)
		} else {
			Self::from_plain(value)
		}
	}
}

// Never echo plain credential text into logs
impl fmt::Display for ConfigurableValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.value_type {
			ValueType::Env => write!(f, "env:{}", self.value),
			ValueType::Plain => write!(f, "plain:[REDACTED]"),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurableValueError {
	#[error("Environment variable '{0}' not found")]
	EnvironmentVariableNotFound(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn plain_value_resolves_to_itself() {
		let value = ConfigurableValue::from_plain("local-dev-key");
		assert_eq!(value.resolve().unwrap(), "local-dev-key");
	}

	#[test]
	fn env_value_reads_environment() {
		std::env::set_var("SHIPQUOTE_TEST_CREDENTIAL", "from-env");
		let value = ConfigurableValue::from_env("SHIPQUOTE_TEST_CREDENTIAL");
		assert_eq!(value.resolve().unwrap(), "from-env");
		std::env::remove_var("SHIPQUOTE_TEST_CREDENTIAL");
	}

	#[test]
	fn missing_env_var_is_an_error() {
		let value = ConfigurableValue::from_env("SHIPQUOTE_DOES_NOT_EXIST");
		assert!(value.resolve().is_err());
	}

	#[test]
	fn string_shorthand() {
		let env = ConfigurableValue::from("env:MY_KEY");
		assert_eq!(env.value_type, ValueType::Env);
		assert_eq!(env.value, "MY_KEY");

		let plain = ConfigurableValue::from("literal-key");
		assert_eq!(plain.value_type, ValueType::Plain);
	}

	#[test]
	fn display_never_leaks_plain_values() {
		let plain = ConfigurableValue::from_plain("super-secret");
		assert!(!format!("{}", plain).contains("super-secret"));
	}
}
