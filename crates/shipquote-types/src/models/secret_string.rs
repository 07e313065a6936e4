//! Secure wrapper for credentials (API keys, passwords)
//!
//! Contents are zeroized on drop and redacted from Debug/Display/serde
//! output so a stray log line can never leak a carrier credential.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
	inner: String,
}

impl SecretString {
	pub fn new(secret: String) -> Self {
		Self { inner: secret }
	}

	/// Access the underlying value. Use sparingly, right at the point the
	/// credential is written into a request.
	pub fn expose_secret(&self) -> &str {
		&self.inner
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[REDACTED]")
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[REDACTED]")
	}
}

impl From<String> for SecretString {
	fn from(secret: String) -> Self {
		Self::new(secret)
	}
}

impl From<&str> for SecretString {
	fn from(secret: &str) -> Self {
		Self::new(secret.to_string())
	}
}

impl Serialize for SecretString {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str("[REDACTED]")
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		Ok(SecretString::new(String::deserialize(deserializer)?))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn debug_and_display_are_redacted() {
		let secret = SecretString::from("carrier-api-key");
		assert_eq!(format!("{:?}", secret), "[REDACTED]");
		assert_eq!(format!("{}", secret), "[REDACTED]");
	}

	#[test]
	fn serialization_is_redacted_but_deserialization_works() {
		let secret = SecretString::from("carrier-api-key");
		assert_eq!(serde_json::to_string(&secret).unwrap(), "\"[REDACTED]\"");

		let parsed: SecretString = serde_json::from_str("\"from-config\"").unwrap();
		assert_eq!(parsed.expose_secret(), "from-config");
	}
}
