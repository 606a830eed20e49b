//! Settings for the serialization fallback.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Environment variable read by [`FallbackSettings::from_env`].
pub const LOOP_POLICY_ENV: &str = "REPLICA_LOOP_POLICY";

/// What the encoder does when a `Shared` node refers back to an ancestor.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub enum ReferenceLoopPolicy {
    /// Encode the back-reference as absent (`null`).
    #[default]
    Ignore,
    /// Fail the encode.
    Error,
}

impl ReferenceLoopPolicy {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ReferenceLoopPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown reference loop policy `{0}`, expected `ignore` or `error`")]
pub struct ParsePolicyError(pub String);

impl FromStr for ReferenceLoopPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "error" => Ok(Self::Error),
            _ => Err(ParsePolicyError(s.to_owned())),
        }
    }
}

/// Configuration of an [`Encoder`](crate::Encoder).
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct FallbackSettings {
    pub loop_policy: ReferenceLoopPolicy,
}

impl FallbackSettings {
    #[must_use]
    pub fn with_loop_policy(mut self, loop_policy: ReferenceLoopPolicy) -> Self {
        self.loop_policy = loop_policy;
        self
    }

    /// Settings from [`LOOP_POLICY_ENV`], defaulting when unset or invalid.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Settings from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        if let Some(raw) = lookup(LOOP_POLICY_ENV) {
            match raw.parse() {
                Ok(policy) => settings.loop_policy = policy,
                Err(err) => tracing::warn!(%err, "ignoring {LOOP_POLICY_ENV}"),
            }
        }
        settings
    }
}
