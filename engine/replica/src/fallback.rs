//! Serialization fallback: encode to JSON text, decode into the destination.
//!
//! Slower than the structural walk and subject to the encoding's own rules
//! (an integer decodes into a float field, a variant name decodes into a
//! unit enum), but it tolerates shape differences the structural copier
//! skips and needs no descriptors, only serde impls. Back-references through
//! [`Shared`](crate::Shared) nodes are handled by the encoder's
//! [`ReferenceLoopPolicy`](crate::ReferenceLoopPolicy).

use std::any::type_name;
use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::FallbackSettings;
use crate::error::FallbackError;
use crate::shared::PolicyScope;

/// JSON encoder/decoder pair with a loop policy.
#[derive(Clone, Debug, Default)]
pub struct Encoder {
    settings: FallbackSettings,
}

impl Encoder {
    pub fn new(settings: FallbackSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &FallbackSettings {
        &self.settings
    }

    /// Encode `source` as JSON text.
    pub fn encode<S: Serialize + ?Sized>(&self, source: &S) -> Result<String, FallbackError> {
        let _policy = PolicyScope::enter(self.settings.loop_policy);
        serde_json::to_string(source).map_err(|source| FallbackError::Encode {
            type_name: type_name::<S>(),
            source,
        })
    }

    /// Decode JSON text into a fresh `T`.
    pub fn decode<T: DeserializeOwned>(&self, encoded: &str) -> Result<T, FallbackError> {
        serde_json::from_str(encoded).map_err(|source| FallbackError::Decode {
            type_name: type_name::<T>(),
            source,
        })
    }

    /// Encode `source`, then decode the text as `T`.
    pub fn round_trip<T, S>(&self, source: &S) -> Result<T, FallbackError>
    where
        T: DeserializeOwned,
        S: Serialize + ?Sized,
    {
        let encoded = self.encode(source)?;
        self.decode(&encoded)
    }
}

static GLOBAL_ENCODER: OnceLock<Encoder> = OnceLock::new();

/// The shared encoder, configured from the environment on first use.
pub fn encoder() -> &'static Encoder {
    GLOBAL_ENCODER.get_or_init(|| Encoder::new(FallbackSettings::from_env()))
}

/// Deep copy `source` into a new `TDst` through the shared encoder.
pub fn try_universal_copy<TDst, S>(source: &S) -> Result<TDst, FallbackError>
where
    TDst: DeserializeOwned,
    S: Serialize + ?Sized,
{
    encoder().round_trip(source)
}

/// Deep copy `source` into a new `TDst`; never fails.
///
/// Any encode or decode error yields `TDst::default()`.
pub fn universal_copy<TDst, S>(source: &S) -> TDst
where
    TDst: DeserializeOwned + Default,
    S: Serialize + ?Sized,
{
    try_universal_copy(source).unwrap_or_else(|err| {
        tracing::debug!(%err, "universal copy failed, returning default");
        TDst::default()
    })
}

/// Same-type deep clone by round-trip. Absent in, absent out; failures
/// also yield `None`.
pub fn clone_via_encoding<T>(source: Option<&T>) -> Option<T>
where
    T: Serialize + DeserializeOwned,
{
    let source = source?;
    match encoder().round_trip(source) {
        Ok(cloned) => Some(cloned),
        Err(err) => {
            tracing::debug!(%err, "clone by encoding failed");
            None
        }
    }
}

/// [`clone_via_encoding`], falling back to `T::default()`.
pub fn clone_or_default<T>(source: Option<&T>) -> T
where
    T: Serialize + DeserializeOwned + Default,
{
    clone_via_encoding(source).unwrap_or_default()
}
