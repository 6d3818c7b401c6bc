//! Recording adapters that capture interactions to cassettes.

pub mod image_generator;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;
use crate::error::ImageError;

/// Record a port call using the `{Ok: ..}` / `{Err: {kind, message}}` convention.
pub(crate) fn record_result<T, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, ImageError>,
) where
    T: Serialize,
    I: Serialize,
{
    let output = match result {
        Ok(v) => serde_json::to_value(v).map(|value| serde_json::json!({ "Ok": value })),
        Err(e) => Ok(serde_json::json!({
            "Err": { "kind": e.failure_kind(), "message": e.to_string() }
        })),
    };
    let encoded = serde_json::to_value(input).and_then(|input| Ok((input, output?)));

    match encoded {
        Ok((input, output)) => {
            let mut guard = recorder.lock().unwrap_or_else(PoisonError::into_inner);
            guard.record(port, method, input, output);
        }
        Err(e) => tracing::warn!(port, method, error = %e, "skipping unserializable interaction"),
    }
}
