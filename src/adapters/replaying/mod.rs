//! Replaying adapters that serve recorded interactions from cassettes.

pub mod image_generator;

use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cassette::replayer::CassetteReplayer;
use crate::error::{FailureKind, ImageError};

/// Take the next recorded output for a given port and method.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<Value, ImageError> {
    let mut guard = replayer.lock().unwrap_or_else(PoisonError::into_inner);
    guard.next_interaction(port, method).map(|interaction| interaction.output)
}

/// Turn a recorded output back into the original `Result`.
///
/// `{Err: {kind, message}}` replays as [`ImageError::Replayed`]; a bare
/// string error replays as a transport failure.
pub(crate) fn replay_result<T: DeserializeOwned>(output: Value) -> Result<T, ImageError> {
    if let Some(err) = output.get("Err") {
        let kind = err
            .get("kind")
            .and_then(|k| serde_json::from_value::<FailureKind>(k.clone()).ok())
            .unwrap_or(FailureKind::Transport);
        let message = err
            .get("message")
            .or(Some(err))
            .and_then(Value::as_str)
            .unwrap_or("replayed error")
            .to_string();
        return Err(ImageError::Replayed { kind, message });
    }
    let ok = output.get("Ok").cloned().unwrap_or(output);
    serde_json::from_value(ok)
        .map_err(|e| ImageError::Cassette(format!("recorded output does not match: {e}")))
}
