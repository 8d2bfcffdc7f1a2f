//! Wrapper around every call into a native surface.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use super::capability::CapabilityError;
use super::error::OverlayError;

/// Runs `call`, turning both an `Err` and a panic into
/// [`OverlayError::NativeCallFailed`] tagged with `operation`.
///
/// Requires `panic = "unwind"`.
pub(crate) fn guarded<T>(
    operation: &'static str,
    call: impl FnOnce() -> Result<T, CapabilityError>,
) -> Result<T, OverlayError> {
    let message = match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(value)) => return Ok(value),
        Ok(Err(err)) => err.to_string(),
        Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
    };
    warn!(operation, %message, "native call failed");
    Err(OverlayError::NativeCallFailed { operation, message })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
