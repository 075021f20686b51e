use rivulet_core::{Capability, RivuletError};

/// Join a collection of tasks and apply an optional request-level deadline.
///
/// This wraps `futures::future::join_all(tasks)` with the orchestrator's
/// deadline helper. On timeout, the inner helper returns
/// `RivuletError::RequestTimeout("request")` which call sites can remap to a
/// more specific capability label as needed.
///
/// # Errors
/// Returns `RivuletError::RequestTimeout` if the deadline elapses before all
/// tasks complete.
pub async fn join_with_deadline<I, F, T>(
    tasks: I,
    deadline: Option<std::time::Duration>,
) -> Result<Vec<T>, RivuletError>
where
    I: IntoIterator<Item = F>,
    F: core::future::Future<Output = T>,
{
    crate::core::with_request_deadline(deadline, futures::future::join_all(tasks)).await
}

/// Collapse a set of connector errors into a uniform `RivuletError` outcome.
///
/// Rules:
/// - If `attempted_any` is false → `Unsupported(capability)`.
/// - If all errors are `ConnectorTimeout` → `AllConnectorsTimedOut(capability)`.
/// - If `not_found_what` is `Some` and all errors are `NotFound` → `NotFound(what)`.
/// - Else → `AllConnectorsFailed(errors)`.
#[must_use]
pub fn collapse_errors(
    capability: Capability,
    attempted_any: bool,
    errors: Vec<RivuletError>,
    not_found_what: Option<String>,
) -> RivuletError {
    if !attempted_any {
        return RivuletError::unsupported(capability.to_string());
    }
    if !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, RivuletError::ConnectorTimeout { .. }))
    {
        return RivuletError::AllConnectorsTimedOut {
            capability: capability.to_string(),
        };
    }
    if let Some(what) = not_found_what
        && !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, RivuletError::NotFound { .. }))
    {
        return RivuletError::not_found(what);
    }
    RivuletError::AllConnectorsFailed(errors)
}
