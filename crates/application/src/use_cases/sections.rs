//! Failure containment shared by the screen-loading use cases.

use tracing::warn;

use crate::ports::GatewayError;

/// Section name and error for a fetch that failed.
pub type SectionFailure = (&'static str, GatewayError);

/// Unwraps an optional fetch. A failure is logged, recorded and turned
/// into `None`; a skipped fetch is `None` as well.
pub fn contain<T>(
    section: &'static str,
    result: Option<Result<T, GatewayError>>,
    failures: &mut Vec<SectionFailure>,
) -> Option<T> {
    match result? {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(section, %error, "failed to fetch section");
            failures.push((section, error));
            None
        }
    }
}
