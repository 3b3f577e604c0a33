//! Two-way fork/join for independent tasks.
//!
//! Used by the sort-merge join to sort both inputs at once. Each task owns
//! its output; results come back as a `(left, right)` pair, so completion
//! order never matters.

use std::any::Any;
use std::thread;

use crate::error::Error;
use crate::table::Table;

/// Run `left` and `right` on two scoped threads and wait for both.
///
/// Returns both results or a single error: a panic in either task becomes
/// [`Error::SortTaskFailed`], otherwise the left task's error takes
/// precedence over the right task's.
pub fn fork_join<A, B, FA, FB>(left: FA, right: FB) -> Result<(A, B), Error>
where
    A: Send,
    B: Send,
    FA: FnOnce() -> Result<A, Error> + Send,
    FB: FnOnce() -> Result<B, Error> + Send,
{
    thread::scope(|scope| {
        let left_handle = thread::Builder::new()
            .name("triplejoin-left".to_string())
            .spawn_scoped(scope, left)
            .map_err(|e| Error::SortTaskFailed(format!("failed to spawn left task: {e}")))?;
        let right_handle = thread::Builder::new()
            .name("triplejoin-right".to_string())
            .spawn_scoped(scope, right)
            .map_err(|e| Error::SortTaskFailed(format!("failed to spawn right task: {e}")))?;

        match (left_handle.join(), right_handle.join()) {
            (Ok(Ok(a)), Ok(Ok(b))) => Ok((a, b)),
            (Err(l), Err(r)) => Err(Error::SortTaskFailed(format!(
                "both tasks panicked: left: {}; right: {}",
                panic_message(&*l),
                panic_message(&*r)
            ))),
            (Err(payload), _) => Err(Error::SortTaskFailed(format!(
                "left task panicked: {}",
                panic_message(&*payload)
            ))),
            (_, Err(payload)) => Err(Error::SortTaskFailed(format!(
                "right task panicked: {}",
                panic_message(&*payload)
            ))),
            (Ok(Err(e)), _) | (_, Ok(Err(e))) => Err(e),
        }
    })
}

/// Sort private copies of two tables concurrently.
///
/// Returns `(left sorted on left_key, right sorted on right_key)`.
pub fn parallel_sort(
    left: &Table,
    left_key: usize,
    right: &Table,
    right_key: usize,
) -> Result<(Table, Table), Error> {
    fork_join(|| left.sorted_by(left_key), || right.sorted_by(right_key))
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
