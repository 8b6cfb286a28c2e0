/*!
 * Queue Types
 * Error taxonomy for the priority queue engine
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Queue operation result
pub type QueueResult<T> = Result<T, QueueError>;

/// Contract violations of the priority queue engine
#[derive(Error, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum QueueError {
    #[error("Queue overflow: all {capacity} slots are occupied")]
    #[diagnostic(
        code(quickheap::overflow),
        help("Raise the queue capacity or extract elements before inserting.")
    )]
    Overflow { capacity: usize },

    #[error("Element orders after the infinity sentinel")]
    #[diagnostic(
        code(quickheap::invalid_argument),
        help("Every inserted element must compare less than or equal to the sentinel given at construction.")
    )]
    InvalidArgument,

    #[error("Queue is empty")]
    #[diagnostic(
        code(quickheap::empty),
        help("Check len() or is_empty() before peeking or extracting.")
    )]
    Empty,
}
