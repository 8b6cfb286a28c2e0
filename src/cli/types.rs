/*!
 * Script Types
 */

use crate::core::types::Size;
use crate::memory::MemoryError;
use miette::Diagnostic;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

/// Errors raised while reading or replaying a request script
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error("Unexpected end of input: missing {expected}")]
    #[diagnostic(
        code(cli::unexpected_eof),
        help("The script is `N M` followed by exactly M requests.")
    )]
    UnexpectedEof { expected: String },

    #[error("Token {position} ({token:?}) is not a valid {expected}")]
    #[diagnostic(code(cli::invalid_token))]
    InvalidToken {
        position: usize,
        token: String,
        expected: &'static str,
    },

    #[error("Request {request} is zero")]
    #[diagnostic(
        code(cli::zero_request),
        help("Use a positive size to allocate or a negative request number to free.")
    )]
    ZeroRequest { request: usize },

    #[error("Request {request} frees request {target}, which does not precede it")]
    #[diagnostic(
        code(cli::request_out_of_range),
        help("A free may only name an earlier request.")
    )]
    RequestOutOfRange { request: usize, target: usize },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Memory(#[from] MemoryError),

    #[error("I/O error: {0}")]
    #[diagnostic(code(cli::io))]
    Io(#[from] std::io::Error),
}

/// One line of the script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Allocate(Size),
    /// Free the block of the given 1-based request number
    Free(usize),
}

/// Parsed request script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub arena_size: Size,
    pub requests: Vec<Request>,
}

impl Script {
    /// Number of allocation requests in the script
    pub fn allocations(&self) -> usize {
        self.requests
            .iter()
            .filter(|request| matches!(request, Request::Allocate(_)))
            .count()
    }
}
