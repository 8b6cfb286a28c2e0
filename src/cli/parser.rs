/*!
 * Script Parser
 */

use super::types::{CliError, CliResult, Request, Script};

/// Parse a request script
///
/// Tokens after the last request are ignored.
pub fn parse(input: &str) -> CliResult<Script> {
    let mut tokens = input.split_whitespace().enumerate();

    let arena_size = next_number::<usize>(&mut tokens, "arena size")?;
    let count = next_number::<usize>(&mut tokens, "request count")?;

    let mut requests = Vec::with_capacity(count.min(1 << 20));
    for request in 1..=count {
        let value = next_number::<i64>(&mut tokens, "request")?;
        let parsed = match value {
            0 => return Err(CliError::ZeroRequest { request }),
            v if v > 0 => Request::Allocate(v as usize),
            v => {
                let target = usize::try_from(v.unsigned_abs()).unwrap_or(usize::MAX);
                if target >= request {
                    return Err(CliError::RequestOutOfRange { request, target });
                }
                Request::Free(target)
            }
        };
        requests.push(parsed);
    }

    Ok(Script {
        arena_size,
        requests,
    })
}

fn next_number<'a, T: std::str::FromStr>(
    tokens: &mut impl Iterator<Item = (usize, &'a str)>,
    expected: &'static str,
) -> CliResult<T> {
    let (position, token) = tokens.next().ok_or_else(|| CliError::UnexpectedEof {
        expected: expected.to_string(),
    })?;
    token.parse().map_err(|_| CliError::InvalidToken {
        position: position + 1,
        token: token.to_string(),
        expected,
    })
}
