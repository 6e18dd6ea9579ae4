//! Parsing and validation of generated replies.

use super::model::{Response, ResponseError, ResponseField};
use thiserror::Error;

const FENCE: &str = "```";

/// A failed parse: the error plus the fallback record to display instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{error}")]
pub struct ParseFailure {
    pub fallback: Response,
    #[source]
    pub error: ResponseError,
}

impl ParseFailure {
    fn new(raw: &str, error: ResponseError) -> Self {
        Self {
            fallback: Response::fallback(raw),
            error,
        }
    }

    pub fn into_parts(self) -> (Response, ResponseError) {
        (self.fallback, self.error)
    }
}

/// Removes one outermost fenced block from `text`, if present.
///
/// The opening fence is the whole first line (so an info string such as
/// `json` is dropped with it). The body ends at the last line that starts with
/// a fence; when there is none, everything after the opening line is the body.
/// Text without a leading fence, or a fence with nothing after its line, is
/// returned trimmed but otherwise untouched.
pub fn strip_outer_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with(FENCE) {
        return trimmed;
    }

    let Some((_, remaining)) = trimmed.split_once('\n') else {
        return trimmed;
    };

    match remaining.rfind("\n```") {
        Some(closing) => remaining[..closing].trim(),
        None => remaining.trim(),
    }
}

/// Parses a generated reply into a validated [`Response`].
///
/// Steps, in order:
/// 1. whitespace-only input fails with [`ResponseError::EmptyInput`];
/// 2. a single outer code fence is stripped ([`strip_outer_fence`]);
/// 3. the remainder is decoded as a JSON object, failing with
///    [`ResponseError::Parse`];
/// 4. `reasoning`, `summary` and `content` must each be non-blank; the first
///    blank one fails with [`ResponseError::EmptyField`].
///
/// Every failure carries [`Response::fallback`] built from the original `raw`
/// text, never from the fence-stripped body.
///
/// # Examples
///
/// ```
/// use nani_core::response::{parse_response, ResponseError, ResponseField};
///
/// let parsed = parse_response(r#"{"reasoning":"a","summary":"b","content":"c"}"#).unwrap();
/// assert_eq!(parsed.content, "c");
///
/// let failure = parse_response(r#"{"reasoning":"a","content":"c"}"#).unwrap_err();
/// assert_eq!(failure.error, ResponseError::EmptyField(ResponseField::Summary));
/// assert_eq!(failure.fallback.content, r#"{"reasoning":"a","content":"c"}"#);
/// ```
pub fn parse_response(raw: &str) -> Result<Response, ParseFailure> {
    if raw.trim().is_empty() {
        return Err(ParseFailure::new(raw, ResponseError::EmptyInput));
    }

    let body = strip_outer_fence(raw);
    let response: Response = serde_json::from_str(body)
        .map_err(|err| ParseFailure::new(raw, ResponseError::Parse(err.to_string())))?;

    for field in ResponseField::ALL {
        if response.field(field).trim().is_empty() {
            return Err(ParseFailure::new(raw, ResponseError::EmptyField(field)));
        }
    }

    Ok(response)
}

/// Like [`parse_response`] but always yields a record to display, with the
/// error (if any) alongside it.
pub fn parse_response_or_fallback(raw: &str) -> (Response, Option<ResponseError>) {
    match parse_response(raw) {
        Ok(response) => (response, None),
        Err(failure) => {
            let (fallback, error) = failure.into_parts();
            (fallback, Some(error))
        }
    }
}
