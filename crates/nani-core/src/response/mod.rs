//! Structured response protocol.
//!
//! Generated replies are expected to be a JSON object with three string
//! fields (`reasoning`, `summary`, `content`), optionally wrapped in a single
//! fenced code block. [`parse_response`] validates that shape and, on any
//! failure, hands back a fallback record that keeps the raw text in `content`
//! so the caller always has something to display.

mod codec;
mod model;

pub use codec::{ParseFailure, parse_response, parse_response_or_fallback, strip_outer_fence};
pub use model::{
    FALLBACK_REASONING, FALLBACK_SUMMARY, RESPONSE_SCHEMA_HINT, Response, ResponseError,
    ResponseField,
};
