// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types for every codec stage.

use thiserror::Error;

/// Top-level error, one variant per component that can fail.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
	/// Malformed signature text.
	#[error(transparent)]
	Parse(#[from] ParseError),
	/// A value could not be encoded against its declared type.
	#[error(transparent)]
	Encode(#[from] EncodeError),
	/// A buffer could not be decoded against its declared type.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Event topic/data split failed.
	#[error(transparent)]
	Event(#[from] EventError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Lexer/parser failure. Carries a one-line message identifying the
/// offending token position.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("{0}")]
pub struct ParseError(pub String);

impl ParseError {
	/// Builds a message naming the offending token and its byte position.
	pub fn at(position: usize, message: impl Into<String>) -> Self {
		ParseError(format!("{} at position {}", message.into(), position))
	}

	/// Builds a message for running off the end of the input.
	pub fn eof(expected: impl Into<String>) -> Self {
		ParseError(format!("unexpected end of input, expected {}", expected.into()))
	}
}

/// Encoding failure.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum EncodeError {
	/// An integer value didn't fit in the declared type's bit width.
	#[error("value `{value}` does not fit in `{type_name}`")]
	Overflow {
		/// Rendering of the declared type, e.g. `uint8`.
		type_name: String,
		/// Short hex/decimal rendering of the offending value.
		value: String,
	},
	/// A `bytesN` value was longer than `N`.
	#[error("value of {got} bytes does not fit in bytes{max}")]
	SizeMismatch {
		/// Declared fixed size.
		max: usize,
		/// Actual length of the supplied value.
		got: usize,
	},
	/// A keyed input was missing a field the descriptor requires.
	#[error("missing field `{0}` in keyed input")]
	MissingField(String),
	/// The value shape didn't match the descriptor's arity or kind.
	#[error("value does not match type `{0}`")]
	TypeMismatch(String),
	/// The descriptor names a type this codec cannot encode (e.g. `fixed`/`ufixed`).
	#[error("unsupported type `{0}`")]
	UnsupportedType(String),
	/// Tuple/array nesting exceeded the depth this codec is willing to recurse into.
	#[error("type nests tuples/arrays more than {max} levels deep")]
	NestingTooDeep {
		/// The configured limit that was exceeded.
		max: usize,
	},
}

/// Decoding failure.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DecodeError {
	/// Read past the end of the buffer.
	#[error("buffer truncated: needed {needed} bytes at offset {offset}, had {len}")]
	BufferTooShort {
		/// Absolute byte offset the read started from.
		offset: usize,
		/// Bytes required from that offset.
		needed: usize,
		/// Total buffer length.
		len: usize,
	},
	/// A `bool` slot held a value other than 0 or 1.
	#[error("invalid bool encoding, last byte was 0x{0:02x}")]
	BadBool(u8),
	/// An offset word did not decode to a value that fits a buffer index.
	#[error("malformed offset word")]
	BadOffset,
	/// A dynamic `string`'s bytes were not valid UTF-8.
	#[error("invalid utf-8 in string value")]
	InvalidUtf8,
	/// Tuple/array nesting exceeded the depth this codec is willing to recurse into.
	#[error("type nests tuples/arrays more than {max} levels deep")]
	NestingTooDeep {
		/// The configured limit that was exceeded.
		max: usize,
	},
}

/// Event-log decoding failure.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum EventError {
	/// `topics.len()` didn't match the number of indexed fields expected.
	#[error(
		"topic count mismatch: got {got}, expected {expected} \
		 (toggle `check_signature` if topic0 is not the event signature)"
	)]
	TopicCountMismatch {
		/// Number of topics supplied by the caller.
		got: usize,
		/// Number of indexed fields (plus topic-0 if signature checking is on).
		expected: usize,
	},
	/// `topics[0]` did not equal `HASH(canonical(selector))`.
	#[error("topic0 mismatch: expected 0x{expected_hex}, got 0x{got_hex}")]
	TopicSignatureMismatch {
		/// Hex of the expected topic-0.
		expected_hex: String,
		/// Hex of the supplied topic-0.
		got_hex: String,
	},
}
