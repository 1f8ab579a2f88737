// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::{ParamType, ParseError};

/// Converts a single type token (as it would appear in a JSON-ABI
/// `Component.type` field, e.g. `"uint256[3][]"`) into a [`ParamType`].
/// Tuple shapes are not handled here — the JSON loader builds `Tuple` from
/// `components` directly; this reader only ever sees leaves.
pub struct Reader;

impl Reader {
	/// Parses a non-tuple type token.
	pub fn read(name: &str) -> Result<ParamType, ParseError> {
		let name = name.trim();

		if let Some(stripped) = name.strip_suffix(']') {
			return Reader::read_array(name, stripped);
		}

		Reader::read_primitive(name)
	}

	fn read_array(full: &str, without_closing: &str) -> Result<ParamType, ParseError> {
		let open = without_closing
			.rfind('[')
			.ok_or_else(|| ParseError(format!("unmatched `]` in type `{}`", full)))?;

		let subtype = Reader::read(&without_closing[..open])?;
		let size_str = &without_closing[open + 1..];

		if size_str.is_empty() {
			Ok(ParamType::Array(Box::new(subtype)))
		} else {
			let size = size_str
				.parse::<usize>()
				.map_err(|_| ParseError(format!("invalid array size `{}` in type `{}`", size_str, full)))?;
			Ok(ParamType::FixedArray(Box::new(subtype), size))
		}
	}

	fn read_primitive(s: &str) -> Result<ParamType, ParseError> {
		match s {
			"address" => Ok(ParamType::Address),
			"bytes" => Ok(ParamType::Bytes),
			"bool" => Ok(ParamType::Bool),
			"string" => Ok(ParamType::String),
			"function" => Ok(ParamType::Function),
			"int" => Ok(ParamType::Int(256)),
			"uint" => Ok(ParamType::Uint(256)),
			"tuple" => Ok(ParamType::Tuple(vec![])),
			_ => {
				if let Some(rest) = s.strip_prefix("uint") {
					Ok(ParamType::Uint(parse_width(s, rest)?))
				} else if let Some(rest) = s.strip_prefix("int") {
					Ok(ParamType::Int(parse_width(s, rest)?))
				} else if let Some(rest) = s.strip_prefix("bytes") {
					let len = parse_width(s, rest)?;
					if len == 0 || len > 32 {
						return Err(ParseError(format!("bytes width out of range 1..=32: `{}`", s)));
					}
					Ok(ParamType::FixedBytes(len))
				} else if let Some(rest) = s.strip_prefix("ufixed") {
					let (m, n) = parse_mxn(s, rest)?;
					Ok(ParamType::UFixed(m, n))
				} else if let Some(rest) = s.strip_prefix("fixed") {
					let (m, n) = parse_mxn(s, rest)?;
					Ok(ParamType::Fixed(m, n))
				} else {
					Err(ParseError(format!("unrecognized type `{}`", s)))
				}
			}
		}
	}
}

fn parse_width(whole: &str, rest: &str) -> Result<usize, ParseError> {
	rest.parse::<usize>().map_err(|_| ParseError(format!("invalid width in type `{}`", whole)))
}

fn parse_mxn(whole: &str, rest: &str) -> Result<(usize, usize), ParseError> {
	let (m, n) = rest
		.split_once('x')
		.ok_or_else(|| ParseError(format!("expected `MxN` width in type `{}`", whole)))?;
	let m = m.parse::<usize>().map_err(|_| ParseError(format!("invalid `M` in type `{}`", whole)))?;
	let n = n.parse::<usize>().map_err(|_| ParseError(format!("invalid `N` in type `{}`", whole)))?;
	Ok((m, n))
}

#[cfg(test)]
mod tests {
	use super::Reader;
	use crate::ParamType;

	#[test]
	fn read_primitives() {
		assert_eq!(Reader::read("address").unwrap(), ParamType::Address);
		assert_eq!(Reader::read("uint").unwrap(), ParamType::Uint(256));
		assert_eq!(Reader::read("int").unwrap(), ParamType::Int(256));
		assert_eq!(Reader::read("uint32").unwrap(), ParamType::Uint(32));
		assert_eq!(Reader::read("bytes32").unwrap(), ParamType::FixedBytes(32));
		assert_eq!(Reader::read("bytes").unwrap(), ParamType::Bytes);
		assert_eq!(Reader::read("function").unwrap(), ParamType::Function);
		assert_eq!(Reader::read("fixed128x18").unwrap(), ParamType::Fixed(128, 18));
		assert_eq!(Reader::read("ufixed8x2").unwrap(), ParamType::UFixed(8, 2));
	}

	#[test]
	fn read_arrays() {
		assert_eq!(Reader::read("address[]").unwrap(), ParamType::Array(Box::new(ParamType::Address)));
		assert_eq!(
			Reader::read("bool[][]").unwrap(),
			ParamType::Array(Box::new(ParamType::Array(Box::new(ParamType::Bool))))
		);
		assert_eq!(Reader::read("address[2]").unwrap(), ParamType::FixedArray(Box::new(ParamType::Address), 2));
		assert_eq!(
			Reader::read("bytes32[3][]").unwrap(),
			ParamType::Array(Box::new(ParamType::FixedArray(Box::new(ParamType::FixedBytes(32)), 3)))
		);
	}

	#[test]
	fn rejects_bad_bytes_width() {
		assert!(Reader::read("bytes0").is_err());
		assert!(Reader::read("bytes33").is_err());
	}

	#[test]
	fn rejects_garbage() {
		assert!(Reader::read("uintx").is_err());
		assert!(Reader::read("not_a_type").is_err());
	}
}
