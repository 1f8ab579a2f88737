// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Head/tail ABI decoding — the inverse of [`crate::encoder`].

use ethereum_types::{Address, U256};

use crate::error::DecodeError;
use crate::{FunctionSelector, ParamType, Value};

/// Governs how decoding treats values that have more than one reasonable
/// interpretation.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
	/// Whether a decoded `string` is truncated at its first NUL byte
	/// (common in practice for null-terminated C-style buffers that get
	/// ABI-encoded verbatim). Defaults to `true`.
	pub truncate_strings: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		DecodeOptions { truncate_strings: true }
	}
}

/// Decodes `data` against `selector`'s declared input types, stripping the
/// leading 4-byte method-ID first when `selector` carries one.
pub fn decode(selector: &FunctionSelector, data: &[u8]) -> Result<Vec<Value>, DecodeError> {
	decode_with_options(selector, data, DecodeOptions::default())
}

/// As [`decode`], with explicit [`DecodeOptions`].
pub fn decode_with_options(
	selector: &FunctionSelector,
	data: &[u8],
	options: DecodeOptions,
) -> Result<Vec<Value>, DecodeError> {
	let body = if selector.has_method_id() {
		data.get(4..).ok_or(DecodeError::BufferTooShort { offset: 0, needed: 4, len: data.len() })?
	} else {
		data
	};
	decode_raw_with_options(&selector.input_types(), body, options)
}

/// Decodes `data` against `types` with no method-ID prefix expected.
pub fn decode_raw(types: &[ParamType], data: &[u8]) -> Result<Vec<Value>, DecodeError> {
	decode_raw_with_options(types, data, DecodeOptions::default())
}

/// As [`decode_raw`], with explicit [`DecodeOptions`].
pub fn decode_raw_with_options(
	types: &[ParamType],
	data: &[u8],
	options: DecodeOptions,
) -> Result<Vec<Value>, DecodeError> {
	decode_tuple(types, data, options, 0)
}

/// Nesting limit for dynamic tuples/arrays inside `decode_tuple`/
/// `decode_dynamic`, which recurse into each other's content; a depth
/// counter bounds adversarially deep inputs without needing a fully
/// iterative rewrite of the offset bookkeeping.
const MAX_NESTING_DEPTH: usize = 128;

fn decode_tuple(types: &[ParamType], data: &[u8], options: DecodeOptions, depth: usize) -> Result<Vec<Value>, DecodeError> {
	if depth > MAX_NESTING_DEPTH {
		return Err(DecodeError::NestingTooDeep { max: MAX_NESTING_DEPTH });
	}
	let mut values = Vec::with_capacity(types.len());
	let mut head_pos = 0usize;

	for ty in types {
		if ty.is_dynamic() {
			let offset = read_length(data, head_pos)?;
			head_pos += 32;
			let content = data.get(offset..).ok_or(DecodeError::BadOffset)?;
			values.push(decode_dynamic(ty, content, options, depth)?);
		} else {
			let size = ty.head_size();
			let chunk = read_bytes(data, head_pos, size)?;
			values.push(decode_static(ty, chunk)?);
			head_pos += size;
		}
	}

	Ok(values)
}

/// Rebuilds a statically-sized value out of `chunk`. Nested static
/// tuples/arrays are walked with an explicit worklist rather than native
/// recursion: a `Visit` frame pushes its children plus a `Combine*` frame
/// that folds their decoded values back together once they're all on
/// `results`, so stack depth tracks heap usage, not nesting depth.
fn decode_static(ty: &ParamType, chunk: &[u8]) -> Result<Value, DecodeError> {
	enum Frame<'a> {
		Visit { ty: &'a ParamType, chunk: &'a [u8] },
		CombineTuple { count: usize },
		CombineFixedArray { count: usize },
	}

	let mut work = vec![Frame::Visit { ty, chunk }];
	let mut results: Vec<Value> = Vec::new();

	while let Some(frame) = work.pop() {
		match frame {
			Frame::Visit { ty, chunk } => match ty {
				ParamType::Address => results.push(Value::Address(Address::from_slice(&chunk[12..32]))),
				ParamType::Uint(_) => results.push(Value::Uint(U256::from_big_endian(chunk))),
				ParamType::Int(_) => results.push(Value::Int(U256::from_big_endian(chunk))),
				ParamType::Bool => {
					let byte = chunk[31];
					if byte > 1 {
						return Err(DecodeError::BadBool(byte));
					}
					results.push(Value::Bool(byte == 1));
				}
				ParamType::FixedBytes(len) => results.push(Value::FixedBytes(chunk[..*len].to_vec())),
				ParamType::Function => {
					results.push(Value::Function(chunk[..24].try_into().expect("sliced to 24 bytes")))
				}
				ParamType::FixedArray(inner, len) => {
					let elem_size = inner.head_size();
					work.push(Frame::CombineFixedArray { count: *len });
					for i in (0..*len).rev() {
						work.push(Frame::Visit { ty: inner, chunk: &chunk[i * elem_size..(i + 1) * elem_size] });
					}
				}
				ParamType::Tuple(fields) => {
					work.push(Frame::CombineTuple { count: fields.len() });
					let mut offsets = Vec::with_capacity(fields.len());
					let mut pos = 0usize;
					for field in fields {
						let size = field.kind.head_size();
						offsets.push((pos, size));
						pos += size;
					}
					for (field, (start, size)) in fields.iter().zip(offsets).rev() {
						work.push(Frame::Visit { ty: &field.kind, chunk: &chunk[start..start + size] });
					}
				}
				ParamType::Fixed(..)
				| ParamType::UFixed(..)
				| ParamType::Bytes
				| ParamType::String
				| ParamType::Array(_) => {
					unreachable!("static dispatch only reaches non-dynamic leaf/composite types")
				}
			},
			Frame::CombineTuple { count } => {
				let start = results.len() - count;
				let items = results.split_off(start);
				results.push(Value::Tuple(items));
			}
			Frame::CombineFixedArray { count } => {
				let start = results.len() - count;
				let items = results.split_off(start);
				results.push(Value::FixedArray(items));
			}
		}
	}

	Ok(results.pop().expect("single root result"))
}

fn decode_dynamic(ty: &ParamType, content: &[u8], options: DecodeOptions, depth: usize) -> Result<Value, DecodeError> {
	if depth > MAX_NESTING_DEPTH {
		return Err(DecodeError::NestingTooDeep { max: MAX_NESTING_DEPTH });
	}
	Ok(match ty {
		ParamType::Bytes => {
			let len = read_length(content, 0)?;
			Value::Bytes(read_bytes(content, 32, len)?.to_vec())
		}
		ParamType::String => {
			let len = read_length(content, 0)?;
			let mut bytes = read_bytes(content, 32, len)?;
			if options.truncate_strings {
				if let Some(nul) = bytes.iter().position(|&b| b == 0) {
					bytes = &bytes[..nul];
				}
			}
			let s = std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)?;
			Value::String(s.to_owned())
		}
		ParamType::Array(inner) => {
			let len = read_length(content, 0)?;
			let types = vec![(**inner).clone(); len];
			let rest = content.get(32..).ok_or(DecodeError::BadOffset)?;
			Value::Array(decode_tuple(&types, rest, options, depth + 1)?)
		}
		ParamType::FixedArray(inner, len) => {
			let types = vec![(**inner).clone(); *len];
			Value::FixedArray(decode_tuple(&types, content, options, depth + 1)?)
		}
		ParamType::Tuple(fields) => {
			let types = fields.iter().map(|f| f.kind.clone()).collect::<Vec<_>>();
			Value::Tuple(decode_tuple(&types, content, options, depth + 1)?)
		}
		_ => unreachable!("dynamic dispatch only reaches dynamic-capable types"),
	})
}

fn read_bytes(data: &[u8], offset: usize, len: usize) -> Result<&[u8], DecodeError> {
	data.get(offset..offset + len).ok_or(DecodeError::BufferTooShort { offset, needed: len, len: data.len() })
}

/// Reads one 32-byte word as a length/offset, rejecting values that could
/// not plausibly index any real buffer.
fn read_length(data: &[u8], at: usize) -> Result<usize, DecodeError> {
	let word = read_bytes(data, at, 32)?;
	let value = U256::from_big_endian(word);
	if value > U256::from(u32::MAX) {
		return Err(DecodeError::BadOffset);
	}
	Ok(value.as_usize())
}

#[cfg(test)]
mod tests {
	use hex_literal::hex;

	use super::*;
	use crate::encoder::encode_raw;
	use crate::SelectorKind;

	fn selector(inputs: Vec<ParamType>) -> FunctionSelector {
		FunctionSelector {
			function: Some("f".to_owned()),
			kind: SelectorKind::Function,
			mutability: None,
			inputs: inputs.into_iter().map(crate::Param::new).collect(),
			outputs: None,
		}
	}

	#[test]
	fn round_trips_simple_call() {
		let sel = selector(vec![ParamType::Uint(32), ParamType::Bool]);
		let values = vec![Value::Uint(U256::from(69u32)), Value::Bool(true)];
		let encoded = crate::encoder::encode(&sel, &values).unwrap();
		assert_eq!(decode(&sel, &encoded).unwrap(), values);
	}

	#[test]
	fn round_trips_string() {
		let types = vec![ParamType::String];
		let values = vec![Value::String("gavofyork".to_owned())];
		let encoded = encode_raw(&types, &values).unwrap();
		assert_eq!(decode_raw(&types, &encoded).unwrap(), values);
	}

	#[test]
	fn round_trips_nested_static_tuple_inside_dynamic_tuple() {
		let inner = ParamType::Tuple(vec![crate::Param::new(ParamType::Uint(256)), crate::Param::new(ParamType::Address)]);
		let outer = ParamType::Tuple(vec![crate::Param::new(inner), crate::Param::new(ParamType::Bytes)]);
		let value = Value::Tuple(vec![
			Value::Tuple(vec![Value::Uint(U256::from(7u32)), Value::Address(Address::repeat_byte(0x11))]),
			Value::Bytes(vec![0xaa, 0xbb]),
		]);
		let encoded = encode_raw(&[outer.clone()], &[value.clone()]).unwrap();
		assert_eq!(decode_raw(&[outer], &encoded).unwrap(), vec![value]);
	}

	#[test]
	fn rejects_bad_bool() {
		let types = vec![ParamType::Bool];
		let mut data = vec![0u8; 32];
		data[31] = 2;
		assert_eq!(decode_raw(&types, &data).unwrap_err(), DecodeError::BadBool(2));
	}

	#[test]
	fn rejects_truncated_buffer() {
		let types = vec![ParamType::Uint(256), ParamType::Bool];
		assert!(matches!(decode_raw(&types, &[0u8; 32]).unwrap_err(), DecodeError::BufferTooShort { .. }));
	}

	#[test]
	fn truncates_string_at_nul_by_default() {
		let types = vec![ParamType::String];
		let encoded = encode_raw(&types, &[Value::String("ab\0cd".to_owned())]).unwrap();
		let decoded = decode_raw(&types, &encoded).unwrap();
		assert_eq!(decoded, vec![Value::String("ab".to_owned())]);

		let decoded_full =
			decode_raw_with_options(&types, &encoded, DecodeOptions { truncate_strings: false }).unwrap();
		assert_eq!(decoded_full, vec![Value::String("ab\0cd".to_owned())]);
	}

	#[test]
	fn round_trips_empty_dynamic_array() {
		let types = vec![ParamType::Array(Box::new(ParamType::Address))];
		let values = vec![Value::Array(vec![])];
		let encoded = encode_raw(&types, &values).unwrap();
		assert_eq!(decode_raw(&types, &encoded).unwrap(), values);
	}

	#[test]
	fn decodes_known_encoding() {
		// uint256(1), bool(true)
		let mut data = hex!("0000000000000000000000000000000000000000000000000000000000000001").to_vec();
		data.extend(hex!("0000000000000000000000000000000000000000000000000000000000000001"));
		let types = vec![ParamType::Uint(256), ParamType::Bool];
		assert_eq!(decode_raw(&types, &data).unwrap(), vec![Value::Uint(U256::one()), Value::Bool(true)]);
	}

	#[test]
	fn rejects_dynamic_nesting_past_the_depth_limit() {
		let types = vec![ParamType::Uint(256)];
		let err = decode_tuple(&types, &[0u8; 32], DecodeOptions::default(), MAX_NESTING_DEPTH + 1).unwrap_err();
		assert!(matches!(err, DecodeError::NestingTooDeep { .. }));
	}

	#[test]
	fn round_trips_deeply_nested_static_tuple_without_overflowing_the_call_stack() {
		let mut ty = ParamType::Tuple(vec![crate::Param::new(ParamType::Uint(256))]);
		let mut value = Value::Tuple(vec![Value::Uint(U256::from(1u32))]);
		for _ in 0..10_000 {
			ty = ParamType::Tuple(vec![crate::Param::new(ty)]);
			value = Value::Tuple(vec![value]);
		}
		let encoded = encode_raw(&[ty.clone()], &[value.clone()]).unwrap();
		assert_eq!(decode_raw(&[ty], &encoded).unwrap(), vec![value]);
	}
}
