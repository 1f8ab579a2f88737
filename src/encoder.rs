// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Head/tail ABI encoding.
//!
//! A tuple's fields are laid out as a fixed-width *head* followed by a
//! variable-width *tail*: a static field is written directly into the
//! head (recursively inlined, for a static `Tuple`/`FixedArray`, rather
//! than pointed at); a dynamic field gets a 32-byte offset slot in the
//! head and its real content appended to the tail. The same routine
//! encodes the outermost argument list and every nested dynamic
//! tuple/array — nesting only changes where the tail bytes end up, not
//! how they're produced.

use ethereum_types::U256;

use crate::canonical::canonical;
use crate::error::EncodeError;
use crate::hash::keccak256;
use crate::param_type::Writer;
use crate::util;
use crate::{FunctionSelector, ParamType, Value};

/// Encodes `values` against `selector`'s declared input types, prefixed
/// with the 4-byte method-ID when `selector` is a named, callable
/// function.
pub fn encode(selector: &FunctionSelector, values: &[Value]) -> Result<Vec<u8>, EncodeError> {
	let types = selector.input_types();
	let mut out = Vec::new();
	if selector.has_method_id() {
		out.extend_from_slice(&method_id(selector));
	}
	out.extend(encode_raw(&types, values)?);
	Ok(out)
}

/// The 4-byte method-ID: the first 4 bytes of `HASH(canonical(selector))`.
pub fn method_id(selector: &FunctionSelector) -> [u8; 4] {
	let hash = keccak256(canonical(selector).as_bytes());
	[hash[0], hash[1], hash[2], hash[3]]
}

/// Nesting limit for dynamic tuples/arrays inside `encode_tuple`/
/// `encode_dynamic`, which recurse into each other's tail; a depth counter
/// bounds adversarially deep inputs without needing a fully iterative
/// rewrite of the offset bookkeeping.
const MAX_NESTING_DEPTH: usize = 128;

/// Encodes `values` against `types` with no method-ID prefix — the raw
/// head/tail tuple encoding.
pub fn encode_raw(types: &[ParamType], values: &[Value]) -> Result<Vec<u8>, EncodeError> {
	encode_tuple(types, values, 0)
}

fn encode_tuple(types: &[ParamType], values: &[Value], depth: usize) -> Result<Vec<u8>, EncodeError> {
	if depth > MAX_NESTING_DEPTH {
		return Err(EncodeError::NestingTooDeep { max: MAX_NESTING_DEPTH });
	}
	if types.len() != values.len() {
		return Err(EncodeError::TypeMismatch(format!("expected {} values, got {}", types.len(), values.len())));
	}

	let head_size: usize = types.iter().map(ParamType::head_size).sum();
	let mut head = Vec::with_capacity(head_size);
	let mut tail = Vec::new();

	for (ty, value) in types.iter().zip(values) {
		if ty.is_dynamic() {
			let offset = head_size + tail.len();
			head.extend_from_slice(&pad_u256(U256::from(offset)));
			encode_dynamic(ty, value, &mut tail, depth)?;
		} else {
			encode_static(ty, value, &mut head)?;
		}
	}

	head.extend(tail);
	Ok(head)
}

/// Writes a statically-sized value directly into `out`. Nested static
/// tuples/arrays are walked with an explicit stack rather than native
/// recursion, so a pathologically deep (but static) type tree cannot
/// overflow the call stack.
fn encode_static(ty: &ParamType, value: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError> {
	let mut stack: Vec<(&ParamType, &Value)> = vec![(ty, value)];
	while let Some((ty, value)) = stack.pop() {
		match (ty, value) {
			(ParamType::Address, Value::Address(addr)) => {
				let mut word = [0u8; 32];
				word[12..].copy_from_slice(addr.as_bytes());
				out.extend_from_slice(&word);
			}
			(ParamType::Uint(bits), Value::Uint(v)) => {
				if !util::fits_uint(*v, *bits) {
					return Err(EncodeError::Overflow { type_name: Writer::write(ty), value: v.to_string() });
				}
				out.extend_from_slice(&pad_u256(*v));
			}
			(ParamType::Int(bits), Value::Int(v)) => {
				if !util::fits_int(*v, *bits) {
					return Err(EncodeError::Overflow { type_name: Writer::write(ty), value: v.to_string() });
				}
				out.extend_from_slice(&pad_u256(*v));
			}
			(ParamType::Bool, Value::Bool(b)) => {
				let mut word = [0u8; 32];
				word[31] = *b as u8;
				out.extend_from_slice(&word);
			}
			(ParamType::FixedBytes(len), Value::FixedBytes(bytes)) => {
				if bytes.len() != *len {
					return Err(EncodeError::SizeMismatch { max: *len, got: bytes.len() });
				}
				let mut word = [0u8; 32];
				word[..bytes.len()].copy_from_slice(bytes);
				out.extend_from_slice(&word);
			}
			(ParamType::Function, Value::Function(bytes)) => {
				let mut word = [0u8; 32];
				word[..24].copy_from_slice(bytes);
				out.extend_from_slice(&word);
			}
			(ParamType::FixedArray(inner, len), Value::FixedArray(items)) => {
				if items.len() != *len {
					return Err(EncodeError::TypeMismatch(format!("expected {} elements, got {}", len, items.len())));
				}
				stack.extend(items.iter().rev().map(|item| (inner.as_ref(), item)));
			}
			(ParamType::Tuple(fields), Value::Tuple(items)) => {
				if fields.len() != items.len() {
					return Err(EncodeError::TypeMismatch(format!(
						"expected {} tuple fields, got {}",
						fields.len(),
						items.len()
					)));
				}
				stack.extend(fields.iter().zip(items).rev().map(|(f, item)| (&f.kind, item)));
			}
			(ParamType::Fixed(..) | ParamType::UFixed(..), _) => {
				return Err(EncodeError::UnsupportedType(Writer::write(ty)));
			}
			_ => return Err(EncodeError::TypeMismatch(Writer::write(ty))),
		}
	}
	Ok(())
}

fn encode_dynamic(ty: &ParamType, value: &Value, out: &mut Vec<u8>, depth: usize) -> Result<(), EncodeError> {
	if depth > MAX_NESTING_DEPTH {
		return Err(EncodeError::NestingTooDeep { max: MAX_NESTING_DEPTH });
	}
	match (ty, value) {
		(ParamType::Bytes, Value::Bytes(bytes)) => encode_bytes(bytes, out),
		(ParamType::String, Value::String(s)) => encode_bytes(s.as_bytes(), out),
		(ParamType::Array(inner), Value::Array(items)) => {
			out.extend_from_slice(&pad_u256(U256::from(items.len())));
			let types = vec![(**inner).clone(); items.len()];
			out.extend(encode_tuple(&types, items, depth + 1)?);
		}
		(ParamType::FixedArray(inner, len), Value::FixedArray(items)) => {
			if items.len() != *len {
				return Err(EncodeError::TypeMismatch(format!("expected {} elements, got {}", len, items.len())));
			}
			let types = vec![(**inner).clone(); *len];
			out.extend(encode_tuple(&types, items, depth + 1)?);
		}
		(ParamType::Tuple(fields), Value::Tuple(items)) => {
			let types = fields.iter().map(|f| f.kind.clone()).collect::<Vec<_>>();
			out.extend(encode_tuple(&types, items, depth + 1)?);
		}
		_ => return Err(EncodeError::TypeMismatch(Writer::write(ty))),
	}
	Ok(())
}

fn encode_bytes(data: &[u8], out: &mut Vec<u8>) {
	out.extend_from_slice(&pad_u256(U256::from(data.len())));
	out.extend_from_slice(data);
	let rem = data.len() % 32;
	if rem != 0 {
		out.extend(std::iter::repeat(0u8).take(32 - rem));
	}
}

fn pad_u256(value: U256) -> [u8; 32] {
	let mut buf = [0u8; 32];
	value.to_big_endian(&mut buf);
	buf
}
