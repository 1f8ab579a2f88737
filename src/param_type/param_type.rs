// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;

use super::Writer;
use crate::Param;

/// A single node of the ABI type tree.
///
/// `Struct(name, fields)` is intentionally absent here: a struct is a
/// `Tuple` tagged at the `Param` level (see [`crate::Param::internal_type`]),
/// so the codec only ever has to reason about one tuple shape. A tuple's
/// fields are full [`Param`]s rather than bare `ParamType`s so that a
/// component's name (and its own `internal_type`, for nested structs)
/// survives alongside its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
	/// `address`.
	Address,
	/// Dynamic `bytes`.
	Bytes,
	/// `bytesN`, `1 <= N <= 32`.
	FixedBytes(usize),
	/// `intN`, `N` a multiple of 8 up to 256.
	Int(usize),
	/// `uintN`, `N` a multiple of 8 up to 256.
	Uint(usize),
	/// `bool`.
	Bool,
	/// Dynamic UTF-8 `string`.
	String,
	/// Opaque 24-byte `function` selector, left-padded to 32 on the wire.
	Function,
	/// `fixedMxN`: recognized for parsing only, never encoded or decoded.
	Fixed(usize, usize),
	/// `ufixedMxN`: recognized for parsing only, never encoded or decoded.
	UFixed(usize, usize),
	/// `T[]`.
	Array(Box<ParamType>),
	/// `T[k]`.
	FixedArray(Box<ParamType>, usize),
	/// `(T1,T2,…)`.
	Tuple(Vec<Param>),
}

impl ParamType {
	/// Whether this type's encoded length depends on its value.
	///
	/// Walks the type tree with an explicit stack rather than native
	/// recursion, so depth is bounded by the heap, not the call stack, for
	/// arbitrarily nested tuples/arrays.
	pub fn is_dynamic(&self) -> bool {
		let mut stack = vec![self];
		while let Some(ty) = stack.pop() {
			match ty {
				ParamType::Bytes | ParamType::String | ParamType::Array(_) => return true,
				ParamType::FixedArray(inner, len) => {
					if *len > 0 {
						stack.push(inner);
					}
				}
				ParamType::Tuple(fields) => stack.extend(fields.iter().map(|f| &f.kind)),
				_ => {}
			}
		}
		false
	}

	/// Number of head bytes this type occupies when used directly as a
	/// tuple field. Every leaf occupies exactly one 32-byte slot — either
	/// the value itself (static) or an offset pointer (dynamic) — except a
	/// static `Tuple` or static `FixedArray`, which are inlined and
	/// contribute the sum (respectively, the product) of their element
	/// head sizes. This rule applies recursively at every nesting level.
	///
	/// Computed with an explicit worklist rather than native recursion: a
	/// `Visit` task pushes its children (plus a `Combine` task to fold
	/// their sizes once they're all on `results`), so stack depth tracks
	/// heap usage, not nesting depth.
	pub fn head_size(&self) -> usize {
		enum Task<'a> {
			Visit(&'a ParamType),
			SumTuple(usize),
			MulFixedArray(usize),
		}

		let mut work = vec![Task::Visit(self)];
		let mut results: Vec<usize> = Vec::new();

		while let Some(task) = work.pop() {
			match task {
				Task::Visit(ty) => {
					if ty.is_dynamic() {
						results.push(32);
						continue;
					}
					match ty {
						ParamType::Tuple(fields) => {
							work.push(Task::SumTuple(fields.len()));
							for f in fields.iter().rev() {
								work.push(Task::Visit(&f.kind));
							}
						}
						ParamType::FixedArray(inner, len) => {
							work.push(Task::MulFixedArray(*len));
							work.push(Task::Visit(inner));
						}
						_ => results.push(32),
					}
				}
				Task::SumTuple(count) => {
					let start = results.len() - count;
					let sum: usize = results.drain(start..).sum();
					results.push(sum);
				}
				Task::MulFixedArray(len) => {
					let inner_size = results.pop().expect("pushed by the preceding Visit");
					results.push(len * inner_size);
				}
			}
		}

		results.pop().expect("single root result")
	}

	/// Whether the empty byte string (`0x`) is itself a valid encoding of
	/// this type — true only for a zero-width fixed array or `bytes0`.
	pub fn is_empty_bytes_valid_encoding(&self) -> bool {
		match self {
			ParamType::FixedBytes(len) => *len == 0,
			ParamType::FixedArray(_, len) => *len == 0,
			ParamType::Tuple(fields) => fields.is_empty(),
			_ => false,
		}
	}
}

impl fmt::Display for ParamType {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", Writer::write(self))
	}
}

#[cfg(test)]
mod tests {
	use super::ParamType;
	use crate::Param;

	fn field(kind: ParamType) -> Param {
		Param::new(kind)
	}

	#[test]
	fn display() {
		assert_eq!(format!("{}", ParamType::Address), "address");
		assert_eq!(format!("{}", ParamType::Uint(256)), "uint256");
		assert_eq!(format!("{}", ParamType::FixedBytes(32)), "bytes32");
		assert_eq!(format!("{}", ParamType::Array(Box::new(ParamType::Bool))), "bool[]");
		assert_eq!(
			format!("{}", ParamType::Tuple(vec![field(ParamType::Address), field(ParamType::Uint(256))])),
			"(address,uint256)"
		);
	}

	#[test]
	fn dynamic_leaves() {
		assert!(!ParamType::Address.is_dynamic());
		assert!(!ParamType::Uint(256).is_dynamic());
		assert!(ParamType::Bytes.is_dynamic());
		assert!(ParamType::String.is_dynamic());
	}

	#[test]
	fn dynamic_array_rules() {
		assert!(ParamType::Array(Box::new(ParamType::Address)).is_dynamic());
		assert!(!ParamType::FixedArray(Box::new(ParamType::Address), 0).is_dynamic());
		assert!(!ParamType::FixedArray(Box::new(ParamType::Address), 4).is_dynamic());
		assert!(ParamType::FixedArray(Box::new(ParamType::Bytes), 4).is_dynamic());
		// a zero-length fixed array is static even if its element is dynamic
		assert!(!ParamType::FixedArray(Box::new(ParamType::Bytes), 0).is_dynamic());
	}

	#[test]
	fn dynamic_tuple_rules() {
		assert!(!ParamType::Tuple(vec![field(ParamType::Uint(256)), field(ParamType::Address)]).is_dynamic());
		assert!(ParamType::Tuple(vec![field(ParamType::Uint(256)), field(ParamType::Bytes)]).is_dynamic());
		// nested static tuple stays static
		assert!(!ParamType::Tuple(vec![
			field(ParamType::Uint(256)),
			field(ParamType::Tuple(vec![field(ParamType::Uint(256)), field(ParamType::Uint(256))]))
		])
		.is_dynamic());
	}

	#[test]
	fn head_size_inlines_static_tuples() {
		let nested = ParamType::Tuple(vec![
			field(ParamType::Uint(256)),
			field(ParamType::Tuple(vec![field(ParamType::Uint(256)), field(ParamType::Uint(256))])),
		]);
		assert!(!nested.is_dynamic());
		// 1 slot for the outer uint256 + 2 slots for the inlined inner tuple
		assert_eq!(nested.head_size(), 96);

		let doubly_nested = ParamType::Tuple(vec![field(nested.clone()), field(ParamType::Address)]);
		assert_eq!(doubly_nested.head_size(), 96 + 32);

		// a single dynamic field anywhere makes the whole tuple an offset slot
		let dynamic = ParamType::Tuple(vec![field(ParamType::Uint(256)), field(ParamType::Bytes)]);
		assert_eq!(dynamic.head_size(), 32);
	}

	#[test]
	fn head_size_inlines_static_fixed_arrays() {
		let arr = ParamType::FixedArray(Box::new(ParamType::Uint(256)), 3);
		assert!(!arr.is_dynamic());
		assert_eq!(arr.head_size(), 96);

		let nested = ParamType::FixedArray(
			Box::new(ParamType::Tuple(vec![field(ParamType::Uint(256)), field(ParamType::Address)])),
			2,
		);
		assert!(!nested.is_dynamic());
		assert_eq!(nested.head_size(), 2 * 64);

		let dynamic = ParamType::FixedArray(Box::new(ParamType::Bytes), 3);
		assert_eq!(dynamic.head_size(), 32);
	}

	#[test]
	fn head_size_deeply_nested_tuples_does_not_overflow_the_call_stack() {
		let mut ty = ParamType::Tuple(vec![field(ParamType::Uint(256))]);
		for _ in 0..10_000 {
			ty = ParamType::Tuple(vec![field(ty)]);
		}
		assert_eq!(ty.head_size(), 32);
		assert!(!ty.is_dynamic());
	}

	#[test]
	fn empty_bytes_valid_encoding() {
		assert!(ParamType::FixedBytes(0).is_empty_bytes_valid_encoding());
		assert!(!ParamType::FixedBytes(1).is_empty_bytes_valid_encoding());
		assert!(ParamType::FixedArray(Box::new(ParamType::Bool), 0).is_empty_bytes_valid_encoding());
		assert!(!ParamType::Bytes.is_empty_bytes_valid_encoding());
	}
}
