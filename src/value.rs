// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The runtime data model carried alongside a [`crate::ParamType`] for
//! encoding, and produced by decoding.

use ethereum_types::{Address, U256};

use crate::{Param, ParamType};

/// A value of some ABI type, paired one-to-one with a [`ParamType`] shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
	/// `address`.
	Address(Address),
	/// Dynamic `bytes`.
	Bytes(Vec<u8>),
	/// `bytesN`. Length matches the `FixedBytes(N)` it was produced for.
	FixedBytes(Vec<u8>),
	/// `intN`, stored two's-complement-normalized in a 256-bit word.
	Int(U256),
	/// `uintN`.
	Uint(U256),
	/// `bool`.
	Bool(bool),
	/// Dynamic UTF-8 `string`.
	String(String),
	/// Opaque 24-byte `function` selector (address ++ method id).
	Function([u8; 24]),
	/// `T[]`.
	Array(Vec<Value>),
	/// `T[k]`.
	FixedArray(Vec<Value>),
	/// `(T1,T2,…)`.
	Tuple(Vec<Value>),
}

impl Value {
	/// The [`ParamType`] this value is shaped like. For `Array`/`FixedArray`/
	/// `Tuple` this recurses into the first element (or, for an empty
	/// dynamic array, cannot recover an element type and returns `None`).
	pub fn param_type(&self) -> Option<ParamType> {
		Some(match self {
			Value::Address(_) => ParamType::Address,
			Value::Bytes(_) => ParamType::Bytes,
			Value::FixedBytes(b) => ParamType::FixedBytes(b.len()),
			Value::Int(_) => ParamType::Int(256),
			Value::Uint(_) => ParamType::Uint(256),
			Value::Bool(_) => ParamType::Bool,
			Value::String(_) => ParamType::String,
			Value::Function(_) => ParamType::Function,
			Value::Array(items) => ParamType::Array(Box::new(items.first()?.param_type()?)),
			Value::FixedArray(items) => {
				let inner = match items.first() {
					Some(v) => v.param_type()?,
					None => return None,
				};
				ParamType::FixedArray(Box::new(inner), items.len())
			}
			Value::Tuple(items) => {
				let kinds = items.iter().map(Value::param_type).collect::<Option<Vec<_>>>()?;
				ParamType::Tuple(kinds.into_iter().map(Param::new).collect())
			}
		})
	}

	/// Whether this value's encoding has value-dependent length, matching
	/// [`ParamType::is_dynamic`] for the type it was built against.
	pub fn is_dynamic(&self) -> bool {
		match self {
			Value::Bytes(_) | Value::String(_) | Value::Array(_) => true,
			Value::FixedArray(items) => items.iter().any(Value::is_dynamic),
			Value::Tuple(items) => items.iter().any(Value::is_dynamic),
			_ => false,
		}
	}
}
