// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The normalized descriptor every other component operates on.

use crate::{Param, ParamType, StateMutability};

/// What a [`FunctionSelector`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
	/// A named, callable function.
	Function,
	/// A contract constructor.
	Constructor,
	/// The contract's fallback function.
	Fallback,
	/// The contract's `receive` function.
	Receive,
	/// An event definition.
	Event,
	/// A custom (ABI v2) error definition.
	Error,
	/// A bare, unnamed argument tuple — e.g. a signature string with no
	/// leading name.
	Unnamed,
}

/// A normalized function/event/error/constructor descriptor — the single
/// shape every parser (text or JSON) produces and every codec stage
/// consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSelector {
	/// Name, if any. `None` is only valid when `kind` is `Fallback`,
	/// `Receive`, or `Unnamed`.
	pub function: Option<String>,
	/// What this descriptor represents.
	pub kind: SelectorKind,
	/// State mutability, when meaningful for `kind`.
	pub mutability: Option<StateMutability>,
	/// Input fields, in declaration order.
	pub inputs: Vec<Param>,
	/// Output fields. `None` for kinds where outputs make no sense
	/// (constructor/fallback/receive/event/error); `Some(vec![])` means
	/// "declared to return nothing".
	pub outputs: Option<Vec<Param>>,
}

impl FunctionSelector {
	/// Validates the invariant on `function`/`kind` pairing.
	pub fn is_well_formed(&self) -> bool {
		if self.function.is_none() {
			matches!(self.kind, SelectorKind::Fallback | SelectorKind::Receive | SelectorKind::Unnamed)
		} else {
			true
		}
	}

	/// Input types only, for feeding the encoder/decoder.
	pub fn input_types(&self) -> Vec<ParamType> {
		self.inputs.iter().map(|p| p.kind.clone()).collect()
	}

	/// Output types only, if this selector declares outputs.
	pub fn output_types(&self) -> Option<Vec<ParamType>> {
		self.outputs.as_ref().map(|outs| outs.iter().map(|p| p.kind.clone()).collect())
	}

	/// Whether this selector is prefixed with a 4-byte method-ID when
	/// encoded: only named, callable functions are.
	pub fn has_method_id(&self) -> bool {
		self.function.is_some() && matches!(self.kind, SelectorKind::Function)
	}

	/// Indexed fields, in declaration order (meaningful for `Event` only).
	pub fn indexed_inputs(&self) -> Vec<&Param> {
		self.inputs.iter().filter(|p| p.indexed == Some(true)).collect()
	}

	/// Non-indexed fields, in declaration order.
	pub fn non_indexed_inputs(&self) -> Vec<&Param> {
		self.inputs.iter().filter(|p| p.indexed != Some(true)).collect()
	}
}
