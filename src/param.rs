// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A single function/event/struct field.

use crate::ParamType;

/// One field of a [`crate::FunctionSelector`]'s inputs/outputs, or of a
/// `Tuple`'s components.
///
/// One record is shared between function params and event params, unlike
/// crates that carry two parallel types (`Param`, `EventParam`): `indexed`
/// is simply `None` outside an event-input position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
	/// Field name. Absent for unnamed tuple components.
	pub name: Option<String>,
	/// Field type.
	pub kind: ParamType,
	/// `Some(true)`/`Some(false)` inside an event's input list; `None`
	/// everywhere else.
	pub indexed: Option<bool>,
	/// Raw `internalType` passthrough. A value starting with `"struct "`
	/// tags a `Tuple`-typed field as a named struct; the codec ignores
	/// this tag entirely — it is display metadata only.
	pub internal_type: Option<String>,
}

impl Param {
	/// A bare, unnamed field of the given type.
	pub fn new(kind: ParamType) -> Self {
		Param { name: None, kind, indexed: None, internal_type: None }
	}

	/// A named field of the given type.
	pub fn named(name: impl Into<String>, kind: ParamType) -> Self {
		Param { name: Some(name.into()), kind, indexed: None, internal_type: None }
	}

	/// The struct name carried via `internal_type`, if this field's
	/// `internalType` was of the form `"struct Name"` (or `"struct Name[]"`
	/// for arrays of structs).
	pub fn struct_name(&self) -> Option<&str> {
		let it = self.internal_type.as_deref()?;
		let rest = it.strip_prefix("struct ")?;
		Some(rest.split(['[', ' ']).next().unwrap_or(rest))
	}
}
