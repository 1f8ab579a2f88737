// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Loads [`FunctionSelector`]s out of a parsed JSON-ABI document.
//!
//! Takes a generic [`serde_json::Value`] tree rather than a fixed
//! `#[derive(Deserialize)]` shape, since JSON-ABI items vary item-to-item
//! (a `constructor` carries no `name`, an `event` carries no
//! `stateMutability`, etc.) and unrecognized item kinds should be skipped
//! rather than fail the whole document.

use serde_json::Value;

use crate::{FunctionSelector, Param, ParamType, ParseError, Reader, SelectorKind, StateMutability};

/// Parses every recognized item in a JSON-ABI document (a top-level JSON
/// array). Items with an unrecognized `type` are silently dropped.
pub fn parse_abi_document(json: &Value) -> Result<Vec<FunctionSelector>, ParseError> {
	let items = json.as_array().ok_or_else(|| ParseError("ABI document must be a JSON array".to_owned()))?;

	let mut selectors = Vec::with_capacity(items.len());
	for item in items {
		if let Some(selector) = parse_abi_item(item)? {
			selectors.push(selector);
		}
	}
	Ok(selectors)
}

/// Parses a single JSON-ABI item object. Returns `Ok(None)` for a
/// recognized-but-irrelevant `type` and an error only for malformed input.
pub fn parse_abi_item(item: &Value) -> Result<Option<FunctionSelector>, ParseError> {
	let type_str = item.get("type").and_then(Value::as_str).unwrap_or("function");

	let kind = match type_str {
		"function" => SelectorKind::Function,
		"constructor" => SelectorKind::Constructor,
		"fallback" => SelectorKind::Fallback,
		"receive" => SelectorKind::Receive,
		"event" => SelectorKind::Event,
		"error" => SelectorKind::Error,
		_ => return Ok(None),
	};

	let name = item.get("name").and_then(Value::as_str).map(str::to_owned);
	let is_event = matches!(kind, SelectorKind::Event);

	let inputs = parse_params(item.get("inputs"), is_event)?;
	let outputs = match kind {
		SelectorKind::Function => Some(parse_params(item.get("outputs"), false)?),
		_ => None,
	};

	let mutability = match item.get("stateMutability").and_then(Value::as_str) {
		Some("pure") => Some(StateMutability::Pure),
		Some("view") => Some(StateMutability::View),
		Some("nonpayable") => Some(StateMutability::NonPayable),
		Some("payable") => Some(StateMutability::Payable),
		Some(other) => return Err(ParseError(format!("unrecognized stateMutability `{}`", other))),
		None => None,
	};

	Ok(Some(FunctionSelector { function: name, kind, mutability, inputs, outputs }))
}

fn parse_params(value: Option<&Value>, indexed_context: bool) -> Result<Vec<Param>, ParseError> {
	let items = match value {
		Some(Value::Array(items)) => items,
		Some(_) => return Err(ParseError("expected a JSON array of parameters".to_owned())),
		None => return Ok(Vec::new()),
	};
	items.iter().map(|v| parse_param(v, indexed_context)).collect()
}

fn parse_param(value: &Value, indexed_context: bool) -> Result<Param, ParseError> {
	let name = value.get("name").and_then(Value::as_str).filter(|s| !s.is_empty()).map(str::to_owned);
	let internal_type = value.get("internalType").and_then(Value::as_str).map(str::to_owned);
	let indexed = indexed_context.then(|| value.get("indexed").and_then(Value::as_bool).unwrap_or(false));

	let type_str = value.get("type").and_then(Value::as_str).ok_or_else(|| ParseError("parameter missing `type`".to_owned()))?;

	let mut kind = parse_type(type_str, value.get("components"))?;
	if internal_type.as_deref().is_some_and(|s| s.starts_with("struct ")) {
		synthesize_struct_component_names(&mut kind);
	}

	Ok(Param { name, kind, indexed, internal_type })
}

/// Fills in `"var<index>"` for any unnamed field of a struct-tagged tuple,
/// per the JSON-ABI convention that a struct's components always have names
/// but some toolchains omit them. Recurses through array wrappers to reach
/// the tuple a `tuple[]`/`tuple[k]` struct type describes.
fn synthesize_struct_component_names(kind: &mut ParamType) {
	match kind {
		ParamType::Tuple(fields) => {
			for (i, field) in fields.iter_mut().enumerate() {
				if field.name.is_none() {
					field.name = Some(format!("var{}", i));
				}
			}
		}
		ParamType::Array(inner) | ParamType::FixedArray(inner, _) => synthesize_struct_component_names(inner),
		_ => {}
	}
}

/// Parses a `Component.type` string, recursing outside-in through any
/// array suffixes until it bottoms out at either a leaf type (delegated to
/// [`Reader`]) or `"tuple"`, in which case `components` supplies the
/// tuple's own fields.
fn parse_type(type_str: &str, components: Option<&Value>) -> Result<ParamType, ParseError> {
	if let Some(stripped) = type_str.strip_suffix(']') {
		let open =
			stripped.rfind('[').ok_or_else(|| ParseError(format!("unmatched `]` in type `{}`", type_str)))?;
		let inner = parse_type(&stripped[..open], components)?;
		let size_str = &stripped[open + 1..];
		return Ok(if size_str.is_empty() {
			ParamType::Array(Box::new(inner))
		} else {
			let n = size_str
				.parse::<usize>()
				.map_err(|_| ParseError(format!("invalid array size in type `{}`", type_str)))?;
			ParamType::FixedArray(Box::new(inner), n)
		});
	}

	if type_str == "tuple" {
		let comps = components
			.and_then(Value::as_array)
			.ok_or_else(|| ParseError(format!("tuple type `{}` missing `components`", type_str)))?;
		let fields = comps.iter().map(|c| parse_param(c, false)).collect::<Result<Vec<_>, _>>()?;
		return Ok(ParamType::Tuple(fields));
	}

	Reader::read(type_str)
}
