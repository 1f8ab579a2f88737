// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Splits a log's topics/data back into named values.
//!
//! Indexed fields live one-per-topic; non-indexed fields are concatenated
//! and ABI-encoded in `data` exactly like a function's return values. A
//! dynamic (or otherwise wider-than-one-word) indexed field's topic is not
//! its value but `HASH` of its encoding, so it decodes to an opaque
//! 32-byte digest rather than the original value.

use crate::error::{DecodeError, EventError, Result};
use crate::{canonical::canonical, hash::keccak256, FunctionSelector, ParamType, Value};

/// Recovers `(name, value)` pairs for every input of `selector`, in
/// declaration order, from a log's `topics` and `data`.
///
/// When `check_signature` is set, `topics[0]` must equal
/// `HASH(canonical(selector))` and is consumed as the signature slot
/// rather than an indexed value — the usual case for a named Solidity
/// event, which always emits its own signature as topic 0 unless declared
/// `anonymous`.
pub fn decode_event(
	selector: &FunctionSelector,
	topics: &[[u8; 32]],
	data: &[u8],
	check_signature: bool,
) -> Result<Vec<(Option<String>, Value)>> {
	let indexed_inputs = selector.indexed_inputs();
	let non_indexed_inputs = selector.non_indexed_inputs();

	let expected = indexed_inputs.len() + check_signature as usize;
	if topics.len() != expected {
		return Err(EventError::TopicCountMismatch { got: topics.len(), expected }.into());
	}

	let mut topic_iter = topics.iter();
	if check_signature {
		let topic0 = topic_iter.next().expect("checked topics.len() == expected above");
		let expected_topic0 = keccak256(canonical(selector).as_bytes());
		if *topic0 != expected_topic0 {
			return Err(EventError::TopicSignatureMismatch {
				expected_hex: hex::encode(expected_topic0),
				got_hex: hex::encode(topic0),
			}
			.into());
		}
	}

	let mut indexed_values = Vec::with_capacity(indexed_inputs.len());
	for (param, topic) in indexed_inputs.iter().zip(topic_iter) {
		indexed_values.push(decode_indexed(&param.kind, topic)?);
	}

	let non_indexed_types: Vec<ParamType> = non_indexed_inputs.iter().map(|p| p.kind.clone()).collect();
	let non_indexed_values = crate::decoder::decode_raw(&non_indexed_types, data)?;

	let mut indexed_iter = indexed_values.into_iter();
	let mut non_indexed_iter = non_indexed_values.into_iter();
	let mut result = Vec::with_capacity(selector.inputs.len());
	for param in &selector.inputs {
		let value = if param.indexed == Some(true) {
			indexed_iter.next().expect("one indexed value per indexed param")
		} else {
			non_indexed_iter.next().expect("one non-indexed value per non-indexed param")
		};
		result.push((param.name.clone(), value));
	}

	Ok(result)
}

fn decode_indexed(ty: &ParamType, topic: &[u8; 32]) -> std::result::Result<Value, DecodeError> {
	if ty.is_dynamic() || ty.head_size() != 32 {
		return Ok(Value::FixedBytes(topic.to_vec()));
	}
	let mut values = crate::decoder::decode_raw(std::slice::from_ref(ty), topic)?;
	Ok(values.pop().expect("a single type decodes to a single value"))
}

#[cfg(test)]
mod tests {
	use ethereum_types::{Address, U256};

	use super::*;
	use crate::{Param, SelectorKind};

	fn transfer_event() -> FunctionSelector {
		FunctionSelector {
			function: Some("Transfer".to_owned()),
			kind: SelectorKind::Event,
			mutability: None,
			inputs: vec![
				Param { name: Some("from".into()), kind: ParamType::Address, indexed: Some(true), internal_type: None },
				Param { name: Some("to".into()), kind: ParamType::Address, indexed: Some(true), internal_type: None },
				Param {
					name: Some("value".into()),
					kind: ParamType::Uint(256),
					indexed: Some(false),
					internal_type: None,
				},
			],
			outputs: None,
		}
	}

	fn address_topic(addr: Address) -> [u8; 32] {
		let mut word = [0u8; 32];
		word[12..].copy_from_slice(addr.as_bytes());
		word
	}

	#[test]
	fn decodes_with_signature_check() {
		let selector = transfer_event();
		let from = Address::repeat_byte(0x11);
		let to = Address::repeat_byte(0x22);
		let topic0 = keccak256(canonical(&selector).as_bytes());
		let topics = vec![topic0, address_topic(from), address_topic(to)];
		let data = crate::encoder::encode_raw(&[ParamType::Uint(256)], &[Value::Uint(U256::from(5u32))]).unwrap();

		let decoded = decode_event(&selector, &topics, &data, true).unwrap();
		assert_eq!(decoded[0], (Some("from".to_owned()), Value::Address(from)));
		assert_eq!(decoded[1], (Some("to".to_owned()), Value::Address(to)));
		assert_eq!(decoded[2], (Some("value".to_owned()), Value::Uint(U256::from(5u32))));
	}

	#[test]
	fn decodes_without_signature_check() {
		let selector = transfer_event();
		let from = Address::repeat_byte(0x11);
		let to = Address::repeat_byte(0x22);
		let topics = vec![address_topic(from), address_topic(to)];
		let data = crate::encoder::encode_raw(&[ParamType::Uint(256)], &[Value::Uint(U256::from(5u32))]).unwrap();

		let decoded = decode_event(&selector, &topics, &data, false).unwrap();
		assert_eq!(decoded.len(), 3);
	}

	#[test]
	fn rejects_topic_count_mismatch() {
		let selector = transfer_event();
		let err = decode_event(&selector, &[[0u8; 32]], &[], true).unwrap_err();
		assert!(matches!(err, crate::Error::Event(EventError::TopicCountMismatch { .. })));
	}

	#[test]
	fn rejects_corrupted_topic0() {
		let selector = transfer_event();
		let from = Address::repeat_byte(0x11);
		let to = Address::repeat_byte(0x22);
		let topics = vec![[0xffu8; 32], address_topic(from), address_topic(to)];
		let data = crate::encoder::encode_raw(&[ParamType::Uint(256)], &[Value::Uint(U256::from(5u32))]).unwrap();

		let err = decode_event(&selector, &topics, &data, true).unwrap_err();
		assert!(matches!(err, crate::Error::Event(EventError::TopicSignatureMismatch { .. })));
	}

	#[test]
	fn dynamic_indexed_field_decodes_to_opaque_hash() {
		let selector = FunctionSelector {
			function: Some("Logged".to_owned()),
			kind: SelectorKind::Event,
			mutability: None,
			inputs: vec![Param {
				name: Some("message".into()),
				kind: ParamType::String,
				indexed: Some(true),
				internal_type: None,
			}],
			outputs: None,
		};
		let topic = keccak256(b"hello");
		let decoded = decode_event(&selector, &[topic], &[], false).unwrap();
		assert_eq!(decoded[0], (Some("message".to_owned()), Value::FixedBytes(topic.to_vec())));
	}
}
