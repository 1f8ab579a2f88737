// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Encoding and decoding of Ethereum contract ABI calls, returns, and
//! event logs.
//!
//! ```
//! use ethabi::{decode, encode, parse, Value};
//! use ethereum_types::U256;
//!
//! let selector = parse("baz(uint32,bool)").unwrap();
//! let encoded = encode(&selector, &[Value::Uint(U256::from(69u32)), Value::Bool(true)]).unwrap();
//! let decoded = decode(&selector, &encoded).unwrap();
//! assert_eq!(decoded, vec![Value::Uint(U256::from(69u32)), Value::Bool(true)]);
//! ```

#![warn(missing_docs)]

mod canonical;
mod decoder;
mod encoder;
pub mod error;
mod event;
mod hash;
mod json;
mod lexer;
mod param;
pub mod param_type;
mod parser;
mod selector;
mod state_mutability;
mod util;
mod value;

pub use ethereum_types;

pub use crate::canonical::{canonical, display};
pub use crate::decoder::{decode, decode_raw, decode_raw_with_options, decode_with_options, DecodeOptions};
pub use crate::encoder::{encode, encode_raw, method_id};
pub use crate::error::{DecodeError, EncodeError, Error, EventError, ParseError, Result};
pub use crate::event::decode_event;
pub use crate::hash::{keccak256, set_hasher, Hasher};
pub use crate::json::{parse_abi_document, parse_abi_item};
pub use crate::param::Param;
pub use crate::param_type::{ParamType, Reader, Writer};
pub use crate::parser::parse;
pub use crate::selector::{FunctionSelector, SelectorKind};
pub use crate::state_mutability::StateMutability;
pub use crate::value::Value;

/// `HASH(canonical(selector))`'s first 32 bits — used as `topic0` for a
/// non-anonymous event's signature, the same digest [`method_id`] takes
/// its first 4 bytes from.
pub fn topic0(selector: &FunctionSelector) -> [u8; 32] {
	hash::keccak256(canonical::canonical(selector).as_bytes())
}
