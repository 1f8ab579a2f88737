// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use super::ParamType;

/// Renders a [`ParamType`] to its canonical signature text.
/// `uint`/`int` are always widened to their explicit bit count; a `Tuple`
/// (struct or plain) always renders as a parenthesized list with no names.
pub struct Writer;

impl Writer {
	/// Canonical rendering of a single type.
	pub fn write(param: &ParamType) -> String {
		match param {
			ParamType::Address => "address".to_owned(),
			ParamType::Bytes => "bytes".to_owned(),
			ParamType::FixedBytes(len) => format!("bytes{}", len),
			ParamType::Int(len) => format!("int{}", len),
			ParamType::Uint(len) => format!("uint{}", len),
			ParamType::Bool => "bool".to_owned(),
			ParamType::String => "string".to_owned(),
			ParamType::Function => "function".to_owned(),
			ParamType::Fixed(m, n) => format!("fixed{}x{}", m, n),
			ParamType::UFixed(m, n) => format!("ufixed{}x{}", m, n),
			ParamType::Array(inner) => format!("{}[]", Writer::write(inner)),
			ParamType::FixedArray(inner, len) => format!("{}[{}]", Writer::write(inner), len),
			ParamType::Tuple(fields) => {
				let inner = fields.iter().map(|f| Writer::write(&f.kind)).collect::<Vec<_>>().join(",");
				format!("({})", inner)
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::Writer;
	use crate::ParamType;

	#[test]
	fn write_leaves() {
		assert_eq!(Writer::write(&ParamType::Uint(256)), "uint256");
		assert_eq!(Writer::write(&ParamType::Int(8)), "int8");
		assert_eq!(Writer::write(&ParamType::FixedBytes(32)), "bytes32");
		assert_eq!(Writer::write(&ParamType::Function), "function");
		assert_eq!(Writer::write(&ParamType::Fixed(128, 18)), "fixed128x18");
	}

	#[test]
	fn write_composite() {
		use crate::Param;

		assert_eq!(Writer::write(&ParamType::Array(Box::new(ParamType::Bool))), "bool[]");
		assert_eq!(
			Writer::write(&ParamType::FixedArray(Box::new(ParamType::String), 2)),
			"string[2]"
		);
		assert_eq!(
			Writer::write(&ParamType::Tuple(vec![
				Param::new(ParamType::Uint(256)),
				Param::new(ParamType::Tuple(vec![Param::new(ParamType::Uint(256)), Param::new(ParamType::Uint(256))]))
			])),
			"(uint256,(uint256,uint256))"
		);
	}

	#[test]
	fn write_ignores_component_names() {
		use crate::Param;

		assert_eq!(
			Writer::write(&ParamType::Tuple(vec![Param::named("a", ParamType::Address), Param::named("b", ParamType::Uint(256))])),
			"(address,uint256)"
		);
	}
}
