// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use serde::{Deserialize, Serialize};

/// Whether a function modifies or reads blockchain state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateMutability {
	/// Specified not to read blockchain state.
	#[serde(rename = "pure")]
	Pure,
	/// Specified to not modify blockchain state.
	#[serde(rename = "view")]
	View,
	/// Does not accept Ether — the default.
	#[serde(rename = "nonpayable")]
	NonPayable,
	/// Accepts Ether.
	#[serde(rename = "payable")]
	Payable,
}

impl Default for StateMutability {
	fn default() -> Self {
		Self::NonPayable
	}
}
