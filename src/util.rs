// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Shared low-level helpers for the encoder and decoder.

use ethereum_types::U256;

use crate::error::DecodeError;

/// Splits a buffer into 32-byte words. Errors if `data.len()` is not a
/// multiple of 32.
pub fn slice_data(data: &[u8]) -> Result<Vec<[u8; 32]>, DecodeError> {
	if data.len() % 32 != 0 {
		return Err(DecodeError::BufferTooShort {
			offset: data.len() - data.len() % 32,
			needed: 32,
			len: data.len(),
		});
	}

	let words = data.len() / 32;
	let mut result = Vec::with_capacity(words);
	for i in 0..words {
		let mut word = [0u8; 32];
		let offset = 32 * i;
		word.copy_from_slice(&data[offset..offset + 32]);
		result.push(word);
	}
	Ok(result)
}

/// Whether `value` — the full 256-bit word an `uintN` operates over — fits
/// in `bits` bits unsigned.
pub fn fits_uint(value: U256, bits: usize) -> bool {
	if bits >= 256 {
		return true;
	}
	value < (U256::one() << bits)
}

/// Whether `value` — a 256-bit two's complement word — is a valid
/// sign-extension of some `intN` value, i.e. round-tripping it through an
/// `N`-bit signed integer and back up to 256 bits reproduces `value`.
pub fn fits_int(value: U256, bits: usize) -> bool {
	if bits >= 256 {
		return true;
	}
	let sign_bit = U256::one() << 255;
	let negative = value & sign_bit != U256::zero();
	if negative {
		let min_negative = negate(U256::one() << (bits - 1));
		value >= min_negative
	} else {
		value < (U256::one() << (bits - 1))
	}
}

/// Two's complement negation within 256 bits: `!value + 1`.
pub fn negate(value: U256) -> U256 {
	(!value).overflowing_add(U256::one()).0
}
