// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Keccak-256 hashing, pluggable once at process start and immutable
//! after.

use once_cell::sync::OnceCell;
use sha3::{Digest, Keccak256};

/// A byte-slice-to-32-byte hash function conforming to Keccak-256 (the
/// pre-NIST-standardization Ethereum variant, not SHA3-256).
pub trait Hasher: Send + Sync {
	/// Hashes `data`, returning the 32-byte digest.
	fn hash(&self, data: &[u8]) -> [u8; 32];
}

struct Sha3Keccak;

impl Hasher for Sha3Keccak {
	fn hash(&self, data: &[u8]) -> [u8; 32] {
		let mut hasher = Keccak256::new();
		hasher.update(data);
		hasher.finalize().into()
	}
}

static PROVIDER: OnceCell<Box<dyn Hasher>> = OnceCell::new();

/// Installs a non-default hash provider. Must be called before the first
/// call to [`keccak256`]; later calls are ignored — this is construction-time
/// configuration, not a runtime switch.
///
/// Returns `false` if a provider was already installed.
pub fn set_hasher(hasher: Box<dyn Hasher>) -> bool {
	PROVIDER.set(hasher).is_ok()
}

/// Hashes `data` with the configured (or default `sha3`-backed) provider.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
	PROVIDER.get_or_init(|| Box::new(Sha3Keccak)).hash(data)
}

#[cfg(test)]
mod tests {
	use super::keccak256;
	use hex_literal::hex;

	#[test]
	fn keccak_of_empty_string() {
		assert_eq!(
			keccak256(b""),
			hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
		);
	}

	#[test]
	fn keccak_of_transfer_signature() {
		assert_eq!(
			keccak256(b"Transfer(address,address,uint256)"),
			hex!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef")
		);
	}
}
