// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

extern crate ethereum_types;

pub use ethereum_types::{
    Address, Bloom, BloomInput, H128, H160, H256, H512, U128, U256, U512, U64,
};

pub mod address_util;
mod contract_address;

pub use contract_address::{cal_contract_address, CreateContractAddressType};

/// The byte length of an account address.
pub const ADDRESS_LENGTH: usize = 20;

/// Clamps a big integer into `u64`, saturating at `u64::MAX`.
pub fn u256_to_u64_saturated(value: &U256) -> u64 {
    if *value > U256::from(u64::MAX) {
        u64::MAX
    } else {
        value.low_u64()
    }
}
