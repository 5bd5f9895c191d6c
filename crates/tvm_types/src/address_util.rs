// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::{Address, H256, U256};

pub trait AddressUtil: Sized {
    fn is_null_address(&self) -> bool;

    /// The address packed into the low 20 bytes of a 256-bit word, as it
    /// appears on the VM stack.
    fn to_word(&self) -> U256;

    fn from_word(word: &U256) -> Self;
}

impl AddressUtil for Address {
    #[inline]
    fn is_null_address(&self) -> bool { self.is_zero() }

    fn to_word(&self) -> U256 { U256::from_big_endian(&H256::from(*self)[..]) }

    fn from_word(word: &U256) -> Self {
        let mut bytes = [0u8; 32];
        word.to_big_endian(&mut bytes);
        Address::from(H256::from(bytes))
    }
}
