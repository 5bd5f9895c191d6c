// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::{abi::Abi, Bytes};
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use tvm_types::Address;

/// A deployed contract record. Signed quantities keep the sign they were
/// submitted with so that range checks can reject negative values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SmartContract {
    /// The deploying account.
    pub origin_address: Address,
    pub contract_address: Address,
    pub abi: Abi,
    pub bytecode: Bytes,
    pub call_value: i64,
    /// Share (0-100) of the energy cost borne by the caller.
    pub consume_user_resource_percent: i64,
    pub name: String,
    /// Cap on the energy the origin account subsidizes per call.
    pub origin_energy_limit: i64,
}

impl Encodable for SmartContract {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(8)
            .append(&self.origin_address)
            .append(&self.contract_address)
            .append(&self.abi)
            .append(&self.bytecode)
            .append(&(self.call_value as u64))
            .append(&(self.consume_user_resource_percent as u64))
            .append(&self.name)
            .append(&(self.origin_energy_limit as u64));
    }
}

impl Decodable for SmartContract {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 8 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        Ok(SmartContract {
            origin_address: rlp.val_at(0)?,
            contract_address: rlp.val_at(1)?,
            abi: rlp.val_at(2)?,
            bytecode: rlp.val_at(3)?,
            call_value: rlp.val_at::<u64>(4)? as i64,
            consume_user_resource_percent: rlp.val_at::<u64>(5)? as i64,
            name: rlp.val_at(6)?,
            origin_energy_limit: rlp.val_at::<u64>(7)? as i64,
        })
    }
}
