// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::{
    contract_result::ContractResult,
    log_entry::{build_bloom, LogEntry},
};
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use tvm_types::{Address, Bloom};

/// Information describing execution of a contract transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub contract_result: ContractResult,
    /// Energy charged for the execution, after the post-execution rules.
    pub energy_used: u64,
    /// Set for deployments only.
    pub contract_address: Option<Address>,
    /// The OR-wide combination of all logs' blooms for this transaction.
    pub log_bloom: Bloom,
    /// The logs stemming from this transaction.
    pub logs: Vec<LogEntry>,
}

impl Receipt {
    pub fn new(
        contract_result: ContractResult, energy_used: u64,
        contract_address: Option<Address>, logs: Vec<LogEntry>,
    ) -> Self {
        Self {
            contract_result,
            energy_used,
            contract_address,
            log_bloom: build_bloom(&logs),
            logs,
        }
    }
}

impl Encodable for Receipt {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(5);
        s.append(&self.contract_result);
        s.append(&self.energy_used);
        match &self.contract_address {
            Some(address) => s.append(address),
            None => s.append_empty_data(),
        };
        s.append(&self.log_bloom);
        s.append_list(&self.logs);
    }
}

impl Decodable for Receipt {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 5 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        let address_rlp = rlp.at(2)?;
        let contract_address = if address_rlp.is_empty() {
            None
        } else {
            Some(address_rlp.as_val()?)
        };

        Ok(Receipt {
            contract_result: rlp.val_at(0)?,
            energy_used: rlp.val_at(1)?,
            contract_address,
            log_bloom: rlp.val_at(3)?,
            logs: rlp.list_at(4)?,
        })
    }
}
