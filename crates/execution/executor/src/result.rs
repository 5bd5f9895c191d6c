// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::{stack::CallFrameArena, trigger::ContractTrigger};
use primitives::{Bytes, ContractResult, LogEntry, Receipt};
use tvm_types::Address;

/// The outcome of one transaction, filled by the runtime once the engine
/// returns.
#[derive(Debug, Default)]
pub struct ProgramResult {
    pub contract_result: ContractResult,
    /// Energy granted to the execution.
    pub energy_limit: u64,
    /// Energy charged. Equals `energy_limit` after an exception.
    pub energy_used: u64,
    pub return_data: Bytes,
    pub logs: Vec<LogEntry>,
    /// Contracts that executed `SELFDESTRUCT`.
    pub suicides: Vec<Address>,
    /// Recorded for reporting; never credited.
    pub sstore_refund: u64,
    pub exception: Option<vm::Error>,
    /// The execution halted with `REVERT`.
    pub revert: bool,
    pub runtime_error: Option<String>,
    /// The deployed contract, for creations.
    pub contract_address: Option<Address>,
    pub internal_transactions: CallFrameArena,
    pub triggers: Vec<ContractTrigger>,
}

impl ProgramResult {
    pub fn new(energy_limit: u64, contract_address: Option<Address>) -> Self {
        ProgramResult {
            energy_limit,
            contract_address,
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.exception.is_none() && !self.revert && self.runtime_error.is_none()
    }

    pub fn spend_all_energy(&mut self) { self.energy_used = self.energy_limit; }

    pub fn reject_internal_transactions(&mut self) {
        self.internal_transactions.reject_all();
    }

    /// Drops the effects a failed execution would have published.
    pub fn discard_effects(&mut self) {
        self.logs.clear();
        self.suicides.clear();
        self.sstore_refund = 0;
        self.triggers.clear();
    }

    pub fn receipt(&self) -> Receipt {
        Receipt::new(
            self.contract_result,
            self.energy_used,
            self.contract_address,
            self.logs.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::ProgramResult;
    use crate::stack::{InternalTransaction, InternalTxNote};
    use primitives::{ContractResult, LogEntry};
    use tvm_types::{Address, U256};

    #[test]
    fn test_failure_bookkeeping() {
        let mut result = ProgramResult::new(1_000, None);
        result.energy_used = 10;
        result.logs.push(LogEntry {
            address: Address::zero(),
            topics: vec![],
            data: vec![],
        });
        let root = result.internal_transactions.add(
            None,
            InternalTransaction::new(
                InternalTxNote::Call,
                Address::zero(),
                Address::zero(),
                U256::zero(),
                None,
            ),
        );
        assert!(result.is_success());

        result.exception = Some(vm::Error::InvalidCode);
        result.contract_result = ContractResult::InvalidCode;
        result.spend_all_energy();
        result.discard_effects();
        result.reject_internal_transactions();

        assert!(!result.is_success());
        assert_eq!(result.energy_used, 1_000);
        assert!(result.internal_transactions.get(root).unwrap().rejected);

        let receipt = result.receipt();
        assert_eq!(receipt.contract_result, ContractResult::InvalidCode);
        assert_eq!(receipt.energy_used, 1_000);
        assert!(receipt.logs.is_empty());
    }
}
