// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Translation of the logs of a successful execution into the triggers
//! published to the event subscription service.

use crate::state::State;
use primitives::{Bytes, LogEntry};
use serde_derive::Serialize;
use std::collections::BTreeMap;
use tvm_statedb::Result as DbResult;
use tvm_types::{Address, H256};

/// The context shared by every trigger of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerInfo {
    pub block_number: u64,
    /// Seconds since the epoch.
    pub block_timestamp: u64,
    pub transaction_id: H256,
    /// The owner of the transaction.
    pub origin_address: Address,
    /// The deployer of the emitting contract.
    pub creator_address: Address,
    pub contract_address: Address,
    pub caller_address: Address,
    pub log_index: usize,
}

/// A log matched against an event of the contract ABI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractEventTrigger {
    #[serde(flatten)]
    pub info: TriggerInfo,
    /// E.g. `Transfer(address,address,uint256)`.
    pub event_signature: String,
    /// Indexed inputs by name.
    pub topic_map: BTreeMap<String, H256>,
    pub data: Bytes,
}

/// A log with no matching event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractLogTrigger {
    #[serde(flatten)]
    pub info: TriggerInfo,
    pub topics: Vec<H256>,
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "triggerName")]
pub enum ContractTrigger {
    #[serde(rename = "contractEventTrigger")]
    Event(ContractEventTrigger),
    #[serde(rename = "contractLogTrigger")]
    Log(ContractLogTrigger),
}

impl ContractTrigger {
    pub fn info(&self) -> &TriggerInfo {
        match self {
            ContractTrigger::Event(trigger) => &trigger.info,
            ContractTrigger::Log(trigger) => &trigger.info,
        }
    }
}

/// Receives the triggers of committed executions.
pub trait TriggerSink {
    fn publish(&mut self, trigger: &ContractTrigger);
}

impl TriggerSink for Vec<ContractTrigger> {
    fn publish(&mut self, trigger: &ContractTrigger) {
        self.push(trigger.clone());
    }
}

/// Transaction-wide fields of the triggers; the per-log fields are filled
/// in by [`build_triggers`].
#[derive(Debug, Clone)]
pub struct TriggerContext {
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_id: H256,
    pub origin_address: Address,
    pub caller_address: Address,
}

pub fn build_triggers(
    logs: &[LogEntry], state: &State, context: &TriggerContext,
) -> DbResult<Vec<ContractTrigger>> {
    let mut triggers = Vec::with_capacity(logs.len());
    for (log_index, log) in logs.iter().enumerate() {
        let contract = state.contract(&log.address)?;
        let info = TriggerInfo {
            block_number: context.block_number,
            block_timestamp: context.block_timestamp,
            transaction_id: context.transaction_id,
            origin_address: context.origin_address,
            creator_address: contract
                .as_ref()
                .map_or_else(Address::zero, |c| c.origin_address),
            contract_address: log.address,
            caller_address: context.caller_address,
            log_index,
        };

        let event = match (&contract, log.topics.first()) {
            (Some(contract), Some(topic)) => contract.abi.event_by_topic(topic),
            _ => None,
        };

        let trigger = match event {
            Some(event) => {
                // Indexed inputs take the topics after the signature in
                // declaration order.
                let topic_map = event
                    .inputs
                    .iter()
                    .filter(|input| input.indexed)
                    .zip(log.topics.iter().skip(1))
                    .map(|(input, topic)| (input.name.clone(), *topic))
                    .collect();
                ContractTrigger::Event(ContractEventTrigger {
                    info,
                    event_signature: event.signature(),
                    topic_map,
                    data: log.data.clone(),
                })
            }
            None => ContractTrigger::Log(ContractLogTrigger {
                info,
                topics: log.topics.clone(),
                data: log.data.clone(),
            }),
        };
        triggers.push(trigger);
    }
    Ok(triggers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::get_state_for_test;
    use primitives::{Abi, AbiEntry, AbiParam, EntryType, SmartContract};

    fn transfer_event() -> AbiEntry {
        let param = |name: &str, kind: &str, indexed| AbiParam {
            indexed,
            name: name.into(),
            kind: kind.into(),
        };
        AbiEntry {
            name: "Transfer".into(),
            inputs: vec![
                param("from", "address", true),
                param("to", "address", true),
                param("value", "uint256", false),
            ],
            entry_type: EntryType::Event,
            ..Default::default()
        }
    }

    fn context() -> TriggerContext {
        TriggerContext {
            block_number: 7,
            block_timestamp: 21,
            transaction_id: H256::repeat_byte(9),
            origin_address: Address::from_low_u64_be(1),
            caller_address: Address::from_low_u64_be(1),
        }
    }

    #[test]
    fn test_event_and_log_triggers() {
        let (mut state, _) = get_state_for_test();
        let contract_address = Address::from_low_u64_be(0xc0);
        let creator = Address::from_low_u64_be(0xcc);
        state.create_contract(SmartContract {
            origin_address: creator,
            contract_address,
            abi: Abi::new(vec![transfer_event()]),
            ..Default::default()
        });

        let from = H256::from_low_u64_be(1);
        let to = H256::from_low_u64_be(2);
        let logs = vec![
            LogEntry {
                address: contract_address,
                topics: vec![transfer_event().signature_hash(), from, to],
                data: vec![0, 1],
            },
            LogEntry {
                address: contract_address,
                topics: vec![H256::repeat_byte(0x42)],
                data: vec![],
            },
        ];

        let triggers = build_triggers(&logs, &state, &context()).unwrap();
        assert_eq!(triggers.len(), 2);

        match &triggers[0] {
            ContractTrigger::Event(event) => {
                assert_eq!(
                    event.event_signature,
                    "Transfer(address,address,uint256)"
                );
                assert_eq!(event.topic_map.get("from"), Some(&from));
                assert_eq!(event.topic_map.get("to"), Some(&to));
                assert_eq!(event.topic_map.len(), 2);
                assert_eq!(event.info.creator_address, creator);
                assert_eq!(event.info.log_index, 0);
            }
            other => panic!("expected an event trigger, got {:?}", other),
        }
        match &triggers[1] {
            ContractTrigger::Log(log) => {
                assert_eq!(log.topics, vec![H256::repeat_byte(0x42)]);
                assert_eq!(log.info.log_index, 1);
            }
            other => panic!("expected a log trigger, got {:?}", other),
        }

        let json = serde_json::to_value(&triggers[1]).unwrap();
        assert_eq!(json["triggerName"], "contractLogTrigger");
        assert_eq!(json["blockNumber"], 7);
        assert_eq!(json["logIndex"], 1);
    }

    #[test]
    fn test_sink() {
        let mut sink: Vec<ContractTrigger> = Vec::new();
        let trigger = ContractTrigger::Log(ContractLogTrigger {
            info: TriggerInfo {
                block_number: 1,
                block_timestamp: 0,
                transaction_id: H256::zero(),
                origin_address: Address::zero(),
                creator_address: Address::zero(),
                contract_address: Address::zero(),
                caller_address: Address::zero(),
                log_index: 0,
            },
            topics: vec![],
            data: vec![],
        });
        sink.publish(&trigger);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].info().block_number, 1);
    }
}
