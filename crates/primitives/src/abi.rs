// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Interface descriptor of a deployed contract. The descriptor is only
//! consulted to detect constant entry points and to name emitted events.

use crate::hash::keccak;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use tvm_types::H256;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Constructor,
    #[default]
    Function,
    Event,
    Fallback,
    Receive,
    Error,
}

impl EntryType {
    fn into_u8(&self) -> u8 {
        match self {
            EntryType::Constructor => 0,
            EntryType::Function => 1,
            EntryType::Event => 2,
            EntryType::Fallback => 3,
            EntryType::Receive => 4,
            EntryType::Error => 5,
        }
    }
}

impl Encodable for EntryType {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.append_internal(&self.into_u8());
    }
}

impl Decodable for EntryType {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        match rlp.as_val::<u8>()? {
            0 => Ok(EntryType::Constructor),
            1 => Ok(EntryType::Function),
            2 => Ok(EntryType::Event),
            3 => Ok(EntryType::Fallback),
            4 => Ok(EntryType::Receive),
            5 => Ok(EntryType::Error),
            _ => Err(DecoderError::Custom("Unrecognized abi entry type")),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    #[default]
    Nonpayable,
    Payable,
}

impl StateMutability {
    fn into_u8(&self) -> u8 {
        match self {
            StateMutability::Pure => 0,
            StateMutability::View => 1,
            StateMutability::Nonpayable => 2,
            StateMutability::Payable => 3,
        }
    }
}

impl Encodable for StateMutability {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.append_internal(&self.into_u8());
    }
}

impl Decodable for StateMutability {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        match rlp.as_val::<u8>()? {
            0 => Ok(StateMutability::Pure),
            1 => Ok(StateMutability::View),
            2 => Ok(StateMutability::Nonpayable),
            3 => Ok(StateMutability::Payable),
            _ => Err(DecoderError::Custom("Unrecognized state mutability")),
        }
    }
}

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    RlpEncodable,
    RlpDecodable,
)]
pub struct AbiParam {
    #[serde(default)]
    pub indexed: bool,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    RlpEncodable,
    RlpDecodable,
)]
#[serde(rename_all = "camelCase")]
pub struct AbiEntry {
    #[serde(default)]
    pub anonymous: bool,
    #[serde(default)]
    pub constant: bool,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
    #[serde(default)]
    pub outputs: Vec<AbiParam>,
    #[serde(rename = "type", default)]
    pub entry_type: EntryType,
    #[serde(default)]
    pub payable: bool,
    #[serde(default)]
    pub state_mutability: StateMutability,
}

impl AbiEntry {
    /// The canonical signature, e.g. `transfer(address,uint256)`.
    pub fn signature(&self) -> String {
        let types: Vec<&str> =
            self.inputs.iter().map(|p| p.kind.as_str()).collect();
        format!("{}({})", self.name, types.join(","))
    }

    pub fn signature_hash(&self) -> H256 { keccak(self.signature().as_bytes()) }

    pub fn selector(&self) -> [u8; 4] {
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&self.signature_hash()[..4]);
        selector
    }

    pub fn is_constant(&self) -> bool {
        self.constant
            || matches!(
                self.state_mutability,
                StateMutability::View | StateMutability::Pure
            )
    }
}

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    RlpEncodable,
    RlpDecodable,
)]
pub struct Abi {
    pub entries: Vec<AbiEntry>,
}

impl Abi {
    pub fn new(entries: Vec<AbiEntry>) -> Self { Abi { entries } }

    /// Whether the function selected by `data` is marked view or pure. Call
    /// data shorter than a selector never selects a constant function.
    pub fn is_constant_call(&self, data: &[u8]) -> bool {
        if data.len() < 4 {
            return false;
        }
        self.entries
            .iter()
            .filter(|entry| entry.entry_type == EntryType::Function)
            .find(|entry| entry.selector()[..] == data[..4])
            .map_or(false, AbiEntry::is_constant)
    }

    /// Finds the non-anonymous event whose signature hash equals `topic`.
    pub fn event_by_topic(&self, topic: &H256) -> Option<&AbiEntry> {
        self.entries.iter().find(|entry| {
            entry.entry_type == EntryType::Event
                && !entry.anonymous
                && entry.signature_hash() == *topic
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hex::FromHex;

    fn function(
        name: &str, kind: &str, mutability: StateMutability,
    ) -> AbiEntry {
        AbiEntry {
            name: name.into(),
            inputs: vec![AbiParam {
                indexed: false,
                name: "a".into(),
                kind: kind.into(),
            }],
            state_mutability: mutability,
            ..Default::default()
        }
    }

    #[test]
    fn test_selector() {
        let entry = AbiEntry {
            name: "transfer".into(),
            inputs: vec![
                AbiParam {
                    indexed: false,
                    name: "to".into(),
                    kind: "address".into(),
                },
                AbiParam {
                    indexed: false,
                    name: "value".into(),
                    kind: "uint256".into(),
                },
            ],
            ..Default::default()
        };
        assert_eq!(entry.signature(), "transfer(address,uint256)");
        assert_eq!(entry.selector(), [0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn test_constant_detection() {
        let getter = function("get", "uint256", StateMutability::View);
        let setter = function("set", "uint256", StateMutability::Nonpayable);
        let abi = Abi::new(vec![getter.clone(), setter.clone()]);

        let mut data = getter.selector().to_vec();
        data.extend_from_slice(&[0u8; 32]);
        assert!(abi.is_constant_call(&data));
        // Stable against repeated queries.
        assert!(abi.is_constant_call(&data));

        assert!(!abi.is_constant_call(&setter.selector()));
        assert!(!abi.is_constant_call(&[0x01, 0x02]));
        assert!(!abi.is_constant_call(&"deadbeef".from_hex::<Vec<u8>>().unwrap()));

        let legacy = AbiEntry {
            constant: true,
            ..function("legacy", "bool", StateMutability::Nonpayable)
        };
        assert!(
            Abi::new(vec![legacy.clone()]).is_constant_call(&legacy.selector())
        );
    }

    #[test]
    fn test_event_lookup_skips_anonymous() {
        let event = AbiEntry {
            name: "Stored".into(),
            entry_type: EntryType::Event,
            inputs: vec![AbiParam {
                indexed: true,
                name: "value".into(),
                kind: "uint256".into(),
            }],
            ..Default::default()
        };
        let topic = event.signature_hash();
        let abi = Abi::new(vec![event.clone()]);
        assert_eq!(abi.event_by_topic(&topic), Some(&event));

        let anonymous = Abi::new(vec![AbiEntry {
            anonymous: true,
            ..event
        }]);
        assert_eq!(anonymous.event_by_topic(&topic), None);
    }

    #[test]
    fn test_json_descriptor() {
        let json = r#"[{"name":"get","type":"function","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"uint256"}]}]"#;
        let entries: Vec<AbiEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_constant());
        assert_eq!(entries[0].signature(), "get()");

        let abi = Abi::new(entries);
        let decoded: Abi = rlp::decode(&rlp::encode(&abi)).unwrap();
        assert_eq!(decoded, abi);
    }
}
