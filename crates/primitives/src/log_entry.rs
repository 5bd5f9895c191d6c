// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Log entry type definition.

use crate::Bytes;
use tvm_types::{Address, Bloom, BloomInput, H256};

/// A record of execution for a `LOG` operation.
#[derive(Default, Debug, Clone, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct LogEntry {
    /// The address of the contract executing at the point of the `LOG`
    /// operation.
    pub address: Address,
    /// The topics associated with the `LOG` operation.
    pub topics: Vec<H256>,
    /// The data associated with the `LOG` operation.
    pub data: Bytes,
}

impl LogEntry {
    /// Calculates the bloom of this log entry.
    pub fn bloom(&self) -> Bloom {
        self.topics.iter().fold(
            Bloom::from(BloomInput::Raw(self.address.as_bytes())),
            |mut b, t| {
                b.accrue(BloomInput::Raw(t.as_bytes()));
                b
            },
        )
    }
}

pub fn build_bloom(logs: &[LogEntry]) -> Bloom {
    logs.iter().fold(Bloom::default(), |mut b, l| {
        b.accrue_bloom(&l.bloom());
        b
    })
}

#[cfg(test)]
mod tests {
    use super::{build_bloom, LogEntry};
    use tvm_types::{Address, Bloom, H256};

    #[test]
    fn test_empty_log_bloom() {
        let bloom = "00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000008800000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000800000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000".parse::<Bloom>().unwrap();
        let address = "0f572e5295c57f15886f9b263e2f6d2d6c7b5ec6"
            .parse::<Address>()
            .unwrap();
        let log = LogEntry {
            address,
            topics: vec![],
            data: vec![],
        };
        assert_eq!(log.bloom(), bloom);
    }

    #[test]
    fn test_bloom_covers_every_log() {
        let first = LogEntry {
            address: Address::from([1u8; 20]),
            topics: vec![H256::repeat_byte(3)],
            data: vec![1, 2, 3],
        };
        let second = LogEntry {
            address: Address::from([2u8; 20]),
            ..Default::default()
        };
        let bloom = build_bloom(&[first.clone(), second.clone()]);
        assert!(bloom.contains_bloom(&first.bloom()));
        assert!(bloom.contains_bloom(&second.bloom()));
    }
}
