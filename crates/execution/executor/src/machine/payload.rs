// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! RLP payloads of the built-in operations.

use tvm_types::Address;

#[derive(Debug, Clone, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct TransferContract {
    pub to_address: Address,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct FreezeBalanceContract {
    pub frozen_balance: u64,
    pub frozen_duration: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_is_a_flat_list() {
        let encoded = rlp::encode(&TransferContract {
            to_address: Address::from_low_u64_be(2),
            amount: 400,
        });
        let rlp = rlp::Rlp::new(&encoded);
        assert_eq!(rlp.item_count().unwrap(), 2);
        assert_eq!(rlp.val_at::<u64>(1).unwrap(), 400);

        let freeze: FreezeBalanceContract =
            rlp::decode(&rlp::encode(&FreezeBalanceContract {
                frozen_balance: 10,
                frozen_duration: 3,
            }))
            .unwrap();
        assert_eq!(freeze.frozen_duration, 3);
    }
}
