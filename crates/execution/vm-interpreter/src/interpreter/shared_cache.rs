// Copyright 2015-2018 Parity Technologies (UK) Ltd.
// This file is part of Parity.

// Parity is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// Parity is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with Parity.  If not, see <http://www.gnu.org/licenses/>.

// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/
use crate::instructions::{self, Instruction};
use bit_set::BitSet;
use keccak_hash::KECCAK_EMPTY;
use parking_lot::Mutex;
use std::{collections::HashMap, sync::Arc};
use tvm_types::H256;

const DEFAULT_CACHE_ENTRIES: usize = 4096;

/// Global cache for EVM interpreter
pub struct SharedCache {
    jump_destinations: Mutex<HashMap<H256, Arc<BitSet>>>,
    max_entries: usize,
}

impl SharedCache {
    /// Create a jump destinations cache holding at most `max_entries`
    /// analyzed contracts.
    pub fn new(max_entries: usize) -> Self {
        SharedCache {
            jump_destinations: Mutex::new(HashMap::new()),
            max_entries,
        }
    }

    /// Get jump destinations bitmap for a contract.
    pub fn jump_destinations(
        &self, code_hash: &H256, code: &[u8],
    ) -> Arc<BitSet> {
        if *code_hash == KECCAK_EMPTY {
            return Arc::new(Self::find_jump_destinations(code));
        }

        if let Some(d) = self.jump_destinations.lock().get(code_hash) {
            return d.clone();
        }

        let d = Arc::new(Self::find_jump_destinations(code));
        let mut cache = self.jump_destinations.lock();
        if cache.len() >= self.max_entries {
            cache.clear();
        }
        cache.insert(*code_hash, d.clone());
        d
    }

    fn find_jump_destinations(code: &[u8]) -> BitSet {
        let mut jump_dests = BitSet::with_capacity(code.len());
        let mut position = 0;

        while position < code.len() {
            let instruction = Instruction::from_u8(code[position]);

            if let Some(instruction) = instruction {
                if instruction == instructions::JUMPDEST {
                    jump_dests.insert(position);
                } else if let Some(push_bytes) = instruction.push_bytes() {
                    position += push_bytes;
                }
            }
            position += 1;
        }

        jump_dests.shrink_to_fit();
        jump_dests
    }
}

impl Default for SharedCache {
    fn default() -> Self { SharedCache::new(DEFAULT_CACHE_ENTRIES) }
}

#[test]
fn test_find_jump_destinations() {
    use rustc_hex::FromHex;
    // given
    let code = "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff5b01600055".from_hex::<Vec<u8>>().unwrap();

    // when
    let valid_jump_destinations = SharedCache::find_jump_destinations(&code);

    // then
    assert!(valid_jump_destinations.contains(66));
    assert_eq!(valid_jump_destinations.len(), 1);
}

#[test]
fn test_cache_reuses_analysis() {
    let cache = SharedCache::new(1);
    let code = vec![0x5b, 0x00];
    let hash = keccak_hash::keccak(&code);
    let first = cache.jump_destinations(&hash, &code);
    let second = cache.jump_destinations(&hash, &code);
    assert!(Arc::ptr_eq(&first, &second));
    assert!(first.contains(0));
}
