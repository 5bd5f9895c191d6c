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
//! Evm factory.

use crate::interpreter::{Interpreter, SharedCache};
use std::sync::Arc;
use vm::{ActionParams, Exec, Spec};

/// Evm factory. Creates appropriate Evm.
#[derive(Clone)]
pub struct Factory {
    evm_cache: Arc<SharedCache>,
}

impl Factory {
    /// Create fresh instance of VM
    pub fn create(
        &self, params: ActionParams, spec: &Spec, depth: usize,
    ) -> Box<dyn Exec> {
        trace!(
            "new interpreter: address={:?} energy={} depth={}",
            params.address,
            params.energy,
            depth
        );
        Box::new(Interpreter::new(params, self.evm_cache.clone(), spec))
    }

    /// Create a factory whose jump destination cache holds at most
    /// `cache_size` analyzed contracts.
    pub fn new(cache_size: usize) -> Self {
        Factory {
            evm_cache: Arc::new(SharedCache::new(cache_size)),
        }
    }
}

impl Default for Factory {
    /// Returns native rust evm factory
    fn default() -> Factory {
        Factory {
            evm_cache: Arc::new(SharedCache::default()),
        }
    }
}

#[cfg(test)]
macro_rules! evm_test(
    ($name_test: ident: $name_int: ident) => {
        #[test]
        fn $name_int() {
            $name_test($crate::factory::Factory::new(1024 * 32));
        }
    }
);
