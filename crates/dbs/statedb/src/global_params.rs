// Copyright 2020 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::StorageKey;

/// A network-wide value stored next to the accounts.
pub trait GlobalParamKey {
    const STORAGE_KEY: &'static [u8];

    fn storage_key() -> StorageKey<'static> {
        StorageKey::GlobalParamKey(Self::STORAGE_KEY)
    }
}

/// Sum of the frozen-for-energy weight of all accounts.
pub struct TotalEnergyWeight;

impl GlobalParamKey for TotalEnergyWeight {
    const STORAGE_KEY: &'static [u8] = b"total_energy_weight";
}

/// Energy the whole network may consume within one recovery window.
pub struct TotalEnergyLimit;

impl GlobalParamKey for TotalEnergyLimit {
    const STORAGE_KEY: &'static [u8] = b"total_energy_limit";
}
