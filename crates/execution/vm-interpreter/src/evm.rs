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
//! Evm interface.

use vm::{Context, GasLeft, ReturnData, Result};

/// Finalization result. Energy Left: either it is a known value, or it needs
/// to be computed by processing a return instruction.
#[derive(Debug)]
pub struct FinalizationResult {
    /// Final amount of energy left.
    pub energy_left: u64,
    /// Apply execution state changes or revert them.
    pub apply_state: bool,
    /// Return data buffer.
    pub return_data: ReturnData,
}

/// Types that can be "finalized" using an EVM.
///
/// In practice, this is just used to define an inherent impl on
/// `Result<GasLeft>`.
pub trait Finalize {
    /// Consume the externalities, call return if necessary, and produce
    /// call result.
    fn finalize<C: Context>(self, c: C) -> Result<FinalizationResult>;
}

impl Finalize for Result<GasLeft> {
    fn finalize<C: Context>(self, c: C) -> Result<FinalizationResult> {
        match self {
            Ok(GasLeft::Known(energy_left)) => Ok(FinalizationResult {
                energy_left,
                apply_state: true,
                return_data: ReturnData::empty(),
            }),
            Ok(GasLeft::NeedsReturn {
                energy_left,
                data,
                apply_state,
            }) => c.ret(energy_left, &data, apply_state).map(|energy_left| {
                FinalizationResult {
                    energy_left,
                    apply_state,
                    return_data: data,
                }
            }),
            Err(err) => Err(err),
        }
    }
}
