// Copyright 2020 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

pub mod energy {
    /// Currency units charged per energy unit when the chain does not set an
    /// energy fee.
    pub const DEFAULT_SUN_PER_ENERGY: u64 = 100;

    /// Frozen balance is converted into weight in units of this precision.
    pub const TRX_PRECISION: u64 = 1_000_000;

    /// Energy usage recovers linearly over this many slots (24 hours).
    pub const WINDOW_SIZE_SLOTS: u64 = 28_800;

    /// Fixed-point precision used when decaying the recorded usage.
    pub const USAGE_PRECISION: u64 = 1_000_000;

    pub const BLOCK_PRODUCED_INTERVAL_MS: u64 = 3_000;

    pub const DEFAULT_TOTAL_ENERGY_LIMIT: u64 = 50_000_000_000;

    /// Energy granted to a constant (view/pure) call.
    pub const ENERGY_LIMIT_IN_CONSTANT_TX: u64 = 3_000_000;
}

pub mod vm {
    pub const ONE_HUNDRED: i64 = 100;

    /// Upper bound of the byte length of a contract name.
    pub const CONTRACT_NAME_LENGTH: usize = 32;

    /// Token ids below or equal to this value are reserved.
    pub const MIN_TOKEN_ID: i64 = 1_000_000;

    pub const DEFAULT_MAX_FEE_LIMIT: i64 = 10_000_000_000;

    /// Maximum CPU time of one transaction in milliseconds.
    pub const DEFAULT_MAX_CPU_TIME_OF_ONE_TX: u64 = 50;

    pub const DEFAULT_MIN_TIME_RATIO: f64 = 0.0;

    pub const DEFAULT_MAX_TIME_RATIO: f64 = 5.0;

    pub const DEFAULT_MAX_CALL_DEPTH: usize = 64;

    /// Number of instructions between two samples of the deadline clock.
    pub const DEFAULT_DEADLINE_CHECK_INTERVAL: u64 = 64;

    /// Memory size in bytes a single frame may allocate.
    pub const MEMORY_LIMIT: usize = 3 * 1024 * 1024;

    /// Deployed code with this leading byte is rejected after london.
    pub const INVALID_CODE_PREFIX: u8 = 0xef;
}
