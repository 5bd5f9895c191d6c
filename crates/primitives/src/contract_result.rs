// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use strum_macros::{Display, EnumIter, EnumString};

/// The recorded verdict of a contract execution. The numeric codes are part
/// of the block format and must never be reassigned.
#[repr(u8)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractResult {
    #[default]
    Default = 0,
    Success = 1,
    Revert = 2,
    BadJumpDestination = 3,
    OutOfMemory = 4,
    PrecompiledContract = 5,
    StackTooSmall = 6,
    StackTooLarge = 7,
    IllegalOperation = 8,
    StackOverflow = 9,
    OutOfEnergy = 10,
    OutOfTime = 11,
    /// The call-depth counter reached its limit.
    #[strum(serialize = "JVM_STACK_OVER_FLOW")]
    CallStackExhausted = 12,
    Unknown = 13,
    TransferFailed = 14,
    InvalidCode = 15,
}

impl ContractResult {
    pub fn code(&self) -> u8 { *self as u8 }

    pub fn from_code(code: u8) -> Option<Self> {
        use ContractResult::*;
        Some(match code {
            0 => Default,
            1 => Success,
            2 => Revert,
            3 => BadJumpDestination,
            4 => OutOfMemory,
            5 => PrecompiledContract,
            6 => StackTooSmall,
            7 => StackTooLarge,
            8 => IllegalOperation,
            9 => StackOverflow,
            10 => OutOfEnergy,
            11 => OutOfTime,
            12 => CallStackExhausted,
            13 => Unknown,
            14 => TransferFailed,
            15 => InvalidCode,
            _ => return None,
        })
    }

    pub fn is_success(&self) -> bool { *self == ContractResult::Success }
}

impl Encodable for ContractResult {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.append_internal(&self.code());
    }
}

impl Decodable for ContractResult {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        ContractResult::from_code(rlp.as_val::<u8>()?)
            .ok_or(DecoderError::Custom("Unrecognized contract result"))
    }
}
