// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

/// The type of the call-like instruction.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CallType {
    /// Not a CALL, the frame creates a contract.
    None,
    /// CALL.
    Call,
    /// DELEGATECALL.
    DelegateCall,
    /// STATICCALL.
    StaticCall,
}

impl CallType {
    pub fn is_create(&self) -> bool { *self == CallType::None }
}
