// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use tvm_types::Address;

/// The recipients of the frames currently on the stack. Its length is the
/// explicit call depth checked before each frame is pushed.
#[derive(Debug, Default)]
pub struct CallStackInfo {
    call_stack_recipient_addresses: Vec<(Address, bool)>,
}

impl CallStackInfo {
    pub fn new() -> Self { CallStackInfo::default() }

    pub fn push(&mut self, address: Address, is_create: bool) {
        self.call_stack_recipient_addresses.push((address, is_create));
    }

    pub fn pop(&mut self) -> Option<(Address, bool)> {
        self.call_stack_recipient_addresses.pop()
    }

    pub fn last(&self) -> Option<&Address> {
        self.call_stack_recipient_addresses
            .last()
            .map(|(address, _is_create)| address)
    }

    /// Number of frames on the stack.
    pub fn depth(&self) -> usize { self.call_stack_recipient_addresses.len() }
}

#[cfg(test)]
mod tests {
    use super::CallStackInfo;
    use tvm_types::Address;

    fn get_test_address(n: u8) -> Address { Address::from([n; 20]) }

    #[test]
    fn test_callstack_info() {
        let mut call_stack = CallStackInfo::new();
        call_stack.push(get_test_address(1), false);
        call_stack.push(get_test_address(2), false);
        assert_eq!(call_stack.depth(), 2);
        assert_eq!(call_stack.pop(), Some((get_test_address(2), false)));

        call_stack.push(get_test_address(3), true);
        call_stack.push(get_test_address(4), false);
        assert_eq!(call_stack.last().unwrap().clone(), get_test_address(4));

        assert_eq!(call_stack.pop(), Some((get_test_address(4), false)));
        assert_eq!(call_stack.last().unwrap().clone(), get_test_address(3));
        assert_eq!(call_stack.pop(), Some((get_test_address(3), true)));
        assert_eq!(call_stack.last().unwrap().clone(), get_test_address(1));

        assert_eq!(call_stack.pop(), Some((get_test_address(1), false)));
        assert_eq!(call_stack.pop(), None);
        assert_eq!(call_stack.last(), None);
        assert_eq!(call_stack.depth(), 0);
    }
}
