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
use std::fmt;

use crate::instructions::Instruction;
use vm::{Error, Result};

/// Stack trait with VM-friendly API
pub trait Stack<T> {
    /// Returns `Stack[len(Stack) - no_from_top]`
    fn peek(&self, no_from_top: usize) -> &T;
    /// Swaps Stack[len(Stack)] and Stack[len(Stack) - no_from_top]
    fn swap_with_top(&mut self, no_from_top: usize);
    /// Returns true if Stack has at least `no_of_elems` elements
    fn has(&self, no_of_elems: usize) -> bool;
    /// Get element from top and remove it from Stack. Panics if stack is
    /// empty.
    fn pop_back(&mut self) -> T;
    /// Get (up to `instructions::MAX_NO_OF_TOPICS`) elements from top and
    /// remove them from Stack. Panics if stack is empty.
    fn pop_n(&mut self, no_of_elems: usize) -> &[T];
    /// Add element on top of the Stack
    fn push(&mut self, elem: T);
    /// Get number of elements on Stack
    fn size(&self) -> usize;
    /// Returns all data on stack.
    fn peek_top(&self, no_of_elems: usize) -> &[T];
}

pub struct VecStack<S> {
    stack: Vec<S>,
    logs: [S; MAX_NO_OF_TOPICS],
}

/// LOG4 pops at most four topics at once.
pub const MAX_NO_OF_TOPICS: usize = 4;

impl<S: Copy + Default> VecStack<S> {
    pub fn with_capacity(capacity: usize) -> Self {
        VecStack {
            stack: Vec::with_capacity(capacity),
            logs: [S::default(); MAX_NO_OF_TOPICS],
        }
    }
}

impl<S: fmt::Display> fmt::Display for VecStack<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.stack.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}

impl<S: fmt::Display + Copy> Stack<S> for VecStack<S> {
    fn peek(&self, no_from_top: usize) -> &S {
        &self.stack[self.stack.len() - no_from_top - 1]
    }

    fn swap_with_top(&mut self, no_from_top: usize) {
        let len = self.stack.len();
        self.stack.swap(len - no_from_top - 1, len - 1);
    }

    fn has(&self, no_of_elems: usize) -> bool {
        self.stack.len() >= no_of_elems
    }

    fn pop_back(&mut self) -> S {
        self.stack.pop().expect(
            "instruction validation prevents from popping too many items; \
             qed",
        )
    }

    fn pop_n(&mut self, no_of_elems: usize) -> &[S] {
        assert!(no_of_elems <= MAX_NO_OF_TOPICS);

        for i in 0..no_of_elems {
            self.logs[i] = self.pop_back();
        }
        &self.logs[0..no_of_elems]
    }

    fn push(&mut self, elem: S) { self.stack.push(elem); }

    fn size(&self) -> usize { self.stack.len() }

    fn peek_top(&self, no_from_top: usize) -> &[S] {
        assert!(
            self.stack.len() >= no_from_top,
            "peek_top asked for more items than exist."
        );
        &self.stack[self.stack.len() - no_from_top..self.stack.len()]
    }
}

/// Checks the stack has enough items for `instruction` and room for its
/// results.
pub fn verify_instruction<S: Stack<T>, T>(
    stack: &S, instruction: Instruction, stack_limit: usize,
) -> Result<()> {
    let info = instruction.info();
    if !stack.has(info.args) {
        Err(Error::StackUnderflow {
            instruction: info.name,
            wanted: info.args,
            on_stack: stack.size(),
        })
    } else if stack.size() - info.args + info.ret > stack_limit {
        Err(Error::OutOfStack {
            instruction: info.name,
            wanted: info.ret - info.args,
            limit: stack_limit,
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::{ADD, DUP1, POP};
    use tvm_types::U256;

    #[test]
    fn test_push_pop_swap() {
        let mut stack = VecStack::<U256>::with_capacity(4);
        stack.push(1.into());
        stack.push(2.into());
        stack.push(3.into());
        assert_eq!(*stack.peek(0), 3.into());
        stack.swap_with_top(2);
        assert_eq!(*stack.peek(0), 1.into());
        assert_eq!(*stack.peek(2), 3.into());
        assert_eq!(stack.pop_n(2), &[U256::from(1), U256::from(2)]);
        assert_eq!(stack.size(), 1);
    }

    #[test]
    fn test_verify_instruction() {
        let mut stack = VecStack::<U256>::with_capacity(2);
        assert!(matches!(
            verify_instruction(&stack, POP, 2),
            Err(Error::StackUnderflow { wanted: 1, on_stack: 0, .. })
        ));
        stack.push(1.into());
        stack.push(2.into());
        assert!(verify_instruction(&stack, ADD, 2).is_ok());
        assert!(matches!(
            verify_instruction(&stack, DUP1, 2),
            Err(Error::OutOfStack { limit: 2, .. })
        ));
    }
}
