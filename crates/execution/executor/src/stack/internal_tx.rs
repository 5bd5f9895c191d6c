// Copyright 2020 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use primitives::Bytes;
use serde_derive::Serialize;
use strum_macros::Display;
use tvm_types::{Address, U256};
use vm::TokenValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InternalTxNote {
    Call,
    Create,
    Suicide,
}

/// One value movement inside a transaction: a frame of the call tree, or
/// the balance sweep of a self-destruct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalTransaction {
    pub parent: Option<usize>,
    pub depth: usize,
    pub note: InternalTxNote,
    pub sender: Address,
    pub receiver: Address,
    pub value: U256,
    pub token_id: u64,
    pub token_amount: U256,
    #[serde(skip)]
    pub data: Bytes,
    pub children: Vec<usize>,
    pub rejected: bool,
}

impl InternalTransaction {
    pub fn new(
        note: InternalTxNote, sender: Address, receiver: Address, value: U256,
        token: Option<TokenValue>,
    ) -> Self {
        let token = token.unwrap_or_default();
        InternalTransaction {
            parent: None,
            depth: 0,
            note,
            sender,
            receiver,
            value,
            token_id: token.id,
            token_amount: token.amount,
            data: Bytes::new(),
            children: Vec::new(),
            rejected: false,
        }
    }

    pub fn with_data(mut self, data: Bytes) -> Self {
        self.data = data;
        self
    }
}

/// The call tree of one transaction, addressed by index. Node 0 is the
/// top-level call. A rejected node's subtree is rejected with it.
#[derive(Debug, Clone, Default)]
pub struct CallFrameArena {
    nodes: Vec<InternalTransaction>,
}

impl CallFrameArena {
    pub fn new() -> Self { CallFrameArena::default() }

    /// Appends `tx` below `parent`, or as the root, and returns its index.
    pub fn add(
        &mut self, parent: Option<usize>, mut tx: InternalTransaction,
    ) -> usize {
        let index = self.nodes.len();
        tx.parent = parent;
        tx.depth = match parent {
            Some(parent) => {
                let parent = &mut self.nodes[parent];
                parent.children.push(index);
                parent.depth + 1
            }
            None => 0,
        };
        self.nodes.push(tx);
        index
    }

    pub fn reject(&mut self, index: usize) {
        let mut pending = vec![index];
        while let Some(index) = pending.pop() {
            let node = &mut self.nodes[index];
            node.rejected = true;
            pending.extend_from_slice(&node.children);
        }
    }

    pub fn reject_all(&mut self) {
        for node in &mut self.nodes {
            node.rejected = true;
        }
    }

    pub fn get(&self, index: usize) -> Option<&InternalTransaction> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize { self.nodes.len() }

    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &InternalTransaction> {
        self.nodes.iter()
    }

    pub fn into_vec(self) -> Vec<InternalTransaction> { self.nodes }
}
