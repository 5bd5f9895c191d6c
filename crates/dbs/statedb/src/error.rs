// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use rlp::DecoderError;
use thiserror::Error;
use tvm_types::Address;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error(transparent)]
    Decoder(#[from] DecoderError),

    #[error("incomplete database: address={0:?}")]
    IncompleteDatabase(Address),

    #[error("{0}")]
    Msg(String),
}

pub type Result<T> = std::result::Result<T, Error>;
