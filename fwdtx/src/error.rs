use thiserror::Error;

use crate::config::{TxSize, TxType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TxfmError {
    #[error("unknown transform type id {0}")]
    UnknownTxType(u8),
    #[error("no forward configuration for transform type {0:?}")]
    UnsupportedTxType(TxType),
    #[error("unknown transform size {0}")]
    UnknownTxSize(usize),
    #[error("no forward configuration for transform size {0:?}")]
    UnsupportedTxSize(TxSize),
    #[error("unsupported bit depth {0}: expected 8, 10 or 12")]
    UnsupportedBitDepth(u8),
    #[error("cos_bit {0} outside the tabulated range 10..=16")]
    UnsupportedCosBit(u8),
    #[error("{0} is not supported")]
    UnsupportedOperation(&'static str),
}

/// Configuration faults have no fallback: report and stop.
#[cold]
pub(crate) fn fault(err: TxfmError) -> ! {
    tracing::error!(%err, "forward transform configuration fault");
    panic!("{err}");
}
