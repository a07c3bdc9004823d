//! Per (transform type, size) shift and precision parameters.
//!
//! Every value here is part of the bit-exact contract: changing a shift or a
//! precision changes the coefficients and can push the largest 12-bit
//! intermediate past the 32-bit range.

use crate::error::{TxfmError, fault};

/// Two 1D kernels, named `<COLUMN>_<ROW>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxType {
    DctDct = 0,
    AdstDct = 1,
    DctAdst = 2,
    AdstAdst = 3,
    Idtx = 9,
}

impl TxType {
    /// The type pairs with a forward configuration.
    pub const SUPPORTED: [TxType; 4] = [
        TxType::DctDct,
        TxType::AdstDct,
        TxType::DctAdst,
        TxType::AdstAdst,
    ];
}

impl TryFrom<u8> for TxType {
    type Error = TxfmError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TxType::DctDct),
            1 => Ok(TxType::AdstDct),
            2 => Ok(TxType::DctAdst),
            3 => Ok(TxType::AdstAdst),
            9 => Ok(TxType::Idtx),
            _ => Err(TxfmError::UnknownTxType(value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxSize {
    Tx4x4,
    Tx8x8,
    Tx16x16,
    Tx32x32,
}

impl TxSize {
    pub const SUPPORTED: [TxSize; 2] = [TxSize::Tx4x4, TxSize::Tx8x8];

    pub fn width(self) -> usize {
        match self {
            TxSize::Tx4x4 => 4,
            TxSize::Tx8x8 => 8,
            TxSize::Tx16x16 => 16,
            TxSize::Tx32x32 => 32,
        }
    }

    pub fn area(self) -> usize {
        self.width() * self.width()
    }
}

impl TryFrom<usize> for TxSize {
    type Error = TxfmError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(TxSize::Tx4x4),
            8 => Ok(TxSize::Tx8x8),
            16 => Ok(TxSize::Tx16x16),
            32 => Ok(TxSize::Tx32x32),
            _ => Err(TxfmError::UnknownTxSize(value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Txfm1dType {
    Dct,
    Adst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxfmConfig {
    pub tx_type: TxType,
    pub tx_size: TxSize,
    pub txfm_type_col: Txfm1dType,
    pub txfm_type_row: Txfm1dType,
    /// Left shift applied to every sample on load.
    pub input_shift: u8,
    /// Rounding right shift between the column and row passes.
    pub column_round_shift: u8,
    /// Rounding right shift after the row pass.
    pub row_round_shift: u8,
    pub column_precision: u8,
    pub row_precision: u8,
}

const fn config(
    tx_type: TxType,
    tx_size: TxSize,
    txfm_type_col: Txfm1dType,
    txfm_type_row: Txfm1dType,
    column_round_shift: u8,
) -> TxfmConfig {
    TxfmConfig {
        tx_type,
        tx_size,
        txfm_type_col,
        txfm_type_row,
        input_shift: 2,
        column_round_shift,
        row_round_shift: 0,
        column_precision: 13,
        row_precision: 13,
    }
}

// The 4x4 column pass needs no extra rounding: the shift is folded into the
// kernel precision.
static FWD_TXFM_CONFIGS_4X4: [TxfmConfig; 4] = [
    config(TxType::DctDct, TxSize::Tx4x4, Txfm1dType::Dct, Txfm1dType::Dct, 0),
    config(TxType::AdstDct, TxSize::Tx4x4, Txfm1dType::Adst, Txfm1dType::Dct, 0),
    config(TxType::DctAdst, TxSize::Tx4x4, Txfm1dType::Dct, Txfm1dType::Adst, 0),
    config(TxType::AdstAdst, TxSize::Tx4x4, Txfm1dType::Adst, Txfm1dType::Adst, 0),
];

static FWD_TXFM_CONFIGS_8X8: [TxfmConfig; 4] = [
    config(TxType::DctDct, TxSize::Tx8x8, Txfm1dType::Dct, Txfm1dType::Dct, 1),
    config(TxType::AdstDct, TxSize::Tx8x8, Txfm1dType::Adst, Txfm1dType::Dct, 1),
    config(TxType::DctAdst, TxSize::Tx8x8, Txfm1dType::Dct, Txfm1dType::Adst, 1),
    config(TxType::AdstAdst, TxSize::Tx8x8, Txfm1dType::Adst, Txfm1dType::Adst, 1),
];

pub fn try_fwd_txfm_config(
    tx_type: TxType,
    tx_size: TxSize,
) -> Result<&'static TxfmConfig, TxfmError> {
    let table = match tx_size {
        TxSize::Tx4x4 => &FWD_TXFM_CONFIGS_4X4,
        TxSize::Tx8x8 => &FWD_TXFM_CONFIGS_8X8,
        TxSize::Tx16x16 | TxSize::Tx32x32 => return Err(TxfmError::UnsupportedTxSize(tx_size)),
    };
    let index = match tx_type {
        TxType::DctDct => 0,
        TxType::AdstDct => 1,
        TxType::DctAdst => 2,
        TxType::AdstAdst => 3,
        TxType::Idtx => return Err(TxfmError::UnsupportedTxType(tx_type)),
    };
    Ok(&table[index])
}

pub fn fwd_txfm_config(tx_type: TxType, tx_size: TxSize) -> &'static TxfmConfig {
    try_fwd_txfm_config(tx_type, tx_size).unwrap_or_else(|err| fault(err))
}
