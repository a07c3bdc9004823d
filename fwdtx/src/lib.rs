#![forbid(unsafe_code)]

pub mod config;
pub mod cospi;
pub mod error;
pub mod lanes;
pub mod reference;
pub mod staging;
pub mod txfm2d;
pub mod video;

pub use config::{TxSize, TxType, Txfm1dType, TxfmConfig, fwd_txfm_config, try_fwd_txfm_config};
pub use cospi::{COS_BIT_MAX, COS_BIT_MIN, cospi, try_cospi};
pub use error::TxfmError;
pub use reference::{ReferenceOutput, StagePeak, fwd_txfm2d_reference, round_shift};
pub use staging::Flip;
pub use txfm2d::{
    fwd_txfm2d, fwd_txfm2d_4x4, fwd_txfm2d_8x8, fwd_txfm2d_flipped, highbd_fht4x4,
};
pub use video::BitDepth;
