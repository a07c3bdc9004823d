//! Fixed-point cosine table.
//!
//! Row `cos_bit` holds `round(cos(k * PI / 128) * 2^cos_bit)` for `k` in
//! `0..64`, a quarter circle in steps of `PI / 128`. Kernels index it as
//! `cospi[k]`, so `cospi[32]` is cos(PI/4) and `cospi[16]` is cos(PI/8).

use std::f64::consts::PI;
use std::sync::LazyLock;

use crate::error::{TxfmError, fault};

pub const COS_BIT_MIN: u8 = 10;
pub const COS_BIT_MAX: u8 = 16;

const COS_BIT_LEVELS: usize = (COS_BIT_MAX - COS_BIT_MIN + 1) as usize;

static COSPI: LazyLock<[[i32; 64]; COS_BIT_LEVELS]> = LazyLock::new(|| {
    let mut table = [[0i32; 64]; COS_BIT_LEVELS];
    for (level, row) in table.iter_mut().enumerate() {
        let scale = f64::from(1u32 << (usize::from(COS_BIT_MIN) + level));
        for (k, entry) in row.iter_mut().enumerate() {
            *entry = ((k as f64 * PI / 128.0).cos() * scale).round() as i32;
        }
    }
    tracing::debug!(
        min = COS_BIT_MIN,
        max = COS_BIT_MAX,
        "built cospi tables"
    );
    table
});

pub fn try_cospi(cos_bit: u8) -> Result<&'static [i32; 64], TxfmError> {
    if !(COS_BIT_MIN..=COS_BIT_MAX).contains(&cos_bit) {
        return Err(TxfmError::UnsupportedCosBit(cos_bit));
    }
    Ok(&COSPI[usize::from(cos_bit - COS_BIT_MIN)])
}

pub fn cospi(cos_bit: u8) -> &'static [i32; 64] {
    try_cospi(cos_bit).unwrap_or_else(|err| fault(err))
}
