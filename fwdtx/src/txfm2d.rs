use crate::config::{TxSize, TxType, fwd_txfm_config};
use crate::error::{TxfmError, fault};
use crate::lanes;
use crate::staging::{Flip, debug_check_residuals};
use crate::video::BitDepth;

fn fwd_txfm2d_4x4_flipped(
    input: &[i16],
    stride: usize,
    output: &mut [i32; 16],
    tx_type: TxType,
    bd: BitDepth,
    flip: Flip,
) {
    let cfg = fwd_txfm_config(tx_type, TxSize::Tx4x4);
    debug_check_residuals(input, stride, 4, bd);

    let mut v = lanes::load_4x4(input, stride, flip, cfg.input_shift);

    lanes::txfm4x4(cfg.txfm_type_col, &mut v, cfg.column_precision);
    if cfg.column_round_shift != 0 {
        lanes::round_shift_4x4(&mut v, cfg.column_round_shift);
    }

    lanes::txfm4x4(cfg.txfm_type_row, &mut v, cfg.row_precision);
    if cfg.row_round_shift != 0 {
        lanes::round_shift_4x4(&mut v, cfg.row_round_shift);
    }

    lanes::write_4x4(&v, output);
}

fn fwd_txfm2d_8x8_flipped(
    input: &[i16],
    stride: usize,
    output: &mut [i32; 64],
    tx_type: TxType,
    bd: BitDepth,
    flip: Flip,
) {
    let cfg = fwd_txfm_config(tx_type, TxSize::Tx8x8);
    debug_check_residuals(input, stride, 8, bd);

    let block = lanes::load_8x8(input, stride, flip, cfg.input_shift);
    let mut cols = block;
    lanes::txfm8x8(cfg.txfm_type_col, &block, &mut cols, cfg.column_precision);
    if cfg.column_round_shift != 0 {
        lanes::round_shift_8x8(&mut cols, cfg.column_round_shift);
    }
    lanes::transpose_8x8(&mut cols);

    let mut rows = cols;
    lanes::txfm8x8(cfg.txfm_type_row, &cols, &mut rows, cfg.row_precision);
    if cfg.row_round_shift != 0 {
        lanes::round_shift_8x8(&mut rows, cfg.row_round_shift);
    }
    lanes::transpose_8x8(&mut rows);

    lanes::write_8x8(&rows, output);
}

/// Forward 4x4 transform of the residual window at `input` with row pitch
/// `stride`. `output[k * 4 + m]` receives vertical frequency `k`, horizontal
/// frequency `m`.
///
/// Panics if `tx_type` has no forward configuration.
pub fn fwd_txfm2d_4x4(
    input: &[i16],
    stride: usize,
    output: &mut [i32; 16],
    tx_type: TxType,
    bd: BitDepth,
) {
    fwd_txfm2d_4x4_flipped(input, stride, output, tx_type, bd, Flip::NONE);
}

/// Forward 8x8 transform; see [`fwd_txfm2d_4x4`].
pub fn fwd_txfm2d_8x8(
    input: &[i16],
    stride: usize,
    output: &mut [i32; 64],
    tx_type: TxType,
    bd: BitDepth,
) {
    fwd_txfm2d_8x8_flipped(input, stride, output, tx_type, bd, Flip::NONE);
}

pub fn fwd_txfm2d(
    input: &[i16],
    stride: usize,
    tx_type: TxType,
    tx_size: TxSize,
    bd: BitDepth,
) -> Vec<i32> {
    fwd_txfm2d_flipped(input, stride, tx_type, tx_size, bd, Flip::NONE)
}

/// Like [`fwd_txfm2d`], mirroring the block on load as `flip` says.
pub fn fwd_txfm2d_flipped(
    input: &[i16],
    stride: usize,
    tx_type: TxType,
    tx_size: TxSize,
    bd: BitDepth,
    flip: Flip,
) -> Vec<i32> {
    match tx_size {
        TxSize::Tx4x4 => {
            let mut out = [0i32; 16];
            fwd_txfm2d_4x4_flipped(input, stride, &mut out, tx_type, bd, flip);
            out.to_vec()
        }
        TxSize::Tx8x8 => {
            let mut out = [0i32; 64];
            fwd_txfm2d_8x8_flipped(input, stride, &mut out, tx_type, bd, flip);
            out.to_vec()
        }
        TxSize::Tx16x16 | TxSize::Tx32x32 => fault(TxfmError::UnsupportedTxSize(tx_size)),
    }
}

/// Legacy 4x4 hybrid transform entry point. No configuration backs it, so
/// every call is a fault.
pub fn highbd_fht4x4(_input: &[i16], _output: &mut [i32], _stride: usize, _tx_type: TxType) -> ! {
    fault(TxfmError::UnsupportedOperation("highbd_fht4x4"))
}

#[cfg(test)]
#[allow(clippy::needless_range_loop)]
mod tests {
    use super::*;
    use crate::reference::fwd_txfm2d_reference;

    fn ramp(n: usize) -> Vec<i16> {
        (0..n * n).map(|i| (i as i16 % 13) - 6).collect()
    }

    #[test]
    fn zero_block_gives_zero_coefficients() {
        for tx_type in TxType::SUPPORTED {
            let mut out = [1i32; 16];
            fwd_txfm2d_4x4(&[0; 16], 4, &mut out, tx_type, BitDepth::Eight);
            assert_eq!(out, [0; 16]);

            let mut out = [1i32; 64];
            fwd_txfm2d_8x8(&[0; 64], 8, &mut out, tx_type, BitDepth::Ten);
            assert_eq!(out, [0; 64]);
        }
    }

    #[test]
    fn impulse_4x4_dct() {
        let mut input = [0i16; 16];
        input[0] = 64;
        let mut out = [0i32; 16];
        fwd_txfm2d_4x4(&input, 4, &mut out, TxType::DctDct, BitDepth::Eight);
        assert_eq!(
            out,
            [128, 167, 128, 69, 168, 219, 168, 91, 128, 167, 128, 69, 69, 91, 69, 38]
        );
    }

    #[test]
    fn lanes_agree_with_reference() {
        for tx_size in TxSize::SUPPORTED {
            let n = tx_size.width();
            let input = ramp(n);
            for tx_type in TxType::SUPPORTED {
                for flip in [Flip::NONE, Flip::UD, Flip::LR, Flip::BOTH] {
                    let lanes =
                        fwd_txfm2d_flipped(&input, n, tx_type, tx_size, BitDepth::Eight, flip);
                    let reference =
                        fwd_txfm2d_reference(&input, n, tx_type, tx_size, BitDepth::Eight, flip);
                    assert_eq!(lanes, reference.coeffs, "{tx_type:?} {tx_size:?} {flip:?}");
                }
            }
        }
    }

    #[test]
    fn stride_only_selects_the_window() {
        let dense = ramp(8);
        let mut padded = vec![i16::MAX; 7 * 20 + 8];
        for r in 0..8 {
            padded[r * 20..r * 20 + 8].copy_from_slice(&dense[r * 8..r * 8 + 8]);
        }
        let a = fwd_txfm2d(&dense, 8, TxType::AdstDct, TxSize::Tx8x8, BitDepth::Eight);
        let b = fwd_txfm2d(&padded, 20, TxType::AdstDct, TxSize::Tx8x8, BitDepth::Eight);
        assert_eq!(a, b);
    }

    #[test]
    fn generic_dispatch_matches_fixed_size_entry_points() {
        let input = ramp(8);
        let mut fixed = [0i32; 64];
        fwd_txfm2d_8x8(&input, 8, &mut fixed, TxType::DctAdst, BitDepth::Twelve);
        let generic = fwd_txfm2d(&input, 8, TxType::DctAdst, TxSize::Tx8x8, BitDepth::Twelve);
        assert_eq!(generic, fixed.to_vec());
    }

    #[test]
    #[should_panic(expected = "no forward configuration for transform size Tx16x16")]
    fn sixteen_point_is_a_fault() {
        fwd_txfm2d(&[0; 256], 16, TxType::DctDct, TxSize::Tx16x16, BitDepth::Eight);
    }

    #[test]
    #[should_panic(expected = "no forward configuration for transform type Idtx")]
    fn identity_is_a_fault() {
        let mut out = [0i32; 16];
        fwd_txfm2d_4x4(&[0; 16], 4, &mut out, TxType::Idtx, BitDepth::Eight);
    }

    #[test]
    #[should_panic(expected = "highbd_fht4x4 is not supported")]
    fn legacy_fht4x4_always_faults() {
        let mut out = [0i32; 16];
        highbd_fht4x4(&[0; 16], &mut out, 4, TxType::DctDct);
    }
}
