//! C entry points. Arguments mirror the codec's C prototypes: a residual
//! window with a row stride, a coefficient buffer of `N * N` entries, a raw
//! transform type id and a bit depth.
//!
//! An invalid type, size or bit depth is a configuration fault. The panic
//! cannot unwind out of an `extern "C"` function, so the process aborts.

use std::ffi::c_int;
use std::slice;

use fwdtx::{BitDepth, TxType, TxfmError};

fn tx_type_from_raw(tx_type: c_int) -> TxType {
    u8::try_from(tx_type)
        .map_err(|_| TxfmError::UnknownTxType(u8::MAX))
        .and_then(TxType::try_from)
        .unwrap_or_else(|err| panic!("{err}"))
}

fn bit_depth_from_raw(bd: c_int) -> BitDepth {
    u8::try_from(bd)
        .map_err(|_| TxfmError::UnsupportedBitDepth(u8::MAX))
        .and_then(BitDepth::try_from)
        .unwrap_or_else(|err| panic!("{err}"))
}

unsafe fn input_window<'a>(input: *const i16, stride: c_int, n: usize) -> (&'a [i16], usize) {
    let stride = usize::try_from(stride).unwrap_or_else(|_| panic!("negative stride {stride}"));
    assert!(!input.is_null(), "null input");
    assert!(stride >= n, "stride {stride} shorter than block width {n}");
    let len = (n - 1) * stride + n;
    (unsafe { slice::from_raw_parts(input, len) }, stride)
}

/// # Safety
///
/// `input` must point to a 4x4 window of residuals at row pitch `stride`
/// and `coeff` to 16 writable `i32`s.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fwdtx_fwd_txfm2d_4x4(
    input: *const i16,
    coeff: *mut i32,
    stride: c_int,
    tx_type: c_int,
    bd: c_int,
) {
    let tx_type = tx_type_from_raw(tx_type);
    let bd = bit_depth_from_raw(bd);
    let (input, stride) = unsafe { input_window(input, stride, 4) };
    assert!(!coeff.is_null(), "null coefficient buffer");
    let output = unsafe { &mut *coeff.cast::<[i32; 16]>() };
    fwdtx::fwd_txfm2d_4x4(input, stride, output, tx_type, bd);
}

/// # Safety
///
/// `input` must point to an 8x8 window of residuals at row pitch `stride`
/// and `coeff` to 64 writable `i32`s.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fwdtx_fwd_txfm2d_8x8(
    input: *const i16,
    coeff: *mut i32,
    stride: c_int,
    tx_type: c_int,
    bd: c_int,
) {
    let tx_type = tx_type_from_raw(tx_type);
    let bd = bit_depth_from_raw(bd);
    let (input, stride) = unsafe { input_window(input, stride, 8) };
    assert!(!coeff.is_null(), "null coefficient buffer");
    let output = unsafe { &mut *coeff.cast::<[i32; 64]>() };
    fwdtx::fwd_txfm2d_8x8(input, stride, output, tx_type, bd);
}

/// Legacy 4x4 hybrid transform. Always aborts.
///
/// # Safety
///
/// Never dereferences its pointers.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fwdtx_highbd_fht4x4(
    _input: *const i16,
    _output: *mut i32,
    _stride: c_int,
    tx_type: c_int,
) {
    let tx_type = u8::try_from(tx_type)
        .ok()
        .and_then(|id| TxType::try_from(id).ok())
        .unwrap_or(TxType::DctDct);
    fwdtx::highbd_fht4x4(&[], &mut [], 0, tx_type);
}
