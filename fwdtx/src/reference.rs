//! Scalar reference for the forward 2D transforms.
//!
//! One 1D kernel call per column, then one per row, on `i64` values, with the
//! same stage order and the same rounding as [`crate::lanes`]. Every product,
//! sum and rounding bias is recorded in a [`StagePeak`], so the reference also
//! answers whether an input stays inside the 32-bit intermediate range. When
//! it does, the reference and the lane path agree bit for bit.

use crate::config::{TxSize, TxType, Txfm1dType, fwd_txfm_config};
use crate::cospi::cospi;
use crate::staging::{Flip, debug_check_residuals, load_block};
use crate::video::BitDepth;

/// Adds `1 << (bit - 1)` and shifts right arithmetically.
#[inline]
pub fn round_shift(value: i64, bit: u8) -> i64 {
    (value + (1i64 << (bit - 1))) >> bit
}

/// Largest magnitude seen at any stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StagePeak {
    pub magnitude: u64,
}

impl StagePeak {
    #[inline]
    fn observe(&mut self, value: i64) -> i64 {
        self.magnitude = self.magnitude.max(value.unsigned_abs());
        value
    }

    pub fn fits_i32(&self) -> bool {
        self.magnitude <= i32::MAX as u64
    }
}

struct Arith<'a> {
    cospi: &'static [i32; 64],
    bit: u8,
    peak: &'a mut StagePeak,
}

impl Arith<'_> {
    fn c(&self, k: usize) -> i64 {
        i64::from(self.cospi[k])
    }

    fn add(&mut self, a: i64, b: i64) -> i64 {
        self.peak.observe(a + b)
    }

    fn sub(&mut self, a: i64, b: i64) -> i64 {
        self.peak.observe(a - b)
    }

    fn round(&mut self, value: i64) -> i64 {
        self.peak.observe(value + (1i64 << (self.bit - 1))) >> self.bit
    }

    /// `round(a * w0 + b * w1)`
    fn half_btf(&mut self, w0: i64, a: i64, w1: i64, b: i64) -> i64 {
        let p0 = self.peak.observe(a * w0);
        let p1 = self.peak.observe(b * w1);
        let sum = self.add(p0, p1);
        self.round(sum)
    }

    /// `(round(a*w0 + b*w1), round(a*w1 - b*w0))`
    fn btf_type0(&mut self, w0: i64, w1: i64, a: i64, b: i64) -> (i64, i64) {
        (self.half_btf(w0, a, w1, b), self.half_btf(w1, a, -w0, b))
    }

    /// `(round(a*w0 + b*w1), round(b*w0 - a*w1))`
    fn btf_type1(&mut self, w0: i64, w1: i64, a: i64, b: i64) -> (i64, i64) {
        (self.half_btf(w0, a, w1, b), self.half_btf(w0, b, -w1, a))
    }
}

fn fdct4(data: &mut [i64], offset: usize, stride: usize, ar: &mut Arith) {
    let x = |i: usize| data[offset + i * stride];
    let (x0, x1, x2, x3) = (x(0), x(1), x(2), x(3));

    let s0 = ar.add(x0, x3);
    let s1 = ar.add(x1, x2);
    let s2 = ar.sub(x1, x2);
    let s3 = ar.sub(x0, x3);

    let (out0, out2) = ar.btf_type0(ar.c(32), ar.c(32), s0, s1);
    let (out1, out3) = ar.btf_type1(ar.c(48), ar.c(16), s2, s3);

    data[offset] = out0;
    data[offset + stride] = out1;
    data[offset + 2 * stride] = out2;
    data[offset + 3 * stride] = out3;
}

fn fadst4(data: &mut [i64], offset: usize, stride: usize, ar: &mut Arith) {
    let x = |i: usize| data[offset + i * stride];
    let (x0, x1, x2, x3) = (x(0), x(1), x(2), x(3));

    let (s0, s1) = ar.btf_type0(ar.c(8), ar.c(56), x3, x0);
    let (s2, s3) = ar.btf_type0(ar.c(40), ar.c(24), x1, x2);

    let u0 = ar.add(s0, s2);
    let u2 = ar.sub(s0, s2);
    let u1 = ar.add(s1, s3);
    let u3 = ar.sub(s1, s3);

    let (u2, u3) = ar.btf_type0(ar.c(32), ar.c(32), u2, u3);

    data[offset] = u0;
    data[offset + stride] = -u2;
    data[offset + 2 * stride] = u3;
    data[offset + 3 * stride] = -u1;
}

fn fdct8(data: &mut [i64], offset: usize, stride: usize, ar: &mut Arith) {
    let mut x = [0i64; 8];
    for (i, v) in x.iter_mut().enumerate() {
        *v = data[offset + i * stride];
    }

    // stage 1
    let a0 = ar.add(x[0], x[7]);
    let a7 = ar.sub(x[0], x[7]);
    let a1 = ar.add(x[1], x[6]);
    let a6 = ar.sub(x[1], x[6]);
    let a2 = ar.add(x[2], x[5]);
    let a5 = ar.sub(x[2], x[5]);
    let a3 = ar.add(x[3], x[4]);
    let a4 = ar.sub(x[3], x[4]);

    // stage 2
    let b0 = ar.add(a0, a3);
    let b3 = ar.sub(a0, a3);
    let b1 = ar.add(a1, a2);
    let b2 = ar.sub(a1, a2);
    let (b5, b6) = ar.btf_type0(-ar.c(32), ar.c(32), a5, a6);

    // stage 3
    let (out0, out4) = ar.btf_type0(ar.c(32), ar.c(32), b0, b1);
    let (out2, out6) = ar.btf_type1(ar.c(48), ar.c(16), b2, b3);
    let c4 = ar.add(a4, b5);
    let c5 = ar.sub(a4, b5);
    let c6 = ar.sub(a7, b6);
    let c7 = ar.add(a7, b6);

    // stage 4
    let (out1, out7) = ar.btf_type1(ar.c(56), ar.c(8), c4, c7);
    let (out5, out3) = ar.btf_type1(ar.c(24), ar.c(40), c5, c6);

    let out = [out0, out1, out2, out3, out4, out5, out6, out7];
    for (i, v) in out.into_iter().enumerate() {
        data[offset + i * stride] = v;
    }
}

fn fadst8(data: &mut [i64], offset: usize, stride: usize, ar: &mut Arith) {
    let mut x = [0i64; 8];
    for (i, v) in x.iter_mut().enumerate() {
        *v = data[offset + i * stride];
    }

    // stage 1: odd-angle rotations of mirrored input pairs
    let (a0, a1) = ar.btf_type0(ar.c(4), ar.c(60), x[7], x[0]);
    let (a2, a3) = ar.btf_type0(ar.c(20), ar.c(44), x[5], x[2]);
    let (a4, a5) = ar.btf_type0(ar.c(36), ar.c(28), x[3], x[4]);
    let (a6, a7) = ar.btf_type0(ar.c(52), ar.c(12), x[1], x[6]);

    // stage 2
    let b0 = ar.add(a0, a4);
    let b4 = ar.sub(a0, a4);
    let b1 = ar.add(a1, a5);
    let b5 = ar.sub(a1, a5);
    let b2 = ar.add(a2, a6);
    let b6 = ar.sub(a2, a6);
    let b3 = ar.add(a3, a7);
    let b7 = ar.sub(a3, a7);

    // stage 3
    let (c4, c5) = ar.btf_type0(ar.c(16), ar.c(48), b4, b5);
    let (c6, c7) = ar.btf_type0(-ar.c(48), ar.c(16), b6, b7);

    // stage 4
    let d0 = ar.add(b0, b2);
    let d2 = ar.sub(b0, b2);
    let d1 = ar.add(b1, b3);
    let d3 = ar.sub(b1, b3);
    let d4 = ar.add(c4, c6);
    let d6 = ar.sub(c4, c6);
    let d5 = ar.add(c5, c7);
    let d7 = ar.sub(c5, c7);

    // stage 5: equal-coefficient rotations
    let (e2, e3) = ar.btf_type0(ar.c(32), ar.c(32), d2, d3);
    let (e6, e7) = ar.btf_type0(ar.c(32), ar.c(32), d6, d7);

    let out = [d0, -d4, e6, -e2, e3, -e7, d5, -d1];
    for (i, v) in out.into_iter().enumerate() {
        data[offset + i * stride] = v;
    }
}

type Txfm1dFn = fn(&mut [i64], usize, usize, &mut Arith);

fn txfm1d_fn(txfm_type: Txfm1dType, n: usize) -> Txfm1dFn {
    match (txfm_type, n) {
        (Txfm1dType::Dct, 4) => fdct4,
        (Txfm1dType::Adst, 4) => fadst4,
        (Txfm1dType::Dct, 8) => fdct8,
        (Txfm1dType::Adst, 8) => fadst8,
        _ => unreachable!("no {n}-point {txfm_type:?} kernel"),
    }
}

fn round_shift_all(data: &mut [i64], bit: u8, peak: &mut StagePeak) {
    for v in data.iter_mut() {
        *v = peak.observe(*v + (1i64 << (bit - 1))) >> bit;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceOutput {
    /// Row-major, `out[k * n + m]` is vertical frequency `k`, horizontal `m`.
    pub coeffs: Vec<i32>,
    pub peak: StagePeak,
}

/// Scalar counterpart of [`crate::fwd_txfm2d_flipped`].
///
/// Coefficients are truncated to `i32`; they are only meaningful while
/// `peak.fits_i32()` holds.
pub fn fwd_txfm2d_reference(
    input: &[i16],
    stride: usize,
    tx_type: TxType,
    tx_size: TxSize,
    bd: BitDepth,
    flip: Flip,
) -> ReferenceOutput {
    let cfg = fwd_txfm_config(tx_type, tx_size);
    let n = tx_size.width();
    debug_check_residuals(input, stride, n, bd);

    let mut loaded = vec![0i32; n * n];
    load_block(input, stride, n, flip, cfg.input_shift, &mut loaded);
    let mut data: Vec<i64> = loaded.into_iter().map(i64::from).collect();
    let mut peak = StagePeak::default();
    for &v in &data {
        peak.observe(v);
    }

    let col_fn = txfm1d_fn(cfg.txfm_type_col, n);
    let mut ar = Arith {
        cospi: cospi(cfg.column_precision),
        bit: cfg.column_precision,
        peak: &mut peak,
    };
    for c in 0..n {
        col_fn(&mut data, c, n, &mut ar);
    }
    if cfg.column_round_shift != 0 {
        round_shift_all(&mut data, cfg.column_round_shift, &mut peak);
    }

    let row_fn = txfm1d_fn(cfg.txfm_type_row, n);
    let mut ar = Arith {
        cospi: cospi(cfg.row_precision),
        bit: cfg.row_precision,
        peak: &mut peak,
    };
    for r in 0..n {
        row_fn(&mut data, r * n, 1, &mut ar);
    }
    if cfg.row_round_shift != 0 {
        round_shift_all(&mut data, cfg.row_round_shift, &mut peak);
    }

    ReferenceOutput {
        coeffs: data.into_iter().map(|v| v as i32).collect(),
        peak,
    }
}
