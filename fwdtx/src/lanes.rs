//! Lane-parallel forward kernels on `wide::i32x4`.
//!
//! A 4x4 block is four row vectors. An 8x8 block is sixteen half-row vectors:
//! `v[2 * r]` holds row `r` columns 0..4 and `v[2 * r + 1]` columns 4..8. The
//! kernels run the butterfly down the rows, so each lane carries one column.
//! Multiplies and adds wrap exactly like 32-bit SIMD; the configuration keeps
//! every legal input inside that range.

use wide::i32x4;

use crate::config::Txfm1dType;
use crate::cospi::cospi;
use crate::staging::{Flip, load_block, store_block, transpose};

pub type Block4x4 = [i32x4; 4];
pub type Block8x8 = [i32x4; 16];

#[inline(always)]
fn round_shift(x: i32x4, bit: u8) -> i32x4 {
    (x + i32x4::splat(1 << (bit - 1))) >> i32::from(bit)
}

/// `(round(a*w0 + b*w1), round(a*w1 - b*w0))`
#[inline(always)]
fn btf_type0(w0: i32, w1: i32, a: i32x4, b: i32x4, bit: u8) -> (i32x4, i32x4) {
    let (ww0, ww1) = (i32x4::splat(w0), i32x4::splat(w1));
    let out0 = round_shift(a * ww0 + b * ww1, bit);
    let out1 = round_shift(a * ww1 - b * ww0, bit);
    (out0, out1)
}

/// `(round(a*w0 + b*w1), round(b*w0 - a*w1))`
#[inline(always)]
fn btf_type1(w0: i32, w1: i32, a: i32x4, b: i32x4, bit: u8) -> (i32x4, i32x4) {
    let (ww0, ww1) = (i32x4::splat(w0), i32x4::splat(w1));
    let out0 = round_shift(a * ww0 + b * ww1, bit);
    let out1 = round_shift(b * ww0 - a * ww1, bit);
    (out0, out1)
}

#[inline(always)]
fn negate(x: i32x4) -> i32x4 {
    i32x4::splat(0) - x
}

fn transpose_4x4(v: [i32x4; 4]) -> [i32x4; 4] {
    let mut arena = [0i32; 16];
    for (r, row) in v.iter().enumerate() {
        arena[r * 4..r * 4 + 4].copy_from_slice(&row.to_array());
    }
    transpose(&mut arena, 4);
    pack(&arena)
}

fn pack(arena: &[i32; 16]) -> [i32x4; 4] {
    let row = |r: usize| {
        i32x4::new([
            arena[r * 4],
            arena[r * 4 + 1],
            arena[r * 4 + 2],
            arena[r * 4 + 3],
        ])
    };
    [row(0), row(1), row(2), row(3)]
}

pub fn load_4x4(input: &[i16], stride: usize, flip: Flip, shift: u8) -> Block4x4 {
    let mut arena = [0i32; 16];
    load_block(input, stride, 4, flip, shift, &mut arena);
    pack(&arena)
}

pub fn write_4x4(v: &Block4x4, output: &mut [i32; 16]) {
    let mut arena = [0i32; 16];
    for (r, row) in v.iter().enumerate() {
        arena[r * 4..r * 4 + 4].copy_from_slice(&row.to_array());
    }
    store_block(&arena, output);
}

/// 4-point DCT down the rows of `v`, leaving the block transposed.
pub fn fdct4x4(v: &mut Block4x4, bit: u8) {
    let c = cospi(bit);

    let s0 = v[0] + v[3];
    let s1 = v[1] + v[2];
    let s2 = v[1] - v[2];
    let s3 = v[0] - v[3];

    let (u0, u2) = btf_type0(c[32], c[32], s0, s1, bit);
    let (u1, u3) = btf_type1(c[48], c[16], s2, s3, bit);

    *v = transpose_4x4([u0, u1, u2, u3]);
}

/// 4-point ADST down the rows of `v`, leaving the block transposed.
pub fn fadst4x4(v: &mut Block4x4, bit: u8) {
    let c = cospi(bit);

    let (s0, s1) = btf_type0(c[8], c[56], v[3], v[0], bit);
    let (s2, s3) = btf_type0(c[40], c[24], v[1], v[2], bit);

    let u0 = s0 + s2;
    let u2 = s0 - s2;
    let u1 = s1 + s3;
    let u3 = s1 - s3;

    let (u2, u3) = btf_type0(c[32], c[32], u2, u3, bit);

    *v = transpose_4x4([u0, negate(u2), u3, negate(u1)]);
}

pub fn txfm4x4(txfm_type: Txfm1dType, v: &mut Block4x4, bit: u8) {
    match txfm_type {
        Txfm1dType::Dct => fdct4x4(v, bit),
        Txfm1dType::Adst => fadst4x4(v, bit),
    }
}

pub fn round_shift_4x4(v: &mut Block4x4, bit: u8) {
    for x in v.iter_mut() {
        *x = round_shift(*x, bit);
    }
}

pub fn load_8x8(input: &[i16], stride: usize, flip: Flip, shift: u8) -> Block8x8 {
    let mut arena = [0i32; 64];
    load_block(input, stride, 8, flip, shift, &mut arena);
    let mut v = [i32x4::splat(0); 16];
    for (i, half) in v.iter_mut().enumerate() {
        let base = i * 4;
        *half = i32x4::new([arena[base], arena[base + 1], arena[base + 2], arena[base + 3]]);
    }
    v
}

pub fn write_8x8(v: &Block8x8, output: &mut [i32; 64]) {
    let mut arena = [0i32; 64];
    for (i, half) in v.iter().enumerate() {
        arena[i * 4..i * 4 + 4].copy_from_slice(&half.to_array());
    }
    store_block(&arena, output);
}

/// Full 8x8 transpose in half-row layout, as four 4x4 quadrant transposes
/// with the off-diagonal quadrants swapped.
pub fn transpose_8x8(v: &mut Block8x8) {
    let src = *v;
    let quadrant = |row0: usize, half: usize| {
        transpose_4x4([
            src[2 * row0 + half],
            src[2 * (row0 + 1) + half],
            src[2 * (row0 + 2) + half],
            src[2 * (row0 + 3) + half],
        ])
    };
    let top_left = quadrant(0, 0);
    let top_right = quadrant(0, 1);
    let bottom_left = quadrant(4, 0);
    let bottom_right = quadrant(4, 1);

    for i in 0..4 {
        v[2 * i] = top_left[i];
        v[2 * i + 1] = bottom_left[i];
        v[2 * (i + 4)] = top_right[i];
        v[2 * (i + 4) + 1] = bottom_right[i];
    }
}

pub fn round_shift_8x8(v: &mut Block8x8, bit: u8) {
    for x in v.iter_mut() {
        *x = round_shift(*x, bit);
    }
}

/// One 8-point DCT over eight row vectors; outputs in frequency order.
fn fdct8_lanes(x: [i32x4; 8], c: &[i32; 64], bit: u8) -> [i32x4; 8] {
    // stage 1
    let a0 = x[0] + x[7];
    let a7 = x[0] - x[7];
    let a1 = x[1] + x[6];
    let a6 = x[1] - x[6];
    let a2 = x[2] + x[5];
    let a5 = x[2] - x[5];
    let a3 = x[3] + x[4];
    let a4 = x[3] - x[4];

    // stage 2
    let b0 = a0 + a3;
    let b3 = a0 - a3;
    let b1 = a1 + a2;
    let b2 = a1 - a2;
    let (b5, b6) = btf_type0(-c[32], c[32], a5, a6, bit);

    // stage 3
    let (out0, out4) = btf_type0(c[32], c[32], b0, b1, bit);
    let (out2, out6) = btf_type1(c[48], c[16], b2, b3, bit);
    let c4 = a4 + b5;
    let c5 = a4 - b5;
    let c6 = a7 - b6;
    let c7 = a7 + b6;

    // stage 4
    let (out1, out7) = btf_type1(c[56], c[8], c4, c7, bit);
    let (out5, out3) = btf_type1(c[24], c[40], c5, c6, bit);

    [out0, out1, out2, out3, out4, out5, out6, out7]
}

/// One 8-point ADST over eight row vectors; outputs in frequency order.
fn fadst8_lanes(x: [i32x4; 8], c: &[i32; 64], bit: u8) -> [i32x4; 8] {
    // stage 1
    let (a0, a1) = btf_type0(c[4], c[60], x[7], x[0], bit);
    let (a2, a3) = btf_type0(c[20], c[44], x[5], x[2], bit);
    let (a4, a5) = btf_type0(c[36], c[28], x[3], x[4], bit);
    let (a6, a7) = btf_type0(c[52], c[12], x[1], x[6], bit);

    // stage 2
    let b0 = a0 + a4;
    let b4 = a0 - a4;
    let b1 = a1 + a5;
    let b5 = a1 - a5;
    let b2 = a2 + a6;
    let b6 = a2 - a6;
    let b3 = a3 + a7;
    let b7 = a3 - a7;

    // stage 3
    let (c4, c5) = btf_type0(c[16], c[48], b4, b5, bit);
    let (c6, c7) = btf_type0(-c[48], c[16], b6, b7, bit);

    // stage 4
    let d0 = b0 + b2;
    let d2 = b0 - b2;
    let d1 = b1 + b3;
    let d3 = b1 - b3;
    let d4 = c4 + c6;
    let d6 = c4 - c6;
    let d5 = c5 + c7;
    let d7 = c5 - c7;

    // stage 5
    let (e2, e3) = btf_type0(c[32], c[32], d2, d3, bit);
    let (e6, e7) = btf_type0(c[32], c[32], d6, d7, bit);

    [
        d0,
        negate(d4),
        e6,
        negate(e2),
        e3,
        negate(e7),
        d5,
        negate(d1),
    ]
}

type Kernel8 = fn([i32x4; 8], &[i32; 64], u8) -> [i32x4; 8];

/// Runs `kernel` over the left (even vectors) and right (odd vectors) column
/// halves.
fn txfm8x8_halves(kernel: Kernel8, input: &Block8x8, output: &mut Block8x8, bit: u8) {
    let c = cospi(bit);
    for half in 0..2 {
        let mut x = [i32x4::splat(0); 8];
        for (r, lane) in x.iter_mut().enumerate() {
            *lane = input[2 * r + half];
        }
        for (k, coeff) in kernel(x, c, bit).into_iter().enumerate() {
            output[2 * k + half] = coeff;
        }
    }
}

pub fn fdct8x8(input: &Block8x8, output: &mut Block8x8, bit: u8) {
    txfm8x8_halves(fdct8_lanes, input, output, bit);
}

pub fn fadst8x8(input: &Block8x8, output: &mut Block8x8, bit: u8) {
    txfm8x8_halves(fadst8_lanes, input, output, bit);
}

pub fn txfm8x8(txfm_type: Txfm1dType, input: &Block8x8, output: &mut Block8x8, bit: u8) {
    match txfm_type {
        Txfm1dType::Dct => fdct8x8(input, output, bit),
        Txfm1dType::Adst => fadst8x8(input, output, bit),
    }
}

#[cfg(test)]
#[allow(clippy::needless_range_loop)]
mod tests {
    use super::*;

    fn rows(values: [[i32; 4]; 4]) -> Block4x4 {
        values.map(i32x4::new)
    }

    #[test]
    fn round_shift_matches_scalar_convention() {
        let x = i32x4::new([5, -5, -6, -4097]);
        assert_eq!(round_shift(x, 1).to_array()[..3], [3, -2, -3]);
        assert_eq!(round_shift(x, 13).to_array()[3], -1);
    }

    #[test]
    fn transpose_4x4_swaps_rows_and_lanes() {
        let v = rows([[0, 1, 2, 3], [4, 5, 6, 7], [8, 9, 10, 11], [12, 13, 14, 15]]);
        let t = transpose_4x4(v);
        assert_eq!(t[0].to_array(), [0, 4, 8, 12]);
        assert_eq!(t[3].to_array(), [3, 7, 11, 15]);
    }

    #[test]
    fn transpose_8x8_matches_arena_transpose() {
        let input: Vec<i16> = (0..64).collect();
        let mut v = load_8x8(&input, 8, Flip::NONE, 0);
        transpose_8x8(&mut v);
        let mut out = [0i32; 64];
        write_8x8(&v, &mut out);
        for r in 0..8 {
            for c in 0..8 {
                assert_eq!(out[r * 8 + c], (c * 8 + r) as i32);
            }
        }
    }

    #[test]
    fn dct4_columns_of_impulse() {
        let mut v = rows([[256, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        fdct4x4(&mut v, 13);
        // Column 0 lands in the first row after the transpose.
        assert_eq!(v[0].to_array(), [181, 237, 181, 98]);
        assert_eq!(v[1].to_array(), [0; 4]);
    }

    #[test]
    fn dct8_constant_rows_are_dc_only() {
        let input = [100i16; 64];
        let v = load_8x8(&input, 8, Flip::NONE, 2);
        let mut out = [i32x4::splat(0); 16];
        fdct8x8(&v, &mut out, 13);
        let dc = (2 * 1600 * 5793 + 4096) >> 13;
        assert_eq!(out[0].to_array(), [dc; 4]);
        assert_eq!(out[1].to_array(), [dc; 4]);
        for k in 2..16 {
            assert_eq!(out[k].to_array(), [0; 4], "vector {k}");
        }
    }
}
