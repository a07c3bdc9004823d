//! Moving blocks between the caller's strided `i16` samples and the `i32`
//! working arena. The arena is always `n * n` values, row-major.

use crate::video::BitDepth;

/// Mirroring applied while loading, for residuals whose prediction direction
/// implies a flipped basis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Flip {
    /// Reverse row order.
    pub ud: bool,
    /// Reverse sample order within each row.
    pub lr: bool,
}

impl Flip {
    pub const NONE: Flip = Flip { ud: false, lr: false };
    pub const UD: Flip = Flip { ud: true, lr: false };
    pub const LR: Flip = Flip { ud: false, lr: true };
    pub const BOTH: Flip = Flip { ud: true, lr: true };
}

/// Reads an `n x n` window at `stride`, applies `flip`, widens and shifts
/// every sample left by `shift`.
pub fn load_block(
    input: &[i16],
    stride: usize,
    n: usize,
    flip: Flip,
    shift: u8,
    arena: &mut [i32],
) {
    debug_assert!(stride >= n, "stride {stride} shorter than block width {n}");
    debug_assert!(input.len() >= (n - 1) * stride + n, "input window out of bounds");
    debug_assert_eq!(arena.len(), n * n);

    for r in 0..n {
        let src_row = if flip.ud { n - 1 - r } else { r };
        let src = &input[src_row * stride..src_row * stride + n];
        let dst = &mut arena[r * n..(r + 1) * n];
        for (c, out) in dst.iter_mut().enumerate() {
            let sample = if flip.lr { src[n - 1 - c] } else { src[c] };
            *out = i32::from(sample) << shift;
        }
    }
}

/// Caller preconditions, checked in debug builds only.
pub(crate) fn debug_check_residuals(input: &[i16], stride: usize, n: usize, bd: BitDepth) {
    debug_assert!(stride >= n, "stride {stride} shorter than block width {n}");
    debug_assert!(input.len() >= (n - 1) * stride + n, "input window out of bounds");
    if cfg!(debug_assertions) {
        let limit = bd.max_residual();
        for r in 0..n {
            for &sample in &input[r * stride..r * stride + n] {
                debug_assert!(
                    (-limit..=limit).contains(&sample),
                    "residual {sample} outside {}-bit range",
                    bd.bits()
                );
            }
        }
    }
}

pub fn transpose(arena: &mut [i32], n: usize) {
    debug_assert_eq!(arena.len(), n * n);
    for r in 0..n {
        for c in (r + 1)..n {
            arena.swap(r * n + c, c * n + r);
        }
    }
}

pub fn store_block(arena: &[i32], output: &mut [i32]) {
    output.copy_from_slice(arena);
}

#[cfg(test)]
#[allow(clippy::needless_range_loop)]
mod tests {
    use super::*;

    fn transposed_index(i: usize, n: usize) -> usize {
        (i % n) * n + i / n
    }

    fn numbered(n: usize, stride: usize) -> Vec<i16> {
        (0..n * stride).map(|i| i as i16).collect()
    }

    #[test]
    fn load_respects_stride_and_shift() {
        let input = numbered(4, 6);
        let mut arena = [0i32; 16];
        load_block(&input, 6, 4, Flip::NONE, 2, &mut arena);
        for r in 0..4 {
            for c in 0..4 {
                assert_eq!(arena[r * 4 + c], ((r * 6 + c) as i32) << 2);
            }
        }
    }

    #[test]
    fn flips_reverse_rows_and_columns() {
        let input = numbered(8, 8);
        let mut plain = [0i32; 64];
        let mut ud = [0i32; 64];
        let mut lr = [0i32; 64];
        let mut both = [0i32; 64];
        load_block(&input, 8, 8, Flip::NONE, 0, &mut plain);
        load_block(&input, 8, 8, Flip::UD, 0, &mut ud);
        load_block(&input, 8, 8, Flip::LR, 0, &mut lr);
        load_block(&input, 8, 8, Flip::BOTH, 0, &mut both);
        for r in 0..8 {
            for c in 0..8 {
                let v = plain[r * 8 + c];
                assert_eq!(ud[(7 - r) * 8 + c], v);
                assert_eq!(lr[r * 8 + 7 - c], v);
                assert_eq!(both[(7 - r) * 8 + 7 - c], v);
            }
        }
    }

    #[test]
    fn negative_samples_shift_arithmetically() {
        let input = [-3i16, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, -32768];
        let mut arena = [0i32; 16];
        load_block(&input, 4, 4, Flip::NONE, 2, &mut arena);
        assert_eq!(arena[0], -12);
        assert_eq!(arena[15], -131072);
    }

    #[test]
    fn transpose_matches_index_permutation() {
        for n in [4, 8] {
            let original: Vec<i32> = (0..(n * n) as i32).collect();
            let mut arena = original.clone();
            transpose(&mut arena, n);
            for i in 0..n * n {
                assert_eq!(arena[transposed_index(i, n)], original[i]);
            }
            transpose(&mut arena, n);
            assert_eq!(arena, original);
        }
    }
}
