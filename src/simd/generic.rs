//! Pure-Rust scalar fallback for raster kernel operations.
//!
//! This implementation works on all platforms and serves as the reference
//! implementation for correctness testing.

use super::{IsaLevel, RasterKernel};

/// Pure-Rust scalar raster kernel, no SIMD intrinsics.
#[derive(Debug, Clone, Copy)]
pub struct GenericKernel;

impl RasterKernel for GenericKernel {
    fn isa_level(&self) -> IsaLevel {
        IsaLevel::Generic
    }

    fn and_combine(&self, a: &[u8], b: &[u8], out: &mut [u8]) {
        debug_assert_eq!(a.len(), b.len());
        debug_assert_eq!(a.len(), out.len());
        for ((o, &av), &bv) in out.iter_mut().zip(a.iter()).zip(b.iter()) {
            *o = av & bv;
        }
    }

    fn difference_count(&self, a: &[u8], b: &[u8]) -> u32 {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b.iter())
            .map(|(&av, &bv)| (av ^ bv).count_ones())
            .sum()
    }
}
