//! AVX2 (256-bit) SIMD kernel for x86_64 raster operations.
//!
//! Falls through to the generic kernel for tail bytes that don't fill
//! a full 256-bit (32-byte) register, and for difference counts.

use super::{IsaLevel, RasterKernel};

/// AVX2-accelerated raster kernel.
///
/// Uses 256-bit SIMD for bulk operations and scalar fallback for tails.
#[derive(Debug, Clone, Copy)]
pub struct Avx2Kernel;

#[cfg(target_arch = "x86_64")]
impl RasterKernel for Avx2Kernel {
    fn isa_level(&self) -> IsaLevel {
        IsaLevel::Avx2
    }

    fn and_combine(&self, a: &[u8], b: &[u8], out: &mut [u8]) {
        debug_assert_eq!(a.len(), b.len());
        debug_assert_eq!(a.len(), out.len());

        if is_x86_feature_detected!("avx2") {
            // Safety: we've confirmed AVX2 support at runtime.
            unsafe { self.and_combine_avx2(a, b, out) }
        } else {
            super::generic::GenericKernel.and_combine(a, b, out);
        }
    }

    // No vector popcount on AVX2.
    fn difference_count(&self, a: &[u8], b: &[u8]) -> u32 {
        super::generic::GenericKernel.difference_count(a, b)
    }
}

#[cfg(target_arch = "x86_64")]
impl Avx2Kernel {
    #[target_feature(enable = "avx2")]
    unsafe fn and_combine_avx2(&self, a: &[u8], b: &[u8], out: &mut [u8]) {
        use std::arch::x86_64::*;

        let len = a.len();
        let chunks = len / 32;

        for i in 0..chunks {
            let offset = i * 32;
            unsafe {
                let va = _mm256_loadu_si256(a.as_ptr().add(offset) as *const __m256i);
                let vb = _mm256_loadu_si256(b.as_ptr().add(offset) as *const __m256i);
                let result = _mm256_and_si256(va, vb);
                _mm256_storeu_si256(out.as_mut_ptr().add(offset) as *mut __m256i, result);
            }
        }

        // Scalar tail
        let tail_start = chunks * 32;
        for i in tail_start..len {
            out[i] = a[i] & b[i];
        }
    }
}

// Non-x86_64 stub so the type exists on all platforms.
#[cfg(not(target_arch = "x86_64"))]
impl RasterKernel for Avx2Kernel {
    fn isa_level(&self) -> IsaLevel {
        IsaLevel::Generic
    }

    fn and_combine(&self, a: &[u8], b: &[u8], out: &mut [u8]) {
        super::generic::GenericKernel.and_combine(a, b, out);
    }

    fn difference_count(&self, a: &[u8], b: &[u8]) -> u32 {
        super::generic::GenericKernel.difference_count(a, b)
    }
}
