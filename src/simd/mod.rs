//! SIMD-accelerated kernels for raster operations.
//!
//! This module provides a `RasterKernel` trait with CPU-specific implementations.
//! At runtime, [`detect_isa`] determines the best available instruction set and
//! [`best_kernel`] returns the fastest implementation for the current CPU.
//!
//! # Supported ISA levels
//!
//! - **Generic**: Pure-Rust scalar fallback: works everywhere
//! - **AVX2**: 256-bit SIMD for x86_64 systems with AVX2 support

pub mod avx2;
pub mod generic;

/// Instruction set architecture level detected at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IsaLevel {
    /// Pure-Rust scalar operations, no SIMD.
    Generic,
    /// x86_64 AVX2 (256-bit vectors).
    Avx2,
}

impl std::fmt::Display for IsaLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IsaLevel::Generic => write!(f, "Generic (scalar)"),
            IsaLevel::Avx2 => write!(f, "AVX2 (256-bit)"),
        }
    }
}

/// Detect the best ISA level available on the current CPU.
pub fn detect_isa() -> IsaLevel {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            return IsaLevel::Avx2;
        }
    }
    IsaLevel::Generic
}

/// Trait for SIMD-accelerated raster kernels.
///
/// Each method operates on bit-packed raster bytes. Both inputs always share
/// the same length; implementations handle alignment internally.
pub trait RasterKernel: Send + Sync {
    /// The ISA level this kernel targets.
    fn isa_level(&self) -> IsaLevel;

    /// Pixel-wise logical AND of two packed rasters.
    ///
    /// With background stored as 1, the result carries the ink of both inputs.
    fn and_combine(&self, a: &[u8], b: &[u8], out: &mut [u8]);

    /// Number of pixels that differ between two packed rasters.
    fn difference_count(&self, a: &[u8], b: &[u8]) -> u32;
}

/// Return the best available kernel for the current CPU.
pub fn best_kernel() -> Box<dyn RasterKernel> {
    match detect_isa() {
        #[cfg(target_arch = "x86_64")]
        IsaLevel::Avx2 => Box::new(avx2::Avx2Kernel),
        _ => Box::new(generic::GenericKernel),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_isa_returns_valid_level() {
        let level = detect_isa();
        assert!(level >= IsaLevel::Generic);
    }

    #[test]
    fn best_kernel_returns_working_kernel() {
        let kernel = best_kernel();
        assert!(kernel.isa_level() >= IsaLevel::Generic);
    }

    /// Run the full kernel test suite against any implementation.
    pub fn kernel_conformance_tests(kernel: &dyn RasterKernel) {
        // 3750 bytes is one 150x200 glyph; odd length exercises the scalar tail.
        for len in [3750usize, 77, 3] {
            let a = vec![0xFF_u8; len];
            let b = vec![0xAA_u8; len];
            let mut out = vec![0u8; len];
            kernel.and_combine(&a, &b, &mut out);
            assert!(out.iter().all(|&byte| byte == 0xAA));

            kernel.and_combine(&b, &b, &mut out);
            assert!(out.iter().all(|&byte| byte == 0xAA));

            let c = vec![0x55_u8; len];
            kernel.and_combine(&b, &c, &mut out);
            assert!(out.iter().all(|&byte| byte == 0));

            assert_eq!(kernel.difference_count(&a, &a), 0);
            assert_eq!(kernel.difference_count(&a, &b), (len * 4) as u32);
            assert_eq!(kernel.difference_count(&b, &c), (len * 8) as u32);
        }
    }

    #[test]
    fn generic_kernel_conformance() {
        kernel_conformance_tests(&generic::GenericKernel);
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn avx2_kernel_conformance() {
        if detect_isa() >= IsaLevel::Avx2 {
            kernel_conformance_tests(&avx2::Avx2Kernel);
        }
    }
}
