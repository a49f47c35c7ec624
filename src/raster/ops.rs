//! Raster operations: overlay and difference.
//!
//! Each operation is dispatched through the SIMD kernel.

use crate::error::RasterError;
use crate::simd::RasterKernel;

use super::{Raster, RasterResult};

/// Ensure two rasters share the same dimensions.
fn check_compatible(a: &Raster, b: &Raster) -> RasterResult<()> {
    if !a.same_size(b) {
        return Err(RasterError::SizeMismatch {
            expected_width: a.width(),
            expected_height: a.height(),
            actual_width: b.width(),
            actual_height: b.height(),
        });
    }
    Ok(())
}

/// Raster operations backed by a SIMD kernel.
pub struct RasterOps {
    kernel: Box<dyn RasterKernel>,
}

impl RasterOps {
    pub fn new(kernel: Box<dyn RasterKernel>) -> Self {
        Self { kernel }
    }

    /// The SIMD instruction set level this kernel uses.
    pub fn isa_level(&self) -> crate::simd::IsaLevel {
        self.kernel.isa_level()
    }

    /// Pixel-wise AND: the result carries the ink of both inputs.
    pub fn and(&self, a: &Raster, b: &Raster) -> RasterResult<Raster> {
        check_compatible(a, b)?;
        let mut out = vec![0u8; a.data().len()];
        self.kernel.and_combine(a.data(), b.data(), &mut out);
        Ok(Raster::from_raw(out, a.width(), a.height()))
    }

    /// AND of any number of rasters. An empty slice has no defined size,
    /// so it yields `None`.
    pub fn and_all(&self, rasters: &[&Raster]) -> RasterResult<Option<Raster>> {
        let Some((first, rest)) = rasters.split_first() else {
            return Ok(None);
        };
        let mut acc = (*first).clone();
        for r in rest {
            acc = self.and(&acc, r)?;
        }
        Ok(Some(acc))
    }

    /// Number of differing pixels.
    pub fn difference(&self, a: &Raster, b: &Raster) -> RasterResult<u32> {
        check_compatible(a, b)?;
        Ok(self.kernel.difference_count(a.data(), b.data()))
    }

    /// Exact pixel equality: a difference of zero.
    pub fn equal(&self, a: &Raster, b: &Raster) -> RasterResult<bool> {
        Ok(self.difference(a, b)? == 0)
    }
}

impl Default for RasterOps {
    fn default() -> Self {
        Self::new(crate::simd::best_kernel())
    }
}

impl std::fmt::Debug for RasterOps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterOps")
            .field("isa", &self.kernel.isa_level())
            .finish()
    }
}
