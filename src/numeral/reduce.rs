//! Numeral-to-character reduction.

use crate::error::NumeralError;

use super::{Modulus, Numeral, NumeralResult};

/// The character whose code is `numeral mod M`.
pub fn reduce(numeral: Numeral, modulus: Modulus) -> NumeralResult<char> {
    let code = numeral.value() as u32 % modulus.get();
    char::from_u32(code).ok_or(NumeralError::InvalidChar { code })
}

/// Reduce a whole sequence into a string.
pub fn reduce_all(numerals: &[Numeral], modulus: Modulus) -> NumeralResult<String> {
    numerals.iter().map(|&n| reduce(n, modulus)).collect()
}
