//! Character-to-numeral generation.
//!
//! Every numeral in `1..=9999` congruent to a character's code is an equally
//! valid carrier for it. Rather than drawing random numerals until one hits
//! the right residue, the full candidate list for each code is computed once
//! and a [`NumeralSource`] picks from it. This is the same distribution as
//! rejection sampling over `1..=9999`, in bounded time, and a misconfigured
//! modulus fails at construction instead of looping forever.

use std::collections::VecDeque;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::NumeralError;

use super::{MAX_NUMERAL, Modulus, Numeral, NumeralResult};

/// Strategy for choosing among valid numerals.
///
/// Production code uses [`RandomSource`]; tests substitute
/// [`ScriptedSource`] to get exact numerals.
pub trait NumeralSource {
    /// Choose one of `candidates`, which is never empty.
    fn pick(&mut self, code: u32, candidates: &[Numeral]) -> Numeral;
}

/// Uniform choice from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomSource<R> {
    rng: R,
}

impl<R: Rng> RandomSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSource<StdRng> {
    /// Reproducible source for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> NumeralSource for RandomSource<R> {
    fn pick(&mut self, _code: u32, candidates: &[Numeral]) -> Numeral {
        candidates[self.rng.gen_range(0..candidates.len())]
    }
}

/// Deterministic source: the n-th pick takes the candidate at the n-th
/// scripted index (modulo the candidate count). Once the script runs out,
/// the smallest candidate is used.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    script: VecDeque<usize>,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl NumeralSource for ScriptedSource {
    fn pick(&mut self, _code: u32, candidates: &[Numeral]) -> Numeral {
        let index = self.script.pop_front().unwrap_or(0);
        candidates[index % candidates.len()]
    }
}

/// All numerals in `1..=9999`, bucketed by residue.
#[derive(Debug, Clone)]
pub struct CandidateTable {
    modulus: Modulus,
    buckets: Vec<Vec<Numeral>>,
}

impl CandidateTable {
    pub fn new(modulus: Modulus) -> NumeralResult<Self> {
        let m = modulus.get();
        let mut buckets: Vec<Vec<Numeral>> = vec![Vec::new(); m as usize];
        for value in 1..=MAX_NUMERAL {
            buckets[(value as u32 % m) as usize].push(Numeral(value));
        }
        if let Some(code) = buckets.iter().position(|b| b.is_empty()) {
            return Err(NumeralError::NoCandidates {
                code: code as u32,
                modulus: m,
            });
        }

        let smallest = buckets.iter().map(Vec::len).min().unwrap_or(0);
        tracing::debug!(
            modulus = m,
            min_candidates = smallest,
            "built numeral candidate table"
        );

        Ok(Self { modulus, buckets })
    }

    pub fn modulus(&self) -> Modulus {
        self.modulus
    }

    /// Every valid numeral for a character code, ascending.
    pub fn candidates(&self, code: u32) -> Option<&[Numeral]> {
        self.buckets.get(code as usize).map(Vec::as_slice)
    }

    /// Pick a numeral for one character.
    pub fn numeral_for(&self, ch: char, source: &mut dyn NumeralSource) -> NumeralResult<Numeral> {
        let code = ch as u32;
        let candidates = self
            .candidates(code)
            .ok_or_else(|| NumeralError::UnsupportedChar {
                character: ch,
                code,
                modulus: self.modulus.get(),
            })?;
        Ok(source.pick(code, candidates))
    }

    /// One numeral per character of `text`, spaces included.
    pub fn generate(&self, text: &str, source: &mut dyn NumeralSource) -> NumeralResult<Vec<Numeral>> {
        text.chars().map(|ch| self.numeral_for(ch, source)).collect()
    }

    /// Join `words` with single spaces, then [`generate`](Self::generate).
    pub fn generate_words<S: AsRef<str>>(
        &self,
        words: &[S],
        source: &mut dyn NumeralSource,
    ) -> NumeralResult<Vec<Numeral>> {
        let joined = words
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        self.generate(&joined, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascii_table() -> CandidateTable {
        CandidateTable::new(Modulus::ASCII).unwrap()
    }

    #[test]
    fn candidates_share_the_residue() {
        let table = ascii_table();
        let h = table.candidates('h' as u32).unwrap();
        assert_eq!(h[0].value(), 104);
        assert_eq!(h[1].value(), 232);
        assert!(h.iter().all(|n| n.value() % 128 == 104));
        // 9999 = 78 * 128 + 15, so codes above 15 have 78 candidates.
        assert_eq!(h.len(), 78);
    }

    #[test]
    fn code_zero_excludes_numeral_zero() {
        let table = ascii_table();
        let nul = table.candidates(0).unwrap();
        assert_eq!(nul[0].value(), 128);
        assert!(!nul.contains(&Numeral::ZERO));
    }

    #[test]
    fn generated_numerals_satisfy_modular_invariant() {
        let table = ascii_table();
        let mut source = RandomSource::seeded(42);
        let text = "Hello, World! ~\u{7f}\u{0}";
        let numerals = table.generate(text, &mut source).unwrap();
        assert_eq!(numerals.len(), text.chars().count());
        for (n, ch) in numerals.iter().zip(text.chars()) {
            assert_eq!(n.value() as u32 % 128, ch as u32);
            assert!(n.value() >= 1);
        }
    }

    #[test]
    fn scripted_source_gives_exact_numerals() {
        let table = ascii_table();
        let mut source = ScriptedSource::new([2, 0]);
        let numerals = table.generate("hi", &mut source).unwrap();
        assert_eq!(numerals[0].value(), 104 + 2 * 128);
        assert_eq!(numerals[1].value(), 105);
    }

    #[test]
    fn seeded_sources_repeat() {
        let table = ascii_table();
        let a = table.generate("repeat", &mut RandomSource::seeded(7)).unwrap();
        let b = table.generate("repeat", &mut RandomSource::seeded(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn words_are_joined_with_single_space() {
        let table = ascii_table();
        let numerals = table
            .generate_words(&["ab", "c"], &mut ScriptedSource::default())
            .unwrap();
        let codes: Vec<u32> = numerals.iter().map(|n| n.value() as u32 % 128).collect();
        assert_eq!(codes, vec![97, 98, 32, 99]);
    }

    #[test]
    fn out_of_range_character_is_rejected() {
        let table = ascii_table();
        let err = table
            .generate("caf\u{e9}", &mut ScriptedSource::default())
            .unwrap_err();
        assert!(matches!(
            err,
            NumeralError::UnsupportedChar { code: 233, modulus: 128, .. }
        ));
    }

    #[test]
    fn largest_modulus_has_a_candidate_per_code() {
        let table = CandidateTable::new(Modulus::new(9999).unwrap()).unwrap();
        assert_eq!(table.candidates(0).unwrap(), &[Numeral(9999)]);
        assert_eq!(table.candidates(9998).unwrap(), &[Numeral(9998)]);
    }
}
