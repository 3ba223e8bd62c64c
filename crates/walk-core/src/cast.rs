//! Oracle casting.
//!
//! Three-coin tosses build a six-line cast; the cast derives an
//! earthly/heavenly hexagram pair and the list of changing lines.

use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single cast line.
///
/// 6 = changing yin, 7 = stable yang, 8 = stable yin, 9 = changing yang.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastLine {
    ChangingYin,
    StableYang,
    StableYin,
    ChangingYang,
}

impl CastLine {
    /// Traditional line value in {6,7,8,9}.
    pub fn value(self) -> u8 {
        match self {
            CastLine::ChangingYin => 6,
            CastLine::StableYang => 7,
            CastLine::StableYin => 8,
            CastLine::ChangingYang => 9,
        }
    }

    pub fn from_value(value: u8) -> Option<CastLine> {
        match value {
            6 => Some(CastLine::ChangingYin),
            7 => Some(CastLine::StableYang),
            8 => Some(CastLine::StableYin),
            9 => Some(CastLine::ChangingYang),
            _ => None,
        }
    }

    /// Changing lines flip between the earthly and heavenly readings.
    pub fn is_changing(self) -> bool {
        matches!(self, CastLine::ChangingYin | CastLine::ChangingYang)
    }

    /// Bit in the earthly hexagram: lines that read yang now.
    pub fn earthly_bit(self) -> char {
        match self {
            CastLine::ChangingYang | CastLine::StableYang => '1',
            CastLine::ChangingYin | CastLine::StableYin => '0',
        }
    }

    /// Bit in the heavenly hexagram: lines that read yang after change.
    pub fn heavenly_bit(self) -> char {
        match self {
            CastLine::StableYang | CastLine::ChangingYin => '1',
            CastLine::StableYin | CastLine::ChangingYang => '0',
        }
    }
}

/// Three independent fair coins, 2 for tails and 3 for heads, summed.
/// Yields 6/7/8/9 with probabilities 1/8, 3/8, 3/8, 1/8.
pub fn toss_coins(rng: &mut SmallRng) -> CastLine {
    let mut sum = 0u8;
    for _ in 0..3 {
        sum += if rng.gen_bool(0.5) { 3 } else { 2 };
    }
    CastLine::from_value(sum).expect("three coins always sum to 6..=9")
}

/// A complete six-line cast, index 0 = bottom line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cast {
    lines: [CastLine; 6],
}

impl Cast {
    /// Casts six lines. Tosses run top-to-bottom; the stored order puts
    /// the bottom line first.
    pub fn generate(rng: &mut SmallRng) -> Cast {
        let mut lines = [CastLine::StableYang; 6];
        for slot in lines.iter_mut() {
            *slot = toss_coins(rng);
        }
        lines.reverse();
        Cast { lines }
    }

    /// Builds a cast from traditional line values, bottom line first.
    pub fn from_values(values: [u8; 6]) -> Option<Cast> {
        let mut lines = [CastLine::StableYang; 6];
        for (slot, &value) in lines.iter_mut().zip(values.iter()) {
            *slot = CastLine::from_value(value)?;
        }
        Some(Cast { lines })
    }

    pub fn lines(&self) -> &[CastLine; 6] {
        &self.lines
    }

    pub fn values(&self) -> [u8; 6] {
        let mut values = [0u8; 6];
        for (slot, line) in values.iter_mut().zip(self.lines.iter()) {
            *slot = line.value();
        }
        values
    }
}

/// The pair of hexagrams derived from a cast, plus the changing lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Six-bit key, bottom line first
    pub earthly: String,
    /// Six-bit key, bottom line first
    pub heavenly: String,
    /// 1-indexed changing-line positions, bottom to top
    pub changing_lines: Vec<u8>,
}

impl Reading {
    pub fn derive(cast: &Cast) -> Reading {
        let mut earthly = String::with_capacity(6);
        let mut heavenly = String::with_capacity(6);
        let mut changing_lines = Vec::new();
        for (i, line) in cast.lines().iter().enumerate() {
            earthly.push(line.earthly_bit());
            heavenly.push(line.heavenly_bit());
            if line.is_changing() {
                changing_lines.push(i as u8 + 1);
            }
        }
        Reading {
            earthly,
            heavenly,
            changing_lines,
        }
    }

    /// With no changing lines both hexagrams resolve to the same
    /// identity; no movement plan comes out of such a reading.
    pub fn is_degenerate(&self) -> bool {
        self.earthly == self.heavenly
    }
}
