use std::fmt;
use std::io::{BufRead, Write};

use rand::Rng;

use crate::error::{Result, SynthError};

/// A single-sample genotype call as carried in the genotype file.
/// Any negative code is a missing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genotype {
    Missing,
    HomRef,
    Het,
    HomAlt,
}

impl Genotype {
    /// The integer code written to the genotype file.
    pub fn code(&self) -> i32 {
        match self {
            Genotype::Missing => -1,
            Genotype::HomRef => 0,
            Genotype::Het => 1,
            Genotype::HomAlt => 2,
        }
    }

    /// The GT value used in the VCF sample column.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Genotype::Missing)
    }
}

impl TryFrom<i32> for Genotype {
    type Error = i32;

    fn try_from(code: i32) -> std::result::Result<Self, Self::Error> {
        match code {
            c if c < 0 => Ok(Genotype::Missing),
            0 => Ok(Genotype::HomRef),
            1 => Ok(Genotype::Het),
            2 => Ok(Genotype::HomAlt),
            c => Err(c),
        }
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Genotype::Missing => write!(f, "."),
            g => write!(f, "{}", g.code()),
        }
    }
}

/// Draw `n` genotypes uniformly from {0,1,2} shifted down by one, so the
/// result only ever holds missing, hom-ref and het calls.
pub fn draw_genotypes<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<Genotype> {
    (0..n)
        .map(|_| match rng.gen_range(0..3u8) {
            0 => Genotype::Missing,
            1 => Genotype::HomRef,
            _ => Genotype::Het,
        })
        .collect()
}

pub fn write_genotypes<W: Write>(writer: &mut W, genotypes: &[Genotype]) -> Result<()> {
    for g in genotypes {
        writeln!(writer, "{}", g.code())?;
    }
    Ok(())
}

/// Any negative integer is missing, however large its magnitude.
fn parse_code(tok: &str) -> Option<Genotype> {
    if let Some(digits) = tok.strip_prefix('-') {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if digits.bytes().all(|b| b == b'0') {
            return Some(Genotype::HomRef);
        }
        return Some(Genotype::Missing);
    }
    tok.parse::<i32>()
        .ok()
        .and_then(|c| Genotype::try_from(c).ok())
}

/// Read whitespace-separated genotype codes. Line numbers in errors are 1-based.
pub fn read_genotypes<R: BufRead>(reader: R) -> Result<Vec<Genotype>> {
    let mut genotypes = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        for tok in line.split_ascii_whitespace() {
            let g = parse_code(tok).ok_or_else(|| SynthError::InvalidGenotype {
                    line: i + 1,
                    value: tok.to_string(),
                })?;
            genotypes.push(g);
        }
    }
    Ok(genotypes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_encode_negative_is_missing() {
        for code in [-1, -2, -100] {
            let g = Genotype::try_from(code).unwrap();
            assert_eq!(g.encode(), ".");
        }
    }

    #[test]
    fn test_encode_non_negative_is_decimal() {
        for code in 0..=2 {
            let g = Genotype::try_from(code).unwrap();
            assert_eq!(g.encode(), code.to_string());
            assert_eq!(g.code(), code);
        }
    }

    #[test]
    fn test_code_above_two_rejected() {
        assert_eq!(Genotype::try_from(3), Err(3));
    }

    #[test]
    fn test_draws_stay_in_shifted_range() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let gts = draw_genotypes(&mut rng, 1000);
        assert_eq!(gts.len(), 1000);
        assert!(gts.iter().all(|g| (-1..=1).contains(&g.code())));
        // all three values show up in a thousand draws
        for code in -1..=1 {
            assert!(gts.iter().any(|g| g.code() == code));
        }
    }

    #[test]
    fn test_same_seed_same_draws() {
        let a = draw_genotypes(&mut Xoshiro256PlusPlus::seed_from_u64(7), 50);
        let b = draw_genotypes(&mut Xoshiro256PlusPlus::seed_from_u64(7), 50);
        assert_eq!(a, b);
    }

    #[test]
    fn test_write_then_read() {
        let gts = vec![Genotype::Missing, Genotype::HomRef, Genotype::HomAlt];
        let mut buf = Vec::new();
        write_genotypes(&mut buf, &gts).unwrap();
        assert_eq!(String::from_utf8(buf.clone()).unwrap(), "-1\n0\n2\n");
        assert_eq!(read_genotypes(&buf[..]).unwrap(), gts);
    }

    #[test]
    fn test_read_reports_bad_line() {
        let err = read_genotypes("0\n1\nx\n".as_bytes()).unwrap_err();
        match err {
            SynthError::InvalidGenotype { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "x");
            }
            e => panic!("unexpected error: {}", e),
        }
    }

    #[test]
    fn test_read_out_of_range_negative_is_missing() {
        let gts = read_genotypes("-3000000000\n-1\n-0\n".as_bytes()).unwrap();
        assert_eq!(
            gts,
            vec![Genotype::Missing, Genotype::Missing, Genotype::HomRef]
        );
        assert!(read_genotypes("-\n".as_bytes()).is_err());
        assert!(read_genotypes("-1x\n".as_bytes()).is_err());
    }

    #[test]
    fn test_read_empty() {
        assert!(read_genotypes("".as_bytes()).unwrap().is_empty());
    }
}
