use crate::error::{Result, SynthError};

/// Walks template records and genotype codes in lock step. The first time one
/// side runs out before the other, an error is yielded and the iterator ends.
pub struct ExactPairs<A, B> {
    records: A,
    genotypes: B,
    paired: usize,
    done: bool,
}

pub fn pair_exact<A, B>(records: A, genotypes: B) -> ExactPairs<A::IntoIter, B::IntoIter>
where
    A: IntoIterator,
    B: IntoIterator,
{
    ExactPairs {
        records: records.into_iter(),
        genotypes: genotypes.into_iter(),
        paired: 0,
        done: false,
    }
}

impl<A, B> ExactPairs<A, B> {
    /// Number of pairs yielded so far.
    pub fn paired(&self) -> usize {
        self.paired
    }
}

impl<A, B, T, U> Iterator for ExactPairs<A, B>
where
    A: Iterator<Item = Result<T>>,
    B: Iterator<Item = U>,
{
    type Item = Result<(T, U)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match (self.records.next(), self.genotypes.next()) {
            (Some(Err(e)), _) => {
                self.done = true;
                Some(Err(e))
            }
            (Some(Ok(record)), Some(genotype)) => {
                self.paired += 1;
                Some(Ok((record, genotype)))
            }
            (Some(Ok(_)), None) => {
                self.done = true;
                Some(Err(SynthError::GenotypesExhausted {
                    records: self.paired,
                }))
            }
            (None, Some(_)) => {
                self.done = true;
                Some(Err(SynthError::TemplateExhausted {
                    records: self.paired,
                }))
            }
            (None, None) => {
                self.done = true;
                None
            }
        }
    }
}
