pub mod error;
pub mod genotypes;
pub mod pairing;
pub mod synth;
pub mod template;

pub use error::{Result, SynthError};
pub use genotypes::Genotype;
pub use synth::{GenotypeSource, Summary, Synthesizer};
