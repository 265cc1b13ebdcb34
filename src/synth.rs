use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::error::{Result, SynthError};
use crate::genotypes::{draw_genotypes, read_genotypes, write_genotypes, Genotype};
use crate::pairing::pair_exact;
use crate::template::{count_records, TemplateReader, TemplateRecord};

pub const FILE_FORMAT: &str = "##fileformat=VCFv4.0";
pub const DEFAULT_SAMPLE: &str = "NA00001";

/// Where the genotype codes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenotypeSource {
    /// Uniform draws. `None` seeds from OS entropy.
    Random(Option<u64>),
    /// Codes saved by an earlier run.
    File(PathBuf),
}

/// Counts reported after a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub records: usize,
    pub missing: usize,
}

/// `Synthesizer` fills one genotype call per template site and writes
/// `<prefix>.txt` (the codes) and `<prefix>.vcf` (the VCF).
pub struct Synthesizer {
    template: PathBuf,
    prefix: String,
    sample: String,
    source: GenotypeSource,
}

impl Synthesizer {
    pub fn new(template: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Synthesizer {
            template: template.into(),
            prefix: prefix.into(),
            sample: DEFAULT_SAMPLE.to_string(),
            source: GenotypeSource::Random(None),
        }
    }

    /// Name of the single sample column.
    pub fn sample(mut self, sample: impl Into<String>) -> Self {
        self.sample = sample.into();
        self
    }

    pub fn source(mut self, source: GenotypeSource) -> Self {
        self.source = source;
        self
    }

    pub fn genotype_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.txt", self.prefix))
    }

    pub fn vcf_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.vcf", self.prefix))
    }

    pub fn run(&self) -> Result<Summary> {
        let n = count_records(&self.template)?;
        info!("{} sites in template {}", n, self.template.display());

        let genotypes = self.genotypes(n)?;
        if genotypes.len() < n {
            return Err(SynthError::GenotypesExhausted {
                records: genotypes.len(),
            });
        }
        if genotypes.len() > n {
            return Err(SynthError::TemplateExhausted { records: n });
        }

        let genotype_path = self.genotype_path();
        let mut wtr = create(&genotype_path)?;
        write_genotypes(&mut wtr, &genotypes)?;
        wtr.flush()?;
        debug!("wrote {}", genotype_path.display());

        let vcf_path = self.vcf_path();
        let mut wtr = create(&vcf_path)?;
        write_header(&mut wtr, &self.sample)?;
        let summary = write_records(
            &mut wtr,
            TemplateReader::from_path(&self.template)?,
            genotypes,
        )?;
        wtr.flush()?;
        info!(
            "wrote {} records ({} missing) to {}",
            summary.records,
            summary.missing,
            vcf_path.display()
        );
        Ok(summary)
    }

    fn genotypes(&self, n: usize) -> Result<Vec<Genotype>> {
        match &self.source {
            GenotypeSource::Random(seed) => {
                let mut rng = match seed {
                    Some(seed) => Xoshiro256PlusPlus::seed_from_u64(*seed),
                    None => Xoshiro256PlusPlus::from_entropy(),
                };
                debug!("drawing {} genotypes (seed: {:?})", n, seed);
                Ok(draw_genotypes(&mut rng, n))
            }
            GenotypeSource::File(path) => {
                let file = File::open(path).map_err(|e| SynthError::open(path, e))?;
                let genotypes = read_genotypes(BufReader::new(file))?;
                debug!("read {} genotypes from {}", genotypes.len(), path.display());
                Ok(genotypes)
            }
        }
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| SynthError::open(path, e))?;
    Ok(BufWriter::new(file))
}

pub fn write_header<W: Write>(wtr: &mut W, sample: &str) -> Result<()> {
    writeln!(wtr, "{}", FILE_FORMAT)?;
    writeln!(
        wtr,
        "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\t{}",
        sample
    )?;
    Ok(())
}

/// Write one substituted line per record. Fails at the first record without a
/// genotype, or if genotypes are left over.
pub fn write_records<W, R, G>(wtr: &mut W, records: R, genotypes: G) -> Result<Summary>
where
    W: Write,
    R: IntoIterator<Item = Result<TemplateRecord>>,
    G: IntoIterator<Item = Genotype>,
{
    let mut summary = Summary::default();
    for pair in pair_exact(records, genotypes) {
        let (record, genotype) = pair?;
        writeln!(wtr, "{}", record.with_genotype(genotype))?;
        summary.records += 1;
        if genotype.is_missing() {
            summary.missing += 1;
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "1\t10\trs1\tA\tC\t.\tPASS\t.\tGT\n\
                            1\t20\trs2\tG\tT\t.\tPASS\t.\tGT\n\
                            1\t30\trs3\tC\tA\t.\tPASS\t.\tGT\n";

    #[test]
    fn test_header() {
        let mut buf = Vec::new();
        write_header(&mut buf, "S1").unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "##fileformat=VCFv4.0\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\n"
        );
    }

    #[test]
    fn test_three_sites() {
        let gts: Vec<_> = [-1, 0, 2]
            .into_iter()
            .map(|c| Genotype::try_from(c).unwrap())
            .collect();
        let mut buf = Vec::new();
        let summary =
            write_records(&mut buf, TemplateReader::new(TEMPLATE.as_bytes()), gts).unwrap();
        assert_eq!(
            summary,
            Summary {
                records: 3,
                missing: 1
            }
        );
        let out = String::from_utf8(buf).unwrap();
        let calls: Vec<String> = out
            .lines()
            .map(|l| {
                let toks: Vec<&str> = l.split('\t').collect();
                assert_eq!(toks.len(), 10);
                format!("{}\t{}", toks[8], toks[9])
            })
            .collect();
        assert_eq!(calls, vec!["GT\t.", "GT\t0", "GT\t2"]);
    }

    #[test]
    fn test_mismatch_is_an_error() {
        let mut buf = Vec::new();
        let err = write_records(
            &mut buf,
            TemplateReader::new(TEMPLATE.as_bytes()),
            vec![Genotype::HomRef],
        )
        .unwrap_err();
        assert!(matches!(err, SynthError::GenotypesExhausted { records: 1 }));
    }

    #[test]
    fn test_output_paths() {
        let s = Synthesizer::new("t.vcf", "out/run1");
        assert_eq!(s.genotype_path(), PathBuf::from("out/run1.txt"));
        assert_eq!(s.vcf_path(), PathBuf::from("out/run1.vcf"));
    }
}
