use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mimalloc::MiMalloc;
use vcfsynth::{GenotypeSource, Synthesizer};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser, Debug)]
#[command(version, about = "Fill random or saved genotype calls into a VCF site template")]
struct Cli {
    /// Template of tab-separated VCF sites, one per line.
    template: PathBuf,

    /// Output prefix; writes <prefix>.txt and <prefix>.vcf.
    prefix: String,

    /// Seed for the genotype draws. Runs with the same seed are identical.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Reuse genotype codes from an earlier <prefix>.txt instead of drawing.
    #[arg(short, long, conflicts_with = "seed")]
    genotypes: Option<PathBuf>,

    /// Sample name for the VCF header.
    #[arg(long, default_value = vcfsynth::synth::DEFAULT_SAMPLE)]
    sample: String,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Cli::parse();

    let source = match args.genotypes {
        Some(path) => GenotypeSource::File(path),
        None => GenotypeSource::Random(args.seed),
    };
    let synth = Synthesizer::new(args.template, args.prefix)
        .sample(args.sample)
        .source(source);

    match synth.run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
