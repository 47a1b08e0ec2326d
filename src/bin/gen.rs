//! iptrule-gen: CLI tool for generating iptables rule fragments from YAML rule specs.

use clap::{Parser, Subcommand};
use iptrule::{
    ExplicitModuleFormatter, ImplicitFlagFormatter, JsonRegistrar, RuleGenerator, RulesFile,
};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "iptrule-gen")]
#[command(author = "Kaitu.io")]
#[command(version = "0.1.0")]
#[command(about = "Generate iptables rule fragments from YAML rule specs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate rule fragments and write them as JSON resource batches
    Generate {
        /// Input YAML file with a `rules` list
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate rule specs and report how many rules each would produce
    Check {
        /// Input YAML file with a `rules` list
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            verbose,
        } => {
            if let Err(e) = generate(&input, output.as_ref(), verbose) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Check { input } => {
            if let Err(e) = check(&input) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn generate(
    input: &PathBuf,
    output: Option<&PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if verbose {
        eprintln!("Reading input file: {:?}", input);
    }

    let file = RulesFile::load(input)?;
    let implicit = ImplicitFlagFormatter::new();
    let explicit = ExplicitModuleFormatter::new();
    let generator = RuleGenerator::with_config(&implicit, &explicit, file.config);

    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(io::BufWriter::new(fs::File::create(path)?)),
        None => Box::new(io::stdout()),
    };
    let mut registrar = JsonRegistrar::new(writer);

    let mut total = 0;
    for params in file.rules {
        let name = params.name.clone();
        let resources = generator.add_cartesian_rules(params, &mut registrar)?;
        if verbose {
            eprintln!("  {}: {} rules", name, resources.len());
            for rule in &resources {
                eprint!("    {}", rule.content);
            }
        }
        total += resources.len();
    }

    registrar.into_inner().flush()?;

    if let Some(path) = output {
        eprintln!("Generated {} rules -> {:?}", total, path);
    }
    Ok(())
}

fn check(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let file = RulesFile::load(input)?;
    let implicit = ImplicitFlagFormatter::new();
    let explicit = ExplicitModuleFormatter::new();
    let generator = RuleGenerator::with_config(&implicit, &explicit, file.config.clone());

    for summary in file.check(&generator)? {
        println!(
            "{} (IPv{}): {} rules from {} address pairs",
            summary.name, summary.ip_version, summary.rules, summary.pairs
        );
    }
    Ok(())
}
