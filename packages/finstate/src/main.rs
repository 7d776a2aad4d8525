use clap::{Parser, Subcommand};
use colored::Colorize;
use finstate_lib::{
    automaton::Language,
    config::{EngineConfig, GeneralConfig},
    definition::{AutomatonDefinition, AutomatonKind},
};

mod logging;

#[derive(Parser, Debug)]
#[command(name = "finstate")]
#[command(version = "0.1")]
#[command(about = "Build, combine and minimize finite automata", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// TOML file with the engine configuration.
    #[arg(short, long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Checks which of the given words the automaton accepts. Without a
    /// delimiter every character of a word is one symbol.
    Accepts {
        file: String,
        words: Vec<String>,
        #[arg(short, long)]
        delimiter: Option<String>,
    },
    /// Subset construction of an NFA.
    Determinize { file: String },
    Minimize { file: String },
    /// Removes unreachable states.
    Strip { file: String },
    Complement { file: String },
    /// Renames the states to 0..n in breadth-first order.
    Relabel { file: String },
    Stats { file: String },
    Intersect { a: String, b: String },
    Union { a: String, b: String },
    Difference { a: String, b: String },
    /// Concatenation of two NFAs.
    Concat { a: String, b: String },
    /// ε-union of two NFAs.
    UnionNfa { a: String, b: String },
    /// Kleene star of an NFA.
    Star { file: String },
}

fn split_word(word: &str, delimiter: Option<&str>) -> Vec<String> {
    match delimiter {
        _ if word.is_empty() => vec![],
        Some(d) => word.split(d).map(str::to_string).collect(),
        None => word.chars().map(|c| c.to_string()).collect(),
    }
}

fn report(
    language: &impl Language<Letter = String>,
    words: &[String],
    delimiter: Option<&str>,
) -> anyhow::Result<()> {
    for word in words {
        let result = if language.accepts(&split_word(word, delimiter))? {
            "accepted".bright_green()
        } else {
            "rejected".bright_red()
        };
        println!("{:?}: {}", word, result);
    }

    Ok(())
}

fn accepts(
    definition: &AutomatonDefinition,
    words: &[String],
    delimiter: Option<&str>,
) -> anyhow::Result<()> {
    match definition.kind {
        AutomatonKind::Dfa => report(&definition.to_dfa()?, words, delimiter),
        AutomatonKind::Nfa => report(&definition.to_nfa()?, words, delimiter),
    }
}

fn run(command: Command, config: &EngineConfig) -> anyhow::Result<Option<AutomatonDefinition>> {
    let load = |file: &str| AutomatonDefinition::from_file(file);
    let load_dfa = |file: &str| -> anyhow::Result<_> {
        Ok(load(file)?.to_dfa_with(config.get_determinization())?)
    };
    let load_nfa = |file: &str| -> anyhow::Result<_> { Ok(load(file)?.to_nfa()?) };

    let result = match command {
        Command::Accepts {
            file,
            words,
            delimiter,
        } => {
            accepts(&load(&file)?, &words, delimiter.as_deref())?;
            return Ok(None);
        }
        Command::Stats { file } => {
            let definition = load(&file)?;
            let stats = match definition.kind {
                AutomatonKind::Dfa => definition.to_dfa()?.stats(),
                AutomatonKind::Nfa => definition.to_nfa()?.stats(),
            };
            println!("{}", serde_json::to_string_pretty(&stats)?);
            return Ok(None);
        }
        Command::Determinize { file } => load_nfa(&file)?
            .determinize_with(config.get_determinization())?
            .to_definition(),
        Command::Minimize { file } => load_dfa(&file)?
            .minimize_with(config.get_minimization())
            .to_definition(),
        Command::Strip { file } => load_dfa(&file)?.strip().to_definition(),
        Command::Complement { file } => load_dfa(&file)?.complement().to_definition(),
        Command::Relabel { file } => load_dfa(&file)?.relabel().to_definition(),
        Command::Intersect { a, b } => load_dfa(&a)?
            .intersect_with(&load_dfa(&b)?, config.get_algebra())?
            .to_definition(),
        Command::Union { a, b } => load_dfa(&a)?
            .union_with(&load_dfa(&b)?, config.get_algebra())?
            .to_definition(),
        Command::Difference { a, b } => load_dfa(&a)?
            .difference_with(&load_dfa(&b)?, config.get_algebra())?
            .to_definition(),
        Command::Concat { a, b } => load_nfa(&a)?.concat(&load_nfa(&b)?).to_definition(),
        Command::UnionNfa { a, b } => load_nfa(&a)?.union(&load_nfa(&b)?).to_definition(),
        Command::Star { file } => load_nfa(&file)?.star().to_definition(),
    };

    Ok(Some(result))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = EngineConfig::from_optional_file(args.config)?;
    logging::init(config.logger())?;
    tracing::debug!("Running {:?}", args.command);

    if let Some(definition) = run(args.command, &config)? {
        println!("{}", definition.to_json()?);
    }

    Ok(())
}
