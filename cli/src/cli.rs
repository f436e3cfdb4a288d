use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "oxmanchester")]
/// Manchester OWL Syntax command line toolkit
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse a Manchester OWL Syntax document and report what it contains
    ///
    /// The exit code is 1 if the document is not valid.
    Check {
        /// File to parse
        ///
        /// If no file is given, stdin is read.
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        #[command(flatten)]
        options: ParseOptions,
    },
    /// Parse a Manchester OWL Syntax document and write it back in a normalized form
    ///
    /// Entities get one frame each, sorted by kind then by name.
    Render {
        /// File to parse
        ///
        /// If no file is given, stdin is read.
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// File to write the output to
        ///
        /// If no file is given, stdout is written.
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
        #[command(flatten)]
        options: ParseOptions,
    },
}

#[derive(clap::Args)]
pub struct ParseOptions {
    /// Accept names that are not declared, creating the entity the context requires
    #[arg(long)]
    pub lenient: bool,
    /// Prefix to declare before parsing, written name=iri
    ///
    /// The name has no trailing ':'. Use '=iri' to declare the empty prefix.
    /// The document can redeclare it.
    #[arg(long, value_name = "NAME=IRI")]
    pub prefix: Vec<String>,
    /// Manchester OWL Syntax document whose declarations are used to resolve names
    ///
    /// This ontology is only read, its axioms are not part of the output.
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub default_ontology: Option<PathBuf>,
    /// Maximum nesting depth of class expressions and data ranges
    #[arg(long, default_value_t = 100)]
    pub max_depth: usize,
}
