#![allow(clippy::print_stdout)]
use crate::cli::{Args, Command, ParseOptions};
use anyhow::{Context, bail};
use clap::Parser;
use oxmanchester::{ManchesterFormat, ManchesterParser, ManchesterSerializer, ParserConfig};
use oxowl::Ontology;
use std::fs::File;
use std::io::{self, BufWriter, Write, stdin, stdout};
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod cli;

pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let matches = Args::parse();
    match matches.command {
        Command::Check { file, options } => {
            let mut ontology = Ontology::new(None);
            let format = parse(file.as_deref(), &options, &mut ontology)?;
            println!(
                "{format} document with {} axioms",
                ontology.axiom_count()
            );
            if let Some(iri) = ontology.iri() {
                println!("Ontology: {iri}");
            }
            for (label, count) in [
                ("Classes", ontology.classes().count()),
                ("Object properties", ontology.object_properties().count()),
                ("Data properties", ontology.data_properties().count()),
                (
                    "Annotation properties",
                    ontology.annotation_properties().count(),
                ),
                ("Individuals", ontology.individuals().count()),
                ("Datatypes", ontology.datatypes().count()),
            ] {
                if count > 0 {
                    println!("{label}: {count}");
                }
            }
            Ok(())
        }
        Command::Render {
            file,
            output,
            options,
        } => {
            let mut ontology = Ontology::new(None);
            let format = parse(file.as_deref(), &options, &mut ontology)?;
            let serializer = ManchesterSerializer::new().with_prefixes(format.prefixes());
            if let Some(output) = output {
                close_file_writer(serializer.serialize_to_write(
                    &ontology,
                    BufWriter::new(
                        File::create(&output)
                            .with_context(|| format!("Failed to create {}", output.display()))?,
                    ),
                )?)
            } else {
                serializer
                    .serialize_to_write(&ontology, stdout().lock())?
                    .flush()
            }?;
            Ok(())
        }
    }
}

fn parse(
    file: Option<&Path>,
    options: &ParseOptions,
    ontology: &mut Ontology,
) -> anyhow::Result<ManchesterFormat> {
    let default_ontology = if let Some(path) = &options.default_ontology {
        let mut default_ontology = Ontology::new(None);
        parser(options, None)?
            .parse_read(
                File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
                &mut default_ontology,
            )
            .with_context(|| {
                format!("Failed to parse the default ontology {}", path.display())
            })?;
        debug!(
            "Loaded {} axioms from the default ontology {}",
            default_ontology.axiom_count(),
            path.display()
        );
        Some(default_ontology)
    } else {
        None
    };
    let parser = parser(options, default_ontology.as_ref())?;
    let format = if let Some(file) = file {
        parser
            .parse_read(
                File::open(file).with_context(|| format!("Failed to open {}", file.display()))?,
                ontology,
            )
            .with_context(|| format!("Failed to parse {}", file.display()))?
    } else {
        parser
            .parse_read(stdin().lock(), ontology)
            .context("Failed to parse stdin")?
    };
    info!("{} axioms parsed", ontology.axiom_count());
    Ok(format)
}

fn parser<'a>(
    options: &ParseOptions,
    default_ontology: Option<&'a Ontology>,
) -> anyhow::Result<ManchesterParser<'a>> {
    let mut config = ParserConfig::new().with_max_depth(options.max_depth);
    if options.lenient {
        config = config.lenient();
    }
    let mut parser = ManchesterParser::new().with_config(config);
    for prefix in &options.prefix {
        let Some((name, iri)) = prefix.split_once('=') else {
            bail!("The prefix {prefix} must be written name=iri");
        };
        parser = parser
            .with_prefix(name, iri)
            .with_context(|| format!("The prefix IRI {iri} is invalid"))?;
    }
    if let Some(default_ontology) = default_ontology {
        parser = parser.with_default_ontology(default_ontology);
    }
    Ok(parser)
}

fn close_file_writer(writer: BufWriter<File>) -> io::Result<()> {
    let mut file = writer
        .into_inner()
        .map_err(io::IntoInnerError::into_error)?;
    file.flush()?;
    file.sync_all()
}
