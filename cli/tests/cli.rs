#![allow(clippy::panic_in_result_fn)]

use anyhow::Result;
use assert_cmd::Command;
use assert_fs::NamedTempFile;
use assert_fs::prelude::*;
use predicates::prelude::*;

const ANIMALS: &str = "Prefix: : <http://ex.org/>
Ontology: <http://ex.org/onto>
Class: :Dog
    SubClassOf: :Animal
Class: :Animal
";

fn cli_command() -> Result<Command> {
    Ok(Command::cargo_bin("oxmanchester")?)
}

#[test]
fn cli_help() -> Result<()> {
    cli_command()?
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::starts_with("Manchester OWL Syntax"));
    Ok(())
}

#[test]
fn cli_check_file() -> Result<()> {
    let input = NamedTempFile::new("animals.omn")?;
    input.write_str(ANIMALS)?;
    cli_command()?
        .arg("check")
        .arg("--file")
        .arg(input.path())
        .assert()
        .success()
        .stdout(
            "Manchester OWL Syntax document with 3 axioms\nOntology: <http://ex.org/onto>\nClasses: 2\n",
        );
    Ok(())
}

#[test]
fn cli_check_stdin() -> Result<()> {
    cli_command()?
        .arg("check")
        .write_stdin(ANIMALS)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 axioms"));
    Ok(())
}

#[test]
fn cli_check_invalid_document() -> Result<()> {
    cli_command()?
        .arg("check")
        .write_stdin("Class: :A\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse stdin"))
        .stderr(predicate::str::contains(
            "Expected either 'Ontology:' or 'Prefix:'",
        ));
    Ok(())
}

#[test]
fn cli_check_unknown_entity() -> Result<()> {
    let document = "Prefix: : <http://ex.org/>\nOntology: <http://ex.org/onto>\nClass: :A\n    SubClassOf: :B\n";
    cli_command()?
        .arg("check")
        .write_stdin(document)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 4 column 17"));
    cli_command()?
        .arg("check")
        .arg("--lenient")
        .write_stdin(document)
        .assert()
        .success()
        .stdout(predicate::str::contains("Classes: 2"));
    Ok(())
}

#[test]
fn cli_check_with_prefix() -> Result<()> {
    cli_command()?
        .arg("check")
        .arg("--prefix")
        .arg("ex=http://ex.org/")
        .write_stdin("Ontology: <http://ex.org/onto>\nClass: ex:A\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Classes: 1"));
    cli_command()?
        .arg("check")
        .arg("--prefix")
        .arg("ex")
        .write_stdin("Ontology: <http://ex.org/onto>\nClass: ex:A\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be written name=iri"));
    Ok(())
}

#[test]
fn cli_check_with_default_ontology() -> Result<()> {
    let default_ontology = NamedTempFile::new("default.omn")?;
    default_ontology.write_str(ANIMALS)?;
    cli_command()?
        .arg("check")
        .arg("--default-ontology")
        .arg(default_ontology.path())
        .write_stdin(
            "Prefix: : <http://ex.org/>\nOntology: <http://ex.org/pets>\nClass: :Cat\n    SubClassOf: :Animal\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("2 axioms"));
    Ok(())
}

#[test]
fn cli_check_max_depth() -> Result<()> {
    cli_command()?
        .arg("check")
        .arg("--max-depth")
        .arg("2")
        .write_stdin(
            "Prefix: : <http://ex.org/>\nOntology: <http://ex.org/onto>\nClass: :A\n    SubClassOf: not (not (not :A))\n",
        )
        .assert()
        .failure()
        .stderr(predicate::str::contains("Maximum nesting depth"));
    Ok(())
}

#[test]
fn cli_render() -> Result<()> {
    cli_command()?
        .arg("render")
        .write_stdin(ANIMALS)
        .assert()
        .success()
        .stdout(predicate::str::contains("Prefix: : <http://ex.org/>\n"))
        .stdout(predicate::str::contains("Ontology: <http://ex.org/onto>\n"))
        .stdout(predicate::str::contains(
            "Class: :Dog\n    SubClassOf: :Animal\n",
        ));
    Ok(())
}

#[test]
fn cli_render_to_file_and_check_again() -> Result<()> {
    let output = NamedTempFile::new("rendered.omn")?;
    cli_command()?
        .arg("render")
        .arg("--output")
        .arg(output.path())
        .write_stdin(ANIMALS)
        .assert()
        .success()
        .stdout("");
    output.assert(predicate::str::contains("Class: :Animal"));
    cli_command()?
        .arg("check")
        .arg("--file")
        .arg(output.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("3 axioms"));
    Ok(())
}

#[test]
fn cli_logging() -> Result<()> {
    cli_command()?
        .arg("check")
        .env("RUST_LOG", "info")
        .write_stdin(ANIMALS)
        .assert()
        .success()
        .stderr(predicate::str::contains("3 axioms parsed"));
    Ok(())
}
