//! Line oriented pre-pass rejecting documents that do not look like Manchester Syntax.

use crate::toolkit::{ManchesterErrorKind, ManchesterParseError, ManchesterSyntaxError, TextPosition};
use std::io::BufRead;
use tracing::trace;

const MAGIC_NUMBERS: [&str; 2] = ["Ontology:", "Prefix:"];

/// Reads the whole source and checks its first significant line.
///
/// The first line that is neither blank nor a `#` comment must contain `Ontology:` or `Prefix:`
/// somewhere. Later lines are not checked. All lines are returned joined with `\n`.
///
/// A read failure, including invalid UTF-8, is returned as [`ManchesterParseError::Io`]
/// and the lines read so far are dropped.
///
/// ```
/// use oxmanchester::{preflight, ManchesterErrorKind};
///
/// let text = preflight::scan("# comment\n\nOntology: <http://ex.org/onto>\r\n".as_bytes())?;
/// assert_eq!(text, "# comment\n\nOntology: <http://ex.org/onto>\n");
///
/// let error = preflight::scan("  Class: :A\n".as_bytes()).unwrap_err();
/// assert_eq!(error.kind(), ManchesterErrorKind::PreflightFormat);
/// assert_eq!((error.line(), error.column()), (1, 3));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub fn scan(mut read: impl BufRead) -> Result<String, ManchesterParseError> {
    let mut buffer = String::new();
    let mut line = String::new();
    let mut line_number = 0;
    let mut found_magic_number = false;
    loop {
        line.clear();
        if read.read_line(&mut line)? == 0 {
            break;
        }
        line_number += 1;
        let content = line.strip_suffix('\n').unwrap_or(&line);
        let content = content.strip_suffix('\r').unwrap_or(content);
        if !found_magic_number {
            let trimmed = content.trim_matches(|c: char| c <= ' ');
            if !trimmed.is_empty() && !trimmed.starts_with('#') {
                if !MAGIC_NUMBERS.iter().any(|m| content.contains(m)) {
                    let leading = content.len() - content.trim_start_matches(|c: char| c <= ' ').len();
                    let column = content[..leading].chars().count() as u64 + 1;
                    return Err(ManchesterSyntaxError::new(
                        ManchesterErrorKind::PreflightFormat,
                        TextPosition {
                            line: line_number,
                            column,
                            offset: (buffer.len() + leading) as u64,
                        },
                        format!(
                            "Encountered '{trimmed}' at line {line_number} column {column}.  Expected either 'Ontology:' or 'Prefix:'"
                        ),
                    )
                    .into());
                }
                trace!("Found the document header at line {line_number}");
                found_magic_number = true;
            }
        }
        buffer.push_str(content);
        buffer.push('\n');
    }
    Ok(buffer)
}
