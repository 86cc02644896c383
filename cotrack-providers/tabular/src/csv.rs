//! CSV writers with RFC 4180 quoting.

use std::{borrow::Cow, io::Write};

use crate::{
    errors::TabularExportError,
    rows::{EdgeRow, NodeRow},
};

const NODE_HEADER: &str = "id,label";
const EDGE_HEADER: &str = "source,target,weight,label";

/// Writes a node table with an `id,label` header.
///
/// # Errors
/// Returns [`TabularExportError::Io`] when the writer fails.
///
/// # Examples
/// ```
/// use cotrack_providers_tabular::{NodeRow, write_nodes_csv};
///
/// let mut out = Vec::new();
/// write_nodes_csv(&mut out, &[NodeRow { id: 0, label: "Hello, Goodbye".into() }])?;
/// assert_eq!(String::from_utf8(out)?, "id,label\r\n0,\"Hello, Goodbye\"\r\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_nodes_csv<W: Write>(mut writer: W, rows: &[NodeRow]) -> Result<(), TabularExportError> {
    write!(writer, "{NODE_HEADER}\r\n")?;
    for row in rows {
        write!(writer, "{},{}\r\n", row.id, quote(&row.label))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes an edge table with a `source,target,weight,label` header.
///
/// # Errors
/// Returns [`TabularExportError::Io`] when the writer fails.
pub fn write_edges_csv<W: Write>(mut writer: W, rows: &[EdgeRow]) -> Result<(), TabularExportError> {
    write!(writer, "{EDGE_HEADER}\r\n")?;
    for row in rows {
        write!(
            writer,
            "{},{},{},{}\r\n",
            row.source,
            row.target,
            row.weight,
            quote(&row.label)
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Quotes `field` when it contains a delimiter, a quote or a line break.
fn quote(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case("plain", "plain")]
    #[case("", "")]
    #[case("a,b", "\"a,b\"")]
    #[case("say \"hi\"", "\"say \"\"hi\"\"\"")]
    #[case("line\nbreak", "\"line\nbreak\"")]
    #[case("carriage\rreturn", "\"carriage\rreturn\"")]
    fn quotes_only_when_needed(#[case] field: &str, #[case] expected: &str) {
        assert_eq!(quote(field), expected);
    }

    #[rstest]
    fn edge_table_has_header_and_rows() {
        let rows = vec![
            EdgeRow {
                source: 0,
                target: 1,
                weight: 2,
                label: "2".into(),
            },
            EdgeRow {
                source: 0,
                target: 2,
                weight: 12,
                label: "12".into(),
            },
        ];
        let mut out = Vec::new();
        write_edges_csv(&mut out, &rows).expect("write to memory");
        assert_eq!(
            String::from_utf8(out).expect("utf-8"),
            "source,target,weight,label\r\n0,1,2,2\r\n0,2,12,12\r\n"
        );
    }

    #[rstest]
    fn empty_tables_still_have_headers() {
        let mut out = Vec::new();
        write_nodes_csv(&mut out, &[]).expect("write to memory");
        assert_eq!(out, b"id,label\r\n");
    }
}
