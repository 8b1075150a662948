//! functions for reading and writing ranked results files
//!
//! File format (shared by search outputs and ground truth files):
//! - line 1: number of queries
//! - line 2: number of results per query
//! - one line per query: `id:score,id:score,...,` (note the trailing comma)

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use itertools::Itertools;
use ndarray::{Array1, Array2, ArrayView1};

use crate::error::ParseError;

/// identifier of a retrieved item
pub type Id = i64;

const HEADER_LINES: usize = 2;

/// the two header lines of a results file, when they hold integers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub num_queries: usize,
    pub top_k: usize,
}

/// ranked ids per query, one row per query and one column per rank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMatrix {
    ids: Array2<Id>,
    header: Option<Header>,
}

impl ResultMatrix {
    /// Builds a matrix from in-memory rows. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<Id>>) -> Result<ResultMatrix, ParseError> {
        Self::assemble(rows.into_iter().enumerate().collect_vec(), None)
    }

    /// Reads a results file. See the module docs for the format.
    pub fn read(path: &Path) -> Result<ResultMatrix, ParseError> {
        let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parses the contents of a results file.
    ///
    /// Only the integer before the first `:` of each field is kept; the score
    /// after it and the last (empty) field of each line are discarded, as is a
    /// second empty field right before it (`5:0.1,9:0.2,,`).
    pub fn parse(text: &str) -> Result<ResultMatrix, ParseError> {
        let lines = text.lines().collect_vec();
        if lines.len() < HEADER_LINES {
            return Err(ParseError::MissingHeader { found: lines.len() });
        }

        let header = parse_header(lines[0], lines[1]);

        let mut rows = Vec::with_capacity(lines.len() - HEADER_LINES);
        for (i, line) in lines.iter().enumerate().skip(HEADER_LINES) {
            // 1-based line numbers for error messages
            rows.push((i + 1, parse_line(i + 1, line)?));
        }

        let matrix = Self::assemble(rows, header)?;

        if let Some(h) = header {
            if h.num_queries != matrix.num_queries() || h.top_k != matrix.num_ranks() {
                log::warn!(
                    "header says {} queries x {} results, parsed {} x {}",
                    h.num_queries,
                    h.top_k,
                    matrix.num_queries(),
                    matrix.num_ranks()
                );
            }
        }

        Ok(matrix)
    }

    fn assemble(
        rows: Vec<(usize, Vec<Id>)>,
        header: Option<Header>,
    ) -> Result<ResultMatrix, ParseError> {
        let n = rows.len();
        let k = rows.first().map_or(0, |(_, row)| row.len());

        let mut ids = Array2::zeros((n, k));
        for (q, (line, row)) in rows.into_iter().enumerate() {
            if row.len() != k {
                return Err(ParseError::RaggedRow {
                    line,
                    expected: k,
                    found: row.len(),
                });
            }
            ids.row_mut(q).assign(&Array1::from(row));
        }

        Ok(ResultMatrix { ids, header })
    }

    pub fn num_queries(&self) -> usize {
        self.ids.nrows()
    }

    pub fn num_ranks(&self) -> usize {
        self.ids.ncols()
    }

    /// returns the ranked ids of a query
    pub fn row(&self, q: usize) -> ArrayView1<'_, Id> {
        self.ids.row(q)
    }

    pub fn get(&self, q: usize, r: usize) -> Option<Id> {
        self.ids.get((q, r)).copied()
    }

    pub fn header(&self) -> Option<Header> {
        self.header
    }
}

fn parse_header(first: &str, second: &str) -> Option<Header> {
    let num_queries = first.trim().parse().ok()?;
    let top_k = second.trim().parse().ok()?;
    Some(Header { num_queries, top_k })
}

fn parse_line(line: usize, text: &str) -> Result<Vec<Id>, ParseError> {
    let mut fields = text.split(',').collect_vec();
    fields.pop();
    // a doubled trailing delimiter leaves one more empty field at the end
    if fields.last().is_some_and(|field| field.trim().is_empty()) {
        fields.pop();
    }

    fields
        .into_iter()
        .map(|field| {
            let id = field.split(':').next().unwrap_or(field);
            id.trim().parse::<Id>().map_err(|source| ParseError::InvalidId {
                line,
                field: field.to_string(),
                source,
            })
        })
        .collect()
}

/// Writes ranked `(id, score)` rows in the results file format.
pub fn write_results<W: Write>(writer: &mut W, rows: &[Vec<(Id, f32)>]) -> io::Result<()> {
    let top_k = rows.first().map_or(0, Vec::len);
    writeln!(writer, "{}", rows.len())?;
    writeln!(writer, "{top_k}")?;

    for row in rows {
        for (id, score) in row {
            write!(writer, "{id}:{score},")?;
        }
        writeln!(writer)?;
    }

    Ok(())
}
