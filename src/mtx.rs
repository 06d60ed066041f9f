//! Matrix Market reader and writer
//!
//! Reads square coordinate matrices (`%%MatrixMarket matrix coordinate ...`)
//! into a `CooEdges` (1-based unless told otherwise). Values are parsed for
//! validity and discarded; only the sparsity pattern matters for triangle
//! counting. Dense `array` matrices, `complex` fields and `hermitian` symmetry
//! are rejected.
//!
//! Paths ending in `.gz` are decompressed on the fly.

use crate::error::{TricountError, TricountResult};
use flate2::read::MultiGzDecoder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, info};
use tricount_kernels::{CooEdges, IndexBase, VertexId, MAX_VERTICES};

const BANNER: &str = "%%matrixmarket";

/// Upper bound on the up-front reservation made from a declared entry count
const MAX_PREALLOCATED_ENTRIES: usize = 1 << 24;

/// Storage layout from the banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatrixFormat {
    Coordinate,
    Array,
}

/// Entry type from the banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatrixField {
    Real,
    Integer,
    Pattern,
    Complex,
}

/// Symmetry class from the banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatrixSymmetry {
    General,
    Symmetric,
    SkewSymmetric,
    Hermitian,
}

impl MatrixFormat {
    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "coordinate" => Some(Self::Coordinate),
            "array" => Some(Self::Array),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Coordinate => "coordinate",
            Self::Array => "array",
        }
    }

    fn code(self) -> char {
        match self {
            Self::Coordinate => 'C',
            Self::Array => 'A',
        }
    }
}

impl MatrixField {
    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "real" => Some(Self::Real),
            "integer" => Some(Self::Integer),
            "pattern" => Some(Self::Pattern),
            "complex" => Some(Self::Complex),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Real => "real",
            Self::Integer => "integer",
            Self::Pattern => "pattern",
            Self::Complex => "complex",
        }
    }

    fn code(self) -> char {
        match self {
            Self::Real => 'R',
            Self::Integer => 'I',
            Self::Pattern => 'P',
            Self::Complex => 'C',
        }
    }
}

impl MatrixSymmetry {
    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "general" => Some(Self::General),
            "symmetric" => Some(Self::Symmetric),
            "skew-symmetric" => Some(Self::SkewSymmetric),
            "hermitian" => Some(Self::Hermitian),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Symmetric => "symmetric",
            Self::SkewSymmetric => "skew-symmetric",
            Self::Hermitian => "hermitian",
        }
    }

    fn code(self) -> char {
        match self {
            Self::General => 'G',
            Self::Symmetric => 'S',
            Self::SkewSymmetric => 'K',
            Self::Hermitian => 'H',
        }
    }
}

/// Banner and size line of a Matrix Market file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixHeader {
    pub format: MatrixFormat,
    pub field: MatrixField,
    pub symmetry: MatrixSymmetry,
    pub rows: usize,
    pub cols: usize,
    pub nnz: usize,
}

impl MatrixHeader {
    /// Four-letter type code, e.g. `MCPS` for a coordinate pattern symmetric matrix
    pub fn type_code(&self) -> String {
        ['M', self.format.code(), self.field.code(), self.symmetry.code()]
            .iter()
            .collect()
    }

    /// Human-readable type, e.g. `coordinate pattern symmetric`
    pub fn description(&self) -> String {
        format!(
            "{} {} {}",
            self.format.as_str(),
            self.field.as_str(),
            self.symmetry.as_str()
        )
    }
}

impl fmt::Display for MatrixHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "%%MatrixMarket matrix {}\n{} {} {}",
            self.description(),
            self.rows,
            self.cols,
            self.nnz
        )
    }
}

/// A parsed file: header plus the edge list
#[derive(Debug, Clone)]
pub struct MatrixMarket {
    pub header: MatrixHeader,
    pub edges: CooEdges,
}

/// Line-numbering wrapper so parse errors can point at the offending line
struct Lines<R> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl<R> Lines<R> {
    fn parse_error(&self, message: impl Into<String>) -> TricountError {
        TricountError::Parse {
            line: self.line_no,
            message: message.into(),
        }
    }
}

impl<R: BufRead> Lines<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
        }
    }

    /// Next raw line, `None` at end of input
    fn next_raw(&mut self) -> TricountResult<Option<&str>> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        Ok(Some(self.buf.trim()))
    }

    /// Next line that is neither blank nor a `%` comment
    fn next_content(&mut self) -> TricountResult<Option<(usize, String)>> {
        loop {
            let line_no = self.line_no + 1;
            match self.next_raw()? {
                None => return Ok(None),
                Some(line) if line.is_empty() || line.starts_with('%') => continue,
                Some(line) => return Ok(Some((line_no, line.to_string()))),
            }
        }
    }
}

/// Open a file for reading, decompressing when the name ends in `.gz`
pub fn open(path: &Path) -> TricountResult<Box<dyn BufRead>> {
    let file = File::open(path)?;
    let gzipped = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    if gzipped {
        debug!("Reading {} through gzip decoder", path.display());
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

fn parse_banner<R: BufRead>(lines: &mut Lines<R>) -> TricountResult<(MatrixFormat, MatrixField, MatrixSymmetry)> {
    let banner = match lines.next_raw()? {
        Some(line) => line.to_string(),
        None => return Err(lines.parse_error("empty input, expected Matrix Market banner")),
    };

    let tokens: Vec<&str> = banner.split_whitespace().collect();
    if tokens.first().map(|t| t.to_ascii_lowercase()) != Some(BANNER.to_string()) {
        return Err(lines.parse_error("missing %%MatrixMarket banner"));
    }
    if tokens.len() != 5 {
        return Err(lines.parse_error(format!(
            "banner has {} fields, expected 5",
            tokens.len()
        )));
    }
    if !tokens[1].eq_ignore_ascii_case("matrix") {
        return Err(TricountError::UnsupportedFormat(format!(
            "object '{}' is not a matrix",
            tokens[1]
        )));
    }

    let format = MatrixFormat::parse(tokens[2])
        .ok_or_else(|| lines.parse_error(format!("unknown storage format '{}'", tokens[2])))?;
    let field = MatrixField::parse(tokens[3])
        .ok_or_else(|| lines.parse_error(format!("unknown field '{}'", tokens[3])))?;
    let symmetry = MatrixSymmetry::parse(tokens[4])
        .ok_or_else(|| lines.parse_error(format!("unknown symmetry '{}'", tokens[4])))?;

    Ok((format, field, symmetry))
}

fn parse_count<R>(lines: &Lines<R>, token: &str, what: &str) -> TricountResult<usize> {
    token
        .parse::<usize>()
        .map_err(|e| lines.parse_error(format!("invalid {} '{}': {}", what, token, e)))
}

fn read_header_from<R: BufRead>(lines: &mut Lines<R>) -> TricountResult<MatrixHeader> {
    let (format, field, symmetry) = parse_banner(lines)?;

    let unsupported = format == MatrixFormat::Array
        || field == MatrixField::Complex
        || symmetry == MatrixSymmetry::Hermitian;
    if unsupported {
        let code: String = ['M', format.code(), field.code(), symmetry.code()].iter().collect();
        return Err(TricountError::UnsupportedFormat(format!(
            "{} {} {} [{}]",
            format.as_str(),
            field.as_str(),
            symmetry.as_str(),
            code
        )));
    }

    let size_line = match lines.next_content()? {
        Some((_, line)) => line,
        None => return Err(lines.parse_error("missing size line")),
    };
    let tokens: Vec<&str> = size_line.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(lines.parse_error(format!(
            "size line has {} fields, expected 'rows cols nnz'",
            tokens.len()
        )));
    }
    let rows = parse_count(lines, tokens[0], "row count")?;
    let cols = parse_count(lines, tokens[1], "column count")?;
    let nnz = parse_count(lines, tokens[2], "entry count")?;

    if rows != cols {
        return Err(TricountError::DimensionMismatch(format!(
            "adjacency matrix must be square, got {} x {}",
            rows, cols
        )));
    }
    if rows > MAX_VERTICES {
        return Err(TricountError::DimensionMismatch(format!(
            "{} vertices exceed the supported maximum of {}",
            rows, MAX_VERTICES
        )));
    }

    Ok(MatrixHeader {
        format,
        field,
        symmetry,
        rows,
        cols,
        nnz,
    })
}

fn parse_index<R>(lines: &Lines<R>, token: &str, vertex_count: usize) -> TricountResult<VertexId> {
    let index = token
        .parse::<u64>()
        .map_err(|e| lines.parse_error(format!("invalid index '{}': {}", token, e)))?;
    VertexId::try_from(index).map_err(|_| TricountError::InvalidIndex { index, vertex_count })
}

/// Read only the banner and size line
pub fn read_header<R: BufRead>(reader: R) -> TricountResult<MatrixHeader> {
    read_header_from(&mut Lines::new(reader))
}

/// Parse a whole Matrix Market stream with the standard 1-based indices
pub fn parse<R: BufRead>(reader: R) -> TricountResult<MatrixMarket> {
    parse_with_base(reader, IndexBase::One)
}

/// Parse a whole Matrix Market stream whose indices start at `base`.
///
/// Some exporters write 0-based coordinates; the index base only changes the
/// accepted index range, never the header rules.
pub fn parse_with_base<R: BufRead>(reader: R, base: IndexBase) -> TricountResult<MatrixMarket> {
    let mut lines = Lines::new(reader);
    let header = read_header_from(&mut lines)?;
    let n = header.rows;

    let capacity = header.nnz.min(MAX_PREALLOCATED_ENTRIES);
    let mut rows = Vec::with_capacity(capacity);
    let mut cols = Vec::with_capacity(capacity);

    while let Some((line_no, line)) = lines.next_content()? {
        if rows.len() == header.nnz {
            return Err(TricountError::DimensionMismatch(format!(
                "declared {} entries but found more (line {})",
                header.nnz, line_no
            )));
        }

        let mut tokens = line.split_whitespace();
        let (r, c) = match (tokens.next(), tokens.next()) {
            (Some(r), Some(c)) => (r, c),
            _ => return Err(lines.parse_error("expected 'row col [value]'")),
        };
        rows.push(parse_index(&lines, r, n)?);
        cols.push(parse_index(&lines, c, n)?);

        // Weights are validated and dropped; pattern entries carry an implicit 1
        match header.field {
            MatrixField::Pattern | MatrixField::Complex => {}
            MatrixField::Real => {
                let v = tokens
                    .next()
                    .ok_or_else(|| lines.parse_error("missing value"))?;
                v.parse::<f64>()
                    .map_err(|e| lines.parse_error(format!("invalid real value '{}': {}", v, e)))?;
            }
            MatrixField::Integer => {
                let v = tokens
                    .next()
                    .ok_or_else(|| lines.parse_error("missing value"))?;
                v.parse::<i64>()
                    .map_err(|e| lines.parse_error(format!("invalid integer value '{}': {}", v, e)))?;
            }
        }
    }

    if rows.len() != header.nnz {
        return Err(TricountError::DimensionMismatch(format!(
            "declared {} entries but found {}",
            header.nnz,
            rows.len()
        )));
    }

    let edges = CooEdges::new(n, header.nnz, rows, cols, base)?;
    debug!("Parsed {} entries ({})", edges.nnz(), header.type_code());
    Ok(MatrixMarket { header, edges })
}

/// Read the header of a file on disk
pub fn read_header_path(path: &Path) -> TricountResult<MatrixHeader> {
    read_header(open(path)?)
}

/// Read a whole file on disk
pub fn read_path(path: &Path, base: IndexBase) -> TricountResult<MatrixMarket> {
    let matrix = parse_with_base(open(path)?, base)?;
    info!(
        "Loaded {}: {} vertices, {} entries ({})",
        path.display(),
        matrix.header.rows,
        matrix.header.nnz,
        matrix.header.description()
    );
    Ok(matrix)
}

/// Write an edge list as a 1-based `coordinate pattern general` matrix
pub fn write_pattern<W: Write>(edges: &CooEdges, mut out: W) -> TricountResult<()> {
    let n = edges.vertex_count();
    writeln!(out, "%%MatrixMarket matrix coordinate pattern general")?;
    writeln!(out, "{} {} {}", n, n, edges.nnz())?;
    for (r, c) in edges.iter() {
        writeln!(out, "{} {}", r + 1, c + 1)?;
    }
    out.flush()?;
    Ok(())
}
