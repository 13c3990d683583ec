//! Tab-separated matrix text format.
//!
//! ```text
//! 1
//! 1	2
//! 3	4
//! ```
//!
//! The first line is an exponent `e`; the matrix side is `n = 2^e`. It is
//! followed by `n` rows of exactly `n` tab-separated integers. Anything after
//! the last row is ignored.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;

/// Largest exponent accepted on the first line: a 16384x16384 matrix,
/// 2 GiB of `f64`.
pub const MAX_EXPONENT: u32 = 14;

fn format_error(line: usize, reason: impl Into<String>) -> MatrixError {
    MatrixError::Format {
        line,
        reason: reason.into(),
    }
}

/// Parse a matrix from a reader holding the text format.
///
/// # Errors
/// Returns `Format` if the exponent line is not a non-negative integer no
/// larger than [`MAX_EXPONENT`], if a row does not hold exactly `n` values,
/// if a cell is not an integer, or if the input ends before `n` rows were
/// read. I/O failures are returned as `Io`.
pub fn parse_matrix(reader: impl BufRead) -> Result<Matrix> {
    let mut lines = reader.lines();

    let header = lines
        .next()
        .transpose()?
        .ok_or_else(|| format_error(1, "missing exponent line"))?;
    let exponent: u32 = header
        .trim()
        .parse()
        .map_err(|_| format_error(1, format!("invalid exponent '{}'", header.trim())))?;
    if exponent > MAX_EXPONENT {
        return Err(format_error(
            1,
            format!("exponent {} exceeds maximum {}", exponent, MAX_EXPONENT),
        ));
    }
    let n = 1usize << exponent;

    // Storage grows one validated row at a time; the header alone never
    // drives an allocation.
    let mut data = Vec::new();
    for row in 0..n {
        let line_no = row + 2;
        let line = lines.next().transpose()?.ok_or_else(|| {
            format_error(line_no, format!("expected {} rows, found {}", n, row))
        })?;

        let cells: Vec<&str> = line.trim().split('\t').collect();
        if cells.len() != n {
            return Err(format_error(
                line_no,
                format!("expected {} values, found {}", n, cells.len()),
            ));
        }
        data.reserve(n);
        for cell in cells {
            let v: i64 = cell
                .parse()
                .map_err(|_| format_error(line_no, format!("invalid value '{}'", cell)))?;
            data.push(v as f64);
        }
    }

    Matrix::from_vec(n, data)
}

/// Load a matrix file from disk.
pub fn load_matrix(path: impl AsRef<Path>) -> Result<Matrix> {
    let file = File::open(path.as_ref())?;
    parse_matrix(BufReader::new(file))
}

/// Write `m` in the text format, exponent line included.
pub fn write_matrix(mut writer: impl Write, m: &Matrix) -> Result<()> {
    write_header(&mut writer, m.dimension().trailing_zeros())?;
    for row in m.rows() {
        write_row(&mut writer, row)?;
    }
    Ok(())
}

/// Write the exponent line that starts a matrix file.
pub fn write_header(mut writer: impl Write, exponent: u32) -> Result<()> {
    writeln!(writer, "{}", exponent)?;
    Ok(())
}

/// Write one tab-separated row.
///
/// Together with [`write_header`] this streams a file without holding the
/// whole matrix in memory.
pub fn write_row(mut writer: impl Write, row: &[f64]) -> Result<()> {
    let line: Vec<String> = row.iter().map(|&v| format_value(v)).collect();
    writeln!(writer, "{}", line.join("\t"))?;
    Ok(())
}

/// Save `m` to a file in the text format.
pub fn save_matrix(path: impl AsRef<Path>, m: &Matrix) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_matrix(&mut writer, m)?;
    writer.flush()?;
    Ok(())
}

/// Render with right-aligned columns, one space between columns.
pub fn render_aligned(m: &Matrix) -> String {
    let cells: Vec<String> = m.as_slice().iter().map(|&v| format_value(v)).collect();
    let width = cells.iter().map(|c| c.len()).max().unwrap_or(0);
    cells
        .chunks(m.dimension())
        .map(|row| {
            row.iter()
                .map(|c| format!("{:>width$}", c, width = width))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Integral values print without a fractional part.
fn format_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, &v) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, "\t")?;
                }
                write!(f, "{}", format_value(v))?;
            }
        }
        Ok(())
    }
}

impl FromStr for Matrix {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        parse_matrix(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_format_error(input: &str, expected_line: usize) {
        match input.parse::<Matrix>() {
            Err(MatrixError::Format { line, .. }) => assert_eq!(line, expected_line, "{:?}", input),
            other => panic!("expected format error for {:?}, got {:?}", input, other),
        }
    }

    #[test]
    fn test_parse_two_by_two() {
        let m: Matrix = "1\n1\t2\n3\t4\n".parse().unwrap();
        assert_eq!(m.dimension(), 2);
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_parse_scalar() {
        let m: Matrix = "0\n-7\n".parse().unwrap();
        assert_eq!(m.as_slice(), &[-7.0]);
    }

    #[test]
    fn test_parse_tolerates_crlf_and_trailing_content() {
        let m: Matrix = "1\r\n1\t2\r\n3\t4\r\nextra\n".parse().unwrap();
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_parse_no_trailing_newline() {
        let m: Matrix = "1\n1\t2\n3\t4".parse().unwrap();
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_row_with_too_many_values() {
        assert_format_error("1\n1\t2\t3\n3\t4\n", 2);
    }

    #[test]
    fn test_row_with_too_few_values() {
        assert_format_error("1\n1\t2\n3\n", 3);
    }

    #[test]
    fn test_bad_exponent() {
        assert_format_error("x\n", 1);
        assert_format_error("-1\n1\n", 1);
        assert_format_error("15\n", 1);
        assert_format_error("", 1);
    }

    #[test]
    fn test_huge_exponent_is_format_error() {
        assert_format_error("30\n1\n", 1);
        assert_format_error("24\n1\n", 1);
    }

    #[test]
    fn test_largest_exponent_short_row_fails_without_allocating() {
        // 16384 values are expected on line 2; the header alone must not
        // reserve the full 16384x16384 storage.
        assert_format_error("14\n1\n", 2);
    }

    #[test]
    fn test_streamed_rows_match_write_matrix() {
        let m = Matrix::from_rows(vec![vec![1.0, -2.0], vec![0.5, 4.0]]).unwrap();
        let mut whole = Vec::new();
        write_matrix(&mut whole, &m).unwrap();

        let mut streamed = Vec::new();
        write_header(&mut streamed, 1).unwrap();
        for row in m.rows() {
            write_row(&mut streamed, row).unwrap();
        }
        assert_eq!(whole, streamed);
    }

    #[test]
    fn test_bad_cell() {
        assert_format_error("1\n1\t2.5\n3\t4\n", 2);
        assert_format_error("1\n1\t\n3\t4\n", 2);
    }

    #[test]
    fn test_space_separated_is_rejected() {
        assert_format_error("1\n1 2\n3 4\n", 2);
    }

    #[test]
    fn test_missing_rows() {
        assert_format_error("2\n1\t2\t3\t4\n", 3);
    }

    #[test]
    fn test_write_then_parse() {
        let m = Matrix::from_vec(4, (0..16).map(|v| (v as f64) - 8.0).collect()).unwrap();
        let mut buf = Vec::new();
        write_matrix(&mut buf, &m).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("2\n-8\t-7\t-6\t-5\n"));
        assert_eq!(text.parse::<Matrix>().unwrap(), m);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ex_1.1");
        let m: Matrix = "1\n1\t2\n3\t4\n".parse().unwrap();
        save_matrix(&path, &m).unwrap();
        assert_eq!(load_matrix(&path).unwrap(), m);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let r = load_matrix(dir.path().join("nope"));
        assert!(matches!(r, Err(MatrixError::Io(_))));
    }

    #[test]
    fn test_display_plain() {
        let m = Matrix::from_rows(vec![vec![19.0, 22.0], vec![43.0, 50.0]]).unwrap();
        assert_eq!(m.to_string(), "19\t22\n43\t50");
    }

    #[test]
    fn test_display_fractional() {
        let m = Matrix::from_vec(1, vec![0.5]).unwrap();
        assert_eq!(m.to_string(), "0.5");
    }

    #[test]
    fn test_render_aligned() {
        let m = Matrix::from_rows(vec![vec![1.0, -250.0], vec![43.0, 5.0]]).unwrap();
        assert_eq!(render_aligned(&m), "   1 -250\n  43    5");
    }
}
