use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

/// Intensity evaluated on a set of q values.
///
/// For oriented evaluation `q` holds the `qx` values and `qy` the fixed
/// second component.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub model: String,
    pub q: Vec<f64>,
    pub intensity: Vec<f64>,
    pub qy: Option<f64>,
}

impl Curve {
    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.q.iter().copied().zip(self.intensity.iter().copied())
    }
}

#[derive(Debug, Error)]
pub enum CurveIoError {
    #[error("File I/O error for '{path}': {source}")]
    Io { path: String, source: io::Error },
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Invalid q value '{value}' in '{path}' at line {line}")]
    InvalidValue {
        path: String,
        line: u64,
        value: String,
    },
}

/// Writes the curve as CSV: `q,intensity`, or `qx,qy,intensity` for an
/// oriented curve.
pub fn write_csv<W: Write>(curve: &Curve, writer: W) -> Result<(), csv::Error> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    match curve.qy {
        None => {
            writer.write_record(["q", "intensity"])?;
            for point in curve.points() {
                writer.serialize(point)?;
            }
        }
        Some(qy) => {
            writer.write_record(["qx", "qy", "intensity"])?;
            for (qx, intensity) in curve.points() {
                writer.serialize((qx, qy, intensity))?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn write_csv_file(curve: &Curve, path: &Path) -> Result<(), CurveIoError> {
    let file = File::create(path).map_err(|e| CurveIoError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    write_csv(curve, file).map_err(|e| CurveIoError::Csv {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

/// Reads q values from the first column of a CSV or plain text file.
///
/// A non-numeric first row is taken as a header; any later non-numeric entry
/// is an error. Blank lines and lines starting with `#` are ignored.
pub fn read_q_values(path: &Path) -> Result<Vec<f64>, CurveIoError> {
    let path_str = path.to_string_lossy().to_string();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_path(path)
        .map_err(|e| CurveIoError::Csv {
            path: path_str.clone(),
            source: e,
        })?;

    let mut values = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| CurveIoError::Csv {
            path: path_str.clone(),
            source: e,
        })?;
        let Some(field) = record.get(0).filter(|f| !f.is_empty()) else {
            continue;
        };
        match field.parse::<f64>() {
            Ok(value) => values.push(value),
            Err(_) if row == 0 => continue,
            Err(_) => {
                return Err(CurveIoError::InvalidValue {
                    path: path_str,
                    line: record.position().map_or(row as u64 + 1, |p| p.line()),
                    value: field.to_string(),
                });
            }
        }
    }
    Ok(values)
}
