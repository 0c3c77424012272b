//! Plain-text dataset format.
//!
//! One sample per line, features separated by commas and/or whitespace. The amount of features is
//! taken from the first non-blank line, every following line has to have exactly as many.
use crate::{error::{KMeansError, Result}, KMeans, memory::*};
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path
};
use tracing::debug;

fn is_separator(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

/// Parse a dataset from **reader** into a sample store.
pub fn read_samples<T: Primitive, R: BufRead>(reader: R) -> Result<KMeans<T>> {
    let mut samples = Vec::new();
    let mut sample_dims = 0;
    let mut sample_cnt = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = idx + 1;
        let row_start = samples.len();
        for token in line.split(is_separator).filter(|t| !t.is_empty()) {
            let value = token.parse::<f64>().ok()
                .and_then(|v| T::from(v))
                .filter(|v: &T| v.is_finite())
                .ok_or_else(|| KMeansError::InvalidFeature { line: lineno, token: token.to_string() })?;
            samples.push(value);
        }
        let got = samples.len() - row_start;
        if got == 0 {
            continue;
        }
        if sample_cnt == 0 {
            sample_dims = got;
        } else if got != sample_dims {
            return Err(KMeansError::InconsistentRow { line: lineno, expected: sample_dims, got });
        }
        sample_cnt += 1;
    }

    debug!(sample_cnt, sample_dims, "dataset parsed");
    KMeans::new(samples, sample_cnt, sample_dims)
}

/// Load a dataset from the file at **path**.
pub fn load_samples<T: Primitive>(path: impl AsRef<Path>) -> Result<KMeans<T>> {
    let file = File::open(path.as_ref())?;
    read_samples(BufReader::new(file))
}

/// Write samples [row-major] as comma separated lines, using **precision** decimals per feature.
pub fn write_samples<T: Primitive, W: Write>(writer: W, samples: &[T], sample_dims: usize, precision: usize) -> Result<()> {
    if sample_dims == 0 {
        return Err(KMeansError::EmptyDataset);
    }
    let mut writer = BufWriter::new(writer);
    for sample in samples.chunks_exact(sample_dims) {
        for (d, v) in sample.iter().enumerate() {
            if d > 0 {
                writer.write_all(b",")?;
            }
            write!(writer, "{:.*}", precision, v)?;
        }
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
