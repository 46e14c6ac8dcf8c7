use crate::io::error::Error;
use nalgebra::DMatrix;
use std::io::Write;

/// Writes one CSV record per matrix row, without a header.
pub fn write<W: Write>(writer: W, matrix: &DMatrix<f64>) -> Result<(), Error> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for row in matrix.row_iter() {
        csv.write_record(row.iter().map(|&v| format_scientific(v)))?;
    }
    csv.flush()?;
    Ok(())
}

/// Formats a value with 18 fractional digits and a signed, two-digit
/// exponent, e.g. `-2.500000000000000000e-03`.
pub fn format_scientific(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let raw = format!("{value:.18e}");
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return raw;
    };
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.abs())
}
