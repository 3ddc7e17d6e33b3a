use ndarray::Array3;

use crate::error::{RbmError, Result};

pub const IMAGE_ROWS: usize = 28;
pub const IMAGE_COLS: usize = 28;

// Load MNIST images from a csv file.
// Returns a tuple of (images, labels), images shaped (n, 28, 28).
// The expected format is:
// - No headers
// - One image per row
// - Each row starts with the class label 0-9
// - The rest of the row consists of 28x28 pixel values
// - The pixel values are represented as integers, 0-255
pub fn load_mnist(filename: &str, n_examples: usize) -> Result<(Array3<u8>, Vec<usize>)> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(filename)?;
    read_mnist(reader, n_examples)
}

fn read_mnist<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    n_examples: usize,
) -> Result<(Array3<u8>, Vec<usize>)> {
    let image_area = IMAGE_ROWS * IMAGE_COLS;

    // Pixels go into one flat buffer, labels into a parallel vector
    let mut pixels: Vec<u8> = Vec::new();
    let mut labels: Vec<usize> = Vec::new();

    for result in reader.records().take(n_examples) {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());

        let label = parse_field(&record[0], line)?;
        let got = record.len() - 1;
        if got != image_area {
            return Err(RbmError::ImageSize {
                line,
                expected: image_area,
                got,
            });
        }

        for field in record.iter().skip(1) {
            pixels.push(parse_field(field, line)?);
        }
        labels.push(label);
    }

    let images = Array3::from_shape_vec((labels.len(), IMAGE_ROWS, IMAGE_COLS), pixels)
        .map_err(|_| RbmError::ShapeMismatch {
            expected: image_area,
            got: labels.len(),
        })?;
    Ok((images, labels))
}

fn parse_field<T: std::str::FromStr>(field: &str, line: u64) -> Result<T> {
    field.trim().parse().map_err(|_| RbmError::Parse {
        line,
        field: field.to_string(),
    })
}
