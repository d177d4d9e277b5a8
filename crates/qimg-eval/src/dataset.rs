//! Dataset loading from `.npy` files.
//!
//! A dataset directory holds `images.npy` (N×H×W, or N×(S·S) for square images
//! stored flat) and `labels.npy` (N class values, each 0 or 1).

use ndarray::{Array2, ArrayD, Axis, Ix3};
use ndarray_npy::{ReadNpyError, ReadNpyExt, ReadableElement};
use std::io::Cursor;
use std::path::Path;
use tracing::info;

use crate::decoder::Label;
use crate::error::{EvalError, EvalResult};

/// File name of the image array inside a dataset directory.
pub const IMAGES_FILE: &str = "images.npy";

/// File name of the label array inside a dataset directory.
pub const LABELS_FILE: &str = "labels.npy";

/// Images with their ground-truth labels.
#[derive(Debug, Clone)]
pub struct Dataset {
    images: Vec<Array2<f64>>,
    labels: Vec<Label>,
}

impl Dataset {
    /// Pair images with labels. Both must be non-empty and equally long.
    pub fn new(images: Vec<Array2<f64>>, labels: Vec<Label>) -> EvalResult<Self> {
        if images.len() != labels.len() {
            return Err(EvalError::LengthMismatch {
                images: images.len(),
                labels: labels.len(),
            });
        }
        if images.is_empty() {
            return Err(EvalError::EmptyDataset);
        }
        Ok(Self { images, labels })
    }

    /// Load `images.npy` and `labels.npy` from `dir`.
    pub fn load(dir: &Path) -> EvalResult<Self> {
        let images = load_images(&dir.join(IMAGES_FILE))?;
        let labels = load_labels(&dir.join(LABELS_FILE))?;
        let dataset = Self::new(images, labels)?;
        info!(
            "Loaded {} images of shape {:?} from {}",
            dataset.len(),
            dataset.images[0].dim(),
            dir.display()
        );
        Ok(dataset)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Always false for a constructed dataset.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// The images.
    pub fn images(&self) -> &[Array2<f64>] {
        &self.images
    }

    /// The labels, aligned with [`Dataset::images`].
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Iterate `(image, label)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Array2<f64>, Label)> {
        self.images.iter().zip(self.labels.iter().copied())
    }
}

fn read_bytes(path: &Path) -> EvalResult<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| EvalError::Io(format!("Failed to read {}: {}", path.display(), e)))
}

/// Parse an array of element type `A`, or `None` if the file stores another dtype.
fn try_read<A: ReadableElement>(bytes: &[u8], path: &Path) -> EvalResult<Option<ArrayD<A>>> {
    match ArrayD::<A>::read_npy(Cursor::new(bytes)) {
        Ok(array) => Ok(Some(array)),
        Err(ReadNpyError::WrongDescriptor(_)) => Ok(None),
        Err(e) => Err(EvalError::Dataset(format!("{}: {}", path.display(), e))),
    }
}

/// Read an array as `f64`, trying each listed dtype in order.
macro_rules! read_as_f64 {
    ($bytes:expr, $path:expr, $($ty:ty),+) => {{
        let mut found = None;
        $(
            if found.is_none() {
                found = try_read::<$ty>($bytes, $path)?.map(|a| a.mapv(|v| v as f64));
            }
        )+
        found
    }};
}

/// Load an image stack as `f64` matrices.
pub fn load_images(path: &Path) -> EvalResult<Vec<Array2<f64>>> {
    let bytes = read_bytes(path)?;
    let array = read_as_f64!(&bytes, path, f64, f32, u8, i64).ok_or_else(|| {
        EvalError::Dataset(format!(
            "{}: unsupported dtype, expected f64, f32, u8 or i64",
            path.display()
        ))
    })?;
    split_images(array, path)
}

fn split_images(array: ArrayD<f64>, path: &Path) -> EvalResult<Vec<Array2<f64>>> {
    let shape = array.shape().to_vec();
    let stack = match *shape.as_slice() {
        [_, _, _] => array.into_dimensionality::<Ix3>(),
        [n, len] => {
            let side = (len as f64).sqrt().round() as usize;
            if side * side != len {
                return Err(EvalError::Dataset(format!(
                    "{}: flat images of length {len} are not square",
                    path.display()
                )));
            }
            array.into_shape_with_order((n, side, side))
        }
        _ => {
            return Err(EvalError::Dataset(format!(
                "{}: expected a 3-D image stack, got shape {:?}",
                path.display(),
                shape
            )));
        }
    }
    .map_err(|e| EvalError::Dataset(format!("{}: {}", path.display(), e)))?;

    Ok(stack.axis_iter(Axis(0)).map(|image| image.to_owned()).collect())
}

/// Load a label vector. Every entry must be 0 or 1.
pub fn load_labels(path: &Path) -> EvalResult<Vec<Label>> {
    let bytes = read_bytes(path)?;
    let values = match try_read::<bool>(&bytes, path)? {
        Some(flags) => flags.mapv(|b| if b { 1.0 } else { 0.0 }),
        None => read_as_f64!(&bytes, path, i64, i32, u8, f64).ok_or_else(|| {
            EvalError::Dataset(format!(
                "{}: unsupported dtype, expected i64, i32, u8, bool or f64",
                path.display()
            ))
        })?,
    };
    if values.ndim() != 1 {
        return Err(EvalError::Dataset(format!(
            "{}: expected a 1-D label array, got shape {:?}",
            path.display(),
            values.shape()
        )));
    }

    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            if value == 0.0 {
                Ok(Label::ZERO)
            } else if value == 1.0 {
                Ok(Label::ONE)
            } else {
                Err(EvalError::InvalidLabel { index, value })
            }
        })
        .collect()
}
