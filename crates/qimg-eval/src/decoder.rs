//! Histogram readout: images and labels.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;

use qimg_hal::Histogram;

use crate::config::EncoderConfig;
use crate::error::{EvalError, EvalResult};

/// Binary image category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(u8);

impl Label {
    /// Category 0.
    pub const ZERO: Label = Label(0);
    /// Category 1.
    pub const ONE: Label = Label(1);

    /// Label for a raw class value, if it is 0 or 1.
    pub fn new(value: u8) -> Option<Self> {
        (value <= 1).then_some(Label(value))
    }

    /// The class value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Probability that qubit 0 reads 0.
///
/// Sums the mass of every basis state whose index is even.
pub fn histogram_to_category(histogram: &Histogram) -> EvalResult<f64> {
    histogram.validate()?;
    Ok(histogram
        .iter()
        .filter(|(index, _)| index & 1 == 0)
        .map(|(_, p)| p)
        .sum())
}

/// [`Label::ONE`] iff `category` is strictly above `threshold`.
pub fn category_to_label(category: f64, threshold: f64) -> Label {
    if category > threshold {
        Label::ONE
    } else {
        Label::ZERO
    }
}

/// Rebuilds images from encoder histograms.
#[derive(Debug, Clone)]
pub struct HistogramDecoder {
    config: EncoderConfig,
}

impl HistogramDecoder {
    /// Create a decoder for the layout in `config`.
    pub fn new(config: EncoderConfig) -> EvalResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Number of basis states of the encoding register.
    pub fn num_states(&self) -> u64 {
        1 << (self.config.intensity_bits + self.config.position_bits())
    }

    /// Decode the normalized intensity of every grid cell.
    ///
    /// Each cell is the mass-weighted mean of `level / max_level` over the states
    /// at its position. Cells without mass are 0.
    pub fn decode_grid(&self, histogram: &Histogram) -> EvalResult<Array2<f64>> {
        histogram.validate()?;
        let limit = self.num_states();
        let (rows, cols) = (self.config.rows, self.config.cols);
        let level_mask = u64::from(self.config.max_level());
        let max_level = f64::from(self.config.max_level());

        let mut weighted = Array2::<f64>::zeros((rows, cols));
        let mut mass = Array2::<f64>::zeros((rows, cols));
        for (index, p) in histogram.iter() {
            if index >= limit {
                return Err(EvalError::BasisStateOutOfRange { index, limit });
            }
            let position = (index >> self.config.intensity_bits) as usize;
            let level = (index & level_mask) as f64;
            let cell = (position / cols, position % cols);
            weighted[cell] += p * level / max_level;
            mass[cell] += p;
        }

        Ok(ndarray::Zip::from(&weighted)
            .and(&mass)
            .map_collect(|&w, &m| if m > 0.0 { w / m } else { 0.0 }))
    }

    /// Decode an image of `shape` in stored intensity units.
    ///
    /// The grid is upsampled nearest-neighbour and scaled by `intensity_scale`.
    pub fn decode_image(
        &self,
        histogram: &Histogram,
        shape: (usize, usize),
    ) -> EvalResult<Array2<f64>> {
        let grid = self.decode_grid(histogram)?;
        let (rows, cols) = (self.config.rows, self.config.cols);
        let (height, width) = shape;
        let scale = self.config.intensity_scale;
        Ok(Array2::from_shape_fn(shape, |(r, c)| {
            grid[(r * rows / height, c * cols / width)] * scale
        }))
    }
}
