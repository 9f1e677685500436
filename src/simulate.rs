//! Synthetic scan headers for tests and benchmarks.
//!
//! No pixel data is generated; only the structural fields consumed by
//! [`crate::header::extract_metadata`].

use crate::header::HeaderFields;

/// A fabricated header with controllable fields.
#[derive(Debug, Clone)]
pub struct SimulatedHeader {
    dims: Vec<i64>,
    spacings: Vec<f64>,
    slice_thickness: f64,
    repetition_time: f64,
}

impl SimulatedHeader {
    /// A 4-D functional acquisition with 3 mm in-plane resolution and
    /// slices along z.
    #[must_use]
    pub fn functional(shape: [i64; 3], n_volumes: i64, tr: f64) -> Self {
        Self {
            dims: vec![shape[0], shape[1], shape[2], n_volumes],
            spacings: vec![3.0, 3.0, 3.3, tr],
            slice_thickness: 3.3,
            repetition_time: tr,
        }
    }

    /// A 3-D anatomical acquisition at 1 mm isotropic resolution.
    #[must_use]
    pub fn anatomical(shape: [i64; 3]) -> Self {
        Self {
            dims: shape.to_vec(),
            spacings: vec![1.0, 1.0, 1.2],
            slice_thickness: 1.2,
            repetition_time: 2.3,
        }
    }

    #[must_use]
    pub fn with_spacings(mut self, spacings: Vec<f64>) -> Self {
        self.spacings = spacings;
        self
    }

    #[must_use]
    pub fn with_slice_thickness(mut self, slice_thickness: f64) -> Self {
        self.slice_thickness = slice_thickness;
        self
    }

    #[must_use]
    pub fn with_repetition_time(mut self, repetition_time: f64) -> Self {
        self.repetition_time = repetition_time;
        self
    }
}

impl HeaderFields for SimulatedHeader {
    fn dims(&self) -> &[i64] {
        &self.dims
    }

    fn spacings(&self) -> &[f64] {
        &self.spacings
    }

    fn slice_thickness(&self) -> f64 {
        self.slice_thickness
    }

    fn repetition_time(&self) -> f64 {
        self.repetition_time
    }
}
