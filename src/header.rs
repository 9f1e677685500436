//! Header metadata extraction.
//!
//! The extractor never touches an image file itself; whatever reads the
//! header off disk implements [`HeaderFields`] and hands it in. All
//! validation of the raw fields happens here, at the boundary.

use serde::Serialize;

use crate::error::{CoreError, Result};

/// Structural view of a scan header.
///
/// Only the fields the extractor actually consumes. An adapter over a
/// real NIfTI reader implements this; so does [`crate::simulate::SimulatedHeader`]
/// for tests.
///
/// # Example
///
/// ```ignore
/// struct NiftiHeaderAdapter { /* ... */ }
///
/// impl HeaderFields for NiftiHeaderAdapter {
///     fn dims(&self) -> &[i64] {
///         // Grid dimensions from the header's dim field
///     }
///
///     fn spacings(&self) -> &[f64] {
///         // Per-axis physical spacing from pixdim
///     }
///
///     fn slice_thickness(&self) -> f64 {
///         // Declared slice thickness
///     }
///
///     fn repetition_time(&self) -> f64 {
///         // Seconds per volume
///     }
/// }
/// ```
pub trait HeaderFields {
    /// Grid dimensions, spatial axes first. A 4th entry, when present,
    /// is the volume count. Signed so that defective headers are
    /// representable and can be rejected here rather than trusted.
    fn dims(&self) -> &[i64];

    /// Physical spacing per axis, in the same order as [`dims`](Self::dims).
    fn spacings(&self) -> &[f64];

    /// Declared slice thickness.
    fn slice_thickness(&self) -> f64;

    /// Repetition time in seconds.
    fn repetition_time(&self) -> f64;
}

/// Spatial axis along which slices were acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SliceAxis {
    X,
    Y,
    Z,
}

impl SliceAxis {
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::X),
            1 => Some(Self::Y),
            2 => Some(Self::Z),
            _ => None,
        }
    }
}

impl std::fmt::Display for SliceAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Validated structural metadata of a single scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeaderMetadata {
    n_slices: usize,
    n_volumes: usize,
    tr: f64,
    slice_axis: SliceAxis,
}

impl HeaderMetadata {
    pub fn new(n_slices: usize, n_volumes: usize, tr: f64, slice_axis: SliceAxis) -> Result<Self> {
        if n_slices == 0 {
            return Err(CoreError::InvalidHeader(
                "slice count must be positive".to_string(),
            ));
        }
        if !tr.is_finite() || tr <= 0.0 {
            return Err(CoreError::InvalidHeader(format!(
                "repetition time must be positive, got {tr}"
            )));
        }

        Ok(Self {
            n_slices,
            n_volumes,
            tr,
            slice_axis,
        })
    }

    #[must_use]
    pub const fn n_slices(&self) -> usize {
        self.n_slices
    }

    #[must_use]
    pub const fn n_volumes(&self) -> usize {
        self.n_volumes
    }

    #[must_use]
    pub const fn tr(&self) -> f64 {
        self.tr
    }

    #[must_use]
    pub const fn slice_axis(&self) -> SliceAxis {
        self.slice_axis
    }
}

/// Builds [`HeaderMetadata`] from a raw header.
///
/// The slice axis is the spatial axis whose spacing is nearest the
/// declared slice thickness; ties prefer the last spatial axis. A
/// missing or garbage thickness field falls back to the z axis.
pub fn extract_metadata(header: &impl HeaderFields) -> Result<HeaderMetadata> {
    let dims = header.dims();
    let spacings = header.spacings();

    if dims.len() < 3 {
        return Err(CoreError::InvalidHeader(format!(
            "expected at least 3 dimensions, got {}",
            dims.len()
        )));
    }
    if spacings.len() < 3 {
        return Err(CoreError::InvalidHeader(format!(
            "expected at least 3 spacings, got {}",
            spacings.len()
        )));
    }

    let slice_axis = locate_slice_axis(spacings, header.slice_thickness());

    let n_slices = dims[slice_axis.index()];
    if n_slices <= 0 {
        return Err(CoreError::InvalidHeader(format!(
            "slice count along {slice_axis} axis must be positive, got {n_slices}"
        )));
    }

    let n_volumes = match dims.get(3) {
        Some(&v) if v < 0 => {
            return Err(CoreError::InvalidHeader(format!(
                "volume count must not be negative, got {v}"
            )));
        }
        Some(&v) => v as usize,
        None => 1,
    };

    HeaderMetadata::new(
        n_slices as usize,
        n_volumes,
        header.repetition_time(),
        slice_axis,
    )
}

fn locate_slice_axis(spacings: &[f64], slice_thickness: f64) -> SliceAxis {
    if !slice_thickness.is_finite() || slice_thickness <= 0.0 {
        return SliceAxis::Z;
    }

    let mut best = SliceAxis::Z;
    let mut best_distance = f64::INFINITY;

    // Iterate in axis order; `<=` lets later axes win ties.
    for index in 0..3 {
        let distance = (spacings[index] - slice_thickness).abs();
        if distance <= best_distance {
            best_distance = distance;
            best = SliceAxis::from_index(index).unwrap_or(SliceAxis::Z);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RawHeader {
        dims: Vec<i64>,
        spacings: Vec<f64>,
        slice_thickness: f64,
        repetition_time: f64,
    }

    impl HeaderFields for RawHeader {
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

    #[test]
    fn test_extract_functional_header() {
        let header = RawHeader {
            dims: vec![64, 64, 32, 180],
            spacings: vec![3.0, 3.0, 3.3, 2.0],
            slice_thickness: 3.3,
            repetition_time: 2.0,
        };

        let meta = extract_metadata(&header).unwrap();
        assert_eq!(meta.n_slices(), 32);
        assert_eq!(meta.n_volumes(), 180);
        assert_eq!(meta.tr(), 2.0);
        assert_eq!(meta.slice_axis(), SliceAxis::Z);
    }

    #[test]
    fn test_slice_axis_from_thickness() {
        let header = RawHeader {
            dims: vec![48, 64, 64, 100],
            spacings: vec![3.5, 1.0, 1.0, 2.0],
            slice_thickness: 3.5,
            repetition_time: 2.0,
        };

        let meta = extract_metadata(&header).unwrap();
        assert_eq!(meta.slice_axis(), SliceAxis::X);
        assert_eq!(meta.n_slices(), 48);
    }

    #[test]
    fn test_slice_axis_tie_prefers_last() {
        let header = RawHeader {
            dims: vec![64, 64, 64, 100],
            spacings: vec![2.0, 2.0, 2.0, 1.5],
            slice_thickness: 2.0,
            repetition_time: 1.5,
        };

        let meta = extract_metadata(&header).unwrap();
        assert_eq!(meta.slice_axis(), SliceAxis::Z);
    }

    #[test]
    fn test_missing_thickness_defaults_to_z() {
        let header = RawHeader {
            dims: vec![64, 64, 30, 100],
            spacings: vec![2.0, 2.0, 4.0, 1.5],
            slice_thickness: f64::NAN,
            repetition_time: 1.5,
        };

        let meta = extract_metadata(&header).unwrap();
        assert_eq!(meta.slice_axis(), SliceAxis::Z);
        assert_eq!(meta.n_slices(), 30);
    }

    #[test]
    fn test_three_dim_header_has_one_volume() {
        let header = RawHeader {
            dims: vec![256, 256, 176],
            spacings: vec![1.0, 1.0, 1.2],
            slice_thickness: 1.2,
            repetition_time: 2.3,
        };

        let meta = extract_metadata(&header).unwrap();
        assert_eq!(meta.n_volumes(), 1);
    }

    #[test]
    fn test_zero_slices_rejected() {
        let header = RawHeader {
            dims: vec![64, 64, 0, 100],
            spacings: vec![3.0, 3.0, 3.0, 2.0],
            slice_thickness: 3.0,
            repetition_time: 2.0,
        };

        assert!(matches!(
            extract_metadata(&header),
            Err(CoreError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_negative_volumes_rejected() {
        let header = RawHeader {
            dims: vec![64, 64, 32, -4],
            spacings: vec![3.0, 3.0, 3.3, 2.0],
            slice_thickness: 3.3,
            repetition_time: 2.0,
        };

        assert!(matches!(
            extract_metadata(&header),
            Err(CoreError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_non_positive_tr_rejected() {
        for tr in [0.0, -1.0, f64::NAN] {
            let header = RawHeader {
                dims: vec![64, 64, 32, 100],
                spacings: vec![3.0, 3.0, 3.3, 2.0],
                slice_thickness: 3.3,
                repetition_time: tr,
            };

            assert!(matches!(
                extract_metadata(&header),
                Err(CoreError::InvalidHeader(_))
            ));
        }
    }

    #[test]
    fn test_too_few_dims_rejected() {
        let header = RawHeader {
            dims: vec![64, 64],
            spacings: vec![3.0, 3.0],
            slice_thickness: 3.0,
            repetition_time: 2.0,
        };

        assert!(matches!(
            extract_metadata(&header),
            Err(CoreError::InvalidHeader(_))
        ));
    }
}
