//! Per-slice acquisition timing.

use serde::Serialize;

use crate::error::{CoreError, Result};
use crate::header::HeaderMetadata;
use crate::ordering::{AcquisitionOrderSpec, OrderResolver, SliceOrder};

/// Time offsets within one repetition, indexed by physical slice.
///
/// Serializes as a bare numeric array, one float per slice, ready for a
/// sidecar writer to embed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SliceTimingTable {
    offsets: Vec<f64>,
}

impl SliceTimingTable {
    #[must_use]
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    #[must_use]
    pub fn get(&self, slice: usize) -> Option<f64> {
        self.offsets.get(slice).copied()
    }
}

/// Computes per-slice offsets from a resolved order.
///
/// Each excitation instant occupies an equal share of the repetition
/// window: `offset = rank / num_instants * tr`. The table is indexed by
/// physical slice, not acquisition rank, so downstream consumers get
/// timing aligned to anatomical slice position.
pub fn slice_timing(order: &SliceOrder, tr: f64) -> Result<SliceTimingTable> {
    if !tr.is_finite() || tr <= 0.0 {
        return Err(CoreError::InvalidHeader(format!(
            "repetition time must be positive, got {tr}"
        )));
    }

    let num_instants = order.num_instants() as f64;
    let mut offsets = vec![0.0; order.n_slices()];
    for (rank, group) in order.instants().iter().enumerate() {
        let offset = rank as f64 / num_instants * tr;
        for &slice in group {
            offsets[slice] = offset;
        }
    }

    Ok(SliceTimingTable { offsets })
}

/// Resolves the declared order and computes the timing table in one
/// step, using the default strategy table.
pub fn create_slice_timing(
    meta: &HeaderMetadata,
    spec: &AcquisitionOrderSpec,
) -> Result<SliceTimingTable> {
    let order = OrderResolver::new().resolve(meta.n_slices(), spec)?;
    slice_timing(&order, meta.tr())
}
