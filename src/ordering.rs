//! Acquisition order resolution.
//!
//! Scanners excite slices in one of a handful of temporal patterns. The
//! resolver maps a declared pattern onto the concrete sequence of
//! excitation instants for a given slice count. Ordering patterns live
//! in a lookup table of plain functions so a single pattern (notably the
//! vendor interleave variant, which is not verified against firmware
//! documentation) can be swapped without touching resolution logic.

use serde::Serialize;

use crate::error::{CoreError, Result};

/// Declared slice acquisition pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OrderKind {
    SequentialAscending,
    SequentialDescending,
    InterleavedStandard,
    InterleavedVendorVariant,
    Multiband,
}

impl OrderKind {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SequentialAscending => "sequential ascending",
            Self::SequentialDescending => "sequential descending",
            Self::InterleavedStandard => "interleaved",
            Self::InterleavedVendorVariant => "interleaved (vendor variant)",
            Self::Multiband => "multiband",
        }
    }
}

impl std::fmt::Display for OrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Protocol-declared ordering parameters, validated before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AcquisitionOrderSpec {
    kind: OrderKind,
    multiband_factor: usize,
    band_order: OrderKind,
}

impl AcquisitionOrderSpec {
    /// Spec for a single-band acquisition.
    #[must_use]
    pub const fn new(kind: OrderKind) -> Self {
        Self {
            kind,
            multiband_factor: 1,
            band_order: OrderKind::SequentialAscending,
        }
    }

    /// Spec for a multiband acquisition. `band_order` is the pattern
    /// applied across the distinct excitation instants.
    #[must_use]
    pub const fn multiband(factor: usize, band_order: OrderKind) -> Self {
        Self {
            kind: OrderKind::Multiband,
            multiband_factor: factor,
            band_order,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> OrderKind {
        self.kind
    }

    #[must_use]
    pub const fn multiband_factor(&self) -> usize {
        self.multiband_factor
    }

    #[must_use]
    pub const fn band_order(&self) -> OrderKind {
        self.band_order
    }
}

/// Temporal sequence of excitation instants.
///
/// Each instant lists the physical slice indices excited together. For
/// single-band patterns every instant is a singleton and the flattened
/// sequence is an exact permutation of `0..n_slices`; multiband instants
/// hold one slice per simultaneous-excitation group. Every slice appears
/// exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceOrder {
    instants: Vec<Vec<usize>>,
    n_slices: usize,
}

impl SliceOrder {
    fn from_permutation(permutation: Vec<usize>) -> Self {
        let n_slices = permutation.len();
        Self {
            instants: permutation.into_iter().map(|slice| vec![slice]).collect(),
            n_slices,
        }
    }

    #[must_use]
    pub const fn n_slices(&self) -> usize {
        self.n_slices
    }

    /// Number of distinct excitation instants. Equals `n_slices` for
    /// single-band patterns, `n_slices / multiband_factor` otherwise.
    #[must_use]
    pub fn num_instants(&self) -> usize {
        self.instants.len()
    }

    #[must_use]
    pub fn instants(&self) -> &[Vec<usize>] {
        &self.instants
    }

    /// Slice indices in acquisition order, co-excited slices adjacent.
    #[must_use]
    pub fn flattened(&self) -> Vec<usize> {
        self.instants.iter().flatten().copied().collect()
    }
}

/// Ordering pattern over `n` items: returns the acquisition sequence as
/// a permutation of `0..n`.
pub type OrderingStrategy = fn(usize) -> Vec<usize>;

fn sequential_ascending(n: usize) -> Vec<usize> {
    (0..n).collect()
}

fn sequential_descending(n: usize) -> Vec<usize> {
    (0..n).rev().collect()
}

fn interleaved_standard(n: usize) -> Vec<usize> {
    (0..n).step_by(2).chain((1..n).step_by(2)).collect()
}

fn interleaved_vendor_variant(n: usize) -> Vec<usize> {
    (1..n).step_by(2).chain((0..n).step_by(2)).collect()
}

/// Resolves an [`AcquisitionOrderSpec`] into a [`SliceOrder`].
#[derive(Debug, Clone)]
pub struct OrderResolver {
    strategies: Vec<(OrderKind, OrderingStrategy)>,
}

impl OrderResolver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategies: vec![
                (OrderKind::SequentialAscending, sequential_ascending),
                (OrderKind::SequentialDescending, sequential_descending),
                (OrderKind::InterleavedStandard, interleaved_standard),
                (
                    OrderKind::InterleavedVendorVariant,
                    interleaved_vendor_variant,
                ),
            ],
        }
    }

    /// Replaces the ordering pattern for `kind`, or registers it if
    /// absent. Intended for correcting the vendor interleave variant.
    #[must_use]
    pub fn with_strategy(mut self, kind: OrderKind, strategy: OrderingStrategy) -> Self {
        if let Some(entry) = self.strategies.iter_mut().find(|(k, _)| *k == kind) {
            entry.1 = strategy;
        } else {
            self.strategies.push((kind, strategy));
        }
        self
    }

    fn strategy_for(&self, kind: OrderKind) -> Result<OrderingStrategy> {
        self.strategies
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, strategy)| *strategy)
            .ok_or_else(|| CoreError::UnsupportedAcquisitionOrder(kind.name().to_string()))
    }

    pub fn resolve(&self, n_slices: usize, spec: &AcquisitionOrderSpec) -> Result<SliceOrder> {
        if n_slices == 0 {
            return Err(CoreError::InvalidHeader(
                "slice count must be positive".to_string(),
            ));
        }

        match spec.kind() {
            OrderKind::Multiband => self.resolve_multiband(n_slices, spec),
            kind => {
                let strategy = self.strategy_for(kind)?;
                Ok(SliceOrder::from_permutation(strategy(n_slices)))
            }
        }
    }

    fn resolve_multiband(&self, n_slices: usize, spec: &AcquisitionOrderSpec) -> Result<SliceOrder> {
        let factor = spec.multiband_factor();
        if factor == 0 {
            return Err(CoreError::UnsupportedAcquisitionOrder(
                "multiband factor must be at least 1".to_string(),
            ));
        }
        if spec.band_order() == OrderKind::Multiband {
            return Err(CoreError::UnsupportedAcquisitionOrder(
                "multiband band order cannot itself be multiband".to_string(),
            ));
        }
        if n_slices % factor != 0 {
            return Err(CoreError::MultibandFactorMismatch { n_slices, factor });
        }

        // Slice i belongs to group i % factor; the p-th member of every
        // group is excited at the same instant, so instant p covers the
        // contiguous run p*factor..(p+1)*factor.
        let num_instants = n_slices / factor;
        let strategy = self.strategy_for(spec.band_order())?;
        let instants = strategy(num_instants)
            .into_iter()
            .map(|p| (p * factor..(p + 1) * factor).collect())
            .collect();

        Ok(SliceOrder {
            instants,
            n_slices,
        })
    }
}

impl Default for OrderResolver {
    fn default() -> Self {
        Self::new()
    }
}
