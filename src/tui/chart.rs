//! Render-side chart state, accumulated from [`PlaybackEvent`]s.
//!
//! Widget code stays in `ui`; everything here is plain data so the scaling
//! and bookkeeping can be tested without a terminal.

use crate::replay::chart::{ChartSpec, PlaybackEvent};
use crate::types::product::Product;

/// Threshold below which a value range counts as flat and gets widened by a
/// fixed half unit instead of proportional padding.
const FLAT_RANGE: f64 = 0.001;

/// Fraction of the value range added as headroom above and below.
const RANGE_PADDING: f64 = 0.1;

/// Accumulated points and gap count for one stacked band.
#[derive(Debug, Clone, Default)]
pub struct BandState {
    points: Vec<(f64, f64)>,
    skipped: u64,
    extent: Option<(f64, f64)>,
}

impl BandState {
    fn push(&mut self, x: f64, y: f64) {
        self.points.push((x, y));
        self.extent = Some(match self.extent {
            Some((min, max)) => (min.min(y), max.max(y)),
            None => (y, y),
        });
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Instants this band reported with an empty value.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Value-axis bounds: the placeholder range until the first point
    /// arrives, then the data extent with padding so the line never hugs
    /// the band edge.
    pub fn y_bounds(&self, initial_range: (f64, f64)) -> [f64; 2] {
        match self.extent {
            None => [initial_range.0, initial_range.1],
            Some((min, max)) => {
                let range = max - min;
                if range < FLAT_RANGE {
                    [min - 0.5, max + 0.5]
                } else {
                    let padding = range * RANGE_PADDING;
                    [min - padding, max + padding]
                }
            }
        }
    }
}

/// Everything the dashboard draws: the static [`ChartSpec`] plus one
/// [`BandState`] per band, updated by [`ChartState::apply`].
pub struct ChartState {
    spec: ChartSpec,
    bands: Vec<BandState>,
    finished: bool,
}

impl ChartState {
    pub fn new(spec: ChartSpec) -> Self {
        let bands = vec![BandState::default(); spec.bands.len()];
        Self {
            spec,
            bands,
            finished: false,
        }
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    pub fn band(&self, index: usize) -> &BandState {
        &self.bands[index]
    }

    /// True once the player has delivered every frame.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Total points appended across all bands.
    pub fn point_count(&self) -> usize {
        self.bands.iter().map(|band| band.points.len()).sum()
    }

    /// Folds one playback event into the band it targets. Events for a
    /// product without a band are dropped.
    pub fn apply(&mut self, event: PlaybackEvent) {
        match event {
            PlaybackEvent::Point { product, x_ms, value } => {
                if let Some(band) = self.band_mut(product) {
                    band.push(x_ms as f64, value);
                }
            }
            PlaybackEvent::Skip { product, .. } => {
                if let Some(band) = self.band_mut(product) {
                    band.skipped += 1;
                }
            }
            PlaybackEvent::Finished => self.finished = true,
        }
    }

    /// Time-axis bounds shared by every band. A window collapsed to a
    /// single instant is widened so the axis keeps a nonzero span.
    pub fn x_bounds(&self) -> [f64; 2] {
        let start = self.spec.window.start_ms() as f64;
        let end = self.spec.window.end_ms() as f64;
        if end > start {
            [start, end]
        } else {
            [start, start + 1.0]
        }
    }

    fn band_mut(&mut self, product: Product) -> Option<&mut BandState> {
        let index = self
            .spec
            .bands
            .iter()
            .position(|band| band.product == product)?;
        self.bands.get_mut(index)
    }
}
