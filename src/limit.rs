//! Speed categories, their numeric limits and the shared sign artwork.
//!
//! A [`SpeedCategory`] is the discrete class a token displays: `0` means
//! "no limit", `1..=12` mean tens of km/h. Images live in an [`AssetRepo`]
//! owned by the host; tokens only carry an [`AssetKey`] into it, so many
//! tokens can share one image and the repository outlives every tray.

#[cfg(test)]
#[path = "limit_test.rs"]
mod limit_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{INITIAL_PATTERN, MAX_CATEGORY, NO_LIMIT_KMH};
use crate::error::TrayError;

/// Conversion factor from km/h to m/s.
const KMH_PER_MPS: f64 = 3.6;

/// Discrete speed-limit class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SpeedCategory(u8);

impl SpeedCategory {
    /// The "no limit" category.
    pub const NO_LIMIT: Self = Self(0);

    /// Create a category from its index (`0` = no limit, `n` = `10 n` km/h).
    ///
    /// # Errors
    ///
    /// Returns [`TrayError::InvalidConfiguration`] when `index > 12`.
    pub fn new(index: u8) -> Result<Self, TrayError> {
        if index > MAX_CATEGORY {
            return Err(TrayError::InvalidConfiguration(format!(
                "speed category {index} out of range 0..={MAX_CATEGORY}"
            )));
        }
        Ok(Self(index))
    }

    /// Category assigned to the token at `index` when a tray is built.
    #[must_use]
    pub fn initial_for(index: usize) -> Self {
        Self(INITIAL_PATTERN[index % INITIAL_PATTERN.len()])
    }

    /// Every category, no limit first.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=MAX_CATEGORY).map(Self)
    }

    #[must_use]
    pub fn index(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn is_unlimited(self) -> bool {
        self.0 == 0
    }

    /// Limit in km/h. "No limit" reports the stand-in high value.
    #[must_use]
    pub fn kmh(self) -> f64 {
        if self.is_unlimited() {
            NO_LIMIT_KMH
        } else {
            10.0 * f64::from(self.0)
        }
    }

    /// Limit in m/s as consumed by the simulation.
    #[must_use]
    pub fn value_mps(self) -> f64 {
        self.kmh() / KMH_PER_MPS
    }

    /// Key of the artwork for this category.
    #[must_use]
    pub fn asset_key(self) -> AssetKey {
        AssetKey(self.0)
    }

    /// Conventional artwork file name, e.g. `figs/Tempo60svg.svg` for 60 km/h.
    #[must_use]
    pub fn asset_file(self) -> String {
        format!("figs/Tempo{}0svg.svg", self.0)
    }
}

impl Default for SpeedCategory {
    fn default() -> Self {
        Self::NO_LIMIT
    }
}

impl TryFrom<u8> for SpeedCategory {
    type Error = TrayError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SpeedCategory> for u8 {
    fn from(category: SpeedCategory) -> Self {
        category.0
    }
}

impl fmt::Display for SpeedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unlimited() {
            write!(f, "no limit")
        } else {
            write!(f, "{} km/h", 10 * u32::from(self.0))
        }
    }
}

/// Reference to a shared image in an [`AssetRepo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AssetKey(u8);

impl AssetKey {
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

/// Host-owned sign images, one slot per speed category.
#[derive(Debug, Clone)]
pub struct AssetRepo<I> {
    images: Vec<I>,
}

impl<I> AssetRepo<I> {
    /// Build the repository by loading one image per category.
    pub fn from_fn(load: impl FnMut(SpeedCategory) -> I) -> Self {
        Self {
            images: SpeedCategory::all().map(load).collect(),
        }
    }

    /// Look up the image behind `key`.
    #[must_use]
    pub fn get(&self, key: AssetKey) -> Option<&I> {
        self.images.get(key.index())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
