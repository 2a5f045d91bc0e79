/*!
Dimension-with-tolerance resolution.

Catalog dimensions are rarely a single number: a datasheet gives a nominal
value plus a manufacturing tolerance band. [`DimensionWithTolerance`] carries
whichever of `{minimum, nominal, maximum}` the vendor published, and
[`DimensionWithTolerance::resolve`] collapses it to a single `f64` following
a documented fallback chain governed by a [`DimensionPreference`].
*/

use crate::error::{Error, Result};

/// Which field of a [`DimensionWithTolerance`] a caller would prefer to use,
/// with a fallback chain if that field is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DimensionPreference {
    /// Try maximum, then nominal, then minimum.
    Maximum,
    /// Try nominal, then the midpoint of max/min, then maximum, then minimum.
    Nominal,
    /// Try minimum, then nominal, then maximum.
    Minimum,
}

/// A tagged value carrying an optional `{minimum, nominal, maximum}` triple.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DimensionWithTolerance {
    /// Minimum allowed value, if specified by the vendor.
    pub minimum: Option<f64>,
    /// Nominal (typical) value, if specified.
    pub nominal: Option<f64>,
    /// Maximum allowed value, if specified.
    pub maximum: Option<f64>,
}

impl DimensionWithTolerance {
    /// A dimension with only a nominal value - the common case for
    /// derived/computed dimensions.
    pub fn from_nominal(value: f64) -> Self {
        return Self {
            minimum: None,
            nominal: Some(value),
            maximum: None,
        };
    }

    /// Resolves `self` to a scalar following the fallback chain for
    /// `preference`:
    ///
    /// - [`DimensionPreference::Maximum`]: max → nom → min
    /// - [`DimensionPreference::Nominal`]: nom → (max+min)/2 → max → min
    /// - [`DimensionPreference::Minimum`]: min → nom → max
    ///
    /// Returns [`Error::InvalidGeometry`] if all three fields are absent.
    pub fn resolve(&self, preference: DimensionPreference) -> Result<f64> {
        let resolved = match preference {
            DimensionPreference::Maximum => self
                .maximum
                .or(self.nominal)
                .or(self.minimum),
            DimensionPreference::Minimum => self
                .minimum
                .or(self.nominal)
                .or(self.maximum),
            DimensionPreference::Nominal => self.nominal.or_else(|| match (self.maximum, self.minimum) {
                (Some(max), Some(min)) => Some((max + min) / 2.0),
                _ => None,
            }).or(self.maximum).or(self.minimum),
        };
        return resolved.ok_or_else(|| {
            Error::InvalidGeometry("dimension has no minimum, nominal or maximum value".into())
        });
    }

    /// Returns a copy of `self` with every field replaced by its
    /// [`DimensionPreference::Nominal`] resolution ("flattening"). Idempotent:
    /// flattening a flattened dimension returns the same value.
    pub fn flatten(&self) -> Result<Self> {
        let value = self.resolve(DimensionPreference::Nominal)?;
        return Ok(Self {
            minimum: Some(value),
            nominal: Some(value),
            maximum: Some(value),
        });
    }
}

/// A mapping of single-letter shape dimensions (e.g. `"A"`, `"B"`, `"C"`,
/// `"D"`, `"E"`, `"F"`) to their [`DimensionWithTolerance`]. Flattening a map
/// replaces every entry with its nominal resolution - this is the only
/// interface the geometry engine consumes.
pub type DimensionMap = std::collections::BTreeMap<String, DimensionWithTolerance>;

/// Flattens every entry of `dimensions`, in place semantics via a fresh map.
pub fn flatten_dimensions(dimensions: &DimensionMap) -> Result<DimensionMap> {
    let mut flattened = DimensionMap::new();
    for (letter, dimension) in dimensions {
        flattened.insert(letter.clone(), dimension.flatten()?);
    }
    return Ok(flattened);
}

/// Rounds `value` to `decimals` decimal places. All lengths are rounded this
/// way on write; `round_float` must be idempotent, which holds here because
/// rounding a value already at the target precision reproduces it exactly
/// up to the same `f64` rounding each time.
pub fn round_float(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    return (value * factor).round() / factor;
}
