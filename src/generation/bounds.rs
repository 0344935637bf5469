//! Grid size and minimum route length for one dungeon.

use crate::config::GeneratorConfig;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Validated grid dimensions and the minimum Entrance-to-Exit hop count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGridBounds")]
pub struct GridBounds {
    width: usize,
    height: usize,
    min_path_length: usize,
}

/// Unchecked wire form; deserialized bounds go through `GridBounds::new`
#[derive(Deserialize)]
struct RawGridBounds {
    width: usize,
    height: usize,
    min_path_length: usize,
}

impl TryFrom<RawGridBounds> for GridBounds {
    type Error = ConfigError;

    fn try_from(raw: RawGridBounds) -> Result<Self, Self::Error> {
        GridBounds::new(raw.width, raw.height, raw.min_path_length)
    }
}

impl GridBounds {
    /// Checks that the grid is non-empty and the route length is satisfiable.
    /// Size limits are checked separately by [`GridBounds::fit`].
    pub fn new(width: usize, height: usize, min_path_length: usize) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension { width, height });
        }
        if min_path_length == 0 {
            return Err(ConfigError::ZeroPathLength);
        }
        let max = max_manhattan(width, height);
        if min_path_length > max {
            return Err(ConfigError::PathLengthUnsatisfiable {
                min_path_length,
                width,
                height,
                max,
            });
        }
        Ok(Self {
            width,
            height,
            min_path_length,
        })
    }

    /// `new` plus the size limits of `config`
    pub fn checked(
        width: usize,
        height: usize,
        min_path_length: usize,
        config: &GeneratorConfig,
    ) -> Result<Self, ConfigError> {
        let bounds = Self::new(width, height, min_path_length)?;
        bounds.fit(config)?;
        Ok(bounds)
    }

    /// Fails if the grid is larger than `config` allows
    pub fn fit(&self, config: &GeneratorConfig) -> Result<(), ConfigError> {
        if self.width > config.max_width {
            return Err(ConfigError::WidthTooLarge {
                width: self.width,
                max: config.max_width,
            });
        }
        if self.height > config.max_height {
            return Err(ConfigError::HeightTooLarge {
                height: self.height,
                max: config.max_height,
            });
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn min_path_length(&self) -> usize {
        self.min_path_length
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Longest Manhattan distance between two cells of this grid
    pub fn max_path_length(&self) -> usize {
        max_manhattan(self.width, self.height)
    }
}

fn max_manhattan(width: usize, height: usize) -> usize {
    width.saturating_sub(1) + height.saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bounds() {
        let bounds = GridBounds::new(10, 10, 8).unwrap();
        assert_eq!(bounds.width(), 10);
        assert_eq!(bounds.height(), 10);
        assert_eq!(bounds.min_path_length(), 8);
        assert_eq!(bounds.max_path_length(), 18);
        assert_eq!(bounds.cell_count(), 100);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            GridBounds::new(0, 5, 1),
            Err(ConfigError::ZeroDimension { width: 0, height: 5 })
        );
        assert!(GridBounds::new(5, 0, 1).is_err());
    }

    #[test]
    fn test_zero_path_length_rejected() {
        assert_eq!(GridBounds::new(5, 5, 0), Err(ConfigError::ZeroPathLength));
    }

    #[test]
    fn test_path_length_at_grid_diameter_accepted() {
        assert!(GridBounds::new(7, 4, 9).is_ok());
        assert!(GridBounds::new(1, 6, 5).is_ok());
    }

    #[test]
    fn test_path_length_past_grid_diameter_rejected() {
        assert_eq!(
            GridBounds::new(7, 4, 10),
            Err(ConfigError::PathLengthUnsatisfiable {
                min_path_length: 10,
                width: 7,
                height: 4,
                max: 9
            })
        );
        // A single cell cannot hold any route
        assert!(GridBounds::new(1, 1, 1).is_err());
    }

    #[test]
    fn test_fit_against_limits() {
        let config = GeneratorConfig {
            max_width: 8,
            max_height: 6,
            ..Default::default()
        };
        assert!(GridBounds::checked(8, 6, 4, &config).is_ok());
        assert_eq!(
            GridBounds::checked(9, 6, 4, &config),
            Err(ConfigError::WidthTooLarge { width: 9, max: 8 })
        );
        assert_eq!(
            GridBounds::checked(8, 7, 4, &config),
            Err(ConfigError::HeightTooLarge { height: 7, max: 6 })
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let bounds: GridBounds =
            serde_json::from_str(r#"{"width":10,"height":10,"min_path_length":8}"#).unwrap();
        assert_eq!(bounds, GridBounds::new(10, 10, 8).unwrap());

        let err = serde_json::from_str::<GridBounds>(r#"{"width":1,"height":1,"min_path_length":5}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unsatisfiable"), "{err}");

        let err = serde_json::from_str::<GridBounds>(r#"{"width":0,"height":4,"min_path_length":1}"#)
            .unwrap_err();
        assert!(err.to_string().contains("must be positive"), "{err}");
    }
}
