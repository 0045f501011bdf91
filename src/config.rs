use thiserror::Error;

/// Startup configuration, read once in `main` and immutable afterwards.
///
/// The grid is sized to fit the display area: each cell occupies a
/// `cell_size_px` square, inset by `cell_border_px` of background on every
/// side so neighboring cells stay visually separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub display_width_px: u32,
    pub display_height_px: u32,
    pub cell_size_px: u32,
    pub cell_border_px: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cell size must be at least 1 pixel")]
    ZeroCellSize,
    #[error("cell border of {border}px does not fit in a {cell_size}px cell")]
    BorderTooLarge { border: u32, cell_size: u32 },
    #[error("display of {width}x{height}px leaves no room for any cell")]
    DisplayTooSmall { width: u32, height: u32 },
}

impl Config {
    pub fn new(
        display_width_px: u32,
        display_height_px: u32,
        cell_size_px: u32,
        cell_border_px: u32,
    ) -> Result<Self, ConfigError> {
        if cell_size_px == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if cell_border_px * 2 >= cell_size_px {
            return Err(ConfigError::BorderTooLarge {
                border: cell_border_px,
                cell_size: cell_size_px,
            });
        }
        let config = Self {
            display_width_px,
            display_height_px,
            cell_size_px,
            cell_border_px,
        };
        if config.grid_width() == 0 || config.grid_height() == 0 {
            return Err(ConfigError::DisplayTooSmall {
                width: display_width_px,
                height: display_height_px,
            });
        }
        Ok(config)
    }

    /// Number of whole cells that fit across the display.
    pub fn grid_width(&self) -> u32 {
        self.display_width_px
            .saturating_sub(2 * self.cell_border_px)
            / self.cell_size_px
    }

    /// Number of whole cells that fit down the display.
    pub fn grid_height(&self) -> u32 {
        self.display_height_px
            .saturating_sub(2 * self.cell_border_px)
            / self.cell_size_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_grid_dimensions_from_display() {
        let config = Config::new(800, 800, 10, 1).unwrap();
        assert_eq!(config.grid_width(), 79);
        assert_eq!(config.grid_height(), 79);
    }

    #[test]
    fn exact_fit_without_border() {
        let config = Config::new(100, 60, 10, 0).unwrap();
        assert_eq!(config.grid_width(), 10);
        assert_eq!(config.grid_height(), 6);
    }

    #[test]
    fn rejects_zero_cell_size() {
        assert_eq!(Config::new(800, 800, 0, 0), Err(ConfigError::ZeroCellSize));
    }

    #[test]
    fn rejects_border_that_swallows_the_cell() {
        assert_eq!(
            Config::new(800, 800, 4, 2),
            Err(ConfigError::BorderTooLarge { border: 2, cell_size: 4 })
        );
    }

    #[test]
    fn rejects_display_smaller_than_one_cell() {
        assert_eq!(
            Config::new(8, 8, 10, 1),
            Err(ConfigError::DisplayTooSmall { width: 8, height: 8 })
        );
    }
}
