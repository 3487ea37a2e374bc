use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}")]
    Parse {
        path: std::path::PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid colour {0:?}, expected #RRGGBB")]
    InvalidColor(String),
    #[error("block size must be greater than zero")]
    ZeroBlockSize,
    #[error("grid must be at least {min}x1 cells to fit the snake, got {width}x{height}")]
    GridTooSmall { width: usize, height: usize, min: usize },
}

/// Colours used to paint the board, as `#RRGGBB` strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub snake: String,
    pub snake_head: String,
    pub snake_border: String,
    pub food: String,
    pub food_border: String,
    pub background: String,
    pub border: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            snake: "#4CAF50".to_string(),
            snake_head: "#66BB6A".to_string(),
            snake_border: "#2E7D32".to_string(),
            food: "#FF4444".to_string(),
            food_border: "#CC0000".to_string(),
            background: "#000000".to_string(),
            border: "#4CAF50".to_string(),
        }
    }
}

impl Palette {
    /// Check that every entry parses
    pub fn validate(&self) -> Result<(), ConfigError> {
        for color in [
            &self.snake,
            &self.snake_head,
            &self.snake_border,
            &self.food,
            &self.food_border,
            &self.background,
            &self.border,
        ] {
            parse_hex_color(color)?;
        }
        Ok(())
    }
}

/// Parse a `#RRGGBB` string into its red, green and blue components
pub fn parse_hex_color(value: &str) -> Result<(u8, u8, u8), ConfigError> {
    let invalid = || ConfigError::InvalidColor(value.to_string());

    let hex = value.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
    };

    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Configuration for the game
///
/// The board is measured the way a drawing surface is: a canvas size in
/// pixels divided into square blocks. One block is one grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the drawing surface
    pub canvas_width: usize,
    /// Height of the drawing surface
    pub canvas_height: usize,
    /// Edge length of one cell
    pub block_size: usize,
    /// Ticks per second
    pub fps: u32,
    /// Points awarded per food eaten
    pub food_score: u32,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            block_size: 20,
            fps: 15,
            food_score: 10,
            initial_snake_length: 3,
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    /// Create a configuration whose grid is `width` x `height` cells
    pub fn with_grid(width: usize, height: usize) -> Self {
        let defaults = Self::default();
        Self {
            canvas_width: width * defaults.block_size,
            canvas_height: height * defaults.block_size,
            ..defaults
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::with_grid(10, 10)
    }

    /// Load a configuration from a JSON file, defaulting missing fields
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resize the grid, keeping the block size
    pub fn set_grid(&mut self, width: usize, height: usize) {
        self.canvas_width = width * self.block_size;
        self.canvas_height = height * self.block_size;
    }

    pub fn grid_width(&self) -> usize {
        self.canvas_width / self.block_size.max(1)
    }

    pub fn grid_height(&self) -> usize {
        self.canvas_height / self.block_size.max(1)
    }

    /// Time between two ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }

        // The starting snake extends left from the centre column.
        let min = self.initial_snake_length.max(1) * 2;
        if self.grid_width() < min || self.grid_height() == 0 {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width(),
                height: self.grid_height(),
                min,
            });
        }

        self.palette.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width(), 40);
        assert_eq!(config.grid_height(), 30);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.food_score, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_grid() {
        let config = GameConfig::with_grid(15, 12);
        assert_eq!(config.grid_width(), 15);
        assert_eq!(config.grid_height(), 12);
    }

    #[test]
    fn test_tick_interval() {
        let config = GameConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_secs(1) / 15);

        let stalled = GameConfig {
            fps: 0,
            ..GameConfig::default()
        };
        assert_eq!(stalled.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#4CAF50").unwrap(), (0x4c, 0xaf, 0x50));
        assert_eq!(parse_hex_color("#000000").unwrap(), (0, 0, 0));
        assert!(parse_hex_color("4CAF50").is_err());
        assert!(parse_hex_color("#4CAF5").is_err());
        assert!(parse_hex_color("#GGGGGG").is_err());
    }

    #[test]
    fn test_validate_rejects_tiny_grid() {
        let config = GameConfig::with_grid(4, 4);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooSmall { .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"fps": 8}"#).unwrap();
        assert_eq!(config.fps, 8);
        assert_eq!(config.grid_width(), 40);
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r##"{"canvas_width": 400, "palette": {"food": "#00FF00"}}"##)
            .unwrap();

        let config = GameConfig::from_file(&path).unwrap();
        assert_eq!(config.grid_width(), 20);
        assert_eq!(config.palette.food, "#00FF00");
        assert_eq!(config.palette.snake, "#4CAF50");
    }

    #[test]
    fn test_from_file_rejects_bad_colour() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r#"{"palette": {"food": "red"}}"#).unwrap();

        assert!(matches!(
            GameConfig::from_file(&path),
            Err(ConfigError::InvalidColor(_))
        ));
    }
}
