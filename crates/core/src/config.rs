//! Game configuration
//!
//! Every constant the core depends on lives in [`GameConfig`]: board size,
//! pool size, where and when the flow starts, how fast it fills a tile, how
//! screen coordinates map to slots and how new tiles are generated.
//!
//! Configurations are usually built from [`GameConfig::default`] or parsed
//! from JSON, where any missing field keeps its default:
//!
//! ```
//! use tui_pipes_core::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "columns": 10, "fill_ms": 500 }"#).unwrap();
//! assert_eq!(config.columns, 10);
//! assert_eq!(config.lines, 8);
//! assert_eq!(config.fill_ms, 500);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rng::GenerationPolicy;
use crate::types::{
    Edge, GridPos, DEFAULT_COLUMNS, DEFAULT_FILL_MS, DEFAULT_INITIAL_DELAY_MS, DEFAULT_LINES,
    DEFAULT_POOL_SIZE, DEFAULT_START_COLUMN, DEFAULT_START_LINE, MAX_BOARD_SIDE, MAX_POOL_SIZE,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board must be between 1x1 and {max}x{max} slots, got {columns}x{lines}")]
    BoardSize { columns: u16, lines: u16, max: u16 },
    #[error("pool capacity must be between 1 and {max}, got {capacity}")]
    PoolCapacity { capacity: usize, max: usize },
    #[error("start slot {pos} is outside the board")]
    StartOutOfBounds { pos: GridPos },
    #[error("fill duration must be positive")]
    ZeroFillDuration,
    #[error("screen slot size must be positive")]
    ZeroSlotSize,
    #[error("junction percent must be at most 100, got {0}")]
    JunctionPercent(u8),
    #[error("sequence policy needs at least one shape")]
    EmptySequence,
    #[error("sequence shape #{index} has {edges} edge(s), pipes need at least 2")]
    InvalidShape { index: usize, edges: u32 },
    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Linear mapping between screen coordinates and board slots.
///
/// Slot `(column, line)` covers the half-open screen rectangle starting at
/// `(x_offset + column * slot_width, y_offset + line * slot_height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenGeometry {
    pub x_offset: i32,
    pub y_offset: i32,
    pub slot_width: u16,
    pub slot_height: u16,
}

impl ScreenGeometry {
    /// Pixel layout of a 640x480 window: 48px slots at (227, 35).
    pub const PIXELS: ScreenGeometry = ScreenGeometry {
        x_offset: 227,
        y_offset: 35,
        slot_width: 48,
        slot_height: 48,
    };

    /// Character-cell layout used by the terminal frontend.
    pub const TERMINAL: ScreenGeometry = ScreenGeometry {
        x_offset: 2,
        y_offset: 2,
        slot_width: 5,
        slot_height: 3,
    };

    /// Slot under screen point `(x, y)`, if it lies on a `columns` x `lines` board.
    pub fn to_grid(&self, x: i32, y: i32, columns: u16, lines: u16) -> Option<GridPos> {
        if self.slot_width == 0 || self.slot_height == 0 {
            return None;
        }
        let dx = x.checked_sub(self.x_offset)?;
        let dy = y.checked_sub(self.y_offset)?;
        if dx < 0 || dy < 0 {
            return None;
        }
        let column = dx / i32::from(self.slot_width);
        let line = dy / i32::from(self.slot_height);
        if column >= i32::from(columns) || line >= i32::from(lines) {
            return None;
        }
        Some(GridPos::new(column as i16, line as i16))
    }

    /// Top-left screen point of the slot at `pos`.
    pub fn slot_origin(&self, pos: GridPos) -> (i32, i32) {
        (
            self.x_offset + i32::from(pos.column) * i32::from(self.slot_width),
            self.y_offset + i32::from(pos.line) * i32::from(self.slot_height),
        )
    }
}

impl Default for ScreenGeometry {
    fn default() -> Self {
        Self::PIXELS
    }
}

/// Where the flow enters the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartConfig {
    pub column: i16,
    pub line: i16,
    /// Edge of the start tile the flow enters through.
    pub entry: Edge,
}

impl StartConfig {
    pub fn pos(&self) -> GridPos {
        GridPos::new(self.column, self.line)
    }
}

impl Default for StartConfig {
    fn default() -> Self {
        Self {
            column: DEFAULT_START_COLUMN,
            line: DEFAULT_START_LINE,
            entry: Edge::Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub columns: u16,
    pub lines: u16,
    pub pool_capacity: usize,
    pub start: StartConfig,
    /// Game time before the flow enters the start slot.
    pub initial_delay_ms: u32,
    /// Game time the flow needs to cross one tile.
    pub fill_ms: u32,
    pub screen: ScreenGeometry,
    pub policy: GenerationPolicy,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            lines: DEFAULT_LINES,
            pool_capacity: DEFAULT_POOL_SIZE,
            start: StartConfig::default(),
            initial_delay_ms: DEFAULT_INITIAL_DELAY_MS,
            fill_ms: DEFAULT_FILL_MS,
            screen: ScreenGeometry::default(),
            policy: GenerationPolicy::default(),
            seed: 1,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0
            || self.lines == 0
            || self.columns > MAX_BOARD_SIDE
            || self.lines > MAX_BOARD_SIDE
        {
            return Err(ConfigError::BoardSize {
                columns: self.columns,
                lines: self.lines,
                max: MAX_BOARD_SIDE,
            });
        }
        if self.pool_capacity == 0 || self.pool_capacity > MAX_POOL_SIZE {
            return Err(ConfigError::PoolCapacity {
                capacity: self.pool_capacity,
                max: MAX_POOL_SIZE,
            });
        }
        let start = self.start.pos();
        if start.column < 0
            || start.line < 0
            || start.column as u16 >= self.columns
            || start.line as u16 >= self.lines
        {
            return Err(ConfigError::StartOutOfBounds { pos: start });
        }
        if self.fill_ms == 0 {
            return Err(ConfigError::ZeroFillDuration);
        }
        if self.screen.slot_width == 0 || self.screen.slot_height == 0 {
            return Err(ConfigError::ZeroSlotSize);
        }
        match &self.policy {
            GenerationPolicy::Classic => {}
            GenerationPolicy::Junctions { junction_percent } => {
                if *junction_percent > 100 {
                    return Err(ConfigError::JunctionPercent(*junction_percent));
                }
            }
            GenerationPolicy::Sequence { shapes } => {
                if shapes.is_empty() {
                    return Err(ConfigError::EmptySequence);
                }
                if let Some((index, shape)) = shapes.iter().enumerate().find(|(_, s)| !s.is_pipe())
                {
                    return Err(ConfigError::InvalidShape {
                        index,
                        edges: shape.count(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Connections;

    #[test]
    fn default_is_valid() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn pixel_mapping_matches_window_layout() {
        let geo = ScreenGeometry::PIXELS;
        assert_eq!(geo.to_grid(227, 35, 8, 8), Some(GridPos::new(0, 0)));
        assert_eq!(geo.to_grid(227 + 47, 35 + 47, 8, 8), Some(GridPos::new(0, 0)));
        assert_eq!(geo.to_grid(227 + 48, 35, 8, 8), Some(GridPos::new(1, 0)));
        assert_eq!(geo.to_grid(227 + 3 * 48 + 5, 35 + 7 * 48 + 1, 8, 8), Some(GridPos::new(3, 7)));
    }

    #[test]
    fn pixel_mapping_rejects_outside_points() {
        let geo = ScreenGeometry::PIXELS;
        assert_eq!(geo.to_grid(226, 35, 8, 8), None);
        assert_eq!(geo.to_grid(227, 34, 8, 8), None);
        // Right and bottom borders are exclusive.
        assert_eq!(geo.to_grid(227 + 8 * 48, 35, 8, 8), None);
        assert_eq!(geo.to_grid(227, 35 + 8 * 48, 8, 8), None);
        assert_eq!(geo.to_grid(i32::MIN, 0, 8, 8), None);
    }

    #[test]
    fn slot_origin_inverts_to_grid() {
        let geo = ScreenGeometry::TERMINAL;
        for column in 0..8 {
            for line in 0..8 {
                let pos = GridPos::new(column, line);
                let (x, y) = geo.slot_origin(pos);
                assert_eq!(geo.to_grid(x, y, 8, 8), Some(pos));
            }
        }
    }

    #[test]
    fn rejects_start_outside_board() {
        let config = GameConfig {
            start: StartConfig {
                column: 8,
                ..StartConfig::default()
            },
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartOutOfBounds { .. })
        ));
    }

    #[test]
    fn rejects_bad_sizes() {
        let empty = GameConfig {
            columns: 0,
            ..GameConfig::default()
        };
        assert!(matches!(empty.validate(), Err(ConfigError::BoardSize { .. })));

        let pool = GameConfig {
            pool_capacity: 0,
            ..GameConfig::default()
        };
        assert!(matches!(pool.validate(), Err(ConfigError::PoolCapacity { .. })));

        let fill = GameConfig {
            fill_ms: 0,
            ..GameConfig::default()
        };
        assert!(matches!(fill.validate(), Err(ConfigError::ZeroFillDuration)));
    }

    #[test]
    fn rejects_single_edge_sequence_shape() {
        let config = GameConfig {
            policy: GenerationPolicy::Sequence {
                shapes: vec![Connections::HORIZONTAL, Connections::from_edges(&[Edge::Top])],
            },
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidShape { index: 1, edges: 1 })
        ));
    }

    #[test]
    fn parses_policy_and_start_from_json() {
        let json = r#"{
            "start": { "column": 2, "line": 1, "entry": "top" },
            "policy": { "kind": "sequence", "shapes": [["left", "right"], ["top", "down"]] }
        }"#;
        let config = GameConfig::from_json_str(json).unwrap();
        assert_eq!(config.start.pos(), GridPos::new(2, 1));
        assert_eq!(config.start.entry, Edge::Top);
        assert_eq!(
            config.policy,
            GenerationPolicy::Sequence {
                shapes: vec![Connections::HORIZONTAL, Connections::VERTICAL]
            }
        );
    }

    #[test]
    fn json_round_trip_keeps_defaults() {
        let json = GameConfig::default().to_json_pretty().unwrap();
        let back = GameConfig::from_json_str(&json).unwrap();
        assert_eq!(back, GameConfig::default());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            GameConfig::from_json_str("{ columns: 3"),
            Err(ConfigError::Parse(_))
        ));
    }
}
