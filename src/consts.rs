//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Time between movements of the snake (ten steps per second)
pub(crate) const TICK_PERIOD: Duration = Duration::from_millis(100);

/// Number of terminal columns used to draw one cell of the board.  Two
/// columns per cell make the cells look roughly square.
pub(crate) const CELL_WIDTH: u16 = 2;

/// Number of terminal rows used to draw one cell of the board
pub(crate) const CELL_HEIGHT: u16 = 1;

/// Size, in terminal cells, of the area the board is drawn in
pub(crate) const SCREEN_SIZE: Size = Size {
    width: 64,
    height: 24,
};

/// Size of the board in grid cells
pub(crate) const BOARD_SIZE: Size = Size {
    width: SCREEN_SIZE.width / CELL_WIDTH,
    height: SCREEN_SIZE.height / CELL_HEIGHT,
};

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window: the board, its border, and the score bar above it.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: SCREEN_SIZE.width + 2,
    height: SCREEN_SIZE.height + 3,
};

/// Default location of the high score file, relative to the current
/// directory
pub(crate) const HIGH_SCORE_FILE: &str = "high_score.json";

/// Glyphs for a cell of the snake
pub(crate) const SNAKE_SYMBOL: &str = "██";

/// Glyphs for the food
pub(crate) const FOOD_SYMBOL: &str = "██";

/// Glyph marking an empty cell of the board
pub(crate) const GRID_SYMBOL: &str = "·";

/// Style for the snake
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`GRID_SYMBOL`]
pub(crate) const GRID_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
