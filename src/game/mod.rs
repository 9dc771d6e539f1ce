mod board;
mod direction;
mod snake;
pub(crate) use self::board::Bounds;
use self::direction::Direction;
use self::snake::Snake;
use crate::command::Command;
use crate::consts;
use crate::util::{center_rect, get_display_area};
use crossterm::event::Event;
use rand::Rng;
use ratatui::{
    buffer::{Buffer, Cell},
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::Line,
    widgets::Widget,
    Frame,
};

#[derive(Clone, Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    score: u32,
    high_score: u32,
    snake: Snake,
    food: Option<Position>,
    state: GameState,
    bounds: Bounds,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(high_score: u32) -> Self {
        Game::new_with_rng(Bounds::from(consts::BOARD_SIZE), high_score, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(bounds: Bounds, high_score: u32, rng: R) -> Game<R> {
        let mut game = Game {
            rng,
            score: 0,
            high_score,
            snake: Snake::new(bounds.center(), Direction::East),
            food: None,
            state: GameState::Running,
            bounds,
        };
        game.place_food();
        game
    }

    /// Move the snake forwards one cell, eating the food or colliding with
    /// itself as appropriate
    pub(crate) fn advance(&mut self) {
        if !self.running() {
            return;
        }
        let head = self.snake.next_head(self.bounds);
        if self.snake.contains(head) {
            log::info!(
                "Snake ran into itself at ({}, {}); final score: {}",
                head.x,
                head.y,
                self.score
            );
            self.state = GameState::Dead;
            return;
        }
        self.snake.push_head(head);
        if self.food == Some(head) {
            self.score += 1;
            log::debug!("Ate food at ({}, {}); score: {}", head.x, head.y, self.score);
            self.place_food();
        } else {
            self.snake.pop_tail();
        }
    }

    /// Place the food on a random cell not occupied by the snake.  If there
    /// are no such cells, the game is won.
    fn place_food(&mut self) {
        if self.snake.len() >= self.bounds.area() {
            log::info!("Snake fills the board; final score: {}", self.score);
            self.food = None;
            self.state = GameState::Won;
            return;
        }
        loop {
            let pos = Position::new(
                self.rng.random_range(0..self.bounds.width),
                self.rng.random_range(0..self.bounds.height),
            );
            if !self.snake.contains(pos) {
                self.food = Some(pos);
                return;
            }
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// Process this tick's input events in the order they were received
    pub(crate) fn handle_events<I: IntoIterator<Item = Event>>(&mut self, events: I) {
        for event in events {
            self.handle_event(&event);
        }
    }

    fn handle_event(&mut self, event: &Event) {
        if !self.running() {
            return;
        }
        let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event) else {
            return;
        };
        let direction = match cmd {
            Command::Quit => {
                log::info!("Quit requested; final score: {}", self.score);
                self.state = GameState::Quit;
                return;
            }
            Command::Up => Direction::North,
            Command::Down => Direction::South,
            Command::Left => Direction::West,
            Command::Right => Direction::East,
        };
        if self.snake.turn(direction) {
            log::debug!("Heading {direction:?}");
        }
    }

    fn running(&self) -> bool {
        self.state == GameState::Running
    }

    /// Returns `true` once the game has ended for any reason
    pub(crate) fn terminated(&self) -> bool {
        !self.running()
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    /// Fold the current score into the high score and return the result
    pub(crate) fn finish(&mut self) -> u32 {
        if self.score > self.high_score {
            log::info!("New high score: {} (was {})", self.score, self.high_score);
            self.high_score = self.score;
        }
        self.high_score
    }

    /// Size of the board plus its border, in terminal cells
    fn block_size(&self) -> Size {
        Size {
            width: self
                .bounds
                .width
                .saturating_mul(consts::CELL_WIDTH)
                .saturating_add(2),
            height: self
                .bounds
                .height
                .saturating_mul(consts::CELL_HEIGHT)
                .saturating_add(2),
        }
    }
}

#[cfg(test)]
impl<R> Game<R> {
    /// Replace the snake (heading east, head first) and the food
    pub(crate) fn set_board(&mut self, snake: &[(u16, u16)], food: (u16, u16)) {
        self.snake = Snake::from_cells(snake, Direction::East);
        self.food = Some(Position::new(food.0, food.1));
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, block_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(display);
        Line::styled(format!(" Score: {}", self.score), consts::SCORE_BAR_STYLE)
            .render(score_area, buf);
        Line::raw(format!("High Score: {} ", self.high_score))
            .right_aligned()
            .render(score_area, buf);

        let block_area = center_rect(block_area, self.block_size());
        DottedBorder.render(block_area, buf);

        let board_area = block_area.inner(Margin::new(1, 1));
        let mut board = Canvas {
            area: board_area,
            buf,
        };
        for pos in self.bounds.positions() {
            board.draw_cell(pos, consts::GRID_SYMBOL, consts::GRID_STYLE);
        }
        for pos in self.snake.cells() {
            board.draw_cell(pos, consts::SNAKE_SYMBOL, consts::SNAKE_STYLE);
        }
        if let Some(pos) = self.food {
            board.draw_cell(pos, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
    }
}

/// A rectangle of the buffer addressed in coordinates relative to its
/// top-left corner.  Anything drawn outside the buffer is dropped.
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn cell_at(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        let x = self.area.x.checked_add(x)?;
        let y = self.area.y.checked_add(y)?;
        self.buf.cell_mut((x, y))
    }

    fn draw_char(&mut self, x: u16, y: u16, symbol: char) {
        if let Some(cell) = self.cell_at(x, y) {
            cell.set_char(symbol);
        }
    }

    /// Draw `symbol` in the board cell at `pos`, one character per terminal
    /// column
    fn draw_cell(&mut self, pos: Position, symbol: &str, style: Style) {
        let (Some(x), Some(y)) = (
            pos.x.checked_mul(consts::CELL_WIDTH),
            pos.y.checked_mul(consts::CELL_HEIGHT),
        ) else {
            return;
        };
        for (offset, ch) in (0..consts::CELL_WIDTH).zip(symbol.chars()) {
            if let Some(cell) = x.checked_add(offset).and_then(|cx| self.cell_at(cx, y)) {
                cell.set_char(ch);
                cell.set_style(Style::reset().patch(style));
            }
        }
    }
}

/// Dotted frame around the board.  The snake passes through it, coming out
/// on the opposite side, so it is drawn with dots rather than solid lines.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let right = area.width - 1;
        let bottom = area.height - 1;
        let mut canvas = Canvas { area, buf };
        for x in 0..=right {
            let symbol = if x == 0 || x == right { '·' } else { '⋯' };
            canvas.draw_char(x, 0, symbol);
            canvas.draw_char(x, bottom, symbol);
        }
        for y in 1..bottom {
            canvas.draw_char(0, y, '⋮');
            canvas.draw_char(right, y, '⋮');
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    /// The snake ran into itself
    Dead,
    /// The snake has filled the board and there are no more cells to place
    /// food in
    Won,
    /// The player closed the game
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_game(width: u16, height: u16) -> Game<ChaCha12Rng> {
        Game::new_with_rng(
            Bounds { width, height },
            0,
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
    }

    fn set_snake<R>(game: &mut Game<R>, cells: &[(u16, u16)], direction: Direction) {
        game.snake = Snake::from_cells(cells, direction);
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    #[test]
    fn fresh_game() {
        let game = new_game(32, 24);
        assert_eq!(game.snake.cell_list(), [Position::new(16, 12)]);
        assert_eq!(game.snake.direction, Direction::East);
        assert_eq!(game.score, 0);
        assert_eq!(game.state, GameState::Running);
        let food = game.food.unwrap();
        assert!(!game.snake.contains(food));
        assert!(food.x < 32 && food.y < 24);
    }

    #[test]
    fn eat_food() {
        let mut game = new_game(32, 24);
        set_snake(&mut game, &[(5, 5)], Direction::East);
        game.food = Some(Position::new(6, 5));
        game.advance();
        assert_eq!(
            game.snake.cell_list(),
            [Position::new(6, 5), Position::new(5, 5)]
        );
        assert_eq!(game.score, 1);
        assert_eq!(game.state, GameState::Running);
        let food = game.food.unwrap();
        assert_ne!(food, Position::new(6, 5));
        assert_ne!(food, Position::new(5, 5));
    }

    #[test]
    fn move_without_eating() {
        let mut game = new_game(32, 24);
        set_snake(&mut game, &[(5, 5), (4, 5), (3, 5)], Direction::East);
        game.food = Some(Position::new(20, 20));
        game.advance();
        assert_eq!(
            game.snake.cell_list(),
            [Position::new(6, 5), Position::new(5, 5), Position::new(4, 5)]
        );
        assert_eq!(game.score, 0);
        assert_eq!(game.food, Some(Position::new(20, 20)));
    }

    #[rstest]
    #[case((31, 5), Direction::East, (0, 5))]
    #[case((0, 5), Direction::West, (31, 5))]
    #[case((7, 0), Direction::North, (7, 23))]
    #[case((7, 23), Direction::South, (7, 0))]
    fn wraparound(
        #[case] start: (u16, u16),
        #[case] direction: Direction,
        #[case] end: (u16, u16),
    ) {
        let mut game = new_game(32, 24);
        set_snake(&mut game, &[start], direction);
        game.food = Some(Position::new(15, 15));
        game.advance();
        assert_eq!(game.snake.head(), Position::new(end.0, end.1));
        assert_eq!(game.snake.len(), 1);
        assert_eq!(game.state, GameState::Running);
    }

    #[test]
    fn collide_with_wrapped_tail() {
        let mut game = new_game(32, 24);
        set_snake(&mut game, &[(0, 5), (31, 5)], Direction::West);
        game.food = Some(Position::new(10, 10));
        let before = game.snake.clone();
        game.advance();
        assert_eq!(game.state, GameState::Dead);
        assert!(game.terminated());
        assert_eq!(game.snake, before);
        assert_eq!(game.score, 0);
    }

    #[test]
    fn self_collision() {
        let mut game = new_game(32, 24);
        // A loop with the head about to move down into its own body
        set_snake(
            &mut game,
            &[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)],
            Direction::South,
        );
        game.food = Some(Position::new(10, 10));
        let before = game.snake.clone();
        game.advance();
        assert_eq!(game.state, GameState::Dead);
        assert_eq!(game.snake, before);
    }

    #[test]
    fn no_advance_after_termination() {
        let mut game = new_game(32, 24);
        game.handle_events([Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        ))]);
        assert_eq!(game.state, GameState::Quit);
        let before = game.snake.clone();
        game.advance();
        assert_eq!(game.snake, before);
    }

    #[test]
    fn food_never_on_snake() {
        let mut game = new_game(4, 4);
        let cells = Bounds {
            width: 4,
            height: 4,
        }
        .positions()
        .skip(3)
        .map(|p| (p.x, p.y))
        .collect::<Vec<_>>();
        set_snake(&mut game, &cells, Direction::East);
        for _ in 0..100 {
            game.place_food();
            let food = game.food.unwrap();
            assert!(!game.snake.contains(food));
            assert!(food.y == 0 && food.x < 3);
        }
        assert_eq!(game.state, GameState::Running);
    }

    #[test]
    fn fill_board() {
        let mut game = new_game(2, 2);
        set_snake(&mut game, &[(0, 0), (1, 0), (1, 1)], Direction::South);
        game.food = Some(Position::new(0, 1));
        game.advance();
        assert_eq!(game.snake.len(), 4);
        assert_eq!(game.score, 1);
        assert_eq!(game.food, None);
        assert_eq!(game.state, GameState::Won);
        assert!(game.terminated());
    }

    #[rstest]
    #[case(Direction::East, &[KeyCode::Left], Direction::East)]
    #[case(Direction::East, &[KeyCode::Up], Direction::North)]
    #[case(Direction::East, &[KeyCode::Up, KeyCode::Left], Direction::West)]
    #[case(Direction::East, &[KeyCode::Up, KeyCode::Down], Direction::North)]
    #[case(Direction::North, &[KeyCode::Down, KeyCode::Right], Direction::East)]
    #[case(Direction::South, &[KeyCode::Left, KeyCode::Up, KeyCode::Right], Direction::East)]
    #[case(Direction::South, &[KeyCode::Left, KeyCode::Right], Direction::West)]
    #[case(Direction::North, &[KeyCode::Down, KeyCode::Down], Direction::North)]
    #[case(Direction::West, &[], Direction::West)]
    fn sequential_turns(
        #[case] start: Direction,
        #[case] keys: &[KeyCode],
        #[case] end: Direction,
    ) {
        let mut game = new_game(32, 24);
        set_snake(&mut game, &[(5, 5)], start);
        game.handle_events(keys.iter().map(|&code| key(code)));
        assert_eq!(game.snake.direction, end);
        assert_eq!(game.state, GameState::Running);
    }

    #[test]
    fn ignored_events() {
        let mut game = new_game(32, 24);
        game.handle_events([
            Event::Key(KeyEvent::new_with_kind(
                KeyCode::Up,
                KeyModifiers::NONE,
                KeyEventKind::Release,
            )),
            key(KeyCode::Char('q')),
            key(KeyCode::Esc),
            Event::FocusLost,
            Event::Resize(80, 24),
        ]);
        assert_eq!(game.snake.direction, Direction::East);
        assert_eq!(game.state, GameState::Running);
    }

    #[test]
    fn events_after_quit_ignored() {
        let mut game = new_game(32, 24);
        game.handle_events([
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            key(KeyCode::Up),
        ]);
        assert_eq!(game.state, GameState::Quit);
        assert_eq!(game.snake.direction, Direction::East);
    }

    #[rstest]
    #[case(3, 5, 5)]
    #[case(5, 5, 5)]
    #[case(8, 5, 8)]
    #[case(0, 0, 0)]
    fn finish(#[case] score: u32, #[case] high_score: u32, #[case] r: u32) {
        let mut game = new_game(32, 24);
        game.score = score;
        game.high_score = high_score;
        assert_eq!(game.finish(), r);
        assert_eq!(game.high_score, r);
    }

    #[test]
    fn render() {
        let mut game = new_game(6, 4);
        set_snake(&mut game, &[(2, 1), (1, 1), (1, 2)], Direction::East);
        game.food = Some(Position::new(4, 3));
        game.score = 2;
        game.high_score = 5;
        let area = Rect::new(0, 0, 66, 27);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            " Score: 2                                           High Score: 5 ",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "                          ·⋯⋯⋯⋯⋯⋯⋯⋯⋯⋯⋯⋯·                          ",
            "                          ⋮· · · · · · ⋮                          ",
            "                          ⋮· ████· · · ⋮                          ",
            "                          ⋮· ██· · · · ⋮                          ",
            "                          ⋮· · · · ██· ⋮                          ",
            "                          ·⋯⋯⋯⋯⋯⋯⋯⋯⋯⋯⋯⋯·                          ",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
        ]);
        expected.set_style(Rect::new(0, 0, 66, 1), consts::SCORE_BAR_STYLE);
        for pos in game.bounds.positions() {
            expected.set_style(Rect::new(27 + pos.x * 2, 12 + pos.y, 1, 1), consts::GRID_STYLE);
        }
        for (x, y) in [(2, 1), (1, 1), (1, 2)] {
            expected.set_style(Rect::new(27 + x * 2, 12 + y, 2, 1), consts::SNAKE_STYLE);
        }
        expected.set_style(Rect::new(35, 15, 2, 1), consts::FOOD_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn dotted_border() {
        let area = Rect::new(0, 0, 5, 4);
        let mut buffer = Buffer::empty(Rect::new(0, 0, 6, 4));
        DottedBorder.render(area, &mut buffer);
        let expected = Buffer::with_lines(["·⋯⋯⋯· ", "⋮   ⋮ ", "⋮   ⋮ ", "·⋯⋯⋯· "]);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn draw_cell_clipped_at_buffer_edge() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 3, 1));
        let mut canvas = Canvas {
            area: Rect::new(0, 0, 3, 1),
            buf: &mut buffer,
        };
        canvas.draw_cell(Position::new(1, 0), "██", consts::SNAKE_STYLE);
        canvas.draw_cell(Position::new(5, 3), "██", consts::SNAKE_STYLE);
        let symbols = (0..3).map(|x| buffer[(x, 0)].symbol()).collect::<Vec<_>>();
        assert_eq!(symbols, [" ", " ", "█"]);
        assert_eq!(buffer[(2, 0)].fg, ratatui::style::Color::Green);
    }

    #[test]
    fn render_full_size_board_fits_display() {
        let game = new_game(32, 24);
        assert_eq!(game.block_size().width, consts::DISPLAY_SIZE.width);
        assert_eq!(game.block_size().height + 1, consts::DISPLAY_SIZE.height);
    }
}
