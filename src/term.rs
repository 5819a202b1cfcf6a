use crate::Cell;
use std::{io::{self, Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

/// Screen position, (x, y) from the top left corner.
pub type ScreenPos = (u16, u16);

/// What the game needs from a terminal.
pub trait Screen {
    /// (width, height)
    fn size(&self) -> ScreenPos;
    fn clear(&mut self) -> io::Result<()>;
    /// Positions past the edge of the screen are skipped.
    fn print_at(&mut self, pos: ScreenPos, ch: char) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
    /// Never blocks; `Ok(None)` when no key is pending.
    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>>;
}

/// Owns the real terminal for as long as it lives. Dropping it puts the
/// terminal back the way it was found.
pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let mut term = TermManager { width, height, stdout: stdout() };
        // On failure `term` is dropped here, undoing whatever got through
        term.setup()?;
        Ok(term)
    }

    fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl Screen for TermManager {
    fn size(&self) -> ScreenPos {
        (self.width, self.height)
    }

    fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))
    }

    fn print_at(&mut self, pos: ScreenPos, ch: char) -> io::Result<()> {
        if pos.0 >= self.width || pos.1 >= self.height {
            return Ok(());
        }
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>> {
        while poll(Duration::ZERO)? {
            // Resizes, mouse and focus events are drained and dropped
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }
        Ok(None)
    }
}

/// A rectangular region of the screen. Cells are (row, col) relative to its
/// top left corner, which is where the border goes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Window {
    top: u16,
    left: u16,
    height: i16,
    width: i16,
}

impl Window {
    pub fn centered(screen: ScreenPos, height: i16, width: i16) -> Self {
        let top = screen.1.saturating_sub(height as u16) / 2;
        let left = screen.0.saturating_sub(width as u16) / 2;
        Window { top, left, height, width }
    }

    pub fn top(&self) -> u16 {
        self.top
    }

    pub fn height(&self) -> i16 {
        self.height
    }

    /// Draws `ch` at `cell`; cells outside the window are a no-op.
    pub fn print_cell<S: Screen + ?Sized>(&self, screen: &mut S, cell: Cell, ch: char) -> io::Result<()> {
        let (row, col) = cell;
        if row < 0 || col < 0 || row >= self.height || col >= self.width {
            return Ok(());
        }
        screen.print_at((self.left + col as u16, self.top + row as u16), ch)
    }

    pub fn clear<S: Screen + ?Sized>(&self, screen: &mut S) -> io::Result<()> {
        for row in 0..self.height {
            for col in 0..self.width {
                self.print_cell(screen, (row, col), ' ')?;
            }
        }
        Ok(())
    }

    pub fn draw_border<S: Screen + ?Sized>(&self, screen: &mut S) -> io::Result<()> {
        let end_row = self.height - 1;
        let end_col = self.width - 1;

        for col in 0..self.width {
            let ch = if col == 0 || col == end_col {'+'} else {'-'};
            self.print_cell(screen, (0, col), ch)?;
            self.print_cell(screen, (end_row, col), ch)?;
        }

        for row in 1..end_row {
            self.print_cell(screen, (row, 0), '|')?;
            self.print_cell(screen, (row, end_col), '|')?;
        }

        Ok(())
    }
}

/// Blanks screen row `y`, then writes `text` centered on it. Whatever
/// doesn't fit is cut off.
pub fn print_line_centered<S: Screen + ?Sized>(screen: &mut S, y: u16, text: &str) -> io::Result<()> {
    let (width, _) = screen.size();
    let len = text.chars().count() as u16;
    let start = width.saturating_sub(len) / 2;

    for x in 0..width {
        screen.print_at((x, y), ' ')?;
    }
    for (i, ch) in text.chars().enumerate() {
        screen.print_at((start + i as u16, y), ch)?;
    }
    Ok(())
}

#[cfg(test)]
pub mod fake {
    use super::*;
    use std::collections::VecDeque;

    use crossterm::event::{KeyCode, KeyModifiers};

    /// In-memory screen fed from a script of key presses.
    pub struct FakeScreen {
        width: u16,
        height: u16,
        cells: Vec<char>,
        keys: VecDeque<Option<KeyEvent>>,
        pub polls: usize,
        pub flushes: usize,
    }

    impl FakeScreen {
        pub fn new(width: u16, height: u16) -> Self {
            FakeScreen {
                width,
                height,
                cells: vec![' '; width as usize * height as usize],
                keys: VecDeque::new(),
                polls: 0,
                flushes: 0,
            }
        }

        /// Queues a key; `None` stands for a poll that finds nothing.
        pub fn push_key(&mut self, code: Option<KeyCode>) {
            self.keys.push_back(code.map(|c| KeyEvent::new(c, KeyModifiers::NONE)));
        }

        pub fn push_idle(&mut self, polls: usize) {
            for _ in 0..polls {
                self.push_key(None);
            }
        }

        pub fn row(&self, y: u16) -> String {
            let start = y as usize * self.width as usize;
            self.cells[start..start + self.width as usize].iter().collect()
        }

        pub fn char_at(&self, pos: ScreenPos) -> char {
            self.cells[pos.1 as usize * self.width as usize + pos.0 as usize]
        }

        pub fn contains(&self, text: &str) -> bool {
            (0..self.height).any(|y| self.row(y).contains(text))
        }
    }

    impl Screen for FakeScreen {
        fn size(&self) -> ScreenPos {
            (self.width, self.height)
        }

        fn clear(&mut self) -> io::Result<()> {
            self.cells.iter_mut().for_each(|c| *c = ' ');
            Ok(())
        }

        fn print_at(&mut self, pos: ScreenPos, ch: char) -> io::Result<()> {
            if pos.0 < self.width && pos.1 < self.height {
                self.cells[pos.1 as usize * self.width as usize + pos.0 as usize] = ch;
            }
            Ok(())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            Ok(())
        }

        fn poll_key(&mut self) -> io::Result<Option<KeyEvent>> {
            self.polls += 1;
            // An exhausted script quits so a test can't hang
            Ok(self.keys.pop_front().unwrap_or_else(|| Some(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::fake::FakeScreen;
    use pretty_assertions::assert_eq;

    #[test]
    fn window_is_centered() {
        let win = Window::centered((80, 24), 20, 40);
        assert_eq!((win.left, win.top), (20, 2));

        // Never placed above or left of the screen
        let win = Window::centered((10, 5), 20, 40);
        assert_eq!((win.left, win.top), (0, 0));
    }

    #[test]
    fn border_surrounds_window() {
        let mut screen = FakeScreen::new(7, 5);
        let win = Window::centered((7, 5), 4, 5);
        win.draw_border(&mut screen).unwrap();

        let rows: Vec<String> = (0..5).map(|y| screen.row(y)).collect();
        assert_eq!(rows, vec![
            " +---+ ",
            " |   | ",
            " |   | ",
            " +---+ ",
            "       ",
        ]);
    }

    #[test]
    fn out_of_window_cells_are_skipped() {
        let mut screen = FakeScreen::new(10, 10);
        let win = Window::centered((10, 10), 4, 4);

        for cell in [(-1, 0), (0, -1), (4, 0), (0, 4), (100, 100), (i16::MIN, i16::MAX)] {
            win.print_cell(&mut screen, cell, '#').unwrap();
        }
        assert!(!screen.contains("#"));

        win.print_cell(&mut screen, (1, 2), '#').unwrap();
        assert_eq!(screen.char_at((5, 4)), '#');
    }

    #[test]
    fn centered_line_is_clipped() {
        let mut screen = FakeScreen::new(9, 1);
        print_line_centered(&mut screen, 0, "abc").unwrap();
        assert_eq!(screen.row(0), "   abc   ");

        print_line_centered(&mut screen, 0, "a").unwrap();
        assert_eq!(screen.row(0), "    a    ");

        print_line_centered(&mut screen, 0, "0123456789ABC").unwrap();
        assert_eq!(screen.row(0), "012345678");
    }
}
