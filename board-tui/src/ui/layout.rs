//! Geometry of the board inside its widget area.
//!
//! Rendering and mouse hit-testing share one [`BoardLayout`] so a click
//! always lands on the cell that was drawn under the pointer.

use ratatui::layout::Rect;

/// Columns reserved left of the board for rank labels.
const RANK_LABEL_WIDTH: u16 = 3;
/// Rows reserved below the board for file labels.
const FILE_LABEL_HEIGHT: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardSizeVariant {
    Compact,
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    pub variant: BoardSizeVariant,
    pub square_width: u16,
    pub square_height: u16,
}

impl BoardSize {
    pub const COMPACT: Self = Self {
        variant: BoardSizeVariant::Compact,
        square_width: 5,
        square_height: 3,
    };

    pub const SMALL: Self = Self {
        variant: BoardSizeVariant::Small,
        square_width: 9,
        square_height: 5,
    };

    pub const MEDIUM: Self = Self {
        variant: BoardSizeVariant::Medium,
        square_width: 13,
        square_height: 7,
    };

    pub const LARGE: Self = Self {
        variant: BoardSizeVariant::Large,
        square_width: 17,
        square_height: 9,
    };

    /// Largest variant whose squares and labels fit in `area`, falling back to
    /// [`BoardSize::COMPACT`].
    pub fn for_area(area: Rect) -> Self {
        [Self::LARGE, Self::MEDIUM, Self::SMALL]
            .into_iter()
            .find(|size| {
                let (w, h) = size.min_dimensions();
                area.width >= w && area.height >= h
            })
            .unwrap_or(Self::COMPACT)
    }

    /// Width and height needed for 8x8 squares plus labels.
    pub fn min_dimensions(&self) -> (u16, u16) {
        (
            self.square_width * 8 + RANK_LABEL_WIDTH,
            self.square_height * 8 + FILE_LABEL_HEIGHT,
        )
    }
}

/// Where the 8x8 grid sits on screen. Cell `(row, col)` uses the same visual
/// coordinates as [`crate::board::square_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub size: BoardSize,
    /// Top-left corner of cell `(0, 0)`.
    pub board_x: u16,
    pub board_y: u16,
}

impl BoardLayout {
    /// Centre the largest fitting board inside `area`.
    pub fn compute(area: Rect) -> Self {
        let size = BoardSize::for_area(area);
        let (total_width, total_height) = size.min_dimensions();
        let offset_x = area.width.saturating_sub(total_width) / 2;
        let offset_y = area.height.saturating_sub(total_height) / 2;
        Self {
            size,
            board_x: area.x + offset_x + RANK_LABEL_WIDTH,
            board_y: area.y + offset_y,
        }
    }

    pub fn board_width(&self) -> u16 {
        self.size.square_width * 8
    }

    pub fn board_height(&self) -> u16 {
        self.size.square_height * 8
    }

    /// Visual cell under terminal position `(x, y)`, if any.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        if x < self.board_x || y < self.board_y {
            return None;
        }
        let col = (x - self.board_x) / self.size.square_width;
        let row = (y - self.board_y) / self.size.square_height;
        if row < 8 && col < 8 {
            Some((row as usize, col as usize))
        } else {
            None
        }
    }

    /// Top-left terminal position of visual cell `(row, col)`.
    pub fn cell_origin(&self, row: usize, col: usize) -> (u16, u16) {
        (
            self.board_x + col as u16 * self.size.square_width,
            self.board_y + row as u16 * self.size.square_height,
        )
    }

    /// Terminal rectangle covered by visual cell `(row, col)`.
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let (x, y) = self.cell_origin(row, col);
        Rect {
            x,
            y,
            width: self.size.square_width,
            height: self.size.square_height,
        }
    }

    /// Where the label for visual row `row` is drawn.
    pub fn rank_label_position(&self, row: usize) -> (u16, u16) {
        let rect = self.cell_rect(row, 0);
        (
            self.board_x.saturating_sub(RANK_LABEL_WIDTH - 1),
            rect.y + rect.height / 2,
        )
    }

    /// Where the label for visual column `col` is drawn.
    pub fn file_label_position(&self, col: usize) -> (u16, u16) {
        let rect = self.cell_rect(0, col);
        (rect.x + rect.width / 2, self.board_y + self.board_height())
    }
}
