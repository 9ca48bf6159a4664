//! Pure predicates over candidate placements. Nothing in here looks at a board; it only reasons
//! about anchors, directions and the lines they span.

/// Zero-indexed row and column of a cell, where row 0 is the top row.
pub type GridCoord = (usize, usize);

/// A possibly off-board cell position, used for line arithmetic.
pub type SignedCoord = (isize, isize);

/// One of the eight directions a word can be read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const COUNT: usize = 8;

    pub const ALL: [Direction; Direction::COUNT] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// Horizontal and vertical directions.
    pub const STRAIGHT: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub const DIAGONAL: [Direction; 4] =
        [Direction::UpLeft, Direction::UpRight, Direction::DownLeft, Direction::DownRight];

    /// Stable index of this direction, used to address per-direction buckets.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::UpLeft => Direction::DownRight,
            Direction::UpRight => Direction::DownLeft,
            Direction::DownLeft => Direction::UpRight,
            Direction::DownRight => Direction::UpLeft,
        }
    }

    /// Row and column deltas for a single step in this direction.
    pub fn step(self) -> SignedCoord {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (-1, 1),
            Direction::DownLeft => (1, -1),
            Direction::DownRight => (1, 1),
        }
    }

    pub fn is_diagonal(self) -> bool {
        let (row_step, col_step) = self.step();
        row_step != 0 && col_step != 0
    }
}

/// A place where a word could start: an anchor cell plus the direction the word runs in. A
/// candidate only describes a footprint once it's paired with a word length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

impl Candidate {
    pub fn new(row: usize, col: usize, direction: Direction) -> Candidate {
        Candidate { row, col, direction }
    }

    fn anchor(&self) -> SignedCoord {
        (self.row as isize, self.col as isize)
    }

    /// Is the given cell on the infinite line through this candidate's anchor, along the axis of
    /// its direction? Opposite directions share an axis, so `Up` and `Down` candidates with the
    /// same anchor describe the same line.
    pub fn is_on_line(&self, row: isize, col: isize) -> bool {
        let (anchor_row, anchor_col) = self.anchor();

        match self.direction {
            Direction::Up | Direction::Down => col == anchor_col,
            Direction::Left | Direction::Right => row == anchor_row,
            Direction::UpLeft | Direction::DownRight => anchor_row - row == anchor_col - col,
            Direction::UpRight | Direction::DownLeft => anchor_row - row == col - anchor_col,
        }
    }

    /// Signed distance of the given cell from this candidate's anchor, measured along its line.
    /// Zero is the anchor itself, positive values lie ahead in the direction of travel and
    /// negative values lie behind the anchor. Returns `None` for cells that aren't on the line.
    pub fn directed_line_distance(&self, row: isize, col: isize) -> Option<isize> {
        if !self.is_on_line(row, col) {
            return None;
        }

        let (anchor_row, anchor_col) = self.anchor();

        Some(match self.direction {
            Direction::Up | Direction::UpLeft | Direction::UpRight => anchor_row - row,
            Direction::Down | Direction::DownLeft | Direction::DownRight => row - anchor_row,
            Direction::Left => anchor_col - col,
            Direction::Right => col - anchor_col,
        })
    }

    /// The last cell a word of `length` starting here would occupy.
    pub fn endpoint(&self, length: usize) -> SignedCoord {
        let (anchor_row, anchor_col) = self.anchor();
        let (row_step, col_step) = self.direction.step();
        let steps = length as isize - 1;

        (anchor_row + row_step * steps, anchor_col + col_step * steps)
    }

    /// The cell `index` steps from the anchor.
    pub fn cell_at(&self, index: usize) -> SignedCoord {
        let (anchor_row, anchor_col) = self.anchor();
        let (row_step, col_step) = self.direction.step();

        (anchor_row + row_step * index as isize, anchor_col + col_step * index as isize)
    }

    /// Conservative structural-conflict test between this candidate (holding a word of `length`)
    /// and `other` (holding a word of `other_length`). This is only meaningful when both lie on
    /// the same axis; for candidates in unrelated directions the endpoints of `other` can't both
    /// be on our line, so the answer is `false`.
    ///
    /// `other` intercepts us if its span straddles our anchor, or if either of its ends falls
    /// inside our own footprint. This isn't a per-cell collision check -- letter conflicts are
    /// caught later when the word is verified against the board.
    pub fn intercepts(&self, length: usize, other: &Candidate, other_length: usize) -> bool {
        let Some(start_distance) = self.directed_line_distance(other.row as isize, other.col as isize)
        else {
            return false;
        };

        let (end_row, end_col) = other.endpoint(other_length);
        let Some(end_distance) = self.directed_line_distance(end_row, end_col) else {
            return false;
        };

        // The other span covers our anchor.
        if (start_distance >= 0 && end_distance <= 0) || (start_distance <= 0 && end_distance >= 0) {
            return true;
        }

        let inside = |distance: isize| distance >= 0 && distance < length as isize;
        inside(start_distance) || inside(end_distance)
    }
}
