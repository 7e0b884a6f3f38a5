use super::action::Direction;
use super::config::GameConfig;
use super::error::ArenaError;

/// Rows reserved above the board for the status readout
pub const STATUS_ROWS: i32 = 2;

/// Smallest board side, in cells
pub const MIN_CELLS: i32 = 5;

/// A cell on the lattice, in pixel units (always a multiple of the square size)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The four wall coordinates every collision check is made against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x_left: i32,
    pub x_right: i32,
    pub y_top: i32,
    pub y_bottom: i32,
}

/// Stateless coordinate math over (width, height, square size)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    width: i32,
    height: i32,
    square_size: i32,
    bounds: Bounds,
}

impl Geometry {
    /// Build the lattice for a board of `width` x `height` pixels plus the
    /// status strip. Both sides must be multiples of `square_size` and at
    /// least [`MIN_CELLS`] cells long.
    pub fn new(width: i32, height: i32, square_size: i32) -> Result<Self, ArenaError> {
        if square_size <= 0 {
            return Err(ArenaError::Config(format!(
                "square size must be positive, got {square_size}"
            )));
        }
        if width % square_size != 0 || height % square_size != 0 {
            return Err(ArenaError::Config(format!(
                "width {width} and height {height} must be multiples of square size {square_size}"
            )));
        }
        if width < MIN_CELLS * square_size || height < MIN_CELLS * square_size {
            return Err(ArenaError::Config(format!(
                "board must be at least {MIN_CELLS} cells on each side, got {}x{}",
                width / square_size,
                height / square_size
            )));
        }

        let total_height = height + STATUS_ROWS * square_size;
        let bounds = Bounds {
            x_left: 0,
            x_right: width - square_size,
            y_top: STATUS_ROWS * square_size,
            y_bottom: total_height - square_size,
        };

        Ok(Self {
            width,
            height: total_height,
            square_size,
            bounds,
        })
    }

    pub fn from_config(config: &GameConfig) -> Result<Self, ArenaError> {
        Self::new(config.width, config.height, config.square_size)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn square_size(&self) -> i32 {
        self.square_size
    }

    /// Number of columns, walls included
    pub fn columns(&self) -> i32 {
        self.width / self.square_size
    }

    /// Number of board rows, walls included, status strip excluded
    pub fn rows(&self) -> i32 {
        self.height / self.square_size - STATUS_ROWS
    }

    pub fn is_border_x(&self, x: i32) -> bool {
        x == self.bounds.x_left || x == self.bounds.x_right
    }

    pub fn is_border_y(&self, y: i32) -> bool {
        y == self.bounds.y_top || y == self.bounds.y_bottom
    }

    /// True if the cell lies on any of the four walls
    pub fn is_border(&self, cell: Cell) -> bool {
        self.is_border_x(cell.x) || self.is_border_y(cell.y)
    }

    /// True for lattice-aligned cells strictly inside the walls
    pub fn is_interior(&self, cell: Cell) -> bool {
        let b = &self.bounds;
        cell.x % self.square_size == 0
            && cell.y % self.square_size == 0
            && cell.x > b.x_left
            && cell.x < b.x_right
            && cell.y > b.y_top
            && cell.y < b.y_bottom
    }

    /// All playable cells, column by column
    pub fn interior_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let b = self.bounds;
        let step = self.square_size as usize;
        ((b.x_left + self.square_size)..b.x_right)
            .step_by(step)
            .flat_map(move |x| {
                ((b.y_top + self.square_size)..b.y_bottom)
                    .step_by(step)
                    .map(move |y| Cell::new(x, y))
            })
    }

    /// Number of playable cells
    pub fn interior_len(&self) -> usize {
        ((self.columns() - 2) * (self.rows() - 2)) as usize
    }

    /// Spawn cell of the snake head
    pub fn center(&self) -> Cell {
        let sq = self.square_size;
        Cell::new(self.width / sq / 2 * sq, self.height / sq / 2 * sq)
    }

    /// Cells kept clear of obstacles: the center and the cell above it
    pub fn start_cells(&self) -> [Cell; 2] {
        let center = self.center();
        [center, center.moved_by(0, -self.square_size)]
    }

    /// The neighbouring cell one square away in `direction`
    pub fn step(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        cell.moved_by(dx * self.square_size, dy * self.square_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> Geometry {
        // 10 x 10 board of 20px squares, plus two status rows
        Geometry::new(200, 200, 20).unwrap()
    }

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(40, 40);
        assert_eq!(cell.moved_by(20, 0), Cell::new(60, 40));
        assert_eq!(cell.moved_by(0, -20), Cell::new(40, 20));
    }

    #[test]
    fn test_bounds() {
        let b = geometry().bounds();
        assert_eq!(b.x_left, 0);
        assert_eq!(b.x_right, 180);
        assert_eq!(b.y_top, 40);
        assert_eq!(b.y_bottom, 220);
    }

    #[test]
    fn test_rejects_misaligned_sizes() {
        assert!(matches!(
            Geometry::new(205, 200, 20),
            Err(ArenaError::Config(_))
        ));
        assert!(matches!(
            Geometry::new(200, 210, 20),
            Err(ArenaError::Config(_))
        ));
        assert!(matches!(Geometry::new(200, 200, 0), Err(ArenaError::Config(_))));
    }

    #[test]
    fn test_rejects_tiny_boards() {
        assert!(Geometry::new(80, 200, 20).is_err());
        assert!(Geometry::new(200, 80, 20).is_err());
        assert!(Geometry::new(100, 100, 20).is_ok());
    }

    #[test]
    fn test_border_classification() {
        let g = geometry();
        assert!(g.is_border(Cell::new(0, 100)));
        assert!(g.is_border(Cell::new(180, 100)));
        assert!(g.is_border(Cell::new(100, 40)));
        assert!(g.is_border(Cell::new(100, 220)));
        assert!(!g.is_border(Cell::new(100, 100)));
        assert!(g.is_border_x(0));
        assert!(!g.is_border_y(60));
    }

    #[test]
    fn test_interior_excludes_walls_and_status_strip() {
        let g = geometry();
        let cells: Vec<Cell> = g.interior_cells().collect();
        assert_eq!(cells.len(), 8 * 8);
        assert_eq!(cells.len(), g.interior_len());
        assert!(cells.iter().all(|c| g.is_interior(*c)));
        assert!(cells.iter().all(|c| !g.is_border(*c)));
        assert!(cells.iter().all(|c| c.y > 40));
    }

    #[test]
    fn test_center_and_start_cells() {
        let g = geometry();
        assert_eq!(g.center(), Cell::new(100, 120));
        assert_eq!(g.start_cells(), [Cell::new(100, 120), Cell::new(100, 100)]);
        assert!(g.is_interior(g.center()));
    }

    #[test]
    fn test_step_scales_by_square_size() {
        let g = geometry();
        let c = Cell::new(100, 100);
        assert_eq!(g.step(c, Direction::Up), Cell::new(100, 80));
        assert_eq!(g.step(c, Direction::Right), Cell::new(120, 100));
    }
}
