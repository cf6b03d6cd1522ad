use crate::level::{Grid, TileType};

/// The eight neighbor directions, in sheet-rule key order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    TopLeft,
    TopCenter,
    TopRight,
    MidLeft,
    MidRight,
    BotLeft,
    BotCenter,
    BotRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::TopLeft,
        Direction::TopCenter,
        Direction::TopRight,
        Direction::MidLeft,
        Direction::MidRight,
        Direction::BotLeft,
        Direction::BotCenter,
        Direction::BotRight,
    ];

    /// Column and row offset; rows grow downwards
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::TopLeft => (-1, -1),
            Direction::TopCenter => (0, -1),
            Direction::TopRight => (1, -1),
            Direction::MidLeft => (-1, 0),
            Direction::MidRight => (1, 0),
            Direction::BotLeft => (-1, 1),
            Direction::BotCenter => (0, 1),
            Direction::BotRight => (1, 1),
        }
    }

    /// Key used in sheet files
    pub fn key(self) -> &'static str {
        match self {
            Direction::TopLeft => "topLeft",
            Direction::TopCenter => "topCenter",
            Direction::TopRight => "topRight",
            Direction::MidLeft => "midLeft",
            Direction::MidRight => "midRight",
            Direction::BotLeft => "botLeft",
            Direction::BotCenter => "botCenter",
            Direction::BotRight => "botRight",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// A cell's type and the types around it. Positions outside the grid read as
/// [`TileType::Edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborSignature {
    pub center: TileType,
    neighbors: [TileType; 8],
}

impl NeighborSignature {
    pub fn new(center: TileType, neighbors: [TileType; 8]) -> Self {
        Self { center, neighbors }
    }

    /// Every neighbor of the same type as the center
    pub fn uniform(center: TileType) -> Self {
        Self::new(center, [center; 8])
    }

    pub fn at(grid: &Grid, column: usize, row: usize) -> Self {
        let lookup = |dc: isize, dr: isize| -> TileType {
            let (Some(c), Some(r)) = (column.checked_add_signed(dc), row.checked_add_signed(dr)) else {
                return TileType::Edge;
            };
            grid.get(r)
                .and_then(|cells| cells.get(c))
                .map_or(TileType::Edge, |cell| cell.cell_type)
        };
        let mut neighbors = [TileType::Edge; 8];
        for direction in Direction::ALL {
            let (dc, dr) = direction.offset();
            neighbors[direction.index()] = lookup(dc, dr);
        }
        Self { center: lookup(0, 0), neighbors }
    }

    pub fn get(&self, direction: Direction) -> TileType {
        self.neighbors[direction.index()]
    }

    pub fn with(mut self, direction: Direction, tile: TileType) -> Self {
        self.neighbors[direction.index()] = tile;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, TileType)> + '_ {
        Direction::ALL.into_iter().map(|d| (d, self.get(d)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::MapCell;

    fn grid(rows: &[&str]) -> Grid {
        rows.iter()
            .map(|row| {
                row.chars()
                    .map(|c| MapCell::new(match c {
                        '#' => TileType::Wall,
                        '@' => TileType::EdgeWall,
                        'D' => TileType::Desk,
                        _ => TileType::None,
                    }))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_interior_signature() {
        let g = grid(&["#.D", "@#.", "..#"]);
        let sig = NeighborSignature::at(&g, 1, 1);
        assert_eq!(sig.center, TileType::Wall);
        assert_eq!(sig.get(Direction::TopLeft), TileType::Wall);
        assert_eq!(sig.get(Direction::TopCenter), TileType::None);
        assert_eq!(sig.get(Direction::TopRight), TileType::Desk);
        assert_eq!(sig.get(Direction::MidLeft), TileType::EdgeWall);
        assert_eq!(sig.get(Direction::MidRight), TileType::None);
        assert_eq!(sig.get(Direction::BotRight), TileType::Wall);
    }

    #[test]
    fn test_corner_reads_edge() {
        let g = grid(&["#.", ".#"]);
        let sig = NeighborSignature::at(&g, 0, 0);
        for d in [Direction::TopLeft, Direction::TopCenter, Direction::TopRight, Direction::MidLeft, Direction::BotLeft] {
            assert_eq!(sig.get(d), TileType::Edge, "{:?}", d);
        }
        assert_eq!(sig.get(Direction::MidRight), TileType::None);
        assert_eq!(sig.get(Direction::BotRight), TileType::Wall);

        let far = NeighborSignature::at(&g, 1, 1);
        assert_eq!(far.get(Direction::BotCenter), TileType::Edge);
        assert_eq!(far.get(Direction::MidRight), TileType::Edge);
        assert_eq!(far.get(Direction::TopLeft), TileType::Wall);
    }

    #[test]
    fn test_keys_are_distinct() {
        let keys: std::collections::HashSet<_> = Direction::ALL.iter().map(|d| d.key()).collect();
        assert_eq!(keys.len(), 8);
    }
}
