/// Single coordinate axis used for grid extent, rows and columns.
pub type Coord = u8;

/// Count type used for cell counts, battery charges and dig counts.
pub type CellCount = u16;

/// Two-dimensional grid coordinates `(row, col)`, 0-indexed.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Iterates every `(row, col)` of a square grid in row-major order.
pub fn iter_coords(size: Coord) -> impl Iterator<Item = Coord2> {
    (0..size).flat_map(move |row| (0..size).map(move |col| (row, col)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iter_coords_is_row_major() {
        let mut coords = iter_coords(2);
        assert_eq!(coords.next(), Some((0, 0)));
        assert_eq!(coords.next(), Some((0, 1)));
        assert_eq!(coords.next(), Some((1, 0)));
        assert_eq!(coords.next(), Some((1, 1)));
        assert_eq!(coords.next(), None);
    }

    #[test]
    fn mult_saturates() {
        assert_eq!(mult(8, 8), 64);
        assert_eq!(mult(Coord::MAX, Coord::MAX), 65025);
    }
}
