use ndarray::Array3;
use smallvec::SmallVec;

/// Single coordinate axis used for the board edge length and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Three-dimensional coordinates `(x, y, z)`.
pub type Coord3 = (Coord, Coord, Coord);

/// Neighbor set of a single cell, the 26-neighborhood stays inline.
pub type Neighbors = SmallVec<[Coord3; 26]>;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord3 {
    type Output = [usize; 3];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into(), self.2.into()]
    }
}

/// Number of cells in a cube with the given edge length.
pub const fn cube(edge: Coord) -> CellCount {
    let edge = edge as CellCount;
    edge * edge * edge
}

pub const fn in_bounds((x, y, z): Coord3, (max_x, max_y, max_z): Coord3) -> bool {
    x < max_x && y < max_y && z < max_z
}

/// Every coordinate within Chebyshev distance `radius` of `center`, clipped to `bounds`.
///
/// The center itself is never included. Order is by offset `dz`, then `dy`, then `dx`,
/// each ascending.
pub fn neighbors(center: Coord3, bounds: Coord3, radius: Coord) -> Neighbors {
    NeighborIter::new(center, bounds, radius).collect()
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord3) -> NeighborIter;
}

impl<T> NeighborIterExt for Array3<T> {
    fn iter_neighbors(&self, index: Coord3) -> NeighborIter {
        let (x, y, z) = self.dim();
        let axis = |len: usize| Coord::try_from(len).unwrap_or(Coord::MAX);
        NeighborIter::new(index, (axis(x), axis(y), axis(z)), 1)
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord3, delta: (i16, i16, i16), bounds: Coord3) -> Option<Coord3> {
    fn axis(value: Coord, delta: i16, max: Coord) -> Option<Coord> {
        Coord::try_from(i16::from(value) + delta)
            .ok()
            .filter(|&next| next < max)
    }

    Some((
        axis(coords.0, delta.0, bounds.0)?,
        axis(coords.1, delta.1, bounds.1)?,
        axis(coords.2, delta.2, bounds.2)?,
    ))
}

#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord3,
    bounds: Coord3,
    radius: i16,
    span: u32,
    index: u32,
}

impl NeighborIter {
    pub fn new(center: Coord3, bounds: Coord3, radius: Coord) -> Self {
        let span = 2 * u32::from(radius) + 1;
        Self {
            center,
            bounds,
            radius: radius.into(),
            span,
            index: 0,
        }
    }

    fn offset(&self, index: u32) -> (i16, i16, i16) {
        let span = self.span;
        // every component is below `span`, which is at most 511
        let component = |value: u32| value as i16 - self.radius;
        (
            component(index % span),
            component(index / span % span),
            component(index / (span * span)),
        )
    }
}

impl Iterator for NeighborIter {
    type Item = Coord3;

    fn next(&mut self) -> Option<Self::Item> {
        let total = self.span.pow(3);
        while self.index < total {
            let delta = self.offset(self.index);
            self.index += 1;

            if delta == (0, 0, 0) {
                continue;
            }
            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
        None
    }
}
