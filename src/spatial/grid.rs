//! Generic row-major grid addressed by `Point`

use crate::core::types::{Point, Rect};

/// Flat 2D arena. Every cell exists for the grid's whole lifetime.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    dimensions: Rect,
    data: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid by calling `f` once per cell in row-major order
    pub fn from_fn(dimensions: Rect, mut f: impl FnMut(Point) -> T) -> Self {
        let mut data = Vec::with_capacity(dimensions.area());
        for row in 0..dimensions.height {
            for col in 0..dimensions.width {
                data.push(f(Point::new(row, col)));
            }
        }
        Self { dimensions, data }
    }

    #[inline]
    pub fn dimensions(&self) -> Rect {
        self.dimensions
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.dimensions.contains(p)
    }

    #[inline]
    fn index_of(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some(p.row as usize * self.dimensions.width as usize + p.col as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, p: Point) -> Option<&T> {
        self.index_of(p).map(|i| &self.data[i])
    }

    #[inline]
    pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
        self.index_of(p).map(move |i| &mut self.data[i])
    }

    /// Cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// One slice per row, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.dimensions.width.max(1) as usize)
    }
}

impl<T> std::ops::Index<Point> for Grid<T> {
    type Output = T;

    fn index(&self, p: Point) -> &T {
        match self.get(p) {
            Some(cell) => cell,
            None => panic!("{} is outside the {:?} grid", p, self.dimensions),
        }
    }
}

impl<T> std::ops::IndexMut<Point> for Grid<T> {
    fn index_mut(&mut self, p: Point) -> &mut T {
        let dimensions = self.dimensions;
        match self.get_mut(p) {
            Some(cell) => cell,
            None => panic!("{} is outside the {:?} grid", p, dimensions),
        }
    }
}
