//! Voxel occupancy grid and per-cell color storage.
//!
//! Both are stored as flat arrays indexed `[z * height * width + y * width + x]`.

use crate::schema::Rgba;

/// Which cells of the grid are filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    occupied: Vec<bool>,
}

impl VoxelGrid {
    /// Grid with every cell occupied.
    pub fn filled(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
            occupied: vec![true; width * height * depth],
        }
    }

    /// Grid with no occupied cells.
    #[cfg(test)]
    pub fn empty(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
            occupied: vec![false; width * height * depth],
        }
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        z * self.height * self.width + y * self.width + x
    }

    /// Occupancy at a signed coordinate; anything outside the grid is empty.
    #[inline]
    pub fn is_occupied(&self, x: i32, y: i32, z: i32) -> bool {
        match self.checked_index(x, y, z) {
            Some(i) => self.occupied[i],
            None => false,
        }
    }

    #[cfg(test)]
    pub fn set(&mut self, x: usize, y: usize, z: usize, occupied: bool) {
        let i = self.index(x, y, z);
        self.occupied[i] = occupied;
    }

    /// Flat index for a signed coordinate, if it lies inside the grid.
    #[inline]
    pub fn checked_index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if x < 0 || y < 0 || z < 0 {
            return None;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }
        Some(self.index(x, y, z))
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.occupied.iter().filter(|&&o| o).count()
    }

    /// Iterate occupied cells in storage order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let (w, h) = (self.width, self.height);
        self.occupied
            .iter()
            .enumerate()
            .filter(|(_, o)| **o)
            .map(move |(i, _)| (i % w, (i / w) % h, i / (w * h)))
    }
}

/// RGBA color for every cell of a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorArray {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    data: Vec<Rgba>,
}

impl ColorArray {
    /// Array with every cell set to `color`.
    pub fn uniform(width: usize, height: usize, depth: usize, color: Rgba) -> Self {
        Self {
            width,
            height,
            depth,
            data: vec![color; width * height * depth],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Rgba {
        self.data[z * self.height * self.width + y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, color: Rgba) {
        self.data[z * self.height * self.width + y * self.width + x] = color;
    }

    /// Color by flat index.
    #[inline]
    pub fn at(&self, index: usize) -> Rgba {
        self.data[index]
    }

    /// Coordinates whose color differs from `other`.
    ///
    /// Both arrays must have the same shape.
    pub fn differing_cells(&self, other: &ColorArray) -> Vec<(usize, usize, usize)> {
        debug_assert_eq!(
            (self.width, self.height, self.depth),
            (other.width, other.height, other.depth)
        );
        let (w, h) = (self.width, self.height);
        self.data
            .iter()
            .zip(other.data.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| (i % w, (i / w) % h, i / (w * h)))
            .collect()
    }
}
