/// Side length of every matrix in the elementwise benchmark.
pub const DIM: usize = 100;

/// A heap-allocated `DIM x DIM` grid of `i32`, stored row by row.
#[derive(Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: Vec<[i32; DIM]>,
}

impl Matrix {
    pub fn zeroed() -> Self {
        Self {
            rows: vec![[0; DIM]; DIM],
        }
    }

    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.rows[row][col]
    }

    #[inline(always)]
    pub fn set(&mut self, row: usize, col: usize, value: i32) {
        self.rows[row][col] = value;
    }

    /// Row-major view over all `DIM * DIM` cells.
    pub fn as_flat(&self) -> &[i32] {
        bytemuck::cast_slice(&self.rows)
    }

    pub fn checksum(&self) -> i32 {
        self.as_flat()
            .iter()
            .fold(0i32, |acc, &cell| acc.wrapping_add(cell))
    }
}

impl std::fmt::Debug for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matrix")
            .field("dim", &DIM)
            .field("checksum", &self.checksum())
            .finish()
    }
}
