use super::state::Position;

const WORD_BITS: usize = u64::BITS as usize;

/// Packed occupancy bit set for a square grid
///
/// One bit per cell, indexed `row * size + col`. A bit is set iff a snake
/// segment currently occupies that cell; the game engine keeps it in sync
/// with the snake body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    words: Vec<u64>,
}

impl Board {
    /// Create an empty board of `size` x `size` cells
    pub fn new(size: usize) -> Self {
        let cells = size * size;
        Self {
            size,
            words: vec![0; cells.div_ceil(WORD_BITS)],
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.size && (pos.y as usize) < self.size
    }

    fn index(&self, pos: Position) -> Option<(usize, u64)> {
        if !self.contains(pos) {
            return None;
        }
        let idx = pos.y as usize * self.size + pos.x as usize;
        Some((idx / WORD_BITS, 1 << (idx % WORD_BITS)))
    }

    /// Mark a cell as occupied. Out-of-grid positions are ignored.
    pub fn set(&mut self, pos: Position) {
        if let Some((word, mask)) = self.index(pos) {
            self.words[word] |= mask;
        }
    }

    /// Mark a cell as free. Out-of-grid positions are ignored.
    pub fn clear(&mut self, pos: Position) {
        if let Some((word, mask)) = self.index(pos) {
            self.words[word] &= !mask;
        }
    }

    /// Whether a cell is occupied; out-of-grid positions are never occupied
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.index(pos)
            .is_some_and(|(word, mask)| self.words[word] & mask != 0)
    }

    pub fn clear_all(&mut self) {
        self.words.fill(0);
    }

    pub fn occupied_count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// All unoccupied cells in row-major order
    pub fn free_cells(&self) -> Vec<Position> {
        (0..self.size * self.size)
            .map(|idx| Position::new((idx % self.size) as i32, (idx / self.size) as i32))
            .filter(|&pos| !self.is_occupied(pos))
            .collect()
    }
}
