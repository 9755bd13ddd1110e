use crate::device::Vertex2d;

/// Append-only vertex store with a fixed capacity.
///
/// Allocated once. Pushing past capacity is a caller bug; flush first.
#[derive(Debug)]
pub struct VertexScratch {
    vertices: Vec<Vertex2d>,
    capacity: usize,
}

impl VertexScratch {
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "scratch capacity must be positive");
        Self {
            vertices: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `vertex` and returns its index.
    #[inline]
    pub fn push(&mut self, vertex: Vertex2d) -> usize {
        assert!(
            self.vertices.len() < self.capacity,
            "vertex scratch overflow (capacity {})",
            self.capacity
        );
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    #[inline]
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Free slots left before a flush is required.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.vertices.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Vertex2d] {
        &self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_returns_sequential_indices() {
        let mut s = VertexScratch::with_capacity(3);
        assert_eq!(s.push(Vertex2d::default()), 0);
        assert_eq!(s.push(Vertex2d::default()), 1);
        assert_eq!(s.remaining(), 1);
    }

    #[test]
    fn clear_keeps_allocation() {
        let mut s = VertexScratch::with_capacity(6);
        for _ in 0..6 {
            s.push(Vertex2d::default());
        }
        let ptr = s.as_slice().as_ptr();
        s.clear();
        assert!(s.is_empty());
        s.push(Vertex2d::default());
        assert_eq!(s.as_slice().as_ptr(), ptr);
        assert_eq!(s.capacity(), 6);
    }

    #[test]
    #[should_panic(expected = "overflow")]
    fn overflow_panics() {
        let mut s = VertexScratch::with_capacity(1);
        s.push(Vertex2d::default());
        s.push(Vertex2d::default());
    }
}
