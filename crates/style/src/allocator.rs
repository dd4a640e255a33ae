//! Class name allocation

/// Hands out `<prefix>-<n>` class names from a counter that only moves forward
#[derive(Debug, Clone)]
pub struct ClassNameAllocator {
    prefix: String,
    next: u64,
}

impl ClassNameAllocator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    /// Allocate the next class name
    pub fn allocate(&mut self) -> String {
        let name = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        name
    }

    /// Number of names handed out so far
    pub fn allocated(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_sequence() {
        let mut alloc = ClassNameAllocator::new("css");
        assert_eq!(alloc.allocate(), "css-0");
        assert_eq!(alloc.allocate(), "css-1");
        assert_eq!(alloc.allocate(), "css-2");
        assert_eq!(alloc.allocated(), 3);
    }

    #[test]
    fn test_allocators_are_independent() {
        let mut a = ClassNameAllocator::new("a");
        let mut b = ClassNameAllocator::new("b");
        a.allocate();
        a.allocate();
        assert_eq!(b.allocate(), "b-0");
        assert_eq!(a.allocate(), "a-2");
    }
}
