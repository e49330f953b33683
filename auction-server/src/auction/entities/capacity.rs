#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub admitted:       usize,
    pub max_concurrent: usize,
}
