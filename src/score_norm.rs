#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScoreNorm {
    /// Divide by the vertex count of the smaller side
    MinSize,

    /// Divide by the vertex count of the larger side
    MaxSize,
}
