/// Index of a recorded point in a [`crate::buffer::PointBuffer`].
///
/// This is a position in the buffer's parallel columns, and is only
/// meaningful within the lifetime of a given buffer instance. Buffer
/// order is emission order, which is also draw order during playback.
pub type PointIndex = usize;

/// Category of a recorded point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointKind {
    /// A trunk segment, drawn as a filled circle in the bark color.
    Trunk,
    /// A leaf mark, drawn as a sprite blit (subject to density gating).
    Leaf,
}
