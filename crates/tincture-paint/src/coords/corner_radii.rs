/// Corner radii carried by background layers and border strokes.
///
/// Stored clockwise from the top-left corner. Fills never animate radii; the
/// applier copies them from the element's own layer.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CornerRadii(pub [f32; 4]);

impl CornerRadii {
    pub const fn all(r: f32) -> Self {
        Self([r; 4])
    }

    pub const fn zero() -> Self {
        Self::all(0.0)
    }

    /// The shared radius when all four corners agree.
    pub fn uniform(&self) -> Option<f32> {
        let [first, rest @ ..] = self.0;
        rest.iter().all(|&r| r == first).then_some(first)
    }
}
