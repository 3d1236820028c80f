/// Per-side distances (logical pixels), used for background insets and border widths.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Insets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Insets {
    #[inline]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    #[inline]
    pub const fn all(v: f32) -> Self {
        Self { top: v, right: v, bottom: v, left: v }
    }

    /// `vertical` applies to top/bottom, `horizontal` to left/right.
    #[inline]
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self { top: vertical, right: horizontal, bottom: vertical, left: horizontal }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::all(0.0)
    }

    /// Total horizontal extent (left + right).
    #[inline]
    pub fn h(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical extent (top + bottom).
    #[inline]
    pub fn v(&self) -> f32 {
        self.top + self.bottom
    }
}
