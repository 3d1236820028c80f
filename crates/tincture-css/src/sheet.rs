use tincture_fill::{Fill, FillAssembler, FillHalves};

/// Parsed fill declarations, split by transition side.
///
/// Repeating a property replaces the earlier declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillSheet {
    pub from: FillHalves,
    pub to: FillHalves,
}

impl FillSheet {
    pub fn is_empty(&self) -> bool {
        self.from.is_empty() && self.to.is_empty()
    }

    /// Pairs both sides into a [`Fill`].
    pub fn to_fill(&self) -> Fill {
        FillAssembler::assemble(&self.from, &self.to)
    }
}
