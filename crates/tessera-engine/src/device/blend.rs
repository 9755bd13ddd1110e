use crate::backend::{BlendComponent, BlendFactor, BlendState};

/// Fixed blend configurations.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BlendMode {
    /// Source replaces destination.
    None,
    Additive,
    /// Straight (non-premultiplied) alpha.
    Alpha,
    PremultipliedAlpha,
}

impl BlendMode {
    /// Factor table; every mode uses `Add` and writes source alpha unchanged.
    pub const fn state(self) -> BlendState {
        use BlendFactor::*;

        let color = match self {
            BlendMode::None => BlendComponent::add(One, Zero),
            BlendMode::Additive => BlendComponent::add(One, One),
            BlendMode::Alpha => BlendComponent::add(SrcAlpha, OneMinusSrcAlpha),
            BlendMode::PremultipliedAlpha => BlendComponent::add(One, OneMinusSrcAlpha),
        };

        BlendState {
            color,
            alpha: BlendComponent::add(One, Zero),
        }
    }
}
