use super::{EffectKind, EffectModule};
use crate::graph::{GraphNode, RenderCtx};

/// Which pedals are switched on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnabledSet(u8);

impl EnabledSet {
    pub const NONE: Self = Self(0);

    pub fn contains(self, kind: EffectKind) -> bool {
        self.0 & (1 << kind.index()) != 0
    }

    pub fn set(&mut self, kind: EffectKind, enabled: bool) {
        if enabled {
            self.0 |= 1 << kind.index();
        } else {
            self.0 &= !(1 << kind.index());
        }
    }

    pub fn with(mut self, kind: EffectKind) -> Self {
        self.set(kind, true);
        self
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<EffectKind> for EnabledSet {
    fn from_iter<I: IntoIterator<Item = EffectKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

/// Routing order of the enabled pedals.
///
/// Fixed capacity so rebuilding it on the audio thread never allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectChain {
    slots: [EffectKind; EffectKind::COUNT],
    len: usize,
}

impl EffectChain {
    pub fn as_slice(&self) -> &[EffectKind] {
        &self.slots[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Run `buffer` through every pedal in the chain, in order.
    ///
    /// An empty chain leaves the buffer untouched, so the voice signal falls
    /// straight through to the master bus.
    pub fn route(
        &self,
        board: &mut [EffectModule; EffectKind::COUNT],
        buffer: &mut [f32],
        ctx: &RenderCtx,
    ) {
        for kind in self.as_slice() {
            board[kind.index()].render_block(buffer, ctx);
        }
    }
}

/// Filter the canonical pedal order down to the enabled pedals.
pub fn build_chain(enabled: EnabledSet) -> EffectChain {
    let mut chain = EffectChain {
        slots: EffectKind::CHAIN_ORDER,
        len: 0,
    };
    for kind in EffectKind::CHAIN_ORDER {
        if enabled.contains(kind) {
            chain.slots[chain.len] = kind;
            chain.len += 1;
        }
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_follows_canonical_order_not_enable_order() {
        let mut enabled = EnabledSet::NONE;
        enabled.set(EffectKind::Delay, true);
        enabled.set(EffectKind::Distortion, true);

        let chain = build_chain(enabled);
        assert_eq!(
            chain.as_slice(),
            &[EffectKind::Distortion, EffectKind::Delay]
        );
    }

    #[test]
    fn empty_set_gives_empty_chain() {
        let chain = build_chain(EnabledSet::NONE);
        assert!(chain.is_empty());
    }

    #[test]
    fn full_set_gives_full_order() {
        let enabled: EnabledSet = EffectKind::CHAIN_ORDER.into_iter().collect();
        assert_eq!(build_chain(enabled).as_slice(), &EffectKind::CHAIN_ORDER);
    }

    #[test]
    fn disabling_removes_from_chain() {
        let mut enabled: EnabledSet = [EffectKind::Eq, EffectKind::Wah].into_iter().collect();
        enabled.set(EffectKind::Wah, false);
        assert_eq!(build_chain(enabled).as_slice(), &[EffectKind::Eq]);
    }

    #[test]
    fn empty_chain_routes_through_unchanged() {
        let mut board = EffectModule::board(48000.0);
        let mut buffer = vec![0.25; 64];
        build_chain(EnabledSet::NONE).route(&mut board, &mut buffer, &RenderCtx::new(48000.0));
        assert!(buffer.iter().all(|&s| s == 0.25));
    }
}
