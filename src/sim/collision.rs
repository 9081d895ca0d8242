//! Collision resolution for a skier overlapping an obstacle
//!
//! Rules are checked in order and the first one that matches decides the
//! outcome. When no rule matches the crash stands. The default order is
//! ramp first, then jump: a ramp always launches the skier whatever their
//! jump state, and an airborne skier clears everything except trees.

use super::obstacles::ObstacleKind;

/// What happens to a skier whose bounds overlap an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Crash stands
    Crash,
    /// No crash
    Pass,
    /// No crash, and the skier is launched into a jump
    Launch,
}

impl Resolution {
    #[inline]
    pub fn should_crash(self) -> bool {
        self == Resolution::Crash
    }
}

/// A single rule: a predicate over (obstacle kind, skier airborne) plus its effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionRule {
    /// Ramps launch the skier
    Ramp,
    /// An airborne skier clears any jumpable obstacle
    Jump,
}

impl CollisionRule {
    /// The rule's resolution if it applies to this collision
    pub fn check(self, kind: ObstacleKind, jumping: bool) -> Option<Resolution> {
        match self {
            CollisionRule::Ramp if kind.is_ramp() => Some(Resolution::Launch),
            CollisionRule::Jump if jumping && kind.is_jumpable() => Some(Resolution::Pass),
            _ => None,
        }
    }
}

/// Ordered rule list, first match wins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionChain {
    rules: Vec<CollisionRule>,
}

impl Default for CollisionChain {
    fn default() -> Self {
        Self::new(vec![CollisionRule::Ramp, CollisionRule::Jump])
    }
}

impl CollisionChain {
    pub fn new(rules: Vec<CollisionRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[CollisionRule] {
        &self.rules
    }

    pub fn resolve(&self, kind: ObstacleKind, jumping: bool) -> Resolution {
        self.rules
            .iter()
            .find_map(|rule| rule.check(kind, jumping))
            .unwrap_or(Resolution::Crash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_always_launches() {
        let chain = CollisionChain::default();
        assert_eq!(chain.resolve(ObstacleKind::JumpRamp, false), Resolution::Launch);
        assert_eq!(chain.resolve(ObstacleKind::JumpRamp, true), Resolution::Launch);
    }

    #[test]
    fn test_tree_crashes_even_when_jumping() {
        let chain = CollisionChain::default();
        for kind in [ObstacleKind::Tree, ObstacleKind::TreeCluster] {
            assert_eq!(chain.resolve(kind, true), Resolution::Crash);
            assert_eq!(chain.resolve(kind, false), Resolution::Crash);
        }
    }

    #[test]
    fn test_rock_only_clears_when_jumping() {
        let chain = CollisionChain::default();
        for kind in [ObstacleKind::Rock1, ObstacleKind::Rock2] {
            assert_eq!(chain.resolve(kind, true), Resolution::Pass);
            assert_eq!(chain.resolve(kind, false), Resolution::Crash);
        }
    }

    #[test]
    fn test_order_decides_ramp_while_jumping() {
        // Jump rule first: an airborne skier passes over the ramp without relaunching
        let chain = CollisionChain::new(vec![CollisionRule::Jump, CollisionRule::Ramp]);
        assert_eq!(chain.resolve(ObstacleKind::JumpRamp, true), Resolution::Pass);
        assert_eq!(chain.resolve(ObstacleKind::JumpRamp, false), Resolution::Launch);
    }

    #[test]
    fn test_empty_chain_always_crashes() {
        let chain = CollisionChain::new(Vec::new());
        for kind in ObstacleKind::ALL {
            assert!(chain.resolve(kind, true).should_crash());
        }
    }
}
