/// Direction the jump control will move when triggered
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JumpDirection {
    #[default]
    Up,
    Down,
}

impl JumpDirection {
    /// Glyph shown on the jump hint
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
        }
    }
}

/// Tracks the viewport scroll position and derives the jump direction
///
/// Two states, recomputed from the latest sample only: `Up` once the
/// offset reaches half of the scrollable extent, `Down` below it. No
/// hysteresis, no smoothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollAnchor {
    direction: JumpDirection,
}

impl ScrollAnchor {
    /// Feed the latest viewport sample
    pub fn observe(&mut self, offset: usize, extent: usize) {
        // offset >= extent / 2, kept in integers without division loss
        self.direction = if offset.saturating_mul(2) >= extent {
            JumpDirection::Up
        } else {
            JumpDirection::Down
        };
    }

    /// Direction the jump control should move right now
    pub fn direction(&self) -> JumpDirection {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_half_points_up() {
        let mut anchor = ScrollAnchor::default();
        anchor.observe(50, 100);
        assert_eq!(anchor.direction(), JumpDirection::Up);
    }

    #[test]
    fn test_lower_half_points_down() {
        let mut anchor = ScrollAnchor::default();
        anchor.observe(49, 100);
        assert_eq!(anchor.direction(), JumpDirection::Down);
    }

    #[test]
    fn test_boundary_resolves_up() {
        let mut anchor = ScrollAnchor::default();
        // Exactly half, including the odd-extent case where integer
        // division would round the threshold down
        anchor.observe(50, 100);
        assert_eq!(anchor.direction(), JumpDirection::Up);
        anchor.observe(50, 101);
        assert_eq!(anchor.direction(), JumpDirection::Down);
        anchor.observe(51, 101);
        assert_eq!(anchor.direction(), JumpDirection::Up);
    }

    #[test]
    fn test_latest_sample_wins() {
        let mut anchor = ScrollAnchor::default();
        anchor.observe(90, 100);
        assert_eq!(anchor.direction(), JumpDirection::Up);
        anchor.observe(10, 100);
        assert_eq!(anchor.direction(), JumpDirection::Down);
    }
}
