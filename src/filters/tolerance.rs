use super::abs;

/// Holds the last accepted value and rejects candidates that drift less
/// than `epsilon` away from it. Keeps noisy sub-resolution movement from
/// turning into notification churn.
pub struct ToleranceGate {
    epsilon: f32,
    accepted: f32,
}

impl ToleranceGate {
    pub fn new(epsilon: f32) -> Self {
        Self {
            epsilon,
            accepted: 0.0,
        }
    }

    /// Returns `Some(candidate)` and remembers it when it moved at least
    /// `epsilon` from the last accepted value, `None` otherwise.
    pub fn pass(&mut self, candidate: f32) -> Option<f32> {
        if abs(candidate - self.accepted) < self.epsilon {
            return None;
        }
        self.accepted = candidate;
        Some(candidate)
    }

    pub fn accepted(&self) -> f32 {
        self.accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_drift_below_epsilon() {
        let mut gate = ToleranceGate::new(0.1);

        assert_eq!(gate.pass(1.0), Some(1.0));
        assert_eq!(gate.pass(1.05), None);
        assert_eq!(gate.accepted(), 1.0);
    }

    #[test]
    fn accepts_movement_in_either_direction() {
        let mut gate = ToleranceGate::new(0.1);

        assert_eq!(gate.pass(2.0), Some(2.0));
        assert_eq!(gate.pass(1.0), Some(1.0));
        assert_eq!(gate.accepted(), 1.0);
    }

    #[test]
    fn starts_from_zero() {
        let mut gate = ToleranceGate::new(0.1);

        // a first candidate inside epsilon of zero is noise, not a change
        assert_eq!(gate.pass(0.05), None);
        assert_eq!(gate.accepted(), 0.0);
    }
}
