//! Clipboard push sequence numbers.

use touchdeck_types::AckSequence;

/// Hands out acknowledgment sequences for clipboard pushes.
///
/// Starts at 1; [`AckSequence::NONE`] (0) is never produced. The counter is
/// only advanced once the push carrying [`SequenceCounter::peek`] has actually
/// been queued, so a failed push does not burn a number.
#[derive(Debug, Clone)]
pub struct SequenceCounter {
    next: u64,
}

impl Default for SequenceCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// The sequence the next push will carry.
    pub fn peek(&self) -> AckSequence {
        AckSequence(self.next)
    }

    /// Mark the current sequence as used.
    pub fn advance(&mut self) {
        self.next = self.next.checked_add(1).unwrap_or(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one() {
        let counter = SequenceCounter::new();
        assert_eq!(counter.peek(), AckSequence(1));
        assert!(!counter.peek().is_none());
    }

    #[test]
    fn peek_does_not_advance() {
        let mut counter = SequenceCounter::new();
        assert_eq!(counter.peek(), counter.peek());
        counter.advance();
        counter.advance();
        assert_eq!(counter.peek(), AckSequence(3));
    }

    #[test]
    fn wraps_past_sentinel() {
        let mut counter = SequenceCounter { next: u64::MAX };
        counter.advance();
        assert_eq!(counter.peek(), AckSequence(1));
    }
}
