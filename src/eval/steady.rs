use crate::eval::Judgment;
use std::collections::VecDeque;

/// Majority-vote window over recent judgments, for hosts that want feedback
/// to survive a single noisy frame. Sits outside the evaluators; they stay
/// stateless and their output shape is unchanged.
///
/// Rule outcomes are discrete, so frames with the same form errors produce
/// identical judgment values and voting over whole judgments is well
/// defined.
#[derive(Debug)]
pub(crate) struct Debouncer {
    window: VecDeque<Judgment>,
    capacity: usize,
}

impl Debouncer {
    pub(crate) fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record this frame's judgment and return the value occurring most
    /// often in the window. Ties go to the most recent occurrence.
    pub(crate) fn push(&mut self, judgment: Judgment) -> Judgment {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(judgment);

        let mut winner = self.window.len() - 1;
        let mut winner_votes = 0;
        for (index, candidate) in self.window.iter().enumerate() {
            let votes = self.window.iter().filter(|past| *past == candidate).count();
            if votes >= winner_votes {
                winner = index;
                winner_votes = votes;
            }
        }
        self.window[winner].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complaint(message: &'static str) -> Judgment {
        let mut judgment = Judgment::correct();
        judgment.report(message);
        judgment
    }

    #[test]
    fn single_judgment_passes_through() {
        let mut debouncer = Debouncer::new(3);
        let judgment = complaint("Bend knees more");
        assert_eq!(debouncer.push(judgment.clone()), judgment);
    }

    #[test]
    fn majority_suppresses_a_single_noisy_frame() {
        let mut debouncer = Debouncer::new(3);
        let clean = Judgment::correct();
        let noisy = complaint("Bend knees more");

        assert_eq!(debouncer.push(clean.clone()), clean);
        assert_eq!(debouncer.push(clean.clone()), clean);
        // One flickering frame loses the vote two to one.
        assert_eq!(debouncer.push(noisy), clean);
    }

    #[test]
    fn sustained_change_wins_the_window() {
        let mut debouncer = Debouncer::new(3);
        let clean = Judgment::correct();
        let complaint = complaint("Lower your chest");

        debouncer.push(clean.clone());
        debouncer.push(complaint.clone());
        assert_eq!(debouncer.push(complaint.clone()), complaint);
    }

    #[test]
    fn ties_go_to_the_most_recent_judgment() {
        let mut debouncer = Debouncer::new(2);
        let first = complaint("Bend knees more");
        let second = complaint("Leaned forward too much");

        debouncer.push(first);
        assert_eq!(debouncer.push(second.clone()), second);
    }

    #[test]
    fn window_slides_past_old_judgments() {
        let mut debouncer = Debouncer::new(2);
        let old = complaint("Bend knees more");
        let new = Judgment::correct();

        debouncer.push(old.clone());
        debouncer.push(old);
        debouncer.push(new.clone());
        // The window now holds one old and one new; recency breaks the tie,
        // and one more clean frame makes it unanimous.
        assert_eq!(debouncer.push(new.clone()), new);
    }
}
