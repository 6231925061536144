#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserVote {
    #[default]
    None,
    Up,
    Down,
}

impl From<VoteDirection> for UserVote {
    fn from(direction: VoteDirection) -> Self {
        match direction {
            VoteDirection::Up => Self::Up,
            VoteDirection::Down => Self::Down,
        }
    }
}

/// Vote counters for one question or answer, plus the local user's vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoteTally {
    pub upvotes: u32,
    pub downvotes: u32,
    pub user_vote: UserVote,
}

impl VoteTally {
    pub fn new(upvotes: u32, downvotes: u32) -> Self {
        Self {
            upvotes,
            downvotes,
            user_vote: UserVote::None,
        }
    }

    /// Upvotes minus downvotes, always derived from the counters
    pub fn net_score(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }

    fn counter_mut(&mut self, direction: VoteDirection) -> &mut u32 {
        match direction {
            VoteDirection::Up => &mut self.upvotes,
            VoteDirection::Down => &mut self.downvotes,
        }
    }

    /// Apply, retract or switch the user's vote.
    ///
    /// - same direction again: retract it
    /// - no vote yet: apply it
    /// - opposite vote held: move it over (net swing of two)
    pub fn cast(&mut self, direction: VoteDirection) {
        let requested = UserVote::from(direction);
        if self.user_vote == requested {
            let counter = self.counter_mut(direction);
            *counter = counter.saturating_sub(1);
            self.user_vote = UserVote::None;
        } else if self.user_vote == UserVote::None {
            *self.counter_mut(direction) += 1;
            self.user_vote = requested;
        } else {
            *self.counter_mut(direction) += 1;
            let opposite = self.counter_mut(direction.opposite());
            *opposite = opposite.saturating_sub(1);
            self.user_vote = requested;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub id: String,
    pub text: String,
    pub author: String,
    pub timestamp: String,
    pub votes: VoteTally,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub author: String,
    pub timestamp: String,
    pub votes: VoteTally,
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn answer(&self, answer_id: &str) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id == answer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_vote() {
        let mut tally = VoteTally::new(3, 1);
        tally.cast(VoteDirection::Up);
        assert_eq!(tally.upvotes, 4);
        assert_eq!(tally.downvotes, 1);
        assert_eq!(tally.user_vote, UserVote::Up);
    }

    #[test]
    fn test_same_direction_twice_retracts() {
        let mut tally = VoteTally::new(3, 1);
        let before = tally;
        tally.cast(VoteDirection::Up);
        tally.cast(VoteDirection::Up);
        assert_eq!(tally, before);
        assert_eq!(tally.user_vote, UserVote::None);

        tally.cast(VoteDirection::Down);
        tally.cast(VoteDirection::Down);
        assert_eq!(tally, before);
    }

    #[test]
    fn test_switch_swings_net_score_by_two() {
        let mut tally = VoteTally::new(5, 2);
        tally.cast(VoteDirection::Up);
        let after_up = tally.net_score();
        tally.cast(VoteDirection::Down);
        assert_eq!(tally.net_score(), after_up - 2);
        assert_eq!(tally.upvotes, 5);
        assert_eq!(tally.downvotes, 3);
        assert_eq!(tally.user_vote, UserVote::Down);

        tally.cast(VoteDirection::Up);
        assert_eq!(tally.net_score(), after_up);
        assert_eq!(tally.user_vote, UserVote::Up);
    }

    #[test]
    fn test_net_score_can_be_negative() {
        let mut tally = VoteTally::default();
        tally.cast(VoteDirection::Down);
        assert_eq!(tally.net_score(), -1);
    }
}
