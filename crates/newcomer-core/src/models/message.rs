use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// Delivery state of a provisional user message.
/// Messages are immutable; confirmation is tracked beside them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Pending,
    Confirmed,
    Failed,
}

/// Outcome of one chat send. Lives only as long as the request it scopes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChatRequestOutcome {
    #[default]
    Idle,
    Pending,
    Success(String),
    Failure(String),
}

/// Issues unique, time-derived message ids.
///
/// Ids are the millisecond timestamp; when two messages land in the same
/// millisecond the later one gets a `-n` suffix.
#[derive(Debug, Default)]
pub struct MessageIdGenerator {
    last_millis: i64,
    collisions: u32,
}

impl MessageIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis().max(self.last_millis);
        if millis == self.last_millis {
            self.collisions += 1;
            format!("{}-{}", millis, self.collisions)
        } else {
            self.last_millis = millis;
            self.collisions = 0;
            millis.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut ids = MessageIdGenerator::new();
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let a = ids.next_id(now);
        let b = ids.next_id(now);
        let c = ids.next_id(now);
        assert_eq!(a, "1700000000000");
        assert_eq!(b, "1700000000000-1");
        assert_eq!(c, "1700000000000-2");
    }

    #[test]
    fn test_ids_never_go_backwards() {
        let mut ids = MessageIdGenerator::new();
        let later = Utc.timestamp_millis_opt(2_000).unwrap();
        let earlier = Utc.timestamp_millis_opt(1_000).unwrap();
        let a = ids.next_id(later);
        let b = ids.next_id(earlier);
        assert_ne!(a, b);
        assert_eq!(b, "2000-1");
    }
}
