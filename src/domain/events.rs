//! Domain events and the channels they fan out on.

use std::str::FromStr;

use crate::domain::entities::{Link, Vote};

/// A named fan-out topic on the event bus.
///
/// Channel names match the wire-level subscription names clients use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    NewLink,
    NewVote,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::NewLink, Channel::NewVote];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::NewLink => "newLink",
            Channel::NewVote => "newVote",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognized channel names.
#[derive(Debug, thiserror::Error)]
#[error("unknown channel: {0}")]
pub struct UnknownChannel(pub String);

impl FromStr for Channel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newLink" => Ok(Channel::NewLink),
            "newVote" => Ok(Channel::NewVote),
            other => Err(UnknownChannel(other.to_string())),
        }
    }
}

/// An event produced by a successful mutation.
///
/// Ephemeral: exists only in memory during fan-out, never persisted. New
/// subscribers never see events published before they subscribed.
#[derive(Debug, Clone)]
pub enum DomainEvent {
    NewLink { link: Link },
    NewVote { vote: Vote },
}

impl DomainEvent {
    /// The channel this event fans out on.
    pub fn channel(&self) -> Channel {
        match self {
            DomainEvent::NewLink { .. } => Channel::NewLink,
            DomainEvent::NewVote { .. } => Channel::NewVote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_channel_names_round_trip() {
        for channel in Channel::ALL {
            let parsed: Channel = channel.as_str().parse().unwrap();
            assert_eq!(parsed, channel);
        }
    }

    #[test]
    fn test_unknown_channel_rejected() {
        assert!("newComment".parse::<Channel>().is_err());
        assert!("".parse::<Channel>().is_err());
    }

    #[test]
    fn test_event_routes_to_its_channel() {
        let link_event = DomainEvent::NewLink {
            link: Link::new(
                1,
                "https://example.com".to_string(),
                "desc".to_string(),
                None,
                Utc::now(),
            ),
        };
        assert_eq!(link_event.channel(), Channel::NewLink);

        let vote_event = DomainEvent::NewVote {
            vote: Vote::new(1, 2, 3, Utc::now()),
        };
        assert_eq!(vote_event.channel(), Channel::NewVote);
    }
}
