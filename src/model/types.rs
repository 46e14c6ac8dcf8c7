use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid velocity component: '{0}' (expected 0, 1, 2 or u, v, w)")]
pub struct ParseChannelError(String);

/// Cartesian component of a point-centered vector field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Deserialize)]
#[serde(try_from = "ChannelRepr")]
#[repr(u8)]
pub enum Channel {
    #[default]
    U = 0,
    V = 1,
    W = 2,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::U, Channel::V, Channel::W];

    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Channel::U => "u",
            Channel::V => "v",
            Channel::W => "w",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.index())
    }
}

impl FromStr for Channel {
    type Err = ParseChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "0" | "u" | "x" => Ok(Channel::U),
            "1" | "v" | "y" => Ok(Channel::V),
            "2" | "w" | "z" => Ok(Channel::W),
            _ => Err(ParseChannelError(s.to_string())),
        }
    }
}

impl TryFrom<usize> for Channel {
    type Error = ParseChannelError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or_else(|| ParseChannelError(index.to_string()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChannelRepr {
    Index(usize),
    Name(String),
}

impl TryFrom<ChannelRepr> for Channel {
    type Error = ParseChannelError;

    fn try_from(repr: ChannelRepr) -> Result<Self, Self::Error> {
        match repr {
            ChannelRepr::Index(i) => Channel::try_from(i),
            ChannelRepr::Name(s) => s.parse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_from_str_accepts_indices_and_names() {
        assert_eq!(Channel::from_str("0").unwrap(), Channel::U);
        assert_eq!(Channel::from_str("V").unwrap(), Channel::V);
        assert_eq!(Channel::from_str(" w ").unwrap(), Channel::W);
        assert_eq!(Channel::from_str("z").unwrap(), Channel::W);
    }

    #[test]
    fn channel_from_str_invalid() {
        let err = Channel::from_str("3").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid velocity component: '3' (expected 0, 1, 2 or u, v, w)"
        );
    }

    #[test]
    fn channel_index_round_trips_through_try_from() {
        for channel in Channel::ALL {
            assert_eq!(Channel::try_from(channel.index()).unwrap(), channel);
        }
        assert!(Channel::try_from(7).is_err());
    }

    #[test]
    fn channel_display() {
        assert_eq!(Channel::V.to_string(), "v (1)");
    }
}
