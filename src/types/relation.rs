/// Tagged relation target. A single `(actor, target, kind)` tuple backs both
/// likes (video/comment/tweet targets) and subscriptions (channel targets).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RelationKind {
    Video,
    Comment,
    Tweet,
    Channel,
}

impl RelationKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Comment => "comment",
            Self::Tweet => "tweet",
            Self::Channel => "channel",
        }
    }

    /// Kinds a like may target; `channel` belongs to subscriptions.
    pub(crate) fn from_like_param(value: &str) -> Option<Self> {
        match value {
            "video" => Some(Self::Video),
            "comment" => Some(Self::Comment),
            "tweet" => Some(Self::Tweet),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_params_parse_to_their_kind() {
        assert_eq!(RelationKind::from_like_param("video"), Some(RelationKind::Video));
        assert_eq!(RelationKind::from_like_param("comment"), Some(RelationKind::Comment));
        assert_eq!(RelationKind::from_like_param("tweet"), Some(RelationKind::Tweet));
    }

    #[test]
    fn channel_is_not_a_like_target() {
        assert_eq!(RelationKind::from_like_param("channel"), None);
        assert_eq!(RelationKind::from_like_param("playlist"), None);
        assert_eq!(RelationKind::from_like_param(""), None);
    }
}
