pub(crate) mod likes;
pub(crate) mod router;
pub(crate) mod sessions;
pub(crate) mod subscriptions;
pub(crate) mod tweets;
pub(crate) mod users;
pub(crate) mod videos;
