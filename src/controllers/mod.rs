pub(crate) mod relation;
pub(crate) mod session;
pub(crate) mod token;
pub(crate) mod tweet;
pub(crate) mod user;
pub(crate) mod video;
