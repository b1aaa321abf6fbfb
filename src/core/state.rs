use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::controllers::relation::RelationController;
use crate::controllers::session::SessionController;
use crate::controllers::token::TokenService;
use crate::controllers::tweet::TweetController;
use crate::controllers::user::UserController;
use crate::controllers::video::VideoController;
use crate::core::error::ConfigError;

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    pub(crate) pool: PgPool,
    pub(crate) user_controller: UserController,
    pub(crate) session_controller: SessionController,
    pub(crate) relation_controller: RelationController,
    pub(crate) video_controller: VideoController,
    pub(crate) tweet_controller: TweetController,
}

impl AppState {
    pub(crate) async fn new(
        database_url: &str,
        access_secret: &str,
        refresh_secret: &str,
    ) -> Result<Self, ConfigError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        let user_controller = UserController::new(pool.clone())?;
        let session_controller = SessionController::new(
            user_controller.clone(),
            TokenService::new(access_secret, refresh_secret),
        );

        Ok(AppState {
            pool: pool.clone(),
            user_controller,
            session_controller,
            relation_controller: RelationController::new(pool.clone()),
            video_controller: VideoController::new(pool.clone()),
            tweet_controller: TweetController::new(pool),
        })
    }
}
