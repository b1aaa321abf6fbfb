use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::core::error::Error;
use crate::types::Id;
use crate::types::relation::RelationKind;
use crate::types::response;

/// Atomic toggle over the relations table plus the read-only aggregations
/// layered on its data.
#[derive(Clone, Debug)]
pub(crate) struct RelationController {
    pool: PgPool,
}

impl RelationController {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Flips the (actor, target, kind) relation and reports the resulting
    /// state: `true` when the relation is now live.
    ///
    /// Each statement is atomic on its own. Racing toggles may both miss the
    /// delete, but the unique constraint collapses their inserts into a
    /// single row, and deleting an already-deleted tuple is a no-op.
    pub(crate) async fn toggle(
        &self,
        actor_id: &Id,
        target_id: &Id,
        kind: RelationKind,
    ) -> Result<bool, Error> {
        if kind == RelationKind::Channel && actor_id == target_id {
            return Err(Error::SelfSubscription);
        }

        let deleted = sqlx::query(
            "DELETE FROM relations WHERE actor_id = $1 AND target_id = $2 AND target_kind = $3;",
        )
        .bind(actor_id)
        .bind(target_id)
        .bind(kind.as_str())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if deleted > 0 {
            return Ok(false);
        }

        // a conflicting insert means a concurrent toggle already made the
        // relation live; either way it is live now
        sqlx::query(
            "INSERT INTO relations (actor_id, target_id, target_kind)
            VALUES ($1, $2, $3)
            ON CONFLICT (actor_id, target_id, target_kind) DO NOTHING;",
        )
        .bind(actor_id)
        .bind(target_id)
        .bind(kind.as_str())
        .execute(&self.pool)
        .await?;

        Ok(true)
    }

    pub(crate) async fn liked_videos(
        &self,
        actor_id: &Id,
    ) -> Result<Vec<response::VideoSummary>, Error> {
        let videos = sqlx::query(
            "SELECT
                videos.id,
                videos.title,
                videos.thumbnail,
                videos.duration,
                videos.views,
                users.id AS owner_id,
                users.username,
                users.display_name,
                users.avatar,
                users.cover_image
            FROM relations
            JOIN videos ON videos.id = relations.target_id
            JOIN users ON users.id = videos.owner_id
            WHERE relations.actor_id = $1 AND relations.target_kind = 'video'
            ORDER BY relations.id DESC;",
        )
        .bind(actor_id)
        .map(map_video_summary)
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    pub(crate) async fn subscribed_channels(
        &self,
        actor_id: &Id,
    ) -> Result<Vec<response::PublicUser>, Error> {
        let channels = sqlx::query(
            "SELECT
                users.id,
                users.username,
                users.display_name,
                users.avatar,
                users.cover_image
            FROM relations
            JOIN users ON users.id = relations.target_id
            WHERE relations.actor_id = $1 AND relations.target_kind = 'channel'
            ORDER BY relations.id DESC;",
        )
        .bind(actor_id)
        .map(map_public_user)
        .fetch_all(&self.pool)
        .await?;

        Ok(channels)
    }

    /// Page of subscribers in subscription order, with the overall count. An
    /// empty page is a valid outcome, not a lookup failure.
    pub(crate) async fn channel_subscribers(
        &self,
        channel_id: &Id,
        page: i64,
        limit: i64,
    ) -> Result<(i64, Vec<response::PublicUser>), Error> {
        let total: i64 = sqlx::query(
            "SELECT COUNT(*) AS total
            FROM relations
            WHERE target_id = $1 AND target_kind = 'channel';",
        )
        .bind(channel_id)
        .map(|row: PgRow| row.get("total"))
        .fetch_one(&self.pool)
        .await?;

        let subscribers = sqlx::query(
            "SELECT
                users.id,
                users.username,
                users.display_name,
                users.avatar,
                users.cover_image
            FROM relations
            JOIN users ON users.id = relations.actor_id
            WHERE relations.target_id = $1 AND relations.target_kind = 'channel'
            ORDER BY relations.id
            LIMIT $2 OFFSET $3;",
        )
        .bind(channel_id)
        .bind(limit)
        .bind((page - 1) * limit)
        .map(map_public_user)
        .fetch_all(&self.pool)
        .await?;

        Ok((total, subscribers))
    }
}

fn map_public_user(row: PgRow) -> response::PublicUser {
    response::PublicUser {
        id: row.get("id"),
        username: row.get("username"),
        display_name: row.get("display_name"),
        avatar: row.get("avatar"),
        cover_image: row.get("cover_image"),
    }
}

fn map_video_summary(row: PgRow) -> response::VideoSummary {
    response::VideoSummary {
        id: row.get("id"),
        title: row.get("title"),
        thumbnail: row.get("thumbnail"),
        duration: row.get("duration"),
        views: row.get("views"),
        owner: response::PublicUser {
            id: row.get("owner_id"),
            username: row.get("username"),
            display_name: row.get("display_name"),
            avatar: row.get("avatar"),
            cover_image: row.get("cover_image"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;
    use std::time::Duration;

    fn controller() -> RelationController {
        // lazy pool with no server behind it: any query fails fast with a
        // storage error instead of hanging
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(100))
            .connect_lazy("postgresql://localhost/vidcore")
            .unwrap();

        RelationController::new(pool)
    }

    #[tokio::test]
    async fn self_subscription_is_rejected_before_storage() {
        let controller = controller();
        let actor = Id::generate();

        assert!(matches!(
            controller
                .toggle(&actor, &actor, RelationKind::Channel)
                .await,
            Err(Error::SelfSubscription)
        ));
    }

    #[tokio::test]
    async fn self_likes_are_allowed_past_the_guard() {
        let controller = controller();
        let actor = Id::generate();

        // same actor and target, but a like: the guard must not fire and the
        // call proceeds to storage
        assert!(matches!(
            controller.toggle(&actor, &actor, RelationKind::Video).await,
            Err(Error::Sql(_))
        ));
    }
}
