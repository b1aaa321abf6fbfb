use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::core::error::Error;
use crate::types::Id;
use crate::types::response;

#[derive(Clone, Debug)]
pub(crate) struct VideoController {
    pool: PgPool,
}

impl VideoController {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records video metadata; the media file and thumbnail are opaque
    /// references owned by the external media store.
    pub(crate) async fn publish(
        &self,
        owner_id: &Id,
        title: &str,
        description: &str,
        video_file: &str,
        thumbnail: &str,
        duration: i32,
    ) -> Result<response::Video, Error> {
        if title.trim().is_empty() {
            return Err(Error::EmptyField("title"));
        }

        if video_file.is_empty() {
            return Err(Error::EmptyField("videoFile"));
        }

        if thumbnail.is_empty() {
            return Err(Error::EmptyField("thumbnail"));
        }

        let id = Id::generate();

        sqlx::query(
            "INSERT INTO videos (id, owner_id, title, description, video_file, thumbnail, duration)
            VALUES ($1, $2, $3, $4, $5, $6, $7);",
        )
        .bind(&id)
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .bind(video_file)
        .bind(thumbnail)
        .bind(duration)
        .execute(&self.pool)
        .await?;

        self.get(&id, Some(owner_id)).await?.ok_or(Error::Internal)
    }

    /// Unpublished videos are visible to their owner only.
    pub(crate) async fn get(
        &self,
        id: &Id,
        viewer: Option<&Id>,
    ) -> Result<Option<response::Video>, Error> {
        let video = match sqlx::query(
            "SELECT
                videos.id,
                videos.title,
                videos.description,
                videos.video_file,
                videos.thumbnail,
                videos.duration,
                videos.views,
                videos.is_published,
                videos.created_at,
                users.id AS owner_id,
                users.username,
                users.display_name,
                users.avatar,
                users.cover_image
            FROM videos
            JOIN users ON users.id = videos.owner_id
            WHERE videos.id = $1;",
        )
        .bind(id)
        .map(map_video)
        .fetch_one(&self.pool)
        .await
        {
            Ok(video) => video,
            Err(sqlx::Error::RowNotFound) => return Ok(None),
            Err(e) => return Err(Error::Sql(e)),
        };

        if !video.is_published && viewer != Some(&video.owner.id) {
            return Ok(None);
        }

        Ok(Some(video))
    }

    pub(crate) async fn list_by_owner(
        &self,
        owner_id: &Id,
        page: i64,
        limit: i64,
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
            FROM videos
            JOIN users ON users.id = videos.owner_id
            WHERE videos.owner_id = $1 AND videos.is_published
            ORDER BY videos.created_at DESC
            LIMIT $2 OFFSET $3;",
        )
        .bind(owner_id)
        .bind(limit)
        .bind((page - 1) * limit)
        .map(map_video_summary)
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }
}

fn map_video(row: PgRow) -> response::Video {
    response::Video {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        video_file: row.get("video_file"),
        thumbnail: row.get("thumbnail"),
        duration: row.get("duration"),
        views: row.get("views"),
        is_published: row.get("is_published"),
        created_at: row.get("created_at"),
        owner: response::PublicUser {
            id: row.get("owner_id"),
            username: row.get("username"),
            display_name: row.get("display_name"),
            avatar: row.get("avatar"),
            cover_image: row.get("cover_image"),
        },
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
