use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::core::error::Error;
use crate::types::Id;
use crate::types::response;

#[derive(Clone, Debug)]
pub(crate) struct TweetController {
    pool: PgPool,
}

impl TweetController {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create(
        &self,
        owner_id: &Id,
        content: &str,
    ) -> Result<response::Tweet, Error> {
        if content.trim().is_empty() {
            return Err(Error::EmptyField("content"));
        }

        let id = Id::generate();

        let tweet = sqlx::query(
            "INSERT INTO tweets (id, owner_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, content, created_at, modified_at;",
        )
        .bind(&id)
        .bind(owner_id)
        .bind(content)
        .map(map_tweet)
        .fetch_one(&self.pool)
        .await?;

        Ok(tweet)
    }

    pub(crate) async fn list_by_owner(
        &self,
        owner_id: &Id,
    ) -> Result<Vec<response::Tweet>, Error> {
        let tweets = sqlx::query(
            "SELECT id, owner_id, content, created_at, modified_at
            FROM tweets
            WHERE owner_id = $1
            ORDER BY created_at DESC;",
        )
        .bind(owner_id)
        .map(map_tweet)
        .fetch_all(&self.pool)
        .await?;

        Ok(tweets)
    }

    pub(crate) async fn update(
        &self,
        id: &Id,
        owner_id: &Id,
        content: &str,
    ) -> Result<response::Tweet, Error> {
        if content.trim().is_empty() {
            return Err(Error::EmptyField("newContent"));
        }

        self.check_owner(id, owner_id).await?;

        let tweet = sqlx::query(
            "UPDATE tweets SET content = $3, modified_at = now()
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, content, created_at, modified_at;",
        )
        .bind(id)
        .bind(owner_id)
        .bind(content)
        .map(map_tweet)
        .fetch_one(&self.pool)
        .await?;

        Ok(tweet)
    }

    pub(crate) async fn delete(&self, id: &Id, owner_id: &Id) -> Result<(), Error> {
        self.check_owner(id, owner_id).await?;

        sqlx::query("DELETE FROM tweets WHERE id = $1 AND owner_id = $2;")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn check_owner(&self, id: &Id, owner_id: &Id) -> Result<(), Error> {
        let owner: Id = match sqlx::query("SELECT owner_id FROM tweets WHERE id = $1;")
            .bind(id)
            .map(|row: PgRow| row.get("owner_id"))
            .fetch_one(&self.pool)
            .await
        {
            Ok(owner) => owner,
            Err(sqlx::Error::RowNotFound) => return Err(Error::TweetNotFound),
            Err(e) => return Err(Error::Sql(e)),
        };

        if owner != *owner_id {
            return Err(Error::Forbidden);
        }

        Ok(())
    }
}

fn map_tweet(row: PgRow) -> response::Tweet {
    response::Tweet {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        content: row.get("content"),
        created_at: row.get("created_at"),
        modified_at: row.get("modified_at"),
    }
}
