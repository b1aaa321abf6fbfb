use serde::Deserialize;

use crate::core::error::Error;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterData {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) display_name: String,
    pub(crate) password: String,
    pub(crate) avatar: Option<String>,
    pub(crate) cover_image: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct LoginData {
    pub(crate) identifier: String,
    pub(crate) password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshData {
    pub(crate) refresh_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatePasswordData {
    pub(crate) old_password: String,
    pub(crate) new_password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PublishVideoData {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) video_file: String,
    pub(crate) thumbnail: String,
    pub(crate) duration: i32,
}

#[derive(Deserialize)]
pub(crate) struct TweetData {
    pub(crate) content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateTweetData {
    pub(crate) new_content: String,
}

#[derive(Deserialize)]
pub(crate) struct PageQuery {
    pub(crate) page: Option<i64>,
    pub(crate) limit: Option<i64>,
}

#[derive(Deserialize)]
pub(crate) struct OwnedPageQuery {
    pub(crate) owner: String,
    pub(crate) page: Option<i64>,
    pub(crate) limit: Option<i64>,
}

#[derive(Deserialize)]
pub(crate) struct OwnerQuery {
    pub(crate) owner: String,
}

impl PageQuery {
    const DEFAULT_PAGE: i64 = 1;
    const DEFAULT_LIMIT: i64 = 10;
    const MAX_LIMIT: i64 = 100;

    /// Defaults applied, bounds checked; runs before any storage access.
    pub(crate) fn resolve(&self) -> Result<(i64, i64), Error> {
        let page = self.page.unwrap_or(Self::DEFAULT_PAGE);
        let limit = self.limit.unwrap_or(Self::DEFAULT_LIMIT);

        if page < 1 || limit < 1 || limit > Self::MAX_LIMIT {
            return Err(Error::InvalidPage);
        }

        Ok((page, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameters_fall_back_to_defaults() {
        let query = PageQuery {
            page: None,
            limit: None,
        };

        assert!(matches!(query.resolve(), Ok((1, 10))));
    }

    #[test]
    fn out_of_range_parameters_are_rejected() {
        for (page, limit) in [(0, 10), (-3, 10), (1, 0), (1, 101), (1, -5)] {
            let query = PageQuery {
                page: Some(page),
                limit: Some(limit),
            };

            assert!(query.resolve().is_err());
        }
    }
}
