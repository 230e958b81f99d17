use serde::Deserialize;
use validator::Validate;

use crate::dto::api::AdvocatesQuery;
use crate::forms::FormError;
use crate::search::DEFAULT_PAGE_SIZE;

/// Smallest accepted `limit`.
pub const MIN_LIMIT: usize = 1;
/// Largest accepted `limit`.
pub const MAX_LIMIT: usize = 100;

#[derive(Debug, Default, Deserialize, Validate)]
/// Raw query parameters of `GET /api/advocates`.
///
/// `page` and `limit` are kept as text so that malformed numbers fall back to
/// their defaults instead of rejecting the request.
pub struct AdvocateSearchForm {
    #[validate(length(max = 200))]
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl AdvocateSearchForm {
    /// Validates the parameters and converts them into an [`AdvocatesQuery`].
    pub fn into_query(self) -> Result<AdvocatesQuery, FormError> {
        self.validate()?;

        let page = parse_or(self.page.as_deref(), 1i64);
        let limit = parse_or(self.limit.as_deref(), DEFAULT_PAGE_SIZE as i64);

        let limit = usize::try_from(limit)
            .ok()
            .filter(|limit| (MIN_LIMIT..=MAX_LIMIT).contains(limit))
            .ok_or(FormError::InvalidLimit {
                min: MIN_LIMIT,
                max: MAX_LIMIT,
            })?;

        Ok(AdvocatesQuery {
            search: self.search,
            page,
            limit,
        })
    }
}

fn parse_or(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
