use serde::Deserialize;
use validator::Validate;

use crate::domain::types::AdvocateId;
use crate::dto::main::IndexQuery;
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize, Validate)]
/// Query parameters of the directory index page.
pub struct IndexForm {
    #[validate(length(max = 200))]
    pub search: Option<String>,
    pub page: Option<String>,
    /// Comma separated identifiers of rows showing every specialty.
    pub expanded: Option<String>,
}

impl IndexForm {
    pub fn into_query(self) -> Result<IndexQuery, FormError> {
        self.validate()?;

        let expanded = self
            .expanded
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| {
                id.parse::<i32>()
                    .ok()
                    .and_then(|id| AdvocateId::new(id).ok())
                    .ok_or(FormError::InvalidAdvocateId)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(IndexQuery {
            search: self.search,
            page: self.page.and_then(|page| page.trim().parse().ok()),
            expanded,
        })
    }
}
