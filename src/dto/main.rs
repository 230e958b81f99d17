use serde::Serialize;

use crate::domain::advocate::Advocate;
use crate::domain::types::AdvocateId;
use crate::pagination::Paginated;

/// Specialties shown before the list is collapsed behind a "+N more" link.
pub const SPECIALTY_PREVIEW: usize = 3;

/// Query parameters accepted by the index page service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IndexQuery {
    /// Optional search string entered by the user.
    pub search: Option<String>,
    /// Page number requested by the user interface.
    pub page: Option<i64>,
    /// Advocates whose specialty list is shown in full.
    pub expanded: Vec<AdvocateId>,
}

/// One table row of the directory page.
#[derive(Debug, Clone, Serialize)]
pub struct AdvocateRow {
    pub id: i32,
    pub full_name: String,
    pub city: String,
    pub degree: String,
    /// Specialties to render; truncated unless the row is expanded.
    pub specialties: Vec<String>,
    /// Number of specialties hidden by truncation.
    pub hidden_specialties: usize,
    /// Whether the row has enough specialties to offer a toggle.
    pub can_toggle: bool,
    pub expanded: bool,
    /// Value of the `expanded` parameter after toggling this row.
    pub toggle_expanded: String,
    pub years_of_experience: u32,
    pub phone: String,
}

impl AdvocateRow {
    pub fn new(advocate: &Advocate, expanded: bool, toggle_expanded: String) -> Self {
        let total = advocate.specialties.len();
        let shown = if expanded {
            total
        } else {
            total.min(SPECIALTY_PREVIEW)
        };

        Self {
            id: advocate.id.get(),
            full_name: advocate.full_name(),
            city: advocate.city.to_string(),
            degree: advocate.degree.to_string(),
            specialties: advocate.specialties[..shown]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            hidden_specialties: total - shown,
            can_toggle: total > SPECIALTY_PREVIEW,
            expanded,
            toggle_expanded,
            years_of_experience: advocate.years_of_experience.get(),
            phone: advocate.phone_number.formatted(),
        }
    }
}

/// Data required to render the main index template.
#[derive(Debug, Serialize)]
pub struct IndexPageData {
    /// Search text echoed back into the search box.
    pub search: String,
    pub advocates: Paginated<AdvocateRow>,
    /// Current `expanded` parameter, used when building page links.
    pub expanded: String,
    pub show_pagination: bool,
}

/// Joins identifiers into the comma separated form used in links.
pub fn join_ids<'a>(ids: impl IntoIterator<Item = &'a AdvocateId>) -> String {
    ids.into_iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
