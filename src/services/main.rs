use std::time::Duration;

use crate::controller::DirectoryController;
use crate::dto::main::{AdvocateRow, IndexPageData, IndexQuery, join_ids};
use crate::pagination::Paginated;
use crate::repository::AdvocateReader;
use crate::services::ServiceResult;

/// Loads the advocate table for the main index page.
///
/// The request parameters are replayed through a [`DirectoryController`] so
/// page clamping, search resets and expansion toggles behave exactly as they
/// do for interactive use. A failed fetch renders an empty table.
pub fn load_index_page<R>(
    repo: &R,
    query: IndexQuery,
    page_size: usize,
) -> ServiceResult<IndexPageData>
where
    R: AdvocateReader + ?Sized,
{
    let mut controller = DirectoryController::new(repo, page_size, Duration::ZERO);

    let search = query.search.unwrap_or_default().trim().to_string();
    controller.open(search, query.page.unwrap_or(1));

    for id in query.expanded {
        if !controller.state().is_expanded(id) {
            controller.toggle_specialties(id);
        }
    }

    let state = controller.into_state();

    let rows = state
        .advocates()
        .iter()
        .map(|advocate| {
            AdvocateRow::new(
                advocate,
                state.is_expanded(advocate.id),
                join_ids(&state.toggled(advocate.id)),
            )
        })
        .collect();

    let advocates = Paginated::new(
        rows,
        state.current_page(),
        state.total_pages(),
        state.total_count(),
        state.page_size(),
    );

    Ok(IndexPageData {
        search: state.search_input().to_string(),
        advocates,
        expanded: join_ids(state.expanded()),
        show_pagination: state.show_pagination(),
    })
}
