use crate::dto::api::{AdvocatesQuery, AdvocatesResponse};
use crate::repository::AdvocateReader;
use crate::search::AdvocateQuery;
use crate::services::{ServiceError, ServiceResult};

/// Returns the filtered, paginated advocate list for the `/api/advocates` endpoint.
pub fn list_advocates<R>(repo: &R, params: AdvocatesQuery) -> ServiceResult<AdvocatesResponse>
where
    R: AdvocateReader + ?Sized,
{
    let mut query = AdvocateQuery::new().paginate(params.page, params.limit);

    if let Some(search) = params
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        query = query.search(search);
    }

    let page = repo.list_advocates(&query).map_err(|err| {
        log::error!("Failed to list advocates: {err}");
        ServiceError::from(err)
    })?;

    Ok(page.into())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::advocate::Advocate;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::search::SearchPage;

    fn advocate(id: i32) -> Advocate {
        Advocate::try_new(
            id,
            "Jane",
            "Doe",
            "Austin",
            "MD",
            vec![],
            5,
            5551234567,
        )
        .expect("valid advocate")
    }

    #[test]
    fn forwards_trimmed_search_and_pagination() {
        let mut repo = MockRepository::new();
        repo.expect_list_advocates()
            .withf(|query| {
                query.search.as_deref() == Some("jane austin")
                    && query.page == 2
                    && query.page_size == 5
            })
            .times(1)
            .returning(|query| Ok(query.run(&(1..=8).map(advocate).collect::<Vec<_>>())));

        let response = list_advocates(
            &repo,
            AdvocatesQuery {
                search: Some("  jane austin ".to_string()),
                page: 2,
                limit: 5,
            },
        )
        .expect("should list advocates");

        assert_eq!(response.data.len(), 3);
        assert_eq!(response.pagination.total_count, 8);
        assert_eq!(response.pagination.prev_page, Some(1));
        assert_eq!(response.pagination.next_page, None);
    }

    #[test]
    fn blank_search_is_dropped() {
        let mut repo = MockRepository::new();
        repo.expect_list_advocates()
            .withf(|query| query.search.is_none())
            .times(1)
            .returning(|query| Ok(SearchPage::empty(query.page_size)));

        let params = AdvocatesQuery {
            search: Some("   ".to_string()),
            ..AdvocatesQuery::default()
        };

        list_advocates(&repo, params).expect("should list advocates");
    }

    #[test]
    fn repository_failure_is_propagated() {
        let mut repo = MockRepository::new();
        repo.expect_list_advocates()
            .times(1)
            .returning(|_| Err(RepositoryError::ConnectionError("down".to_string())));

        let result = list_advocates(&repo, AdvocatesQuery::default());

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }
}
