//! State and transitions behind the advocate directory page.
//!
//! [`DirectoryState`] is mutated only through [`Transition`]s. Transitions
//! that invalidate the displayed page return the [`AdvocateQuery`] that must
//! be fetched next; [`DirectoryController`] performs those fetches against an
//! [`AdvocateReader`] and feeds the outcome back as further transitions.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::domain::advocate::Advocate;
use crate::domain::types::AdvocateId;
use crate::repository::AdvocateReader;
use crate::search::{AdvocateQuery, SearchPage};

pub mod debounce;

pub use debounce::{Debouncer, debounce};

/// Default idle time before typed search text is applied.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Idle,
    Loading,
}

/// Events that move the directory state forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The debounced search text settled on a new value.
    SearchChanged(String),
    /// The user asked for a page; the value is clamped before use.
    PageChanged(i64),
    /// Search text and page requested together, as when opening a link.
    /// The page is clamped once the result count is known.
    Navigated { search: String, page: i64 },
    ToggleExpanded(AdvocateId),
    FetchStarted,
    FetchCompleted(SearchPage<Advocate>),
    FetchFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryState {
    search_input: String,
    search: String,
    current_page: usize,
    page_size: usize,
    expanded: BTreeSet<AdvocateId>,
    load_state: LoadState,
    advocates: Vec<Advocate>,
    total_count: usize,
    total_pages: usize,
    /// Search and page that match `advocates`, restored when a fetch fails.
    committed: Option<(String, usize)>,
}

impl DirectoryState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search_input: String::new(),
            search: String::new(),
            current_page: 1,
            page_size: page_size.max(1),
            expanded: BTreeSet::new(),
            load_state: LoadState::Idle,
            advocates: Vec::new(),
            total_count: 0,
            total_pages: 0,
            committed: None,
        }
    }

    /// Applies `transition`, returning the query to fetch when the visible page
    /// is no longer current.
    pub fn apply(&mut self, transition: Transition) -> Option<AdvocateQuery> {
        match transition {
            Transition::SearchChanged(search) => {
                if search == self.search {
                    return None;
                }
                self.remember_committed();
                self.search = search;
                self.current_page = 1;
                Some(self.query())
            }
            Transition::PageChanged(requested) => {
                let page = self.clamp_page(requested);
                if page == self.current_page {
                    return None;
                }
                self.remember_committed();
                self.current_page = page;
                Some(self.query())
            }
            Transition::Navigated { search, page } => {
                self.remember_committed();
                self.search = search;
                self.current_page = usize::try_from(page).unwrap_or(1).max(1);
                Some(self.query())
            }
            Transition::ToggleExpanded(id) => {
                self.expanded = self.toggled(id);
                None
            }
            Transition::FetchStarted => {
                self.load_state = LoadState::Loading;
                None
            }
            Transition::FetchCompleted(page) => {
                self.advocates = page.items;
                self.total_count = page.total_count;
                self.total_pages = page.total_pages;
                self.committed = None;
                self.load_state = LoadState::Idle;
                None
            }
            Transition::FetchFailed(_) => {
                if let Some((search, page)) = self.committed.take() {
                    self.search = search;
                    self.current_page = page;
                }
                self.load_state = LoadState::Idle;
                None
            }
        }
    }

    fn remember_committed(&mut self) {
        if self.committed.is_none() {
            self.committed = Some((self.search.clone(), self.current_page));
        }
    }

    /// Whether the current page lies past the last page of the latest result.
    pub fn page_out_of_range(&self) -> bool {
        self.current_page > self.total_pages.max(1)
    }

    /// Clamps a requested page into `[1, total_pages]`, or `1` without results.
    pub fn clamp_page(&self, requested: i64) -> usize {
        let last = self.total_pages.max(1);
        usize::try_from(requested).unwrap_or(1).clamp(1, last)
    }

    /// Expansion set as it would be after toggling `id`.
    pub fn toggled(&self, id: AdvocateId) -> BTreeSet<AdvocateId> {
        let mut expanded = self.expanded.clone();
        if !expanded.remove(&id) {
            expanded.insert(id);
        }
        expanded
    }

    /// Query for the page currently in view.
    pub fn query(&self) -> AdvocateQuery {
        let query = AdvocateQuery::new().paginate(self.current_page as i64, self.page_size);
        if self.search.trim().is_empty() {
            query
        } else {
            query.search(self.search.clone())
        }
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn expanded(&self) -> &BTreeSet<AdvocateId> {
        &self.expanded
    }

    pub fn is_expanded(&self, id: AdvocateId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn advocates(&self) -> &[Advocate] {
        &self.advocates
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Rows are replaced by a placeholder while a fetch is in flight.
    pub fn show_placeholder(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn show_pagination(&self) -> bool {
        self.load_state == LoadState::Idle && self.total_count > 0 && self.total_pages > 1
    }
}

/// Drives a [`DirectoryState`] from user events, fetching through `R`.
pub struct DirectoryController<'a, R: ?Sized> {
    repo: &'a R,
    state: DirectoryState,
    debouncer: Debouncer<String>,
}

impl<'a, R> DirectoryController<'a, R>
where
    R: AdvocateReader + ?Sized,
{
    pub fn new(repo: &'a R, page_size: usize, search_debounce: Duration) -> Self {
        Self {
            repo,
            state: DirectoryState::new(page_size),
            debouncer: Debouncer::new(search_debounce),
        }
    }

    pub fn state(&self) -> &DirectoryState {
        &self.state
    }

    pub fn into_state(self) -> DirectoryState {
        self.state
    }

    /// Fetches the page currently in view.
    pub fn refresh(&mut self) {
        let query = self.state.query();
        self.fetch(query);
    }

    /// Records typed search text; it is applied once input settles.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        self.state.search_input = text.clone();
        self.debouncer.push(text, now);
    }

    /// Applies settled search text whose debounce deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(search) = self.debouncer.poll(now) {
            self.dispatch(Transition::SearchChanged(search));
        }
    }

    /// When the pending search text, if any, will be applied.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Applies search text immediately, bypassing the debounce timer.
    pub fn submit_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.debouncer.cancel();
        self.state.search_input = text.clone();
        self.dispatch(Transition::SearchChanged(text));
    }

    /// Clears the search box and returns to the first page.
    pub fn reset_search(&mut self) {
        self.submit_search(String::new());
        self.dispatch(Transition::PageChanged(1));
    }

    /// Applies search text and a page in one step.
    ///
    /// One fetch is issued; a second one follows only when the requested page
    /// turns out to lie past the last page of the results.
    pub fn open(&mut self, search: impl Into<String>, page: i64) {
        let search = search.into();
        self.debouncer.cancel();
        self.state.search_input = search.clone();
        self.dispatch(Transition::Navigated { search, page });
        if self.state.page_out_of_range() {
            self.dispatch(Transition::PageChanged(self.state.total_pages as i64));
        }
    }

    pub fn go_to_page(&mut self, page: i64) {
        self.dispatch(Transition::PageChanged(page));
    }

    pub fn toggle_specialties(&mut self, id: AdvocateId) {
        self.dispatch(Transition::ToggleExpanded(id));
    }

    fn dispatch(&mut self, transition: Transition) {
        if let Some(query) = self.state.apply(transition) {
            self.fetch(query);
        }
    }

    fn fetch(&mut self, query: AdvocateQuery) {
        self.state.apply(Transition::FetchStarted);
        let outcome = match self.repo.list_advocates(&query) {
            Ok(page) => Transition::FetchCompleted(page),
            Err(err) => {
                log::error!("Error fetching advocates: {err}");
                Transition::FetchFailed(err.to_string())
            }
        };
        self.state.apply(outcome);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::repository::StaticRepository;
    use crate::repository::errors::{RepositoryError, RepositoryResult};

    fn advocate(id: i32, first: &str, city: &str) -> Advocate {
        Advocate::try_new(
            id,
            first,
            "Doe",
            city,
            "MSW",
            vec!["Grief".to_string()],
            4,
            5550001111,
        )
        .expect("valid advocate")
    }

    fn repo(count: i32) -> StaticRepository {
        StaticRepository::new(
            (1..=count)
                .map(|id| {
                    let city = if id % 2 == 0 { "Austin" } else { "Houston" };
                    advocate(id, &format!("Person{id}"), city)
                })
                .collect(),
        )
    }

    /// Counts fetches and records the queries issued.
    struct Recording<'a> {
        inner: &'a StaticRepository,
        queries: RefCell<Vec<AdvocateQuery>>,
    }

    impl AdvocateReader for Recording<'_> {
        fn list_advocates(&self, query: &AdvocateQuery) -> RepositoryResult<SearchPage<Advocate>> {
            self.queries.borrow_mut().push(query.clone());
            self.inner.list_advocates(query)
        }
    }

    /// Succeeds `successes` times, then fails every subsequent fetch.
    struct Flaky {
        inner: StaticRepository,
        calls: Cell<usize>,
        successes: usize,
    }

    impl AdvocateReader for Flaky {
        fn list_advocates(&self, query: &AdvocateQuery) -> RepositoryResult<SearchPage<Advocate>> {
            let calls = self.calls.get();
            self.calls.set(calls + 1);
            if calls < self.successes {
                self.inner.list_advocates(query)
            } else {
                Err(RepositoryError::ConnectionError("offline".to_string()))
            }
        }
    }

    #[test]
    fn refresh_loads_first_page() {
        let repo = repo(25);
        let mut controller = DirectoryController::new(&repo, 10, DEFAULT_SEARCH_DEBOUNCE);
        controller.refresh();

        let state = controller.state();
        assert_eq!(state.advocates().len(), 10);
        assert_eq!(state.total_count(), 25);
        assert_eq!(state.total_pages(), 3);
        assert_eq!(state.load_state(), LoadState::Idle);
        assert!(state.show_pagination());
    }

    #[test]
    fn page_requests_are_clamped() {
        let repo = repo(25);
        let mut controller = DirectoryController::new(&repo, 10, DEFAULT_SEARCH_DEBOUNCE);
        controller.refresh();

        controller.go_to_page(99);
        assert_eq!(controller.state().current_page(), 3);
        assert_eq!(controller.state().advocates().len(), 5);

        controller.go_to_page(0);
        assert_eq!(controller.state().current_page(), 1);

        controller.go_to_page(-7);
        assert_eq!(controller.state().current_page(), 1);
    }

    #[test]
    fn clamp_without_results_is_first_page() {
        let state = DirectoryState::new(10);
        assert_eq!(state.clamp_page(5), 1);
        assert_eq!(state.clamp_page(0), 1);
    }

    #[test]
    fn search_change_resets_page() {
        let repo = repo(40);
        let mut controller = DirectoryController::new(&repo, 10, DEFAULT_SEARCH_DEBOUNCE);
        controller.refresh();
        controller.go_to_page(3);
        assert_eq!(controller.state().current_page(), 3);

        controller.submit_search("austin");
        assert_eq!(controller.state().current_page(), 1);
        assert_eq!(controller.state().total_count(), 20);
    }

    #[test]
    fn typing_burst_triggers_one_fetch() {
        let base = repo(30);
        let recording = Recording {
            inner: &base,
            queries: RefCell::new(Vec::new()),
        };
        let start = Instant::now();
        let mut controller = DirectoryController::new(&recording, 10, DEFAULT_SEARCH_DEBOUNCE);

        for (offset, text) in [(0, "a"), (100, "au"), (200, "aus"), (350, "austin")] {
            let now = start + Duration::from_millis(offset);
            controller.tick(now);
            controller.input(text, now);
        }
        assert_eq!(controller.state().search_input(), "austin");
        assert_eq!(controller.state().search(), "");

        controller.tick(start + Duration::from_millis(600));
        assert!(recording.queries.borrow().is_empty());

        controller.tick(start + Duration::from_millis(650));
        let queries = recording.queries.borrow();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].search.as_deref(), Some("austin"));
        assert_eq!(queries[0].page, 1);
        drop(queries);
        assert_eq!(controller.state().total_count(), 15);
        assert_eq!(controller.next_deadline(), None);
    }

    #[test]
    fn unchanged_search_does_not_refetch() {
        let base = repo(5);
        let recording = Recording {
            inner: &base,
            queries: RefCell::new(Vec::new()),
        };
        let mut controller = DirectoryController::new(&recording, 10, DEFAULT_SEARCH_DEBOUNCE);
        controller.submit_search("person");
        controller.submit_search("person");
        assert_eq!(recording.queries.borrow().len(), 1);
    }

    #[test]
    fn reset_search_clears_text_and_page() {
        let repo = repo(30);
        let mut controller = DirectoryController::new(&repo, 5, DEFAULT_SEARCH_DEBOUNCE);
        controller.submit_search("houston");
        controller.go_to_page(2);
        controller.input("hous", Instant::now());

        controller.reset_search();

        let state = controller.state();
        assert_eq!(state.search_input(), "");
        assert_eq!(state.search(), "");
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.total_count(), 30);
        assert_eq!(controller.next_deadline(), None);
    }

    #[test]
    fn toggling_twice_restores_expansion() {
        let repo = repo(3);
        let mut controller = DirectoryController::new(&repo, 10, DEFAULT_SEARCH_DEBOUNCE);
        let id = AdvocateId::new(2).unwrap();
        let before = controller.state().expanded().clone();

        controller.toggle_specialties(id);
        assert!(controller.state().is_expanded(id));

        controller.toggle_specialties(id);
        assert_eq!(controller.state().expanded(), &before);
    }

    #[test]
    fn failed_fetch_keeps_previous_rows() {
        let flaky = Flaky {
            inner: repo(12),
            calls: Cell::new(0),
            successes: 1,
        };
        let mut controller = DirectoryController::new(&flaky, 10, DEFAULT_SEARCH_DEBOUNCE);
        controller.refresh();
        let shown = controller.state().advocates().to_vec();

        controller.go_to_page(2);

        let state = controller.state();
        assert_eq!(state.load_state(), LoadState::Idle);
        assert_eq!(state.advocates(), shown.as_slice());
        assert_eq!(state.total_count(), 12);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.query().page, 1);
    }

    #[test]
    fn failed_search_restores_previous_search() {
        let flaky = Flaky {
            inner: repo(12),
            calls: Cell::new(0),
            successes: 2,
        };
        let mut controller = DirectoryController::new(&flaky, 5, DEFAULT_SEARCH_DEBOUNCE);
        controller.refresh();
        controller.go_to_page(2);
        assert_eq!(controller.state().current_page(), 2);

        controller.submit_search("austin");

        let state = controller.state();
        assert_eq!(state.search(), "");
        assert_eq!(state.search_input(), "austin");
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn open_fetches_once_when_page_in_range() {
        let base = repo(40);
        let recording = Recording {
            inner: &base,
            queries: RefCell::new(Vec::new()),
        };
        let mut controller = DirectoryController::new(&recording, 5, DEFAULT_SEARCH_DEBOUNCE);

        controller.open("austin", 3);

        let queries = recording.queries.borrow();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].search.as_deref(), Some("austin"));
        assert_eq!(queries[0].page, 3);
        drop(queries);
        assert_eq!(controller.state().current_page(), 3);
        assert_eq!(controller.state().advocates().len(), 5);
    }

    #[test]
    fn open_clamps_page_past_the_end() {
        let base = repo(40);
        let recording = Recording {
            inner: &base,
            queries: RefCell::new(Vec::new()),
        };
        let mut controller = DirectoryController::new(&recording, 5, DEFAULT_SEARCH_DEBOUNCE);

        controller.open("austin", 99);

        assert_eq!(recording.queries.borrow().len(), 2);
        assert_eq!(controller.state().current_page(), 4);
        assert_eq!(controller.state().advocates().len(), 5);

        controller.open("", -3);
        assert_eq!(controller.state().current_page(), 1);
        assert_eq!(controller.state().total_count(), 40);
    }

    #[test]
    fn loading_state_hides_rows_and_pagination() {
        let mut state = DirectoryState::new(10);
        state.apply(Transition::FetchStarted);
        assert!(state.show_placeholder());
        assert!(!state.show_pagination());

        state.apply(Transition::FetchCompleted(SearchPage::empty(10)));
        assert!(!state.show_placeholder());
        assert!(!state.show_pagination());
    }
}
