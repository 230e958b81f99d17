//! Free-text filtering and pagination over advocate records.
//!
//! Every search term must match at least one searchable field of a record
//! (first name, last name, city, degree, a specialty, years of experience or
//! the phone digits). Matching is case-insensitive substring matching. The
//! functions here are total: out-of-range pages produce an empty slice.

use crate::domain::advocate::Advocate;

/// Number of advocates returned per page unless the caller asks otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Filter and page request applied to a collection of advocates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvocateQuery {
    pub search: Option<String>,
    pub page: i64,
    pub page_size: usize,
}

impl Default for AdvocateQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl AdvocateQuery {
    pub fn new() -> Self {
        Self {
            search: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn paginate(mut self, page: i64, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// Runs this query against `records`.
    pub fn run(&self, records: &[Advocate]) -> SearchPage<Advocate> {
        query(
            records,
            self.search.as_deref().unwrap_or(""),
            self.page,
            self.page_size,
        )
    }
}

/// One page of matches together with pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub total_pages: usize,
    pub current_page: i64,
    pub page_size: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> SearchPage<T> {
    pub fn empty(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            total_pages: 0,
            current_page: 1,
            page_size,
            has_next: false,
            has_prev: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Term {
    text: String,
    digits: String,
}

/// Lower-cased search terms parsed from user input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerms {
    terms: Vec<Term>,
}

impl SearchTerms {
    pub fn parse(input: &str) -> Self {
        let mut terms: Vec<Term> = Vec::new();
        for word in input.to_lowercase().split_whitespace() {
            if terms.iter().any(|t| t.text == word) {
                continue;
            }
            terms.push(Term {
                text: word.to_string(),
                digits: word.chars().filter(char::is_ascii_digit).collect(),
            });
        }
        Self { terms }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }
}

/// Lower-cased view of the searchable fields of one advocate.
struct SearchFields {
    text: Vec<String>,
    phone_digits: String,
}

impl SearchFields {
    fn of(advocate: &Advocate) -> Self {
        let mut text = vec![
            advocate.first_name.to_lowercase(),
            advocate.last_name.to_lowercase(),
            advocate.city.to_lowercase(),
            advocate.degree.to_lowercase(),
            advocate.years_of_experience.to_string(),
        ];
        text.extend(advocate.specialties.iter().map(|s| s.to_lowercase()));

        Self {
            text,
            phone_digits: advocate.phone_number.digits(),
        }
    }

    fn matches(&self, term: &Term) -> bool {
        self.text.iter().any(|field| field.contains(&term.text))
            || (!term.digits.is_empty() && self.phone_digits.contains(&term.digits))
    }
}

/// Returns `true` when every term matches at least one field of `advocate`.
pub fn matches(advocate: &Advocate, terms: &SearchTerms) -> bool {
    if terms.is_empty() {
        return true;
    }
    let fields = SearchFields::of(advocate);
    terms.terms.iter().all(|term| fields.matches(term))
}

/// Filters `records` by `search` and returns the requested page.
///
/// A `page_size` of zero is treated as one.
pub fn query(
    records: &[Advocate],
    search: &str,
    page: i64,
    page_size: usize,
) -> SearchPage<Advocate> {
    let terms = SearchTerms::parse(search);
    let matched: Vec<&Advocate> = records.iter().filter(|a| matches(a, &terms)).collect();
    paginate(&matched, page, page_size)
}

fn paginate(matched: &[&Advocate], page: i64, page_size: usize) -> SearchPage<Advocate> {
    let page_size = page_size.max(1);
    let total_count = matched.len();
    let total_pages = total_count.div_ceil(page_size);

    let items = page_offset(page, page_size)
        .filter(|offset| *offset < total_count)
        .map(|offset| {
            let end = offset.saturating_add(page_size).min(total_count);
            matched[offset..end].iter().map(|a| (*a).clone()).collect()
        })
        .unwrap_or_default();

    SearchPage {
        items,
        total_count,
        total_pages,
        current_page: page,
        page_size,
        has_next: page < total_pages as i64,
        has_prev: page > 1,
    }
}

fn page_offset(page: i64, page_size: usize) -> Option<usize> {
    let index = usize::try_from(page.checked_sub(1)?).ok()?;
    index.checked_mul(page_size)
}
