use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::advocate::{Advocate, NewAdvocate};
use crate::repository::errors::RepositoryResult;
use crate::search::{AdvocateQuery, SearchPage};

pub mod advocate;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod static_data;

pub use static_data::StaticRepository;

/// Read access to a collection of advocates.
///
/// Implementations differ only in where records come from; filtering and
/// pagination always go through [`crate::search::query`].
pub trait AdvocateReader {
    fn list_advocates(&self, query: &AdvocateQuery) -> RepositoryResult<SearchPage<Advocate>>;
}

pub trait AdvocateWriter {
    fn create_advocates(&self, new_advocates: &[NewAdvocate]) -> RepositoryResult<usize>;
    /// Atomically removes every stored advocate and inserts `new_advocates`.
    fn replace_advocates(&self, new_advocates: &[NewAdvocate]) -> RepositoryResult<usize>;
}

/// Data provider shared between HTTP workers.
pub type SharedAdvocateReader = dyn AdvocateReader + Send + Sync;

/// Diesel-backed repository over the SQLite advocates table.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}
