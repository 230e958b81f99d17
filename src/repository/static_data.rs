//! In-memory advocate source used when no database is configured.

use serde::Deserialize;

use crate::domain::advocate::{Advocate, NewAdvocate};
use crate::domain::types::AdvocateId;
use crate::repository::AdvocateReader;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::search::{AdvocateQuery, SearchPage};

/// Seed list compiled into the binary.
const BUNDLED_ADVOCATES: &str = include_str!("../../data/advocates.json");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedRecord {
    first_name: String,
    last_name: String,
    city: String,
    degree: String,
    #[serde(default)]
    specialties: Vec<String>,
    years_of_experience: i32,
    phone_number: i64,
}

impl TryFrom<SeedRecord> for NewAdvocate {
    type Error = RepositoryError;

    fn try_from(record: SeedRecord) -> Result<Self, Self::Error> {
        Ok(NewAdvocate::try_new(
            record.first_name,
            record.last_name,
            record.city,
            record.degree,
            record.specialties,
            record.years_of_experience,
            record.phone_number,
        )?)
    }
}

/// Parses the bundled seed list.
pub fn bundled_seed() -> RepositoryResult<Vec<NewAdvocate>> {
    serde_json::from_str::<Vec<SeedRecord>>(BUNDLED_ADVOCATES)?
        .into_iter()
        .map(NewAdvocate::try_from)
        .collect()
}

/// Read-only repository over a fixed list of advocates.
#[derive(Debug, Clone, Default)]
pub struct StaticRepository {
    advocates: Vec<Advocate>,
}

impl StaticRepository {
    pub fn new(advocates: Vec<Advocate>) -> Self {
        Self { advocates }
    }

    /// Builds a repository over the bundled list, numbering records from 1.
    pub fn bundled() -> RepositoryResult<Self> {
        let advocates = bundled_seed()?
            .into_iter()
            .zip(1..)
            .map(|(new, id)| Ok(new.with_id(AdvocateId::new(id)?)))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok(Self::new(advocates))
    }

    pub fn advocates(&self) -> &[Advocate] {
        &self.advocates
    }
}

impl AdvocateReader for StaticRepository {
    fn list_advocates(&self, query: &AdvocateQuery) -> RepositoryResult<SearchPage<Advocate>> {
        Ok(query.run(&self.advocates))
    }
}
