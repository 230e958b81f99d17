use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::advocate::{Advocate, NewAdvocate};
use crate::models::advocate::{Advocate as DbAdvocate, NewAdvocate as DbNewAdvocate};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AdvocateReader, AdvocateWriter, DieselRepository};
use crate::schema::advocates;
use crate::search::{AdvocateQuery, SearchPage};

fn insert_advocates(
    conn: &mut SqliteConnection,
    new_advocates: &[NewAdvocate],
) -> RepositoryResult<usize> {
    let insertables = new_advocates
        .iter()
        .map(DbNewAdvocate::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(diesel::insert_into(advocates::table)
        .values(&insertables)
        .execute(conn)?)
}

impl AdvocateReader for DieselRepository {
    fn list_advocates(&self, query: &AdvocateQuery) -> RepositoryResult<SearchPage<Advocate>> {
        let mut conn = self.conn()?;

        let records = advocates::table
            .order(advocates::id.asc())
            .load::<DbAdvocate>(&mut conn)?
            .into_iter()
            .map(Advocate::try_from)
            .collect::<Result<Vec<Advocate>, _>>()?;

        Ok(query.run(&records))
    }
}

impl AdvocateWriter for DieselRepository {
    fn create_advocates(&self, new_advocates: &[NewAdvocate]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        insert_advocates(&mut conn, new_advocates)
    }

    fn replace_advocates(&self, new_advocates: &[NewAdvocate]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let removed = diesel::delete(advocates::table).execute(conn)?;
            log::info!("Removed {removed} advocates before reseeding");
            insert_advocates(conn, new_advocates)
        })
    }
}
