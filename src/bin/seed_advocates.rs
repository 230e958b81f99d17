//! Replaces the stored advocates with the bundled list or a CSV file.
//!
//! Usage: `seed_advocates [CSV_PATH]`

use std::env;
use std::io::Read;

use dotenvy::dotenv;
use serde::Deserialize;

use advocate_directory::db::establish_connection_pool;
use advocate_directory::domain::advocate::NewAdvocate;
use advocate_directory::domain::types::{PhoneNumber, TypeConstraintError};
use advocate_directory::models::config::load_server_config;
use advocate_directory::repository::errors::{RepositoryError, RepositoryResult};
use advocate_directory::repository::static_data::bundled_seed;
use advocate_directory::repository::{AdvocateWriter, DieselRepository};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvAdvocate {
    first_name: String,
    last_name: String,
    city: String,
    degree: String,
    /// Specialties separated by `;`.
    #[serde(default)]
    specialties: String,
    years_of_experience: i32,
    phone_number: String,
}

impl TryFrom<CsvAdvocate> for NewAdvocate {
    type Error = RepositoryError;

    fn try_from(row: CsvAdvocate) -> Result<Self, Self::Error> {
        let specialties = row
            .specialties
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        let phone_number = PhoneNumber::parse(&row.phone_number)?.get();
        let phone_number =
            i64::try_from(phone_number).map_err(|_| TypeConstraintError::InvalidPhone)?;

        Ok(NewAdvocate::try_new(
            row.first_name,
            row.last_name,
            row.city,
            row.degree,
            specialties,
            row.years_of_experience,
            phone_number,
        )?)
    }
}

fn parse_csv<R: Read>(reader: R) -> RepositoryResult<Vec<NewAdvocate>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut advocates = Vec::new();
    for record in rdr.deserialize::<CsvAdvocate>() {
        advocates.push(NewAdvocate::try_from(record?)?);
    }
    Ok(advocates)
}

fn load_advocates(path: Option<&str>) -> RepositoryResult<Vec<NewAdvocate>> {
    match path {
        Some(path) => {
            let file = std::fs::File::open(path).map_err(|e| {
                RepositoryError::Unexpected(format!("cannot open '{path}': {e}"))
            })?;
            parse_csv(file)
        }
        None => bundled_seed(),
    }
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match load_server_config() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let Some(database_url) = server_config.database_url() else {
        log::error!("APP_DATABASE_URL is not set, nothing to seed");
        std::process::exit(1);
    };

    let pool = match establish_connection_pool(database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let path = env::args().nth(1);
    let advocates = match load_advocates(path.as_deref()) {
        Ok(advocates) => advocates,
        Err(e) => {
            log::error!("Failed to read advocates: {e}");
            std::process::exit(1);
        }
    };

    let repo = DieselRepository::new(pool);
    match repo.replace_advocates(&advocates) {
        Ok(count) => log::info!("Seeded {count} advocates"),
        Err(e) => {
            log::error!("Failed to seed advocates: {e}");
            std::process::exit(1);
        }
    }
}
