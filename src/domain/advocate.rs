use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AdvocateId, CityName, DegreeName, PersonName, PhoneNumber, Specialty, TypeConstraintError,
    YearsOfExperience,
};

/// Directory entry describing an advocate and their professional attributes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Advocate {
    pub id: AdvocateId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub city: CityName,
    pub degree: DegreeName,
    pub specialties: Vec<Specialty>,
    pub years_of_experience: YearsOfExperience,
    pub phone_number: PhoneNumber,
}

impl Advocate {
    /// Builds an advocate from raw values, validating every field.
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        id: i32,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        city: impl Into<String>,
        degree: impl Into<String>,
        specialties: Vec<String>,
        years_of_experience: i32,
        phone_number: i64,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            id: AdvocateId::new(id)?,
            first_name: PersonName::new(first_name)?,
            last_name: PersonName::new(last_name)?,
            city: CityName::new(city)?,
            degree: DegreeName::new(degree)?,
            specialties: parse_specialties(specialties)?,
            years_of_experience: YearsOfExperience::try_from(years_of_experience)?,
            phone_number: PhoneNumber::try_from(phone_number)?,
        })
    }

    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Advocate awaiting insertion into the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAdvocate {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub city: CityName,
    pub degree: DegreeName,
    pub specialties: Vec<Specialty>,
    pub years_of_experience: YearsOfExperience,
    pub phone_number: PhoneNumber,
}

impl NewAdvocate {
    pub fn try_new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        city: impl Into<String>,
        degree: impl Into<String>,
        specialties: Vec<String>,
        years_of_experience: i32,
        phone_number: i64,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            first_name: PersonName::new(first_name)?,
            last_name: PersonName::new(last_name)?,
            city: CityName::new(city)?,
            degree: DegreeName::new(degree)?,
            specialties: parse_specialties(specialties)?,
            years_of_experience: YearsOfExperience::try_from(years_of_experience)?,
            phone_number: PhoneNumber::try_from(phone_number)?,
        })
    }

    /// Attaches the identifier assigned by the store.
    pub fn with_id(self, id: AdvocateId) -> Advocate {
        Advocate {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            city: self.city,
            degree: self.degree,
            specialties: self.specialties,
            years_of_experience: self.years_of_experience,
            phone_number: self.phone_number,
        }
    }
}

impl From<Advocate> for NewAdvocate {
    fn from(advocate: Advocate) -> Self {
        Self {
            first_name: advocate.first_name,
            last_name: advocate.last_name,
            city: advocate.city,
            degree: advocate.degree,
            specialties: advocate.specialties,
            years_of_experience: advocate.years_of_experience,
            phone_number: advocate.phone_number,
        }
    }
}

fn parse_specialties(values: Vec<String>) -> Result<Vec<Specialty>, TypeConstraintError> {
    values.into_iter().map(Specialty::new).collect()
}
