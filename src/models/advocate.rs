use diesel::prelude::*;

use crate::domain::advocate::{Advocate as DomainAdvocate, NewAdvocate as DomainNewAdvocate};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::advocates)]
/// Diesel model for [`crate::domain::advocate::Advocate`].
///
/// Specialties are stored as a JSON array of strings.
pub struct Advocate {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub degree: String,
    pub specialties: String,
    pub years_of_experience: i32,
    pub phone_number: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::advocates)]
/// Insertable form of [`Advocate`].
pub struct NewAdvocate<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub city: &'a str,
    pub degree: &'a str,
    pub specialties: String,
    pub years_of_experience: i32,
    pub phone_number: i64,
}

/// Decodes the JSON array stored in the `specialties` column.
fn decode_specialties(raw: &str) -> Result<Vec<String>, TypeConstraintError> {
    serde_json::from_str(raw)
        .map_err(|e| TypeConstraintError::InvalidValue(format!("specialties: {e}")))
}

impl TryFrom<Advocate> for DomainAdvocate {
    type Error = TypeConstraintError;

    fn try_from(advocate: Advocate) -> Result<Self, Self::Error> {
        let specialties = decode_specialties(&advocate.specialties)?;
        DomainAdvocate::try_new(
            advocate.id,
            advocate.first_name,
            advocate.last_name,
            advocate.city,
            advocate.degree,
            specialties,
            advocate.years_of_experience,
            advocate.phone_number,
        )
    }
}

impl<'a> TryFrom<&'a DomainNewAdvocate> for NewAdvocate<'a> {
    type Error = TypeConstraintError;

    fn try_from(advocate: &'a DomainNewAdvocate) -> Result<Self, Self::Error> {
        let specialties: Vec<&str> = advocate.specialties.iter().map(|s| s.as_str()).collect();
        let specialties = serde_json::to_string(&specialties)
            .map_err(|e| TypeConstraintError::InvalidValue(format!("specialties: {e}")))?;
        let years_of_experience = i32::try_from(advocate.years_of_experience.get())
            .map_err(|_| TypeConstraintError::InvalidValue("years of experience".to_string()))?;
        let phone_number = i64::try_from(advocate.phone_number.get())
            .map_err(|_| TypeConstraintError::InvalidPhone)?;

        Ok(Self {
            first_name: advocate.first_name.as_str(),
            last_name: advocate.last_name.as_str(),
            city: advocate.city.as_str(),
            degree: advocate.degree.as_str(),
            specialties,
            years_of_experience,
            phone_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(specialties: &str) -> Advocate {
        Advocate {
            id: 3,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            city: "Boston".to_string(),
            degree: "PhD".to_string(),
            specialties: specialties.to_string(),
            years_of_experience: 8,
            phone_number: 5559876543,
        }
    }

    #[test]
    fn row_into_domain() {
        let domain = DomainAdvocate::try_from(row(r#"["Grief","ADHD"]"#)).unwrap();
        assert_eq!(domain.id.get(), 3);
        assert_eq!(domain.first_name.as_str(), "Ada");
        assert_eq!(domain.specialties.len(), 2);
        assert_eq!(domain.specialties[1].as_str(), "ADHD");
        assert_eq!(domain.phone_number.get(), 5559876543);
    }

    #[test]
    fn malformed_specialties_are_rejected() {
        let result = DomainAdvocate::try_from(row("Grief, ADHD"));
        assert!(matches!(result, Err(TypeConstraintError::InvalidValue(_))));
    }

    #[test]
    fn domain_new_into_insertable() {
        let domain = DomainNewAdvocate::try_new(
            "Ada",
            "Lovelace",
            "Boston",
            "PhD",
            vec!["Grief".to_string(), "Eating disorders".to_string()],
            8,
            5559876543,
        )
        .unwrap();
        let insertable = NewAdvocate::try_from(&domain).unwrap();
        assert_eq!(insertable.first_name, "Ada");
        assert_eq!(insertable.specialties, r#"["Grief","Eating disorders"]"#);
        assert_eq!(insertable.years_of_experience, 8);
        assert_eq!(insertable.phone_number, 5559876543);
    }
}
