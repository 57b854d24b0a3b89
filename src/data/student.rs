use crate::{
    data::DataType,
    error::{MakeQuerySnafu, RegistrarResult},
    validation::{FieldErrors, Validate, ValidationError, is_valid_phone},
};
use email_address::EmailAddress;
use serde::Deserialize;
use snafu::ResultExt;
use sqlx::{FromRow, PgConnection, Pool, Postgres};

pub const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub class_id: i32,
}

/// A student that hasn't been stored yet.
///
/// Decoded from the PascalCase keys the create form posts. `class_id` is never decoded: it gets
/// assigned from the `ClassID` form value once the rest of the record has been validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip)]
    pub class_id: i32,
}

impl NewStudent {
    /// Strips surrounding whitespace from every text field before storage.
    #[must_use]
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            class_id: self.class_id,
        }
    }
}

impl Validate for NewStudent {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert("name".into(), ValidationError::Required);
        } else if name.chars().count() > MAX_NAME_LEN {
            errors.insert("name".into(), ValidationError::TooLong { max: MAX_NAME_LEN });
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.insert("email".into(), ValidationError::Required);
        } else if !EmailAddress::is_valid(email) {
            errors.insert("email".into(), ValidationError::InvalidEmail);
        }

        if !self.phone.trim().is_empty() && !is_valid_phone(&self.phone) {
            errors.insert("phone".into(), ValidationError::InvalidPhone);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl DataType for Student {
    type Id = i32;

    async fn get_from_db_by_id(id: Self::Id, conn: &mut PgConnection) -> RegistrarResult<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, name, email, phone, class_id FROM public.students WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(conn)
        .await
        .context(MakeQuerySnafu)
    }

    async fn get_all(pool: &Pool<Postgres>) -> RegistrarResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, name, email, phone, class_id FROM public.students ORDER BY id DESC",
        )
        .fetch_all(pool)
        .await
        .context(MakeQuerySnafu)
    }
}

impl Student {
    pub async fn insert_into_database(
        to_be_added: NewStudent,
        conn: &mut PgConnection,
    ) -> RegistrarResult<Self> {
        let NewStudent {
            name,
            email,
            phone,
            class_id,
        } = to_be_added;

        sqlx::query_as::<_, Self>(
            "INSERT INTO public.students (name, email, phone, class_id) VALUES ($1, $2, $3, $4) RETURNING id, name, email, phone, class_id",
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(class_id)
        .fetch_one(conn)
        .await
        .context(MakeQuerySnafu)
    }
}
