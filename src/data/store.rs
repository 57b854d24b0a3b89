use crate::{
    data::{
        DataType,
        class::Class,
        student::{NewStudent, Student},
    },
    error::{GetDatabaseConnectionSnafu, RegistrarResult},
};
use async_trait::async_trait;
use snafu::ResultExt;
use sqlx::{Pool, Postgres};
use std::fmt::Debug;

/// Everything the student pages need from storage.
#[async_trait]
pub trait StudentStore: Debug + Send + Sync {
    async fn get_classes(&self) -> RegistrarResult<Vec<Class>>;
    async fn get_class(&self, id: i32) -> RegistrarResult<Option<Class>>;
    async fn get_students(&self) -> RegistrarResult<Vec<Student>>;
    async fn get_student(&self, id: i32) -> RegistrarResult<Option<Student>>;
    /// Stores the student, returning it with the id storage assigned.
    async fn create_student(&self, student: NewStudent) -> RegistrarResult<Student>;

    async fn close(&self) {}
}

#[derive(Clone, Debug)]
pub struct PgStudentStore {
    pool: Pool<Postgres>,
}

impl PgStudentStore {
    pub const fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    async fn get_classes(&self) -> RegistrarResult<Vec<Class>> {
        Class::get_all(&self.pool).await
    }

    async fn get_class(&self, id: i32) -> RegistrarResult<Option<Class>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .context(GetDatabaseConnectionSnafu)?;
        Class::get_from_db_by_id(id, &mut *conn).await
    }

    async fn get_students(&self) -> RegistrarResult<Vec<Student>> {
        Student::get_all(&self.pool).await
    }

    async fn get_student(&self, id: i32) -> RegistrarResult<Option<Student>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .context(GetDatabaseConnectionSnafu)?;
        Student::get_from_db_by_id(id, &mut *conn).await
    }

    async fn create_student(&self, student: NewStudent) -> RegistrarResult<Student> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .context(GetDatabaseConnectionSnafu)?;
        Student::insert_into_database(student, &mut *conn).await
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
