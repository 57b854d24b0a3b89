use crate::{
    data::DataType,
    error::{MakeQuerySnafu, RegistrarResult},
};
use snafu::ResultExt;
use sqlx::{FromRow, PgConnection, Pool, Postgres};

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Class {
    pub id: i32,
    pub name: String,
}

impl DataType for Class {
    type Id = i32;

    async fn get_from_db_by_id(id: Self::Id, conn: &mut PgConnection) -> RegistrarResult<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT id, name FROM public.classes WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
            .context(MakeQuerySnafu)
    }

    async fn get_all(pool: &Pool<Postgres>) -> RegistrarResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT id, name FROM public.classes ORDER BY name")
            .fetch_all(pool)
            .await
            .context(MakeQuerySnafu)
    }
}
