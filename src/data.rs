use crate::error::RegistrarResult;
use sqlx::{PgConnection, Pool, Postgres};

pub mod class;
pub mod store;
pub mod student;

#[allow(async_fn_in_trait)]
pub trait DataType: Sized {
    type Id;

    async fn get_from_db_by_id(id: Self::Id, conn: &mut PgConnection) -> RegistrarResult<Option<Self>>;
    async fn get_all(pool: &Pool<Postgres>) -> RegistrarResult<Vec<Self>>;
}
