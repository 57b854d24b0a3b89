use crate::{
    config::RuntimeConfiguration,
    data::store::{PgStudentStore, StudentStore},
    error::{MigrateSnafu, OpenDatabaseSnafu, RegistrarResult},
    templates::Templates,
};
use snafu::ResultExt;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

/// Per-request dependencies, cloned into every handler.
#[derive(Clone, Debug)]
pub struct RegistrarState {
    store: Arc<dyn StudentStore>,
    templates: Templates,
    secure_cookies: bool,
}

impl RegistrarState {
    pub async fn new(options: PgPoolOptions, config: &RuntimeConfiguration) -> RegistrarResult<Self> {
        let pool = options
            .connect(&config.database().connection_url())
            .await
            .context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;

        Ok(Self::from_parts(
            Arc::new(PgStudentStore::new(pool)),
            Templates::default(),
            config.secure_cookies(),
        ))
    }

    pub fn from_parts(
        store: Arc<dyn StudentStore>,
        templates: Templates,
        secure_cookies: bool,
    ) -> Self {
        Self {
            store,
            templates,
            secure_cookies,
        }
    }

    pub fn store(&self) -> &dyn StudentStore {
        self.store.as_ref()
    }

    pub const fn templates(&self) -> &Templates {
        &self.templates
    }

    pub const fn secure_cookies(&self) -> bool {
        self.secure_cookies
    }

    pub async fn sensible_shutdown(&self) {
        self.store.close().await;
    }
}
