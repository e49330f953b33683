use {
    anyhow::anyhow,
    sqlx::{
        postgres::PgPoolOptions,
        Pool,
        Postgres,
    },
};

pub type DB = Pool<Postgres>;

/// Opens the connection pool and brings the schema up to date.
pub async fn connect_and_migrate(database_url: &str, max_connections: u32) -> anyhow::Result<DB> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|err| anyhow!("Failed to connect to the database: {:?}", err))?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|err| anyhow!("Failed to run database migrations: {:?}", err))?;
    tracing::info!("Database migrations applied");
    Ok(pool)
}
