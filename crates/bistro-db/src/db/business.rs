use async_trait::async_trait;
use bistro_core::{
    models::{BusinessRecord, NewBusiness},
    AppError,
};
use sqlx::{PgPool, Postgres};

/// Document store for business records
#[async_trait]
pub trait BusinessStore: Send + Sync {
    /// Persist a new record; the store assigns `id` and `created_at`.
    async fn save(&self, business: NewBusiness) -> Result<BusinessRecord, AppError>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Repository for business records
#[derive(Clone)]
pub struct BusinessRepository {
    pool: PgPool,
}

impl BusinessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BusinessStore for BusinessRepository {
    #[tracing::instrument(
        skip(self, business),
        fields(db.table = "businesses", db.operation = "insert", has_image = business.image.is_some())
    )]
    async fn save(&self, business: NewBusiness) -> Result<BusinessRecord, AppError> {
        let record = sqlx::query_as::<Postgres, BusinessRecord>(
            r#"
            INSERT INTO businesses (name, description, email, phone, address, image)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, description, email, phone, address, image, created_at
            "#,
        )
        .bind(&business.name)
        .bind(&business.description)
        .bind(&business.email)
        .bind(&business.phone)
        .bind(&business.address)
        .bind(&business.image)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(business_id = %record.id, "Business record inserted");

        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.operation = "ping"))]
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<Postgres, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
