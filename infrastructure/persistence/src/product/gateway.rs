use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use business::domain::context::RequestContext;
use business::domain::errors::RepositoryError;
use business::domain::product::gateway::{ProductFilter, ProductGateway};
use business::domain::product::model::Product;

use super::entity::{ProductEntity, from_db_id, to_db_id};

const SELECT_COLUMNS: &str =
    "SELECT id, name, description, price, category_id, created_at, updated_at FROM products";

pub struct ProductGatewayPostgres {
    pool: PgPool,
}

impl ProductGatewayPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(err: sqlx::Error) -> RepositoryError {
    tracing::error!(error = %err, "product query failed");
    RepositoryError::database_error(err.to_string())
}

/// Escapes LIKE wildcards so the name filter is a plain substring match.
fn like_pattern(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len() + 2);
    escaped.push('%');
    for c in name.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Filter values in their stored representation.
struct BoundFilter<'a> {
    name: Option<&'a str>,
    category_id: Option<i64>,
}

/// `None` when the filter can never match a stored row.
fn bind_filter(filter: &ProductFilter) -> Option<BoundFilter<'_>> {
    let category_id = match filter.category_id {
        Some(category_id) => Some(to_db_id(category_id).ok()?),
        None => None,
    };
    Some(BoundFilter {
        name: filter.name.as_deref(),
        category_id,
    })
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &BoundFilter<'_>) {
    builder.push(" WHERE TRUE");
    if let Some(name) = filter.name {
        builder.push(" AND name ILIKE ").push_bind(like_pattern(name));
    }
    if let Some(category_id) = filter.category_id {
        builder.push(" AND category_id = ").push_bind(category_id);
    }
}

#[async_trait]
impl ProductGateway for ProductGatewayPostgres {
    async fn create(&self, ctx: &RequestContext, product: &Product) -> Result<u64, RepositoryError> {
        let query = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO products (name, description, price, category_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id"#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.price)
        .bind(to_db_id(product.category_id)?)
        .bind(product.created_at)
        .bind(product.updated_at);

        let id = ctx
            .run(query.fetch_one(&self.pool))
            .await?
            .map_err(database_error)?;

        from_db_id(id)
    }

    async fn find_by_id(
        &self,
        ctx: &RequestContext,
        id: u64,
    ) -> Result<Option<Product>, RepositoryError> {
        // No row can hold an id beyond BIGINT.
        let Ok(id) = to_db_id(id) else {
            return Ok(None);
        };

        let sql = format!("{SELECT_COLUMNS} WHERE id = $1");
        let query = sqlx::query_as::<_, ProductEntity>(&sql).bind(id);

        ctx.run(query.fetch_optional(&self.pool))
            .await?
            .map_err(database_error)?
            .map(ProductEntity::into_domain)
            .transpose()
    }

    async fn find_all(
        &self,
        ctx: &RequestContext,
        filter: &ProductFilter,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<Product>, u64), RepositoryError> {
        let Some(filter) = bind_filter(filter) else {
            return Ok((Vec::new(), 0));
        };

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        push_filters(&mut count, &filter);
        let total = ctx
            .run(count.build_query_scalar::<i64>().fetch_one(&self.pool))
            .await?
            .map_err(database_error)?;

        let offset = i64::from(page.saturating_sub(1)) * i64::from(limit);
        let mut select = QueryBuilder::<Postgres>::new(SELECT_COLUMNS);
        push_filters(&mut select, &filter);
        select
            .push(" ORDER BY id ASC LIMIT ")
            .push_bind(i64::from(limit))
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = ctx
            .run(
                select
                    .build_query_as::<ProductEntity>()
                    .fetch_all(&self.pool),
            )
            .await?
            .map_err(database_error)?;

        let products = rows
            .into_iter()
            .map(ProductEntity::into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((products, from_db_id(total)?))
    }

    async fn update(&self, ctx: &RequestContext, product: &Product) -> Result<(), RepositoryError> {
        let query = sqlx::query(
            r#"UPDATE products
            SET name = $2, description = $3, price = $4, category_id = $5, updated_at = $6
            WHERE id = $1"#,
        )
        .bind(to_db_id(product.id)?)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.price)
        .bind(to_db_id(product.category_id)?)
        .bind(product.updated_at);

        ctx.run(query.execute(&self.pool))
            .await?
            .map_err(database_error)?;

        Ok(())
    }

    async fn delete(&self, ctx: &RequestContext, id: u64) -> Result<(), RepositoryError> {
        let query = sqlx::query("DELETE FROM products WHERE id = $1").bind(to_db_id(id)?);

        ctx.run(query.execute(&self.pool))
            .await?
            .map_err(database_error)?;

        Ok(())
    }
}
