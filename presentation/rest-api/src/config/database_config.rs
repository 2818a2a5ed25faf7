use std::env;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use business::domain::product::gateway::ProductGateway;
use persistence::db::{DatabaseConfig, create_postgres_pool, run_migrations};
use persistence::product::gateway::ProductGatewayPostgres;
use persistence::product::in_memory::ProductGatewayInMemory;

use super::app_config::{ConfigError, parse_or_default};

const DEFAULT_MIGRATIONS_PATH: &str = "infrastructure/persistence/migrations";

#[derive(Debug, Clone, PartialEq)]
pub enum StorageConfig {
    Postgres {
        database: DatabaseConfig,
        migrations_path: String,
    },
    Memory,
}

impl StorageConfig {
    /// Load storage configuration from environment variables
    ///
    /// Environment variables:
    /// - STORAGE_BACKEND: "postgres" or "memory" (default: "postgres")
    /// - DATABASE_URL: PostgreSQL connection string (required for postgres)
    /// - DATABASE_MAX_CONNECTIONS: pool size (default: 5)
    /// - DATABASE_ACQUIRE_TIMEOUT_SECS: pool acquire timeout (default: 30)
    /// - DATABASE_MIGRATIONS_PATH: migrations directory (default: "infrastructure/persistence/migrations")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = var("STORAGE_BACKEND").unwrap_or_else(|| "postgres".to_string());

        match backend.trim().to_lowercase().as_str() {
            "memory" => Ok(StorageConfig::Memory),
            "postgres" => {
                let url = var("DATABASE_URL").ok_or(ConfigError::MissingVariable("DATABASE_URL"))?;
                let max_connections = parse_or_default(
                    "DATABASE_MAX_CONNECTIONS",
                    var("DATABASE_MAX_CONNECTIONS"),
                    DatabaseConfig::DEFAULT_MAX_CONNECTIONS,
                );
                let acquire_timeout = parse_or_default(
                    "DATABASE_ACQUIRE_TIMEOUT_SECS",
                    var("DATABASE_ACQUIRE_TIMEOUT_SECS"),
                    DatabaseConfig::DEFAULT_ACQUIRE_TIMEOUT.as_secs(),
                );

                Ok(StorageConfig::Postgres {
                    database: DatabaseConfig::new(url)
                        .with_max_connections(max_connections)
                        .with_acquire_timeout(Duration::from_secs(acquire_timeout)),
                    migrations_path: var("DATABASE_MIGRATIONS_PATH")
                        .unwrap_or_else(|| DEFAULT_MIGRATIONS_PATH.to_string()),
                })
            }
            _ => Err(ConfigError::UnknownStorageBackend(backend)),
        }
    }
}

/// Initialize the product gateway for the configured backend
///
/// # Errors
/// Returns error if the database connection or migrations fail
pub async fn init_gateway(storage: &StorageConfig) -> anyhow::Result<Arc<dyn ProductGateway>> {
    match storage {
        StorageConfig::Memory => {
            tracing::info!("using in-memory product storage");
            Ok(Arc::new(ProductGatewayInMemory::new()))
        }
        StorageConfig::Postgres {
            database,
            migrations_path,
        } => {
            let pool = create_postgres_pool(database).await?;
            if migrations_dir_exists(migrations_path) {
                run_migrations(&pool, migrations_path).await?;
            } else {
                tracing::warn!(path = %migrations_path, "migrations directory not found, skipping");
            }
            Ok(Arc::new(ProductGatewayPostgres::new(pool)))
        }
    }
}

fn migrations_dir_exists(path: &str) -> bool {
    Path::new(path).is_dir()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn should_select_memory_backend() {
        let config = StorageConfig::from_vars(vars(&[("STORAGE_BACKEND", "memory")]));

        assert_eq!(config, Ok(StorageConfig::Memory));
    }

    #[test]
    fn should_default_to_postgres_with_pool_defaults() {
        let config = StorageConfig::from_vars(vars(&[("DATABASE_URL", "postgres://db/catalog")]))
            .unwrap();

        let StorageConfig::Postgres {
            database,
            migrations_path,
        } = config
        else {
            panic!("expected postgres backend");
        };
        assert_eq!(database.connection_string, "postgres://db/catalog");
        assert_eq!(database.max_connections, 5);
        assert_eq!(database.acquire_timeout, Duration::from_secs(30));
        assert_eq!(migrations_path, DEFAULT_MIGRATIONS_PATH);
    }

    #[test]
    fn should_fall_back_to_default_pool_size_when_malformed() {
        let config = StorageConfig::from_vars(vars(&[
            ("DATABASE_URL", "postgres://db/catalog"),
            ("DATABASE_MAX_CONNECTIONS", "lots"),
            ("DATABASE_ACQUIRE_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();

        let StorageConfig::Postgres { database, .. } = config else {
            panic!("expected postgres backend");
        };
        assert_eq!(database.max_connections, 5);
        assert_eq!(database.acquire_timeout, Duration::from_secs(3));
    }

    #[test]
    fn should_fail_when_database_url_is_missing() {
        let config = StorageConfig::from_vars(vars(&[("STORAGE_BACKEND", "postgres")]));

        assert_eq!(config, Err(ConfigError::MissingVariable("DATABASE_URL")));
    }

    #[test]
    fn should_fail_when_backend_is_unknown() {
        let config = StorageConfig::from_vars(vars(&[("STORAGE_BACKEND", "redis")]));

        assert_eq!(
            config,
            Err(ConfigError::UnknownStorageBackend("redis".to_string()))
        );
    }

    #[test]
    fn should_skip_migrations_only_when_directory_is_missing() {
        assert!(migrations_dir_exists(env!("CARGO_MANIFEST_DIR")));
        assert!(!migrations_dir_exists("/nonexistent/catalog/migrations"));
    }
}
