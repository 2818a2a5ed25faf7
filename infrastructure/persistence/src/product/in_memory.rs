use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use business::domain::context::RequestContext;
use business::domain::errors::RepositoryError;
use business::domain::product::gateway::{ProductFilter, ProductGateway};
use business::domain::product::model::Product;

struct State {
    next_id: u64,
    products: BTreeMap<u64, Product>,
}

/// Process-local product store. Iteration order of the map gives id-ascending listings.
pub struct ProductGatewayInMemory {
    state: RwLock<State>,
}

impl ProductGatewayInMemory {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                next_id: 1,
                products: BTreeMap::new(),
            }),
        }
    }
}

impl Default for ProductGatewayInMemory {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::database_error("product store lock poisoned")
}

fn matches(product: &Product, filter: &ProductFilter) -> bool {
    let name_matches = filter.name.as_ref().is_none_or(|name| {
        product
            .name
            .to_lowercase()
            .contains(&name.to_lowercase())
    });
    let category_matches = filter
        .category_id
        .is_none_or(|category_id| product.category_id == category_id);
    name_matches && category_matches
}

#[async_trait]
impl ProductGateway for ProductGatewayInMemory {
    async fn create(&self, ctx: &RequestContext, product: &Product) -> Result<u64, RepositoryError> {
        ctx.check()?;
        let mut state = self.state.write().map_err(poisoned)?;

        let id = state.next_id;
        state.next_id += 1;

        let mut stored = product.clone();
        stored.id = id;
        state.products.insert(id, stored);

        tracing::debug!(id, "product stored in memory");
        Ok(id)
    }

    async fn find_by_id(
        &self,
        ctx: &RequestContext,
        id: u64,
    ) -> Result<Option<Product>, RepositoryError> {
        ctx.check()?;
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.products.get(&id).cloned())
    }

    async fn find_all(
        &self,
        ctx: &RequestContext,
        filter: &ProductFilter,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<Product>, u64), RepositoryError> {
        ctx.check()?;
        let state = self.state.read().map_err(poisoned)?;

        let matching: Vec<&Product> = state
            .products
            .values()
            .filter(|product| matches(product, filter))
            .collect();

        let offset = page.saturating_sub(1) as usize * limit as usize;
        let products = matching
            .iter()
            .skip(offset)
            .take(limit as usize)
            .map(|product| (*product).clone())
            .collect();

        Ok((products, matching.len() as u64))
    }

    async fn update(&self, ctx: &RequestContext, product: &Product) -> Result<(), RepositoryError> {
        ctx.check()?;
        let mut state = self.state.write().map_err(poisoned)?;
        if let Some(stored) = state.products.get_mut(&product.id) {
            *stored = product.clone();
        }
        Ok(())
    }

    async fn delete(&self, ctx: &RequestContext, id: u64) -> Result<(), RepositoryError> {
        ctx.check()?;
        let mut state = self.state.write().map_err(poisoned)?;
        state.products.remove(&id);
        Ok(())
    }
}
