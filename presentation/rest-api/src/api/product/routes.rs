use std::sync::Arc;
use std::time::Duration;

use poem_openapi::{
    ApiResponse, OpenApi,
    param::{Path, Query},
    payload::Json,
};

use business::domain::context::RequestContext;
use business::domain::errors::AppError;
use business::domain::product::use_cases::create::{CreateProductParams, CreateProductUseCase};
use business::domain::product::use_cases::delete::{DeleteProductParams, DeleteProductUseCase};
use business::domain::product::use_cases::get_by_id::{
    GetProductByIdParams, GetProductByIdUseCase,
};
use business::domain::product::use_cases::list::{ListProductsParams, ListProductsUseCase};
use business::domain::product::use_cases::update::{UpdateProductParams, UpdateProductUseCase};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::product::dto::{
    CreateProductRequest, PaginatedProductsResponse, ProductResponse, UpdateProductRequest,
    parse_price,
};
use crate::api::tags::ApiTags;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;

pub struct ProductApi {
    create_use_case: Arc<dyn CreateProductUseCase>,
    list_use_case: Arc<dyn ListProductsUseCase>,
    get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
    update_use_case: Arc<dyn UpdateProductUseCase>,
    delete_use_case: Arc<dyn DeleteProductUseCase>,
    request_timeout: Duration,
}

impl ProductApi {
    pub fn new(
        create_use_case: Arc<dyn CreateProductUseCase>,
        list_use_case: Arc<dyn ListProductsUseCase>,
        get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
        update_use_case: Arc<dyn UpdateProductUseCase>,
        delete_use_case: Arc<dyn DeleteProductUseCase>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            create_use_case,
            list_use_case,
            get_by_id_use_case,
            update_use_case,
            delete_use_case,
            request_timeout,
        }
    }

    fn context(&self) -> RequestContext {
        RequestContext::with_timeout(self.request_timeout)
    }
}

fn parse_id(raw: &str) -> Result<u64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::invalid_input("product.invalid_id"))
}

/// Out-of-range values are clamped so the use case reports them.
fn to_page_param(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Product catalog API
///
/// Endpoints for creating, listing, reading, updating, and deleting products.
#[OpenApi]
impl ProductApi {
    /// Create a new product
    #[oai(path = "/products", method = "post", tag = "ApiTags::Products")]
    async fn create_product(&self, body: Json<CreateProductRequest>) -> CreateProductResponse {
        let price = match parse_price(body.0.price) {
            Ok(price) => price,
            Err(err) => return CreateProductResponse::BadRequest(err.into_error_response().1),
        };
        let params = CreateProductParams {
            name: body.0.name,
            description: body.0.description,
            price,
            category_id: body.0.category_id,
        };

        match self.create_use_case.execute(&self.context(), params).await {
            Ok(product) => CreateProductResponse::Created(Json(product.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => CreateProductResponse::BadRequest(json),
                    _ => CreateProductResponse::InternalError(json),
                }
            }
        }
    }

    /// List products
    ///
    /// Filters by a case-insensitive name fragment and/or category, one page at
    /// a time. `page` defaults to 1 and `limit` to 10 (maximum 100).
    #[oai(path = "/products", method = "get", tag = "ApiTags::Products")]
    async fn list_products(
        &self,
        name: Query<Option<String>>,
        category_id: Query<Option<u64>>,
        page: Query<Option<i64>>,
        limit: Query<Option<i64>>,
    ) -> ListProductsResponse {
        let params = ListProductsParams {
            name: name.0.filter(|name| !name.trim().is_empty()),
            category_id: category_id.0.filter(|id| *id != 0),
            page: to_page_param(page.0.unwrap_or(DEFAULT_PAGE)),
            limit: to_page_param(limit.0.unwrap_or(DEFAULT_LIMIT)),
        };

        match self.list_use_case.execute(&self.context(), params).await {
            Ok(output) => ListProductsResponse::Ok(Json(output.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => ListProductsResponse::BadRequest(json),
                    _ => ListProductsResponse::InternalError(json),
                }
            }
        }
    }

    /// Get a product by ID
    #[oai(path = "/products/:id", method = "get", tag = "ApiTags::Products")]
    async fn get_product_by_id(&self, id: Path<String>) -> GetProductByIdResponse {
        let id = match parse_id(&id.0) {
            Ok(id) => id,
            Err(err) => return GetProductByIdResponse::BadRequest(err.into_error_response().1),
        };

        match self
            .get_by_id_use_case
            .execute(&self.context(), GetProductByIdParams { id })
            .await
        {
            Ok(product) => GetProductByIdResponse::Ok(Json(product.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => GetProductByIdResponse::NotFound(json),
                    _ => GetProductByIdResponse::InternalError(json),
                }
            }
        }
    }

    /// Update a product
    ///
    /// Replaces name, description, price, and category of an existing product.
    #[oai(path = "/products/:id", method = "put", tag = "ApiTags::Products")]
    async fn update_product(
        &self,
        id: Path<String>,
        body: Json<UpdateProductRequest>,
    ) -> UpdateProductResponse {
        let parsed = parse_id(&id.0).and_then(|id| Ok((id, parse_price(body.0.price)?)));
        let (id, price) = match parsed {
            Ok(parsed) => parsed,
            Err(err) => return UpdateProductResponse::BadRequest(err.into_error_response().1),
        };

        let params = UpdateProductParams {
            id,
            name: body.0.name,
            description: body.0.description,
            price,
            category_id: body.0.category_id,
        };

        match self.update_use_case.execute(&self.context(), params).await {
            Ok(product) => UpdateProductResponse::Ok(Json(product.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => UpdateProductResponse::BadRequest(json),
                    404 => UpdateProductResponse::NotFound(json),
                    _ => UpdateProductResponse::InternalError(json),
                }
            }
        }
    }

    /// Delete a product
    #[oai(path = "/products/:id", method = "delete", tag = "ApiTags::Products")]
    async fn delete_product(&self, id: Path<String>) -> DeleteProductResponse {
        let id = match parse_id(&id.0) {
            Ok(id) => id,
            Err(err) => return DeleteProductResponse::BadRequest(err.into_error_response().1),
        };

        match self
            .delete_use_case
            .execute(&self.context(), DeleteProductParams { id })
            .await
        {
            Ok(()) => DeleteProductResponse::NoContent,
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => DeleteProductResponse::NotFound(json),
                    _ => DeleteProductResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(ApiResponse)]
pub enum CreateProductResponse {
    #[oai(status = 201)]
    Created(Json<ProductResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(ApiResponse)]
pub enum ListProductsResponse {
    #[oai(status = 200)]
    Ok(Json<PaginatedProductsResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(ApiResponse)]
pub enum GetProductByIdResponse {
    #[oai(status = 200)]
    Ok(Json<ProductResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(ApiResponse)]
pub enum UpdateProductResponse {
    #[oai(status = 200)]
    Ok(Json<ProductResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(ApiResponse)]
pub enum DeleteProductResponse {
    #[oai(status = 204)]
    NoContent,
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::dependency_injection::DependencyContainer;
    use persistence::product::in_memory::ProductGatewayInMemory;

    fn api() -> ProductApi {
        DependencyContainer::new(
            Arc::new(ProductGatewayInMemory::new()),
            Duration::from_secs(5),
        )
        .product_api
    }

    fn create_request(name: &str, price: f64) -> Json<CreateProductRequest> {
        Json(CreateProductRequest {
            name: name.to_string(),
            description: "A widget".to_string(),
            price,
            category_id: 3,
        })
    }

    async fn create(api: &ProductApi, name: &str) -> ProductResponse {
        match api.create_product(create_request(name, 9.99)).await {
            CreateProductResponse::Created(Json(product)) => product,
            _ => panic!("expected 201"),
        }
    }

    #[tokio::test]
    async fn should_create_and_fetch_product() {
        let api = api();

        let created = create(&api, "Widget").await;
        let fetched = api.get_product_by_id(Path(created.id.to_string())).await;

        assert_eq!(created.price, 9.99);
        match fetched {
            GetProductByIdResponse::Ok(Json(product)) => assert_eq!(product.name, "Widget"),
            _ => panic!("expected 200"),
        }
    }

    #[tokio::test]
    async fn should_return_bad_request_when_name_is_empty() {
        let response = api().create_product(create_request("  ", 1.0)).await;

        match response {
            CreateProductResponse::BadRequest(Json(body)) => {
                assert_eq!(body.code, 400);
                assert_eq!(body.error_type, "VALIDATION");
                assert_eq!(body.message, "product.name_empty");
            }
            _ => panic!("expected 400"),
        }
    }

    #[tokio::test]
    async fn should_return_bad_request_when_id_is_malformed() {
        let response = api().get_product_by_id(Path("abc".to_string())).await;

        match response {
            GetProductByIdResponse::BadRequest(Json(body)) => {
                assert_eq!(body.error_type, "INVALID_INPUT");
                assert_eq!(body.message, "product.invalid_id");
            }
            _ => panic!("expected 400"),
        }
    }

    #[tokio::test]
    async fn should_return_not_found_when_product_is_missing() {
        let response = api().delete_product(Path("42".to_string())).await;

        assert!(matches!(response, DeleteProductResponse::NotFound(_)));
    }

    #[tokio::test]
    async fn should_update_existing_product() {
        let api = api();
        let created = create(&api, "Widget").await;

        let response = api
            .update_product(
                Path(created.id.to_string()),
                Json(UpdateProductRequest {
                    name: "Gadget".to_string(),
                    description: String::new(),
                    price: 4.25,
                    category_id: 7,
                }),
            )
            .await;

        match response {
            UpdateProductResponse::Ok(Json(product)) => {
                assert_eq!(product.name, "Gadget");
                assert_eq!(product.price, 4.25);
                assert_eq!(product.category_id, 7);
            }
            _ => panic!("expected 200"),
        }
    }

    #[tokio::test]
    async fn should_list_with_default_pagination_and_ignore_zero_category() {
        let api = api();
        create(&api, "Widget").await;
        create(&api, "Gadget").await;

        let response = api
            .list_products(Query(None), Query(Some(0)), Query(None), Query(None))
            .await;

        match response {
            ListProductsResponse::Ok(Json(page)) => {
                assert_eq!(page.total, 2);
                assert_eq!(page.page, 1);
                assert_eq!(page.limit, 10);
                assert_eq!(page.products[0].name, "Widget");
            }
            _ => panic!("expected 200"),
        }
    }

    #[tokio::test]
    async fn should_reject_non_positive_page() {
        let response = api()
            .list_products(Query(None), Query(None), Query(Some(-1)), Query(None))
            .await;

        match response {
            ListProductsResponse::BadRequest(Json(body)) => {
                assert_eq!(body.message, "pagination.page_must_be_greater_than_zero")
            }
            _ => panic!("expected 400"),
        }
    }

    #[tokio::test]
    async fn should_reject_limit_above_maximum() {
        let response = api()
            .list_products(Query(None), Query(None), Query(None), Query(Some(101)))
            .await;

        assert!(matches!(response, ListProductsResponse::BadRequest(_)));
    }

    #[test]
    fn should_clamp_page_params_into_u32() {
        assert_eq!(to_page_param(-5), 0);
        assert_eq!(to_page_param(3), 3);
        assert_eq!(to_page_param(i64::MAX), u32::MAX);
    }

    #[tokio::test]
    async fn should_return_empty_page_when_category_filter_is_out_of_range() {
        let api = api();
        create(&api, "Widget").await;

        let response = api
            .list_products(Query(None), Query(Some(u64::MAX)), Query(None), Query(None))
            .await;

        match response {
            ListProductsResponse::Ok(Json(page)) => {
                assert_eq!(page.total, 0);
                assert!(page.products.is_empty());
            }
            _ => panic!("expected 200"),
        }
    }

    #[tokio::test]
    async fn should_return_bad_request_when_price_has_more_than_two_decimals() {
        let response = api().create_product(create_request("Widget", 9.999)).await;

        match response {
            CreateProductResponse::BadRequest(Json(body)) => {
                assert_eq!(body.error_type, "VALIDATION");
                assert_eq!(body.message, "product.price_too_many_decimals");
            }
            _ => panic!("expected 400"),
        }
    }
}
