use std::sync::Arc;
use std::time::Duration;

use logger::TracingLogger;

use business::application::product::create::CreateProductUseCaseImpl;
use business::application::product::delete::DeleteProductUseCaseImpl;
use business::application::product::get_by_id::GetProductByIdUseCaseImpl;
use business::application::product::list::ListProductsUseCaseImpl;
use business::application::product::presenter::ProductOutputPresenter;
use business::application::product::update::UpdateProductUseCaseImpl;
use business::domain::logger::Logger;
use business::domain::product::gateway::ProductGateway;
use business::domain::product::presenter::ProductPresenter;

use crate::api::health::routes::HealthApi;
use crate::api::product::routes::ProductApi;

pub struct DependencyContainer {
    pub health_api: HealthApi,
    pub product_api: ProductApi,
}

impl DependencyContainer {
    pub fn new(gateway: Arc<dyn ProductGateway>, request_timeout: Duration) -> Self {
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger);
        let presenter: Arc<dyn ProductPresenter> = Arc::new(ProductOutputPresenter);

        let create_use_case = Arc::new(CreateProductUseCaseImpl {
            gateway: gateway.clone(),
            presenter: presenter.clone(),
            logger: logger.clone(),
        });
        let list_use_case = Arc::new(ListProductsUseCaseImpl {
            gateway: gateway.clone(),
            presenter: presenter.clone(),
            logger: logger.clone(),
        });
        let get_by_id_use_case = Arc::new(GetProductByIdUseCaseImpl {
            gateway: gateway.clone(),
            presenter: presenter.clone(),
            logger: logger.clone(),
        });
        let update_use_case = Arc::new(UpdateProductUseCaseImpl {
            gateway: gateway.clone(),
            presenter,
            logger: logger.clone(),
        });
        let delete_use_case = Arc::new(DeleteProductUseCaseImpl { gateway, logger });

        let product_api = ProductApi::new(
            create_use_case,
            list_use_case,
            get_by_id_use_case,
            update_use_case,
            delete_use_case,
            request_timeout,
        );

        Self {
            health_api: HealthApi,
            product_api,
        }
    }
}
