pub mod application;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::account_service::AccountService;
use application::cart_service::CartService;
use application::catalog_service::CatalogService;
use application::checkout_service::CheckoutService;
use application::payment_service::PaymentService;
use infrastructure::account_repo::DieselAccountRepository;
use infrastructure::analytics::OutboxAnalyticsSink;
use infrastructure::cart_repo::DieselCartRepository;
use infrastructure::catalog_repo::DieselProductRepository;
use infrastructure::order_repo::DieselOrderRepository;
use infrastructure::payment_repo::DieselPaymentMethodRepository;
use infrastructure::subscription_repo::DieselSubscriptionRepository;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Services as wired in production: Diesel-backed repositories plus the
/// outbox analytics sink.
pub type AppCartService = CartService<DieselCartRepository, OutboxAnalyticsSink>;
pub type AppCheckoutService = CheckoutService<DieselOrderRepository, OutboxAnalyticsSink>;
pub type AppCatalogService = CatalogService<DieselProductRepository>;
pub type AppPaymentService = PaymentService<DieselPaymentMethodRepository>;
pub type AppAccountService =
    AccountService<DieselAccountRepository, DieselSubscriptionRepository, OutboxAnalyticsSink>;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::accounts::register_account,
        handlers::accounts::get_account,
        handlers::cart::add_cart_item,
        handlers::cart::get_cart,
        handlers::cart::get_cart_count,
        handlers::orders::create_order,
        handlers::orders::get_order,
        handlers::orders::list_orders,
        handlers::products::create_product,
        handlers::products::list_products,
        handlers::products::featured_products,
        handlers::products::search_products,
        handlers::products::products_by_category,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::products::adjust_stock,
        handlers::payment_methods::add_payment_method,
        handlers::payment_methods::list_payment_methods,
        handlers::payment_methods::delete_payment_method,
        handlers::payment_methods::set_default_payment_method,
        handlers::subscriptions::subscribe,
    ),
    components(schemas(
        handlers::accounts::RegisterAccountRequest,
        handlers::accounts::AccountResponse,
        handlers::cart::AddCartItemRequest,
        handlers::cart::CartItemResponse,
        handlers::cart::CartResponse,
        handlers::cart::CartCountResponse,
        handlers::orders::CreateOrderRequest,
        handlers::orders::OrderResponse,
        handlers::orders::ListOrdersResponse,
        handlers::products::CreateProductRequest,
        handlers::products::UpdateProductRequest,
        handlers::products::AdjustStockRequest,
        handlers::products::ProductResponse,
        handlers::payment_methods::AddPaymentMethodRequest,
        handlers::payment_methods::PaymentMethodResponse,
        handlers::subscriptions::SubscribeRequest,
        handlers::subscriptions::SubscriptionResponse,
    ))
)]
struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let cart_service = web::Data::new(CartService::new(
        DieselCartRepository::new(pool.clone()),
        OutboxAnalyticsSink::new(pool.clone()),
    ));
    let checkout_service = web::Data::new(CheckoutService::new(
        DieselOrderRepository::new(pool.clone()),
        OutboxAnalyticsSink::new(pool.clone()),
    ));
    let catalog_service = web::Data::new(CatalogService::new(DieselProductRepository::new(
        pool.clone(),
    )));
    let payment_service = web::Data::new(PaymentService::new(DieselPaymentMethodRepository::new(
        pool.clone(),
    )));
    let account_service = web::Data::new(AccountService::new(
        DieselAccountRepository::new(pool.clone()),
        DieselSubscriptionRepository::new(pool.clone()),
        OutboxAnalyticsSink::new(pool),
    ));

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(cart_service.clone())
            .app_data(checkout_service.clone())
            .app_data(catalog_service.clone())
            .app_data(payment_service.clone())
            .app_data(account_service.clone())
            .wrap(Logger::default())
            .service(
                web::scope("/accounts")
                    .route("", web::post().to(handlers::accounts::register_account))
                    .route("/me", web::get().to(handlers::accounts::get_account)),
            )
            .service(
                web::scope("/cart")
                    .route("", web::get().to(handlers::cart::get_cart))
                    .route("/count", web::get().to(handlers::cart::get_cart_count))
                    .route("/items", web::post().to(handlers::cart::add_cart_item)),
            )
            .service(
                web::scope("/orders")
                    .route("", web::post().to(handlers::orders::create_order))
                    .route("", web::get().to(handlers::orders::list_orders))
                    .route("/{id}", web::get().to(handlers::orders::get_order)),
            )
            .service(
                web::scope("/products")
                    .route("", web::post().to(handlers::products::create_product))
                    .route("", web::get().to(handlers::products::list_products))
                    .route(
                        "/featured",
                        web::get().to(handlers::products::featured_products),
                    )
                    .route(
                        "/search",
                        web::get().to(handlers::products::search_products),
                    )
                    .route(
                        "/category/{category}",
                        web::get().to(handlers::products::products_by_category),
                    )
                    .route("/{id}", web::get().to(handlers::products::get_product))
                    .route("/{id}", web::patch().to(handlers::products::update_product))
                    .route(
                        "/{id}",
                        web::delete().to(handlers::products::delete_product),
                    )
                    .route(
                        "/{id}/stock",
                        web::post().to(handlers::products::adjust_stock),
                    ),
            )
            .service(
                web::scope("/payment-methods")
                    .route(
                        "",
                        web::post().to(handlers::payment_methods::add_payment_method),
                    )
                    .route(
                        "",
                        web::get().to(handlers::payment_methods::list_payment_methods),
                    )
                    .route(
                        "/{id}",
                        web::delete().to(handlers::payment_methods::delete_payment_method),
                    )
                    .route(
                        "/{id}/default",
                        web::post().to(handlers::payment_methods::set_default_payment_method),
                    ),
            )
            .service(
                web::scope("/subscriptions")
                    .route("", web::post().to(handlers::subscriptions::subscribe)),
            )
            .service(
                SwaggerUi::new("/docs/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
