use std::env;
use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use storefront::auth::ServerConfig;
use storefront::db::establish_connection_pool;
use storefront::notification::{LogNotifier, Notifier};
use storefront::payment::{PaymentProcessor, SandboxGateway};
use storefront::repository::DieselRepository;
use storefront::routes::cart::{
    add_item, apply_coupon, empty_cart, get_cart, get_totals, remove_item, set_item_quantity,
    sync_cart,
};
use storefront::routes::checkout::place_order;
use storefront::routes::coupons::{create_coupon, deactivate_coupon};
use storefront::routes::orders::{get_order, list_orders, update_status};
use storefront::routes::products::{
    archive_product, create_product, get_product, list_products, update_product,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let secret = match env::var("SECRET_KEY") {
        Ok(secret) => secret,
        Err(_) => {
            log::error!("SECRET_KEY environment variable not set");
            std::process::exit(1);
        }
    };

    let server_config = ServerConfig { secret };

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let gateway: Arc<dyn PaymentProcessor> = Arc::new(SandboxGateway::new());
    let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(list_products)
            .service(get_product)
            .service(create_product)
            .service(update_product)
            .service(archive_product)
            .service(get_cart)
            .service(get_totals)
            .service(add_item)
            .service(set_item_quantity)
            .service(remove_item)
            .service(apply_coupon)
            .service(sync_cart)
            .service(empty_cart)
            .service(place_order)
            .service(list_orders)
            .service(get_order)
            .service(update_status)
            .service(create_coupon)
            .service(deactivate_coupon)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .app_data(web::Data::from(gateway.clone()))
            .app_data(web::Data::from(notifier.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
