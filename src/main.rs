// src/main.rs - Pharmacy management backend
use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpResponse, HttpServer};
use sqlx::PgPool;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Module declarations
mod client_handlers;
mod composition_handlers;
mod config;
mod db;
mod delivery_handlers;
mod error;
mod handlers;
mod ingredient_handlers;
mod inventory_handlers;
mod medication_handlers;
mod medicine_handlers;
mod models;
mod order_handlers;
mod prescription_handlers;
mod query_handlers;
mod technology_handlers;

use config::{load_config, Config};
use error::ApiResult;

pub struct AppState {
    pub db_pool: PgPool,
    pub config: Config,
}

async fn welcome() -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Pharmacy management system API"
    })))
}

async fn health() -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().body("OK"))
}

fn setup_logging(config: &Config) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.logging.level.as_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(())
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;

    setup_logging(&config)?;
    config.print_startup_info();

    let pool = db::create_pool(&config.database).await?;
    db::init_schema(&pool).await?;
    db::seed_if_empty(&pool).await?;

    let app_state = Arc::new(AppState {
        db_pool: pool,
        config: config.clone(),
    });

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    log::info!("Starting server at http://{}", bind_address);

    let workers = config.server.workers;

    let mut server = HttpServer::new(move || {
        // API для внутренней сети аптеки, фронтенд ходит с любого хоста
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(web::Data::new(app_state.clone()))
            .route("/", web::get().to(welcome))
            .route("/health", web::get().to(health))
            .service(
                web::scope("/medications")
                    .route("", web::get().to(medication_handlers::get_medications))
                    .route("", web::post().to(medication_handlers::create_medication))
                    .route("/{id}", web::get().to(medication_handlers::get_medication_by_id))
                    .route("/{id}", web::put().to(medication_handlers::update_medication))
                    .route(
                        "/{id}/deliveries",
                        web::get().to(medication_handlers::get_medication_deliveries),
                    ),
            )
            .service(
                web::scope("/ingredients")
                    .route("", web::get().to(ingredient_handlers::get_ingredients))
                    .route("", web::post().to(ingredient_handlers::create_ingredient))
                    .route("/{id}", web::get().to(ingredient_handlers::get_ingredient_by_id))
                    .route("/{id}", web::put().to(ingredient_handlers::update_ingredient))
                    .route(
                        "/{id}/medicines",
                        web::get().to(ingredient_handlers::get_ingredient_medicines),
                    ),
            )
            .service(
                web::scope("/medicines")
                    .route("", web::get().to(medicine_handlers::get_medicines))
                    .route("", web::post().to(medicine_handlers::create_medicine))
                    .route("/{id}", web::get().to(medicine_handlers::get_medicine_by_id))
                    .route("/{id}", web::put().to(medicine_handlers::update_medicine))
                    .route(
                        "/{id}/prescriptions",
                        web::get().to(medicine_handlers::get_medicine_prescriptions),
                    ),
            )
            .service(
                web::scope("/compositions")
                    .route("", web::get().to(composition_handlers::get_compositions))
                    .route("", web::post().to(composition_handlers::save_composition))
                    .route(
                        "/medicine/{id}",
                        web::get().to(composition_handlers::get_compositions_by_medicine),
                    ),
            )
            .service(
                web::scope("/technologies")
                    .route("", web::get().to(technology_handlers::get_technologies))
                    .route("", web::post().to(technology_handlers::create_technology))
                    .route("/{id}", web::get().to(technology_handlers::get_technology_by_id))
                    .route("/{id}", web::put().to(technology_handlers::update_technology))
                    .route(
                        "/{id}/medicines",
                        web::get().to(technology_handlers::get_technology_medicines),
                    ),
            )
            .service(
                web::scope("/prescriptions")
                    .route("", web::get().to(prescription_handlers::get_prescriptions))
                    .route("", web::post().to(prescription_handlers::create_prescription))
                    .route(
                        "/{id}",
                        web::get().to(prescription_handlers::get_prescription_by_id),
                    )
                    .route("/{id}", web::put().to(prescription_handlers::update_prescription))
                    .route(
                        "/{id}",
                        web::delete().to(prescription_handlers::delete_prescription),
                    )
                    .route(
                        "/{id}/orders",
                        web::get().to(prescription_handlers::get_prescription_orders),
                    ),
            )
            .service(
                web::scope("/orders")
                    .route("", web::get().to(order_handlers::get_orders))
                    .route("", web::post().to(order_handlers::create_order))
                    .route("/{id}", web::get().to(order_handlers::get_order_by_id))
                    .route("/{id}", web::put().to(order_handlers::update_order))
                    .route("/{id}", web::delete().to(order_handlers::delete_order))
                    .route(
                        "/{id}/prescription",
                        web::get().to(order_handlers::get_order_prescription),
                    )
                    .route("/{id}/client", web::get().to(order_handlers::get_order_client)),
            )
            .service(
                web::scope("/clients")
                    .route("", web::get().to(client_handlers::get_clients))
                    .route("", web::post().to(client_handlers::create_client))
                    .route("/search", web::get().to(client_handlers::search_client))
                    .route("/{id}", web::get().to(client_handlers::get_client_by_id))
                    .route("/{id}", web::put().to(client_handlers::update_client))
                    .route("/{id}", web::delete().to(client_handlers::delete_client))
                    .route("/{id}/orders", web::get().to(client_handlers::get_client_orders)),
            )
            .service(
                web::scope("/deliveries")
                    .route("", web::get().to(delivery_handlers::get_deliveries))
                    .route("", web::post().to(delivery_handlers::create_delivery))
                    .route("/{id}", web::get().to(delivery_handlers::get_delivery_by_id))
                    .route("/{id}", web::put().to(delivery_handlers::update_delivery))
                    .route("/{id}", web::delete().to(delivery_handlers::delete_delivery)),
            )
            .service(
                web::scope("/inventories")
                    .route("", web::get().to(inventory_handlers::get_inventories))
                    .route("", web::post().to(inventory_handlers::create_inventory))
                    .route("/{id}", web::get().to(inventory_handlers::get_inventory_by_id))
                    .route("/{id}", web::put().to(inventory_handlers::update_inventory))
                    .route("/{id}", web::delete().to(inventory_handlers::delete_inventory)),
            )
            .service(
                web::scope("/queries")
                    .route(
                        "/clients-with-unclaimed-orders",
                        web::get().to(query_handlers::get_clients_with_unclaimed_orders),
                    )
                    .route(
                        "/clients-with-unclaimed-orders/count",
                        web::get().to(query_handlers::count_clients_with_unclaimed_orders),
                    )
                    .route(
                        "/clients-waiting-for-delivery",
                        web::get().to(query_handlers::get_clients_waiting_for_delivery),
                    )
                    .route(
                        "/clients-waiting-for-delivery/count",
                        web::get().to(query_handlers::count_clients_waiting_for_delivery),
                    )
                    .route(
                        "/clients-waiting-for-delivery/count-by-type",
                        web::get().to(query_handlers::count_clients_waiting_for_delivery_by_type),
                    )
                    .route(
                        "/medicine-details",
                        web::get().to(query_handlers::get_medicine_details),
                    )
                    .route(
                        "/medicine-details/by-name",
                        web::get().to(query_handlers::get_medicine_details_by_name),
                    )
                    .route(
                        "/top-medications",
                        web::get().to(query_handlers::get_top_medications),
                    )
                    .route(
                        "/top-medications/by-type",
                        web::get().to(query_handlers::get_top_medications_by_type),
                    )
                    .route(
                        "/ingredient-usage",
                        web::get().to(query_handlers::get_ingredient_usage),
                    )
                    .route(
                        "/clients-by-medication-name",
                        web::get().to(query_handlers::get_clients_by_medication_name),
                    )
                    .route(
                        "/clients-by-medication-name/count",
                        web::get().to(query_handlers::count_clients_by_medication_name),
                    )
                    .route(
                        "/clients-by-medication-type",
                        web::get().to(query_handlers::get_clients_by_medication_type),
                    )
                    .route(
                        "/clients-by-medication-type/count",
                        web::get().to(query_handlers::count_clients_by_medication_type),
                    )
                    .route(
                        "/medications-at-critical-level",
                        web::get().to(query_handlers::get_medications_at_critical_level),
                    )
                    .route(
                        "/low-stock-medications",
                        web::get().to(query_handlers::get_low_stock_medications),
                    )
                    .route(
                        "/low-stock-medications/by-type",
                        web::get().to(query_handlers::get_low_stock_medications_by_type),
                    )
                    .route(
                        "/producing-orders",
                        web::get().to(query_handlers::get_producing_orders),
                    )
                    .route(
                        "/producing-orders/count",
                        web::get().to(query_handlers::count_producing_orders),
                    )
                    .route(
                        "/ingredients-for-producing-orders",
                        web::get().to(query_handlers::get_ingredients_for_producing_orders),
                    )
                    .route(
                        "/ingredients-for-producing-orders/count",
                        web::get().to(query_handlers::count_ingredients_for_producing_orders),
                    )
                    .route(
                        "/preparation-technologies",
                        web::get().to(query_handlers::get_preparation_technologies),
                    )
                    .route(
                        "/medicine-price-and-components",
                        web::get().to(query_handlers::get_medicine_price_and_components),
                    )
                    .route(
                        "/most-frequent-clients",
                        web::get().to(query_handlers::get_most_frequent_clients),
                    ),
            )
    })
    .bind(&bind_address)?;

    if let Some(workers) = workers {
        server = server.workers(workers);
    }

    server.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_rt::test]
    async fn test_health_returns_ok() {
        let app =
            test::init_service(App::new().route("/health", web::get().to(health))).await;

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert!(response.status().is_success());

        let body = test::read_body(response).await;
        assert_eq!(body, "OK");
    }

    #[actix_rt::test]
    async fn test_welcome_message() {
        let app = test::init_service(App::new().route("/", web::get().to(welcome))).await;

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert!(response.status().is_success());

        let body: serde_json::Value = test::read_body_json(response).await;
        assert!(body["message"].as_str().unwrap_or_default().contains("Pharmacy"));
    }
}
