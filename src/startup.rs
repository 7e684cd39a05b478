use std::net::TcpListener;

use actix_web::{dev::Server, error::InternalError, http::StatusCode, web, App, HttpResponse, HttpServer};
use anyhow::Context;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing_actix_web::TracingLogger;

use crate::{
    auth::jwt::Tokenizer,
    configuration::{BookingSettings, Settings},
    routes::{
        delete_dining_table, delete_menu_entry, delete_reservation, get_dining_tables, get_full_menu,
        get_my_reservations, get_profile, get_reservations, get_single_menu_item, health_check, login,
        post_dining_table, post_menu_item, post_reservation, put_dining_table, put_menu_item,
        put_reservation, signup, validate_reservation
    },
    seed::seed_demo_data,
    utils::{build_connection_pool, json_error, DbPool}
};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub struct Application{
    pub host: String,
    pub port: u16,
    pub server: Server
}

impl Application {
    /// Builds the pool, brings the schema up to date, optionally seeds and
    /// binds the listener. Port 0 picks a free port, see `port`.
    pub async fn new(settings: Settings) -> Result<Self, anyhow::Error>{
        let pool = build_connection_pool(&settings.database)
            .context("Failed to build connection pool")?;

        run_migrations(&pool)?;

        if settings.application.seed_demo_data {
            seed_demo_data(&pool, &settings.seed).await?;
        }

        let listener = TcpListener::bind((settings.application.host.as_str(), settings.application.port))
            .context("Failed to bind listener")?;
        let port = listener.local_addr()?.port();

        tracing::info!(host = %settings.application.host, port, "Starting server");

        let server = run(listener, pool, Tokenizer::new(&settings.jwt), settings.booking)?;

        Ok(Application{
            host: settings.application.host,
            port,
            server
        })
    }
}

pub fn run_migrations(pool: &DbPool) -> Result<(), anyhow::Error>{
    let mut conn = pool.get()
        .context("Failed to get connection for migrations")?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to run migrations")?;

    Ok(())
}

// Malformed bodies get the same `{message}` shape as every other error
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = json_error(StatusCode::BAD_REQUEST, format!("Invalid request body: {}", err));
        InternalError::from_response(err, response).into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let response = json_error(StatusCode::BAD_REQUEST, format!("Invalid path parameter: {}", err));
        InternalError::from_response(err, response).into()
    })
}

async fn route_not_found() -> HttpResponse {
    json_error(StatusCode::NOT_FOUND, "Route not found")
}

fn run(
    listener: TcpListener,
    pool: DbPool,
    tokenizer: Tokenizer,
    booking: BookingSettings
) -> Result<Server, std::io::Error>{
    let pool = web::Data::new(pool);
    let tokenizer = web::Data::new(tokenizer);
    let booking = web::Data::new(booking);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(json_config())
            .app_data(path_config())
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/api")
                    .route("/signup", web::post().to(signup))
                    .route("/login", web::post().to(login))
                    .route("/profile", web::get().to(get_profile))
                    .service(
                        web::resource("/reservations")
                            .route(web::get().to(get_reservations))
                            .route(web::post().to(post_reservation))
                    )
                    .route("/my-reservations", web::get().to(get_my_reservations))
                    .service(
                        web::resource("/reservations/{id}")
                            .route(web::put().to(put_reservation))
                            .route(web::delete().to(delete_reservation))
                    )
                    .route("/reservations/{id}/validate", web::patch().to(validate_reservation))
                    .service(
                        web::resource("/tables")
                            .route(web::get().to(get_dining_tables))
                            .route(web::post().to(post_dining_table))
                    )
                    .service(
                        web::resource("/tables/{id}")
                            .route(web::put().to(put_dining_table))
                            .route(web::delete().to(delete_dining_table))
                    )
                    .service(
                        web::resource("/menu")
                            .route(web::get().to(get_full_menu))
                            .route(web::post().to(post_menu_item))
                    )
                    .service(
                        web::resource("/menu/{id}")
                            .route(web::get().to(get_single_menu_item))
                            .route(web::put().to(put_menu_item))
                            .route(web::delete().to(delete_menu_entry))
                    )
            )
            .default_service(web::to(route_not_found))
            .app_data(pool.clone())
            .app_data(tokenizer.clone())
            .app_data(booking.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
