use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use tasktrack::{config::Config, db::Database, routes, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .map_err(std::io::Error::other)?;
    db.migrate().await.map_err(std::io::Error::other)?;
    log::info!("database ready at {}", config.database_url);

    let state = web::Data::new(AppState::new(db, &config));
    let cors_origin = config.cors_allowed_origin.clone();

    log::info!("Starting Tasktrack server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(build_cors(cors_origin.as_deref()))
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(web::scope("/api").configure(routes::config))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}

/// Cookies only cross origins with credentials enabled, which needs an explicit origin.
fn build_cors(allowed_origin: Option<&str>) -> Cors {
    match allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE"])
            .allow_any_header()
            .supports_credentials()
            .max_age(3600),
        None => Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600),
    }
}
