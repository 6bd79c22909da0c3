//! Writes the bundled knowledge base articles, replacing earlier versions by slug.

use std::env;

use config::Config;
use dotenvy::dotenv;

use daar_site::content::seed_articles;
use daar_site::db::establish_connection_pool;
use daar_site::models::config::ServerConfig;
use daar_site::repository::DieselRepository;
use daar_site::services::knowledge_base;

fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());
    let settings = Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build()
        .and_then(|settings| settings.try_deserialize::<ServerConfig>());

    let server_config = match settings {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let articles = match seed_articles() {
        Ok(articles) => articles,
        Err(e) => {
            log::error!("Invalid bundled article: {e}");
            std::process::exit(1);
        }
    };

    match knowledge_base::seed_articles(&repo, &articles) {
        Ok(written) => log::info!("Seeded {written} knowledge base articles"),
        Err(e) => {
            log::error!("Failed to seed knowledge base: {e}");
            std::process::exit(1);
        }
    }
}
