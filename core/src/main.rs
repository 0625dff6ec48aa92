mod cors;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use analyst::client::AnalystClient;
use common::{env_config::Config, paystack::PaystackClient};
use mailer::Mailer;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    let is_production = config.environment == "production";
    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup().expect("Failed to set up logger");
    }

    // init db connection
    let pool = db::setup(&config.database_url, is_production)
        .await
        .expect("Failed to set up database");

    // outbound clients
    let paystack = PaystackClient::new(&config.paystack_secret_key);
    let analyst_client =
        AnalystClient::new(config.ai_config.clone()).expect("Failed to create AI client");
    let mail = Arc::new(Mailer::new(&config.smtp_config).expect("Failed to set up SMTP transport"));

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_data.clone()))
            .app_data(web::Data::new(paystack.clone()))
            .app_data(web::Data::new(analyst_client.clone()))
            .app_data(web::Data::new(mail.clone()))
            .wrap(limiter::global_middleware(10)) // max 10 requests per second
            .wrap(logger::middleware()) // 3rd
            .wrap(extractor::middleware()) // 2nd
            .wrap(cors::middleware(&origin)) // 1st
            .service(
                web::scope("/api")
                    .service(api_auth::mount_auth())
                    .service(api_billing::mount_webhook())
                    .service(
                        web::scope("/dashboard")
                            .wrap(limiter::user_middleware())
                            .wrap(api_auth::auth_middleware())
                            .service(api_auth::mount_user())
                            .service(api_convo::mount_conversations())
                            .service(api_billing::mount_billing()),
                    )
                    .service(api_admin::mount_admin().wrap(api_admin::admin_middleware())),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
