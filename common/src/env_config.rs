use std::{env, sync::Arc};

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// This struct holds all the necessary configuration parameters
/// required to initialize and run the server.
/// It includes database connection details, JWT configuration,
/// server host and port, number of worker threads, CORS settings,
/// Paystack and AI-provider credentials, SMTP settings, and the
/// admin API token.
pub struct Config {
    // environment
    pub environment: String, // development or production
    /// The URL of the database to connect to.
    pub database_url: String,
    /// Configuration for JWT (JSON Web Token) authentication.
    pub jwt_config: JwtConfig,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS (Cross-Origin Resource Sharing).
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// Public base URL of the web application. Used to build email
    /// verification links and the Paystack checkout callback URL.
    pub app_base_url: String,
    /// Paystack secret key.
    pub paystack_secret_key: String,
    /// Paystack public key, exposed to the frontend through the plans endpoint.
    pub paystack_public_key: String,
    /// Configuration for the generative-AI provider.
    pub ai_config: AiConfig,
    /// Configuration for the SMTP mailer.
    pub smtp_config: SmtpConfig,
    /// Shared secret expected in the `x-admin-token` header of admin requests.
    pub admin_api_token: String,
}

#[derive(Clone, Debug)]
/// Connection details for the generative-AI provider used to produce
/// conversation analyses.
pub struct AiConfig {
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Chat-completions endpoint URL.
    pub api_url: String,
    /// Model identifier.
    pub model: String,
}

#[derive(Clone, Debug)]
/// SMTP connection details for outgoing mail.
pub struct SmtpConfig {
    /// SMTP server hostname.
    pub host: String,
    /// SMTP server port.
    pub port: u16,
    /// Username for authentication.
    pub username: String,
    /// Password for authentication.
    pub password: String,
    /// Address outgoing mail is sent from.
    pub from_address: String,
}

#[derive(Clone, Debug)]
/// Configuration for JSON Web Token (JWT) authentication.
///
/// This struct contains the secret key used to sign JWTs and
/// the expiration time in hours for issued tokens.
pub struct JwtConfig {
    /// The secret key used to sign and verify JWTs.
    pub secret: String,
    /// The expiration time for JWTs in hours.
    pub expiration_hours: i64,
}

impl JwtConfig {
    /// Creates a new `JwtConfig` instance from environment variables.
    ///
    /// Reads the JWT configuration from environment variables:
    /// - `JWT_SECRET`: Required. The secret key for JWT signing.
    /// - `JWT_EXPIRATION_HOURS`: Optional. Defaults to 24 hours if not provided.
    ///
    /// # Panics
    ///
    /// This function will panic if:
    /// - `JWT_SECRET` environment variable is not set
    /// - `JWT_EXPIRATION_HOURS` is set but cannot be parsed as a valid number
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        JwtConfig {
            secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .expect("JWT_EXPIRATION_HOURS must be a valid number"),
        }
    }
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// Loads all configuration values from environment variables with sensible
    /// defaults for most optional settings.
    ///
    /// # Environment Variables
    ///
    /// Required:
    /// - `ENVIRONMENT`: "development" or "production"
    /// - `DATABASE_URL`: Connection string for the database
    /// - `JWT_SECRET`: Secret key for JWT signing (via `JwtConfig::from_env()`)
    /// - `ADMIN_API_TOKEN`: Shared secret for the admin API
    ///
    /// Optional (with defaults):
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin (default: "http://localhost:3000")
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    /// - `APP_BASE_URL`: Public web-app URL (default: "http://localhost:3000")
    /// - `PAYSTACK_SECRET_KEY` / `PAYSTACK_PUBLIC_KEY`: Paystack credentials
    /// - `AI_API_KEY` / `AI_API_URL` / `AI_MODEL`: AI-provider settings
    /// - `SMTP_HOST` / `SMTP_PORT` / `SMTP_USERNAME` / `SMTP_PASSWORD` / `SMTP_FROM`
    ///
    /// # Panics
    ///
    /// This function will panic if required environment variables are missing
    /// or if numeric values cannot be parsed correctly.
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        Arc::new(Config {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_config: JwtConfig::from_env(),
            server_host: env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            num_workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            console_logging_enabled: env::var("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
            app_base_url: env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            paystack_secret_key: env::var("PAYSTACK_SECRET_KEY").unwrap_or_default(),
            paystack_public_key: env::var("PAYSTACK_PUBLIC_KEY").unwrap_or_default(),
            ai_config: AiConfig {
                api_key: env::var("AI_API_KEY").unwrap_or_default(),
                api_url: env::var("AI_API_URL").unwrap_or_else(|_| {
                    "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions"
                        .to_string()
                }),
                model: env::var("AI_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            },
            smtp_config: SmtpConfig {
                host: env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
                port: env::var("SMTP_PORT")
                    .unwrap_or_else(|_| "587".to_string())
                    .parse()
                    .unwrap_or(587),
                username: env::var("SMTP_USERNAME").unwrap_or_default(),
                password: env::var("SMTP_PASSWORD").unwrap_or_default(),
                from_address: env::var("SMTP_FROM")
                    .unwrap_or_else(|_| "Textopsy <no-reply@textopsy.com>".to_string()),
            },
            admin_api_token: env::var("ADMIN_API_TOKEN").expect("ADMIN_API_TOKEN must be set"),
        })
    }
}
