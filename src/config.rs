use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn from_env() -> Self {
        match std::env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Model used for image-based food analysis.
    pub vision_model: String,
    /// Model used for diet plan generation.
    pub planner_model: String,
    /// Model used for recipe generation.
    pub recipe_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub environment: Environment,
    pub jwt: JwtConfig,
    pub gemini: GeminiConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "aidiet".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "aidiet-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
            refresh_ttl_minutes: std::env::var("JWT_REFRESH_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 14),
        };
        let gemini = GeminiConfig {
            api_key: std::env::var("GEMINI_API_KEY")?,
            vision_model: std::env::var("GEMINI_VISION_MODEL")
                .unwrap_or_else(|_| "gemini-pro-vision".into()),
            planner_model: std::env::var("GEMINI_PLANNER_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-pro".into()),
            recipe_model: std::env::var("GEMINI_RECIPE_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".into()),
        };
        Ok(Self {
            database_url,
            environment: Environment::from_env(),
            jwt,
            gemini,
        })
    }

    /// Diagnostic detail in error responses is exposed outside production only.
    pub fn expose_error_details(&self) -> bool {
        self.environment != Environment::Production
    }
}
