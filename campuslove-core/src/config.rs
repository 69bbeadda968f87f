use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

fn default_database_url() -> String {
    "campuslove.db".into()
}
fn default_admin_username() -> String {
    "admin".into()
}
fn default_admin_password() -> String {
    "campuslove-admin1".into()
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("CAMPUSLOVE").separator("__"))
            .build()?;
        // Missing variables fall back to the serde defaults; malformed ones
        // are a startup error, not something to silently paper over.
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_env_is_empty() {
        let cfg = AppConfig::load().unwrap();
        assert!(!cfg.database_url.is_empty());
        assert_eq!(cfg.admin_username, "admin");
    }

    #[test]
    fn malformed_environment_is_a_startup_error() {
        let raw = config::Config::builder()
            .add_source(config::File::from_str(
                "database_url:\n  nested: true\n",
                config::FileFormat::Yaml,
            ))
            .build()
            .unwrap();
        assert!(raw.try_deserialize::<AppConfig>().is_err());
    }
}
