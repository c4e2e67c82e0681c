use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub business_rules: BusinessRules,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    /// VAT applied to invoices, 0.20 for 20%
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_due_days")]
    pub invoice_due_days: u32,
}

fn default_tax_rate() -> f64 { 0.20 }
fn default_currency() -> String { "EUR".to_string() }
fn default_due_days() -> u32 { 30 }

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            tax_rate: default_tax_rate(),
            currency: default_currency(),
            invoice_due_days: default_due_days(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedConfig {
    /// Load the mock collections at startup
    pub enabled: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3001)?
            .add_source(config::File::with_name("config/default").required(false))
            // Per-environment overrides, e.g. config/production.toml
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // VOYAGE__SERVER__PORT=8080, VOYAGE__BUSINESS_RULES__TAX_RATE=0.1
            .add_source(config::Environment::with_prefix("VOYAGE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_rules_defaults() {
        let rules = BusinessRules::default();
        assert_eq!(rules.currency, "EUR");
        assert_eq!(rules.invoice_due_days, 30);
        assert!((rules.tax_rate - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_rules_fill_defaults() {
        let s = config::Config::builder()
            .set_override("server.host", "127.0.0.1").unwrap()
            .set_override("server.port", 8080).unwrap()
            .set_override("business_rules.tax_rate", 0.1).unwrap()
            .build()
            .unwrap();
        let config: Config = s.try_deserialize().unwrap();

        assert_eq!(config.server.port, 8080);
        assert!((config.business_rules.tax_rate - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.business_rules.currency, "EUR");
        assert!(config.seed.enabled);
    }
}
