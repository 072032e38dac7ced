use clap::Parser;
use std::path::PathBuf;
use crate::domain::LoyaltyPolicy;

/// Campus cafeteria ordering service
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Config {
    /// Email that signs in as the cafeteria operator
    #[arg(long, env = "APERATIVO_ADMIN_EMAIL", default_value = "admin@ucol.mx")]
    pub admin_email: String,
    /// Operator password
    #[arg(long, env = "APERATIVO_ADMIN_PASSWORD", default_value = "admin", hide_env_values = true)]
    pub admin_password: String,
    /// Suffix every student email must carry
    #[arg(long, env = "APERATIVO_EMAIL_DOMAIN", default_value = "@ucol.mx")]
    pub email_domain: String,
    /// Coins credited to a new account
    #[arg(long, default_value_t = 50.0)]
    pub starting_balance: f64,
    /// Points spent on one reward
    #[arg(long, default_value_t = 200, value_parser = clap::value_parser!(u32).range(1..))]
    pub reward_cost: u32,
    /// Coins discounted by one reward
    #[arg(long, default_value_t = 35.0, value_parser = positive_coins)]
    pub reward_value: f64,
    /// Inbox capacity of each collection actor
    #[arg(long, default_value_t = 32)]
    pub inbox_capacity: usize,
    /// Where session and theme preferences are kept
    #[arg(long, env = "APERATIVO_PREFS", default_value = "aperativo-prefs.json")]
    pub prefs_path: PathBuf,
    /// Enable verbose logging{n}[SETS env: RUST_LOG=debug]
    #[arg(short, long)]
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            admin_email: "admin@ucol.mx".to_string(),
            admin_password: "admin".to_string(),
            email_domain: "@ucol.mx".to_string(),
            starting_balance: 50.0,
            reward_cost: 200,
            reward_value: 35.0,
            inbox_capacity: 32,
            prefs_path: PathBuf::from("aperativo-prefs.json"),
            verbose: false,
        }
    }
}

impl Config {
    pub fn loyalty(&self) -> LoyaltyPolicy {
        LoyaltyPolicy { reward_cost: self.reward_cost, reward_value: self.reward_value }
    }
}

fn positive_coins(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("`{}` must be greater than zero", s));
    }
    Ok(value)
}
