use anyhow::Context;
use qash_sdk::utils::init_tracing;
use qash_sdk::{AccountListQuery, QashClient, QashConfig};

#[cfg(feature = "env-file")]
fn load_config() -> Result<QashConfig, qash_sdk::ConfigError> {
    QashConfig::from_env_auto("QASH")
}

#[cfg(not(feature = "env-file"))]
fn load_config() -> Result<QashConfig, qash_sdk::ConfigError> {
    QashConfig::from_env("QASH")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(std::env::var("QASH_VERBOSE").is_ok());

    // Set QASH_API_KEY and optionally QASH_ENVIRONMENT=staging|dev
    let config = load_config().context("loading Qash configuration")?;
    let qash = QashClient::from_config(config).context("building Qash client")?;
    println!("Using {} ({})", qash.environment(), qash.base_url());

    match qash.get_authorized_partner().await {
        Ok(partner) => println!(
            "Partner: {} [{}], CBS enabled: {}",
            partner.name, partner.id, partner.is_cbs_partner
        ),
        Err(e) => println!("Error fetching partner: {:?}", e.errors()),
    }

    match qash.datasets.get_currencies().await {
        Ok(currencies) => {
            println!("Found {} currencies", currencies.len());
            for currency in currencies.iter().take(5) {
                println!(
                    "Currency: {} ({}) {} rates",
                    currency.name,
                    currency.code,
                    currency.exchange_rates.len()
                );
            }
        }
        Err(e) => println!("Error fetching currencies: {:?}", e.errors()),
    }

    match qash.cbs.get_account_holders().await {
        Ok(holders) => {
            for holder in holders.iter().take(5) {
                println!(
                    "Account holder: {} [{}] ({:?})",
                    holder.name().unwrap_or("<unnamed>"),
                    holder.id().unwrap_or("<no id>"),
                    holder.kind()
                );
            }
        }
        Err(e) => println!("Error fetching account holders: {:?}", e.errors()),
    }

    let query = AccountListQuery::new().currency(["usd", "eur"]);
    match qash.cbs.get_accounts(&query).await {
        Ok(accounts) => println!("Found {} USD/EUR accounts", accounts.len()),
        Err(e) => println!("Error fetching accounts: {:?}", e.errors()),
    }

    Ok(())
}
