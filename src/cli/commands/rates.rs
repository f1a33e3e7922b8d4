use crate::cli::utils::output_json;
use crate::cli::{connect, OutputFormat};
use crate::models::Currency;

/// Rates need no session.
pub async fn show(server: &str, base: Currency, output_format: OutputFormat) -> anyhow::Result<()> {
    let session = connect(server)?;
    let table = session.client().fetch_exchange_rates(base).await?;

    match output_format {
        OutputFormat::Json => output_json(&table),
        OutputFormat::Text => {
            println!("1 {} =", table.base);
            for currency in Currency::SUPPORTED {
                if let Some(rate) = table.rate(currency) {
                    println!("  {:>14.6} {}", rate, currency.code());
                }
            }
            Ok(())
        }
    }
}
