use clap::Parser;
use pricelist::core::markup::{format_money, format_rand};
use pricelist::core::ConfigProvider;
use pricelist::utils::error::{ErrorSeverity, PriceListError};
use pricelist::utils::{logger, validation::Validate};
use pricelist::{CliConfig, LocalStorage, PriceListEngine, PriceListPipeline, PriceRow, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting pricelist");

    let result = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => run(config).await,
                Err(e) => Err(e),
            }
        }
        None => run(args.clone()).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Price list run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run<C>(config: C) -> Result<(), PriceListError>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;
    tracing::debug!("Configuration validated");

    let add_amount = config.add_amount();
    let input = LocalStorage::new(".".to_string());
    let output = LocalStorage::new(config.output_path().to_string());
    let engine = PriceListEngine::new(PriceListPipeline::new(input, output, config));

    let summary = engine.run().await?;
    print_table(&summary.view, add_amount);

    for file in &summary.files_written {
        println!("📁 Saved {}", file);
    }
    Ok(())
}

fn print_table(rows: &[PriceRow], add_amount: f64) {
    if rows.is_empty() {
        println!("No rows to show. Load a CSV with brand,model,type,price columns to get started.");
        return;
    }

    let updated_header = format!("Price + R{}", format_money(add_amount));
    let brand_w = column_width("Brand", rows.iter().map(|r| r.brand.as_str()));
    let model_w = column_width("Model", rows.iter().map(|r| r.model.as_str()));
    let type_w = column_width("Type", rows.iter().map(|r| r.r#type.as_str()));

    println!(
        "{:<brand_w$}  {:<model_w$}  {:<type_w$}  {:>8}  {:>12}",
        "Brand", "Model", "Type", "Price", updated_header
    );
    for row in rows {
        println!(
            "{:<brand_w$}  {:<model_w$}  {:<type_w$}  {:>8}  {:>12}",
            row.brand,
            row.model,
            row.r#type,
            format_rand(row.price),
            format_rand(row.derived_price(add_amount))
        );
    }
    println!("{} rows", rows.len());
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|cell| cell.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.len())
}
