use clap::Parser;
use pricelist::app::cart::CART_DOCUMENT;
use pricelist::core::markup::{format_rand, DEFAULT_ADD_AMOUNT};
use pricelist::domain::catalog;
use pricelist::utils::error::PriceListError;
use pricelist::utils::{logger, validation::Validate};
use pricelist::{
    Cart, CartKey, Customer, Delivery, HttpNotificationSink, LocalStorage, LogNotificationSink,
    NotificationSink, Order, TomlConfig,
};

#[derive(Parser)]
#[command(name = "place-order")]
#[command(about = "Build an order from the saved cart and send it to the shop owner")]
struct Args {
    /// Directory holding the saved cart
    #[arg(long, default_value = ".")]
    cart_dir: String,

    /// Add a catalog item to the cart before ordering, as brand|model|type
    #[arg(long = "add")]
    add: Vec<String>,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    #[arg(long)]
    email: Option<String>,

    /// TOML file with the [markup] and [notification] sections
    #[arg(short, long)]
    config: Option<String>,

    /// Log the message instead of sending it
    #[arg(long)]
    dry_run: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let config = match &args.config {
        Some(path) => Some(TomlConfig::from_file(path)?),
        None => None,
    };
    let add_amount = config
        .as_ref()
        .map(|c| c.markup.add_amount)
        .unwrap_or(DEFAULT_ADD_AMOUNT);

    let storage = LocalStorage::new(args.cart_dir.clone());
    let mut cart = Cart::load(&storage, CART_DOCUMENT).await?;

    if !args.add.is_empty() {
        let rows = catalog::catalog_rows();
        for raw_key in &args.add {
            let key = CartKey::from(raw_key.as_str());
            match rows.iter().find(|row| row.key() == key) {
                Some(row) => {
                    let line = cart.add(row, row.derived_price(add_amount));
                    tracing::info!("🛒 {} x{}", line.key(), line.qty);
                }
                None => tracing::warn!("No catalog item matches '{}'", raw_key),
            }
        }
        cart.save(&storage, CART_DOCUMENT).await?;
    }

    println!(
        "Cart: {} items, total {}",
        cart.item_count(),
        format_rand(cart.total())
    );

    let Some(name) = args.name.clone() else {
        return Ok(());
    };

    let order = Order::from_cart(
        Customer {
            name,
            phone: args.phone.clone(),
            email: args.email.clone(),
        },
        &cart,
    );

    let outcome = match send(&order, config.as_ref(), args.dry_run).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("❌ Order not sent: {} (Severity: {:?})", e, e.severity());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    match outcome {
        Delivery::Delivered => {
            println!("✅ Order placed for {}", order.customer.name);
            cart.clear();
            cart.save(&storage, CART_DOCUMENT).await?;
        }
        Delivery::Failed(reason) => {
            eprintln!("❌ Order could not be delivered: {}", reason);
            eprintln!("💡 The cart was kept; run the command again to retry");
            std::process::exit(2);
        }
    }

    Ok(())
}

async fn send(
    order: &Order,
    config: Option<&TomlConfig>,
    dry_run: bool,
) -> Result<Delivery, PriceListError> {
    if dry_run {
        let notification = order.to_notification("orders@localhost", "owner@localhost")?;
        return Ok(LogNotificationSink.deliver(&notification).await);
    }

    let config = config.ok_or_else(|| PriceListError::MissingConfigError {
        field: "config".to_string(),
    })?;
    let notification_config = config.notification()?;
    notification_config.validate()?;

    let notification = order.to_notification(&notification_config.from, &notification_config.to)?;
    let sink = HttpNotificationSink::from_config(notification_config)?;
    Ok(sink.deliver(&notification).await)
}
