//! # Checkout CLI
//!
//! Runs a single checkout for a request file.
//!
//! ## Usage
//! ```bash
//! # Approve the payment and store the order
//! cargo run -p checkout-cli -- request.json
//!
//! # Use a specific config file
//! cargo run -p checkout-cli -- request.json --config ./checkout.toml
//!
//! # Simulate a declined card
//! cargo run -p checkout-cli -- request.json --decline
//! ```
//!
//! ## Request File
//! ```json
//! {
//!   "cart": {
//!     "user": { "id": "2", "name": "Premium Customer",
//!               "email": "premium@example.com", "tier": "premium" },
//!     "items": [
//!       { "name": "Expensive Item 1", "unit_price": 10000 },
//!       { "name": "Expensive Item 2", "unit_price": 10000 }
//!     ]
//!   },
//!   "payment": { "card_number": "1234-5678-9012-3456", "security_code": "123" }
//! }
//! ```
//! Prices are in cents and must not be negative. Every other field is passed
//! through as given.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use checkout_core::validation::validate_cart;
use checkout_core::{Cart, PaymentInstrument};
use checkout_db::{Database, DbConfig};
use checkout_service::adapters::{ApprovingGateway, DecliningGateway, TracingNotifier};
use checkout_service::{CheckoutConfig, CheckoutOrchestrator, PaymentGateway};

/// Contents of a request file.
#[derive(Debug, Deserialize)]
struct CheckoutRequest {
    cart: Cart,
    payment: PaymentInstrument,
}

#[derive(Debug, Default, PartialEq)]
struct Args {
    request: PathBuf,
    config: Option<PathBuf>,
    decline: bool,
    help: bool,
}

const USAGE: &str = "\
Usage: checkout-cli <REQUEST.json> [OPTIONS]

Options:
  -c, --config <PATH>  Config file (default: platform config dir)
      --decline        Decline the payment instead of approving it
  -h, --help           Show this help message";

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut request = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let path = args.get(i + 1).ok_or("--config requires a path")?;
                parsed.config = Some(PathBuf::from(path));
                i += 1;
            }
            "--decline" => parsed.decline = true,
            "--help" | "-h" => parsed.help = true,
            flag if flag.starts_with('-') => return Err(format!("Unknown option: {}", flag)),
            path => {
                if request.replace(PathBuf::from(path)).is_some() {
                    return Err("Only one request file may be given".to_string());
                }
            }
        }
        i += 1;
    }

    match request {
        Some(path) => parsed.request = path,
        None if parsed.help => {}
        None => return Err("Missing request file".to_string()),
    }

    Ok(parsed)
}

fn read_request(path: &Path) -> Result<CheckoutRequest, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let request: CheckoutRequest = serde_json::from_str(&contents)?;
    validate_cart(&request.cart)?;
    Ok(request)
}

/// Initializes the tracing subscriber. `RUST_LOG` overrides the configured
/// filter.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&raw).map_err(|e| format!("{}\n\n{}", e, USAGE))?;

    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = CheckoutConfig::load(args.config)?;
    init_tracing(&config.logging.filter);

    let request = read_request(&args.request)?;

    let db = Database::new(DbConfig::from(&config.database)).await?;

    let gateway: Arc<dyn PaymentGateway> = if args.decline {
        Arc::new(DecliningGateway::default())
    } else {
        Arc::new(ApprovingGateway)
    };

    let orchestrator = CheckoutOrchestrator::new(gateway, Arc::new(db.orders()), Arc::new(TracingNotifier))
        .with_confirmation_subject(config.notification.confirmation_subject.clone());

    let outcome = orchestrator.process_checkout(&request.cart, &request.payment).await;
    db.close().await;

    match outcome? {
        Some(order) => info!(order_id = %order.id, total = %order.total, "Checkout complete"),
        None => warn!(user_id = %request.cart.user().id(), "Checkout declined, no order created"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let parsed = parse_args(&args(&["cart.json", "--config", "c.toml", "--decline"])).unwrap();
        assert_eq!(parsed.request, PathBuf::from("cart.json"));
        assert_eq!(parsed.config, Some(PathBuf::from("c.toml")));
        assert!(parsed.decline);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["a.json", "b.json"])).is_err());
        assert!(parse_args(&args(&["a.json", "--config"])).is_err());
        assert!(parse_args(&args(&["a.json", "--verbose"])).is_err());
        assert!(parse_args(&args(&["--help"])).unwrap().help);
    }

    #[test]
    fn test_read_request() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "cart": {{
                    "user": {{"id": "2", "name": "Premium", "email": "premium@example.com", "tier": "premium"}},
                    "items": [{{"name": "Item", "unit_price": 10000}}]
                }},
                "payment": {{"card_number": "1234-5678-9012-3456", "security_code": "123"}}
            }}"#
        )
        .unwrap();

        let request = read_request(file.path()).unwrap();
        assert_eq!(request.cart.len(), 1);
        assert_eq!(request.payment.security_code(), "123");
    }

    #[test]
    fn test_read_request_rejects_negative_price() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "cart": {{
                    "user": {{"id": "1", "name": "S", "email": "s@example.com"}},
                    "items": [{{"name": "Refund", "unit_price": -100}}]
                }},
                "payment": {{"card_number": "1", "security_code": "2"}}
            }}"#
        )
        .unwrap();

        assert!(read_request(file.path()).is_err());
    }

    #[test]
    fn test_read_request_accepts_any_contact_address() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "cart": {{"user": {{"id": "1", "name": "Usuario", "email": "padrao"}}}},
                "payment": {{"card_number": "1", "security_code": "2"}}
            }}"#
        )
        .unwrap();

        let request = read_request(file.path()).unwrap();
        assert_eq!(request.cart.user().email(), "padrao");
    }
}
