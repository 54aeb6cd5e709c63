use anyhow::{bail, Context};
use mpay24::config::Config;
use mpay24::core::init_tracing;
use mpay24::payments::{
    MpayTid, PaymentPageOptions, PaymentRequest, ProfileQuery, RefundOptions, TransactionLookup,
};
use mpay24::PaymentGatewayFacade;
use rust_decimal::Decimal;
use serde::Serialize;

const USAGE: &str = "usage: mpay24 <command> [args]

commands:
  status <mpayTid|tid>        current state of a transaction
  history <mpayTid>           state changes of a transaction
  checkout <amount>           create a payment page for a new transaction
  cancel <mpayTid>            release a reservation
  capture <mpayTid> [amount]  capture a reservation
  refund <mpayTid> [amount]   refund a payment
  profiles [customerId]       list stored payment profiles";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(&config.log_level, config.log_format);

    tracing::info!(
        environment = %config.environment,
        endpoint = %config.environment.endpoint(),
        "Starting mPAY24 client"
    );

    let facade = PaymentGatewayFacade::from_config(&config)?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["status", id] => print(&facade.payment_status(parse_lookup(id)).await?),
        ["history", tid] => print(&facade.payment_history(parse_tid(tid)?).await?),
        ["checkout", amount] => {
            let request = PaymentRequest::new(uuid::Uuid::new_v4().to_string(), parse_amount(amount)?);
            print(&facade.payment_page(&request, PaymentPageOptions::default()).await?)
        }
        ["cancel", tid] => {
            facade.cancel(parse_tid(tid)?).await?;
            print(&serde_json::json!({ "cancelled": tid }))
        }
        ["capture", tid, rest @ ..] => {
            let amount = rest.first().map(|a| parse_amount(a)).transpose()?;
            print(&facade.capture(parse_tid(tid)?, amount).await?)
        }
        ["refund", tid, rest @ ..] => {
            let options = match rest.first() {
                Some(amount) => RefundOptions::amount(parse_amount(amount)?),
                None => RefundOptions::default(),
            };
            print(&facade.refund(parse_tid(tid)?, options).await?)
        }
        ["profiles", rest @ ..] => {
            let query = rest
                .first()
                .map(|customer| ProfileQuery::for_customer(*customer))
                .unwrap_or_default();
            print(&facade.stored_payment_data_list(&query).await?)
        }
        _ => bail!(USAGE),
    }
}

fn parse_tid(value: &str) -> anyhow::Result<MpayTid> {
    let tid = value
        .parse::<u64>()
        .with_context(|| format!("Invalid mPAYTID '{}'", value))?;
    Ok(MpayTid(tid))
}

/// Numeric ids are mPAYTIDs, anything else is a merchant transaction id
fn parse_lookup(value: &str) -> TransactionLookup {
    match value.parse::<u64>() {
        Ok(tid) => TransactionLookup::from(tid),
        Err(_) => TransactionLookup::from(value),
    }
}

fn parse_amount(value: &str) -> anyhow::Result<Decimal> {
    value
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}'", value))
}

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
