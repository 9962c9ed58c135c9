//! Quote a deal from the command line
//!
//! Prints the quote (or a term × down payment grid) as JSON. Program tables
//! come from `--config-dir` when given, showroom defaults otherwise.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use deal_quote_engine::assumptions::{load_from_dir, BaseValueTable, DealAssumptions};
use deal_quote_engine::deal::{
    Condition, FinancingMethod, LeadQuoteSummary, ProtectionSelection, ProtectionTreatment,
    QuoteConfig, QuoteEngine, QuoteRequest, TradeIn, TradeInDescription, VehiclePricing,
};
use deal_quote_engine::Money;

#[derive(Parser, Debug)]
#[command(name = "quote_deal", about = "Lease and finance quotes for a selected vehicle")]
struct Args {
    /// Vehicle sale price
    #[arg(long)]
    sale_price: Money,

    /// Vehicle MSRP (defaults to the sale price)
    #[arg(long)]
    msrp: Option<Money>,

    /// lease or finance
    #[arg(long, default_value = "lease")]
    method: FinancingMethod,

    /// Term in months (program default when omitted)
    #[arg(long)]
    term: Option<u32>,

    /// APR in percent, finance only (program default when omitted)
    #[arg(long)]
    apr: Option<f64>,

    /// Cash down payment
    #[arg(long, default_value_t = 0)]
    down: Money,

    /// Trade-in model year
    #[arg(long, requires_all = ["trade_make", "trade_model", "trade_mileage"])]
    trade_year: Option<i32>,

    #[arg(long)]
    trade_make: Option<String>,

    #[arg(long)]
    trade_model: Option<String>,

    #[arg(long)]
    trade_mileage: Option<u32>,

    /// excellent, good, fair or poor
    #[arg(long, default_value = "good")]
    trade_condition: Condition,

    /// Outstanding loan balance on the trade-in
    #[arg(long)]
    trade_payoff: Option<Money>,

    /// Protection package id from the catalog (repeatable)
    #[arg(long = "protection")]
    protection: Vec<String>,

    /// Bill protection separately instead of rolling it into the payment
    #[arg(long)]
    itemize_protection: bool,

    /// Directory with deal_program.json / lease_residuals.csv / trade_in_base_values.csv
    #[arg(long)]
    config_dir: Option<String>,

    /// Print a payment grid for these down payments instead of a single quote
    #[arg(long, value_delimiter = ',')]
    matrix: Vec<Money>,

    /// Print the lead submission summary alongside the quote
    #[arg(long)]
    lead: bool,
}

fn load_tables(config_dir: Option<&str>) -> Result<(DealAssumptions, BaseValueTable)> {
    match config_dir {
        Some(dir) => {
            let loaded = load_from_dir(dir)
                .with_context(|| format!("failed to load deal program from {}", dir))?;
            Ok((loaded.assumptions, loaded.base_values))
        }
        None => {
            let base_values = BaseValueTable::default_showroom()
                .context("failed to parse bundled trade-in values")?;
            Ok((DealAssumptions::default_showroom(), base_values))
        }
    }
}

fn build_request(args: &Args, assumptions: &DealAssumptions) -> Result<QuoteRequest> {
    let mut protection = ProtectionSelection::new();
    for id in &args.protection {
        let Some(package) = assumptions.protection.get(id) else {
            bail!("unknown protection package: {}", id);
        };
        protection.insert(package.clone());
    }

    let trade_in = match (&args.trade_year, &args.trade_make, &args.trade_model, &args.trade_mileage) {
        (Some(year), Some(make), Some(model), Some(mileage)) => Some(TradeIn {
            description: TradeInDescription {
                year: *year,
                make: make.clone(),
                model: model.clone(),
                trim: None,
                mileage_miles: *mileage,
                condition: args.trade_condition,
                vin: None,
            },
            payoff_amount: args.trade_payoff,
            estimate: None,
        }),
        _ => None,
    };

    Ok(QuoteRequest {
        pricing: VehiclePricing::new(args.sale_price, args.msrp.unwrap_or(args.sale_price)),
        financing_method: args.method,
        term_months: args.term,
        apr: args.apr,
        down_payment: args.down,
        trade_in,
        protection,
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (assumptions, base_values) = load_tables(args.config_dir.as_deref())?;
    let config = QuoteConfig {
        protection_treatment: if args.itemize_protection {
            ProtectionTreatment::Itemized
        } else {
            ProtectionTreatment::Capitalized
        },
    };
    let request = build_request(&args, &assumptions)?;
    let engine = QuoteEngine::new(assumptions, config, base_values);

    if !args.matrix.is_empty() {
        info!("quoting {} grid for {} down payments", request.financing_method, args.matrix.len());
        let cells = engine.payment_matrix(&request, &args.matrix);
        println!("{}", serde_json::to_string_pretty(&cells)?);
        return Ok(());
    }

    let quote = engine.build_quote(&request);
    if args.lead {
        let output = serde_json::json!({
            "quote": quote,
            "lead": LeadQuoteSummary::new(&request, &quote),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    }

    Ok(())
}
