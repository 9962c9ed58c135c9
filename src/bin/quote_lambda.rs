//! AWS Lambda handler serving quotes to the kiosk over HTTP
//!
//! POST a JSON `QuoteRequest`, receive a JSON `DealQuote`. Program tables are
//! read once per cold start from `DEAL_CONFIG_DIR` (showroom defaults when unset).

use std::sync::Arc;

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::{info, warn};

use deal_quote_engine::assumptions::{load_from_dir, BaseValueTable, DealAssumptions};
use deal_quote_engine::deal::{ProtectionTreatment, QuoteConfig, QuoteEngine, QuoteRequest};

type Engine = QuoteEngine<BaseValueTable>;

fn build_engine() -> Result<Engine, Error> {
    let treatment = match std::env::var("PROTECTION_TREATMENT").as_deref() {
        Ok("itemized") => ProtectionTreatment::Itemized,
        _ => ProtectionTreatment::Capitalized,
    };
    let config = QuoteConfig {
        protection_treatment: treatment,
    };

    match std::env::var("DEAL_CONFIG_DIR") {
        Ok(dir) => {
            info!("loading deal program from {}", dir);
            let loaded = load_from_dir(&dir)?;
            Ok(QuoteEngine::new(loaded.assumptions, config, loaded.base_values))
        }
        Err(_) => Ok(QuoteEngine::new(
            DealAssumptions::default_showroom(),
            config,
            BaseValueTable::default_showroom()?,
        )),
    }
}

fn json_response(status: u16, body: String) -> Result<Response<Body>, Error> {
    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body))?;
    Ok(response)
}

async fn handle(engine: &Engine, event: Request) -> Result<Response<Body>, Error> {
    let request: QuoteRequest = match serde_json::from_slice(event.body().as_ref()) {
        Ok(request) => request,
        Err(err) => {
            warn!("rejecting malformed quote request: {}", err);
            let body = serde_json::json!({ "error": err.to_string() }).to_string();
            return json_response(400, body);
        }
    };

    let quote = engine.build_quote(&request);
    json_response(200, serde_json::to_string(&quote)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let engine = Arc::new(build_engine()?);
    run(service_fn(move |event: Request| {
        let engine = Arc::clone(&engine);
        async move { handle(&engine, event).await }
    }))
    .await
}
