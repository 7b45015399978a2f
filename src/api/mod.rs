use axum::{
    Router,
    extract::{Json, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::core::{
    IncomeBreakdown, RateQuote, SavingsGoal, Suggestion, compute_breakdown, suggest,
};
use crate::feed::{JsonFileFeed, RateFeed, StaticFeed, load_quotes, quotes_from_values};

pub mod report;

#[derive(Parser, Debug)]
#[command(
    name = "smart-money",
    about = "Monthly PAYE/SHA/NSSF breakdown and money market fund suggestions for a savings goal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the monthly breakdown and rank fund offers against a goal
    Plan(PlanArgs),
    /// List the quotes in a rate feed file
    Rates {
        #[arg(long)]
        rates_file: PathBuf,
    },
    /// Serve the JSON API
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[arg(long, allow_hyphen_values = true, help = "Monthly gross salary in KES")]
    pub gross_salary: f64,
    #[arg(
        long = "expense",
        value_name = "NAME=AMOUNT",
        value_parser = parse_expense_flag,
        help = "Fixed monthly expense, repeatable, e.g. --expense Rent=15000"
    )]
    pub expenses: Vec<(String, f64)>,
    #[arg(long, default_value_t = 0.0, help = "Savings goal target amount in KES")]
    pub goal_amount: f64,
    #[arg(long, default_value_t = 1, help = "Months to reach the savings goal")]
    pub goal_months: u32,
    #[arg(
        long = "rate",
        value_name = "NAME=RATE",
        value_parser = parse_rate_flag,
        help = "Fund rate quote, repeatable, e.g. --rate \"Etica MMF=12.25%\""
    )]
    pub rates: Vec<RateQuote>,
    #[arg(long, help = "JSON file of {name, rate} quotes, read before any --rate flags")]
    pub rates_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    #[arg(
        long,
        help = "JSON file of {name, rate} quotes, read once at startup and used when a request carries none"
    )]
    pub rates_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub gross_salary: f64,
    /// Expenses in the order they were entered.
    pub fixed_expenses: Vec<(String, f64)>,
    pub goal: SavingsGoal,
    pub quotes: Vec<RateQuote>,
}

impl PlanRequest {
    pub fn expense_map(&self) -> BTreeMap<String, f64> {
        self.fixed_expenses.iter().cloned().collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PlanPayload {
    gross_salary: Option<f64>,
    fixed_expenses: Option<BTreeMap<String, f64>>,
    goal_amount: Option<f64>,
    goal_months: Option<u32>,
    rates: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub breakdown: IncomeBreakdown,
    pub goal: SavingsGoal,
    pub required_monthly_deposit: f64,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Serialize)]
struct RatesResponse {
    quotes: Vec<RateQuote>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Clone)]
struct AppState {
    feed: Arc<dyn RateFeed>,
}

fn parse_expense_flag(raw: &str) -> Result<(String, f64), String> {
    let (name, amount) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=AMOUNT, got '{raw}'"))?;
    let amount = amount
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid amount in '{raw}': {e}"))?;
    Ok((name.trim().to_string(), amount))
}

fn parse_rate_flag(raw: &str) -> Result<RateQuote, String> {
    let (name, rate) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=RATE, got '{raw}'"))?;
    Ok(RateQuote::text(name.trim(), rate.trim()))
}

pub fn build_request(args: PlanArgs) -> Result<PlanRequest, String> {
    if !args.gross_salary.is_finite() || args.gross_salary < 0.0 {
        return Err("--gross-salary must be >= 0".to_string());
    }

    let mut fixed_expenses: Vec<(String, f64)> = Vec::with_capacity(args.expenses.len());
    for (name, amount) in args.expenses {
        if name.trim().is_empty() {
            return Err("--expense names cannot be empty".to_string());
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(format!("--expense {name} must be >= 0"));
        }
        if fixed_expenses.iter().any(|(seen, _)| *seen == name) {
            return Err(format!("--expense {name} was given more than once"));
        }
        fixed_expenses.push((name, amount));
    }

    if !args.goal_amount.is_finite() || args.goal_amount < 0.0 {
        return Err("--goal-amount must be >= 0".to_string());
    }

    if args.goal_months == 0 {
        return Err("--goal-months must be >= 1".to_string());
    }

    Ok(PlanRequest {
        gross_salary: args.gross_salary,
        fixed_expenses,
        goal: SavingsGoal::new(args.goal_amount, args.goal_months),
        quotes: args.rates,
    })
}

pub fn build_plan_response(request: &PlanRequest) -> PlanResponse {
    let breakdown = compute_breakdown(request.gross_salary, &request.expense_map());
    tracing::debug!(
        remaining = breakdown.remaining_for_savings_investment,
        quotes = request.quotes.len(),
        "computed income breakdown"
    );
    let suggestions = suggest(
        breakdown.remaining_for_savings_investment,
        &request.goal,
        &request.quotes,
    );
    PlanResponse {
        breakdown,
        goal: request.goal,
        required_monthly_deposit: request.goal.required_monthly_deposit(),
        suggestions,
    }
}

/// Runs the `plan` subcommand and returns the rendered report.
pub fn run_plan_command(args: PlanArgs) -> Result<String, String> {
    let rates_file = args.rates_file.clone();
    let mut request = build_request(args)?;

    if let Some(path) = rates_file {
        let mut quotes = load_quotes(&JsonFileFeed::new(path));
        quotes.append(&mut request.quotes);
        request.quotes = quotes;
    }

    let response = build_plan_response(&request);
    Ok(report::render_plan(&request, &response))
}

pub fn run_rates_command(rates_file: PathBuf) -> String {
    report::render_quotes(&load_quotes(&JsonFileFeed::new(rates_file)))
}

pub async fn run_http_server(args: ServeArgs) -> std::io::Result<()> {
    let feed = startup_feed(args.rates_file);
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let app = router(AppState { feed });

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "smart money API listening");
    tracing::info!("Local access: http://127.0.0.1:{}/api/plan", args.port);

    axum::serve(listener, app).await
}

/// Reads the rates file once so request handlers never touch the disk.
fn startup_feed(rates_file: Option<PathBuf>) -> Arc<dyn RateFeed> {
    let quotes = match rates_file {
        Some(path) => load_quotes(&JsonFileFeed::new(path)),
        None => Vec::new(),
    };
    Arc::new(StaticFeed::new(quotes))
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/plan", post(plan_post_handler))
        .route("/api/rates", get(rates_handler))
        .fallback(not_found_handler)
        .with_state(state)
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn rates_handler(State(state): State<AppState>) -> Response {
    let quotes = load_quotes(state.feed.as_ref());
    json_response(StatusCode::OK, RatesResponse { quotes })
}

async fn plan_post_handler(
    State(state): State<AppState>,
    payload: Result<Json<PlanPayload>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                &format!("Invalid API JSON payload: {}", rejection.body_text()),
            );
        }
    };
    let request = match api_request_from_payload(payload, state.feed.as_ref()) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };
    json_response(StatusCode::OK, build_plan_response(&request))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str, feed: &dyn RateFeed) -> Result<PlanRequest, String> {
    let payload = serde_json::from_str::<PlanPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload, feed)
}

fn api_request_from_payload(
    payload: PlanPayload,
    feed: &dyn RateFeed,
) -> Result<PlanRequest, String> {
    let mut args = default_args_for_api();

    let Some(gross_salary) = payload.gross_salary else {
        return Err("grossSalary is required".to_string());
    };
    args.gross_salary = gross_salary;

    if let Some(v) = payload.fixed_expenses {
        args.expenses = v.into_iter().collect();
    }
    if let Some(v) = payload.goal_amount {
        args.goal_amount = v;
    }
    if let Some(v) = payload.goal_months {
        args.goal_months = v;
    }

    let quotes = match payload.rates {
        Some(entries) => quotes_from_values(entries),
        None => load_quotes(feed),
    };
    args.rates = quotes;

    build_request(args)
}

fn default_args_for_api() -> PlanArgs {
    PlanArgs {
        gross_salary: 0.0,
        expenses: Vec::new(),
        goal_amount: 0.0,
        goal_months: 1,
        rates: Vec::new(),
        rates_file: None,
    }
}
