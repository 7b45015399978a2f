//! Plain-text rendering of a plan for the terminal.

use std::fmt::Write;

use super::{PlanRequest, PlanResponse};
use crate::core::format::{kes, percent};
use crate::core::{IncomeBreakdown, QuoteRate, RateQuote, Suggestion};

pub fn render_plan(request: &PlanRequest, response: &PlanResponse) -> String {
    let mut out = render_breakdown(&response.breakdown, request);
    out.push('\n');
    out.push_str("--- Investment Suggestions ---\n");
    out.push_str(&render_suggestions(&response.suggestions));
    out
}

pub fn render_breakdown(breakdown: &IncomeBreakdown, request: &PlanRequest) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Your Monthly Financial Breakdown ---");
    let _ = writeln!(out, "Gross Salary: {}", kes(breakdown.gross_salary));
    let _ = writeln!(out, "PAYE Tax: {}", kes(breakdown.paye_tax));
    let _ = writeln!(out, "SHA Deduction: {}", kes(breakdown.health_deduction));
    let _ = writeln!(out, "NSSF Deduction: {}", kes(breakdown.pension_deduction));
    let _ = writeln!(
        out,
        "Total Statutory Deductions: {}",
        kes(breakdown.total_statutory_deductions)
    );
    let _ = writeln!(
        out,
        "Net Salary (After Tax & Deductions): {}",
        kes(breakdown.net_salary_after_tax)
    );

    let _ = writeln!(out, "\nFixed Expenses:");
    for (category, amount) in &request.fixed_expenses {
        let _ = writeln!(out, "  {category}: {}", kes(*amount));
    }
    let _ = writeln!(
        out,
        "Total Fixed Expenses: {}",
        kes(breakdown.total_fixed_expenses)
    );
    let _ = writeln!(
        out,
        "\nRemaining for Savings & Investment: {}",
        kes(breakdown.remaining_for_savings_investment)
    );
    out
}

pub fn render_suggestions(suggestions: &[Suggestion]) -> String {
    let mut out = String::new();
    for suggestion in suggestions {
        let _ = writeln!(out, "{}", suggestion_line(suggestion));
    }
    out
}

fn suggestion_line(suggestion: &Suggestion) -> String {
    match suggestion {
        Suggestion::Header { message } => format!("== {message} =="),
        Suggestion::Info { message } => format!("[INFO] {message}"),
        Suggestion::Warning { message } => format!("[WARNING] {message}"),
        Suggestion::Error { message } => format!("[ERROR] {message}"),
        Suggestion::BestPick { message, .. } => format!("* {message}"),
        Suggestion::RankedOffer(offer) => format!(
            "  {} - Rate: {}, Deposits: {}, Interest: {}, Projected Return: {}",
            offer.name,
            percent(offer.annual_rate),
            kes(offer.total_deposits),
            kes(offer.interest_earned),
            kes(offer.projected_return),
        ),
    }
}

pub fn render_quotes(quotes: &[RateQuote]) -> String {
    if quotes.is_empty() {
        return "No rate quotes available.\n".to_string();
    }
    let mut out = String::new();
    for quote in quotes {
        let rate = match &quote.rate {
            QuoteRate::Text(text) => text.clone(),
            QuoteRate::Number(value) => format!("{value}%"),
        };
        let _ = writeln!(out, "{}: {rate}", quote.name);
    }
    out
}
