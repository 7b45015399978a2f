use super::format::{kes, percent};
use super::types::{
    ProjectedReturn, QuoteRate, RankedOffer, RateOffer, RateQuote, SavingsGoal, Suggestion,
};

/// Number of offers kept after ranking.
pub const TOP_OFFER_LIMIT: usize = 5;

const NO_FUNDS_MESSAGE: &str = "No funds available for investment after expenses.";
const NO_BEST_PICK_MESSAGE: &str = "No fund rate data available to make a recommendation.";
const NO_RANKING_MESSAGE: &str = "Could not fetch reliable fund rates at this time.";

pub fn suggest(remaining_funds: f64, goal: &SavingsGoal, quotes: &[RateQuote]) -> Vec<Suggestion> {
    if remaining_funds <= 0.0 {
        return vec![Suggestion::Warning {
            message: NO_FUNDS_MESSAGE.to_string(),
        }];
    }

    let mut results = Vec::new();
    let monthly_deposit = goal.required_monthly_deposit();
    let months = goal.effective_months();

    if let Some(feasibility) = goal_feasibility(remaining_funds, goal) {
        results.push(feasibility);
    }

    let ranked = rank_offers(quotes, monthly_deposit, months);
    results.push(best_pick(&ranked));

    if ranked.is_empty() {
        results.push(Suggestion::Error {
            message: NO_RANKING_MESSAGE.to_string(),
        });
    } else {
        results.push(Suggestion::Header {
            message: format!("Top {TOP_OFFER_LIMIT} money market funds based on current rates:"),
        });
        results.extend(ranked.into_iter().map(Suggestion::RankedOffer));
    }

    results
}

/// On-track or shortfall notice; `None` when no goal amount is set.
pub fn goal_feasibility(remaining_funds: f64, goal: &SavingsGoal) -> Option<Suggestion> {
    if goal.target_amount <= 0.0 {
        return None;
    }

    let months = goal.effective_months();
    let monthly_deposit = goal.required_monthly_deposit();
    if remaining_funds >= monthly_deposit {
        Some(Suggestion::Info {
            message: format!(
                "To reach your goal of {} in {months} months, you're on track by saving {} per month.",
                kes(goal.target_amount),
                kes(monthly_deposit),
            ),
        })
    } else {
        let shortfall = monthly_deposit - remaining_funds;
        Some(Suggestion::Warning {
            message: format!(
                "You need to save {} per month, but you're short by {}.",
                kes(monthly_deposit),
                kes(shortfall),
            ),
        })
    }
}

/// Parses quotes, projects each one and keeps the best `TOP_OFFER_LIMIT` by rate.
/// The sort is stable, so equal rates keep their feed order.
pub fn rank_offers(quotes: &[RateQuote], monthly_deposit: f64, months: u32) -> Vec<RankedOffer> {
    let mut ranked: Vec<RankedOffer> = quotes
        .iter()
        .filter_map(|quote| {
            let parsed = parse_quote(quote);
            if parsed.is_none() {
                tracing::debug!(name = %quote.name, rate = ?quote.rate, "dropping unparseable rate quote");
            }
            parsed
        })
        .map(|offer| {
            let projection = project_return(monthly_deposit, offer.annual_rate, months);
            RankedOffer {
                name: offer.name,
                annual_rate: offer.annual_rate,
                total_deposits: projection.total_deposits,
                interest_earned: projection.interest_earned,
                projected_return: projection.future_value,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.annual_rate.total_cmp(&a.annual_rate));
    ranked.truncate(TOP_OFFER_LIMIT);
    ranked
}

pub fn parse_quote(quote: &RateQuote) -> Option<RateOffer> {
    let name = quote.name.trim();
    if name.is_empty() {
        return None;
    }
    let value = match &quote.rate {
        QuoteRate::Number(value) => *value,
        QuoteRate::Text(text) => parse_percent_text(text)?,
    };
    if !value.is_finite() {
        return None;
    }
    Some(RateOffer {
        name: name.to_string(),
        annual_rate: value / 100.0,
    })
}

fn parse_percent_text(text: &str) -> Option<f64> {
    text.replace('%', "").trim().parse::<f64>().ok()
}

/// Future value of a fixed monthly deposit compounding at `annual_rate / 12`.
pub fn project_return(monthly_deposit: f64, annual_rate: f64, months: u32) -> ProjectedReturn {
    let r = annual_rate / 12.0;
    let total_deposits = monthly_deposit * f64::from(months);

    if r == 0.0 {
        return ProjectedReturn {
            total_deposits,
            interest_earned: 0.0,
            future_value: total_deposits,
        };
    }

    let growth = (1.0 + r).powf(f64::from(months));
    let future_value = monthly_deposit * ((growth - 1.0) / r);
    ProjectedReturn {
        total_deposits,
        interest_earned: future_value - total_deposits,
        future_value,
    }
}

pub fn best_pick(ranked: &[RankedOffer]) -> Suggestion {
    let Some(best) = ranked.first() else {
        return Suggestion::Error {
            message: NO_BEST_PICK_MESSAGE.to_string(),
        };
    };

    Suggestion::BestPick {
        message: format!(
            "Top recommendation: {} with an annual rate of {}. \
             You'll earn approximately {} in interest over your savings period, \
             bringing your total to {}.",
            best.name,
            percent(best.annual_rate),
            kes(best.interest_earned),
            kes(best.projected_return),
        ),
        offer: best.clone(),
    }
}
