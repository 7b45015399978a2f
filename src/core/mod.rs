mod advisor;
pub mod format;
mod tax;
mod types;

pub use advisor::{
    TOP_OFFER_LIMIT, best_pick, goal_feasibility, parse_quote, project_return, rank_offers,
    suggest,
};
pub use tax::{
    PENSION_CEILING, PENSION_RATE, PERSONAL_RELIEF, compute_breakdown, health_deduction,
    paye_tax, pension_deduction,
};
pub use types::{
    IncomeBreakdown, ProjectedReturn, QuoteRate, RankedOffer, RateOffer, RateQuote, SavingsGoal,
    Suggestion,
};
