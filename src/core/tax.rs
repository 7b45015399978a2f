use std::collections::BTreeMap;

use super::types::IncomeBreakdown;

/// PAYE bands as (inclusive upper bound, marginal rate), lowest first.
const PAYE_BANDS: [(f64, f64); 5] = [
    (24_000.0, 0.10),
    (32_333.0, 0.25),
    (500_000.0, 0.30),
    (800_000.0, 0.325),
    (f64::INFINITY, 0.35),
];

/// Monthly personal relief subtracted from band tax.
pub const PERSONAL_RELIEF: f64 = 2_400.0;

/// SHA contribution by gross salary, (inclusive upper bound, amount).
const HEALTH_BANDS: [(f64, f64); 16] = [
    (5_999.0, 150.0),
    (7_999.0, 300.0),
    (11_999.0, 400.0),
    (14_999.0, 500.0),
    (19_999.0, 600.0),
    (24_999.0, 750.0),
    (29_999.0, 850.0),
    (34_999.0, 900.0),
    (39_999.0, 950.0),
    (44_999.0, 1_000.0),
    (49_999.0, 1_100.0),
    (59_999.0, 1_200.0),
    (69_999.0, 1_300.0),
    (79_999.0, 1_400.0),
    (89_999.0, 1_500.0),
    (99_999.0, 1_600.0),
];
const HEALTH_TOP_AMOUNT: f64 = 1_700.0;

pub const PENSION_RATE: f64 = 0.06;
/// Pensionable salary ceiling (upper tier).
pub const PENSION_CEILING: f64 = 36_000.0;

pub fn compute_breakdown(
    gross_salary: f64,
    fixed_expenses: &BTreeMap<String, f64>,
) -> IncomeBreakdown {
    let paye_tax = paye_tax(gross_salary);
    let health_deduction = health_deduction(gross_salary);
    let pension_deduction = pension_deduction(gross_salary);
    let total_statutory_deductions = paye_tax + health_deduction + pension_deduction;

    let total_fixed_expenses: f64 = fixed_expenses.values().sum();
    let net_salary_after_tax = gross_salary - total_statutory_deductions;

    IncomeBreakdown {
        gross_salary,
        paye_tax,
        health_deduction,
        pension_deduction,
        total_statutory_deductions,
        net_salary_after_tax,
        total_fixed_expenses,
        remaining_for_savings_investment: net_salary_after_tax - total_fixed_expenses,
    }
}

pub fn paye_tax(gross_salary: f64) -> f64 {
    (band_tax(gross_salary) - PERSONAL_RELIEF).max(0.0)
}

/// Progressive tax before relief: each band only taxes its own slice.
fn band_tax(gross_salary: f64) -> f64 {
    let mut tax = 0.0;
    let mut lower = 0.0;
    for (upper, rate) in PAYE_BANDS {
        if gross_salary <= lower {
            break;
        }
        tax += (gross_salary.min(upper) - lower) * rate;
        lower = upper;
    }
    tax
}

pub fn health_deduction(gross_salary: f64) -> f64 {
    HEALTH_BANDS
        .iter()
        .find(|(upper, _)| gross_salary <= *upper)
        .map(|(_, amount)| *amount)
        .unwrap_or(HEALTH_TOP_AMOUNT)
}

pub fn pension_deduction(gross_salary: f64) -> f64 {
    (gross_salary * PENSION_RATE).min(PENSION_CEILING * PENSION_RATE)
}
