//! Quote totals calculation.
//!
//! The whole monetary snapshot of a quote is derived here, in one pass,
//! from the jobs and the quote-level percentages. Order matters:
//! discount applies to the subtotal, profit applies after discount, tax
//! (IVA) applies last. No value is rounded between steps - rounding is
//! presentation's job, otherwise the discount/profit/tax chain would
//! compound the error.

use serde::{Deserialize, Serialize};

/// Mexican IVA. Not configurable per call.
pub const TAX_RATE: f64 = 0.16;

/// One material line inside a job. `unit_price` is the price of the
/// material as it was when selected, not a live reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub quantity: f64,
    pub unit_price: f64,
}

impl LineItem {
    /// Derived line total. Recomputed from the parts, never stored as
    /// an independently editable value.
    pub fn total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// Cost inputs of a single job. Physical dimensions are informational
/// and deliberately absent - they never enter the calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobInput {
    pub materials: Vec<LineItem>,
    pub labor_cost: f64,
    pub additional_costs: f64,
}

impl JobInput {
    /// materials + labor + additional costs. A job with no materials
    /// is valid and totals labor + additional costs.
    pub fn total(&self) -> f64 {
        let materials: f64 = self.materials.iter().map(LineItem::total).sum();
        materials + self.labor_cost + self.additional_costs
    }
}

/// Everything the calculation needs, as plain values.
///
/// Range validation (discount in [0, 100], profit in [0, 200],
/// advance >= 0) is the caller's responsibility; the engine computes
/// whatever it is given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteInput {
    pub jobs: Vec<JobInput>,
    pub discount_percentage: f64,
    pub profit_percentage: f64,
    pub advance_payment: f64,
}

/// The full monetary snapshot persisted on a quote, plus the per-job
/// breakdown for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteTotals {
    pub job_totals: Vec<f64>,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub profit_amount: f64,
    pub tax_amount: f64,
    pub total: f64,
    pub remaining_payment: f64,
}

/// Compute every derived monetary field of a quote.
///
/// An empty job list is not an error: all outputs are zero. A negative
/// `remaining_payment` means the advance exceeded the total and is a
/// displayable overpayment, not something to clamp.
pub fn compute(input: &QuoteInput) -> QuoteTotals {
    let job_totals: Vec<f64> = input.jobs.iter().map(JobInput::total).collect();
    let subtotal: f64 = job_totals.iter().sum();

    let discount_amount = subtotal * (input.discount_percentage / 100.0);
    let after_discount = subtotal - discount_amount;
    let profit_amount = after_discount * (input.profit_percentage / 100.0);
    let before_tax = after_discount + profit_amount;
    let tax_amount = before_tax * TAX_RATE;
    let total = before_tax + tax_amount;

    QuoteTotals {
        job_totals,
        subtotal,
        discount_amount,
        profit_amount,
        tax_amount,
        total,
        remaining_payment: total - input.advance_payment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn single_job_input() -> QuoteInput {
        QuoteInput {
            jobs: vec![JobInput {
                materials: vec![LineItem {
                    quantity: 2.0,
                    unit_price: 36.0,
                }],
                labor_cost: 500.0,
                additional_costs: 0.0,
            }],
            discount_percentage: 0.0,
            profit_percentage: 30.0,
            advance_payment: 0.0,
        }
    }

    #[test]
    fn worked_example_single_job() {
        let totals = compute(&single_job_input());

        assert_eq!(totals.job_totals.len(), 1);
        assert!(close(totals.job_totals[0], 572.0));
        assert!(close(totals.subtotal, 572.0));
        assert!(close(totals.discount_amount, 0.0));
        assert!(close(totals.profit_amount, 171.6));
        assert!(close(totals.tax_amount, 118.976));
        assert!(close(totals.total, 862.576));
    }

    #[test]
    fn remaining_payment_goes_negative_on_overpayment() {
        let mut input = single_job_input();
        input.advance_payment = 1000.0;

        let totals = compute(&input);
        assert!(close(totals.remaining_payment, -137.424));
    }

    #[test]
    fn empty_quote_totals_zero() {
        let totals = compute(&QuoteInput::default());

        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.discount_amount, 0.0);
        assert_eq!(totals.profit_amount, 0.0);
        assert_eq!(totals.tax_amount, 0.0);
        assert_eq!(totals.total, 0.0);
        assert!(totals.job_totals.is_empty());
    }

    #[test]
    fn job_without_materials_totals_labor_and_extras() {
        let job = JobInput {
            materials: vec![],
            labor_cost: 300.0,
            additional_costs: 50.0,
        };
        assert!(close(job.total(), 350.0));
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let input = single_job_input();
        assert_eq!(compute(&input), compute(&input));
    }

    #[test]
    fn discount_never_increases_total() {
        let mut prev = f64::INFINITY;
        for discount in [0.0, 10.0, 25.0, 50.0, 75.0, 100.0] {
            let mut input = single_job_input();
            input.discount_percentage = discount;
            let total = compute(&input).total;
            assert!(total <= prev, "discount {discount}% raised the total");
            prev = total;
        }
    }

    #[test]
    fn profit_never_decreases_total() {
        let mut prev = f64::NEG_INFINITY;
        for profit in [0.0, 15.0, 30.0, 60.0, 120.0, 200.0] {
            let mut input = single_job_input();
            input.profit_percentage = profit;
            let total = compute(&input).total;
            assert!(total >= prev, "profit {profit}% lowered the total");
            prev = total;
        }
    }

    #[test]
    fn full_discount_zeroes_everything_downstream() {
        let mut input = single_job_input();
        input.discount_percentage = 100.0;

        let totals = compute(&input);
        assert!(close(totals.discount_amount, 572.0));
        assert!(close(totals.total, 0.0));
    }

    #[test]
    fn multiple_jobs_sum_into_subtotal() {
        let input = QuoteInput {
            jobs: vec![
                JobInput {
                    materials: vec![
                        LineItem {
                            quantity: 3.0,
                            unit_price: 43.0,
                        },
                        LineItem {
                            quantity: 1.5,
                            unit_price: 65.0,
                        },
                    ],
                    labor_cost: 800.0,
                    additional_costs: 120.0,
                },
                JobInput {
                    materials: vec![],
                    labor_cost: 250.0,
                    additional_costs: 0.0,
                },
            ],
            ..Default::default()
        };

        let totals = compute(&input);
        assert!(close(totals.job_totals[0], 129.0 + 97.5 + 800.0 + 120.0));
        assert!(close(totals.job_totals[1], 250.0));
        assert!(close(
            totals.subtotal,
            totals.job_totals[0] + totals.job_totals[1]
        ));
    }

    #[test]
    fn line_total_follows_quantity_and_unit_price() {
        let line = LineItem {
            quantity: 2.5,
            unit_price: 38.0,
        };
        assert!(close(line.total(), 95.0));
    }
}
