//! Discounted cash flow primitives.
//!
//! All flows are end-of-period: `flows[0]` is paid today, `flows[t]` after
//! `t` full periods.

use tracing::trace;

use crate::error::{ComputeError, Result};

const CONVERGENCE_THRESHOLD: f64 = 1e-7;
const MAX_IRR_ITERATIONS: u32 = 100;
const DEFAULT_GUESS: f64 = 0.1;

/// Net Present Value of a series of cash flows at the given discount rate.
pub fn npv(rate: f64, flows: &[f64]) -> f64 {
    flows
        .iter()
        .enumerate()
        .map(|(t, flow)| flow / (1.0 + rate).powi(t as i32))
        .sum()
}

/// Derivative of the NPV with respect to the rate.
fn npv_derivative(rate: f64, flows: &[f64]) -> f64 {
    flows
        .iter()
        .enumerate()
        .skip(1)
        .map(|(t, flow)| -(t as f64) * flow / (1.0 + rate).powi(t as i32 + 1))
        .sum()
}

/// Internal Rate of Return using Newton-Raphson
pub fn irr(flows: &[f64]) -> Result<f64> {
    if flows.len() < 2 {
        return Err(ComputeError::InvalidFlows(
            "IRR requires at least 2 cash flows".into(),
        ));
    }
    if !flows.iter().any(|flow| *flow > 0.0) || !flows.iter().any(|flow| *flow < 0.0) {
        return Err(ComputeError::InvalidFlows(
            "IRR requires at least one inflow and one outflow".into(),
        ));
    }

    let mut rate = DEFAULT_GUESS;

    for iteration in 0..MAX_IRR_ITERATIONS {
        let value = npv(rate, flows);
        if value.abs() < CONVERGENCE_THRESHOLD {
            trace!(rate, iteration, "IRR converged");
            return Ok(rate);
        }

        let derivative = npv_derivative(rate, flows);
        if derivative == 0.0 || !derivative.is_finite() {
            return Err(ComputeError::Convergence(format!(
                "IRR derivative vanished at rate {rate} after {iteration} iterations"
            )));
        }

        rate -= value / derivative;

        // Guard against divergence
        if !rate.is_finite() {
            return Err(ComputeError::Convergence(format!(
                "IRR rate diverged after {iteration} iterations"
            )));
        }
        rate = rate.clamp(-0.99, 100.0);
    }

    Err(ComputeError::Convergence(format!(
        "IRR did not converge within {MAX_IRR_ITERATIONS} iterations, residual NPV {}",
        npv(rate, flows)
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npv_basic() {
        let flows = vec![-1000.0, 300.0, 400.0, 500.0];
        let result = npv(0.10, &flows);
        // NPV at 10%: -1000 + 300/1.1 + 400/1.21 + 500/1.331 ≈ -21.04
        assert!((result - (-21.04)).abs() < 1.0);
    }

    #[test]
    fn test_npv_zero_rate() {
        let flows = vec![-100.0, 50.0, 50.0, 50.0];
        assert!((npv(0.0, &flows) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_irr_basic() {
        let flows = vec![-1000.0, 500.0, 500.0, 500.0];
        let result = irr(&flows).unwrap();
        // IRR should be ~23.375%
        assert!((result - 0.23375).abs() < 1e-4);
        assert!(npv(result, &flows).abs() < 1e-6);
    }

    #[test]
    fn test_irr_exact_rate() {
        // -1000 + 1331/(1.1)^3 = 0, so the rate is exactly 10%
        let flows = vec![-1000.0, 0.0, 0.0, 1331.0];
        let result = irr(&flows).unwrap();
        assert!((result - 0.10).abs() < 1e-6);
    }

    #[test]
    fn test_irr_rejects_short_series() {
        assert!(matches!(
            irr(&[-100.0]),
            Err(ComputeError::InvalidFlows(_))
        ));
        assert!(matches!(irr(&[]), Err(ComputeError::InvalidFlows(_))));
    }

    #[test]
    fn test_irr_rejects_one_sided_flows() {
        assert!(matches!(
            irr(&[-100.0, -50.0, -25.0]),
            Err(ComputeError::InvalidFlows(_))
        ));
        assert!(matches!(
            irr(&[100.0, 50.0, 25.0]),
            Err(ComputeError::InvalidFlows(_))
        ));
    }
}
