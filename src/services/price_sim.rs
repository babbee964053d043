use rand::Rng;

use crate::errors::AppError;

/// Stored prices are currency amounts: two decimal places, never below this.
pub const PRICE_FLOOR: f64 = 0.01;

/// Parameters for a geometric Brownian motion price path.
///
/// Drift and volatility are per time step (daily when `step` is 1.0).
#[derive(Debug, Clone, Copy)]
pub struct GbmParams {
    pub start_price: f64,
    pub drift: f64,
    pub volatility: f64,
    pub horizon: f64,
    pub step: f64,
}

impl GbmParams {
    /// Validates the parameters and returns the number of grid points.
    ///
    /// Degenerate inputs (non-positive start price, horizon or step, negative
    /// volatility, anything non-finite) are rejected outright rather than
    /// producing an empty or divergent path.
    pub fn validate(&self) -> Result<usize, AppError> {
        if !self.start_price.is_finite() || self.start_price <= 0.0 {
            return Err(AppError::Validation(format!(
                "start_price must be positive, got {}",
                self.start_price
            )));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(AppError::Validation(format!(
                "volatility must be non-negative, got {}",
                self.volatility
            )));
        }
        if !self.drift.is_finite() {
            return Err(AppError::Validation(format!(
                "drift must be finite, got {}",
                self.drift
            )));
        }
        if !self.horizon.is_finite() || self.horizon <= 0.0 {
            return Err(AppError::Validation(format!(
                "horizon must be positive, got {}",
                self.horizon
            )));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(AppError::Validation(format!(
                "step must be positive, got {}",
                self.step
            )));
        }

        let n = (self.horizon / self.step) as usize;
        if n == 0 {
            return Err(AppError::Validation(format!(
                "horizon {} shorter than step {}",
                self.horizon, self.step
            )));
        }
        Ok(n)
    }
}

/// Simulates a GBM price path: `N = horizon / step` points on an even time
/// grid, log-price `(drift - volatility²/2)·t + volatility·W(t)` with `W`
/// the running sum of standard-normal draws scaled by `√step`.
///
/// Output is raw; persistence must go through [`round_and_floor`].
pub fn simulate_path<R: Rng>(params: &GbmParams, rng: &mut R) -> Result<Vec<f64>, AppError> {
    let n = params.validate()?;

    let grid_dt = if n > 1 {
        params.horizon / (n as f64 - 1.0)
    } else {
        0.0
    };
    let sqrt_step = params.step.sqrt();
    let half_var = 0.5 * params.volatility * params.volatility;

    let mut prices = Vec::with_capacity(n);
    let mut w = 0.0;
    for i in 0..n {
        w += standard_normal(rng);
        let t = i as f64 * grid_dt;
        let x = (params.drift - half_var) * t + params.volatility * w * sqrt_step;
        prices.push(params.start_price * x.exp());
    }
    Ok(prices)
}

/// Simulates a path and applies the mandatory post-processing: round to
/// cents, then clamp to [`PRICE_FLOOR`]. Every returned value is finite,
/// positive and at two decimal places.
pub fn simulate_prices<R: Rng>(params: &GbmParams, rng: &mut R) -> Result<Vec<f64>, AppError> {
    let path = simulate_path(params, rng)?;
    Ok(path.into_iter().map(round_and_floor).collect())
}

/// Round to two decimal places, then floor at [`PRICE_FLOOR`]. A non-finite
/// input collapses to the floor so nothing unpersistable can leak through.
pub fn round_and_floor(price: f64) -> f64 {
    if !price.is_finite() {
        return PRICE_FLOOR;
    }
    ((price * 100.0).round() / 100.0).max(PRICE_FLOOR)
}

// Box-Muller transform over two uniform draws.
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1 = rng.random::<f64>().max(f64::MIN_POSITIVE); // ln(0) guard
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}
