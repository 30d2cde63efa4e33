//! Attribution model library: one pure weighting rule per model.
//!
//! Every rule maps a journey's touchpoints to a credit vector with one weight
//! per touchpoint. Weights always sum to 1.0, so a journey's conversion value
//! is fully distributed under every model.

use attribution_core::types::{Journey, Touchpoint};
use attribution_core::AttributionModel;

/// Half-life of the time-decay model, in days.
pub const TIME_DECAY_HALF_LIFE_DAYS: f64 = 7.0;

/// Tolerance for the weight-sum contract.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

const U_SHAPED_ENDPOINT: f64 = 0.40;
const U_SHAPED_MIDDLE: f64 = 0.20;
const W_SHAPED_ANCHOR: f64 = 0.30;
const W_SHAPED_REST: f64 = 0.10;

/// Credit weights for `journey` under `model`, in touchpoint order.
pub fn weights(model: AttributionModel, journey: &Journey) -> Vec<f64> {
    weights_for(model, &journey.touchpoints)
}

/// Credit weights for an ordered touchpoint slice.
pub fn weights_for(model: AttributionModel, touchpoints: &[Touchpoint]) -> Vec<f64> {
    let n = touchpoints.len();
    let weights = match model {
        AttributionModel::FirstTouch => single_credit(n, 0),
        AttributionModel::LastTouch => single_credit(n, n.saturating_sub(1)),
        AttributionModel::LastNonDirect => last_non_direct(touchpoints),
        AttributionModel::Linear => linear(n),
        AttributionModel::TimeDecay => time_decay(touchpoints),
        AttributionModel::UShaped => u_shaped(n),
        AttributionModel::WShaped => w_shaped(n),
    };
    debug_assert!(
        is_distribution(&weights),
        "{model} weights do not sum to 1.0: {weights:?}"
    );
    weights
}

/// True when `weights` is empty or sums to 1.0 within tolerance.
pub fn is_distribution(weights: &[f64]) -> bool {
    weights.is_empty() || (weights.iter().sum::<f64>() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
}

/// Raw (unnormalized) time-decay weight for a touchpoint `days` before conversion.
pub fn decay_factor(days_before_conversion: u32) -> f64 {
    2f64.powf(-(days_before_conversion as f64) / TIME_DECAY_HALF_LIFE_DAYS)
}

fn single_credit(n: usize, idx: usize) -> Vec<f64> {
    let mut weights = vec![0.0; n];
    if let Some(w) = weights.get_mut(idx) {
        *w = 1.0;
    }
    weights
}

fn last_non_direct(touchpoints: &[Touchpoint]) -> Vec<f64> {
    let n = touchpoints.len();
    let idx = touchpoints
        .iter()
        .rposition(|t| !t.is_direct())
        .unwrap_or(n.saturating_sub(1));
    single_credit(n, idx)
}

fn linear(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    vec![1.0 / n as f64; n]
}

fn time_decay(touchpoints: &[Touchpoint]) -> Vec<f64> {
    let raw: Vec<f64> = touchpoints
        .iter()
        .map(|t| decay_factor(t.days_before_conversion))
        .collect();
    let total: f64 = raw.iter().sum();
    if total <= 0.0 {
        return linear(touchpoints.len());
    }
    raw.into_iter().map(|w| w / total).collect()
}

fn u_shaped(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![1.0],
        // No middle share to hand out: 0.40/0.40 renormalized.
        2 => vec![0.5, 0.5],
        _ => {
            let mut weights = vec![U_SHAPED_MIDDLE / (n - 2) as f64; n];
            weights[0] = U_SHAPED_ENDPOINT;
            weights[n - 1] = U_SHAPED_ENDPOINT;
            weights
        }
    }
}

/// Index of the key middle touchpoint: the median of the positions strictly
/// between first and last. With an even number of middles the later of the
/// two central positions wins.
fn w_shaped_key(n: usize) -> usize {
    n / 2
}

fn w_shaped(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![1.0],
        // 0.30 + 0.30 plus the redistributed middle 0.30, renormalized.
        2 => vec![0.5, 0.5],
        _ => {
            let key = w_shaped_key(n);
            let rest = n - 3;
            let mut weights = vec![0.0; n];
            if rest == 0 {
                // Nobody to receive the 0.10 share; it goes to the endpoints.
                weights[0] = W_SHAPED_ANCHOR + W_SHAPED_REST / 2.0;
                weights[n - 1] = W_SHAPED_ANCHOR + W_SHAPED_REST / 2.0;
            } else {
                let share = W_SHAPED_REST / rest as f64;
                weights.iter_mut().for_each(|w| *w = share);
                weights[0] = W_SHAPED_ANCHOR;
                weights[n - 1] = W_SHAPED_ANCHOR;
            }
            weights[key] = W_SHAPED_ANCHOR;
            weights
        }
    }
}
