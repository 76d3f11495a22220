use std::collections::BTreeMap;

use crate::{
	attribute::{Attribute, AttributeBag},
	model::{Feature, Weights},
	position::Position,
};

pub type Scales = BTreeMap<Attribute, f64>;

#[derive(Clone, Debug, Default)]
pub struct ScoreOptions {
	pub include_position_dummies: bool,
	/// When set, features missing from `scales` get scale 0 instead of 1.
	pub only_listed: bool,
	pub scales: Scales,
	pub hand_bonus: f64,
}
impl ScoreOptions {
	pub fn with_dummies() -> Self {
		Self { include_position_dummies: true, ..Self::default() }
	}

	pub fn scaled(scales: Scales) -> Self {
		Self { scales, ..Self::default() }
	}

	pub fn scale_for(&self, attr: Attribute) -> f64 {
		match self.scales.get(&attr) {
			Some(scale) => *scale,
			None if self.only_listed => 0.0,
			None => 1.0,
		}
	}
}

/// Weighted-sum evaluation with present-only renormalization.
///
/// Absent attributes add nothing to the dot product and are left out of both weight sums. The
/// scaled dot product is multiplied by `sum|w| / sum|w * scale|` over present features, so scales
/// shift emphasis between present features without changing the overall magnitude.
///
/// Returns `None` when no weighted attribute is present on the card.
pub fn score(
	attrs: &AttributeBag,
	position: Option<Position>,
	weights: &Weights,
	intercept: f64,
	options: &ScoreOptions,
) -> Option<f64> {
	let mut dummy = 0.0;
	let mut dot = 0.0;
	let mut sum_abs = 0.0;
	let mut sum_abs_scaled = 0.0;
	let mut present = 0_usize;

	for (feature, weight) in weights {
		match feature {
			Feature::Indicator(indicator) => {
				if options.include_position_dummies && position == Some(*indicator) {
					dummy += weight;
				}
			},
			Feature::Attribute(attr) => {
				let Some(value) = attrs.get(*attr) else {
					continue;
				};
				let scale = options.scale_for(*attr);

				dot += value * weight * scale;
				sum_abs += weight.abs();
				sum_abs_scaled += (weight * scale).abs();
				present += 1;
			},
		}
	}

	if present == 0 {
		return None;
	}
	if sum_abs > 0.0 && sum_abs_scaled > 0.0 {
		dot *= sum_abs / sum_abs_scaled;
	}

	Some(intercept + dummy + dot + options.hand_bonus)
}
