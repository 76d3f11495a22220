use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{attribute::Attribute, position::Position, position::Role};

pub const LINEAR_WINNER: &str = "linear";

/// One term of a linear model: a one-hot positional indicator or a continuous attribute.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Feature {
	Indicator(Position),
	Attribute(Attribute),
}
impl Feature {
	pub fn parse(key: &str) -> Option<Self> {
		if let Some(position) = Position::from_indicator_key(key) {
			return Some(Self::Indicator(position));
		}

		Attribute::from_key(key).map(Self::Attribute)
	}
}

pub type Weights = BTreeMap<Feature, f64>;

#[derive(Debug, Deserialize)]
pub struct ModelArtifact {
	pub models: RoleModels,
}

#[derive(Debug, Default, Deserialize)]
pub struct RoleModels {
	pub hitter: Option<RoleModel>,
	pub pitcher: Option<RoleModel>,
}

#[derive(Debug, Deserialize)]
pub struct RoleModel {
	pub winner: String,
	pub linear: Option<LinearSpec>,
}

#[derive(Debug, Deserialize)]
pub struct LinearSpec {
	pub intercept: f64,
	pub coefficients: BTreeMap<String, f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinearModel {
	pub intercept: f64,
	pub weights: Weights,
	/// Coefficient keys that matched neither an indicator nor a known attribute.
	pub ignored_keys: Vec<String>,
}
impl LinearModel {
	pub fn from_spec(spec: &LinearSpec) -> Self {
		let mut weights = Weights::new();
		let mut ignored_keys = Vec::new();

		for (key, weight) in &spec.coefficients {
			match Feature::parse(key) {
				Some(feature) if weight.is_finite() => {
					weights.insert(feature, *weight);
				},
				_ => ignored_keys.push(key.clone()),
			}
		}

		Self { intercept: spec.intercept, weights, ignored_keys }
	}

	/// Continuous terms only, with indicator terms dropped.
	pub fn attribute_weights(&self) -> impl Iterator<Item = (Attribute, f64)> + '_ {
		self.weights.iter().filter_map(|(feature, weight)| match feature {
			Feature::Attribute(attr) => Some((*attr, *weight)),
			Feature::Indicator(_) => None,
		})
	}

	pub fn coefficient(&self, attr: Attribute) -> Option<f64> {
		self.weights.get(&Feature::Attribute(attr)).copied()
	}
}

/// Per-role models, loaded once and immutable afterwards.
#[derive(Clone, Debug, Default)]
pub struct ModelSet {
	hitter: Option<LinearModel>,
	pitcher: Option<LinearModel>,
}
impl ModelSet {
	pub fn new(hitter: Option<LinearModel>, pitcher: Option<LinearModel>) -> Self {
		Self { hitter, pitcher }
	}

	/// Only the `linear` winner is supported; any other winner leaves that role without a model.
	pub fn from_artifact(artifact: &ModelArtifact) -> Self {
		Self {
			hitter: artifact.models.hitter.as_ref().and_then(supported_linear),
			pitcher: artifact.models.pitcher.as_ref().and_then(supported_linear),
		}
	}

	pub fn get(&self, role: Role) -> Option<&LinearModel> {
		match role {
			Role::Hitter => self.hitter.as_ref(),
			Role::Pitcher => self.pitcher.as_ref(),
		}
	}
}

fn supported_linear(model: &RoleModel) -> Option<LinearModel> {
	if model.winner != LINEAR_WINNER {
		return None;
	}

	model.linear.as_ref().map(LinearModel::from_spec)
}
