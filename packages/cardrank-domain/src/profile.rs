//! Per-position weight profiles and their calibration against a synthetic best-possible card.

use std::{collections::BTreeMap, sync::OnceLock};

use crate::{
	attribute::{Attribute, AttributeBag, SCORE_CAP},
	model::{Feature, LinearModel, Weights},
	position::Position,
	scorer::{self, ScoreOptions, Scales},
};

use Attribute::*;

const HITTING_CORE: [(Attribute, f64); 9] = [
	(ContactLeft, 1.0),
	(ContactRight, 1.0),
	(PowerLeft, 1.0),
	(PowerRight, 1.0),
	(PlateVision, 1.0),
	(PlateDiscipline, 1.0),
	(BattingClutch, 0.6),
	(Speed, 0.5),
	(BaserunningAbility, 0.4),
];

const CATCHER: [(Attribute, f64); 6] = [
	(Blocking, 3.0),
	(ArmStrength, 2.5),
	(ArmAccuracy, 2.0),
	(FieldingAbility, 1.5),
	(ReactionTime, 1.2),
	(Speed, 0.4),
];
const FIRST_BASE: [(Attribute, f64); 6] = [
	(FieldingAbility, 0.8),
	(ReactionTime, 0.6),
	(ArmAccuracy, 0.3),
	(ArmStrength, 0.2),
	(PowerLeft, 1.4),
	(PowerRight, 1.4),
];
const SECOND_BASE: [(Attribute, f64); 5] = [
	(FieldingAbility, 2.0),
	(ReactionTime, 1.8),
	(ArmAccuracy, 1.2),
	(ArmStrength, 0.8),
	(Speed, 1.0),
];
const THIRD_BASE: [(Attribute, f64); 6] = [
	(ArmStrength, 2.2),
	(ReactionTime, 2.0),
	(FieldingAbility, 1.6),
	(ArmAccuracy, 1.4),
	(PowerLeft, 1.2),
	(PowerRight, 1.2),
];
const SHORTSTOP: [(Attribute, f64); 5] = [
	(FieldingAbility, 3.0),
	(ReactionTime, 2.6),
	(ArmAccuracy, 1.8),
	(ArmStrength, 1.6),
	(Speed, 1.0),
];
const LEFT_FIELD: [(Attribute, f64); 6] = [
	(FieldingAbility, 0.9),
	(ReactionTime, 0.8),
	(ArmStrength, 0.6),
	(Speed, 0.8),
	(PowerLeft, 1.2),
	(PowerRight, 1.2),
];
const CENTER_FIELD: [(Attribute, f64); 6] = [
	(Speed, 2.0),
	(FieldingAbility, 2.0),
	(ReactionTime, 2.0),
	(ArmStrength, 1.0),
	(ArmAccuracy, 0.8),
	(BaserunningAbility, 0.8),
];
const RIGHT_FIELD: [(Attribute, f64); 6] = [
	(ArmStrength, 2.2),
	(ArmAccuracy, 1.4),
	(FieldingAbility, 1.0),
	(ReactionTime, 1.0),
	(PowerLeft, 1.2),
	(PowerRight, 1.2),
];

/// Multipliers applied on top of the base model's coefficients for a fielding position. Later
/// entries override the shared hitting core.
pub fn emphasis(position: Position) -> Option<BTreeMap<Attribute, f64>> {
	let specific: &[(Attribute, f64)] = match position {
		Position::Catcher => &CATCHER,
		Position::FirstBase => &FIRST_BASE,
		Position::SecondBase => &SECOND_BASE,
		Position::ThirdBase => &THIRD_BASE,
		Position::Shortstop => &SHORTSTOP,
		Position::LeftField => &LEFT_FIELD,
		Position::CenterField => &CENTER_FIELD,
		Position::RightField => &RIGHT_FIELD,
		_ => return None,
	};
	let mut out: BTreeMap<Attribute, f64> = HITTING_CORE.into_iter().collect();

	out.extend(specific.iter().copied());

	Some(out)
}

#[derive(Debug)]
pub struct PositionProfile {
	position: Position,
	weights: Weights,
	reference_max: OnceLock<Option<f64>>,
}
impl PositionProfile {
	/// Weights are `coefficient * multiplier` over the curated attributes the model carries,
	/// divided by the sum of the positive entries.
	pub fn derive(position: Position, model: &LinearModel) -> Option<Self> {
		let emphasis = emphasis(position)?;
		let mut raw = Vec::with_capacity(emphasis.len());

		for (attr, multiplier) in emphasis {
			if let Some(coefficient) = model.coefficient(attr) {
				raw.push((attr, coefficient * multiplier));
			}
		}

		let positive_sum: f64 = raw.iter().map(|(_, weight)| weight.max(0.0)).sum();

		if positive_sum <= 0.0 {
			return None;
		}

		let weights = raw
			.into_iter()
			.map(|(attr, weight)| (Feature::Attribute(attr), weight / positive_sum))
			.collect();

		Some(Self { position, weights, reference_max: OnceLock::new() })
	}

	pub fn position(&self) -> Position {
		self.position
	}

	pub fn weights(&self) -> &Weights {
		&self.weights
	}

	pub fn attributes(&self) -> impl Iterator<Item = Attribute> + '_ {
		self.weights.keys().filter_map(|feature| match feature {
			Feature::Attribute(attr) => Some(*attr),
			Feature::Indicator(_) => None,
		})
	}

	/// Every listed attribute pinned at its class maximum.
	pub fn reference_card(&self) -> AttributeBag {
		let mut card = AttributeBag::new();

		for attr in self.attributes() {
			card.set(attr, attr.max_value());
		}

		card
	}

	/// Score of the reference card under this profile. Computed on first use and memoized.
	pub fn reference_max(&self) -> Option<f64> {
		*self.reference_max.get_or_init(|| {
			let scales: Scales = self.attributes().map(|attr| (attr, 1.0)).collect();
			let options = ScoreOptions { only_listed: true, scales, ..ScoreOptions::default() };

			scorer::score(&self.reference_card(), None, &self.weights, 0.0, &options)
				.filter(|value| value.is_finite() && *value > 0.0)
		})
	}

	/// Profile score of `attrs` with optional scale overrides.
	pub fn score(&self, attrs: &AttributeBag, scales: Scales) -> Option<f64> {
		scorer::score(attrs, None, &self.weights, 0.0, &ScoreOptions::scaled(scales))
	}

	/// Maps a profile score onto the 0-125 scale.
	pub fn calibrate(&self, core: f64) -> Option<f64> {
		self.reference_max().map(|reference| core / reference * SCORE_CAP)
	}
}

/// The eight fielding profiles derived from the hitter model.
#[derive(Debug)]
pub struct PositionProfileTable {
	profiles: BTreeMap<Position, PositionProfile>,
}
impl PositionProfileTable {
	pub fn from_model(model: &LinearModel) -> Self {
		let profiles = Position::FIELDING
			.into_iter()
			.filter_map(|position| {
				PositionProfile::derive(position, model).map(|profile| (position, profile))
			})
			.collect();

		Self { profiles }
	}

	pub fn get(&self, position: Position) -> Option<&PositionProfile> {
		self.profiles.get(&position)
	}

	pub fn reference_max(&self, position: Position) -> Option<f64> {
		self.get(position).and_then(PositionProfile::reference_max)
	}

	pub fn len(&self) -> usize {
		self.profiles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.profiles.is_empty()
	}
}
