//! Narrow skill scores derived from a position profile with facet-specific emphasis.

use serde::Serialize;

use crate::{
	attribute::{Attribute, AttributeBag, SCORE_CAP},
	model::{Feature, Weights},
	position::Position,
	profile::PositionProfile,
	scorer::{self, ScoreOptions, Scales},
};

use Attribute::*;

const POWER_BOOST: f64 = 4.0;
const COMPLEMENT_BOOST: f64 = 1.0;
const SPLIT_BOOST: f64 = 2.0;
const BASERUNNING_BOOST: f64 = 15.0;
const AGGRESSION_WEIGHT: f64 = 0.02;
const DEFENSE_BOOST: f64 = 10.0;

const BUNTING_MIX: [(Attribute, f64); 3] =
	[(DragBunting, 0.55), (BuntingAbility, 0.35), (Speed, 0.10)];

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
	pub power: Option<f64>,
	pub contact: Option<f64>,
	pub vs_left: Option<f64>,
	pub vs_right: Option<f64>,
	pub bunting: Option<f64>,
	pub baserunning: Option<f64>,
	pub defense: Option<f64>,
}
impl Facets {
	pub fn values(&self) -> [Option<f64>; 7] {
		[
			self.power,
			self.contact,
			self.vs_left,
			self.vs_right,
			self.bunting,
			self.baserunning,
			self.defense,
		]
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Side {
	Left,
	Right,
}

/// All seven facets for `attrs` evaluated at `profile`'s position. Every facet is `None` when the
/// profile has no usable reference maximum.
pub fn compute(profile: &PositionProfile, attrs: &AttributeBag) -> Facets {
	if profile.reference_max().is_none() {
		return Facets::default();
	}

	Facets {
		power: emphasized(
			profile,
			attrs,
			&[(PowerLeft, POWER_BOOST), (PowerRight, POWER_BOOST)],
			&[(ContactLeft, COMPLEMENT_BOOST), (ContactRight, COMPLEMENT_BOOST)],
		),
		contact: emphasized(
			profile,
			attrs,
			&[(ContactLeft, POWER_BOOST), (ContactRight, POWER_BOOST)],
			&[(PowerLeft, COMPLEMENT_BOOST), (PowerRight, COMPLEMENT_BOOST)],
		),
		vs_left: split(profile, attrs, Side::Left),
		vs_right: split(profile, attrs, Side::Right),
		bunting: bunting(attrs),
		baserunning: baserunning(profile, attrs),
		defense: defense(profile, attrs),
	}
}

/// Direct composite, independent of the model.
pub fn bunting(attrs: &AttributeBag) -> Option<f64> {
	if BUNTING_MIX.iter().all(|(attr, _)| !attrs.contains(*attr)) {
		return None;
	}

	let composite: f64 =
		BUNTING_MIX.iter().map(|(attr, weight)| attrs.get(*attr).unwrap_or(0.0) * weight).sum();

	Some(composite.clamp(0.0, SCORE_CAP))
}

fn emphasized(
	profile: &PositionProfile,
	attrs: &AttributeBag,
	primary: &[(Attribute, f64)],
	complement: &[(Attribute, f64)],
) -> Option<f64> {
	let scales = primary.iter().chain(complement).copied().collect();

	calibrated(profile, profile.weights(), attrs, scales)
}

fn split(profile: &PositionProfile, attrs: &AttributeBag, side: Side) -> Option<f64> {
	let (on_contact, on_power, off_contact, off_power) = match side {
		Side::Left => (ContactLeft, PowerLeft, ContactRight, PowerRight),
		Side::Right => (ContactRight, PowerRight, ContactLeft, PowerLeft),
	};
	let mut mirrored = attrs.clone();

	for (on, off) in [(on_contact, off_contact), (on_power, off_power)] {
		if let Some(value) = attrs.get(on) {
			mirrored.set(off, value);
		}
	}

	let scales = [ContactLeft, ContactRight, PowerLeft, PowerRight]
		.into_iter()
		.map(|attr| (attr, SPLIT_BOOST))
		.collect();

	calibrated(profile, profile.weights(), &mirrored, scales)
}

fn baserunning(profile: &PositionProfile, attrs: &AttributeBag) -> Option<f64> {
	let mut weights = profile.weights().clone();

	weights.entry(Feature::Attribute(BaserunningAggression)).or_insert(AGGRESSION_WEIGHT);

	let scales = Scales::from([(Speed, BASERUNNING_BOOST), (BaserunningAbility, BASERUNNING_BOOST)]);

	calibrated(profile, &weights, attrs, scales)
}

fn defense(profile: &PositionProfile, attrs: &AttributeBag) -> Option<f64> {
	let mut scales: Scales = [FieldingAbility, ReactionTime, ArmStrength, ArmAccuracy]
		.into_iter()
		.map(|attr| (attr, DEFENSE_BOOST))
		.collect();

	if profile.position() == Position::Catcher {
		scales.insert(Blocking, DEFENSE_BOOST);
	}

	calibrated(profile, profile.weights(), attrs, scales)
}

fn calibrated(
	profile: &PositionProfile,
	weights: &Weights,
	attrs: &AttributeBag,
	scales: Scales,
) -> Option<f64> {
	let core = scorer::score(attrs, None, weights, 0.0, &ScoreOptions::scaled(scales))?;

	profile.calibrate(core).map(|value| value.clamp(0.0, SCORE_CAP))
}
