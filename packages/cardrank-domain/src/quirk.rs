//! Gameplay trait adjustments.
//!
//! A known quirk either boosts a few attributes when its situational trigger holds, or taxes the
//! same attributes slightly when it does not. Scoring compares the boosted card against the
//! baseline and blends the difference in by the remaining headroom under the cap.

use crate::attribute::{Attribute, AttributeBag, SCORE_CAP};

use Attribute::*;

struct QuirkBoost {
	name: &'static str,
	deltas: &'static [(Attribute, f64)],
}

struct QuirkTax {
	name: &'static str,
	magnitude: f64,
	shares: &'static [(Attribute, f64)],
}

const BOOSTS: &[QuirkBoost] = &[
	QuirkBoost {
		name: "bad ball hitter",
		deltas: &[(PlateVision, 6.0), (ContactLeft, 2.0), (ContactRight, 2.0)],
	},
	QuirkBoost { name: "big hack", deltas: &[(PowerLeft, 4.0), (PowerRight, 4.0)] },
	QuirkBoost {
		name: "dead red",
		deltas: &[(PowerLeft, 3.0), (PowerRight, 3.0), (ContactLeft, 1.0), (ContactRight, 1.0)],
	},
	QuirkBoost { name: "first pitch hitter", deltas: &[(ContactLeft, 3.0), (ContactRight, 3.0)] },
	QuirkBoost {
		name: "two strike hitter",
		deltas: &[(PlateVision, 3.0), (ContactLeft, 2.0), (ContactRight, 2.0)],
	},
	QuirkBoost {
		name: "rally monkey",
		deltas: &[(BattingClutch, 6.0), (ContactLeft, 1.0), (ContactRight, 1.0)],
	},
	QuirkBoost { name: "table setter", deltas: &[(PlateDiscipline, 4.0), (PlateVision, 2.0)] },
	QuirkBoost { name: "sprinter", deltas: &[(Speed, 4.0), (BaserunningAbility, 2.0)] },
	QuirkBoost {
		name: "stolen base threat",
		deltas: &[(BaserunningAbility, 4.0), (BaserunningAggression, 3.0)],
	},
	QuirkBoost { name: "bunt master", deltas: &[(BuntingAbility, 6.0), (DragBunting, 6.0)] },
	QuirkBoost { name: "gold glove", deltas: &[(FieldingAbility, 4.0), (ReactionTime, 2.0)] },
	QuirkBoost { name: "rocket arm", deltas: &[(ArmStrength, 5.0), (ArmAccuracy, 1.0)] },
	QuirkBoost { name: "brick wall", deltas: &[(Blocking, 6.0), (ArmAccuracy, 1.0)] },
];

const TAXES: &[QuirkTax] = &[
	QuirkTax {
		name: "bad ball hitter",
		magnitude: 3.0,
		shares: &[(ContactLeft, 0.4), (ContactRight, 0.4), (BattingClutch, 0.2)],
	},
	QuirkTax { name: "big hack", magnitude: 3.0, shares: &[(ContactLeft, 0.5), (ContactRight, 0.5)] },
	QuirkTax {
		name: "dead red",
		magnitude: 2.0,
		shares: &[(ContactLeft, 0.35), (ContactRight, 0.35), (PlateVision, 0.3)],
	},
	QuirkTax {
		name: "first pitch hitter",
		magnitude: 2.0,
		shares: &[(PlateDiscipline, 0.6), (PlateVision, 0.4)],
	},
	QuirkTax {
		name: "two strike hitter",
		magnitude: 1.5,
		shares: &[(PowerLeft, 0.5), (PowerRight, 0.5)],
	},
	QuirkTax {
		name: "rally monkey",
		magnitude: 2.0,
		shares: &[(ContactLeft, 0.4), (ContactRight, 0.4), (BattingClutch, 0.2)],
	},
	QuirkTax {
		name: "table setter",
		magnitude: 1.5,
		shares: &[(PowerLeft, 0.5), (PowerRight, 0.5)],
	},
	QuirkTax { name: "sprinter", magnitude: 1.0, shares: &[(Speed, 0.7), (BaserunningAbility, 0.3)] },
];

/// Lowercases, strips punctuation and collapses whitespace: `"Bad-Ball Hitter!"` becomes
/// `"bad ball hitter"`.
pub fn normalize_quirk_name(raw: &str) -> String {
	let cleaned: String = raw
		.chars()
		.map(|ch| if ch.is_alphanumeric() { ch.to_ascii_lowercase() } else { ' ' })
		.collect();

	cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Copy of `attrs` with every recognised quirk's boost applied.
pub fn apply_boosts<S>(attrs: &AttributeBag, quirks: &[S]) -> AttributeBag
where
	S: AsRef<str>,
{
	let mut out = attrs.clone();

	for name in quirks.iter().map(|quirk| normalize_quirk_name(quirk.as_ref())) {
		let Some(boost) = BOOSTS.iter().find(|boost| boost.name == name) else {
			continue;
		};

		for (attr, delta) in boost.deltas {
			out.adjust(*attr, *delta);
		}
	}

	out
}

/// Copy of `attrs` with the inactive-trigger tax of every recognised quirk applied.
pub fn apply_taxes<S>(attrs: &AttributeBag, quirks: &[S]) -> AttributeBag
where
	S: AsRef<str>,
{
	let mut out = attrs.clone();

	for name in quirks.iter().map(|quirk| normalize_quirk_name(quirk.as_ref())) {
		let Some(tax) = TAXES.iter().find(|tax| tax.name == name) else {
			continue;
		};

		for (attr, share) in tax.shares {
			out.adjust(*attr, -tax.magnitude * share);
		}
	}

	out
}

/// Fraction of the cap still available above `current`.
pub fn headroom(current: f64) -> f64 {
	(1.0 - current / SCORE_CAP).max(0.0)
}

/// Adds `delta` scaled by the headroom left above `current`.
pub fn blend(current: f64, delta: f64) -> f64 {
	current + delta * headroom(current)
}
