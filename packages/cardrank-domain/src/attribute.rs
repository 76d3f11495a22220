use std::fmt;

use serde_json::{Map, Value};

/// Cap shared by every calibrated score and by batting/pitching attributes.
pub const SCORE_CAP: f64 = 125.0;
pub const FIELDING_MAX: f64 = 99.0;

const ATTRIBUTE_COUNT: usize = 28;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FeatureClass {
	Batting,
	Fielding,
	Pitching,
}
impl FeatureClass {
	pub fn max_value(self) -> f64 {
		match self {
			Self::Batting | Self::Pitching => SCORE_CAP,
			Self::Fielding => FIELDING_MAX,
		}
	}
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Attribute {
	ContactLeft,
	ContactRight,
	PowerLeft,
	PowerRight,
	PlateVision,
	PlateDiscipline,
	BattingClutch,
	BuntingAbility,
	DragBunting,
	HittingDurability,
	FieldingDurability,
	FieldingAbility,
	ArmStrength,
	ArmAccuracy,
	ReactionTime,
	Blocking,
	Speed,
	BaserunningAbility,
	BaserunningAggression,
	Stamina,
	PitchingClutch,
	HitsPerBf,
	KPerBf,
	BbPerBf,
	HrPerBf,
	PitchVelocity,
	PitchControl,
	PitchMovement,
}
impl Attribute {
	pub const ALL: [Self; ATTRIBUTE_COUNT] = [
		Self::ContactLeft,
		Self::ContactRight,
		Self::PowerLeft,
		Self::PowerRight,
		Self::PlateVision,
		Self::PlateDiscipline,
		Self::BattingClutch,
		Self::BuntingAbility,
		Self::DragBunting,
		Self::HittingDurability,
		Self::FieldingDurability,
		Self::FieldingAbility,
		Self::ArmStrength,
		Self::ArmAccuracy,
		Self::ReactionTime,
		Self::Blocking,
		Self::Speed,
		Self::BaserunningAbility,
		Self::BaserunningAggression,
		Self::Stamina,
		Self::PitchingClutch,
		Self::HitsPerBf,
		Self::KPerBf,
		Self::BbPerBf,
		Self::HrPerBf,
		Self::PitchVelocity,
		Self::PitchControl,
		Self::PitchMovement,
	];

	pub fn key(self) -> &'static str {
		match self {
			Self::ContactLeft => "contact_left",
			Self::ContactRight => "contact_right",
			Self::PowerLeft => "power_left",
			Self::PowerRight => "power_right",
			Self::PlateVision => "plate_vision",
			Self::PlateDiscipline => "plate_discipline",
			Self::BattingClutch => "batting_clutch",
			Self::BuntingAbility => "bunting_ability",
			Self::DragBunting => "drag_bunting",
			Self::HittingDurability => "hitting_durability",
			Self::FieldingDurability => "fielding_durability",
			Self::FieldingAbility => "fielding_ability",
			Self::ArmStrength => "arm_strength",
			Self::ArmAccuracy => "arm_accuracy",
			Self::ReactionTime => "reaction_time",
			Self::Blocking => "blocking",
			Self::Speed => "speed",
			Self::BaserunningAbility => "baserunning_ability",
			Self::BaserunningAggression => "baserunning_aggression",
			Self::Stamina => "stamina",
			Self::PitchingClutch => "pitching_clutch",
			Self::HitsPerBf => "hits_per_bf",
			Self::KPerBf => "k_per_bf",
			Self::BbPerBf => "bb_per_bf",
			Self::HrPerBf => "hr_per_bf",
			Self::PitchVelocity => "pitch_velocity",
			Self::PitchControl => "pitch_control",
			Self::PitchMovement => "pitch_movement",
		}
	}

	pub fn from_key(key: &str) -> Option<Self> {
		match key.trim() {
			"drag_bunting_ability" => Some(Self::DragBunting),
			"pitch_break" => Some(Self::PitchMovement),
			other => Self::ALL.iter().copied().find(|attr| attr.key() == other),
		}
	}

	pub fn class(self) -> FeatureClass {
		match self {
			Self::ContactLeft
			| Self::ContactRight
			| Self::PowerLeft
			| Self::PowerRight
			| Self::PlateVision
			| Self::PlateDiscipline
			| Self::BattingClutch => FeatureClass::Batting,
			Self::Stamina
			| Self::PitchingClutch
			| Self::HitsPerBf
			| Self::KPerBf
			| Self::BbPerBf
			| Self::HrPerBf
			| Self::PitchVelocity
			| Self::PitchControl
			| Self::PitchMovement => FeatureClass::Pitching,
			_ => FeatureClass::Fielding,
		}
	}

	pub fn max_value(self) -> f64 {
		self.class().max_value()
	}

	fn index(self) -> usize {
		self as usize
	}
}
impl fmt::Display for Attribute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.key())
	}
}

/// Closed attribute set for one card. `None` means the upstream record did not carry a usable
/// value, which is distinct from a present zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeBag {
	values: [Option<f64>; ATTRIBUTE_COUNT],
}
impl AttributeBag {
	pub fn new() -> Self {
		Self::default()
	}

	/// Reads every known attribute key out of a loosely typed upstream record.
	pub fn from_json_map(map: &Map<String, Value>) -> Self {
		let mut bag = Self::new();

		for (key, value) in map {
			let Some(attr) = Attribute::from_key(key) else {
				continue;
			};

			if let Some(number) = parse_numeric(value) {
				bag.set(attr, number);
			}
		}

		bag
	}

	pub fn get(&self, attr: Attribute) -> Option<f64> {
		self.values[attr.index()]
	}

	pub fn set(&mut self, attr: Attribute, value: f64) {
		self.values[attr.index()] = value.is_finite().then_some(value);
	}

	pub fn clear(&mut self, attr: Attribute) {
		self.values[attr.index()] = None;
	}

	pub fn with(mut self, attr: Attribute, value: f64) -> Self {
		self.set(attr, value);

		self
	}

	pub fn contains(&self, attr: Attribute) -> bool {
		self.get(attr).is_some()
	}

	pub fn present(&self) -> impl Iterator<Item = (Attribute, f64)> + '_ {
		Attribute::ALL.iter().filter_map(|attr| self.get(*attr).map(|value| (*attr, value)))
	}

	/// Adds `delta` to a present attribute, keeping it within `[0, max]` for its class. Absent
	/// attributes stay absent.
	pub fn adjust(&mut self, attr: Attribute, delta: f64) {
		if let Some(value) = self.get(attr) {
			self.set(attr, (value + delta).clamp(0.0, attr.max_value()));
		}
	}
}

/// Best-effort numeric coercion: numbers pass through, strings are stripped of everything but
/// digits, `.` and `-` before parsing. Anything else is treated as absent.
pub fn parse_numeric(value: &Value) -> Option<f64> {
	match value {
		Value::Number(number) => number.as_f64().filter(|v| v.is_finite()),
		Value::String(raw) => parse_numeric_str(raw),
		_ => None,
	}
}

pub fn parse_numeric_str(raw: &str) -> Option<f64> {
	let cleaned: String =
		raw.chars().filter(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '-')).collect();

	if cleaned.is_empty() {
		return None;
	}

	cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_attribute_round_trips_through_its_key() {
		for attr in Attribute::ALL {
			assert_eq!(Attribute::from_key(attr.key()), Some(attr));
		}

		assert_eq!(Attribute::from_key("drag_bunting_ability"), Some(Attribute::DragBunting));
		assert_eq!(Attribute::from_key("ovr"), None);
	}

	#[test]
	fn fielding_class_caps_at_99() {
		assert_eq!(Attribute::Blocking.max_value(), 99.0);
		assert_eq!(Attribute::BaserunningAbility.max_value(), 99.0);
		assert_eq!(Attribute::ContactLeft.max_value(), 125.0);
		assert_eq!(Attribute::PitchControl.max_value(), 125.0);
	}

	#[test]
	fn coerces_numeric_strings() {
		assert_eq!(parse_numeric(&serde_json::json!("87")), Some(87.0));
		assert_eq!(parse_numeric(&serde_json::json!(" 91+ ")), Some(91.0));
		assert_eq!(parse_numeric(&serde_json::json!("N/A")), None);
		assert_eq!(parse_numeric(&serde_json::json!("")), None);
		assert_eq!(parse_numeric(&serde_json::json!(null)), None);
		assert_eq!(parse_numeric(&serde_json::json!(0)), Some(0.0));
	}

	#[test]
	fn unparseable_values_are_absent_not_zero() {
		let map = serde_json::json!({
			"contact_left": "75",
			"contact_right": "--",
			"power_left": 0,
			"name": "Someone",
		});
		let bag = AttributeBag::from_json_map(map.as_object().expect("object"));

		assert_eq!(bag.get(Attribute::ContactLeft), Some(75.0));
		assert_eq!(bag.get(Attribute::ContactRight), None);
		assert_eq!(bag.get(Attribute::PowerLeft), Some(0.0));
		assert_eq!(bag.present().count(), 2);
	}

	#[test]
	fn adjust_clamps_to_class_bounds() {
		let mut bag = AttributeBag::new().with(Attribute::Speed, 97.0).with(Attribute::PowerLeft, 2.0);

		bag.adjust(Attribute::Speed, 6.0);
		bag.adjust(Attribute::PowerLeft, -5.0);
		bag.adjust(Attribute::Blocking, 4.0);

		assert_eq!(bag.get(Attribute::Speed), Some(99.0));
		assert_eq!(bag.get(Attribute::PowerLeft), Some(0.0));
		assert_eq!(bag.get(Attribute::Blocking), None);
	}
}
