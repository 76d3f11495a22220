use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	Hitter,
	Pitcher,
}
impl Role {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Hitter => "hitter",
			Self::Pitcher => "pitcher",
		}
	}

	/// Explicit upstream flag wins; otherwise the role follows the display position. Unknown
	/// positions are treated as hitters.
	pub fn resolve(is_hitter: Option<bool>, position: Option<Position>) -> Self {
		match (is_hitter, position) {
			(Some(true), _) => Self::Hitter,
			(Some(false), _) => Self::Pitcher,
			(None, Some(position)) if position.is_pitcher() => Self::Pitcher,
			_ => Self::Hitter,
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Position {
	#[serde(rename = "C")]
	Catcher,
	#[serde(rename = "1B")]
	FirstBase,
	#[serde(rename = "2B")]
	SecondBase,
	#[serde(rename = "3B")]
	ThirdBase,
	#[serde(rename = "SS")]
	Shortstop,
	#[serde(rename = "LF")]
	LeftField,
	#[serde(rename = "CF")]
	CenterField,
	#[serde(rename = "RF")]
	RightField,
	#[serde(rename = "DH")]
	DesignatedHitter,
	#[serde(rename = "SP")]
	StartingPitcher,
	#[serde(rename = "RP")]
	ReliefPitcher,
	#[serde(rename = "CP")]
	ClosingPitcher,
}
impl Position {
	/// The eight fielding positions that carry a weight profile.
	pub const FIELDING: [Self; 8] = [
		Self::Catcher,
		Self::FirstBase,
		Self::SecondBase,
		Self::ThirdBase,
		Self::Shortstop,
		Self::LeftField,
		Self::CenterField,
		Self::RightField,
	];

	pub fn code(self) -> &'static str {
		match self {
			Self::Catcher => "C",
			Self::FirstBase => "1B",
			Self::SecondBase => "2B",
			Self::ThirdBase => "3B",
			Self::Shortstop => "SS",
			Self::LeftField => "LF",
			Self::CenterField => "CF",
			Self::RightField => "RF",
			Self::DesignatedHitter => "DH",
			Self::StartingPitcher => "SP",
			Self::ReliefPitcher => "RP",
			Self::ClosingPitcher => "CP",
		}
	}

	pub fn from_code(raw: &str) -> Option<Self> {
		let code = raw.trim().to_ascii_uppercase();

		match code.as_str() {
			"C" => Some(Self::Catcher),
			"1B" => Some(Self::FirstBase),
			"2B" => Some(Self::SecondBase),
			"3B" => Some(Self::ThirdBase),
			"SS" => Some(Self::Shortstop),
			"LF" => Some(Self::LeftField),
			"CF" => Some(Self::CenterField),
			"RF" => Some(Self::RightField),
			"DH" => Some(Self::DesignatedHitter),
			"SP" => Some(Self::StartingPitcher),
			"RP" => Some(Self::ReliefPitcher),
			"CP" => Some(Self::ClosingPitcher),
			_ => None,
		}
	}

	/// Parses a comma or slash separated list such as `"1B, LF"`, skipping unknown codes.
	pub fn parse_list(raw: &str) -> Vec<Self> {
		let mut out = Vec::new();

		for code in raw.split([',', '/']) {
			if let Some(position) = Self::from_code(code)
				&& !out.contains(&position)
			{
				out.push(position);
			}
		}

		out
	}

	pub fn is_pitcher(self) -> bool {
		matches!(self, Self::StartingPitcher | Self::ReliefPitcher | Self::ClosingPitcher)
	}

	pub fn is_fielding(self) -> bool {
		Self::FIELDING.contains(&self)
	}

	/// Key of the one-hot positional indicator in a linear model, e.g. `pos_SS`.
	pub fn indicator_key(self) -> String {
		format!("pos_{}", self.code())
	}

	pub fn from_indicator_key(key: &str) -> Option<Self> {
		key.strip_prefix("pos_").and_then(Self::from_code)
	}
}
impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.code())
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum BatHand {
	#[serde(rename = "R")]
	Right,
	#[serde(rename = "L")]
	Left,
	#[serde(rename = "S")]
	Switch,
}
impl BatHand {
	pub fn from_code(raw: &str) -> Option<Self> {
		match raw.trim().to_ascii_uppercase().as_str() {
			"R" | "RIGHT" => Some(Self::Right),
			"L" | "LEFT" => Some(Self::Left),
			"S" | "B" | "SWITCH" | "BOTH" => Some(Self::Switch),
			_ => None,
		}
	}
}

/// Parses heights such as `6'0"`, `6' 2"`, `6-1` or a bare inch count into inches.
pub fn parse_height_inches(raw: &str) -> Option<f64> {
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		return None;
	}

	let mut parts = trimmed
		.split(|ch: char| !ch.is_ascii_digit())
		.filter(|part| !part.is_empty())
		.map(|part| part.parse::<u32>().ok());
	let first = parts.next()??;

	match parts.next() {
		Some(inches) => Some(f64::from(first.checked_mul(12)?.checked_add(inches?)?)),
		None if first > 12 => Some(f64::from(first)),
		None => Some(f64::from(first * 12)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn role_prefers_explicit_flag() {
		assert_eq!(Role::resolve(Some(true), Some(Position::StartingPitcher)), Role::Hitter);
		assert_eq!(Role::resolve(None, Some(Position::ReliefPitcher)), Role::Pitcher);
		assert_eq!(Role::resolve(None, Some(Position::Shortstop)), Role::Hitter);
		assert_eq!(Role::resolve(None, None), Role::Hitter);
	}

	#[test]
	fn parses_secondary_position_lists() {
		assert_eq!(
			Position::parse_list("1B, LF/ rf ,IF"),
			vec![Position::FirstBase, Position::LeftField, Position::RightField]
		);
		assert!(Position::parse_list("").is_empty());
	}

	#[test]
	fn indicator_keys_round_trip() {
		for position in Position::FIELDING {
			assert_eq!(Position::from_indicator_key(&position.indicator_key()), Some(position));
		}

		assert_eq!(Position::from_indicator_key("contact_left"), None);
	}

	#[test]
	fn parses_heights() {
		assert_eq!(parse_height_inches("6'0\""), Some(72.0));
		assert_eq!(parse_height_inches("5' 10\""), Some(70.0));
		assert_eq!(parse_height_inches("6-4"), Some(76.0));
		assert_eq!(parse_height_inches("74"), Some(74.0));
		assert_eq!(parse_height_inches("tall"), None);
	}
}
