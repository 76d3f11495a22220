use crate::position::{BatHand, Position};

const HEIGHT_BASELINE_INCHES: f64 = 72.0;
const HEIGHT_MIN_INCHES: f64 = 60.0;
const HEIGHT_MAX_INCHES: f64 = 84.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionTuning {
	pub defense_multiplier: f64,
	pub switch_bonus: f64,
	pub left_bonus: f64,
	/// Points per inch away from 6'0". Positive rewards taller players.
	pub height_slope: f64,
}

pub fn tuning(position: Position) -> PositionTuning {
	let (defense_multiplier, switch_bonus, left_bonus, height_slope) = match position {
		Position::Catcher => (1.2, 0.85, -0.5, -0.10),
		Position::FirstBase => (0.5, 0.85, 0.5, -0.05),
		Position::SecondBase => (1.0, 0.85, -0.5, 0.05),
		Position::ThirdBase => (0.9, 0.85, -0.5, -0.05),
		Position::Shortstop => (1.3, 0.85, -0.5, 0.15),
		Position::LeftField => (0.6, 0.85, -0.5, -0.05),
		Position::CenterField => (1.2, 0.85, -0.5, 0.08),
		Position::RightField => (0.7, 0.85, -0.5, -0.05),
		_ => (0.0, 0.85, -0.5, 0.05),
	};

	PositionTuning { defense_multiplier, switch_bonus, left_bonus, height_slope }
}

pub fn defense_tier(fielding_ability: Option<f64>) -> f64 {
	match fielding_ability {
		Some(value) if value >= 85.0 => 1.0,
		Some(value) if value >= 80.0 => 0.7,
		Some(value) if value >= 75.0 => 0.4,
		Some(value) if value >= 65.0 => 0.2,
		_ => 0.0,
	}
}

pub fn handedness_bonus(position: Position, bat_hand: Option<BatHand>) -> f64 {
	let tuning = tuning(position);

	match bat_hand {
		Some(BatHand::Switch) => tuning.switch_bonus,
		Some(BatHand::Left) => tuning.left_bonus,
		Some(BatHand::Right) | None => 0.0,
	}
}

pub fn height_bonus(position: Position, height_inches: Option<f64>) -> f64 {
	let Some(inches) = height_inches else {
		return 0.0;
	};

	tuning(position).height_slope
		* (inches.clamp(HEIGHT_MIN_INCHES, HEIGHT_MAX_INCHES) - HEIGHT_BASELINE_INCHES)
}

/// Defense tier, handedness and height combined for a fielding position.
pub fn flat_bonus(
	position: Position,
	fielding_ability: Option<f64>,
	bat_hand: Option<BatHand>,
	height_inches: Option<f64>,
) -> f64 {
	defense_tier(fielding_ability) * tuning(position).defense_multiplier
		+ handedness_bonus(position, bat_hand)
		+ height_bonus(position, height_inches)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defense_tiers_step() {
		assert_eq!(defense_tier(Some(90.0)), 1.0);
		assert_eq!(defense_tier(Some(85.0)), 1.0);
		assert_eq!(defense_tier(Some(82.0)), 0.7);
		assert_eq!(defense_tier(Some(75.0)), 0.4);
		assert_eq!(defense_tier(Some(65.0)), 0.2);
		assert_eq!(defense_tier(Some(64.9)), 0.0);
		assert_eq!(defense_tier(None), 0.0);
	}

	#[test]
	fn switch_hitters_gain_and_lefties_follow_position_sign() {
		assert_eq!(handedness_bonus(Position::Shortstop, Some(BatHand::Switch)), 0.85);
		assert_eq!(handedness_bonus(Position::Shortstop, Some(BatHand::Left)), -0.5);
		assert_eq!(handedness_bonus(Position::FirstBase, Some(BatHand::Left)), 0.5);
		assert_eq!(handedness_bonus(Position::Shortstop, Some(BatHand::Right)), 0.0);
	}

	#[test]
	fn height_is_clamped_and_signed_by_position() {
		assert_eq!(height_bonus(Position::Shortstop, Some(72.0)), 0.0);
		assert!(height_bonus(Position::Shortstop, Some(76.0)) > 0.0);
		assert!(height_bonus(Position::Catcher, Some(76.0)) < 0.0);
		assert_eq!(
			height_bonus(Position::Shortstop, Some(120.0)),
			height_bonus(Position::Shortstop, Some(84.0))
		);
		assert_eq!(height_bonus(Position::Shortstop, None), 0.0);
	}
}
