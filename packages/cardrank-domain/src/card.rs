use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{
	attribute::parse_numeric,
	facet::Facets,
	position::{BatHand, Position, Role},
};

/// One record of the upstream catalog as received. Every attribute the catalog sends that is not
/// a named field lands in `extra`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawCardItem {
	#[serde(default, deserialize_with = "lenient_string")]
	pub uuid: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub name: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub rarity: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub team: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub series: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub display_position: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub display_secondary_positions: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub bat_hand: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub throw_hand: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub height: String,
	#[serde(default)]
	pub ovr: Option<Value>,
	#[serde(default)]
	pub is_hitter: Option<bool>,
	#[serde(default, deserialize_with = "lenient_quirks")]
	pub quirks: Vec<RawQuirk>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl RawCardItem {
	pub fn primary_position(&self) -> Option<Position> {
		Position::from_code(&self.display_position)
	}

	pub fn secondary_positions(&self) -> Vec<Position> {
		Position::parse_list(&self.display_secondary_positions)
	}

	pub fn quirk_names(&self) -> Vec<String> {
		self.quirks.iter().map(|quirk| quirk.name().to_string()).collect()
	}

	pub fn raw_ovr(&self) -> Option<f64> {
		self.ovr.as_ref().and_then(parse_numeric)
	}

	/// Uuid when present, otherwise the name. Empty when the record carries neither.
	pub fn identity(&self) -> &str {
		if self.uuid.trim().is_empty() { self.name.trim() } else { self.uuid.trim() }
	}
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawQuirk {
	Named { name: String },
	Plain(String),
}
impl RawQuirk {
	pub fn name(&self) -> &str {
		match self {
			Self::Named { name } | Self::Plain(name) => name,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedItem {
	pub uuid: String,
	pub name: String,
	pub rarity: String,
	pub team: String,
	pub series: String,
	pub display_position: String,
	pub secondary_positions: Vec<Position>,
	pub bat_hand: Option<BatHand>,
	pub throw_hand: String,
	pub height: String,
	pub role: Role,
	pub ovr: Option<f64>,
	pub true_ovr: Option<f64>,
	pub meta_ovr: Option<f64>,
	pub meta_position: Option<Position>,
	pub quirks: Vec<String>,
	pub facets: Facets,
}
impl NormalizedItem {
	/// Model rating when one exists, otherwise the catalog's own rating.
	pub fn display_ovr(&self) -> Option<f64> {
		self.true_ovr.or(self.ovr)
	}

	pub fn identity(&self) -> &str {
		if self.uuid.is_empty() { &self.name } else { &self.uuid }
	}
}

/// Response ordering: meta rating descending, then model rating, then name. Unscored items use
/// the catalog rating for both keys.
pub fn ranking_order(a: &NormalizedItem, b: &NormalizedItem) -> Ordering {
	let key = |value: Option<f64>| value.unwrap_or(f64::NEG_INFINITY);

	key(b.meta_ovr.or(b.display_ovr()))
		.total_cmp(&key(a.meta_ovr.or(a.display_ovr())))
		.then_with(|| key(b.display_ovr()).total_cmp(&key(a.display_ovr())))
		.then_with(|| a.name.cmp(&b.name))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;

	Ok(match value {
		Some(Value::String(raw)) => raw.trim().to_string(),
		Some(Value::Number(number)) => number.to_string(),
		Some(Value::Bool(flag)) => flag.to_string(),
		_ => String::new(),
	})
}

fn lenient_quirks<'de, D>(deserializer: D) -> Result<Vec<RawQuirk>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<Vec<RawQuirk>>::deserialize(deserializer)?.unwrap_or_default())
}
