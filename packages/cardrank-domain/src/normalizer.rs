use crate::{
	attribute::{Attribute, AttributeBag, SCORE_CAP},
	bonus,
	card::{NormalizedItem, RawCardItem},
	facet::{self, Facets},
	model::{LinearModel, ModelSet},
	position::{BatHand, Position, Role, parse_height_inches},
	profile::{PositionProfile, PositionProfileTable},
	quirk,
	scorer::{self, ScoreOptions, Scales},
};

/// Low-signal terms silenced in the fallback model for hitters without a fielding profile.
const FALLBACK_MUTED: [Attribute; 3] = [
	Attribute::HittingDurability,
	Attribute::FieldingDurability,
	Attribute::BaserunningAggression,
];

/// Scoring inputs for one hitter, resolved once from the raw record.
struct HitterCard<'a> {
	attrs: &'a AttributeBag,
	quirks: &'a [String],
	bat_hand: Option<BatHand>,
	height_inches: Option<f64>,
}

/// Meta rating and facets at one position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MetaScore {
	pub position: Option<Position>,
	pub meta_ovr: f64,
	pub facets: Facets,
}

/// Turns raw catalog records into scored items. Owns the models and the position profiles, so
/// each profile's reference maximum is computed at most once per normalizer.
#[derive(Debug)]
pub struct ItemNormalizer {
	models: ModelSet,
	profiles: Option<PositionProfileTable>,
}
impl ItemNormalizer {
	pub fn new(models: ModelSet) -> Self {
		let profiles = models.get(Role::Hitter).map(PositionProfileTable::from_model);

		Self { models, profiles }
	}

	pub fn models(&self) -> &ModelSet {
		&self.models
	}

	pub fn profiles(&self) -> Option<&PositionProfileTable> {
		self.profiles.as_ref()
	}

	pub fn normalize(&self, raw: &RawCardItem, allow_secondaries: bool) -> NormalizedItem {
		let attrs = AttributeBag::from_json_map(&raw.extra);
		let primary = raw.primary_position();
		let role = Role::resolve(raw.is_hitter, primary);
		let quirks = raw.quirk_names();
		let bat_hand = BatHand::from_code(&raw.bat_hand);
		let secondaries = raw.secondary_positions();
		let true_ovr = self.true_ovr(role, &attrs, primary);
		let meta = match role {
			Role::Pitcher => None,
			Role::Hitter => {
				let card = HitterCard {
					attrs: &attrs,
					quirks: &quirks,
					bat_hand,
					height_inches: parse_height_inches(&raw.height),
				};
				let mut candidates = vec![primary];

				if allow_secondaries {
					candidates.extend(secondaries.iter().copied().map(Some));
				}

				self.best_meta(&card, &candidates)
			},
		};
		let (meta_ovr, meta_position, facets) = match (role, meta) {
			(Role::Pitcher, _) => (true_ovr, primary, Facets::default()),
			(Role::Hitter, Some(meta)) => (Some(meta.meta_ovr), meta.position, meta.facets),
			(Role::Hitter, None) => (None, primary, Facets::default()),
		};

		NormalizedItem {
			uuid: raw.uuid.clone(),
			name: raw.name.clone(),
			rarity: raw.rarity.clone(),
			team: raw.team.clone(),
			series: raw.series.clone(),
			display_position: raw.display_position.clone(),
			secondary_positions: secondaries,
			bat_hand,
			throw_hand: raw.throw_hand.clone(),
			height: raw.height.clone(),
			role,
			ovr: raw.raw_ovr(),
			true_ovr,
			meta_ovr,
			meta_position,
			quirks,
			facets,
		}
	}

	/// Base model rating with the positional indicator applied.
	pub fn true_ovr(
		&self,
		role: Role,
		attrs: &AttributeBag,
		position: Option<Position>,
	) -> Option<f64> {
		let model = self.models.get(role)?;
		let options = ScoreOptions::with_dummies();

		scorer::score(attrs, position, &model.weights, model.intercept, &options)
	}

	/// Best meta score over `candidates`. A profiled position that cannot be scored yields no
	/// candidate; only positions without a profile go through the fallback model.
	fn best_meta(
		&self,
		card: &HitterCard<'_>,
		candidates: &[Option<Position>],
	) -> Option<MetaScore> {
		let model = self.models.get(Role::Hitter)?;

		candidates
			.iter()
			.filter_map(|position| {
				match position.and_then(|position| self.profiles.as_ref()?.get(position)) {
					Some(profile) => profiled_meta(profile, card),
					None => fallback_meta(model, *position, card),
				}
			})
			.max_by(|a, b| a.meta_ovr.total_cmp(&b.meta_ovr))
	}
}

/// Calibrated profile score, then the quirk delta and the flat bonus, each blended by headroom.
fn profiled_meta(profile: &PositionProfile, card: &HitterCard<'_>) -> Option<MetaScore> {
	let position = profile.position();
	let core = profile.score(card.attrs, Scales::new())?;
	let mut meta = profile.calibrate(core)?;

	if !card.quirks.is_empty() {
		let boosted = quirk::apply_boosts(card.attrs, card.quirks);

		if let Some(with_quirks) =
			profile.score(&boosted, Scales::new()).and_then(|value| profile.calibrate(value))
		{
			meta = quirk::blend(meta, with_quirks - meta);
		}
	}

	let flat = bonus::flat_bonus(
		position,
		card.attrs.get(Attribute::FieldingAbility),
		card.bat_hand,
		card.height_inches,
	);

	meta = quirk::blend(meta, flat);

	Some(MetaScore {
		position: Some(position),
		meta_ovr: meta.min(SCORE_CAP),
		facets: facet::compute(profile, card.attrs),
	})
}

/// Base model with muted low-signal terms and unblended handedness and height bonuses.
fn fallback_meta(
	model: &LinearModel,
	position: Option<Position>,
	card: &HitterCard<'_>,
) -> Option<MetaScore> {
	let tuned = position.unwrap_or(Position::DesignatedHitter);
	let options = ScoreOptions {
		include_position_dummies: true,
		only_listed: false,
		scales: FALLBACK_MUTED.into_iter().map(|attr| (attr, 0.0)).collect(),
		hand_bonus: bonus::handedness_bonus(tuned, card.bat_hand)
			+ bonus::height_bonus(tuned, card.height_inches),
	};
	let meta = scorer::score(card.attrs, position, &model.weights, model.intercept, &options)?;

	Some(MetaScore { position, meta_ovr: meta.min(SCORE_CAP), facets: Facets::default() })
}
