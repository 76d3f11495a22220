use std::{fs, path::Path};

use cardrank_domain::{
	ModelArtifact, ModelSet, Role,
	model::{LINEAR_WINNER, RoleModel},
};

use crate::Result;

/// Reads the model artifact once. Roles whose winner is not `linear` load as absent.
pub fn load_model_set(path: &Path) -> Result<ModelSet> {
	let raw = fs::read_to_string(path)?;

	parse_model_set(&raw)
}

pub fn parse_model_set(raw: &str) -> Result<ModelSet> {
	let artifact: ModelArtifact = serde_json::from_str(raw)?;

	for (role, model) in
		[(Role::Hitter, &artifact.models.hitter), (Role::Pitcher, &artifact.models.pitcher)]
	{
		log_role(role, model.as_ref());
	}

	let models = ModelSet::from_artifact(&artifact);

	for role in [Role::Hitter, Role::Pitcher] {
		if let Some(model) = models.get(role)
			&& !model.ignored_keys.is_empty()
		{
			tracing::debug!(
				role = role.as_str(),
				ignored = ?model.ignored_keys,
				"Ignoring unknown model coefficients."
			);
		}
	}

	Ok(models)
}

fn log_role(role: Role, model: Option<&RoleModel>) {
	match model {
		None => tracing::warn!(role = role.as_str(), "Model artifact has no entry for role."),
		Some(model) if model.winner != LINEAR_WINNER => tracing::warn!(
			role = role.as_str(),
			winner = %model.winner,
			"Unsupported model winner. Role will fall back to catalog ratings."
		),
		Some(model) => tracing::info!(
			role = role.as_str(),
			features = model.linear.as_ref().map_or(0, |linear| linear.coefficients.len()),
			"Loaded linear model."
		),
	}
}
