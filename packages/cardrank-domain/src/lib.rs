//! Pure scoring engine for catalog player cards.
//!
//! Everything here is synchronous and free of I/O. A [`normalizer::ItemNormalizer`] owns the
//! loaded models and the position profiles derived from them, and turns raw catalog records into
//! scored items.

pub mod attribute;
pub mod bonus;
pub mod card;
pub mod facet;
pub mod model;
pub mod normalizer;
pub mod position;
pub mod profile;
pub mod quirk;
pub mod scorer;

pub use attribute::{Attribute, AttributeBag, SCORE_CAP};
pub use card::{NormalizedItem, RawCardItem, ranking_order};
pub use facet::Facets;
pub use model::{LinearModel, ModelArtifact, ModelSet};
pub use normalizer::ItemNormalizer;
pub use position::{BatHand, Position, Role};
