pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Upstream error: {message}")]
	Upstream { message: String },
	#[error("Model error: {message}")]
	Model { message: String },
	#[error("Internal error: {message}")]
	Internal { message: String },
}
