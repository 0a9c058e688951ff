pub type MlResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	DbError,
	ValidationError(String),
	ConfigError(String),
	UnknownFieldKind(String),
	MailError(String),
	Fmt,

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<std::fmt::Error> for Error {
	fn from(_: std::fmt::Error) -> Self {
		Self::Fmt
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{:?}", self)
	}
}

impl std::error::Error for Error {}

// vim: ts=4
