use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DeckResult<T> = Result<T, DeckError>;
pub type ParserResult<T> = DeckResult<T>;

/// What went wrong, independent of where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeckErrorKind {
    /// Line too short for a mandatory field.
    Format,
    /// Non-numeric content in a numeric column.
    Parse,
    /// Mesh has no usable elements.
    EmptyMesh,
    /// Value does not fit its fixed-width field.
    Encoding,
    /// Source file absent.
    MissingInput,
    Config,
    Io,
}

impl DeckErrorKind {
    pub const fn category(self) -> DeckErrorCategory {
        match self {
            Self::Format | Self::Parse | Self::EmptyMesh | Self::Config => {
                DeckErrorCategory::InputValidationError
            }
            Self::MissingInput | Self::Io => DeckErrorCategory::IoSystemError,
            Self::Encoding => DeckErrorCategory::EncodingError,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Format => "FormatError",
            Self::Parse => "ParseError",
            Self::EmptyMesh => "EmptyMeshError",
            Self::Encoding => "EncodingError",
            Self::MissingInput => "MissingInputError",
            Self::Config => "ConfigError",
            Self::Io => "IoError",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeckErrorCategory {
    Success,
    InputValidationError,
    IoSystemError,
    EncodingError,
}

impl DeckErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::EncodingError => 4,
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckError {
    kind: DeckErrorKind,
    code: &'static str,
    message: String,
}

impl DeckError {
    pub fn new(kind: DeckErrorKind, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
        }
    }

    pub fn format(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DeckErrorKind::Format, code, message)
    }

    pub fn parse(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DeckErrorKind::Parse, code, message)
    }

    pub fn empty_mesh(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DeckErrorKind::EmptyMesh, code, message)
    }

    pub fn encoding(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DeckErrorKind::Encoding, code, message)
    }

    pub fn missing_input(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DeckErrorKind::MissingInput, code, message)
    }

    pub fn config(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DeckErrorKind::Config, code, message)
    }

    pub fn io(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DeckErrorKind::Io, code, message)
    }

    pub const fn kind(&self) -> DeckErrorKind {
        self.kind
    }

    pub const fn category(&self) -> DeckErrorCategory {
        self.kind.category()
    }

    pub const fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category().is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.code, self.message)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category()
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}

impl Display for DeckError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.kind.as_str(), self.code, self.message)
    }
}

impl Error for DeckError {}
