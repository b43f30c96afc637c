//! Response code registry
//!
//! Static mappings from the 16-bit response codes to categories, statuses,
//! data shapes and server errors. The high byte of a code names its
//! category; the full value names the specific status, shape or error.

use thiserror::Error;

/// Response category, taken from the high byte of a response code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Category {
    Error = 0x01,
    Status = 0x02,
    Data = 0x03,
    ClError = 0x04,
    CqpError = 0x05,
}

impl Category {
    /// Category of a response code, if the high byte names one
    pub fn of(code: u16) -> Option<Self> {
        match (code >> 8) as u8 {
            0x01 => Some(Category::Error),
            0x02 => Some(Category::Status),
            0x03 => Some(Category::Data),
            0x04 => Some(Category::ClError),
            0x05 => Some(Category::CqpError),
            _ => None,
        }
    }
}

// =============================================================================
// Status
// =============================================================================

/// Status responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Status {
    Ok = 0x0201,
    ConnectOk = 0x0202,
    ByeOk = 0x0203,
    PingOk = 0x0204,
}

impl Status {
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0x0201 => Some(Status::Ok),
            0x0202 => Some(Status::ConnectOk),
            0x0203 => Some(Status::ByeOk),
            0x0204 => Some(Status::PingOk),
            _ => None,
        }
    }

    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn name(self) -> &'static str {
        match self {
            Status::Ok => "CQI_STATUS_OK",
            Status::ConnectOk => "CQI_STATUS_CONNECT_OK",
            Status::ByeOk => "CQI_STATUS_BYE_OK",
            Status::PingOk => "CQI_STATUS_PING_OK",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Data types
// =============================================================================

/// Payload shapes announced by DATA response codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum DataType {
    Byte = 0x0301,
    Bool = 0x0302,
    Int = 0x0303,
    String = 0x0304,
    ByteList = 0x0305,
    BoolList = 0x0306,
    IntList = 0x0307,
    StringList = 0x0308,
    IntInt = 0x0309,
    IntIntIntInt = 0x030A,
    IntTable = 0x030B,
}

impl DataType {
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0x0301 => Some(DataType::Byte),
            0x0302 => Some(DataType::Bool),
            0x0303 => Some(DataType::Int),
            0x0304 => Some(DataType::String),
            0x0305 => Some(DataType::ByteList),
            0x0306 => Some(DataType::BoolList),
            0x0307 => Some(DataType::IntList),
            0x0308 => Some(DataType::StringList),
            0x0309 => Some(DataType::IntInt),
            0x030A => Some(DataType::IntIntIntInt),
            0x030B => Some(DataType::IntTable),
            _ => None,
        }
    }

    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn name(self) -> &'static str {
        match self {
            DataType::Byte => "CQI_DATA_BYTE",
            DataType::Bool => "CQI_DATA_BOOL",
            DataType::Int => "CQI_DATA_INT",
            DataType::String => "CQI_DATA_STRING",
            DataType::ByteList => "CQI_DATA_BYTE_LIST",
            DataType::BoolList => "CQI_DATA_BOOL_LIST",
            DataType::IntList => "CQI_DATA_INT_LIST",
            DataType::StringList => "CQI_DATA_STRING_LIST",
            DataType::IntInt => "CQI_DATA_INT_INT",
            DataType::IntIntIntInt => "CQI_DATA_INT_INT_INT_INT",
            DataType::IntTable => "CQI_DATA_INT_TABLE",
        }
    }
}

// =============================================================================
// Server errors
// =============================================================================

/// Server-reported error kinds
///
/// `Error`, `ClError` and `CqpError` are the generic kinds of their
/// category, used for codes the registry does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // General / control
    Error,
    GeneralError,
    ConnectRefused,
    UserAbort,
    SyntaxError,

    // Corpus library
    ClError,
    NoSuchAttribute,
    WrongAttributeType,
    ClOutOfRange,
    Regex,
    CorpusAccess,
    OutOfMemory,
    Internal,

    // Query processor
    CqpError,
    CqpGeneral,
    NoSuchCorpus,
    InvalidField,
    CqpOutOfRange,
}

impl ErrorKind {
    /// Kind registered for a code, or the generic kind of its category.
    ///
    /// Returns `None` when the code is not in an error category at all.
    pub fn from_code(code: u16) -> Option<Self> {
        let kind = match code {
            0x0101 => ErrorKind::GeneralError,
            0x0102 => ErrorKind::ConnectRefused,
            0x0103 => ErrorKind::UserAbort,
            0x0104 => ErrorKind::SyntaxError,

            0x0401 => ErrorKind::NoSuchAttribute,
            0x0402 => ErrorKind::WrongAttributeType,
            0x0403 => ErrorKind::ClOutOfRange,
            0x0404 => ErrorKind::Regex,
            0x0405 => ErrorKind::CorpusAccess,
            0x0406 => ErrorKind::OutOfMemory,
            0x0407 => ErrorKind::Internal,

            0x0501 => ErrorKind::CqpGeneral,
            0x0502 => ErrorKind::NoSuchCorpus,
            0x0503 => ErrorKind::InvalidField,
            0x0504 => ErrorKind::CqpOutOfRange,

            _ => match Category::of(code)? {
                Category::Error => ErrorKind::Error,
                Category::ClError => ErrorKind::ClError,
                Category::CqpError => ErrorKind::CqpError,
                Category::Status | Category::Data => return None,
            },
        };
        Some(kind)
    }

    /// Category the kind belongs to
    pub fn category(self) -> Category {
        match self {
            ErrorKind::Error
            | ErrorKind::GeneralError
            | ErrorKind::ConnectRefused
            | ErrorKind::UserAbort
            | ErrorKind::SyntaxError => Category::Error,
            ErrorKind::ClError
            | ErrorKind::NoSuchAttribute
            | ErrorKind::WrongAttributeType
            | ErrorKind::ClOutOfRange
            | ErrorKind::Regex
            | ErrorKind::CorpusAccess
            | ErrorKind::OutOfMemory
            | ErrorKind::Internal => Category::ClError,
            ErrorKind::CqpError
            | ErrorKind::CqpGeneral
            | ErrorKind::NoSuchCorpus
            | ErrorKind::InvalidField
            | ErrorKind::CqpOutOfRange => Category::CqpError,
        }
    }

    /// Whether this is the catch-all kind of its category
    pub fn is_generic(self) -> bool {
        matches!(self, ErrorKind::Error | ErrorKind::ClError | ErrorKind::CqpError)
    }

    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Error => "CQI_ERROR",
            ErrorKind::GeneralError => "CQI_ERROR_GENERAL_ERROR",
            ErrorKind::ConnectRefused => "CQI_ERROR_CONNECT_REFUSED",
            ErrorKind::UserAbort => "CQI_ERROR_USER_ABORT",
            ErrorKind::SyntaxError => "CQI_ERROR_SYNTAX_ERROR",
            ErrorKind::ClError => "CQI_CL_ERROR",
            ErrorKind::NoSuchAttribute => "CQI_CL_ERROR_NO_SUCH_ATTRIBUTE",
            ErrorKind::WrongAttributeType => "CQI_CL_ERROR_WRONG_ATTRIBUTE_TYPE",
            ErrorKind::ClOutOfRange => "CQI_CL_ERROR_OUT_OF_RANGE",
            ErrorKind::Regex => "CQI_CL_ERROR_REGEX",
            ErrorKind::CorpusAccess => "CQI_CL_ERROR_CORPUS_ACCESS",
            ErrorKind::OutOfMemory => "CQI_CL_ERROR_OUT_OF_MEMORY",
            ErrorKind::Internal => "CQI_CL_ERROR_INTERNAL",
            ErrorKind::CqpError => "CQI_CQP_ERROR",
            ErrorKind::CqpGeneral => "CQI_CQP_ERROR_GENERAL",
            ErrorKind::NoSuchCorpus => "CQI_CQP_ERROR_NO_SUCH_CORPUS",
            ErrorKind::InvalidField => "CQI_CQP_ERROR_INVALID_FIELD",
            ErrorKind::CqpOutOfRange => "CQI_CQP_ERROR_OUT_OF_RANGE",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::Error => "unspecified server error",
            ErrorKind::GeneralError => "general server error",
            ErrorKind::ConnectRefused => "server refused the connection",
            ErrorKind::UserAbort => "request aborted by the user",
            ErrorKind::SyntaxError => "request could not be parsed by the server",
            ErrorKind::ClError => "unspecified corpus library error",
            ErrorKind::NoSuchAttribute => "CQi server couldn't open attribute",
            ErrorKind::WrongAttributeType => "attribute has the wrong type for this operation",
            ErrorKind::ClOutOfRange => "id, index or corpus position out of range",
            ErrorKind::Regex => "invalid regular expression",
            ErrorKind::CorpusAccess => "corpus data could not be accessed",
            ErrorKind::OutOfMemory => {
                "CQi server has run out of memory; try discarding some other corpora and/or subcorpora"
            }
            ErrorKind::Internal => "Classical 'please contact technical support' error",
            ErrorKind::CqpError => "unspecified query processor error",
            ErrorKind::CqpGeneral => "query processor error",
            ErrorKind::NoSuchCorpus => "no such corpus or subcorpus",
            ErrorKind::InvalidField => "subcorpus has no such field",
            ErrorKind::CqpOutOfRange => "A number is out of range",
        }
    }
}

/// An error response from the server
///
/// Keeps the raw code, so unregistered codes stay visible even though they
/// map to a generic kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} (code 0x{:04x}): {}", .kind.name(), .code, .description)]
pub struct ServerError {
    pub code: u16,
    pub kind: ErrorKind,
    pub description: &'static str,
}

impl ServerError {
    /// Build the error for a code in one of the error categories
    pub fn from_code(code: u16) -> Option<Self> {
        let kind = ErrorKind::from_code(code)?;
        Some(Self {
            code,
            kind,
            description: kind.description(),
        })
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }
}
