use bcrypt::BcryptError;
use tokio::task::JoinError;

///
/// Internal error codes - grouped by the hundreds. 0xxx codes are internal faults,
/// 2xxx codes are request-level outcomes a caller may act on.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ErrorCode {
    HashThreadingIssue            = 0401,
    StorageError                  = 0503,
    InvalidJSON                   = 0505,
    InvalidAlgorithmConfig        = 0508,
    HashingError                  = 0509,
    InvalidPHCFormat              = 0510,
    UnknownAlgorithmVariant       = 0511,
    PasswordContainsForbiddenWord = 2001,
    PasswordTooShort              = 2002,
    NoUppercase                   = 2003,
    NoLowercase                   = 2004,
    NoDigit                       = 2005,
    NoSpecialCharacter            = 2006,
    PasswordTooCommon             = 2007,
    PasswordUsedBefore            = 2012,
    PasswordsDoNotMatch           = 2013,
    AccountNotFound               = 2101,
    TooManyFailedAttempts         = 2102,
    PasswordNotMatch              = 2103,
    AccountInactive               = 2104,
    NoResetCode                   = 2200,
    ResetWindowExpired            = 2202,
    ResetCodeMismatch             = 2203,
    ResetTokenNotFound            = 2204,
    NotificationFailed            = 2206,
    DuplicateEmail                = 2300,
    DuplicateUsername             = 2301,
}

impl ErrorCode {
    pub fn with_msg(&self, message: &str) -> GatehouseError {
        GatehouseError::new(*self, message)
    }
}

///
/// The caller-facing classification of an error. Dictates which messages are safe
/// to surface verbatim and which must be collapsed to a generic phrase.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ErrorKind {
    Validation,
    Duplicate,
    Authentication,
    Locked,
    Reset,
    Notification,
    Storage,
    Internal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GatehouseError {
    error_code: ErrorCode,
    message: String,
}

impl GatehouseError {
    pub fn new(error_code: ErrorCode, message: &str) -> Self {
        GatehouseError { error_code, message: message.to_string() }
    }

    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    ///
    /// Classify the error into the caller-facing taxonomy.
    ///
    pub fn kind(&self) -> ErrorKind {
        use ErrorCode::*;

        match &self.error_code {
            HashThreadingIssue      |
            InvalidAlgorithmConfig  |
            InvalidJSON             |
            InvalidPHCFormat        |
            HashingError            |
            UnknownAlgorithmVariant => ErrorKind::Internal,

            StorageError => ErrorKind::Storage,

            NoDigit                       |
            NoLowercase                   |
            NoSpecialCharacter            |
            NoUppercase                   |
            PasswordContainsForbiddenWord |
            PasswordsDoNotMatch           |
            PasswordTooCommon             |
            PasswordTooShort              |
            PasswordUsedBefore => ErrorKind::Validation,

            DuplicateEmail    |
            DuplicateUsername => ErrorKind::Duplicate,

            AccountInactive  |
            AccountNotFound  |
            PasswordNotMatch => ErrorKind::Authentication,

            TooManyFailedAttempts => ErrorKind::Locked,

            NoResetCode        |
            ResetCodeMismatch  |
            ResetTokenNotFound |
            ResetWindowExpired => ErrorKind::Reset,

            NotificationFailed => ErrorKind::Notification,
        }
    }

    ///
    /// The message that may be shown to an end user.
    ///
    /// Validation and duplicate failures are safe verbatim. Authentication and reset
    /// failures are collapsed to a single generic phrase so the response does not
    /// reveal whether an account exists or which reset precondition failed - the
    /// specific sub-type is still available internally via error_code().
    ///
    pub fn public_message(&self) -> &str {
        match self.kind() {
            ErrorKind::Validation     |
            ErrorKind::Duplicate      => self.message(),
            ErrorKind::Authentication => "Invalid credentials",
            ErrorKind::Locked         => "Too many failed attempts, please wait and try again",
            ErrorKind::Reset          => "The reset code or token is invalid or has expired, please request a new one",
            ErrorKind::Notification   => "The reset code could not be sent, please try again later",
            ErrorKind::Storage        |
            ErrorKind::Internal       => "Something went wrong, please try again",
        }
    }
}

impl From<argon2::Error> for GatehouseError {
    fn from(error: argon2::Error) -> Self {
        ErrorCode::InvalidAlgorithmConfig.with_msg(&format!("Invalid configuration for algorithm: {}", error))
    }
}

impl From<password_hash::Error> for GatehouseError {
    fn from(error: password_hash::Error) -> Self {
        ErrorCode::HashingError.with_msg(&format!("Unable to hash password: {}", error))
    }
}

impl From<serde_json::Error> for GatehouseError {
    fn from(error: serde_json::Error) -> Self {
        ErrorCode::InvalidJSON.with_msg(&format!("Unable to convert to json: {}", error))
    }
}

impl From<JoinError> for GatehouseError {
    fn from(error: JoinError) -> Self {
        ErrorCode::HashThreadingIssue.with_msg(&format!("Unable to hash: {}", error))
    }
}

impl From<BcryptError> for GatehouseError {
    fn from(error: BcryptError) -> Self {
        ErrorCode::InvalidAlgorithmConfig.with_msg(&format!("Unable to verify: {}", error))
    }
}
