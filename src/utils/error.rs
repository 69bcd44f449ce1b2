use thiserror::Error;

/// Generic message shown when a submission fails without a store message.
pub const GENERIC_SUBMIT_FAILURE: &str = "Error al registrar la reserva. Inténtalo de nuevo.";

/// Generic message shown when loading reservations fails without a store message.
pub const GENERIC_LIST_FAILURE: &str = "Error al consultar las reservas. Inténtalo de nuevo.";

/// Which store request an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    List,
    Create,
}

impl std::fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreOperation::List => f.write_str("listing reservations"),
            StoreOperation::Create => f.write_str("creating a reservation"),
        }
    }
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("All fields are required; missing: {}", .fields.join(", "))]
    MissingField { fields: Vec<&'static str> },

    #[error("Invalid time range: start {start} must be before end {end}")]
    InvalidTimeRange { start: String, end: String },

    #[error("Date {date} is before today ({today})")]
    DateInPast { date: String, today: String },

    #[error("Invalid time '{value}': {reason}")]
    InvalidTime { value: String, reason: String },

    #[error("Unknown room '{0}'")]
    UnknownRoom(String),

    #[error("Slot {slot} is not available for {room} on {date}")]
    SlotUnavailable {
        room: String,
        date: String,
        slot: String,
    },

    #[error("Reservation store unreachable: {0}")]
    StoreUnreachable(#[from] reqwest::Error),

    #[error("Reservation store rejected the request: {message}")]
    StoreRejected { status: u16, message: String },

    #[error("Reservation store failed with status {status} while {operation}")]
    UnknownFailure {
        status: u16,
        operation: StoreOperation,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Store,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BookingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BookingError::MissingField { .. }
            | BookingError::InvalidTimeRange { .. }
            | BookingError::DateInPast { .. }
            | BookingError::InvalidTime { .. }
            | BookingError::UnknownRoom(_)
            | BookingError::SlotUnavailable { .. } => ErrorCategory::Input,
            BookingError::StoreUnreachable(_)
            | BookingError::StoreRejected { .. }
            | BookingError::UnknownFailure { .. } => ErrorCategory::Store,
            BookingError::ConfigError { .. }
            | BookingError::MissingConfigError { .. }
            | BookingError::InvalidConfigValueError { .. }
            | BookingError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            BookingError::IoError(_)
            | BookingError::SerializationError(_)
            | BookingError::CsvError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Store => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Booking-flow errors never end the session: the user fixes the input
    /// or re-triggers the action.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.category(), ErrorCategory::Input | ErrorCategory::Store)
    }

    /// Message meant for the person filling the form.
    pub fn user_friendly_message(&self) -> String {
        match self {
            BookingError::MissingField { .. } => "Todos los campos son obligatorios".to_string(),
            BookingError::StoreRejected { message, .. } => message.clone(),
            BookingError::UnknownFailure { operation, .. } => match operation {
                StoreOperation::List => GENERIC_LIST_FAILURE.to_string(),
                StoreOperation::Create => GENERIC_SUBMIT_FAILURE.to_string(),
            },
            BookingError::StoreUnreachable(_) => {
                "No se pudo contactar el servicio de reservas".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BookingError::MissingField { .. } => "Fill in every field before submitting",
            BookingError::InvalidTimeRange { .. } => "Pick an end time after the start time",
            BookingError::DateInPast { .. } => "Pick today or a later date",
            BookingError::InvalidTime { .. } => "Use the HH:MM format, e.g. 09:30",
            BookingError::UnknownRoom(_) => "Use one of salon1, salon2 or salon3",
            BookingError::SlotUnavailable { .. } => {
                "Run `slots` to see the times that are still free"
            }
            BookingError::StoreUnreachable(_) => {
                "Check that the reservation API is running and the base URL is correct"
            }
            BookingError::StoreRejected { .. } => "Correct the reservation and submit again",
            BookingError::UnknownFailure { .. } => "Try again in a moment",
            BookingError::ConfigError { .. }
            | BookingError::MissingConfigError { .. }
            | BookingError::InvalidConfigValueError { .. }
            | BookingError::ConfigValidationError { .. } => {
                "Review the configuration file and command-line flags"
            }
            BookingError::IoError(_) => "Check file paths and permissions",
            BookingError::SerializationError(_) | BookingError::CsvError(_) => {
                "Report this problem; the data could not be encoded"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
