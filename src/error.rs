use thiserror::Error;

/// Every failure an operator can hit. The `Display` text is exactly what
/// the command loop prints, so callers never rebuild messages by hand.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Incorrect first name.")]
    InvalidFirstName,

    #[error("Incorrect last name.")]
    InvalidLastName,

    #[error("Incorrect email.")]
    InvalidEmail,

    #[error("This email is already taken.")]
    DuplicateEmail,

    /// The id token did not match any registered student. Carries the raw
    /// token so the message echoes exactly what the operator typed.
    #[error("No student is found for id={0}.")]
    UnknownStudent(String),

    #[error("Incorrect points format.")]
    InvalidPoints,

    #[error("Unknown course.")]
    UnknownCourse,
}
