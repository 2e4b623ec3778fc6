/// Why a notification could not be queued or delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The queue is at capacity; the notification was dropped.
    QueueFull,
    /// The worker has stopped and no longer accepts notifications.
    Closed,
    /// A sender or recipient address could not be parsed.
    InvalidAddress(String),
    /// The mail transport rejected or failed to deliver the message.
    Transport(String),
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchError::QueueFull => write!(f, "Mail queue is full"),
            DispatchError::Closed => write!(f, "Mail queue is closed"),
            DispatchError::InvalidAddress(msg) => write!(f, "Invalid mail address: {msg}"),
            DispatchError::Transport(msg) => write!(f, "Mail transport error: {msg}"),
        }
    }
}

impl std::error::Error for DispatchError {}

impl From<lettre::address::AddressError> for DispatchError {
    fn from(err: lettre::address::AddressError) -> Self {
        DispatchError::InvalidAddress(err.to_string())
    }
}

impl From<lettre::error::Error> for DispatchError {
    fn from(err: lettre::error::Error) -> Self {
        DispatchError::Transport(err.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for DispatchError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        DispatchError::Transport(err.to_string())
    }
}
