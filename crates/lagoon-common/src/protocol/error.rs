use thiserror::Error;

#[derive(Error, Debug)]
pub enum LagoonError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for LagoonError {
    fn from(err: serde_json::Error) -> Self {
        LagoonError::Decode(err.to_string())
    }
}

impl LagoonError {
    /// Maps an I/O error from an active send/receive into the taxonomy:
    /// peer-gone conditions become `Connection`, everything else stays `Io`.
    pub fn from_io(err: std::io::Error, context: &str) -> Self {
        match err.kind() {
            std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::BrokenPipe
            | std::io::ErrorKind::NotConnected => {
                LagoonError::Connection(format!("{}: connection lost ({})", context, err))
            }
            _ => LagoonError::Io(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, LagoonError>;
