use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Could not find values for DigitalOcean client_id and api_key.\n\
        They must be specified via either command line argument (--client-id and --api-key),\n\
        or environment variables (DO_CLIENT_ID and DO_API_KEY)"
    )]
    CredentialsMissing,

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
