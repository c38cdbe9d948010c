use thiserror::Error;

/// Which of the two rooted records failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    DepositMessage,
    DepositData,
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Record::DepositMessage => write!(f, "deposit message"),
            Record::DepositData => write!(f, "deposit data"),
        }
    }
}

#[derive(Error, Debug)]
#[error("{0}")]
pub struct RootError(pub String);

#[derive(Error, Debug, PartialEq)]
pub enum SignerError {
    #[error("account {0} is locked")]
    Locked(String),
    #[error("signer unavailable: {0}")]
    Unavailable(String),
    #[error("blst error: {0}")]
    Blst(String),
}

#[derive(Error, Debug)]
pub enum DepositError {
    #[error("no data")]
    NoInput,
    #[error("validator account {account} does not provide a public key")]
    NoPublicKey { account: String },
    #[error("failed to generate {record} root for account {account}")]
    RootComputation {
        account: String,
        record: Record,
        #[source]
        source: RootError,
    },
    #[error("failed to sign deposit message for account {account}")]
    Signing {
        account: String,
        #[source]
        source: SignerError,
    },
    #[error("validator account {account} does not expose a wallet")]
    NoWallet { account: String },
    #[error("invalid withdrawal credentials: {0}")]
    InvalidWithdrawalCredentials(String),
    #[error("invalid deposit amount: {0}")]
    InvalidAmount(String),
    #[error("invalid fork version: {0}")]
    InvalidForkVersion(String),
}
