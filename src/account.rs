use colored::*;
use eyre::{Result, WrapErr, bail, eyre};
use log::*;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use alloy::primitives::{B256, FixedBytes, hex};

use crate::{
    depositdata::{
        domain::DST,
        types::{BlsPublicKey, BlsSignature},
    },
    error::SignerError,
};

/// Access to the wallet holding an account
pub trait AccountWalletProvider {
    fn wallet_name(&self) -> String;
}

/// A validator key holder as seen by the deposit pipeline.
///
/// The secret key never leaves the account, callers only get back
/// signatures over the 32 byte signing roots they hand in.
pub trait ValidatorAccount: Send + Sync {
    fn name(&self) -> String;

    /// Plain BLS public key
    fn public_key(&self) -> Option<BlsPublicKey>;

    /// Group public key of a distributed (threshold) account
    fn composite_public_key(&self) -> Option<BlsPublicKey> {
        None
    }

    /// BLS sign an already domain separated signing root
    fn sign(&self, signing_root: &B256) -> Result<BlsSignature, SignerError>;

    /// `None` if the account does not know its wallet
    fn wallet(&self) -> Option<&dyn AccountWalletProvider> {
        None
    }
}

/// The public key to deposit for: composite key first, then the plain key
pub fn best_public_key(account: &dyn ValidatorAccount) -> Option<BlsPublicKey> {
    [account.composite_public_key(), account.public_key()]
        .into_iter()
        .flatten()
        .find(|pubkey| *pubkey != BlsPublicKey::ZERO)
}

#[derive(Debug)]
struct Wallet {
    name: String,
}

impl AccountWalletProvider for Wallet {
    fn wallet_name(&self) -> String {
        self.name.clone()
    }
}

/// Account holding its BLS secret key in memory
#[derive(Debug)]
pub struct LocalAccount {
    pub name: String,
    pub pubkey: BlsPublicKey,
    wallet: Option<Wallet>,
    secret: Mutex<Vec<u8>>,
}

impl LocalAccount {
    pub fn from_secret(name: &str, wallet: Option<&str>, secret: &[u8]) -> Result<Self> {
        let bls_sk = blst::min_pk::SecretKey::from_bytes(secret)
            .map_err(|e| eyre!("{:#?}", e))
            .wrap_err_with(|| format!("invalid secret key for account {name}"))?;
        let pubkey = BlsPublicKey::from(bls_sk.sk_to_pk().to_bytes());
        trace!("account {} pubkey: {}", name, hex::encode(pubkey));
        Ok(LocalAccount {
            name: name.to_string(),
            pubkey,
            wallet: wallet.map(|name| Wallet {
                name: name.to_string(),
            }),
            secret: Mutex::new(Vec::from(secret)),
        })
    }

    pub fn lock(&self) {
        if let Ok(mut secret) = self.secret.lock() {
            *secret = Vec::<u8>::new()
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.secret
            .lock()
            .map(|secret| !secret.is_empty())
            .unwrap_or(false)
    }

    /// Wallet qualified account name, `<wallet>/<account>`
    pub fn display_name(&self) -> String {
        match &self.wallet {
            Some(wallet) => format!("{}/{}", wallet.name, self.name),
            None => self.name.clone(),
        }
    }
}

impl ValidatorAccount for LocalAccount {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn public_key(&self) -> Option<BlsPublicKey> {
        Some(self.pubkey)
    }

    fn sign(&self, signing_root: &B256) -> Result<BlsSignature, SignerError> {
        let secret = self
            .secret
            .lock()
            .map_err(|e| SignerError::Unavailable(e.to_string()))?;
        if secret.is_empty() {
            return Err(SignerError::Locked(self.name.clone()));
        }
        let bls_sk = blst::min_pk::SecretKey::from_bytes(&secret)
            .map_err(|e| SignerError::Blst(format!("{:?}", e)))?;
        let sig = bls_sk.sign(signing_root.as_slice(), DST, &[]);
        Ok(FixedBytes::from(sig.to_bytes()))
    }

    fn wallet(&self) -> Option<&dyn AccountWalletProvider> {
        self.wallet
            .as_ref()
            .map(|wallet| wallet as &dyn AccountWalletProvider)
    }
}

/// Expand a list of keystore files and directories into keystore files
pub fn keystore_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        let path = PathBuf::from(
            shellexpand::full(&path.to_string_lossy())
                .wrap_err_with(|| format!("{:?}", path))?
                .to_string(),
        );
        if path.is_dir() {
            let mut entries = std::fs::read_dir(&path)
                .wrap_err_with(|| format!("{:?}", path))?
                .filter_map(|entry| entry.ok().map(|entry| entry.path()))
                .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
                .collect::<Vec<_>>();
            // read_dir order is platform dependent
            entries.sort();
            files.extend(entries);
        } else {
            files.push(path);
        }
    }
    Ok(files)
}

/// Decrypt an EIP-2335 keystore into an unlocked account.
///
/// The wallet name is the keystore's parent directory, the account name is
/// the keystore `name` field, falling back to its `path` and the file stem.
pub fn load_keystore(keypath: &Path, password: &str) -> Result<LocalAccount> {
    trace!("Reading keystore {}", keypath.display());
    let file = std::fs::File::open(keypath).wrap_err_with(|| format!("{:?}", keypath))?;
    let json = serde_json::from_reader::<_, serde_json::Value>(&file)?;
    let pubkey = match json.get("pubkey").and_then(|value| value.as_str()) {
        Some(pubkey) => pubkey.trim_start_matches("0x").to_lowercase(),
        None => bail!("{} is not a validator keystore", keypath.display()),
    };
    let file_stem = keypath
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let name = ["name", "path"]
        .iter()
        .filter_map(|key| json.get(*key).and_then(|value| value.as_str()))
        .find(|value| !value.is_empty())
        .unwrap_or(file_stem);
    let wallet = keypath
        .parent()
        .and_then(|dir| dir.file_name())
        .and_then(|dir| dir.to_str());

    let secret = eth_keystore::decrypt_key(keypath, password)
        .wrap_err_with(|| format!("failed to decrypt {}", keypath.display()))?;
    let account = LocalAccount::from_secret(name, wallet, &secret)?;
    if hex::encode(account.pubkey) != pubkey {
        bail!(
            "Pubkey mismatch for {}: keystore {}, derived {}",
            keypath.display(),
            pubkey,
            hex::encode(account.pubkey)
        );
    }
    debug!(
        "unlocked {}: {}",
        account.display_name().white().bold(),
        hex::encode(account.pubkey).blue()
    );
    Ok(account)
}

pub fn load_keystores(paths: &[PathBuf], password: &str) -> Result<Vec<LocalAccount>> {
    keystore_files(paths)?
        .iter()
        .map(|keypath| load_keystore(keypath, password))
        .collect()
}
