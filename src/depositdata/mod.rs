pub mod credentials;
pub mod domain;
pub mod params;
pub mod process;
pub mod result;
pub mod root;
pub mod types;
pub mod verify;

pub use params::{DepositParameters, OutputFormat};
pub use process::{DepositInput, process, process_with};
pub use result::DepositResult;
pub use root::{RootService, TreeHashRoots};
pub use types::{DepositData, DepositMessage};
