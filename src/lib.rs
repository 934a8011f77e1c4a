pub mod credential;
pub mod dump;
pub mod engine;
pub mod export;
pub mod extract;
pub mod group;
pub mod io;
pub mod pot;
pub mod report;
pub mod sink;
pub mod stats;

pub mod prelude {
    pub use crate::credential::{CrackedEntry, CredentialRecord, NtHash};
    pub use crate::engine::{Engine, Finding};
}
