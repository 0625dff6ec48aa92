pub mod clarify;
pub mod client;
pub mod persona;
pub mod prompt;
pub mod types;

mod parse;

pub use client::AnalystClient;
pub use persona::Persona;
pub use types::{AnalysisInput, Flag, FlagKind, InputKind, PersonaVerdict};
