pub mod analyser;
pub mod config;
pub mod error;
pub mod extractor;
pub mod grammar;
pub mod identifier;

pub use analyser::IdentifierTypeAnalyser;
pub use config::{AnalyserConfig, ConfigLoader};
pub use error::{ConfigError, PositionError};
pub use extractor::{
    ChainSyntax, DescendantIdentifierExtractor, IdentifierExtractor, ParentPrefixExtractor,
};
pub use identifier::{ElementIdentifier, IdentifierType, Position, SelectorKind};
