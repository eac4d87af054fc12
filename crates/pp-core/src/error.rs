/// Alias for `Result<T, CatalogError>`.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while loading or validating a content catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The document is not valid catalog JSON.
    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two entries of the same kind share an id.
    #[error("duplicate {kind} id: \"{id}\"")]
    DuplicateId {
        /// Entry kind (location, challenge, npc, concept, spell).
        kind: &'static str,
        /// The repeated id.
        id: String,
    },

    /// The start location is not in the catalog.
    #[error("start location \"{0}\" does not exist")]
    MissingStart(String),

    /// A reference points at an id that does not exist.
    #[error("{from} refers to unknown {kind} \"{id}\"")]
    DanglingReference {
        /// Where the reference was found.
        from: String,
        /// Expected kind of the target.
        kind: &'static str,
        /// The unresolved id.
        id: String,
    },

    /// A challenge lacks data its kind requires.
    #[error("challenge \"{id}\" is invalid: {reason}")]
    InvalidChallenge {
        /// Challenge id.
        id: String,
        /// What is wrong.
        reason: &'static str,
    },
}
