use evolve_data::OrganismKind;

/// Everything the player can ask the session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateInitialPlayer { kind: OrganismKind, name: String },
    AdvanceTurn,
    ShowStats,
    /// Manual evolution; gated exactly like the automatic check.
    Evolve,
    SaveWorld,
    LoadWorld,
    Quit,
}
