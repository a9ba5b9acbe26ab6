/// Capabilities of the object that owns the edited state.
pub trait ObjectCapabilities: Send + Sync {
    /// Whether creating blocks is forbidden in this object.
    fn blocks_restricted(&self) -> bool {
        false
    }

    fn is_read_only(&self) -> bool {
        false
    }
}

/// Plain flags, handy for embedders without their own object type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectFlags {
    pub blocks_restricted: bool,
    pub read_only: bool,
}

impl ObjectCapabilities for ObjectFlags {
    fn blocks_restricted(&self) -> bool {
        self.blocks_restricted
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }
}
