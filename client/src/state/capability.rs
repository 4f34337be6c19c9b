//! Delete-capability state fetched once at startup.

#[cfg(test)]
#[path = "capability_test.rs"]
mod capability_test;

/// Whether this client may use destructive controls, per the server's
/// `/api/capabilities` answer for our (possibly absent) admin token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CapabilityState {
    pub can_delete: bool,
    /// `false` until the capabilities fetch resolves; delete controls stay
    /// hidden rather than flashing in and out.
    pub loaded: bool,
}
