//! Running ID state threaded through one encode or decode pass

/// Previously seen IDs that later operands are delta-encoded against.
///
/// Lives on the stack of a single call; never shared between streams.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdState {
    /// Last result ID written or read
    pub prev_result: u32,
    /// Last Decorate/MemberDecorate target
    pub prev_decorate: u32,
}
