/// A page request as issued by the controller. Echoed back verbatim in
/// [`crate::Msg::PageFetched`] so the response can be matched to its request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub page: u32,
    pub limit: u32,
    pub section: Option<String>,
    pub append: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPage(PageRequest),
    /// Start watching the trailing sentinel at [`crate::SENTINEL_THRESHOLD`].
    ObserveSentinel,
    /// Stop watching the sentinel. Emitted exactly once per `ObserveSentinel`.
    DisconnectSentinel,
}
