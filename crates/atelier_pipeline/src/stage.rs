//! Per-item stage progression.

/// Stages an image moves through, strictly in order with no backtracking.
///
/// The two parenthesized stages are conditional: `AlphaThumbnailReady` only
/// occurs when a background remover is configured, `CompanionAssetReady`
/// only when the batch carries a same-stem archive. `Failed` is terminal and
/// reachable from every non-terminal stage; reaching it aborts the remaining
/// steps for that item only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum ItemStage {
    /// Bytes received and decoded
    #[display("received")]
    Received,
    /// Original uploaded and linked
    #[display("original uploaded")]
    OriginalUploaded,
    /// JPEG and WebP thumbnails uploaded and linked
    #[display("thumbnails ready")]
    ThumbnailReady,
    /// Background-removed alpha thumbnail uploaded and linked
    #[display("alpha thumbnail ready")]
    AlphaThumbnailReady,
    /// Summary text obtained (or its failure marker recorded)
    #[display("summary ready")]
    SummaryReady,
    /// Companion asset uploaded and linked
    #[display("companion asset ready")]
    CompanionAssetReady,
    /// Result assembled, item marked processed
    #[display("done")]
    Done,
    /// Item aborted; excluded from results
    #[display("failed")]
    Failed,
}

impl ItemStage {
    /// Whether the item can still advance.
    pub fn is_terminal(self) -> bool {
        matches!(self, ItemStage::Done | ItemStage::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_order_forward() {
        assert!(ItemStage::Received < ItemStage::OriginalUploaded);
        assert!(ItemStage::OriginalUploaded < ItemStage::ThumbnailReady);
        assert!(ItemStage::SummaryReady < ItemStage::Done);
    }

    #[test]
    fn only_done_and_failed_are_terminal() {
        assert!(ItemStage::Done.is_terminal());
        assert!(ItemStage::Failed.is_terminal());
        assert!(!ItemStage::SummaryReady.is_terminal());
    }
}
