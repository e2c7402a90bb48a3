//! System clipboard boundary for pasted images.

use crate::board::Board;
use crate::error::{BoardError, BoardResult};
use crate::items::ItemId;
use crate::services::{AssistPanel, BoxFuture};

/// Where pasted image bytes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasteTarget {
    /// Place an image widget on the board.
    #[default]
    Board,
    /// Stage the image in the AI panel for solving.
    AssistPanel,
}

/// What a paste produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOutcome {
    Placed(ItemId),
    Staged,
}

/// Platform clipboard access.
pub trait ClipboardSource {
    /// Read encoded image bytes. Fails with
    /// [`BoardError::ClipboardUnavailable`] when access is denied or the
    /// clipboard holds no image.
    fn read_image(&self) -> BoxFuture<'_, BoardResult<Vec<u8>>>;
}

/// In-memory clipboard for testing and headless use.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    image: Option<Vec<u8>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(image: Vec<u8>) -> Self {
        Self { image: Some(image) }
    }

    pub fn set_image(&mut self, image: Option<Vec<u8>>) {
        self.image = image;
    }
}

impl ClipboardSource for MemoryClipboard {
    fn read_image(&self) -> BoxFuture<'_, BoardResult<Vec<u8>>> {
        Box::pin(async move {
            self.image
                .clone()
                .ok_or_else(|| BoardError::ClipboardUnavailable("clipboard holds no image".to_string()))
        })
    }
}

/// Read the clipboard and route the image to `target`.
///
/// Any failure becomes a board notice and leaves both the board and the panel
/// unchanged.
pub async fn paste(
    source: &dyn ClipboardSource,
    target: PasteTarget,
    board: &mut Board,
    panel: &mut AssistPanel,
) -> BoardResult<PasteOutcome> {
    let routed = match source.read_image().await {
        Ok(bytes) => match target {
            PasteTarget::Board => board.insert_image_bytes(&bytes).map(PasteOutcome::Placed),
            PasteTarget::AssistPanel => panel.stage_from_clipboard(&bytes).map(|()| PasteOutcome::Staged),
        },
        Err(err) => Err(err),
    };
    routed.inspect_err(|err| board.report(err))
}
