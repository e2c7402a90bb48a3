//! AI panel: staged input plus the solve and diagram request slots.

use super::{
    CompileService, Diagram, DiagramKind, DiagramRequest, DiagramService, RequestSlot, RequestState, Solution,
    SolveService, generate_diagram,
};
use crate::board::Board;
use crate::error::{BoardError, BoardResult};
use crate::items::{ImageData, ItemId};

/// Payload handed to a [`SolveService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveRequest {
    /// Encoded raster bytes.
    pub image: Vec<u8>,
    pub instruction: String,
}

/// Staged input and request state behind the AI panel.
///
/// Each request kind has its own slot; a second request of the same kind is
/// rejected with [`BoardError::Busy`] while the first is outstanding. A failed
/// request leaves the staged input as it was.
#[derive(Debug, Clone, Default)]
pub struct AssistPanel {
    staged: Option<ImageData>,
    pub instruction: String,
    solve: RequestSlot<Solution>,
    diagram: RequestSlot<ItemId>,
}

impl AssistPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn staged(&self) -> Option<&ImageData> {
        self.staged.as_ref()
    }

    /// Capture pasted image bytes as the solve input instead of placing them
    /// on the board. Invalid bytes leave the panel unchanged.
    pub fn stage_from_clipboard(&mut self, bytes: &[u8]) -> BoardResult<()> {
        let image = ImageData::from_bytes(bytes)?;
        log::debug!("staged {}x{} image for solving", image.width, image.height);
        self.staged = Some(image);
        Ok(())
    }

    pub fn solve_state(&self) -> &RequestState<Solution> {
        self.solve.state()
    }

    pub fn diagram_state(&self) -> &RequestState<ItemId> {
        self.diagram.state()
    }

    pub fn solution(&self) -> Option<&Solution> {
        self.solve.result()
    }

    pub fn is_busy(&self) -> bool {
        self.solve.is_busy() || self.diagram.is_busy()
    }

    /// Start a solve of the staged image. The caller sends the returned
    /// request to its [`SolveService`] and reports back via
    /// [`finish_solve`](Self::finish_solve).
    pub fn begin_solve(&mut self) -> BoardResult<SolveRequest> {
        if self.solve.is_busy() {
            return Err(BoardError::Busy);
        }
        let image = self
            .staged
            .as_ref()
            .ok_or_else(|| BoardError::AiRequest("no image staged".to_string()))?
            .data()
            .ok_or_else(|| BoardError::UnsupportedImage("staged image is not valid base64".to_string()))?;
        self.solve.begin()?;
        Ok(SolveRequest {
            image,
            instruction: self.instruction.clone(),
        })
    }

    pub fn finish_solve(&mut self, result: BoardResult<Solution>) {
        self.solve.finish(result);
    }

    /// Start a diagram request. Blank descriptions are rejected.
    pub fn begin_diagram(&mut self, description: &str, kind: DiagramKind) -> BoardResult<DiagramRequest> {
        if self.diagram.is_busy() {
            return Err(BoardError::Busy);
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(BoardError::AiRequest("diagram description is empty".to_string()));
        }
        self.diagram.begin()?;
        Ok(DiagramRequest {
            description: description.to_string(),
            kind,
        })
    }

    /// Record a diagram outcome. On success the compiled image is placed on
    /// the board and its id returned.
    pub fn finish_diagram(&mut self, board: &mut Board, result: BoardResult<Diagram>) -> Option<ItemId> {
        self.complete_diagram(board, result).ok()
    }

    fn complete_diagram(&mut self, board: &mut Board, result: BoardResult<Diagram>) -> BoardResult<ItemId> {
        if !self.diagram.is_busy() {
            log::warn!("dropping diagram completion with no request in flight");
            return Err(BoardError::AiRequest("no diagram request in flight".to_string()));
        }
        let placed = result.and_then(|diagram| board.insert_image_bytes(&diagram.image));
        self.diagram.finish(placed.clone());
        placed
    }

    /// Run a full solve against `service`.
    pub async fn solve_with(&mut self, service: &dyn SolveService) -> BoardResult<Solution> {
        let request = self.begin_solve()?;
        let result = service.solve(&request.image, &request.instruction).await;
        self.finish_solve(result.clone());
        result
    }

    /// Run generate → compile → place against the given collaborators.
    pub async fn diagram_with(
        &mut self,
        board: &mut Board,
        generator: &dyn DiagramService,
        compiler: &dyn CompileService,
        description: &str,
        kind: DiagramKind,
    ) -> BoardResult<ItemId> {
        let request = self.begin_diagram(description, kind)?;
        let result = generate_diagram(generator, compiler, &request).await;
        self.complete_diagram(board, result)
    }

    /// Clear failure notices on both slots.
    pub fn dismiss_notice(&mut self) {
        self.solve.dismiss();
        self.diagram.dismiss();
    }

    pub fn notice(&self) -> Option<&str> {
        self.solve.notice().or_else(|| self.diagram.notice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::image::tests::png_bytes;
    use crate::services::tests::Canned;
    use kurbo::Size;

    fn solution() -> Solution {
        Solution {
            ocr: "2x + 3 = 7".to_string(),
            solution: "x = 2".to_string(),
        }
    }

    #[test]
    fn test_solve_requires_staged_image() {
        let mut panel = AssistPanel::new();
        assert!(matches!(panel.begin_solve(), Err(BoardError::AiRequest(_))));
        assert_eq!(panel.solve_state(), &RequestState::Idle);
    }

    #[test]
    fn test_stage_from_clipboard_validates() {
        let mut panel = AssistPanel::new();
        assert!(panel.stage_from_clipboard(b"junk").is_err());
        assert!(panel.staged().is_none());
        panel.stage_from_clipboard(&png_bytes(16, 16)).unwrap();
        assert_eq!(panel.staged().unwrap().width, 16);
    }

    #[test]
    fn test_second_solve_is_busy() {
        let mut panel = AssistPanel::new();
        panel.stage_from_clipboard(&png_bytes(2, 2)).unwrap();
        panel.instruction = "solve for x".to_string();
        let request = panel.begin_solve().unwrap();
        assert_eq!(request.instruction, "solve for x");
        assert_eq!(request.image, png_bytes(2, 2));
        assert_eq!(panel.begin_solve(), Err(BoardError::Busy));
        assert!(panel.is_busy());

        panel.finish_solve(Ok(solution()));
        assert!(!panel.is_busy());
        assert_eq!(panel.solution(), Some(&solution()));
    }

    #[test]
    fn test_solve_failure_keeps_staged_input() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut panel = AssistPanel::new();
        panel.stage_from_clipboard(&png_bytes(2, 2)).unwrap();
        let service = Canned::<Solution>::new(Err(BoardError::AiRequest("network down".to_string())));

        let err = pollster::block_on(panel.solve_with(&service)).unwrap_err();
        assert_eq!(err, BoardError::AiRequest("network down".to_string()));
        assert!(!panel.is_busy());
        assert!(panel.staged().is_some());
        assert!(panel.notice().unwrap().contains("network down"));

        panel.dismiss_notice();
        assert!(panel.notice().is_none());
    }

    #[test]
    fn test_solve_with_service() {
        let mut panel = AssistPanel::new();
        panel.stage_from_clipboard(&png_bytes(2, 2)).unwrap();
        let service = Canned::new(Ok(solution()));
        let result = pollster::block_on(panel.solve_with(&service)).unwrap();
        assert_eq!(result.solution, "x = 2");
        assert_eq!(service.calls.get(), 1);
    }

    #[test]
    fn test_diagram_success_places_image() {
        let mut board = Board::default();
        board.set_viewport(Size::new(1000.0, 800.0));
        let mut panel = AssistPanel::new();
        let generator = Canned::new(Ok("\\begin{tikzpicture}\\end{tikzpicture}".to_string()));
        let compiler = Canned::new(Ok(png_bytes(300, 100)));

        let id = pollster::block_on(panel.diagram_with(&mut board, &generator, &compiler, "a bar chart", DiagramKind::Chart))
            .unwrap();
        let widget = board.store().widget(id).unwrap();
        assert_eq!(widget.scale, 1.0);
        assert_eq!(panel.diagram_state(), &RequestState::Succeeded(id));
    }

    #[test]
    fn test_diagram_compile_failure_surfaces_log() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut board = Board::default();
        let mut panel = AssistPanel::new();
        let generator = Canned::new(Ok("\\draw".to_string()));
        let compiler = Canned::<Vec<u8>>::new(Err(BoardError::Compile {
            message: "compile failed".to_string(),
            log: Some("! Undefined control sequence.".to_string()),
        }));

        let result = pollster::block_on(panel.diagram_with(&mut board, &generator, &compiler, "graph", DiagramKind::Graph));
        assert!(result.is_err());
        assert!(board.store().is_empty());
        assert!(panel.notice().unwrap().contains("Undefined control sequence"));
        assert!(!panel.is_busy());
    }

    #[test]
    fn test_blank_description_rejected() {
        let mut panel = AssistPanel::new();
        assert!(panel.begin_diagram("   ", DiagramKind::TableLike).is_err());
        assert_eq!(panel.diagram_state(), &RequestState::Idle);
    }

    #[test]
    fn test_second_diagram_is_busy() {
        let mut panel = AssistPanel::new();
        panel.begin_diagram("table of squares", DiagramKind::TableLike).unwrap();
        assert_eq!(panel.begin_diagram("again", DiagramKind::TableLike), Err(BoardError::Busy));
        // Solve has its own slot.
        panel.stage_from_clipboard(&png_bytes(1, 1)).unwrap();
        assert!(panel.begin_solve().is_ok());
    }
}
