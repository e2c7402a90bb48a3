//! Boundary to the AI and diagram collaborators.
//!
//! The board never talks to the network. Collaborators implement these traits;
//! the UI awaits their futures and hands completions back through the
//! [`AssistPanel`] request slots.

mod assist;
mod request;

pub use assist::{AssistPanel, SolveRequest};
pub use request::{RequestSlot, RequestState};

use crate::error::BoardResult;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Boxed future for collaborator calls (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Result of an AI solve call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Text recognised in the submitted image.
    pub ocr: String,
    pub solution: String,
}

/// Diagram family requested from the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DiagramKind {
    #[default]
    TableLike,
    Graph,
    Chart,
}

impl DiagramKind {
    pub const ALL: [DiagramKind; 3] = [DiagramKind::TableLike, DiagramKind::Graph, DiagramKind::Chart];

    pub fn name(self) -> &'static str {
        match self {
            DiagramKind::TableLike => "table-like",
            DiagramKind::Graph => "graph",
            DiagramKind::Chart => "chart",
        }
    }
}

/// A diagram description ready to send to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramRequest {
    pub description: String,
    pub kind: DiagramKind,
}

/// Markup produced by the generator and the raster it compiled to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    pub markup: String,
    /// Encoded raster image.
    pub image: Vec<u8>,
}

/// OCR and solve a staged image.
pub trait SolveService {
    fn solve<'a>(&'a self, image: &'a [u8], instruction: &'a str) -> BoxFuture<'a, BoardResult<Solution>>;
}

/// Turn a description into diagram markup.
pub trait DiagramService {
    fn generate<'a>(&'a self, request: &'a DiagramRequest) -> BoxFuture<'a, BoardResult<String>>;
}

/// Compile diagram markup into an encoded raster.
///
/// Failures should be [`BoardError::Compile`](crate::BoardError::Compile)
/// carrying the compiler log when one is available.
pub trait CompileService {
    fn compile<'a>(&'a self, markup: &'a str) -> BoxFuture<'a, BoardResult<Vec<u8>>>;
}

/// Generate markup for `request`, then compile it.
///
/// Fails with whichever step failed first; the compiler is not called when
/// generation fails.
pub async fn generate_diagram(
    generator: &dyn DiagramService,
    compiler: &dyn CompileService,
    request: &DiagramRequest,
) -> BoardResult<Diagram> {
    log::debug!("generating {} diagram", request.kind.name());
    let markup = generator.generate(request).await?;
    let image = compiler.compile(&markup).await?;
    Ok(Diagram { markup, image })
}
