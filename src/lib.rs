//! Rendering engine for restaurant no-show revenue reports.
//!
//! The crate takes the answers collected by the calculator wizard, derives the
//! business figures (no-show rate, revenue loss, projections), and renders
//! them into a fixed-geometry, multi-page PDF using imperative draw calls on a
//! `printpdf` surface.  Missing fonts and images degrade to fallbacks and
//! placeholders instead of failing; the finished document is returned together
//! with a structured list of every degradation that occurred.
//!
//! ```no_run
//! use noshow_report::{render_report, FormAnswers};
//!
//! let answers = FormAnswers::from_json(r#"{"restaurantName": "Zur Post", "openDays": 7}"#)?;
//! let report = render_report(&answers)?;
//! std::fs::write("no-show-report.pdf", &report.bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod assets;
pub mod compose;
pub mod context;
pub mod draw;
pub mod error;
pub mod form;
pub mod metrics;
pub mod page;
pub mod text;
pub mod tiles;

#[cfg(feature = "links")]
pub mod links;

pub use assets::{AssetLibrary, RenderWarning};
pub use compose::{render_report, render_with_library, RenderedReport};
pub use context::ReportContext;
pub use error::ReportError;
pub use form::{AnswerValue, FormAnswers};
pub use metrics::{derive, DerivedMetrics};
