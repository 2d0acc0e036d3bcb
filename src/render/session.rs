//! # Render Sessions
//!
//! Inputs can change while a frame is still being computed. Only the newest
//! parameter set matters, so every render takes a [`RenderTicket`] from the
//! session's generation counter; starting a newer render supersedes all older
//! tickets, and the frame driver abandons superseded frames between rows.
//!
//! ```
//! use marblefusion::render::session::RenderSession;
//!
//! let session = RenderSession::new();
//! let first = session.begin();
//! let second = session.begin();
//! assert!(first.is_superseded());
//! assert!(second.is_current());
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::CanvasConfig;
use crate::error::{FusionError, Result};
use crate::palette::Palette;
use crate::pattern::FusionParams;

use super::{RenderResult, render_canvas};

/// Shared generation counter. Clones observe the same counter.
#[derive(Debug, Clone, Default)]
pub struct RenderSession {
    latest: Arc<AtomicU64>,
}

impl RenderSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, superseding every outstanding ticket.
    pub fn begin(&self) -> RenderTicket {
        let generation = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        RenderTicket {
            generation,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Most recently issued generation (0 before the first render).
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }

    /// Supersede all outstanding tickets without starting a render.
    pub fn cancel_all(&self) {
        self.latest.fetch_add(1, Ordering::AcqRel);
    }

    /// Render under a fresh ticket.
    ///
    /// Returns [`FusionError::Cancelled`] if another render began before
    /// this one finished.
    pub fn render(
        &self,
        palette: &Palette,
        params: &FusionParams,
        canvas: &CanvasConfig,
    ) -> Result<RenderResult> {
        let ticket = self.begin();
        render_canvas(palette, params, canvas, Some(&ticket))
    }
}

/// Proof of which generation a render belongs to.
#[derive(Debug, Clone)]
pub struct RenderTicket {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl RenderTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while no newer generation has started.
    #[inline]
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::Acquire) == self.generation
    }

    #[inline]
    pub fn is_superseded(&self) -> bool {
        !self.is_current()
    }

    /// `Err(Cancelled)` once superseded.
    pub fn check(&self) -> Result<()> {
        if self.is_current() {
            Ok(())
        } else {
            Err(FusionError::Cancelled {
                generation: self.generation,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{ColorStop, Rgb};

    fn palette() -> Palette {
        Palette::new(vec![
            ColorStop::new(Rgb::BLACK, 50.0),
            ColorStop::new(Rgb::WHITE, 50.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_generations_increase() {
        let session = RenderSession::new();
        assert_eq!(session.latest(), 0);
        let a = session.begin();
        let b = session.begin();
        assert_eq!(a.generation(), 1);
        assert_eq!(b.generation(), 2);
        assert!(a.is_superseded());
        assert!(b.is_current());
        assert!(b.check().is_ok());
    }

    #[test]
    fn test_clones_share_counter() {
        let session = RenderSession::new();
        let ticket = session.begin();
        session.clone().cancel_all();
        assert!(matches!(
            ticket.check(),
            Err(FusionError::Cancelled { generation: 1 })
        ));
    }

    #[test]
    fn test_superseded_render_is_discarded() {
        let session = RenderSession::new();
        let stale = session.begin();
        let _newer = session.begin();
        let result = render_canvas(
            &palette(),
            &FusionParams::default(),
            &CanvasConfig::THUMBNAIL,
            Some(&stale),
        );
        assert!(matches!(result, Err(FusionError::Cancelled { generation: 1 })));
    }

    #[test]
    fn test_session_render_completes() {
        let session = RenderSession::new();
        let result = session
            .render(&palette(), &FusionParams::default(), &CanvasConfig::THUMBNAIL)
            .unwrap();
        assert_eq!(result.pixels.width(), 64);
        assert_eq!(session.latest(), 1);
    }
}
