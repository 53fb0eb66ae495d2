//! Input state and render sequencing for an interactive front end
//!
//! The controller owns the current content, content kind and options. Every
//! input change issues a [`RenderRequest`] stamped with a fresh sequence
//! number. Requests are plain values and may run on any thread; when an
//! outcome comes back, [`Controller::complete`] applies it only if no newer
//! request has been issued since. A slow logo decode for an old request can
//! therefore never overwrite a newer preview.

use crate::error::Result;
use crate::models::{ContentKind, OptionChange, QrOptions};
use crate::render::{Render, render};
use std::sync::Arc;

/// Message shown when a render fails
pub const RENDER_FAILED_MESSAGE: &str =
    "Could not generate the QR code. Check that the content is valid.";

/// What the preview pane shows
#[derive(Debug, Clone)]
pub enum PreviewState {
    /// No content yet; show the kind's placeholder
    Placeholder,
    /// A request is in flight and nothing has been rendered yet
    Pending,
    /// Latest successful render
    Ready(Arc<Render>),
    /// The latest render failed; offer a retry
    Failed {
        /// User-facing message
        message: String,
    },
}

impl PreviewState {
    /// The render on display, if any
    pub fn render(&self) -> Option<&Render> {
        match self {
            PreviewState::Ready(render) => Some(render.as_ref()),
            _ => None,
        }
    }
}

/// A render job for one snapshot of the inputs
#[derive(Debug, Clone)]
pub struct RenderRequest {
    seq: u64,
    content: String,
    options: QrOptions,
}

impl RenderRequest {
    /// Sequence number of this request
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Run the render; may be called on a worker thread
    pub fn run(self) -> RenderOutcome {
        let result = render(&self.content, &self.options);
        RenderOutcome {
            seq: self.seq,
            result,
        }
    }
}

/// Result of a [`RenderRequest`], tagged with its sequence number
#[derive(Debug)]
pub struct RenderOutcome {
    seq: u64,
    result: Result<Render>,
}

impl RenderOutcome {
    /// Sequence number of the originating request
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Owns inputs and preview state
#[derive(Debug)]
pub struct Controller {
    kind: ContentKind,
    content: String,
    options: QrOptions,
    issued: u64,
    preview: PreviewState,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(QrOptions::default())
    }
}

impl Controller {
    /// Controller with empty text content and the given options
    pub fn new(options: QrOptions) -> Self {
        Self {
            kind: ContentKind::Text,
            content: String::new(),
            options: options.normalized(),
            issued: 0,
            preview: PreviewState::Placeholder,
        }
    }

    /// Current content kind
    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// Current content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Current options
    pub fn options(&self) -> &QrOptions {
        &self.options
    }

    /// Current preview
    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    /// Sequence number of the most recently issued request
    pub fn latest_seq(&self) -> u64 {
        self.issued
    }

    /// Replace the content
    pub fn set_content(&mut self, content: impl Into<String>) -> Option<RenderRequest> {
        self.content = content.into();
        self.begin_render()
    }

    /// Switch content kind; the content is cleared
    pub fn set_kind(&mut self, kind: ContentKind) -> Option<RenderRequest> {
        self.kind = kind;
        self.content.clear();
        self.begin_render()
    }

    /// Apply one option edit
    pub fn update(&mut self, change: OptionChange) -> Option<RenderRequest> {
        self.options = self.options.apply(change);
        self.begin_render()
    }

    /// Re-issue a request for the current inputs after a failure
    pub fn retry(&mut self) -> Option<RenderRequest> {
        self.begin_render()
    }

    /// Issue a request for the current inputs.
    ///
    /// Always bumps the sequence number so in-flight work is superseded.
    /// Returns `None` for blank content, which switches to the placeholder.
    pub fn begin_render(&mut self) -> Option<RenderRequest> {
        self.issued += 1;
        if self.content.trim().is_empty() {
            self.preview = PreviewState::Placeholder;
            return None;
        }
        if !matches!(self.preview, PreviewState::Ready(_)) {
            self.preview = PreviewState::Pending;
        }
        Some(RenderRequest {
            seq: self.issued,
            content: self.content.clone(),
            options: self.options.clone(),
        })
    }

    /// Apply an outcome; returns `false` when it was stale and dropped
    pub fn complete(&mut self, outcome: RenderOutcome) -> bool {
        if outcome.seq != self.issued {
            log::debug!(
                "dropping stale render #{} (latest is #{})",
                outcome.seq,
                self.issued
            );
            return false;
        }

        self.preview = match outcome.result {
            Ok(render) => PreviewState::Ready(Arc::new(render)),
            Err(err) => {
                log::error!("QR generation failed: {err}");
                PreviewState::Failed {
                    message: RENDER_FAILED_MESSAGE.to_string(),
                }
            }
        };
        true
    }

    /// Render the current inputs synchronously and apply the result
    pub fn render_now(&mut self) -> &PreviewState {
        if let Some(request) = self.begin_render() {
            let outcome = request.run();
            self.complete(outcome);
        }
        &self.preview
    }
}
