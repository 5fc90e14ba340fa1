use std::task::{Context, Poll};

use eframe::egui;
use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FullscreenError {
    #[error("fullscreen request denied by the host")]
    Denied,
    #[error("fullscreen is not supported on this platform")]
    Unsupported,
}

/// Completion of a fullscreen request. Resolves once the host has answered.
pub type FullscreenRequest = LocalBoxFuture<'static, Result<(), FullscreenError>>;

/// The host environment's fullscreen API.
pub trait FullscreenHost {
    /// Ask the host to enter (`true`) or leave (`false`) fullscreen.
    fn request(&mut self, enter: bool) -> FullscreenRequest;
}

/// A request that has been sent but not yet answered.
pub(crate) struct PendingFullscreen {
    pub target: bool,
    request: FullscreenRequest,
}

impl PendingFullscreen {
    pub fn new(target: bool, request: FullscreenRequest) -> Self {
        Self { target, request }
    }

    /// Poll once without blocking; `None` while the host is still deciding.
    pub fn poll(&mut self) -> Option<Result<(), FullscreenError>> {
        let mut cx = Context::from_waker(futures::task::noop_waker_ref());
        match self.request.poll_unpin(&mut cx) {
            Poll::Ready(result) => Some(result),
            Poll::Pending => None,
        }
    }
}

/// Fullscreen through the native window's viewport commands.
///
/// The window applies the command on a later frame; the actual status is
/// reported back through `ViewportInfo::fullscreen`. A viewport that never
/// reports that status cannot be driven, so requests against it are refused.
pub struct ViewportFullscreen {
    ctx: egui::Context,
    allowed: bool,
}

impl ViewportFullscreen {
    pub fn new(ctx: egui::Context, allowed: bool) -> Self {
        Self { ctx, allowed }
    }
}

impl FullscreenHost for ViewportFullscreen {
    fn request(&mut self, enter: bool) -> FullscreenRequest {
        if !self.allowed {
            return future::ready(Err(FullscreenError::Denied)).boxed_local();
        }
        if self.ctx.input(|i| i.viewport().fullscreen.is_none()) {
            return future::ready(Err(FullscreenError::Unsupported)).boxed_local();
        }
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(enter));
        future::ready(Ok(())).boxed_local()
    }
}
