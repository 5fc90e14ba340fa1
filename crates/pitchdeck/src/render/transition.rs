use std::str::FromStr;
use std::time::{Duration, Instant};

use eframe::egui;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    #[default]
    Fade,
    Slide,
    Zoom,
    Flip,
}

/// How the outgoing and incoming slides share the screen during a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    /// Outgoing exits completely before the incoming slide is mounted.
    Sequential,
    /// Both slides are drawn at once.
    Crossfade,
}

impl TransitionKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fade" => Some(Self::Fade),
            "slide" => Some(Self::Slide),
            "zoom" => Some(Self::Zoom),
            "flip" => Some(Self::Flip),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::Slide => "slide",
            Self::Zoom => "zoom",
            Self::Flip => "flip",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Fade => "Fade",
            Self::Slide => "Slide",
            Self::Zoom => "Zoom",
            Self::Flip => "Flip",
        }
    }

    pub fn all() -> &'static [TransitionKind] {
        &[
            TransitionKind::Fade,
            TransitionKind::Slide,
            TransitionKind::Zoom,
            TransitionKind::Flip,
        ]
    }

    /// Next kind in picker order, wrapping around.
    pub fn cycled(self) -> Self {
        match self {
            Self::Fade => Self::Slide,
            Self::Slide => Self::Zoom,
            Self::Zoom => Self::Flip,
            Self::Flip => Self::Fade,
        }
    }

    pub fn overlap(self) -> Overlap {
        match self {
            Self::Fade => Overlap::Crossfade,
            Self::Slide | Self::Zoom | Self::Flip => Overlap::Sequential,
        }
    }
}

impl FromStr for TransitionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            format!("invalid transition '{s}': must be 'fade', 'slide', 'zoom', or 'flip'")
        })
    }
}

impl std::fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    Forward,
    Backward,
}

impl TransitionDirection {
    pub fn between(from: usize, to: usize) -> Self {
        if to >= from {
            Self::Forward
        } else {
            Self::Backward
        }
    }
}

/// Visual parameters of one slide at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub opacity: f32,
    /// Horizontal offset as a fraction of the slide width.
    pub offset_x: f32,
    pub scale: f32,
    /// Rotation around the vertical axis, in degrees.
    pub rotate_y: f32,
}

impl Motion {
    pub const VISIBLE: Motion = Motion {
        opacity: 1.0,
        offset_x: 0.0,
        scale: 1.0,
        rotate_y: 0.0,
    };

    pub fn lerp(self, to: Motion, t: f32) -> Motion {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Motion {
            opacity: mix(self.opacity, to.opacity),
            offset_x: mix(self.offset_x, to.offset_x),
            scale: mix(self.scale, to.scale),
            rotate_y: mix(self.rotate_y, to.rotate_y),
        }
    }

    fn mirrored(self) -> Motion {
        Motion {
            offset_x: -self.offset_x,
            rotate_y: -self.rotate_y,
            ..self
        }
    }

    /// Width factor used to fake the y-axis rotation on a flat painter.
    pub fn horizontal_scale(&self) -> f32 {
        self.scale * self.rotate_y.to_radians().cos().max(0.0)
    }

    /// Map the resting slide rect to where this motion puts it.
    pub fn apply(&self, rect: egui::Rect) -> egui::Rect {
        let center = rect.center() + egui::vec2(self.offset_x * rect.width(), 0.0);
        let size = egui::vec2(
            rect.width() * self.horizontal_scale(),
            rect.height() * self.scale,
        );
        egui::Rect::from_center_size(center, size)
    }
}

/// The enter/visible/exit triple of one transition kind, plus phase timings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionVariants {
    pub enter: Motion,
    pub visible: Motion,
    pub exit: Motion,
    pub enter_secs: f32,
    pub exit_secs: f32,
}

impl MotionVariants {
    /// Mirror the horizontal components when navigating backwards.
    pub fn directed(&self, direction: TransitionDirection) -> MotionVariants {
        match direction {
            TransitionDirection::Forward => *self,
            TransitionDirection::Backward => MotionVariants {
                enter: self.enter.mirrored(),
                exit: self.exit.mirrored(),
                ..*self
            },
        }
    }
}

const FADE: MotionVariants = MotionVariants {
    enter: Motion {
        opacity: 0.0,
        ..Motion::VISIBLE
    },
    visible: Motion::VISIBLE,
    exit: Motion {
        opacity: 0.0,
        ..Motion::VISIBLE
    },
    enter_secs: 0.4,
    exit_secs: 0.4,
};

const SLIDE: MotionVariants = MotionVariants {
    enter: Motion {
        offset_x: 1.0,
        ..Motion::VISIBLE
    },
    visible: Motion::VISIBLE,
    exit: Motion {
        offset_x: -1.0,
        ..Motion::VISIBLE
    },
    enter_secs: 0.3,
    exit_secs: 0.25,
};

const ZOOM: MotionVariants = MotionVariants {
    enter: Motion {
        opacity: 0.0,
        scale: 0.85,
        ..Motion::VISIBLE
    },
    visible: Motion::VISIBLE,
    exit: Motion {
        opacity: 0.0,
        scale: 1.15,
        ..Motion::VISIBLE
    },
    enter_secs: 0.3,
    exit_secs: 0.2,
};

const FLIP: MotionVariants = MotionVariants {
    enter: Motion {
        rotate_y: 90.0,
        ..Motion::VISIBLE
    },
    visible: Motion::VISIBLE,
    exit: Motion {
        rotate_y: -90.0,
        ..Motion::VISIBLE
    },
    enter_secs: 0.25,
    exit_secs: 0.25,
};

pub fn variants(kind: TransitionKind) -> &'static MotionVariants {
    match kind {
        TransitionKind::Fade => &FADE,
        TransitionKind::Slide => &SLIDE,
        TransitionKind::Zoom => &ZOOM,
        TransitionKind::Flip => &FLIP,
    }
}

/// Smoothstep easing, t in [0, 1].
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn eased_progress(start: Instant, now: Instant, secs: f32) -> f32 {
    if secs <= 0.0 {
        return 1.0;
    }
    ease_in_out(now.duration_since(start).as_secs_f32() / secs)
}

/// One slide to draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideLayer {
    pub index: usize,
    pub motion: Motion,
    pub interactive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Exiting {
        from: usize,
        kind: TransitionKind,
        direction: TransitionDirection,
        start: Instant,
    },
    Entering {
        kind: TransitionKind,
        direction: TransitionDirection,
        start: Instant,
    },
    Crossfading {
        from: usize,
        kind: TransitionKind,
        start: Instant,
    },
}

/// Mounts one slide at a time, keyed by slide index, and animates the swap
/// when the key changes.
///
/// The transition kind is captured when a swap begins, so changing the
/// deck's transition never alters an animation already in flight.
#[derive(Debug, Clone)]
pub struct TransitionBoundary {
    key: usize,
    phase: Phase,
}

impl TransitionBoundary {
    pub fn new(key: usize) -> Self {
        Self {
            key,
            phase: Phase::Idle,
        }
    }

    pub fn is_animating(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Feed the current key, start a swap if it changed, and advance phases.
    pub fn update(&mut self, key: usize, kind: TransitionKind, now: Instant) {
        if key != self.key {
            self.retarget(key, kind, now);
        }
        self.settle(now);
    }

    fn retarget(&mut self, key: usize, kind: TransitionKind, now: Instant) {
        let outgoing = self.key;
        self.key = key;
        self.phase = match self.phase {
            // The outgoing slide is still leaving; the new key enters after it.
            Phase::Exiting {
                from, kind, start, ..
            } => Phase::Exiting {
                from,
                kind,
                direction: TransitionDirection::between(from, key),
                start,
            },
            _ => Self::begin(outgoing, key, kind, now),
        };
        tracing::trace!(from = outgoing, to = key, kind = %kind, "transition started");
    }

    fn begin(from: usize, to: usize, kind: TransitionKind, now: Instant) -> Phase {
        match kind.overlap() {
            Overlap::Crossfade => Phase::Crossfading {
                from,
                kind,
                start: now,
            },
            Overlap::Sequential => Phase::Exiting {
                from,
                kind,
                direction: TransitionDirection::between(from, to),
                start: now,
            },
        }
    }

    fn settle(&mut self, now: Instant) {
        loop {
            match self.phase {
                Phase::Idle => return,
                Phase::Exiting {
                    kind,
                    direction,
                    start,
                    ..
                } => {
                    let exit = Duration::from_secs_f32(variants(kind).exit_secs);
                    if now.duration_since(start) < exit {
                        return;
                    }
                    self.phase = Phase::Entering {
                        kind,
                        direction,
                        start: start + exit,
                    };
                }
                Phase::Entering { kind, start, .. } | Phase::Crossfading { kind, start, .. } => {
                    let enter = Duration::from_secs_f32(variants(kind).enter_secs);
                    if now.duration_since(start) < enter {
                        return;
                    }
                    self.phase = Phase::Idle;
                }
            }
        }
    }

    /// Layers to paint at `now`, back to front.
    pub fn layers(&self, now: Instant) -> Vec<SlideLayer> {
        match self.phase {
            Phase::Idle => vec![SlideLayer {
                index: self.key,
                motion: Motion::VISIBLE,
                interactive: true,
            }],
            Phase::Exiting {
                from,
                kind,
                direction,
                start,
            } => {
                let v = variants(kind).directed(direction);
                let t = eased_progress(start, now, v.exit_secs);
                vec![SlideLayer {
                    index: from,
                    motion: v.visible.lerp(v.exit, t),
                    interactive: false,
                }]
            }
            Phase::Entering {
                kind,
                direction,
                start,
            } => {
                let v = variants(kind).directed(direction);
                let t = eased_progress(start, now, v.enter_secs);
                vec![SlideLayer {
                    index: self.key,
                    motion: v.enter.lerp(v.visible, t),
                    interactive: true,
                }]
            }
            Phase::Crossfading { from, kind, start } => {
                let v = variants(kind);
                let t = eased_progress(start, now, v.enter_secs);
                vec![
                    SlideLayer {
                        index: from,
                        motion: v.visible.lerp(v.exit, t),
                        interactive: false,
                    },
                    SlideLayer {
                        index: self.key,
                        motion: v.enter.lerp(v.visible, t),
                        interactive: true,
                    },
                ]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_every_kind_rests_fully_visible() {
        for kind in TransitionKind::all() {
            assert_eq!(variants(*kind).visible, Motion::VISIBLE, "{kind}");
        }
    }

    #[test]
    fn test_only_fade_crossfades() {
        assert_eq!(TransitionKind::Fade.overlap(), Overlap::Crossfade);
        assert_eq!(TransitionKind::Slide.overlap(), Overlap::Sequential);
        assert_eq!(TransitionKind::Zoom.overlap(), Overlap::Sequential);
        assert_eq!(TransitionKind::Flip.overlap(), Overlap::Sequential);
    }

    #[test]
    fn test_slide_leaves_toward_opposite_edge() {
        let v = variants(TransitionKind::Slide);
        assert!(v.enter.offset_x > 0.0);
        assert!(v.exit.offset_x < 0.0);

        let back = v.directed(TransitionDirection::Backward);
        assert!(back.enter.offset_x < 0.0);
        assert!(back.exit.offset_x > 0.0);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(TransitionKind::from_name("zoom"), Some(TransitionKind::Zoom));
        assert_eq!(TransitionKind::from_name("FLIP"), Some(TransitionKind::Flip));
        assert_eq!(TransitionKind::from_name("spin"), None);
        assert!("wipe".parse::<TransitionKind>().is_err());
    }

    #[test]
    fn test_cycled_visits_every_kind() {
        let mut kind = TransitionKind::Fade;
        for _ in 0..TransitionKind::all().len() {
            kind = kind.cycled();
        }
        assert_eq!(kind, TransitionKind::Fade);
    }

    #[test]
    fn test_flip_edge_collapses_width() {
        let edge = Motion {
            rotate_y: 90.0,
            ..Motion::VISIBLE
        };
        assert!(edge.horizontal_scale() < 1e-3);
        assert_eq!(Motion::VISIBLE.horizontal_scale(), 1.0);
    }

    #[test]
    fn test_idle_mounts_single_interactive_layer() {
        let boundary = TransitionBoundary::new(4);
        let layers = boundary.layers(Instant::now());
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].index, 4);
        assert!(layers[0].interactive);
        assert!(!boundary.is_animating());
    }

    #[test]
    fn test_same_key_does_not_animate() {
        let mut boundary = TransitionBoundary::new(1);
        boundary.update(1, TransitionKind::Slide, Instant::now());
        assert!(!boundary.is_animating());
    }

    #[test]
    fn test_sequential_exit_then_enter() {
        let t0 = Instant::now();
        let mut boundary = TransitionBoundary::new(0);
        boundary.update(1, TransitionKind::Zoom, t0);

        let exiting = boundary.layers(t0 + ms(50));
        assert_eq!(exiting.len(), 1);
        assert_eq!(exiting[0].index, 0);
        assert!(!exiting[0].interactive);

        boundary.update(1, TransitionKind::Zoom, t0 + ms(250));
        let entering = boundary.layers(t0 + ms(250));
        assert_eq!(entering.len(), 1);
        assert_eq!(entering[0].index, 1);
        assert!(entering[0].interactive);

        boundary.update(1, TransitionKind::Zoom, t0 + ms(600));
        assert!(!boundary.is_animating());
    }

    #[test]
    fn test_fade_crossfades_with_one_live_layer() {
        let t0 = Instant::now();
        let mut boundary = TransitionBoundary::new(2);
        boundary.update(3, TransitionKind::Fade, t0);

        let layers = boundary.layers(t0 + ms(200));
        assert_eq!(layers.len(), 2);
        assert_eq!(layers.iter().filter(|l| l.interactive).count(), 1);
        assert!(layers[1].interactive);
        assert_eq!(layers[1].index, 3);
        assert!(layers[0].motion.opacity < 1.0);
    }

    #[test]
    fn test_kind_captured_when_swap_begins() {
        let t0 = Instant::now();
        let mut boundary = TransitionBoundary::new(0);
        boundary.update(1, TransitionKind::Slide, t0);
        // Switching to fade mid-flight must not turn this into a crossfade.
        boundary.update(1, TransitionKind::Fade, t0 + ms(100));
        assert_eq!(boundary.layers(t0 + ms(100)).len(), 1);
    }

    #[test]
    fn test_retarget_while_entering_exits_the_entering_slide() {
        let t0 = Instant::now();
        let mut boundary = TransitionBoundary::new(0);
        boundary.update(1, TransitionKind::Flip, t0);
        boundary.update(1, TransitionKind::Flip, t0 + ms(300));

        boundary.update(2, TransitionKind::Flip, t0 + ms(320));
        let layers = boundary.layers(t0 + ms(330));
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].index, 1);
        assert!(!layers[0].interactive);

        boundary.update(2, TransitionKind::Flip, t0 + ms(900));
        assert!(!boundary.is_animating());
        let layers = boundary.layers(t0 + ms(900));
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].index, 2);
    }

    #[test]
    fn test_retarget_while_exiting_keeps_outgoing() {
        let t0 = Instant::now();
        let mut boundary = TransitionBoundary::new(0);
        boundary.update(1, TransitionKind::Slide, t0);
        boundary.update(2, TransitionKind::Slide, t0 + ms(100));

        let layers = boundary.layers(t0 + ms(100));
        assert_eq!(layers[0].index, 0);

        boundary.update(2, TransitionKind::Slide, t0 + ms(260));
        let layers = boundary.layers(t0 + ms(260));
        assert_eq!(layers[0].index, 2);
    }

    #[test]
    fn test_ease_in_out_bounds() {
        assert_eq!(ease_in_out(-1.0), 0.0);
        assert_eq!(ease_in_out(0.5), 0.5);
        assert_eq!(ease_in_out(2.0), 1.0);
    }
}
