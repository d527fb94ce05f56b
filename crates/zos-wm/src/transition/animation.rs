//! Per-window animation record

use crate::math::{lerp, Rect, Size, Vec2};
use super::{ease, Curve};

/// Scale a zoom transition starts from (open) or ends at (close)
pub const ZOOM_MIN_SCALE: f32 = 0.8;

/// Which fields an animation drives
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationKind {
    /// Position only
    Move,
    /// Position and size
    Resize,
    /// Scale about the end box centre, plus opacity
    Zoom,
    /// Opacity only (position is held)
    Fade,
}

/// Work to run once an animation reaches its end
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// Destroy the closing window's nodes and drop it from the arena
    FinalizeClose,
    /// Disable the minimized window's scene presence
    FinishMinimize,
}

/// Interpolated values for one tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub position: Vec2,
    /// Present for kinds that drive size
    pub size: Option<Size>,
    /// Present for kinds that drive opacity
    pub opacity: Option<f32>,
    /// True once `t` has reached 1
    pub finished: bool,
}

/// A live animation on one window
#[derive(Clone, Debug)]
pub struct Animation {
    pub kind: AnimationKind,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub curve: Curve,
    pub from_position: Vec2,
    pub to_position: Vec2,
    pub from_size: Size,
    pub to_size: Size,
    pub from_opacity: f32,
    pub to_opacity: f32,
    pub from_scale: f32,
    pub to_scale: f32,
    pub completion: Option<Completion>,
}

impl Animation {
    fn base(kind: AnimationKind, from: Rect, to: Rect, start_ms: f64, duration_ms: f64, curve: Curve) -> Self {
        Self {
            kind,
            start_ms,
            duration_ms,
            curve,
            from_position: from.position(),
            to_position: to.position(),
            from_size: from.size(),
            to_size: to.size(),
            from_opacity: 1.0,
            to_opacity: 1.0,
            from_scale: 1.0,
            to_scale: 1.0,
            completion: None,
        }
    }

    /// Layout transition between two boxes; `Resize` when the size changes
    pub fn between(from: Rect, to: Rect, start_ms: f64, duration_ms: f64, curve: Curve) -> Self {
        let kind = if from.size() == to.size() {
            AnimationKind::Move
        } else {
            AnimationKind::Resize
        };
        Self::base(kind, from, to, start_ms, duration_ms, curve)
    }

    /// Open transition growing into `target` while fading in
    pub fn zoom_in(target: Rect, start_ms: f64, duration_ms: f64, curve: Curve) -> Self {
        Self {
            from_opacity: 0.0,
            from_scale: ZOOM_MIN_SCALE,
            ..Self::base(AnimationKind::Zoom, target, target, start_ms, duration_ms, curve)
        }
    }

    /// Close transition shrinking out of `current` while fading out
    pub fn zoom_out(current: Rect, start_ms: f64, duration_ms: f64, curve: Curve) -> Self {
        Self {
            to_opacity: 0.0,
            to_scale: ZOOM_MIN_SCALE,
            ..Self::base(AnimationKind::Zoom, current, current, start_ms, duration_ms, curve)
        }
    }

    /// Opacity-only transition holding `rect` in place
    pub fn fade(rect: Rect, from_opacity: f32, to_opacity: f32, start_ms: f64, duration_ms: f64, curve: Curve) -> Self {
        Self {
            from_opacity,
            to_opacity,
            ..Self::base(AnimationKind::Fade, rect, rect, start_ms, duration_ms, curve)
        }
    }

    /// Attach a completion intent
    pub fn with_completion(mut self, completion: Completion) -> Self {
        self.completion = Some(completion);
        self
    }

    /// Zoom and fade own the node's opacity until they finish
    #[inline]
    pub fn drives_opacity(&self) -> bool {
        matches!(self.kind, AnimationKind::Fade | AnimationKind::Zoom)
    }

    /// Hold the animation at a new box without touching its timing
    pub fn retarget(&mut self, rect: Rect) {
        self.from_position = rect.position();
        self.to_position = rect.position();
        self.from_size = rect.size();
        self.to_size = rect.size();
    }

    /// Normalised progress, clamped to `[0, 1]`
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (((now_ms - self.start_ms) / self.duration_ms) as f32).clamp(0.0, 1.0)
    }

    /// Check if the animation has run its full duration
    pub fn is_complete(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Interpolated values at `now_ms`; exact end values once complete
    pub fn sample(&self, now_ms: f64) -> Frame {
        let t = self.progress(now_ms);
        if t >= 1.0 {
            return self.final_frame();
        }
        self.frame_at(ease(t, self.curve), false)
    }

    /// End values with no interpolation residue
    pub fn final_frame(&self) -> Frame {
        let position = match self.kind {
            AnimationKind::Zoom => self.zoomed(self.to_scale).position(),
            _ => self.to_position,
        };
        Frame {
            position,
            size: match self.kind {
                AnimationKind::Resize => Some(self.to_size),
                AnimationKind::Zoom => Some(self.zoomed(self.to_scale).size()),
                _ => None,
            },
            opacity: self.drives_opacity().then_some(self.to_opacity),
            finished: true,
        }
    }

    fn frame_at(&self, eased: f32, finished: bool) -> Frame {
        let opacity = lerp(self.from_opacity, self.to_opacity, eased).clamp(0.0, 1.0);
        match self.kind {
            AnimationKind::Move => Frame {
                position: Vec2::lerp(self.from_position, self.to_position, eased),
                size: None,
                opacity: None,
                finished,
            },
            AnimationKind::Resize => Frame {
                position: Vec2::lerp(self.from_position, self.to_position, eased),
                size: Some(Size::lerp(self.from_size, self.to_size, eased)),
                opacity: None,
                finished,
            },
            AnimationKind::Zoom => {
                let rect = self.zoomed(lerp(self.from_scale, self.to_scale, eased));
                Frame {
                    position: rect.position(),
                    size: Some(rect.size()),
                    opacity: Some(opacity),
                    finished,
                }
            }
            AnimationKind::Fade => Frame {
                position: self.to_position,
                size: None,
                opacity: Some(opacity),
                finished,
            },
        }
    }

    /// The end box scaled about its centre
    fn zoomed(&self, scale: f32) -> Rect {
        let end = Rect::from_pos_size(self.to_position, self.to_size);
        Rect::from_center_size(end.center(), self.to_size.scale(scale))
    }
}
