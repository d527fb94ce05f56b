//! Animation start and tick

use tracing::trace;

use crate::backend::Backend;
use crate::transition::{Animation, Completion, TICK_INTERVAL_MS};
use crate::window::WindowId;
use super::Server;

impl<B: Backend> Server<B> {
    /// Start an animation, replacing any live one on the window.
    /// The replaced animation's completion is dropped, not run.
    pub(crate) fn start_animation(&mut self, id: WindowId, animation: Animation) {
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        if let Some(previous) = window.animation.replace(animation) {
            trace!(window = id, kind = ?previous.kind, "animation replaced");
        }
        self.ensure_ticking();
    }

    fn ensure_ticking(&mut self) {
        if !self.ticking {
            self.ticking = true;
            self.backend.schedule_tick(TICK_INTERVAL_MS);
        }
    }

    /// Advance every animation to the clock's current time.
    ///
    /// Finished animations snap to their end values, are dropped, and run
    /// their completion once. Returns whether any animation remains; the next
    /// tick is scheduled only in that case.
    pub fn tick(&mut self) -> bool {
        let now = self.backend.now_ms();
        let mut completions = Vec::new();

        for id in self.windows.ids() {
            let Some(frame) = self
                .windows
                .get(id)
                .and_then(|w| w.animation.as_ref())
                .map(|anim| anim.sample(now))
            else {
                continue;
            };

            self.apply_frame(id, &frame);

            if frame.finished {
                let finished = self.windows.get_mut(id).and_then(|w| w.animation.take());
                if let Some(completion) = finished.and_then(|anim| anim.completion) {
                    completions.push((id, completion));
                }
            }
        }

        for (id, completion) in completions {
            self.run_completion(id, completion);
        }

        let active = self.is_animating();
        if active {
            self.backend.schedule_tick(TICK_INTERVAL_MS);
        } else {
            self.ticking = false;
        }
        active
    }

    fn run_completion(&mut self, id: WindowId, completion: Completion) {
        trace!(window = id, ?completion, "animation completed");
        match completion {
            Completion::FinalizeClose => self.finalize_window(id),
            Completion::FinishMinimize => {
                if let Some(window) = self.windows.get(id) {
                    if window.minimized {
                        self.backend.set_node_enabled(window.root_node(), false);
                    }
                }
            }
        }
    }
}
