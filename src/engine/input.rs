//! Pointer-event dispatch: hover feedback and click activation.
//!
//! Hover and click run the same screen-space hit test independently —
//! hover must keep working while a click animation is in flight.
//! Activation is guarded by the animator's per-label
//! state check *before* any transition, so re-entrant clicks can never
//! start a second timeline or double-schedule navigation.

use glam::Vec2;
use web_time::Instant;

use super::NavRenderEngine;
use crate::input::{InputEvent, MouseButton};
use crate::picking;

impl NavRenderEngine {
    /// Feed one pointer event into the engine.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.pointer.moved(x, y);
                self.refresh_hover();
            }
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            } => {
                if let Some((x, y)) = self.pointer.position {
                    self.dispatch_click(Vec2::new(x, y));
                }
            }
            InputEvent::MouseButton { .. } => {}
        }
    }

    /// Hit-test the cursor against every label's projected bounding
    /// rectangle, in fixed order. Always `None` before the font
    /// resolves — the collection is empty by construction.
    fn hit_at(&self, cursor: Vec2) -> Option<usize> {
        let view_proj = self.camera.view_proj();
        let viewport = Vec2::new(
            self.context.config.width as f32,
            self.context.config.height as f32,
        );
        picking::first_hit(
            self.scene
                .labels()
                .map(|label| (label.aabb, label.model_matrix())),
            &view_proj,
            viewport,
            cursor,
        )
    }

    /// Recompute the hovered label from the last cursor position.
    pub(super) fn refresh_hover(&mut self) {
        self.hovered = self
            .pointer
            .position
            .and_then(|(x, y)| self.hit_at(Vec2::new(x, y)));
    }

    /// Run the click hit test and activate the first matching label.
    fn dispatch_click(&mut self, cursor: Vec2) {
        let Some(index) = self.hit_at(cursor) else {
            return;
        };
        let now = Instant::now();

        // State check before transition: an animating label swallows
        // the click entirely.
        if !self.animator.try_activate(index, now) {
            log::debug!("label {index} already animating, click ignored");
            return;
        }

        let Some(label) = self.scene.label_mut(index) else {
            return;
        };
        label.is_animating = true;
        let route = label.item.route.clone();
        log::info!("label {:?} activated", label.item.label);

        // The animation always plays; navigation only happens on a
        // route change, scheduled to land before the revert completes.
        let delay = self.animator.timing().nav_delay;
        self.scheduler.schedule_transition(
            &route,
            self.navigator.current_route(),
            now + delay,
        );
    }
}
