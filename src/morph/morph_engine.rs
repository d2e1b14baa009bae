use std::fmt;

use log::{debug, trace};
use nalgebra::{Point3, Vector3};
use rand::Rng;

use crate::{
    curve::Slot,
    misc::FloatingPoint,
    surface::{ControlPointId, CoonsSurface, CONTROL_POINTS},
};

use super::MorphOptions;

/// Called after every step with the surface and the normalized time in [0, 1]
pub type FrameCallback<T> = Box<dyn FnMut(&CoonsSurface<T>, T)>;

/// Called once when a morph reaches its target
pub type CompletionCallback<T> = Box<dyn FnOnce(&CoonsSurface<T>)>;

/// Motion of one logical control point during a morph
#[derive(Clone, Debug, PartialEq)]
struct PointDelta<T: FloatingPoint> {
    id: ControlPointId,
    delta: Vector3<T>,
}

/// A morph in progress
struct Animation<T: FloatingPoint> {
    deltas: Vec<PointDelta<T>>,
    /// next step to run
    t: usize,
    duration: usize,
    on_frame: Option<FrameCallback<T>>,
    on_complete: Option<CompletionCallback<T>>,
}

impl<T: FloatingPoint> fmt::Debug for Animation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("deltas", &self.deltas)
            .field("t", &self.t)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
enum MorphState<T: FloatingPoint> {
    Idle,
    Animating(Animation<T>),
}

impl<T: FloatingPoint> Default for MorphState<T> {
    fn default() -> Self {
        MorphState::Idle
    }
}

/// Result of driving the engine by one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MorphStatus<T> {
    /// No morph is in progress
    Idle,
    /// A step ran; carries the normalized time of that step
    Running(T),
    /// The final step ran and the surface sits on the target
    Completed,
}

/// Steps the boundary control points of a surface toward a target surface, one frame at a time
///
/// The engine does not own the surface or any timer: the host calls [`MorphEngine::step`]
/// once per frame, from whatever event loop it runs. Between steps the surface is a valid
/// Coons patch since corners are always written to both boundaries that share them.
///
/// # Example
/// ```
/// use approx::assert_relative_eq;
/// use coons::prelude::*;
/// use nalgebra::Vector3;
///
/// let mut surface = CoonsSurface::<f64>::default();
/// let mut target = surface.clone();
/// target.rotate(&Vector3::z(), 0.5);
///
/// let mut engine = MorphEngine::default();
/// engine.morph(&surface, target.clone(), 10, None, None).unwrap();
/// while let MorphStatus::Running(_) = engine.step(&mut surface) {}
///
/// assert_relative_eq!(surface.patch(0.3, 0.7), target.patch(0.3, 0.7), epsilon = 1e-9);
/// ```
#[derive(Debug)]
pub struct MorphEngine<T: FloatingPoint> {
    state: MorphState<T>,
    options: MorphOptions,
}

impl<T: FloatingPoint> Default for MorphEngine<T> {
    fn default() -> Self {
        Self::new(MorphOptions::default())
    }
}

impl<T: FloatingPoint> MorphEngine<T> {
    pub fn new(options: MorphOptions) -> Self {
        Self {
            state: MorphState::Idle,
            options,
        }
    }

    pub fn options(&self) -> &MorphOptions {
        &self.options
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, MorphState::Animating(_))
    }

    /// Normalized time of the next step, `None` while idle
    pub fn progress(&self) -> Option<T> {
        match &self.state {
            MorphState::Idle => None,
            MorphState::Animating(a) => Some(normalized_time(a.t, a.duration)),
        }
    }

    /// Speed of the morph at the next step, as the slope of the easing curve:
    /// fraction of the whole motion per unit of normalized time. `None` while idle.
    pub fn rate(&self) -> Option<T> {
        match &self.state {
            MorphState::Idle => None,
            MorphState::Animating(a) => {
                let x = a.t as f64 / a.duration as f64;
                Some(T::lit(self.options.easing.derivative(x)))
            }
        }
    }

    /// Start morphing `surface` toward `target` over `duration` steps.
    ///
    /// The target is resolved first, so boundaries built independently are accepted.
    /// # Failures
    /// - if `duration` is zero
    /// - if a morph is already in progress; `stop` it first
    pub fn morph(
        &mut self,
        surface: &CoonsSurface<T>,
        mut target: CoonsSurface<T>,
        duration: usize,
        on_frame: Option<FrameCallback<T>>,
        on_complete: Option<CompletionCallback<T>>,
    ) -> anyhow::Result<()> {
        anyhow::ensure!(duration >= 1, "Morph duration must be at least 1 step");
        anyhow::ensure!(
            !self.is_animating(),
            "A morph is already in progress, stop it before starting another"
        );

        target.resolve();

        let deltas = CONTROL_POINTS
            .iter()
            .map(|cp| {
                let id = cp.id();
                let source = surface.control_point(id);
                let destination = target.control_point(id.canonical());
                PointDelta {
                    id,
                    delta: destination - source,
                }
            })
            .collect();

        debug!("morph started over {} steps", duration);

        self.state = MorphState::Animating(Animation {
            deltas,
            t: 0,
            duration,
            on_frame,
            on_complete,
        });
        Ok(())
    }

    /// Morph toward a copy of `surface` whose every boundary control point is moved
    /// by an independent random offset
    pub fn randomize<R: Rng>(
        &mut self,
        surface: &CoonsSurface<T>,
        rng: &mut R,
        duration: usize,
        on_frame: Option<FrameCallback<T>>,
        on_complete: Option<CompletionCallback<T>>,
    ) -> anyhow::Result<()> {
        let target = perturbed(surface, rng, self.options.random_spread);
        self.morph(surface, target, duration, on_frame, on_complete)
    }

    /// Morph toward a random neighbor of the default surface, with smaller offsets than `randomize`
    pub fn randomize_close_to_original<R: Rng>(
        &mut self,
        surface: &CoonsSurface<T>,
        rng: &mut R,
        duration: usize,
        on_frame: Option<FrameCallback<T>>,
        on_complete: Option<CompletionCallback<T>>,
    ) -> anyhow::Result<()> {
        let original = CoonsSurface::with_options(surface.options().clone());
        let target = perturbed(&original, rng, self.options.close_random_spread);
        self.morph(surface, target, duration, on_frame, on_complete)
    }

    /// Morph back to the default surface
    pub fn restore(
        &mut self,
        surface: &CoonsSurface<T>,
        duration: usize,
        on_frame: Option<FrameCallback<T>>,
        on_complete: Option<CompletionCallback<T>>,
    ) -> anyhow::Result<()> {
        let target = CoonsSurface::with_options(surface.options().clone());
        self.morph(surface, target, duration, on_frame, on_complete)
    }

    /// Cancel the morph in progress, leaving the surface where the last step put it.
    /// Returns whether a morph was cancelled.
    pub fn stop(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            MorphState::Idle => false,
            MorphState::Animating(a) => {
                debug!("morph stopped at step {} of {}", a.t, a.duration);
                true
            }
        }
    }

    /// Run the next step of the morph on `surface`
    pub fn step(&mut self, surface: &mut CoonsSurface<T>) -> MorphStatus<T> {
        let MorphState::Animating(animation) = &mut self.state else {
            return MorphStatus::Idle;
        };

        let fraction = T::lit(self.options.easing.increment(animation.t, animation.duration));
        for d in animation.deltas.iter() {
            let p: Point3<T> = surface.control_point(d.id) + d.delta * fraction;
            surface.write_control_point(d.id, p);
        }
        surface.rebuild_grid();

        let time = normalized_time(animation.t, animation.duration);
        trace!("morph step {} of {}", animation.t, animation.duration);
        if let Some(on_frame) = animation.on_frame.as_mut() {
            on_frame(surface, time);
        }

        if animation.t < animation.duration {
            animation.t += 1;
            return MorphStatus::Running(time);
        }

        let on_complete = animation.on_complete.take();
        self.state = MorphState::Idle;
        debug!("morph completed");
        if let Some(on_complete) = on_complete {
            on_complete(surface);
        }
        MorphStatus::Completed
    }

    /// Step until the morph completes; returns the number of steps run
    pub fn run_to_completion(&mut self, surface: &mut CoonsSurface<T>) -> usize {
        let mut steps = 0;
        loop {
            match self.step(surface) {
                MorphStatus::Idle => return steps,
                MorphStatus::Running(_) => steps += 1,
                MorphStatus::Completed => return steps + 1,
            }
        }
    }
}

fn normalized_time<T: FloatingPoint>(t: usize, duration: usize) -> T {
    T::lit(t as f64 / duration as f64)
}

/// Copy of `surface` with every control point slot moved by a uniform random offset
/// in a cube of edge `spread` centered on the point. Corners may disagree afterwards.
fn perturbed<T: FloatingPoint, R: Rng>(
    surface: &CoonsSurface<T>,
    rng: &mut R,
    spread: f64,
) -> CoonsSurface<T> {
    let half = spread / 2.;
    let mut offset = || -> T {
        if half > 0. {
            T::lit(rng.random_range(-half..half))
        } else {
            T::zero()
        }
    };
    let curves = surface.curves().clone().map(|mut curve| {
        for slot in Slot::ALL {
            let p = curve.control_point_mut(slot);
            *p += Vector3::new(offset(), offset(), offset());
        }
        curve
    });
    let [u0, u1, v0, v1] = curves;
    CoonsSurface::new(u0, u1, v0, v1, surface.options().clone())
}
