//! Render collaborator boundary and presentation-side helpers
//!
//! The simulation hands out snapshots; renderers keep their own per-mouse
//! state keyed by id and reconcile it every frame. Nothing here feeds back
//! into gameplay.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::platform::SinkError;
use crate::sim::{GameSnapshot, Mouse, MouseId};

/// Whatever draws the garden
pub trait FrameSink {
    /// Draw one frame from the snapshot
    fn present(&mut self, snapshot: &GameSnapshot) -> Result<(), SinkError>;
    /// A mouse was caught at `pos`; play a burst there
    fn catch_effect(&mut self, pos: Vec3) -> Result<(), SinkError>;
    /// Free GPU/window handles. Called at most once.
    fn release(&mut self) {}
}

impl<T: FrameSink> FrameSink for Rc<RefCell<T>> {
    fn present(&mut self, snapshot: &GameSnapshot) -> Result<(), SinkError> {
        self.borrow_mut().present(snapshot)
    }

    fn catch_effect(&mut self, pos: Vec3) -> Result<(), SinkError> {
        self.borrow_mut().catch_effect(pos)
    }

    fn release(&mut self) {
        self.borrow_mut().release();
    }
}

/// Renderer that draws nothing
#[derive(Debug, Default)]
pub struct NullFrames;

impl FrameSink for NullFrames {
    fn present(&mut self, _snapshot: &GameSnapshot) -> Result<(), SinkError> {
        Ok(())
    }

    fn catch_effect(&mut self, _pos: Vec3) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Headless renderer: mirrors the scene and logs what a real one would do
#[derive(Debug)]
pub struct LogFrames {
    mirror: SceneMirror<()>,
    bursts: BurstPool,
    frames: u64,
}

impl LogFrames {
    pub fn new(seed: u64) -> Self {
        Self {
            mirror: SceneMirror::new(),
            bursts: BurstPool::new(seed),
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl FrameSink for LogFrames {
    fn present(&mut self, snapshot: &GameSnapshot) -> Result<(), SinkError> {
        self.frames += 1;
        let diff = self.mirror.reconcile(&snapshot.mice, |_| ());
        for id in &diff.created {
            log::debug!("+ mesh {}", id);
        }
        for (id, ()) in &diff.destroyed {
            log::debug!("- mesh {}", id);
        }
        self.bursts.step();
        Ok(())
    }

    fn catch_effect(&mut self, pos: Vec3) -> Result<(), SinkError> {
        self.bursts.spawn(pos);
        Ok(())
    }

    fn release(&mut self) {
        self.mirror.clear();
        self.bursts.clear();
    }
}

/// What changed between two snapshots, by id
#[derive(Debug)]
pub struct SceneDiff<M> {
    /// Ids seen for the first time, in snapshot order
    pub created: Vec<MouseId>,
    /// Ids gone since last frame, with the presentation object to tear down
    pub destroyed: Vec<(MouseId, M)>,
}

/// Presentation-side index of per-mouse objects (meshes, sprites, ...)
#[derive(Debug)]
pub struct SceneMirror<M> {
    objects: HashMap<MouseId, M>,
}

impl<M> Default for SceneMirror<M> {
    fn default() -> Self {
        Self {
            objects: HashMap::new(),
        }
    }
}

impl<M> SceneMirror<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the index in line with `mice`: build objects for new ids,
    /// hand back objects for ids that disappeared.
    pub fn reconcile(
        &mut self,
        mice: &[Mouse],
        mut create: impl FnMut(&Mouse) -> M,
    ) -> SceneDiff<M> {
        let mut created = Vec::new();
        for mouse in mice {
            if !self.objects.contains_key(&mouse.id) {
                self.objects.insert(mouse.id, create(mouse));
                created.push(mouse.id);
            }
        }

        let gone: Vec<MouseId> = self
            .objects
            .keys()
            .filter(|id| !mice.iter().any(|m| m.id == **id))
            .copied()
            .collect();
        let mut destroyed = Vec::with_capacity(gone.len());
        for id in gone {
            if let Some(obj) = self.objects.remove(&id) {
                destroyed.push((id, obj));
            }
        }
        destroyed.sort_by_key(|(id, _)| *id);

        SceneDiff { created, destroyed }
    }

    pub fn get(&self, id: MouseId) -> Option<&M> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: MouseId) -> Option<&mut M> {
        self.objects.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

/// Particles per catch burst
pub const BURST_PARTICLES: usize = 10;
/// Downward pull per frame
const BURST_GRAVITY: f32 = 0.01;
/// Opacity lost per frame
const BURST_FADE: f32 = 0.02;

/// A particle for visual effects
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec3,
    /// Units per frame
    pub vel: Vec3,
    /// Packed 0xRRGGBB
    pub color: u32,
    pub opacity: f32,
}

/// Short-lived confetti burst where a mouse was caught. Finishes on its own
/// once every particle has faded.
#[derive(Debug, Clone)]
pub struct CatchBurst {
    pub particles: Vec<Particle>,
}

impl CatchBurst {
    pub fn new<R: Rng>(at: Vec3, rng: &mut R) -> Self {
        let origin = at + Vec3::Y * 0.5;
        let particles = (0..BURST_PARTICLES)
            .map(|_| Particle {
                pos: origin,
                vel: Vec3::new(
                    (rng.random::<f32>() - 0.5) * 0.2,
                    rng.random::<f32>() * 0.3 + 0.1,
                    (rng.random::<f32>() - 0.5) * 0.2,
                ),
                color: rng.random_range(0..0x0100_0000),
                opacity: 0.8,
            })
            .collect();
        Self { particles }
    }

    /// Advance one frame. Returns false once the burst is finished.
    pub fn step(&mut self) -> bool {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.vel.y -= BURST_GRAVITY;
            p.opacity -= BURST_FADE;
        }
        self.particles.retain(|p| p.opacity > 0.0);
        !self.particles.is_empty()
    }
}

/// Active catch bursts
#[derive(Debug)]
pub struct BurstPool {
    bursts: Vec<CatchBurst>,
    rng: Pcg32,
}

impl BurstPool {
    pub fn new(seed: u64) -> Self {
        Self {
            bursts: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn spawn(&mut self, at: Vec3) {
        self.bursts.push(CatchBurst::new(at, &mut self.rng));
    }

    /// Advance every burst one frame and drop finished ones
    pub fn step(&mut self) {
        self.bursts.retain_mut(CatchBurst::step);
    }

    pub fn active(&self) -> usize {
        self.bursts.len()
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.bursts.iter().flat_map(|b| b.particles.iter())
    }

    pub fn clear(&mut self) {
        self.bursts.clear();
    }
}

/// Walking bob for the cat body while it moves (`time_ms` is wall time)
pub fn cat_bob_height(rest: f32, time_ms: f64) -> f32 {
    rest + ((time_ms * 0.01).sin() as f32) * 0.1
}

/// Scurrying hover for a mouse; phase varies with its x position
pub fn mouse_hover_height(mouse: &Mouse, time_ms: f64) -> f32 {
    crate::consts::MOUSE_HEIGHT + ((time_ms * 0.02 + mouse.pos.x as f64).sin() as f32) * 0.05
}

/// Yaw a mouse mesh should face, from its velocity
pub fn mouse_heading(mouse: &Mouse) -> f32 {
    mouse.vel.x.atan2(mouse.vel.z)
}
