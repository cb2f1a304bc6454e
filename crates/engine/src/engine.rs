use spacefight_assets::{AssetRegistry, AssetSource, LoadBarrier, Manifest, Texture};
use spacefight_common::{EntityId, NodeId, Transform};
use spacefight_input::{InputEvent, InputState};
use spacefight_render::Renderer;
use spacefight_scene::{Camera, NodeTemplate, SceneGraph};
use std::time::{Duration, Instant};

use crate::clock::{FrameClock, FrameTimer};
use crate::config::{EngineConfig, Viewport};
use crate::entity::{Entity, EntityDesc, EntityList};
use crate::overlay::Overlay;
use crate::EngineError;

/// Cues kept waiting for the host; older ones are dropped past this.
pub const MAX_PENDING_SOUND_CUES: usize = 64;

/// A request for the host to play an audio clip.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundCue {
    pub clip: String,
    pub volume: f32,
}

/// The application context: everything a frame reads or writes.
///
/// Constructed once by [`Engine::boot`] (or [`Engine::with_assets`]) and passed
/// by reference to every behavior. The engine is single-threaded; the host
/// calls `handle_input`/`resize` between frames and `frame` once per display
/// refresh.
pub struct Engine {
    config: EngineConfig,
    clock: FrameClock,
    frame_timer: FrameTimer,
    dt: f32,
    tick: u64,
    input: InputState,
    entities: EntityList,
    scene: SceneGraph,
    assets: AssetRegistry,
    camera: Camera,
    viewport: Viewport,
    overlay: Overlay,
    sound_cues: Vec<SoundCue>,
}

impl Engine {
    /// Load every manifest entry, then build the running engine and hand it to
    /// `init` to populate the initial entities.
    ///
    /// Nothing runs until the loading barrier has completed; `init` is called
    /// exactly once, and not at all if loading fails.
    pub async fn boot<S, F>(
        config: EngineConfig,
        manifest: &Manifest,
        source: &S,
        init: F,
    ) -> Result<Self, EngineError>
    where
        S: AssetSource + ?Sized,
        F: FnOnce(&mut Engine) -> Result<(), EngineError>,
    {
        tracing::info!(entries = manifest.len(), "loading assets");
        let timeout = config.load_timeout();
        let mut engine = LoadBarrier::new(manifest, source)
            .with_timeout(timeout)
            .wait(|assets| Self::with_assets(config, assets))
            .await?;
        init(&mut engine)?;
        tracing::info!(
            entities = engine.entities.len(),
            nodes = engine.scene.len(),
            "engine running"
        );
        Ok(engine)
    }

    /// Build a running engine around an already populated registry.
    pub fn with_assets(config: EngineConfig, assets: AssetRegistry) -> Self {
        let viewport = config.viewport;
        let camera = Camera::new(
            config.camera.fov_degrees,
            viewport.aspect(),
            config.camera.near,
            config.camera.far,
        );
        Self {
            frame_timer: FrameTimer::new(config.fps_window),
            clock: FrameClock::new(Instant::now()),
            dt: 0.0,
            tick: 0,
            input: InputState::new(),
            entities: EntityList::new(),
            scene: SceneGraph::new(),
            assets,
            camera,
            viewport,
            overlay: Overlay::new(),
            sound_cues: Vec::new(),
            config,
        }
    }

    // --- frame loop ---

    /// Run one full frame: measure elapsed time, update, sweep, render.
    pub fn frame<R: Renderer>(&mut self, now: Instant, renderer: &R) -> R::Output {
        let elapsed = self.clock.tick(now);
        self.step(elapsed);
        self.render(renderer)
    }

    /// Advance the simulation by `elapsed`, clamped to `max_frame_dt`.
    pub fn step(&mut self, elapsed: Duration) {
        self.dt = elapsed.as_secs_f32().min(self.config.max_frame_dt.max(0.0));
        self.tick += 1;
        let _span = tracing::debug_span!("frame", tick = self.tick).entered();
        self.frame_timer.record(Duration::from_secs_f32(self.dt));

        self.update_entities();
        let removed = self.entities.sweep(&mut self.scene);

        tracing::trace!(
            dt = self.dt,
            removed,
            live = self.entities.len(),
            "frame complete"
        );
    }

    /// Render the current scene from the current camera.
    pub fn render<R: Renderer>(&self, renderer: &R) -> R::Output {
        renderer.render(&self.scene, &self.camera)
    }

    fn update_entities(&mut self) {
        // Entities spawned during this pass are first updated next frame.
        let count = self.entities.len();
        for index in 0..count {
            let Some((id, mut behavior)) = self.entities.take_behavior(index) else {
                continue;
            };
            behavior.update(id, self);
            self.entities.restore_behavior(index, behavior);
        }
    }

    // --- host callbacks ---

    pub fn handle_input(&mut self, event: &InputEvent) {
        self.input.apply(event);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
        self.camera.set_aspect(width, height);
        tracing::debug!(width, height, "viewport resized");
    }

    /// Sound cues queued since the last drain. The host should drain once per
    /// frame; at most [`MAX_PENDING_SOUND_CUES`] are kept in between.
    pub fn drain_sound_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.sound_cues)
    }

    // --- entities ---

    /// Create an entity. Its node joins the scene and the entity joins the
    /// update list immediately.
    pub fn spawn(&mut self, desc: EntityDesc) -> EntityId {
        let EntityDesc {
            node,
            tag,
            behavior,
        } = desc;
        let template = node.unwrap_or_else(NodeTemplate::empty);
        let node = self.scene.instantiate(&template);
        if let Err(err) = self.scene.add(node) {
            tracing::error!(%err, "failed to attach entity node");
        }
        let id = self.entities.allocate_id();
        let index = self.entities.push(Entity::new(id, node, tag, behavior));
        tracing::debug!(entity = %id, name = %template.name, "created entity at index {index}");
        id
    }

    /// Spawn an idle entity rendered by a fresh copy of a loaded model.
    pub fn spawn_model(&mut self, name: &str, transform: Transform) -> Result<EntityId, EngineError> {
        let model = self.assets.model(name)?.with_transform(transform);
        Ok(self.spawn(EntityDesc::new(model)))
    }

    pub fn entities(&self) -> &EntityList {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Flag an entity for removal at the end of the frame. Returns false if it
    /// is not live.
    pub fn mark_for_removal(&mut self, id: EntityId) -> bool {
        match self.entities.get_mut(id) {
            Some(entity) => {
                entity.pending_removal = true;
                true
            }
            None => false,
        }
    }

    /// The entity's position/rotation/scale, i.e. its primary node's transform.
    pub fn transform(&self, id: EntityId) -> Option<&Transform> {
        let node = self.entities.get(id)?.node();
        self.scene.transform(node)
    }

    pub fn transform_mut(&mut self, id: EntityId) -> Option<&mut Transform> {
        let node = self.entities.get(id)?.node();
        self.scene.transform_mut(node)
    }

    /// Instantiate `template` under the entity's primary node and record it as
    /// the entity's last sub-node.
    pub fn add_sub_node(
        &mut self,
        id: EntityId,
        template: &NodeTemplate,
    ) -> Result<NodeId, EngineError> {
        let parent = self
            .entities
            .get(id)
            .ok_or(EngineError::EntityNotFound(id))?
            .node();
        let node = self.scene.instantiate(template);
        if let Err(err) = self.scene.attach(parent, node) {
            self.scene.remove(node)?;
            return Err(err.into());
        }
        if let Some(entity) = self.entities.get_mut(id) {
            entity.push_sub_node(node);
        }
        Ok(node)
    }

    /// Detach and free one of the entity's sub-nodes.
    pub fn remove_sub_node(&mut self, id: EntityId, node: NodeId) -> Result<(), EngineError> {
        let entity = self
            .entities
            .get_mut(id)
            .ok_or(EngineError::EntityNotFound(id))?;
        if !entity.forget_sub_node(node) {
            return Err(EngineError::SubNodeNotAttached { entity: id, node });
        }
        self.scene.remove(node)?;
        Ok(())
    }

    // --- assets ---

    pub fn assets(&self) -> &AssetRegistry {
        &self.assets
    }

    pub fn texture(&self, name: &str) -> Result<&Texture, EngineError> {
        Ok(self.assets.texture(name)?)
    }

    /// A fresh copy of a loaded model, ready to be spawned.
    pub fn model(&self, name: &str) -> Result<NodeTemplate, EngineError> {
        Ok(self.assets.model(name)?)
    }

    /// Queue a loaded audio clip for playback at `volume_mult` times the base volume.
    pub fn play_sound(&mut self, name: &str, volume_mult: f32) -> Result<(), EngineError> {
        self.assets.audio(name)?;
        let volume = volume_mult * self.config.sound_volume;
        tracing::trace!(clip = name, volume, "sound cue");
        if self.sound_cues.len() >= MAX_PENDING_SOUND_CUES {
            let dropped = self.sound_cues.remove(0);
            tracing::warn!(clip = %dropped.clip, "sound cue queue full, dropping oldest");
        }
        self.sound_cues.push(SoundCue {
            clip: name.to_string(),
            volume,
        });
        Ok(())
    }

    // --- state ---

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Delta time of the current frame in seconds.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Number of frames stepped so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Frames per second averaged over the configured window.
    pub fn fps(&self) -> f32 {
        self.frame_timer.fps()
    }

    pub fn frame_timer(&self) -> &FrameTimer {
        &self.frame_timer
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut Overlay {
        &mut self.overlay
    }
}
