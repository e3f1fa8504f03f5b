use glam::Vec3;

// Default tuning constants shared by the engine and the native driver.

// Layout
pub const GOLDEN_ANGLE: f32 = 2.399_963_2; // π(3 − √5)
pub const DEFAULT_RADIUS: f32 = 200.0; // sphere radius in container pixels

// Viewport
pub const DEFAULT_CONTAINER_SIZE: [f32; 2] = [800.0, 600.0];
pub const DEFAULT_PERSPECTIVE_DISTANCE: f32 = 600.0; // must stay larger than the radius

// Projection
pub const DEFAULT_MIN_SCALE: f32 = 0.5;
pub const DEFAULT_MAX_SCALE: f32 = 1.5;
pub const DEFAULT_MIN_OPACITY: f32 = 0.25; // back hemisphere fades to this, never to zero
pub const DEFAULT_BASE_IMAGE_RADIUS: f32 = 32.0; // footprint radius at scale 1.0

// Collision avoidance
pub const DEFAULT_COLLISION_PADDING: f32 = 4.0; // overlap tolerated before nudging (px)
pub const DEFAULT_COLLISION_PASSES: u32 = 3;
pub const MAX_COLLISION_PASSES: u32 = 16; // keeps one tick within a frame budget
pub const DEFAULT_MAX_COLLISION_DISPLACEMENT: f32 = 12.0; // per node per frame (px)

// Rotation physics
pub const DEFAULT_MOMENTUM_DECAY: f32 = 0.05; // fraction of velocity kept after one second
pub const DEFAULT_VELOCITY_EPSILON: f32 = 0.01; // rad/s; below this momentum stops
pub const DEFAULT_MAX_ANGULAR_SPEED: f32 = 6.0; // rad/s
pub const DEFAULT_DRAG_SENSITIVITY: f32 = 0.005; // rad per pixel of drag
pub const DEFAULT_AUTO_ROTATE_SPEED: f32 = 0.3; // rad/s
pub const DEFAULT_AUTO_ROTATE_AXIS: Vec3 = Vec3::Y;

// Input
pub const DEFAULT_CLICK_SLOP: f32 = 6.0; // max travel (px) still treated as a click
pub const MIN_SAMPLE_DT_SEC: f32 = 1.0e-4; // shorter pointer intervals give zero velocity

// Frame timing
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // caps the step after a stalled host
