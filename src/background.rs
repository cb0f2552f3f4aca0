use std::f64::consts::PI;

use rand::Rng;

/// Bubbles live between these heights; leaving the top recycles them.
pub const Y_MIN: f64 = -60.0;
pub const Y_MAX: f64 = 60.0;
/// Width of the horizontal spawn band, centred on zero.
pub const X_SPAN: f64 = 120.0;
/// Depth of the spawn band, centred on zero.
pub const Z_SPAN: f64 = 100.0;
/// Initial spread of heights (narrower than the recycle band).
const Y_SPAWN_SPAN: f64 = 70.0;
const SWAY_GAIN: f64 = 0.04;
const SPIN_PER_FRAME: f64 = 0.002;

pub const DEFAULT_BUBBLE_COUNT: usize = 80;

// ---------------------------------------------------------------------------
// Bubble – one drifting particle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub pos: [f64; 3],
    /// Upward drift per frame.
    pub speed: f64,
    pub sway_x: f64,
    pub sway_z: f64,
    /// Per-bubble offset into the sway waves.
    pub phase: f64,
    /// Radius multiplier.
    pub scale: f64,
    /// HSL hue in turns (0..1).
    pub hue: f64,
    pub rotation: f64,
}

fn centred<R: Rng + ?Sized>(rng: &mut R, span: f64) -> f64 {
    (rng.gen::<f64>() - 0.5) * span
}

impl Bubble {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            pos: [
                centred(rng, X_SPAN),
                centred(rng, Y_SPAWN_SPAN),
                centred(rng, Z_SPAN),
            ],
            speed: 0.05 + rng.gen::<f64>() * 0.18,
            sway_x: 0.2 + rng.gen::<f64>() * 0.6,
            sway_z: 0.2 + rng.gen::<f64>() * 0.6,
            phase: rng.gen::<f64>() * PI * 2.0,
            scale: 0.6 + rng.gen::<f64>() * 2.2,
            hue: 0.55 + rng.gen::<f64>() * 0.15,
            rotation: 0.0,
        }
    }

    /// Advance one frame at elapsed time `t` (seconds).
    pub fn step<R: Rng + ?Sized>(&mut self, t: f64, rng: &mut R) {
        self.pos[1] += self.speed;
        self.pos[0] += (t * 0.6 + self.phase).sin() * self.sway_x * SWAY_GAIN;
        self.pos[2] += (t * 0.5 + self.phase * 1.3).cos() * self.sway_z * SWAY_GAIN;
        if self.pos[1] > Y_MAX {
            self.recycle(rng);
        }
        self.rotation += SPIN_PER_FRAME;
    }

    /// Teleport to the bottom edge with fresh lateral coordinates.
    fn recycle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pos = [centred(rng, X_SPAN), Y_MIN, centred(rng, Z_SPAN)];
    }
}

// ---------------------------------------------------------------------------
// BubbleField – the whole background
// ---------------------------------------------------------------------------

/// Fixed-size set of bubbles. Bubbles are recycled in place, never added or
/// removed after construction.
#[derive(Debug, Clone)]
pub struct BubbleField {
    pub bubbles: Vec<Bubble>,
}

impl BubbleField {
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        Self {
            bubbles: (0..count).map(|_| Bubble::spawn(rng)).collect(),
        }
    }

    pub fn step<R: Rng + ?Sized>(&mut self, t: f64, rng: &mut R) {
        for b in &mut self.bubbles {
            b.step(t, rng);
        }
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Camera – perspective projection onto the viewport
// ---------------------------------------------------------------------------

/// Pinhole camera on the z axis looking at the origin.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub z: f64,
    /// Vertical field of view in degrees.
    pub fov_deg: f64,
    pub near: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            z: 65.0,
            fov_deg: 60.0,
            near: 0.1,
        }
    }
}

impl Camera {
    /// Project a world point into a `width` x `height` viewport.
    ///
    /// Returns screen `(x, y)` with the origin at the top-left and the
    /// pixels-per-world-unit at that depth, or `None` behind the camera.
    pub fn project(&self, p: [f64; 3], width: f64, height: f64) -> Option<(f64, f64, f64)> {
        let depth = self.z - p[2];
        if depth <= self.near {
            return None;
        }
        let focal = (height / 2.0) / (self.fov_deg.to_radians() / 2.0).tan();
        let k = focal / depth;
        Some((width / 2.0 + p[0] * k, height / 2.0 - p[1] * k, k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still_bubble(y: f64) -> Bubble {
        Bubble {
            pos: [5.0, y, -3.0],
            speed: 0.1,
            sway_x: 0.0,
            sway_z: 0.0,
            phase: 0.0,
            scale: 1.0,
            hue: 0.6,
            rotation: 0.0,
        }
    }

    #[test]
    fn spawn_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        let field = BubbleField::new(DEFAULT_BUBBLE_COUNT, &mut rng);
        assert_eq!(field.len(), 80);
        for b in &field.bubbles {
            assert!(b.pos[0] >= -60.0 && b.pos[0] < 60.0);
            assert!(b.pos[1] >= -35.0 && b.pos[1] < 35.0);
            assert!(b.pos[2] >= -50.0 && b.pos[2] < 50.0);
            assert!(b.speed >= 0.05 && b.speed < 0.23);
            assert!(b.scale >= 0.6 && b.scale < 2.8);
            assert!(b.hue >= 0.55 && b.hue < 0.70);
        }
    }

    #[test]
    fn bubble_above_bound_recycles_to_bottom() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut b = still_bubble(61.0);
        b.step(0.0, &mut rng);
        assert_eq!(b.pos[1], -60.0);
        assert!(b.pos[0] >= -60.0 && b.pos[0] < 60.0);
        assert!(b.pos[2] >= -50.0 && b.pos[2] < 50.0);
    }

    #[test]
    fn bubble_inside_bound_drifts_up() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut b = still_bubble(10.0);
        b.step(1.0, &mut rng);
        assert!((b.pos[1] - 10.1).abs() < 1e-12);
        assert_eq!(b.pos[0], 5.0);
        assert_eq!(b.pos[2], -3.0);
        assert!((b.rotation - 0.002).abs() < 1e-12);
    }

    #[test]
    fn field_size_is_fixed() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut field = BubbleField::new(12, &mut rng);
        for frame in 0..5000 {
            field.step(frame as f64 / 60.0, &mut rng);
        }
        assert_eq!(field.len(), 12);
        assert!(field.bubbles.iter().all(|b| b.pos[1] <= Y_MAX));
    }

    #[test]
    fn camera_projects_origin_to_centre() {
        let cam = Camera::default();
        let (x, y, k) = cam.project([0.0, 0.0, 0.0], 800.0, 600.0).unwrap();
        assert_eq!((x, y), (400.0, 300.0));
        assert!(k > 0.0);
        assert!(cam.project([0.0, 0.0, 70.0], 800.0, 600.0).is_none());
    }
}
