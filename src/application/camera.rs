use crate::domain::Dimensions;

const MIN_PITCH: f32 = -1.45;
const MAX_PITCH: f32 = 1.45;

/// Orbit camera circling the center of the lattice.
///
/// Angles are in radians; yaw is measured around the vertical (y) axis
/// from +z toward +x.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub target: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    home_distance: f32,
    min_distance: f32,
    max_distance: f32,
}

impl Camera {
    /// Default yaw and pitch look down at the grid from the +x/+z side
    const HOME_YAW: f32 = 0.59;
    const HOME_PITCH: f32 = 0.39;

    /// Camera framing a lattice of the given size
    pub fn for_grid(dims: Dimensions) -> Self {
        let extent = dims.max_extent() as f32;
        let center = |width: usize| (width as f32 - 1.0) / 2.0;
        let home_distance = extent * 2.6;
        Self {
            target: [center(dims.x), center(dims.y), center(dims.z)],
            yaw: Self::HOME_YAW,
            pitch: Self::HOME_PITCH,
            distance: home_distance,
            home_distance,
            min_distance: extent * 0.75,
            max_distance: extent * 8.0,
        }
    }

    /// Rotate around the target
    pub fn orbit(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw = (self.yaw + d_yaw).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + d_pitch).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Move toward the target by factor
    pub fn zoom_in(&mut self, factor: f32) {
        self.distance = (self.distance / factor).clamp(self.min_distance, self.max_distance);
    }

    /// Move away from the target by factor
    pub fn zoom_out(&mut self, factor: f32) {
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
    }

    /// Eye position in world coordinates
    pub fn position(&self) -> [f32; 3] {
        let [tx, ty, tz] = self.target;
        let flat = self.distance * self.pitch.cos();
        [
            tx + flat * self.yaw.sin(),
            ty + self.distance * self.pitch.sin(),
            tz + flat * self.yaw.cos(),
        ]
    }

    /// Reset camera to default
    pub fn reset(&mut self) {
        self.yaw = Self::HOME_YAW;
        self.pitch = Self::HOME_PITCH;
        self.distance = self.home_distance;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::for_grid(Dimensions::default())
    }
}
