use glam::{Mat4, Vec3};
use winit::event::KeyEvent;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::config::CameraConfig;
use crate::types::CameraUniform;

pub const ROTATE_SPEED: f32 = 1.0;
pub const ZOOM_STEP: f32 = 0.95;
pub const MIN_RADIUS: f32 = 0.5;
pub const MAX_RADIUS: f32 = 100.0;
const POLAR_EPSILON: f32 = 1e-6;

/// Pending motion, consumed a fraction per frame when damping is on
#[derive(Default, Clone, Copy, Debug)]
pub struct OrbitDelta {
    pub theta: f32,
    pub phi: f32,
    pub pan: Vec3,
}

/// Perspective camera orbiting a target point
pub struct Camera {
    pub target: Vec3,
    pub radius: f32,
    /// Azimuth around +Y, zero looking down -Z
    pub theta: f32,
    /// Polar angle from +Y
    pub phi: f32,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
    pub damping: f32,
    pub delta: OrbitDelta,
    zoom_scale: f32,
    home: (Vec3, Vec3),
}

impl Camera {
    pub fn new(config: &CameraConfig) -> Self {
        let position = Vec3::from_array(config.position);
        let target = Vec3::from_array(config.target);
        let mut camera = Self {
            target,
            radius: 1.0,
            theta: 0.0,
            phi: 0.0,
            fov_y: config.fov_degrees.to_radians(),
            near: config.near,
            far: config.far,
            aspect: 1.0,
            damping: config.damping.clamp(0.0, 1.0),
            delta: OrbitDelta::default(),
            zoom_scale: 1.0,
            home: (position, target),
        };
        camera.look_from(position, target);
        camera
    }

    fn look_from(&mut self, position: Vec3, target: Vec3) {
        let offset = position - target;
        self.target = target;
        self.radius = offset.length().clamp(MIN_RADIUS, MAX_RADIUS);
        self.theta = offset.x.atan2(offset.z);
        self.phi = (offset.y / offset.length().max(f32::EPSILON)).clamp(-1.0, 1.0).acos();
        self.delta = OrbitDelta::default();
        self.zoom_scale = 1.0;
    }

    pub fn reset(&mut self) {
        let (position, target) = self.home;
        self.look_from(position, target);
    }

    pub fn position(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        self.target
            + self.radius
                * Vec3::new(sin_phi * self.theta.sin(), self.phi.cos(), sin_phi * self.theta.cos())
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Drag in pixels; a full viewport height of drag is one full turn
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.delta.theta -= std::f32::consts::TAU * dx / h * ROTATE_SPEED;
        self.delta.phi -= std::f32::consts::TAU * dy / h * ROTATE_SPEED;
    }

    /// Drag in pixels; moves the target so the point under the cursor follows it
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        let visible_height = 2.0 * self.radius * (self.fov_y / 2.0).tan();
        let units_per_pixel = visible_height / h;
        self.delta.pan += (-self.right() * dx + self.up() * dy) * units_per_pixel;
    }

    /// Positive `steps` moves toward the target
    pub fn zoom(&mut self, steps: f32) {
        self.zoom_scale *= ZOOM_STEP.powf(steps);
    }

    pub fn update(&mut self) {
        let factor = if self.damping > 0.0 { self.damping } else { 1.0 };

        self.theta += self.delta.theta * factor;
        self.phi = (self.phi + self.delta.phi * factor)
            .clamp(POLAR_EPSILON, std::f32::consts::PI - POLAR_EPSILON);
        self.target += self.delta.pan * factor;
        self.radius = (self.radius * self.zoom_scale).clamp(MIN_RADIUS, MAX_RADIUS);
        self.zoom_scale = 1.0;

        if self.damping > 0.0 {
            let decay = 1.0 - self.damping;
            self.delta.theta *= decay;
            self.delta.phi *= decay;
            self.delta.pan *= decay;
        } else {
            self.delta = OrbitDelta::default();
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: (self.projection_matrix() * self.view_matrix()).to_cols_array_2d(),
            position: self.position().to_array(),
            _pad: 0.0,
        }
    }

    pub fn process_keyboard(&mut self, event: &KeyEvent) {
        if !event.state.is_pressed() {
            return;
        }
        if let PhysicalKey::Code(keycode) = event.physical_key {
            match keycode {
                KeyCode::KeyR => self.reset(),
                KeyCode::Equal | KeyCode::NumpadAdd => self.zoom(1.0),
                KeyCode::Minus | KeyCode::NumpadSubtract => self.zoom(-1.0),
                _ => {}
            }
        }
    }
}
