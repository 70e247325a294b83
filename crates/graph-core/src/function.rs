//! The fixed catalog of scalar-field functions the graph can show.
//!
//! Ordinals are stable for the lifetime of the process: the compute kernel
//! table is laid out by them (see [`crate::dispatch::KernelTable`]). The
//! `evaluate` implementations mirror the WGSL kernels and serve as the CPU
//! reference for them.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

#[repr(u32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FunctionName {
    #[default]
    Wave = 0,
    MultiWave = 1,
    Ripple = 2,
    Sphere = 3,
    Torus = 4,
}

pub const FUNCTION_COUNT: usize = FunctionName::ALL.len();

impl FunctionName {
    pub const ALL: [FunctionName; 5] = [
        FunctionName::Wave,
        FunctionName::MultiWave,
        FunctionName::Ripple,
        FunctionName::Sphere,
        FunctionName::Torus,
    ];

    #[inline]
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            FunctionName::Wave => "wave",
            FunctionName::MultiWave => "multi-wave",
            FunctionName::Ripple => "ripple",
            FunctionName::Sphere => "sphere",
            FunctionName::Torus => "torus",
        }
    }

    /// The following entry in catalog order, wrapping after the last one.
    pub fn next(self) -> Self {
        let ordinal = (self.ordinal() as usize + 1) % FUNCTION_COUNT;
        Self::ALL[ordinal]
    }

    /// Uniformly random entry other than `self`.
    ///
    /// A single-entry catalog has nothing else to offer, so `self` is
    /// returned in that case.
    pub fn random_other_than<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        if FUNCTION_COUNT < 2 {
            return self;
        }
        // Draw from the N-1 others by skipping over the current ordinal.
        let offset = rng.gen_range(1..FUNCTION_COUNT);
        let ordinal = (self.ordinal() as usize + offset) % FUNCTION_COUNT;
        Self::ALL[ordinal]
    }

    /// Evaluate the function for grid coordinates `u, v` in `[-1, 1]` at time `t`.
    pub fn evaluate(self, u: f32, v: f32, t: f32) -> Vec3 {
        match self {
            FunctionName::Wave => wave(u, v, t),
            FunctionName::MultiWave => multi_wave(u, v, t),
            FunctionName::Ripple => ripple(u, v, t),
            FunctionName::Sphere => sphere(u, v, t),
            FunctionName::Torus => torus(u, v, t),
        }
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown function '{0}' (expected one of: wave, multi-wave, ripple, sphere, torus)")]
pub struct UnknownFunction(pub String);

impl FromStr for FunctionName {
    type Err = UnknownFunction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "wave" => Ok(FunctionName::Wave),
            "multiwave" => Ok(FunctionName::MultiWave),
            "ripple" => Ok(FunctionName::Ripple),
            "sphere" => Ok(FunctionName::Sphere),
            "torus" => Ok(FunctionName::Torus),
            _ => Err(UnknownFunction(s.to_string())),
        }
    }
}

/// Blend `from` into `to` at `progress` (0 = from, 1 = to).
pub fn morph(u: f32, v: f32, t: f32, from: FunctionName, to: FunctionName, progress: f32) -> Vec3 {
    from.evaluate(u, v, t)
        .lerp(to.evaluate(u, v, t), progress.clamp(0.0, 1.0))
}

fn wave(u: f32, v: f32, t: f32) -> Vec3 {
    Vec3::new(u, (PI * (u + v + t)).sin(), v)
}

fn multi_wave(u: f32, v: f32, t: f32) -> Vec3 {
    let mut y = (PI * (u + 0.5 * t)).sin();
    y += 0.5 * (2.0 * PI * (v + t)).sin();
    y += (PI * (u + v + 0.25 * t)).sin();
    Vec3::new(u, y * (1.0 / 2.5), v)
}

fn ripple(u: f32, v: f32, t: f32) -> Vec3 {
    let d = (u * u + v * v).sqrt();
    let y = (PI * (4.0 * d - t)).sin() / (1.0 + 10.0 * d);
    Vec3::new(u, y, v)
}

fn sphere(u: f32, v: f32, t: f32) -> Vec3 {
    let r = 0.9 + 0.1 * (PI * (6.0 * u + 4.0 * v + t)).sin();
    let s = r * (0.5 * PI * v).cos();
    Vec3::new(s * (PI * u).sin(), r * (0.5 * PI * v).sin(), s * (PI * u).cos())
}

fn torus(u: f32, v: f32, t: f32) -> Vec3 {
    let r1 = 0.7 + 0.1 * (PI * (6.0 * u + 0.5 * t)).sin();
    let r2 = 0.15 + 0.05 * (PI * (8.0 * u + 4.0 * v + 2.0 * t)).sin();
    let s = r1 + r2 * (PI * v).cos();
    Vec3::new(s * (PI * u).sin(), r2 * (PI * v).sin(), s * (PI * u).cos())
}
