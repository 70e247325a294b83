//! Compute dispatch planning: which kernel runs, with what parameters, over how
//! many workgroups.
//!
//! Kernels are laid out so that entry `to + from * FUNCTION_COUNT` morphs `from`
//! into `to`. A steady frame uses the diagonal entry `f + f * FUNCTION_COUNT`.

use crate::config::GraphConfig;
use crate::constants::{GROUP_SIZE, MAX_RESOLUTION};
use crate::error::GraphError;
use crate::function::{FunctionName, FUNCTION_COUNT};
use crate::transition::TransitionState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KernelIndex(u32);

impl KernelIndex {
    pub fn new(function: FunctionName, blend: FunctionName) -> Self {
        KernelIndex(function.ordinal() + blend.ordinal() * FUNCTION_COUNT as u32)
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// The function this kernel morphs into.
    pub fn function(self) -> FunctionName {
        FunctionName::ALL[self.as_usize() % FUNCTION_COUNT]
    }

    /// The function this kernel morphs away from.
    pub fn blend_function(self) -> FunctionName {
        FunctionName::ALL[self.as_usize() / FUNCTION_COUNT]
    }

    /// Every kernel in table order.
    pub fn all() -> impl Iterator<Item = KernelIndex> {
        (0..KernelTable::REQUIRED as u32).map(KernelIndex)
    }
}

/// `(function, blend) -> KernelIndex` lookup, checked once against the number
/// of kernels the backend actually compiled.
#[derive(Clone, Debug)]
pub struct KernelTable {
    entries: [[KernelIndex; FUNCTION_COUNT]; FUNCTION_COUNT],
}

impl KernelTable {
    pub const REQUIRED: usize = FUNCTION_COUNT * FUNCTION_COUNT;

    pub fn validate(available: usize) -> Result<Self, GraphError> {
        if available < Self::REQUIRED {
            return Err(GraphError::KernelTableTooSmall {
                required: Self::REQUIRED,
                available,
            });
        }
        let mut entries = [[KernelIndex(0); FUNCTION_COUNT]; FUNCTION_COUNT];
        for (b, row) in entries.iter_mut().enumerate() {
            for (f, entry) in row.iter_mut().enumerate() {
                *entry = KernelIndex::new(FunctionName::ALL[f], FunctionName::ALL[b]);
            }
        }
        Ok(Self { entries })
    }

    #[inline]
    pub fn lookup(&self, function: FunctionName, blend: FunctionName) -> KernelIndex {
        self.entries[blend.ordinal() as usize][function.ordinal() as usize]
    }
}

/// Uniform block consumed by every compute kernel.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct KernelParams {
    pub resolution: u32,
    pub step: f32,
    pub time: f32,
    pub progress: f32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DispatchPlan {
    pub kernel: KernelIndex,
    pub params: KernelParams,
    pub groups: [u32; 3],
}

impl DispatchPlan {
    pub fn new(state: &TransitionState, config: &GraphConfig, time: f32, table: &KernelTable) -> Self {
        let resolution = config.resolution.min(MAX_RESOLUTION);
        let progress = if state.transitioning {
            transition_progress(state.duration, config.transition_duration)
        } else {
            1.0
        };
        let groups = group_count(resolution);
        Self {
            kernel: table.lookup(state.function, state.blend_function()),
            params: KernelParams {
                resolution,
                step: grid_step(resolution),
                time: if time.is_finite() { time } else { 0.0 },
                progress,
            },
            groups: [groups, groups, 1],
        }
    }
}

/// Size of one grid cell in the `[-1, 1]` coordinate space.
#[inline]
pub fn grid_step(resolution: u32) -> f32 {
    2.0 / resolution.max(1) as f32
}

/// Workgroups needed along one axis to cover `resolution` cells.
#[inline]
pub fn group_count(resolution: u32) -> u32 {
    resolution.div_ceil(GROUP_SIZE)
}

#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Smoothed progress through a transition; a zero-length transition is
/// already complete.
pub fn transition_progress(duration: f32, transition_duration: f32) -> f32 {
    if transition_duration.is_nan() || transition_duration <= 0.0 {
        return 1.0;
    }
    let progress = smoothstep(0.0, 1.0, duration / transition_duration);
    if progress.is_nan() {
        1.0
    } else {
        progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_index_round_trips_its_functions() {
        for index in KernelIndex::all() {
            let rebuilt = KernelIndex::new(index.function(), index.blend_function());
            assert_eq!(rebuilt, index);
        }
        assert_eq!(KernelIndex::all().count(), 25);
    }

    #[test]
    fn table_rejects_short_kernel_sets() {
        assert_eq!(
            KernelTable::validate(24).err(),
            Some(GraphError::KernelTableTooSmall {
                required: 25,
                available: 24
            })
        );
        assert!(KernelTable::validate(25).is_ok());
        assert!(KernelTable::validate(64).is_ok());
    }

    #[test]
    fn transitioning_kernel_morphs_from_previous_function() {
        let table = KernelTable::validate(KernelTable::REQUIRED).unwrap();
        let state = TransitionState {
            duration: 0.5,
            transitioning: true,
            function: FunctionName::Ripple,
            transition_function: FunctionName::MultiWave,
        };
        let plan = DispatchPlan::new(&state, &GraphConfig::default(), 1.0, &table);
        assert_eq!(plan.kernel.get(), 2 + 5);
        assert_eq!(plan.kernel.function(), FunctionName::Ripple);
        assert_eq!(plan.kernel.blend_function(), FunctionName::MultiWave);
    }

    #[test]
    fn zero_length_transition_is_complete() {
        assert_eq!(transition_progress(0.0, 0.0), 1.0);
        assert_eq!(transition_progress(5.0, -1.0), 1.0);
        assert_eq!(transition_progress(f32::NAN, 3.0), 1.0);
    }

    #[test]
    fn smoothstep_hits_its_edges() {
        assert_eq!(smoothstep(0.0, 1.0, -2.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
        assert_eq!(smoothstep(0.0, 1.0, 7.0), 1.0);
    }

    #[test]
    fn plan_covers_grid_with_square_dispatch() {
        let table = KernelTable::validate(KernelTable::REQUIRED).unwrap();
        let config = GraphConfig {
            resolution: 100,
            ..GraphConfig::default()
        };
        let state = TransitionState::new(FunctionName::Wave);
        let plan = DispatchPlan::new(&state, &config, 2.5, &table);
        assert_eq!(plan.groups, [13, 13, 1]);
        assert_eq!(plan.params.resolution, 100);
        assert!((plan.params.step - 0.02).abs() < 1e-7);
        assert_eq!(plan.params.time, 2.5);
        assert_eq!(plan.params.progress, 1.0);
    }

    #[test]
    fn kernel_params_match_uniform_layout() {
        assert_eq!(std::mem::size_of::<KernelParams>(), 16);
    }
}
