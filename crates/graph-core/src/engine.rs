//! The per-frame evaluate → draw loop and the lifetime of its position buffer.
//!
//! A [`GraphEngine`] owns a [`GraphBackend`] and the one buffer shared between
//! the compute kernels and the instanced draw. The buffer is allocated in
//! [`GraphEngine::initialize`] and released exactly once, either by
//! [`GraphEngine::shutdown`] or when the engine is dropped.

use crate::clock::FrameTime;
use crate::config::GraphConfig;
use crate::constants::{POSITION_CAPACITY, POSITION_STRIDE};
use crate::dispatch::{DispatchPlan, KernelTable};
use crate::error::GraphError;
use crate::render::DrawParams;
use crate::transition::{PhaseChange, TransitionScheduler, TransitionState};

/// GPU operations the engine needs. Implementations must execute `dispatch`
/// and `draw_instanced` for the same frame in call order.
pub trait GraphBackend {
    type Buffer;

    /// Number of compiled compute kernels available for dispatch.
    fn kernel_count(&self) -> usize;

    fn allocate_positions(&mut self, capacity: usize, element_size: usize) -> Self::Buffer;

    fn release_positions(&mut self, buffer: Self::Buffer);

    /// Bind `positions` as the kernel output and dispatch `plan`.
    fn dispatch(&mut self, positions: &Self::Buffer, plan: &DispatchPlan);

    /// Bind `positions` read-only and issue one instanced draw.
    fn draw_instanced(&mut self, positions: &Self::Buffer, draw: &DrawParams);
}

/// What happened during one [`GraphEngine::frame`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub phase_change: Option<PhaseChange>,
    pub plan: DispatchPlan,
    pub draw: DrawParams,
}

pub struct GraphEngine<B: GraphBackend> {
    backend: B,
    positions: Option<B::Buffer>,
    kernels: KernelTable,
    scheduler: TransitionScheduler,
}

impl<B: GraphBackend> GraphEngine<B> {
    /// Validate `config` and the backend's kernel set, then allocate the
    /// position buffer.
    pub fn initialize(mut backend: B, config: &GraphConfig, seed: u64) -> Result<Self, GraphError> {
        config.validate()?;
        let kernels = KernelTable::validate(backend.kernel_count())?;
        let positions = backend.allocate_positions(POSITION_CAPACITY, POSITION_STRIDE);
        log::info!(
            "allocated position buffer: {} points x {} bytes",
            POSITION_CAPACITY,
            POSITION_STRIDE
        );
        Ok(Self {
            backend,
            positions: Some(positions),
            kernels,
            scheduler: TransitionScheduler::new(config.function, seed),
        })
    }

    /// Advance the transition state, dispatch the kernel and draw the grid.
    pub fn frame(&mut self, time: FrameTime, config: &mut GraphConfig) -> FrameReport {
        let phase_change = self.scheduler.advance(time.delta, config);
        match phase_change {
            Some(PhaseChange::Started { from, to }) => {
                log::debug!("transition {from} -> {to} (mode {})", config.transition_mode)
            }
            Some(PhaseChange::Finished { function }) => {
                log::debug!("transition to {function} finished")
            }
            None => {}
        }

        let plan = DispatchPlan::new(self.scheduler.state(), config, time.total, &self.kernels);
        let draw = DrawParams::new(config);
        let positions = self
            .positions
            .as_ref()
            .expect("position buffer used after release");
        self.backend.dispatch(positions, &plan);
        self.backend.draw_instanced(positions, &draw);

        FrameReport {
            phase_change,
            plan,
            draw,
        }
    }

    pub fn state(&self) -> &TransitionState {
        self.scheduler.state()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Release the position buffer. Dropping the engine does the same.
    pub fn shutdown(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(positions) = self.positions.take() {
            self.backend.release_positions(positions);
            log::info!("released position buffer");
        }
    }
}

impl<B: GraphBackend> Drop for GraphEngine<B> {
    fn drop(&mut self) {
        self.release();
    }
}
