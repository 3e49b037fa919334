use std::fmt;

/// Window lifecycle phase.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    /// GPU resources are being created.
    Loading,
    /// Idle between events; input and resize are handled.
    Running,
    /// Resources are being released. Terminal.
    Unloading,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Loading => f.write_str("loading"),
            Phase::Running => f.write_str("running"),
            Phase::Unloading => f.write_str("unloading"),
        }
    }
}

/// Forward-only state machine: `Loading -> Running -> Unloading`.
#[derive(Debug)]
pub struct Lifecycle {
    phase: Phase,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// `Loading -> Running`. Returns `false` from any other phase.
    pub fn finish_loading(&mut self) -> bool {
        self.advance(Phase::Loading, Phase::Running)
    }

    /// `Running -> Unloading`. Returns `false` from any other phase.
    pub fn begin_unload(&mut self) -> bool {
        self.advance(Phase::Running, Phase::Unloading)
    }

    fn advance(&mut self, from: Phase, to: Phase) -> bool {
        if self.phase != from {
            log::debug!("ignoring lifecycle transition {} -> {to}", self.phase);
            return false;
        }
        log::info!("lifecycle: {from} -> {to}");
        self.phase = to;
        true
    }
}
