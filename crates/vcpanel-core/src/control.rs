//! Motion-control command seam.
//!
//! [`MachineControl`] is the panel's interface to the external control
//! daemon's command API: mode setting, override scales, continuous
//! jogging, program control, and a snapshot of externally visible state.
//! [`SimControl`] implements the seam over in-memory state with a command
//! journal, backing the headless demo loop and the test suite.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ControlError;

/// Controller task mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskMode {
    /// Manual control (jogging).
    Manual,
    /// Automatic program execution.
    Auto,
    /// Manual data input.
    Mdi,
}

/// Interpreter execution state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterpState {
    /// No program executing.
    Idle,
    /// Reading and executing a program.
    Reading,
    /// Execution paused.
    Paused,
    /// Waiting on a synchronization point.
    Waiting,
}

/// Machine axis identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// X-axis (typically left-right).
    X,
    /// Y-axis (typically front-back).
    Y,
    /// Z-axis (typically up-down).
    Z,
}

impl Axis {
    /// Axis index as used by the command API (X=0, Y=1, Z=2)
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
            Axis::Z => write!(f, "Z"),
        }
    }
}

/// Jog direction for continuous jogging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JogDirection {
    /// Jog toward negative axis travel.
    Negative,
    /// Stop jogging.
    Stop,
    /// Jog toward positive axis travel.
    Positive,
}

impl JogDirection {
    /// Direction as the command API's -1/0/+1 encoding
    pub fn as_i8(&self) -> i8 {
        match self {
            JogDirection::Negative => -1,
            JogDirection::Stop => 0,
            JogDirection::Positive => 1,
        }
    }
}

/// Externally visible controller state, read before mode-dependent commands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSnapshot {
    /// Current task mode.
    pub task_mode: TaskMode,
    /// Current interpreter state.
    pub interp_state: InterpState,
    /// Whether program execution is paused.
    pub paused: bool,
    /// Whether the machine is in emergency stop.
    pub estop: bool,
    /// Whether machine power is on.
    pub machine_on: bool,
}

impl Default for ControllerSnapshot {
    fn default() -> Self {
        Self {
            task_mode: TaskMode::Manual,
            interp_state: InterpState::Idle,
            paused: false,
            estop: false,
            machine_on: false,
        }
    }
}

/// Command interface to the external motion controller
pub trait MachineControl: Send + Sync {
    /// Set the controller task mode
    fn set_mode(&self, mode: TaskMode) -> Result<(), ControlError>;

    /// Ensure the controller is in the given mode before a command
    ///
    /// No-op when the mode is already active.
    fn ensure_mode(&self, mode: TaskMode) -> Result<(), ControlError> {
        if self.snapshot().task_mode != mode {
            self.set_mode(mode)?;
        }
        Ok(())
    }

    /// Set the feed override scale (1.0 = programmed feed)
    fn feed_override(&self, scale: f64) -> Result<(), ControlError>;

    /// Set the rapid override scale (1.0 = full rapid)
    fn rapid_override(&self, scale: f64) -> Result<(), ControlError>;

    /// Start or stop a continuous jog on one axis
    fn continuous_jog(&self, axis: Axis, direction: JogDirection) -> Result<(), ControlError>;

    /// Load a program for automatic execution
    fn open_program(&self, path: &Path) -> Result<(), ControlError>;

    /// Run the loaded program from the given line
    fn auto_run(&self, start_line: u32) -> Result<(), ControlError>;

    /// Pause program execution
    fn auto_pause(&self) -> Result<(), ControlError>;

    /// Resume paused program execution
    fn auto_resume(&self) -> Result<(), ControlError>;

    /// Abort the current motion or program
    fn abort(&self) -> Result<(), ControlError>;

    /// Set an axis work origin
    fn set_axis_origin(&self, axis: Axis, offset: f64) -> Result<(), ControlError>;

    /// Read the externally visible controller state
    fn snapshot(&self) -> ControllerSnapshot;
}

/// A command accepted by [`SimControl`], recorded in its journal
#[derive(Debug, Clone, PartialEq)]
pub enum SimCommand {
    /// Mode change.
    SetMode(TaskMode),
    /// Feed override scale.
    FeedOverride(f64),
    /// Rapid override scale.
    RapidOverride(f64),
    /// Continuous jog command.
    Jog {
        /// Jogged axis.
        axis: Axis,
        /// Commanded direction (-1/0/+1).
        direction: i8,
    },
    /// Program load.
    OpenProgram(PathBuf),
    /// Program run from line.
    AutoRun(u32),
    /// Program pause.
    AutoPause,
    /// Program resume.
    AutoResume,
    /// Abort.
    Abort,
    /// Axis origin set.
    SetAxisOrigin {
        /// Zeroed axis.
        axis: Axis,
        /// New origin offset.
        offset: f64,
    },
}

#[derive(Debug)]
struct SimState {
    mode: TaskMode,
    interp: InterpState,
    paused: bool,
    estop: bool,
    machine_on: bool,
    feed_scale: f64,
    rapid_scale: f64,
    jog: [i8; 3],
    program: Option<PathBuf>,
    journal: Vec<SimCommand>,
}

impl Default for SimState {
    fn default() -> Self {
        Self {
            mode: TaskMode::Manual,
            interp: InterpState::Idle,
            paused: false,
            estop: false,
            machine_on: true,
            feed_scale: 1.0,
            rapid_scale: 1.0,
            jog: [0; 3],
            program: None,
            journal: Vec::new(),
        }
    }
}

/// Simulated motion controller
///
/// Accepts the full command seam over in-memory state and records every
/// accepted command in a journal. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct SimControl {
    state: std::sync::Arc<Mutex<SimState>>,
}

impl SimControl {
    /// Create a powered-on, out-of-estop simulated controller
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive the simulated machine into or out of emergency stop
    pub fn set_estop(&self, estop: bool) {
        let mut state = self.state.lock();
        state.estop = estop;
        if estop {
            state.machine_on = false;
            state.jog = [0; 3];
        }
    }

    /// Drive the simulated machine power state
    pub fn set_machine_on(&self, on: bool) {
        let mut state = self.state.lock();
        if !state.estop {
            state.machine_on = on;
        }
    }

    /// Currently commanded jog directions, indexed by axis
    pub fn jog_state(&self) -> [i8; 3] {
        self.state.lock().jog
    }

    /// Current feed override scale
    pub fn feed_scale(&self) -> f64 {
        self.state.lock().feed_scale
    }

    /// Current rapid override scale
    pub fn rapid_scale(&self) -> f64 {
        self.state.lock().rapid_scale
    }

    /// All commands accepted so far, in order
    pub fn journal(&self) -> Vec<SimCommand> {
        self.state.lock().journal.clone()
    }

    /// Clear the command journal
    pub fn clear_journal(&self) {
        self.state.lock().journal.clear();
    }

    fn guard_powered(state: &SimState) -> Result<(), ControlError> {
        if state.estop {
            return Err(ControlError::EstopActive);
        }
        if !state.machine_on {
            return Err(ControlError::MachineOff);
        }
        Ok(())
    }
}

impl MachineControl for SimControl {
    fn set_mode(&self, mode: TaskMode) -> Result<(), ControlError> {
        let mut state = self.state.lock();
        state.mode = mode;
        state.journal.push(SimCommand::SetMode(mode));
        Ok(())
    }

    fn feed_override(&self, scale: f64) -> Result<(), ControlError> {
        if scale < 0.0 || !scale.is_finite() {
            return Err(ControlError::InvalidOverride { value: scale });
        }
        let mut state = self.state.lock();
        state.feed_scale = scale;
        state.journal.push(SimCommand::FeedOverride(scale));
        Ok(())
    }

    fn rapid_override(&self, scale: f64) -> Result<(), ControlError> {
        if scale < 0.0 || !scale.is_finite() {
            return Err(ControlError::InvalidOverride { value: scale });
        }
        let mut state = self.state.lock();
        state.rapid_scale = scale;
        state.journal.push(SimCommand::RapidOverride(scale));
        Ok(())
    }

    fn continuous_jog(&self, axis: Axis, direction: JogDirection) -> Result<(), ControlError> {
        let mut state = self.state.lock();
        Self::guard_powered(&state)?;
        if state.mode != TaskMode::Manual {
            return Err(ControlError::CommandRejected {
                reason: "jog requires manual mode".to_string(),
            });
        }
        state.jog[axis.index()] = direction.as_i8();
        state.journal.push(SimCommand::Jog {
            axis,
            direction: direction.as_i8(),
        });
        Ok(())
    }

    fn open_program(&self, path: &Path) -> Result<(), ControlError> {
        let mut state = self.state.lock();
        state.program = Some(path.to_path_buf());
        state.journal.push(SimCommand::OpenProgram(path.to_path_buf()));
        Ok(())
    }

    fn auto_run(&self, start_line: u32) -> Result<(), ControlError> {
        let mut state = self.state.lock();
        Self::guard_powered(&state)?;
        if state.program.is_none() {
            return Err(ControlError::NoProgram);
        }
        state.interp = InterpState::Reading;
        state.paused = false;
        state.journal.push(SimCommand::AutoRun(start_line));
        Ok(())
    }

    fn auto_pause(&self) -> Result<(), ControlError> {
        let mut state = self.state.lock();
        state.paused = true;
        state.interp = InterpState::Paused;
        state.journal.push(SimCommand::AutoPause);
        Ok(())
    }

    fn auto_resume(&self) -> Result<(), ControlError> {
        let mut state = self.state.lock();
        state.paused = false;
        state.interp = InterpState::Reading;
        state.journal.push(SimCommand::AutoResume);
        Ok(())
    }

    fn abort(&self) -> Result<(), ControlError> {
        let mut state = self.state.lock();
        state.interp = InterpState::Idle;
        state.paused = false;
        state.jog = [0; 3];
        state.journal.push(SimCommand::Abort);
        Ok(())
    }

    fn set_axis_origin(&self, axis: Axis, offset: f64) -> Result<(), ControlError> {
        let mut state = self.state.lock();
        Self::guard_powered(&state)?;
        state.journal.push(SimCommand::SetAxisOrigin { axis, offset });
        Ok(())
    }

    fn snapshot(&self) -> ControllerSnapshot {
        let state = self.state.lock();
        ControllerSnapshot {
            task_mode: state.mode,
            interp_state: state.interp,
            paused: state.paused,
            estop: state.estop,
            machine_on: state.machine_on,
        }
    }
}
