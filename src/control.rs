//! 制御コアモジュール
//!
//! 2相割り込みスケジューラ、モード状態機械、安全ゲート、学習スイープ、
//! フォアグラウンドヘルパを含みます。

pub mod foreground;
pub mod learning;
pub mod mode;
pub mod safety;
pub mod scheduler;

pub use foreground::ModeInputs;
pub use learning::SweepPoint;
pub use mode::{ControlMode, ModeRequest};
pub use safety::{VoltageGate, VoltageGateConfig};
pub use scheduler::{CarrierEdge, ControlLoop};
