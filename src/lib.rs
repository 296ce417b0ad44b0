#![cfg_attr(not(test), no_std)]

//! センサレス三相モータードライブのリアルタイム制御コア
//!
//! PWMキャリア同期の2相割り込みスケジューラを中心に、モード状態機械・
//! バス電圧安全ゲート・始動ランプ・特性同定スイープを提供します。
//! タイマー・ADC・PWM・通信などの周辺機器は[`interface`]のトレイト
//! 契約の背後に置かれ、このクレート自体はハードウェア非依存です。
//!
//! ファームウェア側の組み立て方:
//! 1. コラボレータ実装と[`SimulatedPosition`]から[`ControlLoop`]を構築
//! 2. タイマー割り込みから[`ControlLoop::on_carrier_edge`]を呼ぶ
//!    （カウンタの進行方向で[`CarrierEdge`]を判別）
//! 3. ADC変換完了割り込みから[`ControlLoop::on_conversion_complete`]
//! 4. メインループから[`control::foreground::foreground_cycle`]を回す

mod fmt;

pub mod config;
pub mod control;
pub mod foc;
pub mod interface;
pub mod state;
pub mod telemetry;

pub use control::{CarrierEdge, ControlLoop, ControlMode, ModeInputs, ModeRequest, SweepPoint};
pub use foc::{DqVector, ElectricalAngle, PhaseVector, SimulatedPosition};
pub use state::{DriveSnapshot, SharedState, DRIVE_STATE};
