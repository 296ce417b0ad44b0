//! フォアグラウンド（非リアルタイム）処理
//!
//! ボタン入力のポーリングによるモード選択と、モード別のフォアグラウンド
//! 処理（トルク目標の発行、診断出力、学習スイープの実行）を行います。
//! 制御計算そのものには一切関与せず、割り込みとは共有状態の要求セル
//! 経由でのみやり取りします。

use embedded_hal::delay::DelayNs;

use crate::config;
use crate::control::learning::run_sweep;
use crate::control::mode::{ControlMode, ModeRequest};
use crate::foc::DqVector;
use crate::interface::DiagnosticSink;
use crate::state::SharedState;
use crate::telemetry;

/// モード選択ボタンの生状態（レベル検出、エッジ検出ではない）
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeInputs {
    /// ENTERボタンが押されている
    pub enter_pressed: bool,
    /// UPボタンが離されている
    pub up_released: bool,
}

/// ボタン状態からモード遷移要求を発行する
///
/// ENTER押下は学習モード要求として最優先。UP解放は学習中でなければ
/// 始動ランプ要求になります（合成角速度の初期化は割り込み側が行う）。
pub fn poll_mode_inputs(shared: &SharedState, inputs: ModeInputs) {
    if inputs.enter_pressed {
        shared.request_mode(ModeRequest::Learning);
        return;
    }
    if inputs.up_released && shared.snapshot().mode != ControlMode::Learning {
        shared.request_mode(ModeRequest::Startup);
    }
}

/// フォアグラウンドループの1周期ぶんの処理
///
/// 呼び出し側のメインループから繰り返し呼びます。学習モードでは
/// スイープ完了までブロックします。
pub fn foreground_cycle<D: DelayNs, S: DiagnosticSink>(
    shared: &SharedState,
    inputs: ModeInputs,
    torque_setpoint: DqVector,
    delay: &mut D,
    diag: &mut S,
) {
    poll_mode_inputs(shared, inputs);

    match shared.snapshot().mode {
        ControlMode::Startup | ControlMode::Torque => {
            shared.set_torque_target(torque_setpoint);
            let snap = shared.snapshot();
            diag.write_line(telemetry::status_line(&snap, inputs.enter_pressed).as_str());
            delay.delay_ms(config::FOREGROUND_PERIOD_MS);
        }
        ControlMode::Velocity => {}
        ControlMode::Learning => {
            run_sweep(shared, delay, |point| {
                diag.write_line(telemetry::sweep_line(&point).as_str());
            });
        }
    }
}
