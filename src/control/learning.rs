//! 学習（特性同定）スイープ
//!
//! フォアグラウンドで実行されるブロッキング処理です。開ループd軸電圧と
//! 合成電気角速度の格子を掃引し、各点で回転座標系電流とそのスロープの
//! 平均を収集します。リアルタイム制約はありません。掃引中も割り込みは
//! 動き続け、合成角度と開ループ電圧で駆動されます。

use embedded_hal::delay::DelayNs;

use crate::config::learning;
use crate::control::mode::ModeRequest;
use crate::fmt::*;
use crate::foc::DqVector;
use crate::state::SharedState;

/// 掃引1点の平均結果
#[derive(Debug, Clone, Copy)]
pub struct SweepPoint {
    /// 指令した開ループd軸電圧 [V]
    pub volt_target: f32,
    /// 指令した合成電気角速度 [rad/s]
    pub speed_target: f32,
    /// 回転座標系電流の平均 [A]
    pub idq_mean: DqVector,
    /// 回転座標系電流スロープの平均 [A/s]
    pub idq_slope_mean: DqVector,
}

/// 格子全点を掃引し、各点の結果をコールバックへ渡す
///
/// 完了後は開ループ目標をゼロへ戻し、クールダウンを待ってから
/// トルクモードへの復帰を要求します。
pub fn run_sweep<D: DelayNs>(
    shared: &SharedState,
    delay: &mut D,
    mut on_point: impl FnMut(SweepPoint),
) {
    info!("Learning sweep started");

    for &volt in learning::VOLT_TARGETS.iter() {
        shared.set_openloop_target(DqVector::new(volt, 0.0));
        for &speed in learning::SPEED_TARGETS.iter() {
            shared.request_sim_velocity(speed);
            delay.delay_ms(learning::SETTLE_DELAY_MS);

            let mut d_sum = 0.0f32;
            let mut q_sum = 0.0f32;
            let mut d_slope_sum = 0.0f32;
            let mut q_slope_sum = 0.0f32;
            for _ in 0..learning::SAMPLE_COUNT {
                let snap = shared.snapshot();
                d_sum += snap.iphase_dq.d;
                q_sum += snap.iphase_dq.q;
                d_slope_sum += snap.iphase_dq_slope.d;
                q_slope_sum += snap.iphase_dq_slope.q;
                delay.delay_ms(learning::SAMPLE_INTERVAL_MS);
            }

            let inv = 1.0 / learning::SAMPLE_COUNT as f32;
            on_point(SweepPoint {
                volt_target: volt,
                speed_target: speed,
                idq_mean: DqVector::new(d_sum * inv, q_sum * inv),
                idq_slope_mean: DqVector::new(d_slope_sum * inv, q_slope_sum * inv),
            });
        }
    }

    shared.set_openloop_target(DqVector::ZERO);
    delay.delay_ms(learning::SWEEP_COOLDOWN_MS);
    shared.request_mode(ModeRequest::Torque);
    info!("Learning sweep complete, returning to torque mode");
}
