//! 2相タイマー割り込みスケジューラ
//!
//! PWMキャリアの半周期ごと（ダウンカウント・アップカウントの各相）に
//! 推定・計測・制御・変調の各ステップを実行します。各相は次の割り込み
//! までに完了しなければならないため、ここではメモリ確保・ブロッキング・
//! リトライを一切行いません。
//!
//! - ダウンカウント相: フォアグラウンド要求の適用、位置推定の更新、
//!   始動ランプ、次周期のための変調器プリロード
//! - アップカウント相: 電流計測と回転座標変換、追従喪失フォールバック、
//!   始動ハンドオフ、安全ゲート、モード別電圧指令、最終変調、
//!   スナップショット公開

use crate::config;
use crate::control::mode::{ControlMode, ModeRequest};
use crate::control::safety::VoltageGate;
use crate::fmt::*;
use crate::foc::{DqVector, ElectricalAngle, SimulatedPosition};
use crate::interface::{CurrentRegulator, CurrentSensor, PositionSensor, PwmModulator};
use crate::state::{DriveSnapshot, SharedState};

/// PWMキャリアカウンタの進行方向（割り込み発生時点の相）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierEdge {
    /// 谷側の半周期（カウンタ減少中）
    Downcounting,
    /// 山側の半周期（カウンタ増加中）
    Upcounting,
}

/// 制御ループ本体
///
/// 4つのコラボレータと合成角度ソースを所有し、タイマー割り込みから
/// [`Self::on_carrier_edge`]で駆動されます。
pub struct ControlLoop<'a, P, C, R, M> {
    estimator: P,
    sim: SimulatedPosition,
    current: C,
    regulator: R,
    pwm: M,
    gate: VoltageGate,
    shared: &'a SharedState,
    mode: ControlMode,
    idq_target: DqVector,
    iphase_dq: DqVector,
    iphase_dq_slope: DqVector,
    sample_faults: u32,
}

impl<'a, P, C, R, M> ControlLoop<'a, P, C, R, M>
where
    P: PositionSensor,
    C: CurrentSensor,
    R: CurrentRegulator,
    M: PwmModulator,
{
    pub fn new(
        estimator: P,
        current: C,
        regulator: R,
        pwm: M,
        sim: SimulatedPosition,
        shared: &'a SharedState,
    ) -> Self {
        Self {
            estimator,
            sim,
            current,
            regulator,
            pwm,
            gate: VoltageGate::default(),
            shared,
            mode: ControlMode::Torque,
            idq_target: DqVector::ZERO,
            iphase_dq: DqVector::ZERO,
            iphase_dq_slope: DqVector::ZERO,
            sample_faults: 0,
        }
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn simulated_position(&self) -> &SimulatedPosition {
        &self.sim
    }

    /// タイマー割り込みのエントリポイント
    pub fn on_carrier_edge(&mut self, edge: CarrierEdge) {
        match edge {
            CarrierEdge::Downcounting => self.downcounting_phase(),
            CarrierEdge::Upcounting => self.upcounting_phase(),
        }
    }

    /// ADC変換完了コンテキストのエントリポイント
    pub fn on_conversion_complete(&mut self) {
        self.current.continue_sampling();
    }

    fn downcounting_phase(&mut self) {
        self.apply_requests();

        self.estimator.update();
        self.sim.advance(1.0);

        if self.mode == ControlMode::Startup {
            self.startup_ramp();
        }

        // 次周期ぶんを先読みして変調器をプリロードする
        let angle = self.predicted_angle(config::PREDICT_PRIME_FRACTION);
        self.pwm.update(angle, self.current.vbus());
    }

    fn upcounting_phase(&mut self) {
        if !self.current.update(config::SAMPLE_CHANNEL_MASK) {
            // 失敗は助言扱い。次周期の新しい計測がそのまま上書きする
            self.sample_faults = self.sample_faults.wrapping_add(1);
        }

        let angle = self.predicted_angle(config::PREDICT_MEASURE_FRACTION);
        self.iphase_dq = angle.to_rotating(self.current.currents());
        self.iphase_dq_slope = angle.to_rotating(self.current.current_slopes());

        self.idq_target = self.shared.torque_target();
        let tracking = self.estimator.is_tracking();
        if !tracking && self.mode != ControlMode::Startup {
            // 追従喪失時は同一周期内で電流目標をゼロに落とす
            self.idq_target = DqVector::ZERO;
        }
        if tracking
            && self.mode == ControlMode::Startup
            && self.sim.electrical_velocity() > config::ramp::HANDOFF_RAD_S
        {
            info!("Estimator locked during startup ramp, switching to torque mode");
            self.mode = ControlMode::Torque;
        }

        let vbus = self.current.vbus();
        if self.gate.update(vbus) {
            self.regulator.set_limit(vbus * config::gate::VBUS_LIMIT_FACTOR);
            let vdq = self.mode_voltage();
            self.pwm.set_command(vdq);
        } else {
            self.regulator.reset();
            self.pwm.set_command(DqVector::ZERO);
        }

        let angle = self.predicted_angle(config::PREDICT_MODULATE_FRACTION);
        self.pwm.update(angle, vbus);

        self.publish_snapshot(vbus, tracking);
    }

    /// モード別の電圧指令選択（選択はこの1箇所に集約）
    fn mode_voltage(&mut self) -> DqVector {
        match self.mode {
            // 始動ランプ中もトルクモードと同一の電流制御則を使う
            ControlMode::Startup | ControlMode::Torque => self.regulator.update(
                self.idq_target,
                self.iphase_dq,
                self.estimator.electrical_velocity(),
            ),
            // 速度制御は未実装。明示的にゼロ電圧を指令する
            ControlMode::Velocity => DqVector::ZERO,
            ControlMode::Learning => self.shared.openloop_target(),
        }
    }

    /// モードに応じた角度ソースから予測角度を取得（選択はこの1箇所に集約）
    fn predicted_angle(&self, fraction: f32) -> ElectricalAngle {
        let fraction = fraction + config::DELAY_CORRECTION;
        if self.mode.uses_simulated_angle() {
            self.sim.phase_adjusted_angle(fraction)
        } else {
            self.estimator.phase_adjusted_angle(fraction)
        }
    }

    fn startup_ramp(&mut self) {
        let velocity = self.sim.electrical_velocity();
        if velocity > config::ramp::EXIT_RAD_S {
            self.sim.set_electrical_velocity(0.0);
            info!("Startup ramp complete, switching to torque mode");
            self.mode = ControlMode::Torque;
        } else if velocity >= config::ramp::LOW_BAND_TOP_RAD_S {
            self.sim
                .set_electrical_velocity(velocity + config::ramp::HIGH_BAND_ACCEL * config::CONTROL_DT);
        } else {
            self.sim
                .set_electrical_velocity(velocity + config::ramp::LOW_BAND_ACCEL * config::CONTROL_DT);
        }
    }

    fn apply_requests(&mut self) {
        if let Some(request) = self.shared.take_mode_request() {
            match request {
                ModeRequest::Learning => self.mode = ControlMode::Learning,
                ModeRequest::Startup => {
                    self.sim.set_electrical_velocity(0.0);
                    self.mode = ControlMode::Startup;
                }
                ModeRequest::Torque => self.mode = ControlMode::Torque,
                ModeRequest::Velocity => self.mode = ControlMode::Velocity,
            }
            debug!("Mode request applied");
        }
        if let Some(velocity) = self.shared.take_sim_velocity_request() {
            self.sim.set_electrical_velocity(velocity);
        }
    }

    fn publish_snapshot(&self, vbus: f32, tracking: bool) {
        self.shared.publish_snapshot(DriveSnapshot {
            iphase_dq: self.iphase_dq,
            iphase_dq_slope: self.iphase_dq_slope,
            vbus,
            mode: self.mode,
            enabled: self.gate.is_enabled(),
            tracking,
            electrical_velocity: self.estimator.electrical_velocity(),
            mechanical_velocity: self.estimator.mechanical_velocity(),
            emf_magnitude: self.estimator.emf_magnitude(),
            regulator_magnitude: self.regulator.magnitude(),
            sample_faults: self.sample_faults,
        });
    }
}
