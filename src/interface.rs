//! 外部コラボレータとの契約
//!
//! 制御コアは周辺機器（位置推定器、電流センシング、電流制御器、PWM
//! 変調器、診断出力）をこれらのトレイト越しにのみ扱います。実装は
//! ファームウェア側（またはテストのモック）が提供します。

use crate::foc::{DqVector, ElectricalAngle, PhaseVector};

/// 回転子位置ソース
///
/// 実機ではセンサレス推定器が実装します。始動・学習時はクレート内の
/// [`crate::foc::SimulatedPosition`]が同じ契約で合成角度を供給します。
pub trait PositionSensor {
    /// 1制御周期ぶん推定を進める（ダウンカウント相で毎周期呼ばれる）
    fn update(&mut self);

    /// 現在速度で`fraction`キャリア周期ぶん先の角度を予測して返す
    ///
    /// # 引数
    /// * `fraction` - キャリア周期に対する予測先の比率（遅延補正込み）
    fn phase_adjusted_angle(&self, fraction: f32) -> ElectricalAngle;

    /// 推定器が回転子に追従しているか
    fn is_tracking(&self) -> bool;

    /// 電気角速度 [rad/s]
    fn electrical_velocity(&self) -> f32;

    /// 機械角速度 [rad/s]（診断用）
    fn mechanical_velocity(&self) -> f32;

    /// 逆起電力ベクトルの大きさ（診断用）
    fn emf_magnitude(&self) -> f32 {
        0.0
    }
}

/// 相電流・バス電圧センシング
pub trait CurrentSensor {
    /// 計測値を更新する（アップカウント相で毎周期呼ばれる）
    ///
    /// # 引数
    /// * `channel_mask` - 有効化するチャネルのビットマスク
    ///
    /// # 戻り値
    /// 新しいサンプル一式が揃っていれば`true`
    fn update(&mut self, channel_mask: u8) -> bool;

    /// 最新の相電流 [A]
    fn currents(&self) -> PhaseVector;

    /// 最新の相電流スロープ [A/s]
    fn current_slopes(&self) -> PhaseVector;

    /// バス電圧 [V]
    fn vbus(&self) -> f32;

    /// 変換完了コンテキストから呼ばれ、次の変換シーケンスを開始する
    fn continue_sampling(&mut self);
}

/// d/q電流制御器
pub trait CurrentRegulator {
    /// 積分状態等を初期化する（駆動禁止中は毎周期呼ばれる）
    fn reset(&mut self);

    /// 出力電圧ベクトルの上限を設定する [V]
    fn set_limit(&mut self, limit: f32);

    /// 1周期ぶん制御を更新し、電圧指令を返す
    ///
    /// # 引数
    /// * `target` - 電流目標 [A]
    /// * `measured` - 計測電流 [A]
    /// * `velocity` - 電気角速度 [rad/s]（デカップリング用）
    fn update(&mut self, target: DqVector, measured: DqVector, velocity: f32) -> DqVector;

    /// 現在の出力電圧ベクトルの大きさ [V]（診断用）
    fn magnitude(&self) -> f32;
}

/// PWM変調器
pub trait PwmModulator {
    /// 電圧指令ベクトルを設定する
    fn set_command(&mut self, vdq: DqVector);

    /// 角度とバス電圧からデューティを再計算する（両エッジで毎回呼ばれる）
    fn update(&mut self, angle: ElectricalAngle, vbus: f32);
}

/// 診断テキスト出力（ベストエフォート、失敗は無視される）
pub trait DiagnosticSink {
    fn write_line(&mut self, line: &str);
}
