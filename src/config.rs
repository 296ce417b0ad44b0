//! 制御コア設定定数
//!
//! 制御ループ・安全ゲート・始動ランプ・学習スイープの全パラメータを
//! 単位付きでここに集約します。ハードウェア依存の値（キャリア周波数、
//! 遅延補正）もここで一元管理します。

/// PWMキャリア周波数 [Hz]
///
/// タイマー割り込みはキャリアの半周期ごと（山・谷）に発生します。
pub const PWM_CARRIER_FREQ_HZ: f32 = 50_000.0;

/// 制御周期 [s]（キャリア1周期 = ダウンカウント+アップカウント）
pub const CONTROL_DT: f32 = 1.0 / PWM_CARRIER_FREQ_HZ;

/// 角度予測の遅延補正 [キャリア周期比]
///
/// 割り込み応答やADC変換の固定遅延を吸収するため、全ての角度予測
/// フラクションに加算されます。
pub const DELAY_CORRECTION: f32 = 0.0;

/// ダウンカウント相での角度予測フラクション（次周期のプリロード用）
pub const PREDICT_PRIME_FRACTION: f32 = 0.25;

/// 電流計測の回転変換に使う角度予測フラクション
pub const PREDICT_MEASURE_FRACTION: f32 = 0.0;

/// 変調器へ渡す最終角度の予測フラクション
pub const PREDICT_MODULATE_FRACTION: f32 = 0.75;

/// 電流センシング更新のチャネルマスク（全チャネル有効）
pub const SAMPLE_CHANNEL_MASK: u8 = 0xff;

/// モーターの極対数
pub const POLE_PAIRS: u8 = 6;

/// フォアグラウンド処理の周期 [ms]（トルクモードの診断出力間隔）
pub const FOREGROUND_PERIOD_MS: u32 = 100;

/// トルクモードの既定電流目標 d軸 [A]
pub const DEFAULT_TORQUE_TARGET_D: f32 = 0.0;

/// トルクモードの既定電流目標 q軸 [A]
pub const DEFAULT_TORQUE_TARGET_Q: f32 = 0.75;

/// バス電圧安全ゲート
pub mod gate {
    /// この電圧未満で駆動を禁止 [V]
    pub const DISABLE_BELOW_V: f32 = 10.0;

    /// この電圧超過で駆動を許可 [V]（ヒステリシス上限）
    pub const ENABLE_ABOVE_V: f32 = 15.0;

    /// 電流制御器の出力上限 = バス電圧 × この係数
    pub const VBUS_LIMIT_FACTOR: f32 = 0.7;
}

/// 始動ランプ（開ループ加速）
pub mod ramp {
    /// 低加速帯の上限電気角速度 [rad/s]
    pub const LOW_BAND_TOP_RAD_S: f32 = 250.0;

    /// 低加速帯の角加速度 [rad/s^2]
    pub const LOW_BAND_ACCEL: f32 = 200.0;

    /// 高加速帯の角加速度 [rad/s^2]
    pub const HIGH_BAND_ACCEL: f32 = 500.0;

    /// この電気角速度超過でランプ終了、トルクモードへ [rad/s]
    pub const EXIT_RAD_S: f32 = 1000.0;

    /// 推定器ロック時の早期ハンドオフ閾値 [rad/s]
    pub const HANDOFF_RAD_S: f32 = 750.0;
}

/// 学習（特性同定）スイープ
pub mod learning {
    /// 開ループd軸電圧の掃引格子 [V]
    pub const VOLT_TARGETS: [f32; 4] = [0.3, 0.4, 0.5, 0.6];

    /// 合成電気角速度の掃引格子 [rad/s]
    pub const SPEED_TARGETS: [f32; 5] = [0.0, 1000.0, 2000.0, 4000.0, 8000.0];

    /// 各掃引点の整定待ち時間 [ms]
    pub const SETTLE_DELAY_MS: u32 = 100;

    /// 各掃引点の平均化サンプル数
    pub const SAMPLE_COUNT: usize = 1000;

    /// サンプル間隔 [ms]
    pub const SAMPLE_INTERVAL_MS: u32 = 1;

    /// スイープ完了後、トルクモード復帰までの待機時間 [ms]
    pub const SWEEP_COOLDOWN_MS: u32 = 5000;
}
